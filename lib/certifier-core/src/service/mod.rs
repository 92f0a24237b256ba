pub mod certificate;
pub mod distribution;
pub mod error;
pub mod participant;
pub mod render;
pub mod signature;

#[cfg(test)]
pub(crate) mod test_utilities;
