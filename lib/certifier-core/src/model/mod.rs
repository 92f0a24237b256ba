pub mod certificate;
pub mod participant;
pub mod signature;
pub mod stored_object;
