pub mod certificate;
pub mod participant;
pub mod participant_data;
pub mod signature;
pub mod stored_object;
