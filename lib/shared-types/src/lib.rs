mod certificate_id;
mod macros;
mod object_id;
mod participant_id;
mod signature_id;
mod signer_id;

pub use certificate_id::CertificateId;
pub use object_id::ObjectId;
pub use participant_id::ParticipantId;
pub use signature_id::SignatureId;
pub use signer_id::{BlankSignerIdError, SignerId};
