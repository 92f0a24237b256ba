use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "sea-orm")]
use crate::macros::impls_for_seaorm_newtype;
use crate::macros::impls_for_uuid_newtype;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct ParticipantId(Uuid);

impls_for_uuid_newtype!(ParticipantId);

#[cfg(feature = "sea-orm")]
impls_for_seaorm_newtype!(ParticipantId);
