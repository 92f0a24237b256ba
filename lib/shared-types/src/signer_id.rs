use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "sea-orm")]
use crate::macros::impls_for_seaorm_newtype;
use crate::macros::impl_display;

/// Identifier of a required signer, taken verbatim from a `SIGNATURE-<signerId>` design anchor.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SignerId(String);

#[derive(Debug, thiserror::Error)]
#[error("Signer id must not be blank")]
pub struct BlankSignerIdError;

impl SignerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SignerId {
    type Err = BlankSignerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(BlankSignerIdError);
        }

        Ok(Self(trimmed.to_owned()))
    }
}

impl TryFrom<String> for SignerId {
    type Error = BlankSignerIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SignerId> for String {
    fn from(value: SignerId) -> Self {
        value.0
    }
}

impl AsRef<str> for SignerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl_display!(SignerId);

#[cfg(feature = "sea-orm")]
impls_for_seaorm_newtype!(SignerId);
