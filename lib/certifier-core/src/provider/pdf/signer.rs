use certifier_crypto::signer::eddsa::{EDDSASigner, KeyPair};
use certifier_crypto::{Signer, SignerError};
use secrecy::SecretSlice;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait PdfSigner: Send + Sync {
    fn algorithm(&self) -> &'static str;

    fn public_key(&self) -> Vec<u8>;

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SignerError>;
}

pub struct Ed25519PdfSigner {
    key_pair: KeyPair,
}

impl Ed25519PdfSigner {
    pub fn new(secret_key: &SecretSlice<u8>) -> Result<Self, SignerError> {
        Ok(Self {
            key_pair: EDDSASigner::parse_private_key(secret_key)?,
        })
    }
}

impl PdfSigner for Ed25519PdfSigner {
    fn algorithm(&self) -> &'static str {
        "Ed25519"
    }

    fn public_key(&self) -> Vec<u8> {
        self.key_pair.public.to_owned()
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SignerError> {
        EDDSASigner {}.sign(data, &self.key_pair.public, &self.key_pair.private)
    }
}
