use ed25519_compact::{PublicKey, SecretKey};
use secrecy::{ExposeSecret, SecretSlice};

use crate::{Signer, SignerError};

pub struct EDDSASigner {}

pub struct KeyPair {
    pub public: Vec<u8>,
    pub private: SecretSlice<u8>,
}

impl EDDSASigner {
    pub fn generate_key_pair() -> KeyPair {
        let key_pair = ed25519_compact::KeyPair::generate();

        KeyPair {
            public: key_pair.pk.to_vec(),
            private: key_pair.sk.to_vec().into(),
        }
    }

    /// Accepts either a 64-byte secret key or a 32-byte seed.
    pub fn parse_private_key(secret_key: &SecretSlice<u8>) -> Result<KeyPair, SignerError> {
        let bytes = secret_key.expose_secret();
        let secret_key = match bytes.len() {
            SecretKey::BYTES => {
                SecretKey::from_slice(bytes).map_err(|_| SignerError::CouldNotExtractKeyPair)?
            }
            ed25519_compact::Seed::BYTES => {
                let seed = ed25519_compact::Seed::from_slice(bytes)
                    .map_err(|_| SignerError::CouldNotExtractKeyPair)?;
                ed25519_compact::KeyPair::from_seed(seed).sk
            }
            _ => return Err(SignerError::CouldNotExtractKeyPair),
        };
        let public_key = secret_key.public_key();

        Ok(KeyPair {
            public: public_key.to_vec(),
            private: secret_key.to_vec().into(),
        })
    }
}

impl Signer for EDDSASigner {
    fn sign(
        &self,
        input: &[u8],
        public_key: &[u8],
        private_key: &SecretSlice<u8>,
    ) -> Result<Vec<u8>, SignerError> {
        let secret_key = SecretKey::from_slice(private_key.expose_secret())
            .map_err(|_| SignerError::CouldNotExtractKeyPair)?;

        if secret_key.public_key().to_vec() != public_key {
            return Err(SignerError::CouldNotSign(
                "public key does not match private key".to_owned(),
            ));
        }

        Ok(secret_key.sign(input, None).to_vec())
    }

    fn verify(
        &self,
        input: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<(), SignerError> {
        let public_key = PublicKey::from_slice(public_key)
            .map_err(|err| SignerError::CouldNotExtractPublicKey(err.to_string()))?;
        let signature = ed25519_compact::Signature::from_slice(signature)
            .map_err(|err| SignerError::CouldNotVerify(err.to_string()))?;

        public_key
            .verify(input, &signature)
            .map_err(|_| SignerError::InvalidSignature)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let key_pair = EDDSASigner::generate_key_pair();
        let signer = EDDSASigner {};

        let signature = signer
            .sign(b"certificate", &key_pair.public, &key_pair.private)
            .unwrap();

        assert!(
            signer
                .verify(b"certificate", &signature, &key_pair.public)
                .is_ok()
        );
        assert_eq!(
            signer.verify(b"tampered", &signature, &key_pair.public),
            Err(SignerError::InvalidSignature)
        );
    }

    #[test]
    fn test_parse_private_key_from_seed() {
        let seed =
            hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60")
                .unwrap();

        let key_pair = EDDSASigner::parse_private_key(&seed.into()).unwrap();

        assert_eq!(
            hex::encode(&key_pair.public),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
    }

    #[test]
    fn test_parse_private_key_rejects_wrong_length() {
        let result = EDDSASigner::parse_private_key(&vec![1u8; 10].into());
        assert!(matches!(result, Err(SignerError::CouldNotExtractKeyPair)));
    }
}
