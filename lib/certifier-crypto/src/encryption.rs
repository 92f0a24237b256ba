use cocoon::MiniCocoon;
use secrecy::{ExposeSecret, SecretSlice};

use crate::utilities;

#[derive(Debug, thiserror::Error)]
pub enum EncryptionError {
    #[error("crypto error: {0}")]
    Crypto(String),
    #[error("invalid key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),
}

/// Authenticated encryption (ChaCha20-Poly1305) of arbitrary data under a 32-byte key.
///
/// The output is self-contained: nonce and tag are stored alongside the ciphertext.
pub fn encrypt_data(
    data: &[u8],
    encryption_key: &SecretSlice<u8>,
) -> Result<Vec<u8>, EncryptionError> {
    let key = checked_key(encryption_key)?;
    let mut cocoon = MiniCocoon::from_key(key, &utilities::generate_random_bytes::<32>());
    cocoon
        .wrap(data)
        .map_err(|err| EncryptionError::Crypto(format!("failed to encrypt: {err:?}")))
}

pub fn decrypt_data(
    data: &[u8],
    encryption_key: &SecretSlice<u8>,
) -> Result<SecretSlice<u8>, EncryptionError> {
    let key = checked_key(encryption_key)?;
    // seed is not used for decryption, so passing dummy value
    let cocoon = MiniCocoon::from_key(key, &[0u8; 32]);
    cocoon
        .unwrap(data)
        .map(SecretSlice::from)
        .map_err(|err| EncryptionError::Crypto(format!("failed to decrypt: {err:?}")))
}

fn checked_key(encryption_key: &SecretSlice<u8>) -> Result<&[u8], EncryptionError> {
    let key = encryption_key.expose_secret();
    if key.len() != 32 {
        return Err(EncryptionError::InvalidKeyLength(key.len()));
    }
    Ok(key)
}
