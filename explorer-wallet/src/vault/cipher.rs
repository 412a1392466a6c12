use aes_gcm::{
    aead::{generic_array::GenericArray, Aead},
    Aes256Gcm, KeyInit, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use explorer_common::utils::security::generate_nonce;

use super::key::KeyMaterial;
use crate::errors::WalletError;

pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

/// Seals and opens attribute values.
///
/// Wire format: `base64(nonce[12] || AES-256-GCM ciphertext || tag[16])`,
/// standard alphabet with padding, no associated data, UTF-8 plaintext.
pub struct AttributeCipher<'a> {
    key: &'a KeyMaterial,
}

impl<'a> AttributeCipher<'a> {
    pub fn new(key: &'a KeyMaterial) -> Self {
        Self { key }
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(GenericArray::from_slice(self.key.as_bytes()))
    }

    /// Seals `plaintext` under a fresh random nonce.
    pub fn seal(&self, plaintext: &str) -> Result<String, WalletError> {
        self.seal_with_nonce(plaintext, generate_nonce())
    }

    /// Seals `plaintext` under a caller-chosen nonce. Reusing a nonce with the
    /// same key leaks plaintext relationships, so this is meant for fixtures.
    pub fn seal_with_nonce(&self, plaintext: &str, nonce: [u8; NONCE_LEN]) -> Result<String, WalletError> {
        let encrypted = self
            .cipher()
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|e| WalletError::EncryptionFailed(e.to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + encrypted.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&encrypted);
        Ok(STANDARD.encode(sealed))
    }

    pub fn open(&self, sealed: &str) -> Result<String, WalletError> {
        let raw = STANDARD
            .decode(sealed.trim())
            .map_err(|e| WalletError::DecryptionFailed(format!("invalid base64: {e}")))?;

        if raw.len() < NONCE_LEN + TAG_LEN {
            return Err(WalletError::DecryptionFailed(format!(
                "sealed value too short: {} bytes",
                raw.len()
            )));
        }

        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        let decrypted = self
            .cipher()
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| WalletError::DecryptionFailed(e.to_string()))?;

        String::from_utf8(decrypted).map_err(|e| WalletError::DecryptionFailed(e.to_string()))
    }
}
