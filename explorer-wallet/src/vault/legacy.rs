use std::fmt;

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use explorer_common::{utils::security::generate_salt, Address};
use md5::Md5;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::WalletError;

pub const SALT_LEN: usize = 8;

const SALT_HEADER: &[u8; 8] = b"Salted__";
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;

/// Opens values sealed by the earlier owner-address scheme.
///
/// Wire format is OpenSSL passphrase mode:
/// `base64("Salted__" || salt[8] || AES-256-CBC ciphertext)` with PKCS#7
/// padding. Key and IV come from `EVP_BytesToKey` (MD5, one round) over the
/// passphrase and salt. The passphrase is the lowercase hex SHA-256 of the
/// owner's address string.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct LegacyCipher {
    passphrase: String,
}

impl LegacyCipher {
    pub fn for_owner(owner: &Address) -> Self {
        Self { passphrase: hex::encode(Sha256::digest(owner.as_str().as_bytes())) }
    }

    /// Seals `plaintext` under a fresh random salt.
    pub fn seal(&self, plaintext: &str) -> Result<String, WalletError> {
        self.seal_with_salt(plaintext, generate_salt())
    }

    pub fn seal_with_salt(&self, plaintext: &str, salt: [u8; SALT_LEN]) -> Result<String, WalletError> {
        let (mut key, mut iv) = self.derive(&salt);
        let encryptor = cbc::Encryptor::<Aes256>::new_from_slices(&key, &iv)
            .map_err(|e| WalletError::EncryptionFailed(e.to_string()));
        key.zeroize();
        iv.zeroize();
        let encrypted = encryptor?.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        let mut sealed = Vec::with_capacity(SALT_HEADER.len() + SALT_LEN + encrypted.len());
        sealed.extend_from_slice(SALT_HEADER);
        sealed.extend_from_slice(&salt);
        sealed.extend_from_slice(&encrypted);
        Ok(STANDARD.encode(sealed))
    }

    pub fn open(&self, sealed: &str) -> Result<String, WalletError> {
        let raw = STANDARD
            .decode(sealed.trim())
            .map_err(|e| WalletError::DecryptionFailed(format!("invalid base64: {e}")))?;

        let body_start = SALT_HEADER.len() + SALT_LEN;
        if raw.len() < body_start + BLOCK_LEN || !raw.starts_with(SALT_HEADER) {
            return Err(WalletError::DecryptionFailed("missing salt header".to_string()));
        }

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&raw[SALT_HEADER.len()..body_start]);

        let (mut key, mut iv) = self.derive(&salt);
        let decryptor = cbc::Decryptor::<Aes256>::new_from_slices(&key, &iv)
            .map_err(|e| WalletError::DecryptionFailed(e.to_string()));
        key.zeroize();
        iv.zeroize();
        let decrypted = decryptor?
            .decrypt_padded_vec_mut::<Pkcs7>(&raw[body_start..])
            .map_err(|_| WalletError::DecryptionFailed("bad padding".to_string()))?;

        String::from_utf8(decrypted).map_err(|e| WalletError::DecryptionFailed(e.to_string()))
    }

    /// `EVP_BytesToKey` with MD5 and a single round.
    fn derive(&self, salt: &[u8; SALT_LEN]) -> ([u8; KEY_LEN], [u8; IV_LEN]) {
        let mut material = Vec::with_capacity(KEY_LEN + IV_LEN + 16);
        let mut block: Vec<u8> = Vec::new();
        while material.len() < KEY_LEN + IV_LEN {
            let mut hasher = Md5::new();
            hasher.update(&block);
            hasher.update(self.passphrase.as_bytes());
            hasher.update(salt);
            block = hasher.finalize().to_vec();
            material.extend_from_slice(&block);
        }

        let mut key = [0u8; KEY_LEN];
        let mut iv = [0u8; IV_LEN];
        key.copy_from_slice(&material[..KEY_LEN]);
        iv.copy_from_slice(&material[KEY_LEN..KEY_LEN + IV_LEN]);
        material.zeroize();
        block.zeroize();
        (key, iv)
    }
}

impl fmt::Debug for LegacyCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LegacyCipher(..)")
    }
}
