use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{bridge::decode_hex, errors::WalletError};

pub const KEY_LEN: usize = 32;

/// 32 bytes of AES-256 key material, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial([u8; KEY_LEN]);

impl KeyMaterial {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Derives key material from raw signature bytes.
    ///
    /// The signature is repeated until 32 bytes are filled, so a 64-byte
    /// ed25519 signature contributes its first half and a short signature is
    /// cycled. No hashing is applied.
    pub fn from_signature(signature: &[u8]) -> Result<Self, WalletError> {
        if signature.is_empty() {
            return Err(WalletError::EmptyKeyMaterial);
        }

        let mut key = [0u8; KEY_LEN];
        for (i, byte) in key.iter_mut().enumerate() {
            *byte = signature[i % signature.len()];
        }
        Ok(Self(key))
    }

    /// Same as [`KeyMaterial::from_signature`] for a `0x`-prefixed hex signature.
    pub fn from_signature_hex(signature: &str) -> Result<Self, WalletError> {
        let mut bytes = decode_hex(signature)?;
        let key = Self::from_signature(&bytes);
        bytes.zeroize();
        key
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial(..)")
    }
}
