//! Seam to the browser wallet extension.
//!
//! The explorer never holds private keys. Everything it needs from the wallet
//! goes through [`WalletBridge`]: access negotiation, account enumeration and
//! per-address [`Signer`]s.

pub mod local;

use std::sync::Arc;

use async_trait::async_trait;
use explorer_common::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::WalletError;

/// Payload type for raw signing requests. Only raw bytes are signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignKind {
    Bytes,
}

/// A `signRaw` request: `data` is `0x`-prefixed hex of the bytes to sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignRawPayload {
    pub address: Address,
    pub data: String,
    #[serde(rename = "type")]
    pub kind: SignKind,
}

impl SignRawPayload {
    pub fn for_message(address: Address, message: &[u8]) -> Self {
        Self {
            address,
            data: format!("0x{}", hex::encode(message)),
            kind: SignKind::Bytes,
        }
    }

    pub fn message_bytes(&self) -> Result<Vec<u8>, WalletError> {
        decode_hex(&self.data)
    }
}

/// Result of a signing request: `0x`-prefixed hex signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerResult {
    pub signature: String,
}

#[async_trait]
pub trait Signer: Send + Sync {
    /// Signs raw bytes. User-interactive: may be rejected.
    async fn sign_raw(&self, payload: SignRawPayload) -> Result<SignerResult, WalletError>;
}

#[async_trait]
pub trait WalletBridge: Send + Sync {
    /// Requests access to the extension on behalf of `app_name`.
    async fn enable(&self, app_name: &str) -> Result<(), WalletError>;

    /// Enumerates the accounts the user has exposed to the application.
    async fn accounts(&self) -> Result<Vec<explorer_common::Account>, WalletError>;

    /// Returns the signer for `address`, or `None` when the extension cannot sign for it.
    async fn signer_for(&self, address: &Address) -> Result<Option<Arc<dyn Signer>>, WalletError>;
}

/// Asks the wallet to sign `message` with the key behind `address`.
///
/// A missing signer is reported as [`WalletError::SignerNotFound`].
pub async fn request_signature(
    bridge: &dyn WalletBridge,
    address: &Address,
    message: &[u8],
) -> Result<SignerResult, WalletError> {
    let signer = bridge
        .signer_for(address)
        .await?
        .ok_or_else(|| WalletError::SignerNotFound(address.clone()))?;

    debug!(%address, bytes = message.len(), "requesting raw signature");
    signer
        .sign_raw(SignRawPayload::for_message(address.clone(), message))
        .await
}

/// Decodes hex with or without a `0x` prefix.
pub fn decode_hex(raw: &str) -> Result<Vec<u8>, WalletError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    hex::decode(digits).map_err(|e| WalletError::InvalidSignature(e.to_string()))
}
