use explorer_common::address::{errors::AddressError, Address};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    /// The extension bridge is missing or has not been enabled yet.
    #[error("Wallet bridge unavailable: {0}")]
    Unavailable(String),

    /// The user refused to grant the application access to the extension.
    #[error("Access to the wallet was declined for '{0}'")]
    AccessDeclined(String),

    #[error("No signer available for address {0}")]
    SignerNotFound(Address),

    /// The user dismissed the signing prompt.
    #[error("Signing request was rejected")]
    SigningRejected,

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Invalid signature encoding: {0}")]
    InvalidSignature(String),

    #[error("Key material cannot be derived from an empty signature")]
    EmptyKeyMaterial,

    #[error("Failed to encrypt value: {0}")]
    EncryptionFailed(String),

    #[error("Failed to decrypt value: {0}")]
    DecryptionFailed(String),

    #[error("Keyring error: {0}")]
    Keyring(String),

    #[error("Address error: {0}")]
    Address(#[from] AddressError),
}

impl WalletError {
    /// Whether the failure means no signature could be obtained at all,
    /// as opposed to a failure while using one.
    pub fn is_signature_unavailable(&self) -> bool {
        matches!(
            self,
            WalletError::Unavailable(_)
                | WalletError::AccessDeclined(_)
                | WalletError::SignerNotFound(_)
                | WalletError::SigningRejected
                | WalletError::SigningFailed(_)
        )
    }
}
