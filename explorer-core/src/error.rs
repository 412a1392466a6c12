use explorer_common::token::MetadataError;
use explorer_wallet::WalletError;
use thiserror::Error;

pub const TOKEN_NOT_FOUND: &str = "Token not found.";
pub const DECRYPTION_FAILED: &str = "An error occurred during decryption.";

/// Failures of the external chain SDK itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SdkError {
    #[error("SDK transport error: {0}")]
    Transport(String),

    #[error("SDK returned an undecodable token: {0}")]
    Decode(String),
}

/// Token lookup failures. Both render as the same "not found" line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Token {collection_id}/{token_id} not found")]
    NotFound { collection_id: String, token_id: String },

    #[error("Token lookup failed: {0}")]
    Transport(String),
}

impl LookupError {
    pub fn user_message(&self) -> &'static str {
        TOKEN_NOT_FOUND
    }
}

impl From<SdkError> for LookupError {
    fn from(err: SdkError) -> Self {
        LookupError::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RevealError {
    /// No account selected, no token loaded, or the account is not the owner.
    #[error("Selected account is not authorized to reveal this token")]
    NotAuthorized,

    /// The wallet could not or would not sign.
    #[error("Signature unavailable: {0}")]
    SignatureUnavailable(String),

    #[error("Malformed token metadata: {0}")]
    MalformedMetadata(String),

    #[error("Reveal transform failed: {0}")]
    TransformFailed(String),

    /// Another reveal for the same session is still waiting on the wallet.
    #[error("A reveal is already in progress")]
    InProgress,

    /// The token or account changed while the signature was pending.
    #[error("Reveal superseded by a newer selection")]
    Superseded,
}

impl RevealError {
    /// Inline text shown to the user, if the error is surfaced at all.
    pub fn user_message(&self) -> Option<String> {
        match self {
            RevealError::SignatureUnavailable(_) => Some(self.to_string()),
            RevealError::MalformedMetadata(_) | RevealError::TransformFailed(_) => {
                Some(DECRYPTION_FAILED.to_string())
            }
            RevealError::NotAuthorized | RevealError::InProgress | RevealError::Superseded => None,
        }
    }
}

impl From<MetadataError> for RevealError {
    fn from(err: MetadataError) -> Self {
        RevealError::MalformedMetadata(err.to_string())
    }
}

impl From<WalletError> for RevealError {
    fn from(err: WalletError) -> Self {
        if err.is_signature_unavailable() {
            RevealError::SignatureUnavailable(err.to_string())
        } else {
            RevealError::TransformFailed(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Reveal(#[from] RevealError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error("{0}")]
    General(String),
}

impl From<String> for ExplorerError {
    fn from(message: String) -> Self {
        ExplorerError::General(message)
    }
}

impl From<&str> for ExplorerError {
    fn from(message: &str) -> Self {
        ExplorerError::General(message.to_string())
    }
}
