//! Token lookup against the external chain SDK.

pub mod in_memory;
pub mod query;

use std::sync::Arc;

use async_trait::async_trait;
use explorer_common::Token;
use tracing::{debug, warn};

use crate::error::{LookupError, SdkError};
pub use query::RequestKey;

/// The subset of the chain SDK the explorer consumes.
#[async_trait]
pub trait TokenSdk: Send + Sync {
    /// Fetches a token. `Ok(None)` means the chain has no such token.
    async fn get_token(&self, collection_id: u32, token_id: u32) -> Result<Option<Token>, SdkError>;
}

/// What happened to a lookup request from the caller's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The token was fetched and is now the displayed token.
    Loaded(Token),
    /// One of the identifiers was empty; nothing was fetched.
    Skipped,
    /// A newer lookup started while this one was in flight; the result was dropped.
    Superseded,
}

pub struct TokenLookup {
    sdk: Arc<dyn TokenSdk>,
}

impl TokenLookup {
    pub fn new(sdk: Arc<dyn TokenSdk>) -> Self {
        Self { sdk }
    }

    /// Resolves the digit-string identifiers in `key` to a token.
    ///
    /// Identifiers outside the `u32` range cannot exist on chain and are
    /// reported as not found without contacting the SDK.
    pub async fn get_token(&self, key: &RequestKey) -> Result<Token, LookupError> {
        let not_found = || LookupError::NotFound {
            collection_id: key.collection_id.clone(),
            token_id: key.token_id.clone(),
        };

        let (collection_id, token_id) = match (key.collection_id.parse::<u32>(), key.token_id.parse::<u32>()) {
            (Ok(c), Ok(t)) => (c, t),
            _ => {
                debug!(%key, "identifiers out of range");
                return Err(not_found());
            }
        };

        match self.sdk.get_token(collection_id, token_id).await {
            Ok(Some(token)) => Ok(token),
            Ok(None) => Err(not_found()),
            Err(e) => {
                warn!(%key, error = %e, "token lookup failed");
                Err(e.into())
            }
        }
    }
}
