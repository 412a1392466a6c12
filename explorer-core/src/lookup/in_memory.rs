use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use explorer_common::Token;
use tracing::debug;

use super::TokenSdk;
use crate::error::SdkError;

type TokenKey = (u32, u32);

/// Token catalog held in memory, standing in for the chain SDK.
///
/// Backs the CLI (loaded from a JSON catalog file) and the tests, which use
/// per-token latency and injected failures to exercise out-of-order
/// responses and transport errors.
#[derive(Default)]
pub struct InMemorySdk {
    tokens: Mutex<HashMap<TokenKey, Token>>,
    latency: Mutex<HashMap<TokenKey, Duration>>,
    failing: Mutex<HashSet<TokenKey>>,
    calls: AtomicUsize,
}

impl InMemorySdk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(self, token: Token) -> Self {
        self.insert(token);
        self
    }

    pub fn insert(&self, token: Token) {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.insert((token.collection_id, token.token_id), token);
        }
    }

    /// Delays responses for one token.
    pub fn set_latency(&self, collection_id: u32, token_id: u32, delay: Duration) {
        if let Ok(mut latency) = self.latency.lock() {
            latency.insert((collection_id, token_id), delay);
        }
    }

    /// Makes lookups of one token fail with a transport error.
    pub fn fail_on(&self, collection_id: u32, token_id: u32) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert((collection_id, token_id));
        }
    }

    /// Number of `get_token` calls that reached the SDK.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Self, SdkError> {
        let data = fs::read_to_string(path.as_ref())
            .map_err(|e| SdkError::Transport(format!("{}: {e}", path.as_ref().display())))?;
        let tokens: Vec<Token> = serde_json::from_str(&data).map_err(|e| SdkError::Decode(e.to_string()))?;

        let sdk = Self::new();
        for token in tokens {
            sdk.insert(token);
        }
        Ok(sdk)
    }

    fn poisoned() -> SdkError {
        SdkError::Transport("catalog lock poisoned".into())
    }
}

#[async_trait]
impl TokenSdk for InMemorySdk {
    async fn get_token(&self, collection_id: u32, token_id: u32) -> Result<Option<Token>, SdkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = (collection_id, token_id);

        let delay = self.latency.lock().map_err(|_| Self::poisoned())?.get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().map_err(|_| Self::poisoned())?.contains(&key) {
            return Err(SdkError::Transport(format!("connection reset fetching {collection_id}/{token_id}")));
        }

        let token = self.tokens.lock().map_err(|_| Self::poisoned())?.get(&key).cloned();
        debug!(collection_id, token_id, found = token.is_some(), "catalog lookup");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_common::{Address, TokenProperty};
    use std::io::Write;

    #[tokio::test]
    async fn test_insert_and_get() {
        let sdk = InMemorySdk::new();
        sdk.insert(Token {
            collection_id: 1,
            token_id: 2,
            owner: Address::parse("5Owner").unwrap(),
            properties: vec![TokenProperty::new("k", "v")],
            image: None,
        });

        assert!(sdk.get_token(1, 2).await.unwrap().is_some());
        assert!(sdk.get_token(1, 3).await.unwrap().is_none());
        assert_eq!(sdk.calls(), 2);
    }

    #[tokio::test]
    async fn test_load_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"collection_id":5,"token_id":10,"owner":"5FakeOwnerAddr","properties":[]}}]"#
        )
        .unwrap();

        let sdk = InMemorySdk::load_catalog(file.path()).unwrap();
        let token = sdk.get_token(5, 10).await.unwrap().unwrap();
        assert_eq!(token.owner.as_str(), "5FakeOwnerAddr");
    }

    #[test]
    fn test_load_catalog_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{]").unwrap();

        assert!(matches!(InMemorySdk::load_catalog(file.path()), Err(SdkError::Decode(_))));
    }
}
