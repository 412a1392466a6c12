use std::sync::Arc;

use explorer_common::Account;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::book::AccountBook;
use crate::{bridge::WalletBridge, errors::WalletError};

/// Lazily enumerates the accounts exposed by the wallet extension.
///
/// The first successful enumeration is kept for the rest of the session.
/// A failed enumeration (no extension, access declined) leaves the book
/// empty; callers see an empty selector and the next call tries again.
pub struct AccountProvider {
    bridge: Arc<dyn WalletBridge>,
    app_name: String,
    book: RwLock<AccountBook>,
}

impl AccountProvider {
    pub fn new(bridge: Arc<dyn WalletBridge>, app_name: impl Into<String>) -> Self {
        Self {
            bridge,
            app_name: app_name.into(),
            book: RwLock::new(AccountBook::default()),
        }
    }

    /// Returns the account book, enumerating the wallet only if it is still empty.
    pub async fn list_accounts(&self) -> AccountBook {
        {
            let book = self.book.read().await;
            if !book.is_empty() {
                return book.clone();
            }
        }

        let mut book = self.book.write().await;
        if !book.is_empty() {
            return book.clone();
        }

        match self.enumerate().await {
            Ok(accounts) => {
                *book = AccountBook::from_accounts(accounts);
                info!(count = book.len(), "wallet accounts loaded");
            }
            Err(e) => {
                warn!(error = %e, "wallet accounts unavailable");
            }
        }

        book.clone()
    }

    async fn enumerate(&self) -> Result<Vec<Account>, WalletError> {
        debug!(app = %self.app_name, "enabling wallet extension");
        self.bridge.enable(&self.app_name).await?;
        self.bridge.accounts().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{local::LocalWalletBridge, Signer};
    use async_trait::async_trait;
    use explorer_common::Address;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts enumerations so laziness can be observed.
    struct CountingBridge {
        inner: LocalWalletBridge,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WalletBridge for CountingBridge {
        async fn enable(&self, app_name: &str) -> Result<(), WalletError> {
            self.inner.enable(app_name).await
        }

        async fn accounts(&self) -> Result<Vec<Account>, WalletError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.accounts().await
        }

        async fn signer_for(&self, address: &Address) -> Result<Option<Arc<dyn Signer>>, WalletError> {
            self.inner.signer_for(address).await
        }
    }

    fn counting(inner: LocalWalletBridge) -> Arc<CountingBridge> {
        Arc::new(CountingBridge { inner, calls: AtomicUsize::new(0) })
    }

    #[tokio::test]
    async fn test_populated_once() {
        let bridge = counting(LocalWalletBridge::new().with_seed(&[1u8; 32], Some("Alice")));
        let provider = AccountProvider::new(bridge.clone(), "nft-explorer");

        let first = provider.list_accounts().await;
        let second = provider.list_accounts().await;

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(bridge.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_declined_access_leaves_book_empty_and_retries() {
        let bridge = counting(LocalWalletBridge::new().with_seed(&[1u8; 32], None));
        bridge.inner.set_decline_access(true);
        let provider = AccountProvider::new(bridge.clone(), "nft-explorer");

        assert!(provider.list_accounts().await.is_empty());

        bridge.inner.set_decline_access(false);
        assert_eq!(provider.list_accounts().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_wallet_is_re_enumerated() {
        let bridge = counting(LocalWalletBridge::new());
        let provider = AccountProvider::new(bridge.clone(), "nft-explorer");

        assert!(provider.list_accounts().await.is_empty());
        assert!(provider.list_accounts().await.is_empty());
        assert_eq!(bridge.calls.load(Ordering::SeqCst), 2);
    }
}
