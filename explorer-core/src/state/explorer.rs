use std::sync::Arc;

use explorer_common::{Account, Address};
use explorer_wallet::{AccountBook, AccountProvider, WalletBridge};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{ExplorerState, RevealStart};
use crate::{
    config::ExplorerConfig,
    error::{LookupError, RevealError},
    lookup::{LookupOutcome, TokenLookup, TokenSdk},
    reveal::{gate::RevealGate, policy::RedactionPolicy, view::AttributeView},
};

/// Drives the explorer: account selection, token lookup and the reveal flow.
///
/// All state lives in one [`ExplorerState`] behind a lock that is never held
/// across a wallet or SDK call. Completions are applied through tickets, so a
/// response that arrives after the user moved on is discarded.
pub struct Explorer {
    config: ExplorerConfig,
    accounts: AccountProvider,
    lookup: TokenLookup,
    gate: RevealGate,
    state: Arc<RwLock<ExplorerState>>,
}

impl Explorer {
    pub fn new(config: ExplorerConfig, bridge: Arc<dyn WalletBridge>, sdk: Arc<dyn TokenSdk>) -> Self {
        let policy = RedactionPolicy::new(config.sensitive_traits.iter());
        let gate = RevealGate::new(
            Arc::clone(&bridge),
            policy,
            config.attributes_slot.clone(),
            config.authorization_message.clone(),
            config.key_source,
        );

        Self {
            accounts: AccountProvider::new(bridge, config.app_name.clone()),
            lookup: TokenLookup::new(sdk),
            gate,
            state: Arc::new(RwLock::new(ExplorerState::new())),
            config,
        }
    }

    /// Populates the account selector. A no-op once accounts are known.
    pub async fn load_accounts(&self) -> AccountBook {
        {
            let state = self.state.read().await;
            if !state.accounts.is_empty() {
                return state.accounts.clone();
            }
        }

        let book = self.accounts.list_accounts().await;
        self.state.write().await.set_accounts(book.clone());
        book
    }

    pub async fn select_account(&self, address: &Address) -> Option<Account> {
        let selected = self.state.write().await.select_account(address);
        debug!(%address, found = selected.is_some(), "account selected");
        selected
    }

    /// Updates the collection input. Returns `None` when the value is not a
    /// digit string and was ignored; otherwise the result of the lookup the
    /// change triggers.
    pub async fn set_collection(&self, value: &str) -> Option<Result<LookupOutcome, LookupError>> {
        if !self.state.write().await.set_collection(value) {
            return None;
        }
        Some(self.search().await)
    }

    /// Updates the token id input. See [`Explorer::set_collection`].
    pub async fn set_token_id(&self, value: &str) -> Option<Result<LookupOutcome, LookupError>> {
        if !self.state.write().await.set_token_id(value) {
            return None;
        }
        Some(self.search().await)
    }

    /// Looks up the token named by the current inputs.
    ///
    /// Does nothing and returns [`LookupOutcome::Skipped`] while either input is
    /// empty.
    pub async fn search(&self) -> Result<LookupOutcome, LookupError> {
        let ticket = match self.state.write().await.begin_lookup() {
            Some(ticket) => ticket,
            None => {
                debug!("lookup skipped: identifiers incomplete");
                return Ok(LookupOutcome::Skipped);
            }
        };

        debug!(key = %ticket.key, "token lookup started");
        let result = self.lookup.get_token(&ticket.key).await;

        let outcome = self.state.write().await.complete_lookup(&ticket, &result);
        if outcome == LookupOutcome::Superseded {
            return Ok(outcome);
        }

        let token = result?;
        info!(key = %ticket.key, owner = %token.owner, "token loaded");
        Ok(LookupOutcome::Loaded(token))
    }

    /// Reveals the sensitive attributes of the loaded token for its owner.
    ///
    /// Returns the attribute view as it stands afterwards. Revealing an
    /// already revealed token returns the current view without asking the
    /// wallet again.
    pub async fn reveal(&self) -> Result<AttributeView, RevealError> {
        let ticket = match self.state.write().await.begin_reveal()? {
            RevealStart::AlreadyRevealed => return Ok(self.view().await),
            RevealStart::Pending(ticket) => ticket,
        };

        let result = self.gate.reveal(&ticket.token, Some(&ticket.account)).await;
        self.state.write().await.complete_reveal(&ticket, result)?;

        Ok(self.view().await)
    }

    /// The attribute view for the current token and reveal state.
    pub async fn view(&self) -> AttributeView {
        self.state.read().await.attribute_view(self.gate.policy(), self.gate.slot())
    }

    pub async fn can_reveal(&self) -> bool {
        self.state.read().await.can_reveal()
    }

    pub async fn snapshot(&self) -> ExplorerState {
        self.state.read().await.clone()
    }

    /// Renders the page body as text.
    pub async fn render(&self) -> String {
        let state = self.state.read().await;
        super::render::render(&state, self.gate.policy(), self.gate.slot(), self.config.redaction_marker.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::in_memory::InMemorySdk;
    use explorer_common::{Token, TokenProperty};
    use explorer_wallet::LocalWalletBridge;

    const SEED: [u8; 32] = [7; 32];

    async fn setup() -> (Explorer, Arc<InMemorySdk>, Address) {
        let mut bridge = LocalWalletBridge::new();
        let owner = bridge.add_seed(&SEED, Some("Alice".to_string()));
        let token = Token {
            collection_id: 5,
            token_id: 10,
            owner: owner.clone(),
            properties: vec![TokenProperty::new(
                "attributes",
                r#"{"attributes":[{"trait_type":"Color","value":"Red"}]}"#,
            )],
            image: None,
        };
        let sdk = Arc::new(InMemorySdk::new().with_token(token));
        let config = ExplorerConfig {
            attributes_slot: explorer_common::AttributeSlot::Index(0),
            ..ExplorerConfig::default()
        };
        let explorer = Explorer::new(config, Arc::new(bridge), sdk.clone());
        (explorer, sdk, owner)
    }

    #[tokio::test]
    async fn test_load_accounts_is_lazy() {
        let (explorer, _, owner) = setup().await;

        let book = explorer.load_accounts().await;
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(&owner).map(|a| a.display_name()), Some("Alice"));
        assert_eq!(explorer.load_accounts().await, book);
    }

    #[tokio::test]
    async fn test_inputs_trigger_lookup_once_complete() {
        let (explorer, sdk, _) = setup().await;

        assert_eq!(explorer.set_collection("5").await, Some(Ok(LookupOutcome::Skipped)));
        assert_eq!(sdk.calls(), 0);

        let outcome = explorer.set_token_id("10").await;
        assert!(matches!(outcome, Some(Ok(LookupOutcome::Loaded(_)))));
        assert_eq!(sdk.calls(), 1);
    }

    #[tokio::test]
    async fn test_non_digit_input_ignored() {
        let (explorer, sdk, _) = setup().await;

        assert_eq!(explorer.set_collection("5a").await, None);
        assert!(explorer.snapshot().await.collection.is_empty());
        assert_eq!(sdk.calls(), 0);
    }

    #[tokio::test]
    async fn test_reveal_without_selection_not_authorized() {
        let (explorer, _, _) = setup().await;
        explorer.set_collection("5").await;
        explorer.set_token_id("10").await;

        assert_eq!(explorer.reveal().await, Err(RevealError::NotAuthorized));
        assert!(!explorer.can_reveal().await);
    }

    #[tokio::test]
    async fn test_owner_reveal_with_no_sensitive_values() {
        let (explorer, _, owner) = setup().await;
        explorer.load_accounts().await;
        explorer.select_account(&owner).await;
        explorer.set_collection("5").await;
        explorer.set_token_id("10").await;

        let view = explorer.reveal().await.unwrap();
        assert_eq!(view.value_of("Color"), Some("Red"));
        assert!(explorer.snapshot().await.reveal.is_revealed());
    }
}
