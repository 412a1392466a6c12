//! Explicit application state and the transitions that mutate it.
//!
//! The state container is the only owner of the selection, the loaded token
//! and the reveal state. In-flight work (token lookups, signature requests)
//! runs outside of it and hands its result back through a ticket; a ticket
//! whose generation or epoch is no longer current is dropped, so a late
//! response can never overwrite newer state.

pub mod explorer;
pub mod render;

use explorer_common::{utils::NumericInput, Account, Address, AttributeSlot, Token};
use explorer_wallet::AccountBook;
use tracing::debug;

use crate::{
    error::{LookupError, RevealError},
    lookup::{LookupOutcome, RequestKey},
    reveal::{
        gate::{RevealGate, RevealState, RevealedAttributes},
        policy::RedactionPolicy,
        view::{derive_attribute_view, AttributeView},
    },
};

/// Handle for an in-flight token lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub key: RequestKey,
    generation: u64,
}

/// Handle for an in-flight reveal: a snapshot of what is being revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealTicket {
    pub token: Token,
    pub account: Account,
    epoch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealStart {
    /// Already revealed in this session; nothing to do.
    AlreadyRevealed,
    Pending(RevealTicket),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerState {
    pub accounts: AccountBook,
    pub selected: Option<Account>,
    pub collection: NumericInput,
    pub token_id: NumericInput,
    pub token: Option<Token>,
    pub reveal: RevealState,
    pub lookup_error: Option<String>,
    pub reveal_error: Option<String>,
    pub search_performed: bool,
    pub loading: bool,
    pub revealing: bool,
    lookup_generation: u64,
    session_epoch: u64,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_accounts(&mut self, accounts: AccountBook) {
        self.accounts = accounts;
    }

    /// Selects the account with `address`, or clears the selection when it is unknown.
    ///
    /// Any change of selection starts a new reveal session.
    pub fn select_account(&mut self, address: &Address) -> Option<Account> {
        let next = self.accounts.get(address).cloned();
        if next != self.selected {
            self.selected = next;
            self.reset_session();
        }
        self.selected.clone()
    }

    pub fn set_collection(&mut self, value: &str) -> bool {
        self.collection.set(value)
    }

    pub fn set_token_id(&mut self, value: &str) -> bool {
        self.token_id.set(value)
    }

    pub fn request_key(&self) -> RequestKey {
        RequestKey::new(
            self.collection.as_str(),
            self.token_id.as_str(),
            self.selected.as_ref().map(|a| a.address.clone()),
        )
    }

    /// Starts a lookup for the current inputs. Returns `None` when either
    /// identifier is empty; any lookup still in flight is invalidated so its
    /// response cannot land against inputs the user has since cleared.
    pub fn begin_lookup(&mut self) -> Option<LookupTicket> {
        let key = self.request_key();
        if !key.is_complete() {
            self.lookup_generation += 1;
            self.loading = false;
            return None;
        }

        self.lookup_generation += 1;
        self.loading = true;
        Some(LookupTicket { key, generation: self.lookup_generation })
    }

    /// Applies a lookup result if `ticket` is still the latest lookup.
    pub fn complete_lookup(&mut self, ticket: &LookupTicket, result: &Result<Token, LookupError>) -> LookupOutcome {
        if ticket.generation != self.lookup_generation {
            debug!(key = %ticket.key, "dropping superseded lookup response");
            return LookupOutcome::Superseded;
        }

        self.loading = false;
        self.search_performed = true;
        self.reset_session();

        match result {
            Ok(token) => {
                self.token = Some(token.clone());
                self.lookup_error = None;
                LookupOutcome::Loaded(token.clone())
            }
            Err(e) => {
                self.token = None;
                self.lookup_error = Some(e.user_message().to_string());
                LookupOutcome::Skipped
            }
        }
    }

    pub fn can_reveal(&self) -> bool {
        match &self.token {
            Some(token) => RevealGate::can_reveal(token, self.selected.as_ref()),
            None => false,
        }
    }

    /// Whether the reveal control should accept input right now.
    pub fn reveal_enabled(&self) -> bool {
        self.can_reveal() && !self.reveal.is_revealed() && !self.revealing
    }

    pub fn begin_reveal(&mut self) -> Result<RevealStart, RevealError> {
        if self.reveal.is_revealed() {
            return Ok(RevealStart::AlreadyRevealed);
        }
        if self.revealing {
            return Err(RevealError::InProgress);
        }

        let (token, account) = match (&self.token, &self.selected) {
            (Some(token), Some(account)) if RevealGate::can_reveal(token, Some(account)) => {
                (token.clone(), account.clone())
            }
            _ => return Err(RevealError::NotAuthorized),
        };

        self.revealing = true;
        self.reveal_error = None;
        Ok(RevealStart::Pending(RevealTicket { token, account, epoch: self.session_epoch }))
    }

    /// Applies a reveal result if `ticket` still belongs to the current session.
    pub fn complete_reveal(
        &mut self,
        ticket: &RevealTicket,
        result: Result<RevealedAttributes, RevealError>,
    ) -> Result<(), RevealError> {
        if ticket.epoch != self.session_epoch {
            debug!(address = %ticket.account.address, "dropping superseded reveal");
            return Err(RevealError::Superseded);
        }

        self.revealing = false;
        match result {
            Ok(revealed) => {
                self.reveal = RevealState::Revealed(revealed);
                self.reveal_error = None;
                Ok(())
            }
            Err(e) => {
                self.reveal_error = e.user_message();
                Err(e)
            }
        }
    }

    pub fn attribute_view(&self, policy: &RedactionPolicy, slot: &AttributeSlot) -> AttributeView {
        match &self.token {
            Some(token) => derive_attribute_view(token, &self.reveal, policy, slot),
            None => AttributeView::default(),
        }
    }

    fn reset_session(&mut self) {
        self.session_epoch += 1;
        self.reveal = RevealState::Redacted;
        self.revealing = false;
        self.reveal_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn account(raw: &str) -> Account {
        Account::new(Address::parse(raw).unwrap(), None)
    }

    fn token(owner: &str, token_id: u32) -> Token {
        Token {
            collection_id: 5,
            token_id,
            owner: Address::parse(owner).unwrap(),
            properties: vec![],
            image: None,
        }
    }

    fn state_with_accounts() -> ExplorerState {
        let mut state = ExplorerState::new();
        state.set_accounts(AccountBook::from_accounts(vec![account("5Owner"), account("5Other")]));
        state
    }

    fn loaded(owner: &str) -> ExplorerState {
        let mut state = state_with_accounts();
        state.set_collection("5");
        state.set_token_id("10");
        let ticket = state.begin_lookup().unwrap();
        state.complete_lookup(&ticket, &Ok(token(owner, 10)));
        state
    }

    fn revealed() -> RevealedAttributes {
        RevealedAttributes::new(BTreeMap::from([(0, "Sparky".to_string())]))
    }

    #[test]
    fn test_empty_identifier_does_not_start_lookup() {
        let mut state = state_with_accounts();
        state.set_collection("5");

        assert!(state.begin_lookup().is_none());
        assert!(!state.loading);
    }

    #[test]
    fn test_clearing_identifier_drops_in_flight_lookup() {
        let mut state = state_with_accounts();
        state.set_collection("5");
        state.set_token_id("10");
        let ticket = state.begin_lookup().unwrap();
        assert!(state.loading);

        state.set_token_id("");
        assert!(state.begin_lookup().is_none());
        assert!(!state.loading);

        let outcome = state.complete_lookup(&ticket, &Ok(token("5Owner", 10)));
        assert_eq!(outcome, LookupOutcome::Superseded);
        assert!(state.token.is_none());
        assert!(!state.search_performed);
    }

    #[test]
    fn test_stale_lookup_dropped() {
        let mut state = state_with_accounts();
        state.set_collection("5");
        state.set_token_id("10");
        let first = state.begin_lookup().unwrap();
        state.set_token_id("11");
        let second = state.begin_lookup().unwrap();

        let outcome = state.complete_lookup(&second, &Ok(token("5Owner", 11)));
        assert!(matches!(outcome, LookupOutcome::Loaded(_)));

        let stale = state.complete_lookup(&first, &Ok(token("5Owner", 10)));
        assert_eq!(stale, LookupOutcome::Superseded);
        assert_eq!(state.token.as_ref().map(|t| t.token_id), Some(11));
    }

    #[test]
    fn test_failed_lookup_clears_token() {
        let mut state = loaded("5Owner");
        let ticket = state.begin_lookup().unwrap();
        let err = LookupError::Transport("reset".into());

        state.complete_lookup(&ticket, &Err(err));
        assert!(state.token.is_none());
        assert_eq!(state.lookup_error.as_deref(), Some("Token not found."));
    }

    #[test]
    fn test_reveal_requires_owner_selection() {
        let mut state = loaded("5Owner");
        assert_eq!(state.begin_reveal(), Err(RevealError::NotAuthorized));

        state.select_account(&Address::parse("5Other").unwrap());
        assert!(!state.can_reveal());
        assert_eq!(state.begin_reveal(), Err(RevealError::NotAuthorized));

        state.select_account(&Address::parse("5Owner").unwrap());
        assert!(state.can_reveal());
        assert!(matches!(state.begin_reveal(), Ok(RevealStart::Pending(_))));
    }

    #[test]
    fn test_reveal_in_progress_and_idempotent() {
        let mut state = loaded("5Owner");
        state.select_account(&Address::parse("5Owner").unwrap());

        let ticket = match state.begin_reveal().unwrap() {
            RevealStart::Pending(ticket) => ticket,
            other => panic!("unexpected {other:?}"),
        };
        assert!(!state.reveal_enabled());
        assert_eq!(state.begin_reveal(), Err(RevealError::InProgress));

        state.complete_reveal(&ticket, Ok(revealed())).unwrap();
        assert!(state.reveal.is_revealed());
        assert!(!state.reveal_enabled());
        assert_eq!(state.begin_reveal(), Ok(RevealStart::AlreadyRevealed));
    }

    #[test]
    fn test_account_change_resets_and_supersedes_reveal() {
        let mut state = loaded("5Owner");
        state.select_account(&Address::parse("5Owner").unwrap());
        let ticket = match state.begin_reveal().unwrap() {
            RevealStart::Pending(ticket) => ticket,
            other => panic!("unexpected {other:?}"),
        };

        state.select_account(&Address::parse("5Other").unwrap());
        assert_eq!(state.complete_reveal(&ticket, Ok(revealed())), Err(RevealError::Superseded));
        assert_eq!(state.reveal, RevealState::Redacted);
        assert!(!state.revealing);
    }

    #[test]
    fn test_reselecting_same_account_keeps_reveal() {
        let mut state = loaded("5Owner");
        let owner = Address::parse("5Owner").unwrap();
        state.select_account(&owner);
        if let RevealStart::Pending(ticket) = state.begin_reveal().unwrap() {
            state.complete_reveal(&ticket, Ok(revealed())).unwrap();
        }

        state.select_account(&owner);
        assert!(state.reveal.is_revealed());
    }

    #[test]
    fn test_new_token_resets_reveal() {
        let mut state = loaded("5Owner");
        state.select_account(&Address::parse("5Owner").unwrap());
        if let RevealStart::Pending(ticket) = state.begin_reveal().unwrap() {
            state.complete_reveal(&ticket, Ok(revealed())).unwrap();
        }
        assert!(state.reveal.is_revealed());

        let ticket = state.begin_lookup().unwrap();
        state.complete_lookup(&ticket, &Ok(token("5Owner", 10)));
        assert_eq!(state.reveal, RevealState::Redacted);
    }

    #[test]
    fn test_failed_reveal_stays_redacted_with_message() {
        let mut state = loaded("5Owner");
        state.select_account(&Address::parse("5Owner").unwrap());
        let ticket = match state.begin_reveal().unwrap() {
            RevealStart::Pending(ticket) => ticket,
            other => panic!("unexpected {other:?}"),
        };

        let result = state.complete_reveal(&ticket, Err(RevealError::TransformFailed("tag".into())));
        assert!(result.is_err());
        assert_eq!(state.reveal, RevealState::Redacted);
        assert!(!state.revealing);
        assert_eq!(state.reveal_error.as_deref(), Some("An error occurred during decryption."));
        assert!(state.reveal_enabled());
    }

    #[test]
    fn test_unknown_address_clears_selection() {
        let mut state = state_with_accounts();
        state.select_account(&Address::parse("5Owner").unwrap());
        let selected = state.select_account(&Address::parse("5Ghost").unwrap());

        assert!(selected.is_none());
        assert!(state.selected.is_none());
    }
}
