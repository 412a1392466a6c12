use explorer_common::AttributeSlot;

use crate::reveal::policy::RedactionPolicy;

use super::ExplorerState;

pub const LOADING: &str = "Loading...";
pub const NO_RESULTS: &str = "Please select an account to view results.";

/// Text rendition of the explorer page body for `state`.
///
/// The body stays empty until a lookup has completed at least once.
pub fn render(state: &ExplorerState, policy: &RedactionPolicy, slot: &AttributeSlot, marker: Option<&str>) -> String {
    if !state.search_performed {
        return String::new();
    }
    if state.loading {
        return LOADING.to_string();
    }

    let mut lines = Vec::new();

    match (&state.token, &state.lookup_error) {
        (Some(token), _) => {
            let name = state.accounts.get(&token.owner).and_then(|account| account.name.as_deref());
            match name.filter(|name| !name.trim().is_empty()) {
                Some(name) => lines.push(format!("Owner: {} ({name})", token.owner)),
                None => lines.push(format!("Owner: {}", token.owner)),
            }
            lines.push(format!("Collection: {}", token.collection_id));
            lines.push(format!("Token: {}", token.token_id));
            if let Some(image) = &token.image {
                lines.push(format!("Image: {image}"));
            }

            let view = state.attribute_view(policy, slot);
            lines.extend(view.lines(marker));

            if state.reveal_enabled() {
                lines.push("[decrypt available]".to_string());
            }
            if let Some(err) = &state.reveal_error {
                lines.push(err.clone());
            }
        }
        (None, Some(err)) => lines.push(err.clone()),
        (None, None) => lines.push(NO_RESULTS.to_string()),
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use explorer_common::{Account, Address, Token, TokenProperty};
    use explorer_wallet::AccountBook;

    const CONTAINER: &str =
        r#"{"attributes":[{"trait_type":"Color","value":"Red"},{"trait_type":"Nickname","value":"c2VhbGVk"}]}"#;

    fn owner() -> Address {
        Address::parse("5FakeOwnerAddr").unwrap()
    }

    fn loaded_state() -> ExplorerState {
        let mut state = ExplorerState::new();
        state.set_accounts(AccountBook::from_accounts(vec![Account::new(owner(), Some("Alice".into()))]));
        state.set_collection("5");
        state.set_token_id("10");
        let ticket = state.begin_lookup().unwrap();
        let token = Token {
            collection_id: 5,
            token_id: 10,
            owner: owner(),
            properties: vec![TokenProperty::new("attributes", CONTAINER)],
            image: None,
        };
        state.complete_lookup(&ticket, &Ok(token));
        state
    }

    fn render_default(state: &ExplorerState, marker: Option<&str>) -> String {
        render(state, &RedactionPolicy::default(), &AttributeSlot::Index(0), marker)
    }

    #[test]
    fn test_nothing_before_first_search() {
        assert_eq!(render_default(&ExplorerState::new(), None), "");

        let mut state = ExplorerState::new();
        state.set_collection("5");
        state.set_token_id("10");
        state.begin_lookup();
        assert_eq!(render_default(&state, None), "");
    }

    #[test]
    fn test_loading_after_first_search() {
        let mut state = loaded_state();
        state.set_token_id("11");
        state.begin_lookup();

        assert_eq!(render_default(&state, None), LOADING);
    }

    #[test]
    fn test_no_token_after_search() {
        let mut state = loaded_state();
        state.token = None;

        assert_eq!(render_default(&state, None), NO_RESULTS);
    }

    #[test]
    fn test_lookup_error_line() {
        let mut state = ExplorerState::new();
        state.set_collection("5");
        state.set_token_id("10");
        let ticket = state.begin_lookup().unwrap();
        state.complete_lookup(&ticket, &Err(LookupError::Transport("timeout".into())));

        assert_eq!(render_default(&state, None), "Token not found.");
    }

    #[test]
    fn test_token_shows_owner_address_and_marker() {
        let state = loaded_state();
        let rendered = render_default(&state, Some("(encrypted)"));

        assert_eq!(
            rendered,
            "Owner: 5FakeOwnerAddr (Alice)\nCollection: 5\nToken: 10\nColor: Red\nNickname: c2VhbGVk (encrypted)"
        );
    }

    #[test]
    fn test_unknown_owner_shows_bare_address() {
        let mut state = loaded_state();
        state.set_accounts(AccountBook::default());

        assert!(render_default(&state, None).starts_with("Owner: 5FakeOwnerAddr\nCollection: 5"));
    }

    #[test]
    fn test_owner_sees_decrypt_control() {
        let mut state = loaded_state();
        state.select_account(&owner());

        assert!(render_default(&state, None).ends_with("[decrypt available]"));
    }
}
