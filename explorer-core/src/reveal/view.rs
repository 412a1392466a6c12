use std::fmt;

use explorer_common::{AttributeSlot, Token};
use tracing::warn;

use super::{gate::RevealState, policy::RedactionPolicy};

/// One displayed attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEntry {
    pub trait_type: String,
    pub value: String,
    /// The value is still the stored, sealed form of a sensitive trait.
    pub sealed: bool,
}

/// Attributes as they should be displayed, in container order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeView {
    pub entries: Vec<AttributeEntry>,
}

impl AttributeView {
    pub fn value_of(&self, trait_type: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.trait_type == trait_type)
            .map(|e| e.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders `trait: value` lines, appending `marker` after sealed values.
    pub fn lines(&self, marker: Option<&str>) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| match (e.sealed, marker) {
                (true, Some(marker)) => format!("{}: {} {}", e.trait_type, e.value, marker),
                _ => format!("{}: {}", e.trait_type, e.value),
            })
            .collect()
    }
}

impl fmt::Display for AttributeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines(None) {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Builds the displayed attributes of `token` under `state`.
///
/// Non-sensitive traits always show their stored value. Sensitive traits show
/// their stored value unless `state` is revealed and holds a cleartext for
/// that position. A container that cannot be decoded yields an empty view.
pub fn derive_attribute_view(
    token: &Token,
    state: &RevealState,
    policy: &RedactionPolicy,
    slot: &AttributeSlot,
) -> AttributeView {
    let attributes = match token.attributes(slot) {
        Ok(attributes) => attributes,
        Err(e) => {
            warn!(
                collection_id = token.collection_id,
                token_id = token.token_id,
                error = %e,
                "attribute container unreadable"
            );
            return AttributeView::default();
        }
    };

    let entries = attributes
        .into_iter()
        .enumerate()
        .map(|(index, attribute)| {
            if !policy.is_sensitive(&attribute.trait_type) {
                return AttributeEntry { trait_type: attribute.trait_type, value: attribute.value, sealed: false };
            }

            match state.cleartext(index) {
                Some(clear) => AttributeEntry {
                    trait_type: attribute.trait_type,
                    value: clear.to_string(),
                    sealed: false,
                },
                None => AttributeEntry { trait_type: attribute.trait_type, value: attribute.value, sealed: true },
            }
        })
        .collect();

    AttributeView { entries }
}
