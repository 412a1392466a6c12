use serde::{Deserialize, Serialize};

use crate::address::Address;

use super::{
    attributes::{decode_container, Attribute, AttributeSlot},
    error::MetadataError,
};

/// A single key/value property slot of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenProperty {
    pub key: String,
    pub value: String,
}

impl TokenProperty {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// A non-fungible token as reported by the chain SDK.
///
/// Tokens are fetched fresh on every lookup and replaced wholesale by the
/// next successful one; nothing here is cached between lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub collection_id: u32,
    pub token_id: u32,
    pub owner: Address,
    #[serde(default)]
    pub properties: Vec<TokenProperty>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Token {
    /// Returns the raw property slot addressed by `slot`.
    pub fn property(&self, slot: &AttributeSlot) -> Result<&TokenProperty, MetadataError> {
        match slot {
            AttributeSlot::Index(index) => self
                .properties
                .get(*index)
                .ok_or(MetadataError::MissingIndex(*index)),
            AttributeSlot::Key(key) => self
                .properties
                .iter()
                .find(|p| &p.key == key)
                .ok_or_else(|| MetadataError::MissingKey(key.clone())),
        }
    }

    /// Decodes the ordered attribute list stored in the `slot` property.
    pub fn attributes(&self, slot: &AttributeSlot) -> Result<Vec<Attribute>, MetadataError> {
        let property = self.property(slot)?;
        decode_container(&property.value)
    }

    pub fn is_owned_by(&self, address: &Address) -> bool {
        &self.owner == address
    }
}
