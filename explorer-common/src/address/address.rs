use std::fmt;
use std::str::FromStr;

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::AddressError;

/// A chain-format account identifier.
///
/// Addresses are opaque to the explorer: two addresses are the same account
/// only when their string forms are identical. Construction rejects empty
/// strings and embedded whitespace so that ownership comparisons can never be
/// fooled by formatting noise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }

        if let Some(pos) = trimmed.chars().position(|c| c.is_whitespace() || c.is_control()) {
            return Err(AddressError::InvalidCharacter(pos));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Derives the base58 address of an ed25519 verifying key.
    pub fn from_public_key(pk: &VerifyingKey) -> Self {
        Self(bs58::encode(pk.to_bytes()).into_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::parse(&raw).map_err(serde::de::Error::custom)
    }
}
