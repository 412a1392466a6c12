use serde::{Deserialize, Serialize};

use super::Address;

/// A wallet account exposed by the browser extension bridge.
///
/// Accounts are enumerated once per session and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    #[serde(default)]
    pub name: Option<String>,
}

impl Account {
    pub fn new(address: Address, name: Option<String>) -> Self {
        Self { address, name }
    }

    /// Label shown in the account selector: the name when present, otherwise the address.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.address.as_str(),
        }
    }
}
