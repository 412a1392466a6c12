use std::fmt;

use explorer_common::Address;

/// Identifies one request: which token, on behalf of which account.
///
/// Carried alongside in-flight requests so that a late response can be
/// matched against the selection that is current when it arrives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub collection_id: String,
    pub token_id: String,
    pub account: Option<Address>,
}

impl RequestKey {
    pub fn new(collection_id: &str, token_id: &str, account: Option<Address>) -> Self {
        Self {
            collection_id: collection_id.to_string(),
            token_id: token_id.to_string(),
            account,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.collection_id.is_empty() && !self.token_id.is_empty()
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection_id, self.token_id)?;
        if let Some(account) = &self.account {
            write!(f, "@{account}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completeness() {
        assert!(RequestKey::new("5", "10", None).is_complete());
        assert!(!RequestKey::new("5", "", None).is_complete());
        assert!(!RequestKey::new("", "10", None).is_complete());
    }

    #[test]
    fn test_display() {
        let plain = RequestKey::new("5", "10", None);
        let with_account = RequestKey::new("5", "10", Some(Address::parse("5Alice").unwrap()));

        assert_eq!(plain.to_string(), "5/10");
        assert_eq!(with_account.to_string(), "5/10@5Alice");
    }
}
