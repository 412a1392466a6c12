use explorer_common::{Account, Address};

/// Accounts keyed by address, in the order the extension enumerated them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountBook {
    accounts: Vec<Account>,
}

impl AccountBook {
    /// Builds a book, keeping the first occurrence of each address.
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut book = Self::default();
        for account in accounts {
            if book.get(&account.address).is_none() {
                book.accounts.push(account);
            }
        }
        book
    }

    pub fn get(&self, address: &Address) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.address == address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// `(address, display name)` pairs for the account selector.
    pub fn labels(&self) -> Vec<(Address, String)> {
        self.accounts
            .iter()
            .map(|a| (a.address.clone(), a.display_name().to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
