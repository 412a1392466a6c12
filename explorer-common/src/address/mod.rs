//! Chain addresses and the wallet accounts that own them.

pub mod account;
pub mod address;
pub mod errors;

pub use account::Account;
pub use address::Address;
