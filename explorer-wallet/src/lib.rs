pub mod account;
pub mod bridge;
pub mod errors;
pub mod vault;

pub use account::{AccountBook, AccountProvider};
pub use bridge::{local::LocalWalletBridge, SignKind, SignRawPayload, Signer, SignerResult, WalletBridge};
pub use errors::WalletError;
pub use vault::{AttributeCipher, KeyMaterial, LegacyCipher};
