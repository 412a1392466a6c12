//! Key material and the reversible transform applied to sealed attribute values.
//!
//! This is a compatibility transform, not a security primitive: the key comes
//! straight from a wallet signature without a key-derivation function. It
//! exists so that values sealed by existing tokens can still be opened.
//! [`LegacyCipher`] opens values written by the earlier owner-address scheme.

pub mod cipher;
pub mod key;
pub mod legacy;

pub use cipher::AttributeCipher;
pub use key::KeyMaterial;
pub use legacy::LegacyCipher;
