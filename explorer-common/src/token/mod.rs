//! Token metadata as returned by the chain SDK.

pub mod attributes;
pub mod error;
pub mod model;

pub use attributes::{Attribute, AttributeSlot};
pub use error::MetadataError;
pub use model::{Token, TokenProperty};
