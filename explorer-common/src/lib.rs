pub mod address;
pub mod token;
pub mod utils;

pub use address::{Account, Address};
pub use token::{Attribute, AttributeSlot, Token, TokenProperty};
