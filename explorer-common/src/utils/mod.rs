//! Small helpers shared by the wallet and the explorer core.

pub mod input;
pub mod security;

pub use input::NumericInput;
