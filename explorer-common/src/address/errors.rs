use thiserror::Error;

/// Errors related to parsing and encoding chain addresses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The address string was empty after trimming.
    #[error("Address is empty")]
    Empty,

    /// The address contains whitespace or control characters.
    ///
    /// Chain-format identifiers are compared byte for byte, so a stray space
    /// would silently break ownership checks.
    #[error("Address contains invalid character at position {0}")]
    InvalidCharacter(usize),
}
