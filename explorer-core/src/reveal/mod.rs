//! Ownership-gated reveal of sensitive token attributes.

pub mod gate;
pub mod policy;
pub mod view;
