pub mod cli;
pub mod config;
pub mod error;
pub mod lookup;
pub mod reveal;
pub mod state;

pub use config::{ExplorerConfig, KeySource};
pub use error::{ConfigError, ExplorerError, LookupError, RevealError};
pub use lookup::{in_memory::InMemorySdk, LookupOutcome, TokenLookup, TokenSdk};
pub use reveal::{
    gate::{RevealGate, RevealState, RevealedAttributes},
    policy::RedactionPolicy,
    view::{derive_attribute_view, AttributeEntry, AttributeView},
};
pub use state::{explorer::Explorer, ExplorerState};
