use std::{fs, io, path::Path};

use explorer_common::AttributeSlot;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Where the reveal transform takes its key from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    /// Key material comes from the authorization signature.
    #[default]
    Signature,
    /// Earlier scheme: OpenSSL passphrase format keyed by the hex SHA-256
    /// of the owner address. A signature still authorizes the reveal.
    OwnerAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Name presented to the wallet extension when requesting access.
    pub app_name: String,
    /// Fixed message the owner signs to authorize a reveal.
    pub authorization_message: String,
    /// Trait names hidden until the owner reveals them.
    pub sensitive_traits: Vec<String>,
    pub attributes_slot: AttributeSlot,
    pub key_source: KeySource,
    /// Optional suffix shown after sealed values, e.g. `"(encrypted)"`.
    pub redaction_marker: Option<String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            app_name: "nft-explorer".to_string(),
            authorization_message: "Authorize decryption".to_string(),
            sensitive_traits: vec!["Nickname".to_string()],
            attributes_slot: AttributeSlot::default(),
            key_source: KeySource::default(),
            redaction_marker: None,
        }
    }
}

impl ExplorerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::Invalid("app_name must not be empty".into()));
        }
        if self.authorization_message.is_empty() {
            return Err(ConfigError::Invalid("authorization_message must not be empty".into()));
        }
        if self.sensitive_traits.iter().all(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid("at least one sensitive trait is required".into()));
        }
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        fs::write(path, json)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path.as_ref())?;
        let config: ExplorerConfig = serde_json::from_str(&data)?;
        config.validate()?;

        info!(path = %path.as_ref().display(), "configuration loaded");
        Ok(config)
    }
}
