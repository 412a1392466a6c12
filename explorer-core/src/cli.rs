use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use explorer_common::Address;
use explorer_wallet::{AccountProvider, AttributeCipher, KeyMaterial, LegacyCipher, LocalWalletBridge};
use tracing::{info, warn};

use crate::{
    config::ExplorerConfig,
    error::{ConfigError, ExplorerError},
    lookup::in_memory::InMemorySdk,
    state::explorer::Explorer,
};

#[derive(Debug, Parser)]
#[command(name = "explorer")]
#[command(about = "NFT explorer with owner-gated attribute reveal")]
pub struct Cli {
    /// JSON configuration file; defaults are used when omitted
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the accounts exposed by a keyring
    Accounts {
        #[arg(short, long, value_name = "FILE")]
        keyring: PathBuf,
    },
    /// Generate a new account and append it to a keyring
    Keygen {
        #[arg(short, long, value_name = "FILE")]
        keyring: PathBuf,

        #[arg(short, long)]
        name: Option<String>,
    },
    /// Look up a token and print it, optionally revealing sealed attributes
    Show {
        /// JSON token catalog standing in for the chain
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        keyring: PathBuf,

        #[arg(short, long)]
        collection: String,

        #[arg(short, long)]
        token: String,

        /// Address of the account to act as
        #[arg(short, long)]
        account: Option<Address>,

        #[arg(long)]
        reveal: bool,
    },
    /// Seal a value for a token's attribute container
    Seal {
        /// Hex signature the owner produced over the authorization message
        #[arg(short, long, required_unless_present = "owner", conflicts_with = "owner")]
        signature: Option<String>,

        /// Seal in the legacy passphrase format keyed by this owner address instead
        #[arg(short, long)]
        owner: Option<Address>,

        #[arg(short, long)]
        value: String,
    },
    /// Write the effective configuration to a file
    Config {
        #[arg(short, long, value_name = "OUT")]
        out: PathBuf,
    },
}

impl Cli {
    /// Loads and validates the configuration named by `--config`.
    pub fn load_config(&self) -> Result<ExplorerConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => ExplorerConfig::load_from_file(path)?,
            None => ExplorerConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Runs `command` and returns what should be printed.
pub async fn execute(command: Commands, config: ExplorerConfig) -> Result<String, ExplorerError> {
    match command {
        Commands::Accounts { keyring } => {
            let bridge = LocalWalletBridge::load_keyring(&keyring)?;
            let provider = AccountProvider::new(Arc::new(bridge), config.app_name.clone());
            let book = provider.list_accounts().await;

            Ok(book
                .labels()
                .into_iter()
                .map(|(address, label)| format!("{label}\t{address}"))
                .collect::<Vec<_>>()
                .join("\n"))
        }

        Commands::Keygen { keyring, name } => {
            let address = LocalWalletBridge::generate_into_keyring(&keyring, name)?;
            Ok(format!("Address: {address}"))
        }

        Commands::Show { catalog, keyring, collection, token, account, reveal } => {
            let sdk = InMemorySdk::load_catalog(&catalog)?;
            let bridge = LocalWalletBridge::load_keyring(&keyring)?;
            let explorer = Explorer::new(config, Arc::new(bridge), Arc::new(sdk));

            explorer.load_accounts().await;
            if let Some(address) = &account {
                if explorer.select_account(address).await.is_none() {
                    return Err(format!("account {address} is not in the keyring").into());
                }
            }

            if explorer.set_collection(&collection).await.is_none() {
                return Err(format!("collection must be digits, got {collection:?}").into());
            }
            if explorer.set_token_id(&token).await.is_none() {
                return Err(format!("token must be digits, got {token:?}").into());
            }

            if reveal {
                if let Err(e) = explorer.reveal().await {
                    warn!(error = %e, "reveal did not complete");
                }
            }

            Ok(explorer.render().await)
        }

        Commands::Seal { signature, owner, value } => match (signature, owner) {
            (Some(signature), _) => {
                let key = KeyMaterial::from_signature_hex(&signature)?;
                Ok(AttributeCipher::new(&key).seal(&value)?)
            }
            (None, Some(owner)) => Ok(LegacyCipher::for_owner(&owner).seal(&value)?),
            (None, None) => Err("either --signature or --owner is required".into()),
        },

        Commands::Config { out } => {
            config.save_to_file(&out).map_err(ConfigError::from)?;
            info!(path = %out.display(), "configuration written");
            Ok(format!("Configuration written to {}", out.display()))
        }
    }
}
