use std::{
    fs,
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier};
use explorer_common::{utils::security::generate_seed, Account, Address};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{decode_hex, SignRawPayload, Signer, SignerResult, WalletBridge};
use crate::errors::WalletError;

/// One entry of a keyring file: a 32-byte ed25519 seed in hex and an optional label.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeyringEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub seed: String,
}

/// Ed25519 signer for a single local account.
pub struct LocalSigner {
    address: Address,
    keypair: SigningKey,
    reject: Arc<AtomicBool>,
}

impl LocalSigner {
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, WalletError> {
        let signature = Signature::from_slice(signature)
            .map_err(|e| WalletError::InvalidSignature(e.to_string()))?;

        Ok(self.keypair.verifying_key().verify(message, &signature).is_ok())
    }
}

#[async_trait]
impl Signer for LocalSigner {
    async fn sign_raw(&self, payload: SignRawPayload) -> Result<SignerResult, WalletError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(WalletError::SigningRejected);
        }

        if payload.address != self.address {
            return Err(WalletError::SigningFailed(format!(
                "signer for {} cannot sign for {}",
                self.address, payload.address
            )));
        }

        let message = payload.message_bytes()?;
        let signature = self.keypair.sign(&message);

        Ok(SignerResult {
            signature: format!("0x{}", hex::encode(signature.to_bytes())),
        })
    }
}

/// In-process stand-in for the browser extension, backed by a local ed25519 keyring.
///
/// Used by the CLI front end and by tests. It can simulate the two user
/// refusals the real extension exposes: declining access and rejecting a
/// signing prompt.
pub struct LocalWalletBridge {
    signers: Vec<(Account, Arc<LocalSigner>)>,
    enabled_for: Mutex<Option<String>>,
    decline_access: AtomicBool,
    reject_signing: Arc<AtomicBool>,
}

impl LocalWalletBridge {
    pub fn new() -> Self {
        Self {
            signers: Vec::new(),
            enabled_for: Mutex::new(None),
            decline_access: AtomicBool::new(false),
            reject_signing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Adds an account derived from `seed`. Returns its address.
    pub fn add_seed(&mut self, seed: &[u8; 32], name: Option<String>) -> Address {
        let keypair = SigningKey::from_bytes(seed);
        let address = Address::from_public_key(&keypair.verifying_key());

        if self.signers.iter().any(|(account, _)| account.address == address) {
            return address;
        }

        let signer = Arc::new(LocalSigner {
            address: address.clone(),
            keypair,
            reject: Arc::clone(&self.reject_signing),
        });
        self.signers.push((Account::new(address.clone(), name), signer));
        address
    }

    pub fn with_seed(mut self, seed: &[u8; 32], name: Option<&str>) -> Self {
        self.add_seed(seed, name.map(str::to_string));
        self
    }

    pub fn from_entries(entries: Vec<KeyringEntry>) -> Result<Self, WalletError> {
        let mut bridge = Self::new();

        for entry in entries {
            let bytes = decode_hex(&entry.seed)
                .map_err(|e| WalletError::Keyring(format!("invalid seed: {e}")))?;
            let seed: [u8; 32] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| WalletError::Keyring(format!("seed must be 32 bytes, got {}", bytes.len())))?;
            bridge.add_seed(&seed, entry.name);
        }

        Ok(bridge)
    }

    pub fn load_keyring<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let data = fs::read_to_string(path.as_ref())
            .map_err(|e| WalletError::Keyring(format!("{}: {e}", path.as_ref().display())))?;
        let entries: Vec<KeyringEntry> =
            serde_json::from_str(&data).map_err(|e| WalletError::Keyring(e.to_string()))?;

        Self::from_entries(entries)
    }

    /// Generates a fresh seed, appends it to the keyring at `path` (created if
    /// missing) and returns the new account's address.
    pub fn generate_into_keyring<P: AsRef<Path>>(path: P, name: Option<String>) -> Result<Address, WalletError> {
        let path = path.as_ref();
        let mut entries: Vec<KeyringEntry> = if path.exists() {
            let data = fs::read_to_string(path).map_err(|e| WalletError::Keyring(format!("{}: {e}", path.display())))?;
            serde_json::from_str(&data).map_err(|e| WalletError::Keyring(e.to_string()))?
        } else {
            Vec::new()
        };

        let seed = generate_seed();
        let address = Address::from_public_key(&SigningKey::from_bytes(&seed).verifying_key());
        entries.push(KeyringEntry { name, seed: hex::encode(seed) });

        let json = serde_json::to_string_pretty(&entries).map_err(|e| WalletError::Keyring(e.to_string()))?;
        fs::write(path, json).map_err(|e| WalletError::Keyring(format!("{}: {e}", path.display())))?;

        info!(%address, keyring = %path.display(), "keyring entry generated");
        Ok(address)
    }

    pub fn set_decline_access(&self, decline: bool) {
        self.decline_access.store(decline, Ordering::SeqCst);
    }

    pub fn set_reject_signing(&self, reject: bool) {
        self.reject_signing.store(reject, Ordering::SeqCst);
    }

    pub fn local_signer(&self, address: &Address) -> Option<Arc<LocalSigner>> {
        self.signers
            .iter()
            .find(|(account, _)| &account.address == address)
            .map(|(_, signer)| Arc::clone(signer))
    }

    fn ensure_enabled(&self) -> Result<(), WalletError> {
        let enabled = self
            .enabled_for
            .lock()
            .map_err(|_| WalletError::Unavailable("bridge state poisoned".into()))?;

        match enabled.as_ref() {
            Some(_) => Ok(()),
            None => Err(WalletError::Unavailable("bridge not enabled".into())),
        }
    }
}

impl Default for LocalWalletBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletBridge for LocalWalletBridge {
    async fn enable(&self, app_name: &str) -> Result<(), WalletError> {
        if self.decline_access.load(Ordering::SeqCst) {
            warn!(app = app_name, "wallet access declined");
            return Err(WalletError::AccessDeclined(app_name.to_string()));
        }

        let mut enabled = self
            .enabled_for
            .lock()
            .map_err(|_| WalletError::Unavailable("bridge state poisoned".into()))?;
        *enabled = Some(app_name.to_string());

        info!(app = app_name, accounts = self.signers.len(), "local wallet enabled");
        Ok(())
    }

    async fn accounts(&self) -> Result<Vec<Account>, WalletError> {
        self.ensure_enabled()?;
        Ok(self.signers.iter().map(|(account, _)| account.clone()).collect())
    }

    async fn signer_for(&self, address: &Address) -> Result<Option<Arc<dyn Signer>>, WalletError> {
        self.ensure_enabled()?;
        Ok(self
            .local_signer(address)
            .map(|signer| signer as Arc<dyn Signer>))
    }
}
