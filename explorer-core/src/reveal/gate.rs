use std::{collections::BTreeMap, sync::Arc};

use explorer_common::{Account, AttributeSlot, Token};
use explorer_wallet::{
    bridge::{request_signature, WalletBridge},
    AttributeCipher, KeyMaterial, LegacyCipher, WalletError,
};
use tracing::{debug, info, warn};

use super::policy::RedactionPolicy;
use crate::{config::KeySource, error::RevealError};

/// Cleartext values of the sensitive attributes, keyed by their position in
/// the token's attribute container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealedAttributes {
    cleartext: BTreeMap<usize, String>,
}

impl RevealedAttributes {
    pub fn new(cleartext: BTreeMap<usize, String>) -> Self {
        Self { cleartext }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.cleartext.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cleartext.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleartext.is_empty()
    }
}

/// Per token-view session. Starts `Redacted`; only a successful reveal by the
/// owner moves it to `Revealed`, and only a new token or a new account
/// selection moves it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Redacted,
    Revealed(RevealedAttributes),
}

impl RevealState {
    pub fn is_revealed(&self) -> bool {
        matches!(self, RevealState::Revealed(_))
    }

    pub fn cleartext(&self, index: usize) -> Option<&str> {
        match self {
            RevealState::Revealed(revealed) => revealed.get(index),
            RevealState::Redacted => None,
        }
    }
}

/// Opens sealed values with whichever scheme the gate is configured for.
enum Opener {
    Signature(KeyMaterial),
    OwnerAddress(LegacyCipher),
}

impl Opener {
    fn open(&self, sealed: &str) -> Result<String, WalletError> {
        match self {
            Opener::Signature(key) => AttributeCipher::new(key).open(sealed),
            Opener::OwnerAddress(legacy) => legacy.open(sealed),
        }
    }
}

pub struct RevealGate {
    bridge: Arc<dyn WalletBridge>,
    policy: RedactionPolicy,
    slot: AttributeSlot,
    message: String,
    key_source: KeySource,
}

impl RevealGate {
    pub fn new(
        bridge: Arc<dyn WalletBridge>,
        policy: RedactionPolicy,
        slot: AttributeSlot,
        message: impl Into<String>,
        key_source: KeySource,
    ) -> Self {
        Self { bridge, policy, slot, message: message.into(), key_source }
    }

    pub fn policy(&self) -> &RedactionPolicy {
        &self.policy
    }

    pub fn slot(&self) -> &AttributeSlot {
        &self.slot
    }

    /// True iff an account is selected and it is the token's owner.
    pub fn can_reveal(token: &Token, account: Option<&Account>) -> bool {
        account.map_or(false, |account| token.is_owned_by(&account.address))
    }

    /// Authorizes with a fresh signature and opens the sensitive attributes.
    ///
    /// The wallet is only contacted once ownership has been established. On
    /// any error nothing is revealed.
    pub async fn reveal(&self, token: &Token, account: Option<&Account>) -> Result<RevealedAttributes, RevealError> {
        let account = match account {
            Some(account) if Self::can_reveal(token, Some(account)) => account,
            _ => {
                debug!(
                    collection_id = token.collection_id,
                    token_id = token.token_id,
                    "reveal refused: selected account is not the owner"
                );
                return Err(RevealError::NotAuthorized);
            }
        };

        let signed = request_signature(self.bridge.as_ref(), &account.address, self.message.as_bytes())
            .await
            .map_err(|e| {
                warn!(address = %account.address, error = %e, "authorization signature unavailable");
                RevealError::SignatureUnavailable(e.to_string())
            })?;

        let opener = match self.key_source {
            KeySource::Signature => KeyMaterial::from_signature_hex(&signed.signature)
                .map(Opener::Signature)
                .map_err(|e| RevealError::TransformFailed(e.to_string()))?,
            KeySource::OwnerAddress => Opener::OwnerAddress(LegacyCipher::for_owner(&token.owner)),
        };

        let attributes = token.attributes(&self.slot)?;

        let mut cleartext = BTreeMap::new();
        for (index, attribute) in attributes.iter().enumerate() {
            if !self.policy.is_sensitive(&attribute.trait_type) {
                continue;
            }
            let clear = opener.open(&attribute.value).map_err(|e| {
                warn!(trait_type = %attribute.trait_type, error = %e, "sealed value did not open");
                RevealError::TransformFailed(e.to_string())
            })?;
            cleartext.insert(index, clear);
        }

        info!(
            collection_id = token.collection_id,
            token_id = token.token_id,
            revealed = cleartext.len(),
            "attributes revealed"
        );
        Ok(RevealedAttributes::new(cleartext))
    }
}
