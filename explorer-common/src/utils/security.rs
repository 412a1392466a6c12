use rand::{rngs::OsRng, RngCore};

fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// AES-GCM nonce for sealing an attribute value.
pub fn generate_nonce() -> [u8; 12] {
    random_bytes()
}

/// Salt for the legacy passphrase format.
pub fn generate_salt() -> [u8; 8] {
    random_bytes()
}

/// Ed25519 secret seed for a new keyring entry.
pub fn generate_seed() -> [u8; 32] {
    random_bytes()
}
