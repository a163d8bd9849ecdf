//! Session token generation and digesting.

use rand::{Rng, distributions::Alphanumeric};
use sha2::{Digest, Sha256};

/// Length of a session token in characters.
pub const TOKEN_LENGTH: usize = 64;

/// Generates a new random session token.
pub fn generate() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Computes the hex-encoded SHA-256 digest used as the store key.
pub fn digest(token: &str) -> String {
    let hash = Sha256::digest(token.as_bytes());
    hash.iter().map(|b| format!("{b:02x}")).collect()
}
