// ABOUTME: Session token generation and hashing
// ABOUTME: Random bearer tokens, SHA-256 digests for storage, constant-time checks

use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Generate a cryptographically secure random token
/// Returns a base64-encoded 32-byte token
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 32] = rng.gen();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Hash a token using SHA-256; this is what gets stored
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare a token against a stored hash in constant time
pub fn verify_token_hash(token: &str, stored_hash: &str) -> bool {
    let computed_hash = hash_token(token);
    computed_hash
        .as_bytes()
        .ct_eq(stored_hash.as_bytes())
        .into()
}
