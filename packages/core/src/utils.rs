// ABOUTME: Shared utility functions for Voxdesk
// ABOUTME: Short identifier generation for waitlist entries and sessions

use rand::Rng;

/// Generate an 8-character alphanumeric identifier
pub fn generate_short_id() -> String {
    const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..8)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
