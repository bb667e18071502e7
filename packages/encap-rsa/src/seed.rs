use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Derives a seed from `salt` and the current wall-clock time.
///
/// The seed is the sum of the Unicode scalar values of `salt` plus the milliseconds
/// elapsed since the Unix epoch. Any salt, including the empty one, is accepted.
pub fn derive_seed(salt: &str) -> u128 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    derive_seed_at(salt, millis)
}

/// Same as [`derive_seed`] with the time supplied by the caller.
///
/// # Examples
///
/// ```
/// use encap_rsa::seed::derive_seed_at;
///
/// assert_eq!(derive_seed_at("ab", 1_000), 97 + 98 + 1_000);
/// assert_eq!(derive_seed_at("", 5), 5);
/// ```
pub fn derive_seed_at(salt: &str, millis: u128) -> u128 {
    let numeric_salt: u128 = salt.chars().map(|c| u128::from(u32::from(c))).sum();
    numeric_salt.wrapping_add(millis)
}

/// Builds a ChaCha20 generator from a derived seed.
///
/// The seed is stretched to 32 bytes with SHA-256, so nearby seeds give unrelated streams.
pub fn rng_from_seed(seed: u128) -> ChaCha20Rng {
    let hash = Sha256::digest(seed.to_le_bytes());

    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ChaCha20Rng::from_seed(bytes)
}

/// Fresh generator for one key generation or encapsulation call.
pub fn seeded_rng(salt: &str) -> ChaCha20Rng {
    let seed = derive_seed(salt);
    debug!("seeding generator from a salt of {} chars", salt.chars().count());
    rng_from_seed(seed)
}
