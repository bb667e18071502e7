use crate::errors::Result;

use num_bigint::BigUint;
use rand::Rng;

/// Generic trait for encapsulation with a public key.
pub trait Encapsulate {
    /// Draws a fresh shared secret and returns `(ciphertext, secret)`.
    fn encapsulate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(BigUint, BigUint)>;
}

/// Generic trait for decapsulation with a private key.
pub trait Decapsulate {
    /// Recovers the shared secret from a ciphertext.
    fn decapsulate(&self, ciphertext: &BigUint) -> BigUint;
}
