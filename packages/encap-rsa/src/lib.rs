//! # RSA key encapsulation
//!
//! `encap_rsa` generates an RSA key pair from two random primes with a given number
//! of decimal digits, encapsulates a random shared secret under the public key and
//! recovers it with the private key. Keys, ciphertexts and secrets travel as Base64
//! encoded decimal text.
//!
//! No padding is applied. This is textbook RSA and is not meant to protect real data.

/// Transport encoding of integers and integer pairs.
pub mod codec;
/// Errors during key generation, encapsulation and decapsulation.
pub mod errors;
/// Text-level key generation, encapsulation and decapsulation.
pub mod kem;
/// Generic traits for operations on keys.
pub mod key;
/// Number theoric functions.
pub mod number;
/// Limits for sampling loops and primality testing.
pub mod params;
/// Prime generation and primality testing functions.
pub mod prime;
/// RSA key pair generation.
pub mod rsa;
/// Seed derivation from a salt and the wall clock.
pub mod seed;

pub use errors::{Error, Result};
pub use kem::{decapsulate, encapsulate, generate_keys};
pub use params::KemParams;
