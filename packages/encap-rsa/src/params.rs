use serde::{Deserialize, Serialize};

/// Limits for the rejection-sampling loops and the primality test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KemParams {
    /// Candidates drawn per prime before giving up.
    pub max_prime_attempts: u64,
    /// Candidates drawn for the public exponent before giving up.
    pub max_exponent_attempts: u64,
    /// Miller-Rabin bases tried per candidate.
    pub miller_rabin_rounds: usize,
}

impl Default for KemParams {
    fn default() -> Self {
        Self { max_prime_attempts: 100_000, max_exponent_attempts: 100_000, miller_rabin_rounds: 30 }
    }
}

impl KemParams {
    pub fn new(max_prime_attempts: u64, max_exponent_attempts: u64, miller_rabin_rounds: usize) -> Self {
        Self { max_prime_attempts, max_exponent_attempts, miller_rabin_rounds }
    }
}
