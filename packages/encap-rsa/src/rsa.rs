use crate::codec;
use crate::errors::{Error, Result};
use crate::key::{Decapsulate, Encapsulate};
use crate::number;
use crate::params::KemParams;
use crate::prime;

use log::{debug, trace};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand::Rng;

/// Represents the public key `(e, n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    e: BigUint,
    n: BigUint,
}

/// Represents the private key `(d, n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    d: BigUint,
    n: BigUint,
}

impl RsaPublicKey {
    pub fn new(e: BigUint, n: BigUint) -> Self {
        Self { e, n }
    }

    pub fn e(&self) -> &BigUint {
        &self.e
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Transport form, `base64("{e}:{n}")`.
    pub fn encode(&self) -> String {
        codec::encode_pair(&self.e, &self.n)
    }

    pub fn decode(encoded: &str) -> Result<Self> {
        let (e, n) = codec::decode_pair(encoded)?;
        Ok(Self { e, n })
    }
}

impl RsaPrivateKey {
    pub fn new(d: BigUint, n: BigUint) -> Self {
        Self { d, n }
    }

    pub fn d(&self) -> &BigUint {
        &self.d
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Transport form, `base64("{d}:{n}")`.
    pub fn encode(&self) -> String {
        codec::encode_pair(&self.d, &self.n)
    }

    pub fn decode(encoded: &str) -> Result<Self> {
        let (d, n) = codec::decode_pair(encoded)?;
        Ok(Self { d, n })
    }
}

impl Encapsulate for RsaPublicKey {
    /// Draws `K` uniformly from `[1, n-1]` and returns `(K^e mod n, K)`.
    ///
    /// No padding is applied: this is textbook RSA on a random integer.
    fn encapsulate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(BigUint, BigUint)> {
        if self.n <= BigUint::one() {
            return Err(Error::Encapsulation(format!("modulus must be greater than 1, got {}", self.n)));
        }

        let secret = number::random_in_range(rng, &BigUint::one(), &(&self.n - BigUint::one()))?;
        let ciphertext = secret.modpow(&self.e, &self.n);
        Ok((ciphertext, secret))
    }
}

impl Decapsulate for RsaPrivateKey {
    /// Returns `c^d mod n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    fn decapsulate(&self, ciphertext: &BigUint) -> BigUint {
        ciphertext.modpow(&self.d, &self.n)
    }
}

/// Generates public and private keys from two random `digits`-digit primes.
///
/// # Arguments
///
/// * `digits` - Decimal digits of each prime factor of the modulus.
/// * `rng` - Source for the primes and the public exponent, used in that order.
/// * `params` - Attempt budgets and Miller-Rabin rounds.
///
/// # Errors
///
/// [`Error::KeyGeneration`] when a prime cannot be found, when `φ(n) < 3` leaves no
/// public exponent to choose, or when no exponent coprime to `φ(n)` is found.
pub fn generate_keys<R: Rng + ?Sized>(
    digits: u32,
    rng: &mut R,
    params: &KemParams,
) -> Result<(RsaPublicKey, RsaPrivateKey)> {
    let (p, q) = generate_primes(digits, rng, params).map_err(|e| Error::KeyGeneration(e.to_string()))?;

    let n = &p * &q;
    let phi = (&p - BigUint::one()) * (&q - BigUint::one());
    debug!("modulus has {} bits", n.bits());

    let e = choose_public_exponent(&phi, rng, params)?;
    let d = number::mod_inverse(&e, &phi)
        .ok_or_else(|| Error::KeyGeneration(format!("{} has no inverse modulo {}", e, phi)))?;

    Ok((RsaPublicKey { e, n: n.clone() }, RsaPrivateKey { d, n }))
}

/// Generates distinct primes `p` and `q`.
fn generate_primes<R: Rng + ?Sized>(digits: u32, rng: &mut R, params: &KemParams) -> Result<(BigUint, BigUint)> {
    let p = prime::generate_prime(digits, rng, params)?;

    for _ in 0..params.max_prime_attempts {
        let q = prime::generate_prime(digits, rng, params)?;
        if q != p {
            return Ok((p, q));
        }
        trace!("q collided with p, drawing again");
    }

    Err(Error::RetryExhausted { what: "distinct prime generation", attempts: params.max_prime_attempts })
}

/// Draws `e` uniformly from `[2, φ-1]` until `gcd(e, φ) = 1`.
fn choose_public_exponent<R: Rng + ?Sized>(phi: &BigUint, rng: &mut R, params: &KemParams) -> Result<BigUint> {
    let low = BigUint::from(2u32);
    if phi < &BigUint::from(3u32) {
        return Err(Error::KeyGeneration(format!("degenerate modulus, totient {} leaves no exponent", phi)));
    }
    let high = phi - BigUint::one();

    for attempt in 1..=params.max_exponent_attempts {
        let e = number::random_in_range(rng, &low, &high)?;
        if e.gcd(phi).is_one() {
            trace!("public exponent found after {} candidates", attempt);
            return Ok(e);
        }
    }

    Err(Error::KeyGeneration(format!(
        "no exponent coprime to {} after {} candidates",
        phi, params.max_exponent_attempts
    )))
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn digit_count(x: &BigUint) -> usize {
        x.to_string().len()
    }

    #[test]
    fn test_degenerate_totient() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let result = choose_public_exponent(&BigUint::from(2u32), &mut rng, &KemParams::default());
        assert!(matches!(result, Err(Error::KeyGeneration(_))));
    }

    #[test]
    fn test_smallest_totient_with_an_exponent() {
        // p, q = 2, 5
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let e = choose_public_exponent(&BigUint::from(4u32), &mut rng, &KemParams::default()).unwrap();
        assert_eq!(e, BigUint::from(3u32));
    }

    #[test]
    fn test_prime_failure_is_a_key_generation_error() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let params = KemParams { max_prime_attempts: 0, ..KemParams::default() };
        assert!(matches!(generate_keys(6, &mut rng, &params), Err(Error::KeyGeneration(_))));
    }

    #[test]
    fn test_exponent_budget_is_a_key_generation_error() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let params = KemParams { max_exponent_attempts: 0, ..KemParams::default() };
        assert!(matches!(generate_keys(6, &mut rng, &params), Err(Error::KeyGeneration(_))));
    }

    #[test]
    fn test_one_digit_keys_are_valid_or_degenerate() {
        for seed in 0..100u64 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            match generate_keys(1, &mut rng, &KemParams::default()) {
                Ok((public_key, private_key)) => {
                    assert_eq!(public_key.n(), private_key.n());
                    assert!(public_key.n() >= &BigUint::from(10u32));
                }
                Err(Error::KeyGeneration(_)) => {}
                Err(other) => panic!("unexpected error: {}", other),
            }
        }
    }

    #[test]
    fn test_same_rng_same_keys() {
        let params = KemParams::default();
        let first = generate_keys(8, &mut ChaCha20Rng::seed_from_u64(77), &params).unwrap();
        let second = generate_keys(8, &mut ChaCha20Rng::seed_from_u64(77), &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encapsulate_rejects_small_modulus() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for n in [0u32, 1] {
            let public_key = RsaPublicKey::new(BigUint::from(3u32), BigUint::from(n));
            assert!(matches!(public_key.encapsulate(&mut rng), Err(Error::Encapsulation(_))));
        }
    }

    #[test]
    fn test_textbook_example() {
        // p = 61, q = 53, e = 17, d = 2753
        let public_key = RsaPublicKey::new(BigUint::from(17u32), BigUint::from(3233u32));
        let private_key = RsaPrivateKey::new(BigUint::from(2753u32), BigUint::from(3233u32));
        let c = BigUint::from(65u32).modpow(public_key.e(), public_key.n());
        assert_eq!(c, BigUint::from(2790u32));
        assert_eq!(private_key.decapsulate(&c), BigUint::from(65u32));
    }

    #[test]
    fn test_key_encoding_round_trip() {
        let public_key = RsaPublicKey::new(BigUint::from(17u32), BigUint::from(3233u32));
        assert_eq!(public_key.encode(), "MTc6MzIzMw==");
        assert_eq!(RsaPublicKey::decode(&public_key.encode()), Ok(public_key));

        let private_key = RsaPrivateKey::new(BigUint::from(2753u32), BigUint::from(3233u32));
        assert_eq!(RsaPrivateKey::decode(&private_key.encode()), Ok(private_key));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_key_validity(digits in 2u32..24, seed in any::<u64>()) {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let (p, q) = generate_primes(digits, &mut rng, &KemParams::default()).unwrap();
            prop_assert_ne!(&p, &q);
            prop_assert_eq!(digit_count(&p), digits as usize);
            prop_assert_eq!(digit_count(&q), digits as usize);

            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let (public_key, private_key) = generate_keys(digits, &mut rng, &KemParams::default()).unwrap();
            let phi = (&p - BigUint::one()) * (&q - BigUint::one());

            prop_assert_eq!(public_key.n(), &(&p * &q));
            prop_assert_eq!(public_key.n(), private_key.n());
            prop_assert!(public_key.e() >= &BigUint::from(2u32) && public_key.e() < &phi);
            prop_assert!((public_key.e() * private_key.d()).mod_floor(&phi).is_one());
        }

        #[test]
        fn test_encapsulate_decapsulate(seed in any::<u64>()) {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let (public_key, private_key) = generate_keys(6, &mut rng, &KemParams::default()).unwrap();

            let (ciphertext, secret) = public_key.encapsulate(&mut rng).unwrap();
            prop_assert!(secret >= BigUint::one() && &secret < public_key.n());
            prop_assert_eq!(private_key.decapsulate(&ciphertext), secret);
        }
    }
}
