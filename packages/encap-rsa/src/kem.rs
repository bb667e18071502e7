use crate::codec;
use crate::errors::{Error, Result};
use crate::key::{Decapsulate, Encapsulate};
use crate::params::KemParams;
use crate::rsa::{self, RsaPrivateKey, RsaPublicKey};
use crate::seed;

use log::debug;
use num_traits::Zero;
use rand::Rng;

/// Generates Base64 encoded public and private keys.
///
/// The generator is seeded from `salt` and the current time.
///
/// # Examples
///
/// ```
/// let (public_key, private_key) = encap_rsa::generate_keys(6, "secure_salt").unwrap();
/// let (ciphertext, secret) = encap_rsa::encapsulate(&public_key, "secure_salt").unwrap();
/// assert_eq!(encap_rsa::decapsulate(&ciphertext, &private_key, "secure_salt").unwrap(), secret);
/// ```
pub fn generate_keys(digits: u32, salt: &str) -> Result<(String, String)> {
    generate_keys_with_params(digits, salt, &KemParams::default())
}

pub fn generate_keys_with_params(digits: u32, salt: &str, params: &KemParams) -> Result<(String, String)> {
    generate_keys_with_rng(digits, &mut seed::seeded_rng(salt), params)
}

/// Same as [`generate_keys`] with a caller-supplied generator.
pub fn generate_keys_with_rng<R: Rng + ?Sized>(
    digits: u32,
    rng: &mut R,
    params: &KemParams,
) -> Result<(String, String)> {
    debug!("generating keys from two {}-digit primes", digits);
    let (public_key, private_key) = rsa::generate_keys(digits, rng, params)?;
    Ok((public_key.encode(), private_key.encode()))
}

/// Encapsulates a fresh random secret under an encoded public key.
///
/// Returns the encoded ciphertext and the encoded secret.
///
/// # Errors
///
/// * [`Error::InvalidPublicKey`] if `public_key` does not decode.
/// * [`Error::Encapsulation`] if the modulus is not greater than 1.
pub fn encapsulate(public_key: &str, salt: &str) -> Result<(String, String)> {
    encapsulate_with_rng(public_key, &mut seed::seeded_rng(salt))
}

/// Same as [`encapsulate`] with a caller-supplied generator.
pub fn encapsulate_with_rng<R: Rng + ?Sized>(public_key: &str, rng: &mut R) -> Result<(String, String)> {
    let public_key = RsaPublicKey::decode(public_key).map_err(|e| Error::InvalidPublicKey(Box::new(e)))?;
    let (ciphertext, secret) = public_key.encapsulate(rng)?;
    debug!("encapsulated a secret under a {}-bit modulus", public_key.n().bits());
    Ok((codec::encode_integer(&ciphertext), codec::encode_integer(&secret)))
}

/// Recovers the encoded secret from an encoded ciphertext and private key.
///
/// `salt` is accepted for symmetry with [`encapsulate`] and does not influence the result.
///
/// # Errors
///
/// * [`Error::InvalidCiphertext`] if `ciphertext` does not decode.
/// * [`Error::InvalidPrivateKey`] if `private_key` does not decode or has a zero modulus.
pub fn decapsulate(ciphertext: &str, private_key: &str, _salt: &str) -> Result<String> {
    let ciphertext = codec::decode_integer(ciphertext).map_err(|e| Error::InvalidCiphertext(Box::new(e)))?;
    let private_key = RsaPrivateKey::decode(private_key).map_err(|e| Error::InvalidPrivateKey(Box::new(e)))?;
    if private_key.n().is_zero() {
        return Err(Error::InvalidPrivateKey(Box::new(Error::malformed("modulus is zero"))));
    }

    Ok(codec::encode_integer(&private_key.decapsulate(&ciphertext)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prime;
    use num_bigint::BigUint;
    use num_integer::Integer;
    use num_traits::One;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test_log::test]
    fn test_scenario_four_digits() {
        let (public_key, private_key) = generate_keys(4, "secure_salt").unwrap();
        let (e, n) = codec::decode_pair(&public_key).unwrap();
        let (d, n2) = codec::decode_pair(&private_key).unwrap();
        assert_eq!(n, n2);

        let factor = (2u32..10_000).map(BigUint::from).find(|f| n.is_multiple_of(f) && f < &n);
        let p = factor.expect("modulus has a 4-digit factor");
        let q = &n / &p;
        assert_ne!(p, q);
        for f in [&p, &q] {
            assert_eq!(f.to_string().len(), 4);
            assert!(prime::is_probably_prime(f));
        }
        let phi = (&p - BigUint::one()) * (&q - BigUint::one());
        assert!((&e * &d).mod_floor(&phi).is_one());

        let (ciphertext, secret) = encapsulate(&public_key, "secure_salt").unwrap();
        let k = codec::decode_integer(&secret).unwrap();
        assert!(k >= BigUint::one() && k < n);

        assert_eq!(decapsulate(&ciphertext, &private_key, "secure_salt").unwrap(), secret);
    }

    #[test]
    fn test_thousand_encapsulations() {
        let params = KemParams::default();
        let mut rng = ChaCha20Rng::seed_from_u64(2024);
        let (public_key, private_key) = generate_keys_with_rng(5, &mut rng, &params).unwrap();

        for trial in 0..1_000u64 {
            let mut rng = ChaCha20Rng::seed_from_u64(trial);
            let (ciphertext, secret) = encapsulate_with_rng(&public_key, &mut rng).unwrap();
            assert_eq!(decapsulate(&ciphertext, &private_key, "any salt").unwrap(), secret, "trial {}", trial);
        }
    }

    #[test]
    fn test_different_seeds_give_different_moduli() {
        let params = KemParams::default();
        let (first, _) = generate_keys_with_rng(10, &mut ChaCha20Rng::seed_from_u64(1), &params).unwrap();
        let (second, _) = generate_keys_with_rng(10, &mut ChaCha20Rng::seed_from_u64(2), &params).unwrap();
        assert_ne!(codec::decode_pair(&first).unwrap().1, codec::decode_pair(&second).unwrap().1);
    }

    #[test]
    fn test_same_seed_gives_same_keys() {
        let params = KemParams::default();
        let first = generate_keys_with_rng(8, &mut seed::rng_from_seed(99), &params).unwrap();
        let second = generate_keys_with_rng(8, &mut seed::rng_from_seed(99), &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_keys_with_zero_digits() {
        assert!(matches!(generate_keys(0, "salt"), Err(Error::KeyGeneration(_))));
    }

    #[test]
    fn test_encapsulate_with_malformed_public_key() {
        let result = encapsulate("not-valid-base64!!", "salt");
        match result {
            Err(err @ Error::InvalidPublicKey(_)) => {
                assert!(matches!(err.root_cause(), Error::MalformedEncoding(_)))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_encapsulate_with_degenerate_modulus() {
        let public_key = codec::encode_pair(&BigUint::from(3u32), &BigUint::one());
        assert!(matches!(encapsulate(&public_key, "salt"), Err(Error::Encapsulation(_))));
    }

    #[test]
    fn test_decapsulate_with_malformed_inputs() {
        let (public_key, private_key) = generate_keys(4, "salt").unwrap();
        let (ciphertext, _) = encapsulate(&public_key, "salt").unwrap();

        assert!(matches!(decapsulate("%%%", &private_key, "salt"), Err(Error::InvalidCiphertext(_))));
        assert!(matches!(decapsulate(&ciphertext, "%%%", "salt"), Err(Error::InvalidPrivateKey(_))));

        let zero_modulus = codec::encode_pair(&BigUint::from(3u32), &BigUint::zero());
        assert!(matches!(decapsulate(&ciphertext, &zero_modulus, "salt"), Err(Error::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_decapsulate_ignores_salt() {
        let (public_key, private_key) = generate_keys(6, "alpha").unwrap();
        let (ciphertext, secret) = encapsulate(&public_key, "beta").unwrap();
        assert_eq!(decapsulate(&ciphertext, &private_key, "gamma").unwrap(), secret);
        assert_eq!(decapsulate(&ciphertext, &private_key, "").unwrap(), secret);
    }
}
