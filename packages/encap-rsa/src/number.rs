use crate::errors::{Error, Result};

use num_bigint::{BigInt, BigUint, RandBigInt, ToBigInt};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::Rng;

/// Calculates the values needed to represent `n` as the product of a power of 2 and an odd number.
///
/// # Examples
///
/// ```
/// use num_bigint::BigUint;
/// use encap_rsa::number;
///
/// assert_eq!(number::as_power_of_two_and_odd(&BigUint::from(256usize)), (8, BigUint::from(1usize)));
/// assert_eq!(number::as_power_of_two_and_odd(&BigUint::from(137usize)), (0, BigUint::from(137usize)));
/// assert_eq!(number::as_power_of_two_and_odd(&BigUint::from(1_1776usize)), (9, BigUint::from(23usize)));
/// ```
pub fn as_power_of_two_and_odd(n: &BigUint) -> (u64, BigUint) {
    if n.is_zero() {
        (0, BigUint::zero())
    } else if n.is_odd() {
        (0, n.clone())
    } else if is_power_of_two(n) {
        (n.bits() - 1, BigUint::one())
    } else {
        let pw = n.trailing_zeros().unwrap_or(0);
        (pw, n >> pw)
    }
}

fn is_power_of_two(n: &BigUint) -> bool {
    (!n.is_zero()) && (n & (n - BigUint::one())).is_zero()
}

/// Calculates integers `x` and `y` such that `ax + by = d`, where `d = gcd(a, b)`.
///
/// # Reference
///
/// See algorithm 2.107 in "Handbook of Applied Cryptography" by Alfred J. Menezes et al.
///
/// # Examples
///
/// ```
/// use num_bigint::{BigUint, BigInt};
/// use encap_rsa::number;
///
/// let a = BigUint::from(73usize);
/// let b = BigUint::from(56usize);
/// let x = BigInt::from(-23isize);
/// let y = BigInt::from(30isize);
///
/// assert_eq!(number::extended_euclidean_algorithm(&a, &b), (x, y));
/// ```
pub fn extended_euclidean_algorithm(a: &BigUint, b: &BigUint) -> (BigInt, BigInt) {
    if b.is_zero() {
        return (BigInt::one(), BigInt::zero());
    }

    let mut a = BigInt::from(a.clone());
    let mut b = BigInt::from(b.clone());

    let (mut x1, mut x2) = (BigInt::zero(), BigInt::one());
    let (mut y1, mut y2) = (BigInt::one(), BigInt::zero());

    while b.is_positive() {
        let (q, r) = a.div_mod_floor(&b);
        let x = &x2 - &q * &x1;
        let y = &y2 - &q * &y1;

        a = b;
        b = r;
        x2 = x1;
        x1 = x;
        y2 = y1;
        y1 = y;
    }

    (x2, y2)
}

/// Multiplicative inverse of `a` modulo `m`: the unique `x` in `[0, m)` with `ax ≡ 1 (mod m)`.
///
/// Returns `None` when `m` is zero or `gcd(a, m) != 1`.
///
/// # Reference
///
/// See algorithm 2.142 in "Handbook of Applied Cryptography" by Alfred J. Menezes et al.
///
/// # Examples
///
/// ```
/// use num_bigint::BigUint;
/// use encap_rsa::number;
///
/// let a = BigUint::from(256usize);
/// let m = BigUint::from(4211usize);
///
/// assert_eq!(number::mod_inverse(&a, &m), Some(BigUint::from(1135usize)));
/// assert_eq!(number::mod_inverse(&BigUint::from(6usize), &BigUint::from(9usize)), None);
/// ```
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }

    let a = a.mod_floor(m);
    // A solution exists if and only if gcd(a, m) = 1, and it is then unique.
    if !a.gcd(m).is_one() {
        return None;
    }

    let (x, _) = extended_euclidean_algorithm(&a, m);
    x.mod_floor(&m.to_bigint()?).to_biguint()
}

/// Draws an integer uniformly from the inclusive range `[low, high]`.
///
/// Fails with [`Error::InvalidArgument`] when `low > high`.
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, low: &BigUint, high: &BigUint) -> Result<BigUint> {
    if low > high {
        return Err(Error::InvalidArgument(format!("empty range [{}, {}]", low, high)));
    }

    Ok(rng.gen_biguint_range(low, &(high + BigUint::one())))
}
