//! Transport encoding of integers and integer pairs.
//!
//! Values are rendered as decimal text (`"{a}:{b}"` for pairs) and wrapped in
//! standard, padded Base64.

use crate::errors::{Error, Result};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use num_bigint::BigUint;
use num_traits::Num;

const SEPARATOR: char = ':';

fn encode_text(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

fn decode_text(encoded: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| Error::malformed(format!("not valid base64: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::malformed(format!("not valid utf-8: {}", e)))
}

fn parse_decimal(text: &str) -> Result<BigUint> {
    // from_str_radix also accepts a leading `+` and `_` separators
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed(format!("{:?} is not a decimal integer", text)));
    }
    BigUint::from_str_radix(text, 10).map_err(|e| Error::malformed(format!("{:?}: {}", text, e)))
}

/// Encodes two integers into a single Base64 string.
///
/// # Examples
///
/// ```
/// use num_bigint::BigUint;
/// use encap_rsa::codec;
///
/// let encoded = codec::encode_pair(&BigUint::from(17u32), &BigUint::from(3233u32));
/// assert_eq!(encoded, "MTc6MzIzMw==");
/// ```
pub fn encode_pair(a: &BigUint, b: &BigUint) -> String {
    encode_text(&format!("{}{}{}", a, SEPARATOR, b))
}

/// Decodes a string produced by [`encode_pair`] back into both integers.
///
/// The decoded text is split once, on the first `:`; both halves must be non-empty
/// decimal integers.
///
/// # Errors
///
/// [`Error::MalformedEncoding`] if the input is not Base64, not UTF-8, or not of the
/// form `"{integer}:{integer}"`.
pub fn decode_pair(encoded: &str) -> Result<(BigUint, BigUint)> {
    let text = decode_text(encoded)?;
    let (a, b) = text
        .split_once(SEPARATOR)
        .ok_or_else(|| Error::malformed(format!("missing {:?} separator", SEPARATOR)))?;

    Ok((parse_decimal(a)?, parse_decimal(b)?))
}

/// Encodes a single integer, as used for ciphertexts and shared secrets.
pub fn encode_integer(x: &BigUint) -> String {
    encode_text(&x.to_string())
}

/// Decodes a string produced by [`encode_integer`].
pub fn decode_integer(encoded: &str) -> Result<BigUint> {
    parse_decimal(&decode_text(encoded)?)
}
