use thiserror::Error;

/// Result type for key generation, encapsulation and decapsulation.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for key generation, encapsulation and decapsulation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("gave up on {what} after {attempts} attempts")]
    RetryExhausted { what: &'static str, attempts: u64 },
    #[error("could not encode value: {0}")]
    Encoding(String),
    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),
    #[error("could not generate private/public keys: {0}")]
    KeyGeneration(String),
    #[error("could not encapsulate: {0}")]
    Encapsulation(String),
    #[error("invalid public key: {0}")]
    InvalidPublicKey(#[source] Box<Error>),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(#[source] Box<Error>),
    #[error("invalid ciphertext: {0}")]
    InvalidCiphertext(#[source] Box<Error>),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedEncoding(reason.into())
    }

    /// Returns the innermost error, skipping the credential wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::InvalidPublicKey(inner)
            | Error::InvalidPrivateKey(inner)
            | Error::InvalidCiphertext(inner) => inner.root_cause(),
            other => other,
        }
    }
}
