//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
///
/// Messages never include key material or plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed (wrong key, tampered or truncated input)
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Sealed box shorter than its fixed overhead
    #[error("Sealed box too short: need at least {minimum} bytes, got {actual}")]
    SealedBoxTooShort {
        /// Minimum length in bytes
        minimum: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Signature bytes have the wrong length
    #[error("Invalid signature format: expected 64 bytes, got {0}")]
    InvalidSignatureFormat(usize),

    /// Invalid or low-order public key
    #[error("Invalid public key")]
    InvalidPublicKey,
}
