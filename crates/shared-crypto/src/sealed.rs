//! # Sealed Boxes (X25519 + XChaCha20-Poly1305)
//!
//! Anonymous-sender public key encryption for whole envelopes.
//!
//! ```text
//! sealed = ephemeral_public (32) || nonce (24) || ciphertext || tag (16)
//! key    = BLAKE3-derive-key(SEAL_CONTEXT, shared_secret || ephemeral_public || recipient_public)
//! aad    = ephemeral_public
//! ```
//!
//! A fresh ephemeral key is generated per message, so two seals of the same
//! plaintext never share bytes.

use std::fmt;

use rand::rngs::OsRng;
use x25519_dalek::{EphemeralSecret, PublicKey, SharedSecret, StaticSecret};
use zeroize::Zeroize;

use crate::hashing::blake3_derive_key;
use crate::symmetric::{self, SecretKey, NONCE_LEN, TAG_LEN};
use crate::CryptoError;

/// X25519 public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Bytes a sealed box adds on top of its plaintext.
pub const SEAL_OVERHEAD: usize = PUBLIC_KEY_LEN + NONCE_LEN + TAG_LEN;

const SEAL_CONTEXT: &str = "quantum-transport 2026-10 sealed envelope key";

/// X25519 public key of a sealed-box recipient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExchangePublicKey([u8; PUBLIC_KEY_LEN]);

impl ExchangePublicKey {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }
}

/// Long-lived X25519 key pair able to open sealed boxes.
pub struct ExchangeKeyPair {
    secret: StaticSecret,
    public: ExchangePublicKey,
}

impl ExchangeKeyPair {
    /// Generate a random key pair.
    pub fn generate() -> Self {
        Self::from_secret(StaticSecret::random_from_rng(OsRng))
    }

    /// Restore from a 32-byte secret.
    pub fn from_bytes(mut bytes: [u8; 32]) -> Self {
        let secret = StaticSecret::from(bytes);
        bytes.zeroize();
        Self::from_secret(secret)
    }

    fn from_secret(secret: StaticSecret) -> Self {
        let public = ExchangePublicKey(PublicKey::from(&secret).to_bytes());
        Self { secret, public }
    }

    /// Public half, to hand to senders.
    pub fn public_key(&self) -> ExchangePublicKey {
        self.public
    }

    /// Open a sealed box addressed to this key pair.
    ///
    /// # Errors
    ///
    /// `SealedBoxTooShort` for inputs below [`SEAL_OVERHEAD`],
    /// `DecryptionFailed` for anything that does not authenticate.
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if sealed.len() < SEAL_OVERHEAD {
            return Err(CryptoError::SealedBoxTooShort {
                minimum: SEAL_OVERHEAD,
                actual: sealed.len(),
            });
        }
        let (ephemeral, body) = sealed.split_at(PUBLIC_KEY_LEN);
        let mut ephemeral_bytes = [0u8; PUBLIC_KEY_LEN];
        ephemeral_bytes.copy_from_slice(ephemeral);

        let shared = self.secret.diffie_hellman(&PublicKey::from(ephemeral_bytes));
        if !shared.was_contributory() {
            return Err(CryptoError::DecryptionFailed(
                "non-contributory ephemeral key".into(),
            ));
        }

        let key = derive_seal_key(&shared, &ephemeral_bytes, &self.public.0);
        symmetric::open(&key, body, &ephemeral_bytes)
    }
}

impl fmt::Debug for ExchangeKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeKeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// Seal `plaintext` so only the holder of `recipient`'s secret can open it.
///
/// # Errors
///
/// `InvalidPublicKey` if `recipient` is a low-order point.
pub fn seal(recipient: &ExchangePublicKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let ephemeral = EphemeralSecret::random_from_rng(OsRng);
    let ephemeral_public = PublicKey::from(&ephemeral).to_bytes();

    let shared = ephemeral.diffie_hellman(&PublicKey::from(recipient.0));
    if !shared.was_contributory() {
        return Err(CryptoError::InvalidPublicKey);
    }

    let key = derive_seal_key(&shared, &ephemeral_public, &recipient.0);
    let body = symmetric::seal(&key, plaintext, &ephemeral_public)?;

    let mut sealed = Vec::with_capacity(PUBLIC_KEY_LEN + body.len());
    sealed.extend_from_slice(&ephemeral_public);
    sealed.extend_from_slice(&body);
    Ok(sealed)
}

fn derive_seal_key(
    shared: &SharedSecret,
    ephemeral_public: &[u8; PUBLIC_KEY_LEN],
    recipient_public: &[u8; PUBLIC_KEY_LEN],
) -> SecretKey {
    let mut material = Vec::with_capacity(3 * PUBLIC_KEY_LEN);
    material.extend_from_slice(shared.as_bytes());
    material.extend_from_slice(ephemeral_public);
    material.extend_from_slice(recipient_public);

    let key = SecretKey::from_bytes(blake3_derive_key(SEAL_CONTEXT, &material));
    material.zeroize();
    key
}
