//! # Ed25519 Signatures
//!
//! Envelope signatures with deterministic nonces.
//!
//! Two modes share one identity key:
//!
//! - **Plain**: signature over the message.
//! - **Parameterized**: signature over `tag || message`, where `tag` is a
//!   BLAKE3 key derived from caller-supplied parameters. A parameterized
//!   signature never verifies as a plain one and vice versa.

use std::fmt;

use crate::hashing::blake3_derive_key;
use crate::CryptoError;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LEN: usize = 64;

const PARAMETERS_CONTEXT: &str = "quantum-transport 2026-10 parameterized envelope signature";

/// Ed25519 public key (32 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519PublicKey([u8; 32]);

impl Ed25519PublicKey {
    /// Create from bytes, rejecting encodings that are not curve points.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify a plain signature.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<(), CryptoError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }

    /// Verify a parameterized signature made with the same `parameters`.
    pub fn verify_with_parameters(
        &self,
        parameters: &[u8],
        message: &[u8],
        signature: &Ed25519Signature,
    ) -> Result<(), CryptoError> {
        self.verify(&parameterized_message(parameters, message), signature)
    }
}

/// Ed25519 signature (64 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519Signature([u8; SIGNATURE_LEN]);

impl Ed25519Signature {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from an untrusted slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; SIGNATURE_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureFormat(bytes.len()))?;
        Ok(Self(array))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// Copy into an owned buffer (wire form).
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// Ed25519 identity keypair.
///
/// `SigningKey` zeroizes itself on drop.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
}

impl Ed25519KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut rand::rngs::OsRng);
        Self { signing_key }
    }

    /// Create from secret seed (32 bytes).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        Self { signing_key }
    }

    /// Get public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Plain signature over `message`.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(message).to_bytes())
    }

    /// Parameterized signature over `message`.
    pub fn sign_with_parameters(&self, parameters: &[u8], message: &[u8]) -> Ed25519Signature {
        self.sign(&parameterized_message(parameters, message))
    }
}

impl fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

fn parameterized_message(parameters: &[u8], message: &[u8]) -> Vec<u8> {
    let tag = blake3_derive_key(PARAMETERS_CONTEXT, parameters);
    let mut input = Vec::with_capacity(tag.len() + message.len());
    input.extend_from_slice(&tag);
    input.extend_from_slice(message);
    input
}
