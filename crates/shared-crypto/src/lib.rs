//! # Shared Crypto - Envelope Protection Primitives
//!
//! Concrete primitives behind the transport envelope protection layer.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Envelope signing (plain and parameterized) |
//! | `symmetric` | XChaCha20-Poly1305 | AEAD body of a sealed box |
//! | `sealed` | X25519 + XChaCha20-Poly1305 | Asymmetric (anonymous sender) encryption |
//! | `hashing` | BLAKE3 | Key derivation, domain separation |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **Sealed boxes**: Fresh ephemeral X25519 key per message, key bound to
//!   both public keys, non-contributory shared secrets rejected
//! - **XChaCha20**: 192-bit random nonce, constant-time ARX design
//!
//! All key types are immutable after construction and `Send + Sync`, so a
//! single key pair may be shared across threads without locking.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod sealed;
pub mod signatures;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use hashing::blake3_derive_key;
pub use sealed::{seal, ExchangeKeyPair, ExchangePublicKey};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use symmetric::SecretKey;
