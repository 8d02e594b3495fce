//! # Key-Pair Securifier
//!
//! Production [`Securifier`] over `shared-crypto`:
//!
//! | Operation | Primitive |
//! |-----------|-----------|
//! | `sign` | Ed25519 |
//! | `sign_with_parameters` | Ed25519 over `derive_key(parameters) \|\| data` |
//! | `asymmetric_encrypt` | X25519 sealed box to the peer |
//! | `asymmetric_decrypt` | X25519 sealed box with the local key |
//! | `validate` | Ed25519 from the peer, plain or parameterized |
//!
//! Keys are fixed at construction, so one instance can serve every thread.

use shared_crypto::{
    seal, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, ExchangeKeyPair, ExchangePublicKey,
};

use crate::ports::{Securifier, SecurifierError};

/// Public keys of the remote side of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerKeys {
    /// Ed25519 key whose signatures `validate` accepts.
    pub identity: Ed25519PublicKey,
    /// X25519 key outbound envelopes are sealed to.
    pub exchange: ExchangePublicKey,
}

/// Ed25519 identity plus X25519 exchange key, bound to one peer.
#[derive(Debug)]
pub struct KeyPairSecurifier {
    identity: Ed25519KeyPair,
    exchange: ExchangeKeyPair,
    peer: PeerKeys,
    parameters: Vec<u8>,
}

impl KeyPairSecurifier {
    /// Fresh random keys. The peer defaults to ourselves (loopback) until
    /// [`Self::with_peer`] is called.
    pub fn generate() -> Self {
        Self::new(Ed25519KeyPair::generate(), ExchangeKeyPair::generate())
    }

    /// Use existing key pairs, with the peer set to our own public keys.
    pub fn new(identity: Ed25519KeyPair, exchange: ExchangeKeyPair) -> Self {
        let peer = PeerKeys {
            identity: identity.public_key(),
            exchange: exchange.public_key(),
        };
        Self {
            identity,
            exchange,
            peer,
            parameters: Vec::new(),
        }
    }

    /// Bind to a remote peer.
    #[must_use]
    pub fn with_peer(mut self, peer: PeerKeys) -> Self {
        self.peer = peer;
        self
    }

    /// Parameters mixed into `sign_with_parameters`.
    #[must_use]
    pub fn with_parameters(mut self, parameters: impl Into<Vec<u8>>) -> Self {
        self.parameters = parameters.into();
        self
    }

    /// Our public keys, to hand to the peer.
    pub fn local_keys(&self) -> PeerKeys {
        PeerKeys {
            identity: self.identity.public_key(),
            exchange: self.exchange.public_key(),
        }
    }

    /// Keys of the bound peer.
    pub fn peer_keys(&self) -> PeerKeys {
        self.peer
    }
}

impl Securifier for KeyPairSecurifier {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SecurifierError> {
        Ok(self.identity.sign(data).to_vec())
    }

    fn sign_with_parameters(&self, data: &[u8]) -> Result<Vec<u8>, SecurifierError> {
        Ok(self
            .identity
            .sign_with_parameters(&self.parameters, data)
            .to_vec())
    }

    fn asymmetric_encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, SecurifierError> {
        seal(&self.peer.exchange, plaintext)
            .map_err(|e| SecurifierError::EncryptionFailed(e.to_string()))
    }

    fn asymmetric_decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, SecurifierError> {
        self.exchange
            .open(ciphertext)
            .map_err(|e| SecurifierError::DecryptionFailed(e.to_string()))
    }

    fn validate(&self, data: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Ed25519Signature::from_slice(signature) else {
            return false;
        };

        self.peer.identity.verify(data, &signature).is_ok()
            || self
                .peer
                .identity
                .verify_with_parameters(&self.parameters, data, &signature)
                .is_ok()
    }
}
