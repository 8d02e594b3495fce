//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the host application must implement.

use crate::domain::{
    ForwardRendezvousRequest, ForwardRendezvousResponse, Info, ManagedEndpointMessage,
    NatDetectionRequest, NatDetectionResponse, ProxyConnectRequest, ProxyConnectResponse,
    RendezvousAcknowledgement, RendezvousRequest, TransportCondition,
};

/// Application handlers, one per message type.
///
/// Every method is required, so a missing handler is a compile error rather
/// than a message silently falling on the floor.
///
/// Request-style methods return the reply to send; `None` suppresses it.
/// Notification-style methods never reply.
///
/// # Thread Safety
///
/// Called synchronously from whatever thread delivered the buffer.
/// Implementations must be `Send + Sync`.
pub trait TransportMessageHandlers: Send + Sync {
    /// Managed endpoint registration / keep-alive. Replies in kind.
    fn on_managed_endpoint(
        &self,
        info: &Info,
        request: &ManagedEndpointMessage,
    ) -> Option<ManagedEndpointMessage>;

    /// A peer asks us to probe its NAT.
    fn on_nat_detection_request(
        &self,
        info: &Info,
        request: &NatDetectionRequest,
    ) -> Option<NatDetectionResponse>;

    /// Result of a NAT probe we asked for.
    fn on_nat_detection_response(&self, info: &Info, response: &NatDetectionResponse);

    /// A peer asks us to connect to an endpoint on its behalf.
    fn on_proxy_connect_request(
        &self,
        info: &Info,
        request: &ProxyConnectRequest,
    ) -> Option<ProxyConnectResponse>;

    /// Outcome of a proxy connect we asked for.
    fn on_proxy_connect_response(&self, info: &Info, response: &ProxyConnectResponse);

    /// We are the rendezvous server for this exchange.
    fn on_forward_rendezvous_request(
        &self,
        info: &Info,
        request: &ForwardRendezvousRequest,
    ) -> Option<ForwardRendezvousResponse>;

    /// The rendezvous server answered.
    fn on_forward_rendezvous_response(&self, info: &Info, response: &ForwardRendezvousResponse);

    /// A rendezvous server tells us to punch towards an originator.
    fn on_rendezvous_request(&self, info: &Info, request: &RendezvousRequest);

    /// The receiver confirmed the rendezvous.
    fn on_rendezvous_acknowledgement(&self, info: &Info, ack: &RendezvousAcknowledgement);
}

/// Cryptographic provider.
///
/// Optional: without one, only plaintext unsigned envelopes can be sent or
/// received.
///
/// # Security
///
/// Implementations hold key material. They must never panic on malformed
/// ciphertext or signatures; return an error instead.
pub trait Securifier: Send + Sync {
    /// Sign `data` with the local identity key.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SecurifierError>;

    /// Sign `data` bound to the provider's configured parameters.
    fn sign_with_parameters(&self, data: &[u8]) -> Result<Vec<u8>, SecurifierError>;

    /// Encrypt to the configured peer.
    fn asymmetric_encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, SecurifierError>;

    /// Decrypt with the local key.
    fn asymmetric_decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, SecurifierError>;

    /// Check a signature over `data` from the configured peer.
    fn validate(&self, data: &[u8], signature: &[u8]) -> bool;
}

/// Errors from a [`Securifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurifierError {
    /// Signing failed or no signing key is available
    SigningFailed(String),
    /// Encryption failed or no recipient key is available
    EncryptionFailed(String),
    /// Ciphertext was not addressed to us or was tampered with
    DecryptionFailed(String),
}

impl std::fmt::Display for SecurifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurifierError::SigningFailed(reason) => write!(f, "signing failed: {reason}"),
            SecurifierError::EncryptionFailed(reason) => write!(f, "encryption failed: {reason}"),
            SecurifierError::DecryptionFailed(reason) => write!(f, "decryption failed: {reason}"),
        }
    }
}

impl std::error::Error for SecurifierError {}

/// Receives transport conditions forwarded by `on_error`.
pub trait ErrorSink: Send + Sync {
    /// Handle one condition.
    fn on_error(&self, condition: TransportCondition);
}

impl<F> ErrorSink for F
where
    F: Fn(TransportCondition) + Send + Sync,
{
    fn on_error(&self, condition: TransportCondition) {
        self(condition);
    }
}
