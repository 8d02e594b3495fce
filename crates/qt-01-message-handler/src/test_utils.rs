//! Test utilities for the message handler.
//!
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use qt_01_message_handler::test_utils::{sample_info, RecordingHandlers};
//! use qt_01_message_handler::{MessageHandler, TransportMessageApi};
//!
//! let handlers = Arc::new(RecordingHandlers::new());
//! let handler = MessageHandler::new(handlers.clone());
//!
//! let dispatched = handler.on_message_received(b"garbage", &sample_info());
//! assert!(dispatched.is_inert());
//! assert!(handlers.calls().is_empty());
//! ```

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::adapters::KeyPairSecurifier;
use crate::domain::{
    ForwardRendezvousRequest, ForwardRendezvousResponse, Info, ManagedEndpointMessage, MessageType,
    NatDetectionRequest, NatDetectionResponse, NatType, ProxyConnectRequest, ProxyConnectResponse,
    RendezvousAcknowledgement, RendezvousRequest, TransportMessage,
};
use crate::ports::{Securifier, SecurifierError, TransportMessageHandlers};

/// Endpoint used by [`sample_info`].
pub const SAMPLE_ENDPOINT: &str = "203.0.113.7:5483";

/// Peer context pointing at [`SAMPLE_ENDPOINT`].
pub fn sample_info() -> Info {
    Info::new(sample_endpoint())
}

fn sample_endpoint() -> SocketAddr {
    SocketAddr::from(([203, 0, 113, 7], 5483))
}

/// Handlers that record every call and answer requests with fixed replies.
#[derive(Debug)]
pub struct RecordingHandlers {
    calls: Mutex<Vec<(MessageType, Info)>>,
    reply: AtomicBool,
}

impl Default for RecordingHandlers {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHandlers {
    /// Handlers that reply to every request.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: AtomicBool::new(true),
        }
    }

    /// Handlers that return `None` from every request.
    pub fn silent() -> Self {
        let handlers = Self::new();
        handlers.set_reply(false);
        handlers
    }

    /// Toggle replies.
    pub fn set_reply(&self, reply: bool) {
        self.reply.store(reply, Ordering::SeqCst);
    }

    /// Message types seen, in order.
    pub fn calls(&self) -> Vec<MessageType> {
        self.lock().iter().map(|(msg_type, _)| *msg_type).collect()
    }

    /// Peer contexts seen, in order.
    pub fn infos(&self) -> Vec<Info> {
        self.lock().iter().map(|(_, info)| *info).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(MessageType, Info)>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record<R>(&self, msg_type: MessageType, info: &Info, reply: R) -> Option<R> {
        self.lock().push((msg_type, *info));
        self.reply.load(Ordering::SeqCst).then_some(reply)
    }
}

impl TransportMessageHandlers for RecordingHandlers {
    fn on_managed_endpoint(
        &self,
        info: &Info,
        request: &ManagedEndpointMessage,
    ) -> Option<ManagedEndpointMessage> {
        let reply = ManagedEndpointMessage {
            result: Some(true),
            endpoint: Some(info.endpoint),
            identity: request.identity.clone(),
        };
        self.record(MessageType::ManagedEndpoint, info, reply)
    }

    fn on_nat_detection_request(
        &self,
        info: &Info,
        _request: &NatDetectionRequest,
    ) -> Option<NatDetectionResponse> {
        let reply = sample_nat_detection_response(info.endpoint);
        self.record(MessageType::NatDetectionRequest, info, reply)
    }

    fn on_nat_detection_response(&self, info: &Info, _response: &NatDetectionResponse) {
        self.record(MessageType::NatDetectionResponse, info, ());
    }

    fn on_proxy_connect_request(
        &self,
        info: &Info,
        _request: &ProxyConnectRequest,
    ) -> Option<ProxyConnectResponse> {
        self.record(
            MessageType::ProxyConnectRequest,
            info,
            ProxyConnectResponse { result: true },
        )
    }

    fn on_proxy_connect_response(&self, info: &Info, _response: &ProxyConnectResponse) {
        self.record(MessageType::ProxyConnectResponse, info, ());
    }

    fn on_forward_rendezvous_request(
        &self,
        info: &Info,
        request: &ForwardRendezvousRequest,
    ) -> Option<ForwardRendezvousResponse> {
        let reply = ForwardRendezvousResponse {
            receiver_rendezvous_endpoint: request.receiver_endpoint,
        };
        self.record(MessageType::ForwardRendezvousRequest, info, reply)
    }

    fn on_forward_rendezvous_response(&self, info: &Info, _response: &ForwardRendezvousResponse) {
        self.record(MessageType::ForwardRendezvousResponse, info, ());
    }

    fn on_rendezvous_request(&self, info: &Info, _request: &RendezvousRequest) {
        self.record(MessageType::RendezvousRequest, info, ());
    }

    fn on_rendezvous_acknowledgement(&self, info: &Info, _ack: &RendezvousAcknowledgement) {
        self.record(MessageType::RendezvousAcknowledgement, info, ());
    }
}

/// Call counters for [`CountingSecurifier`].
#[derive(Debug, Default)]
pub struct SecurifierCalls {
    pub sign: AtomicUsize,
    pub sign_with_parameters: AtomicUsize,
    pub encrypt: AtomicUsize,
    pub decrypt: AtomicUsize,
    pub validate: AtomicUsize,
}

impl SecurifierCalls {
    /// Total calls of any kind.
    pub fn total(&self) -> usize {
        [
            &self.sign,
            &self.sign_with_parameters,
            &self.encrypt,
            &self.decrypt,
            &self.validate,
        ]
        .iter()
        .map(|counter| counter.load(Ordering::SeqCst))
        .sum()
    }
}

/// Loopback [`KeyPairSecurifier`] that counts calls and can be made to fail.
#[derive(Debug)]
pub struct CountingSecurifier {
    inner: KeyPairSecurifier,
    calls: SecurifierCalls,
    fail: AtomicBool,
}

impl Default for CountingSecurifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CountingSecurifier {
    /// Loopback provider with fresh keys.
    pub fn new() -> Self {
        Self::wrap(KeyPairSecurifier::generate())
    }

    /// Count calls on an existing provider.
    pub fn wrap(inner: KeyPairSecurifier) -> Self {
        Self {
            inner,
            calls: SecurifierCalls::default(),
            fail: AtomicBool::new(false),
        }
    }

    /// Make every sign/encrypt/decrypt call fail.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Counters.
    pub fn calls(&self) -> &SecurifierCalls {
        &self.calls
    }

    /// Wrapped provider.
    pub fn inner(&self) -> &KeyPairSecurifier {
        &self.inner
    }

    fn failing(&self) -> bool {
        self.fail.load(Ordering::SeqCst)
    }
}

impl Securifier for CountingSecurifier {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SecurifierError> {
        self.calls.sign.fetch_add(1, Ordering::SeqCst);
        if self.failing() {
            return Err(SecurifierError::SigningFailed("injected".into()));
        }
        self.inner.sign(data)
    }

    fn sign_with_parameters(&self, data: &[u8]) -> Result<Vec<u8>, SecurifierError> {
        self.calls.sign_with_parameters.fetch_add(1, Ordering::SeqCst);
        if self.failing() {
            return Err(SecurifierError::SigningFailed("injected".into()));
        }
        self.inner.sign_with_parameters(data)
    }

    fn asymmetric_encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, SecurifierError> {
        self.calls.encrypt.fetch_add(1, Ordering::SeqCst);
        if self.failing() {
            return Err(SecurifierError::EncryptionFailed("injected".into()));
        }
        self.inner.asymmetric_encrypt(plaintext)
    }

    fn asymmetric_decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, SecurifierError> {
        self.calls.decrypt.fetch_add(1, Ordering::SeqCst);
        if self.failing() {
            return Err(SecurifierError::DecryptionFailed("injected".into()));
        }
        self.inner.asymmetric_decrypt(ciphertext)
    }

    fn validate(&self, data: &[u8], signature: &[u8]) -> bool {
        self.calls.validate.fetch_add(1, Ordering::SeqCst);
        self.inner.validate(data, signature)
    }
}

/// NAT probe result reporting `endpoint` as the external address.
pub fn sample_nat_detection_response(endpoint: SocketAddr) -> NatDetectionResponse {
    NatDetectionResponse {
        nat_type: NatType::PortRestricted,
        endpoint: Some(endpoint),
    }
}

/// A valid payload for every message type, in wire order.
pub fn sample_payloads() -> Vec<(MessageType, Vec<u8>)> {
    let endpoint = sample_endpoint();
    vec![
        (
            MessageType::ManagedEndpoint,
            ManagedEndpointMessage {
                result: None,
                endpoint: Some(endpoint),
                identity: Some(b"node-a".to_vec()),
            }
            .to_payload(),
        ),
        (
            MessageType::NatDetectionRequest,
            NatDetectionRequest {
                local_ips: vec![endpoint.ip()],
                local_port: endpoint.port(),
                full_detection: false,
            }
            .to_payload(),
        ),
        (
            MessageType::NatDetectionResponse,
            sample_nat_detection_response(endpoint).to_payload(),
        ),
        (
            MessageType::ProxyConnectRequest,
            ProxyConnectRequest {
                endpoint,
                rendezvous_connect: true,
            }
            .to_payload(),
        ),
        (
            MessageType::ProxyConnectResponse,
            ProxyConnectResponse { result: false }.to_payload(),
        ),
        (
            MessageType::ForwardRendezvousRequest,
            ForwardRendezvousRequest {
                receiver_endpoint: endpoint,
            }
            .to_payload(),
        ),
        (
            MessageType::ForwardRendezvousResponse,
            ForwardRendezvousResponse {
                receiver_rendezvous_endpoint: endpoint,
            }
            .to_payload(),
        ),
        (
            MessageType::RendezvousRequest,
            RendezvousRequest {
                proxy_endpoint: endpoint,
            }
            .to_payload(),
        ),
        (
            MessageType::RendezvousAcknowledgement,
            RendezvousAcknowledgement {
                originator_endpoint: endpoint,
            }
            .to_payload(),
        ),
    ]
}
