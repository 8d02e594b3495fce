//! # Transport Message Handler
//!
//! **Subsystem ID:** 1
//!
//! Envelope protocol for a peer-to-peer transport's control messages
//! (managed endpoints, NAT detection, proxy connect, rendezvous).
//!
//! Every message travels in a generic `Envelope { msg_type, payload,
//! message_signature }`. Outbound envelopes are optionally signed and then
//! sealed to the peer; inbound buffers are parsed as plaintext first and
//! only decrypted when that fails. The decoded envelope is routed by type
//! to an application handler, and request-style handlers may return a
//! reply that is wrapped and handed back to the transport along with a
//! timeout directive.
//!
//! Inbound failures of any kind are silent drops: nothing is ever reflected
//! back to the network.
//!
//! ## Architecture
//!
//! - **Domain Layer:** envelope codec, message types, policy flags, payloads
//! - **Ports Layer:** handler table, cryptographic provider, error sink
//! - **Service Layer:** security wrapper, dispatcher, `MessageHandler`
//! - **Adapters Layer:** `KeyPairSecurifier` over `shared-crypto`
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use qt_01_message_handler::{
//!     KeyPairSecurifier, MessageHandler, ProxyConnectRequest, SecurityPolicy,
//!     TransportMessageApi,
//! };
//!
//! let handler = MessageHandler::new(Arc::new(MyHandlers))
//!     .with_securifier(Arc::new(KeyPairSecurifier::generate()));
//!
//! // Outbound
//! let bytes = handler.wrap_message(
//!     &ProxyConnectRequest { endpoint, rendezvous_connect: false },
//!     SecurityPolicy::SIGN | SecurityPolicy::ASYMMETRIC_ENCRYPT,
//! )?;
//!
//! // Inbound
//! let dispatched = handler.on_message_received(&bytes, &info);
//! if !dispatched.is_inert() {
//!     transport.send(info.endpoint, &dispatched.response, dispatched.timeout);
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

/// Recording handlers, counting securifier, sample payloads.
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Domain
pub use domain::{
    signing_input, Envelope, ForwardRendezvousRequest, ForwardRendezvousResponse, Info,
    ManagedEndpointMessage, MessageType, NatDetectionRequest, NatDetectionResponse, NatType,
    PolicyFlag, ProxyConnectRequest, ProxyConnectResponse, RendezvousAcknowledgement,
    RendezvousRequest, SecurityPolicy, SigningMode, TimeoutDirective, TransportCondition,
    TransportMessage, DEFAULT_MAX_ENVELOPE_SIZE,
};

// Errors and config
pub use config::MessageHandlerConfig;
pub use error::{ConfigError, MessageError};

// Port traits
pub use ports::{
    ErrorSink, Securifier, SecurifierError, TransportMessageApi, TransportMessageHandlers,
};

// Service
pub use service::{protect, unwrap_envelope, Dispatched, MessageHandler, Unwrapped};

// Adapters
pub use adapters::{KeyPairSecurifier, PeerKeys};
