//! # Envelope Codec
//!
//! The generic outer structure of every transport control message:
//!
//! ```text
//! Envelope {
//!     msg_type:          u32            // MessageType wire value
//!     payload:           Vec<u8>        // schema chosen by msg_type
//!     message_signature: Option<Vec<u8>>
//! }
//! ```
//!
//! Wire format is bincode with fixed-width little-endian integers:
//! `msg_type (4) | payload_len (8) | payload | sig_tag (1) [| sig_len (8) | sig]`.
//! Decoding is strict: trailing bytes, bad option tags and length prefixes
//! beyond the size limit are all rejected.

use std::fmt;

use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::error::MessageError;

/// Default upper bound on an inbound envelope (1 MiB).
pub const DEFAULT_MAX_ENVELOPE_SIZE: u64 = 1024 * 1024;

/// Closed set of transport control messages.
///
/// Values are stable wire constants, contiguous from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum MessageType {
    /// Keep-alive / registration of a managed endpoint.
    ManagedEndpoint = 1,
    /// Ask a peer to probe our NAT.
    NatDetectionRequest = 2,
    /// Result of a NAT probe.
    NatDetectionResponse = 3,
    /// Ask a peer to connect back to us through a proxy.
    ProxyConnectRequest = 4,
    /// Outcome of a proxy connect attempt.
    ProxyConnectResponse = 5,
    /// Ask a rendezvous server to forward a rendezvous to a receiver.
    ForwardRendezvousRequest = 6,
    /// Rendezvous endpoint of the receiver.
    ForwardRendezvousResponse = 7,
    /// Rendezvous notification delivered to the receiver.
    RendezvousRequest = 8,
    /// Receiver confirms the rendezvous.
    RendezvousAcknowledgement = 9,
}

impl MessageType {
    /// Every message type, in wire order.
    pub const ALL: [MessageType; 9] = [
        MessageType::ManagedEndpoint,
        MessageType::NatDetectionRequest,
        MessageType::NatDetectionResponse,
        MessageType::ProxyConnectRequest,
        MessageType::ProxyConnectResponse,
        MessageType::ForwardRendezvousRequest,
        MessageType::ForwardRendezvousResponse,
        MessageType::RendezvousRequest,
        MessageType::RendezvousAcknowledgement,
    ];

    /// Wire value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Resolve a wire value; `None` for anything outside 1..=9.
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(Self::ManagedEndpoint),
            2 => Some(Self::NatDetectionRequest),
            3 => Some(Self::NatDetectionResponse),
            4 => Some(Self::ProxyConnectRequest),
            5 => Some(Self::ProxyConnectResponse),
            6 => Some(Self::ForwardRendezvousRequest),
            7 => Some(Self::ForwardRendezvousResponse),
            8 => Some(Self::RendezvousRequest),
            9 => Some(Self::RendezvousAcknowledgement),
            _ => None,
        }
    }

    /// The message type a handler replies with, for request-style types.
    ///
    /// Notification-style types never reply and return `None`.
    #[must_use]
    pub const fn response_type(self) -> Option<Self> {
        match self {
            Self::ManagedEndpoint => Some(Self::ManagedEndpoint),
            Self::NatDetectionRequest => Some(Self::NatDetectionResponse),
            Self::ProxyConnectRequest => Some(Self::ProxyConnectResponse),
            Self::ForwardRendezvousRequest => Some(Self::ForwardRendezvousResponse),
            Self::NatDetectionResponse
            | Self::ProxyConnectResponse
            | Self::ForwardRendezvousResponse
            | Self::RendezvousRequest
            | Self::RendezvousAcknowledgement => None,
        }
    }

    /// True for request-style types (their handler may produce a reply).
    #[must_use]
    pub const fn is_request(self) -> bool {
        self.response_type().is_some()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ManagedEndpoint => "ManagedEndpoint",
            Self::NatDetectionRequest => "NatDetectionRequest",
            Self::NatDetectionResponse => "NatDetectionResponse",
            Self::ProxyConnectRequest => "ProxyConnectRequest",
            Self::ProxyConnectResponse => "ProxyConnectResponse",
            Self::ForwardRendezvousRequest => "ForwardRendezvousRequest",
            Self::ForwardRendezvousResponse => "ForwardRendezvousResponse",
            Self::RendezvousRequest => "RendezvousRequest",
            Self::RendezvousAcknowledgement => "RendezvousAcknowledgement",
        };
        write!(f, "{name}")
    }
}

/// The generic outer message.
///
/// `msg_type` stays a raw `u32` so that envelopes carrying unknown types
/// still decode; resolving it is the dispatcher's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Wire value of the message type.
    pub msg_type: u32,
    /// Type-specific payload bytes.
    pub payload: Vec<u8>,
    /// Present only when the sender applied a signing policy.
    pub message_signature: Option<Vec<u8>>,
}

impl Envelope {
    /// Unsigned envelope for a known message type.
    #[must_use]
    pub fn new(msg_type: MessageType, payload: Vec<u8>) -> Self {
        Self {
            msg_type: msg_type.as_u32(),
            payload,
            message_signature: None,
        }
    }

    /// Bytes covered by the envelope signature: the decimal type tag
    /// followed by the raw payload.
    #[must_use]
    pub fn signing_input(&self) -> Vec<u8> {
        signing_input(self.msg_type, &self.payload)
    }

    /// Serialize the envelope.
    ///
    /// Serializing owned buffers into memory has no failure mode without a
    /// size limit; an empty result would be treated as "nothing to send".
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        wire_options().serialize(self).unwrap_or_default()
    }

    /// Parse an envelope from untrusted bytes.
    ///
    /// # Errors
    ///
    /// `MessageError::EnvelopeParse` for oversized, truncated, trailing or
    /// otherwise malformed input.
    pub fn decode(bytes: &[u8], max_size: u64) -> Result<Self, MessageError> {
        if bytes.len() as u64 > max_size {
            return Err(MessageError::EnvelopeParse(format!(
                "{} bytes exceeds limit of {}",
                bytes.len(),
                max_size
            )));
        }

        wire_options()
            .with_limit(max_size)
            .deserialize(bytes)
            .map_err(|e| MessageError::EnvelopeParse(e.to_string()))
    }
}

/// Decimal type tag followed by the raw payload.
#[must_use]
pub fn signing_input(msg_type: u32, payload: &[u8]) -> Vec<u8> {
    let tag = msg_type.to_string();
    let mut input = Vec::with_capacity(tag.len() + payload.len());
    input.extend_from_slice(tag.as_bytes());
    input.extend_from_slice(payload);
    input
}

/// Shared bincode configuration for envelopes and payloads.
pub(crate) fn wire_options() -> impl Options + Copy {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
}
