//! # Typed Payloads
//!
//! One schema per [`MessageType`]. Payloads use the same strict bincode
//! configuration as the envelope, so a payload only parses when every
//! mandatory field is present and nothing follows it.

use std::net::{IpAddr, SocketAddr};

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::envelope::{wire_options, MessageType};
use crate::error::MessageError;

/// A payload schema bound to its wire message type.
pub trait TransportMessage: Serialize + DeserializeOwned {
    /// Message type carried in the envelope.
    const MESSAGE_TYPE: MessageType;

    /// Serialize into envelope payload bytes.
    fn to_payload(&self) -> Vec<u8> {
        wire_options().serialize(self).unwrap_or_default()
    }

    /// Parse envelope payload bytes.
    ///
    /// # Errors
    ///
    /// `MessageError::PayloadParse` when the bytes do not match the schema.
    /// A length prefix can never claim more than `bytes` holds; the overall
    /// size is already bounded by the envelope limit.
    fn from_payload(bytes: &[u8]) -> Result<Self, MessageError> {
        wire_options()
            .with_limit(bytes.len() as u64)
            .deserialize(bytes)
            .map_err(|e| MessageError::PayloadParse {
                msg_type: Self::MESSAGE_TYPE,
                reason: e.to_string(),
            })
    }
}

/// Registration / keep-alive of a managed endpoint. Also its own reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedEndpointMessage {
    /// Outcome, set on replies.
    pub result: Option<bool>,
    /// Endpoint being managed.
    pub endpoint: Option<SocketAddr>,
    /// Opaque identity of the sender.
    pub identity: Option<Vec<u8>>,
}

/// Request a NAT probe from a peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatDetectionRequest {
    /// Addresses of the local interfaces.
    pub local_ips: Vec<IpAddr>,
    /// Port the requester listens on.
    pub local_port: u16,
    /// Run the full detection sequence rather than a quick check.
    pub full_detection: bool,
}

/// NAT classification reported by a probing peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NatType {
    /// Any external host can reach the mapped port.
    FullCone,
    /// Only hosts/ports we sent to may reply.
    PortRestricted,
    /// Mapping changes per destination.
    Symmetric,
    /// Detection inconclusive.
    Unknown,
}

/// Result of a NAT probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatDetectionResponse {
    /// Detected NAT behaviour.
    pub nat_type: NatType,
    /// External endpoint as seen by the prober.
    pub endpoint: Option<SocketAddr>,
}

/// Ask a peer to connect to `endpoint` on our behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConnectRequest {
    /// Endpoint to connect to.
    pub endpoint: SocketAddr,
    /// Connect via rendezvous rather than directly.
    pub rendezvous_connect: bool,
}

/// Outcome of a proxy connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConnectResponse {
    /// True when the connection was established.
    pub result: bool,
}

/// Ask a rendezvous server to forward a rendezvous to a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardRendezvousRequest {
    /// Receiver the originator wants to reach.
    pub receiver_endpoint: SocketAddr,
}

/// Where the originator should punch towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardRendezvousResponse {
    /// Receiver's endpoint as seen by the rendezvous server.
    pub receiver_rendezvous_endpoint: SocketAddr,
}

/// Rendezvous notification delivered to the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendezvousRequest {
    /// Endpoint the receiver should punch towards.
    pub proxy_endpoint: SocketAddr,
}

/// Receiver confirms it punched towards the originator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendezvousAcknowledgement {
    /// Originator of the rendezvous.
    pub originator_endpoint: SocketAddr,
}

macro_rules! impl_transport_message {
    ($($payload:ty => $msg_type:ident),+ $(,)?) => {
        $(
            impl TransportMessage for $payload {
                const MESSAGE_TYPE: MessageType = MessageType::$msg_type;
            }
        )+
    };
}

impl_transport_message! {
    ManagedEndpointMessage => ManagedEndpoint,
    NatDetectionRequest => NatDetectionRequest,
    NatDetectionResponse => NatDetectionResponse,
    ProxyConnectRequest => ProxyConnectRequest,
    ProxyConnectResponse => ProxyConnectResponse,
    ForwardRendezvousRequest => ForwardRendezvousRequest,
    ForwardRendezvousResponse => ForwardRendezvousResponse,
    RendezvousRequest => RendezvousRequest,
    RendezvousAcknowledgement => RendezvousAcknowledgement,
}
