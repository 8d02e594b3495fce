//! # Domain Layer
//!
//! Pure types and transforms with no I/O:
//!
//! - `envelope` - `Envelope`, `MessageType`, codec
//! - `policy` - `SecurityPolicy` flags and signing precedence
//! - `payloads` - the nine typed message schemas
//! - `info` - `Info`, `TimeoutDirective`, `TransportCondition`

pub mod envelope;
pub mod info;
pub mod payloads;
pub mod policy;

pub use envelope::{signing_input, Envelope, MessageType, DEFAULT_MAX_ENVELOPE_SIZE};
pub use info::{Info, TimeoutDirective, TransportCondition};
pub use payloads::{
    ForwardRendezvousRequest, ForwardRendezvousResponse, ManagedEndpointMessage, NatDetectionRequest,
    NatDetectionResponse, NatType, ProxyConnectRequest, ProxyConnectResponse,
    RendezvousAcknowledgement, RendezvousRequest, TransportMessage,
};
pub use policy::{PolicyFlag, SecurityPolicy, SigningMode};
