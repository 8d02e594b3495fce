//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** what the transport calls
//! - **Driven Ports (Outbound):** what the host must supply (application
//!   handlers, cryptographic provider, error sink)
//!
//! ## Security
//!
//! Inbound bytes are untrusted. Nothing that fails to parse, decrypt or
//! verify ever reaches a `TransportMessageHandlers` method.

pub mod inbound;
pub mod outbound;

pub use inbound::TransportMessageApi;
pub use outbound::{ErrorSink, Securifier, SecurifierError, TransportMessageHandlers};
