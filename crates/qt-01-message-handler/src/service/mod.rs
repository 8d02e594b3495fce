//! # Message Handler Service
//!
//! Wires the domain codec to the ports:
//!
//! - `security` - outbound protection and the plaintext-first inbound decode
//! - `dispatcher` - routes envelopes to handlers and applies the timeout rule
//! - `handler` - `MessageHandler`, the `TransportMessageApi` implementation

mod dispatcher;
mod handler;
mod security;

pub use dispatcher::Dispatched;
pub use handler::MessageHandler;
pub use security::{protect, unwrap_envelope, Unwrapped};
