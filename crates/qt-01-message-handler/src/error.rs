//! Error types for the message handler
//!
//! Inbound errors never leave the crate: `on_message_received` turns every
//! one of them into a silent drop. They exist so drops can be logged locally.
//! Outbound errors (`MissingCryptoProvider`, `Protection`) are returned to
//! the caller of `wrap_message`, who must not transmit.

use thiserror::Error;

use crate::domain::MessageType;

/// Errors that can occur while wrapping, unwrapping or dispatching envelopes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Envelope parse failed: {0}")]
    EnvelopeParse(String),

    #[error("Asymmetric decryption failed: {0}")]
    Decrypt(String),

    #[error("No cryptographic provider configured")]
    MissingCryptoProvider,

    #[error("Unknown message type: {0}")]
    UnknownMessageType(u32),

    #[error("Payload parse failed for {msg_type}: {reason}")]
    PayloadParse { msg_type: MessageType, reason: String },

    #[error("Outbound protection failed: {0}")]
    Protection(String),

    #[error("Signature verification failed for {0}")]
    SignatureVerification(MessageType),

    #[error("Plaintext envelope rejected: encryption required")]
    PlaintextRejected,
}

impl MessageError {
    /// True for outbound failures that mean "do not send".
    #[must_use]
    pub fn is_protection_failure(&self) -> bool {
        matches!(self, Self::MissingCryptoProvider | Self::Protection(_))
    }
}

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
