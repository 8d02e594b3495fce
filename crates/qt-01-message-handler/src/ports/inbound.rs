//! # Driving Ports (Inbound API)
//!
//! The surface the transport layer drives.

use crate::domain::{Info, SecurityPolicy, TransportCondition, TransportMessage};
use crate::error::MessageError;
use crate::service::Dispatched;

/// Entry points of the message handler.
///
/// # Example
///
/// ```rust,ignore
/// use qt_01_message_handler::ports::TransportMessageApi;
///
/// fn on_datagram<T: TransportMessageApi>(api: &T, bytes: &[u8], info: &Info) {
///     let dispatched = api.on_message_received(bytes, info);
///     if !dispatched.response.is_empty() {
///         send(info.endpoint, &dispatched.response);
///     }
/// }
/// ```
pub trait TransportMessageApi {
    /// Decode, dispatch and (for requests) build the reply for one inbound buffer.
    ///
    /// Never fails: malformed, undecryptable, unknown or unverified input
    /// yields an empty response with `TimeoutDirective::Immediate`.
    fn on_message_received(&self, request: &[u8], info: &Info) -> Dispatched;

    /// Serialize and protect a handler-initiated message.
    ///
    /// # Errors
    ///
    /// A protection failure (`MessageError::is_protection_failure`) when the
    /// policy cannot be honoured. The caller must not transmit.
    fn wrap_message<M: TransportMessage>(
        &self,
        message: &M,
        policy: SecurityPolicy,
    ) -> Result<Vec<u8>, MessageError>;

    /// Forward a transport condition to the error sink.
    fn on_error(&self, condition: TransportCondition);
}
