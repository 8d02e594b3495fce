use std::sync::Arc;

use tracing::{debug, warn};

use super::dispatcher::{Dispatched, Dispatcher};
use super::security::{protect, unwrap_envelope};
use crate::config::MessageHandlerConfig;
use crate::domain::{Info, SecurityPolicy, TransportCondition, TransportMessage};
use crate::error::MessageError;
use crate::ports::{ErrorSink, Securifier, TransportMessageApi, TransportMessageHandlers};

/// Message handler implementing the driving port.
///
/// Holds no per-message state; every call is independent and the struct can
/// be shared across threads behind an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use qt_01_message_handler::{KeyPairSecurifier, MessageHandler, TransportMessageApi};
///
/// let handler = MessageHandler::new(Arc::new(MyHandlers))
///     .with_securifier(Arc::new(KeyPairSecurifier::generate()))
///     .with_error_sink(Arc::new(|condition| eprintln!("transport: {condition}")));
///
/// let dispatched = handler.on_message_received(&bytes, &info);
/// ```
pub struct MessageHandler {
    handlers: Arc<dyn TransportMessageHandlers>,
    securifier: Option<Arc<dyn Securifier>>,
    error_sink: Option<Arc<dyn ErrorSink>>,
    config: MessageHandlerConfig,
}

impl MessageHandler {
    /// Handler with no cryptographic provider, no error sink and default config.
    pub fn new(handlers: Arc<dyn TransportMessageHandlers>) -> Self {
        Self {
            handlers,
            securifier: None,
            error_sink: None,
            config: MessageHandlerConfig::default(),
        }
    }

    /// Attach a cryptographic provider.
    #[must_use]
    pub fn with_securifier(mut self, securifier: Arc<dyn Securifier>) -> Self {
        self.securifier = Some(securifier);
        self
    }

    /// Attach the sink for `on_error`.
    #[must_use]
    pub fn with_error_sink(mut self, error_sink: Arc<dyn ErrorSink>) -> Self {
        self.error_sink = Some(error_sink);
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: MessageHandlerConfig) -> Self {
        self.config = config;
        self
    }

    fn securifier(&self) -> Option<&dyn Securifier> {
        self.securifier.as_deref()
    }
}

impl TransportMessageApi for MessageHandler {
    fn on_message_received(&self, request: &[u8], info: &Info) -> Dispatched {
        let unwrapped =
            match unwrap_envelope(request, self.securifier(), self.config.max_envelope_size) {
                Ok(unwrapped) => unwrapped,
                Err(e) => {
                    debug!(
                        endpoint = %info.endpoint,
                        len = request.len(),
                        reason = %e,
                        "Inbound buffer dropped"
                    );
                    return Dispatched::inert();
                }
            };

        Dispatcher {
            handlers: self.handlers.as_ref(),
            securifier: self.securifier(),
            config: &self.config,
        }
        .dispatch(&unwrapped, info)
    }

    fn wrap_message<M: TransportMessage>(
        &self,
        message: &M,
        policy: SecurityPolicy,
    ) -> Result<Vec<u8>, MessageError> {
        let msg_type = M::MESSAGE_TYPE;
        protect(msg_type, message.to_payload(), policy, self.securifier()).inspect_err(|e| {
            warn!(
                msg_type = %msg_type,
                policy = %policy,
                reason = %e,
                "Outbound message not wrapped"
            );
        })
    }

    fn on_error(&self, condition: TransportCondition) {
        if let Some(sink) = &self.error_sink {
            sink.on_error(condition);
        }
    }
}
