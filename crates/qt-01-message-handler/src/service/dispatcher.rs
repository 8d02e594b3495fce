//! Type dispatcher: routes a decoded envelope to its handler and turns the
//! handler's answer into wire bytes plus a timeout directive.

use tracing::{debug, warn};

use super::security::{protect, Unwrapped};
use crate::config::MessageHandlerConfig;
use crate::domain::{
    ForwardRendezvousRequest, ForwardRendezvousResponse, Info, ManagedEndpointMessage,
    MessageType, NatDetectionRequest, NatDetectionResponse, ProxyConnectRequest,
    ProxyConnectResponse, RendezvousAcknowledgement, RendezvousRequest, TimeoutDirective,
    TransportMessage,
};
use crate::error::MessageError;
use crate::ports::{Securifier, TransportMessageHandlers};

/// Outcome of handling one inbound buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dispatched {
    /// Bytes to send back; empty means send nothing.
    pub response: Vec<u8>,
    /// How long the transport should keep the exchange open.
    pub timeout: TimeoutDirective,
}

impl Dispatched {
    /// Nothing to send, close immediately.
    #[must_use]
    pub fn inert() -> Self {
        Self::default()
    }

    /// A reply; non-empty bytes keep the exchange open.
    #[must_use]
    pub fn reply(response: Vec<u8>) -> Self {
        let timeout = if response.is_empty() {
            TimeoutDirective::Immediate
        } else {
            TimeoutDirective::DefaultInitial
        };
        Self { response, timeout }
    }

    /// True when there is nothing to send.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.response.is_empty()
    }
}

/// Borrowed view of the collaborators needed for one dispatch.
pub(crate) struct Dispatcher<'a> {
    pub(crate) handlers: &'a dyn TransportMessageHandlers,
    pub(crate) securifier: Option<&'a dyn Securifier>,
    pub(crate) config: &'a MessageHandlerConfig,
}

impl Dispatcher<'_> {
    /// Route `unwrapped` to its handler. Every failure becomes an inert result.
    pub(crate) fn dispatch(&self, unwrapped: &Unwrapped, info: &Info) -> Dispatched {
        match self.try_dispatch(unwrapped, info) {
            Ok(dispatched) => dispatched,
            Err(e) if e.is_protection_failure() => {
                warn!(
                    endpoint = %info.endpoint,
                    msg_type = unwrapped.envelope.msg_type,
                    reason = %e,
                    "Reply not sent"
                );
                Dispatched::inert()
            }
            Err(e) => {
                debug!(
                    endpoint = %info.endpoint,
                    msg_type = unwrapped.envelope.msg_type,
                    reason = %e,
                    "Inbound message dropped"
                );
                Dispatched::inert()
            }
        }
    }

    fn try_dispatch(&self, unwrapped: &Unwrapped, info: &Info) -> Result<Dispatched, MessageError> {
        let envelope = &unwrapped.envelope;
        let msg_type = MessageType::from_u32(envelope.msg_type)
            .ok_or(MessageError::UnknownMessageType(envelope.msg_type))?;

        self.check_protection(msg_type, unwrapped)?;

        let payload = envelope.payload.as_slice();
        match msg_type {
            MessageType::ManagedEndpoint => {
                let request = ManagedEndpointMessage::from_payload(payload)?;
                self.reply(self.handlers.on_managed_endpoint(info, &request))
            }
            MessageType::NatDetectionRequest => {
                let request = NatDetectionRequest::from_payload(payload)?;
                self.reply(self.handlers.on_nat_detection_request(info, &request))
            }
            MessageType::NatDetectionResponse => {
                let response = NatDetectionResponse::from_payload(payload)?;
                self.handlers.on_nat_detection_response(info, &response);
                Ok(Dispatched::inert())
            }
            MessageType::ProxyConnectRequest => {
                let request = ProxyConnectRequest::from_payload(payload)?;
                self.reply(self.handlers.on_proxy_connect_request(info, &request))
            }
            MessageType::ProxyConnectResponse => {
                let response = ProxyConnectResponse::from_payload(payload)?;
                self.handlers.on_proxy_connect_response(info, &response);
                Ok(Dispatched::inert())
            }
            MessageType::ForwardRendezvousRequest => {
                let request = ForwardRendezvousRequest::from_payload(payload)?;
                self.reply(self.handlers.on_forward_rendezvous_request(info, &request))
            }
            MessageType::ForwardRendezvousResponse => {
                let response = ForwardRendezvousResponse::from_payload(payload)?;
                self.handlers.on_forward_rendezvous_response(info, &response);
                Ok(Dispatched::inert())
            }
            MessageType::RendezvousRequest => {
                let request = RendezvousRequest::from_payload(payload)?;
                self.handlers.on_rendezvous_request(info, &request);
                Ok(Dispatched::inert())
            }
            MessageType::RendezvousAcknowledgement => {
                let ack = RendezvousAcknowledgement::from_payload(payload)?;
                self.handlers.on_rendezvous_acknowledgement(info, &ack);
                Ok(Dispatched::inert())
            }
        }
    }

    /// Opt-in inbound checks. Both are off by default.
    fn check_protection(
        &self,
        msg_type: MessageType,
        unwrapped: &Unwrapped,
    ) -> Result<(), MessageError> {
        if self.config.require_encryption && !unwrapped.was_encrypted {
            return Err(MessageError::PlaintextRejected);
        }

        if self.config.verify_signatures {
            let envelope = &unwrapped.envelope;
            let verified = match (envelope.message_signature.as_deref(), self.securifier) {
                (Some(signature), Some(securifier)) => {
                    securifier.validate(&envelope.signing_input(), signature)
                }
                _ => false,
            };
            if !verified {
                return Err(MessageError::SignatureVerification(msg_type));
            }
        }

        Ok(())
    }

    fn reply<M: TransportMessage>(&self, response: Option<M>) -> Result<Dispatched, MessageError> {
        let Some(response) = response else {
            return Ok(Dispatched::inert());
        };

        let bytes = protect(
            M::MESSAGE_TYPE,
            response.to_payload(),
            self.config.response_policy,
            self.securifier,
        )?;
        Ok(Dispatched::reply(bytes))
    }
}
