//! # Message Flows
//!
//! End-to-end exchanges between two peers:
//!
//! 1. Every message type under every protection policy survives the trip
//! 2. Request → protected reply → notification closes the exchange
//! 3. Rendezvous choreography across originator, server and receiver
//! 4. Plaintext traffic never costs a provider call
//! 5. A ManagedEndpoint reply is itself a ManagedEndpoint request

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::thread;

    use qt_01_message_handler::test_utils::{sample_info, sample_payloads, RecordingHandlers};
    use qt_01_message_handler::{
        protect, unwrap_envelope, ForwardRendezvousRequest, MessageHandler, MessageHandlerConfig,
        MessageType, RendezvousAcknowledgement, RendezvousRequest, Securifier, SecurityPolicy,
        TimeoutDirective, TransportMessageApi, DEFAULT_MAX_ENVELOPE_SIZE,
    };

    use crate::integration::{init_tracing, peer_pair};

    fn hardened() -> MessageHandlerConfig {
        MessageHandlerConfig {
            response_policy: SecurityPolicy::SIGN | SecurityPolicy::ASYMMETRIC_ENCRYPT,
            verify_signatures: true,
            require_encryption: true,
            ..MessageHandlerConfig::default()
        }
    }

    // =========================================================================
    // Round trip: every type × every policy
    // =========================================================================

    #[test]
    fn test_every_type_under_every_policy_round_trips() {
        init_tracing();
        let (alice, bob) = peer_pair(MessageHandlerConfig::default());

        for (msg_type, payload) in sample_payloads() {
            for policy in SecurityPolicy::combinations() {
                let wire = protect(
                    msg_type,
                    payload.clone(),
                    policy,
                    Some(alice.securifier.inner()),
                )
                .unwrap();

                let unwrapped = unwrap_envelope(
                    &wire,
                    Some(bob.securifier.inner()),
                    DEFAULT_MAX_ENVELOPE_SIZE,
                )
                .unwrap();
                let envelope = &unwrapped.envelope;

                assert_eq!(envelope.msg_type, msg_type.as_u32(), "{msg_type} / {policy}");
                assert_eq!(envelope.payload, payload, "{msg_type} / {policy}");
                assert_eq!(unwrapped.was_encrypted, policy.encrypts(), "{msg_type} / {policy}");
                assert_eq!(
                    envelope.message_signature.is_some(),
                    policy.signing_mode().is_some(),
                    "{msg_type} / {policy}"
                );

                if let Some(signature) = &envelope.message_signature {
                    assert!(
                        bob.securifier
                            .inner()
                            .validate(&envelope.signing_input(), signature),
                        "{msg_type} / {policy}: signature rejected"
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_type_reaches_its_handler_under_hardened_config() {
        init_tracing();
        let (alice, bob) = peer_pair(hardened());
        let policy = SecurityPolicy::SIGN_WITH_PARAMETERS | SecurityPolicy::ASYMMETRIC_ENCRYPT;

        for (msg_type, payload) in sample_payloads() {
            let wire = protect(msg_type, payload, policy, Some(alice.securifier.as_ref())).unwrap();
            let dispatched = bob.handler.on_message_received(&wire, &sample_info());

            assert_eq!(dispatched.is_inert(), !msg_type.is_request(), "{msg_type}");
        }

        assert_eq!(bob.handlers.calls(), MessageType::ALL.to_vec());
    }

    // =========================================================================
    // Request / reply
    // =========================================================================

    #[test]
    fn test_protected_request_reply_exchange() {
        init_tracing();
        let (alice, bob) = peer_pair(hardened());

        let request = alice
            .handler
            .wrap_message(
                &ForwardRendezvousRequest {
                    receiver_endpoint: "198.51.100.40:7000".parse().unwrap(),
                },
                SecurityPolicy::SIGN | SecurityPolicy::ASYMMETRIC_ENCRYPT,
            )
            .unwrap();

        let reply = bob.handler.on_message_received(&request, &sample_info());
        assert_eq!(reply.timeout, TimeoutDirective::DefaultInitial);
        assert_eq!(bob.handlers.calls(), vec![MessageType::ForwardRendezvousRequest]);
        assert_eq!(bob.securifier.calls().decrypt.load(Ordering::SeqCst), 1);
        assert_eq!(bob.securifier.calls().validate.load(Ordering::SeqCst), 1);

        let closing = alice.handler.on_message_received(&reply.response, &sample_info());
        assert!(closing.is_inert());
        assert_eq!(closing.timeout, TimeoutDirective::Immediate);
        assert_eq!(
            alice.handlers.calls(),
            vec![MessageType::ForwardRendezvousResponse]
        );
    }

    #[test]
    fn test_reply_sealed_for_one_peer_is_dropped_by_another() {
        let (alice, bob) = peer_pair(hardened());
        let (mallory, _) = peer_pair(hardened());

        let request = alice
            .handler
            .wrap_message(
                &ForwardRendezvousRequest {
                    receiver_endpoint: "198.51.100.40:7000".parse().unwrap(),
                },
                SecurityPolicy::SIGN | SecurityPolicy::ASYMMETRIC_ENCRYPT,
            )
            .unwrap();

        assert!(mallory
            .handler
            .on_message_received(&request, &sample_info())
            .is_inert());
        assert!(mallory.handlers.calls().is_empty());
        assert!(bob.handlers.calls().is_empty());
    }

    #[test]
    fn test_rendezvous_choreography() {
        init_tracing();
        let (originator, receiver) = peer_pair(MessageHandlerConfig::default());
        let policy = SecurityPolicy::SIGN;
        let originator_endpoint = "192.0.2.10:5483".parse().unwrap();
        let receiver_endpoint = "192.0.2.20:5483".parse().unwrap();

        // rendezvous server tells the receiver where to punch
        let rendezvous = originator
            .handler
            .wrap_message(
                &RendezvousRequest {
                    proxy_endpoint: originator_endpoint,
                },
                policy,
            )
            .unwrap();
        assert!(receiver
            .handler
            .on_message_received(&rendezvous, &sample_info())
            .is_inert());

        // receiver acknowledges to the originator
        let ack = receiver
            .handler
            .wrap_message(
                &RendezvousAcknowledgement {
                    originator_endpoint: receiver_endpoint,
                },
                policy,
            )
            .unwrap();
        assert!(originator
            .handler
            .on_message_received(&ack, &sample_info())
            .is_inert());

        assert_eq!(receiver.handlers.calls(), vec![MessageType::RendezvousRequest]);
        assert_eq!(
            originator.handlers.calls(),
            vec![MessageType::RendezvousAcknowledgement]
        );
    }

    // =========================================================================
    // Plaintext-first
    // =========================================================================

    #[test]
    fn test_plaintext_traffic_never_calls_provider() {
        let (alice, bob) = peer_pair(MessageHandlerConfig::default());
        // a ManagedEndpoint reply is itself a request; keep alice from answering it
        alice.handlers.set_reply(false);

        for (msg_type, payload) in sample_payloads() {
            let wire = protect(msg_type, payload, SecurityPolicy::NONE, None).unwrap();
            let dispatched = bob.handler.on_message_received(&wire, &sample_info());

            if msg_type.is_request() {
                let closing = alice
                    .handler
                    .on_message_received(&dispatched.response, &sample_info());
                assert!(closing.is_inert(), "{msg_type}");
                assert_eq!(closing.timeout, TimeoutDirective::Immediate);
            }
        }

        assert_eq!(bob.securifier.calls().total(), 0);
        assert_eq!(alice.securifier.calls().total(), 0);
        assert_eq!(bob.handlers.calls().len(), MessageType::ALL.len());
    }

    #[test]
    fn test_managed_endpoint_reply_is_dispatched_as_request() {
        let (alice, bob) = peer_pair(MessageHandlerConfig::default());
        let (msg_type, payload) = sample_payloads().swap_remove(0);
        assert_eq!(msg_type, MessageType::ManagedEndpoint);

        let wire = protect(msg_type, payload, SecurityPolicy::NONE, None).unwrap();
        let reply = bob.handler.on_message_received(&wire, &sample_info());
        assert_eq!(reply.timeout, TimeoutDirective::DefaultInitial);

        // same type both ways, so the reply lands on the request handler and echoes
        let echo = alice.handler.on_message_received(&reply.response, &sample_info());
        assert!(!echo.is_inert());
        assert_eq!(echo.timeout, TimeoutDirective::DefaultInitial);
        assert_eq!(alice.handlers.calls(), vec![MessageType::ManagedEndpoint]);

        alice.handlers.set_reply(false);
        let closing = alice.handler.on_message_received(&reply.response, &sample_info());
        assert!(closing.is_inert());
        assert_eq!(
            alice.handlers.calls(),
            vec![MessageType::ManagedEndpoint, MessageType::ManagedEndpoint]
        );
    }

    // =========================================================================
    // Concurrency
    // =========================================================================

    #[test]
    fn test_shared_handler_serves_many_threads() {
        let (alice, bob) = peer_pair(hardened());
        let bob = Arc::new(bob.handler);
        let policy = SecurityPolicy::SIGN | SecurityPolicy::ASYMMETRIC_ENCRYPT;

        let wires: Vec<_> = sample_payloads()
            .into_iter()
            .map(|(msg_type, payload)| {
                (
                    msg_type,
                    protect(msg_type, payload, policy, Some(alice.securifier.as_ref())).unwrap(),
                )
            })
            .collect();

        thread::scope(|scope| {
            for _ in 0..4 {
                let bob = Arc::clone(&bob);
                let wires = &wires;
                scope.spawn(move || {
                    for (msg_type, wire) in wires {
                        let dispatched = bob.on_message_received(wire, &sample_info());
                        assert_eq!(dispatched.is_inert(), !msg_type.is_request());
                    }
                });
            }
        });
    }

    #[test]
    fn test_handler_without_provider_still_serves_plaintext() {
        let handlers = Arc::new(RecordingHandlers::new());
        let handler = MessageHandler::new(handlers.clone());

        for (msg_type, payload) in sample_payloads() {
            let wire = handler_wire(msg_type, payload);
            handler.on_message_received(&wire, &sample_info());
        }

        assert_eq!(handlers.calls(), MessageType::ALL.to_vec());
    }

    fn handler_wire(msg_type: MessageType, payload: Vec<u8>) -> Vec<u8> {
        protect(msg_type, payload, SecurityPolicy::NONE, None).unwrap()
    }
}
