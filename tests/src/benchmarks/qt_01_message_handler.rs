//! # QT-01 Message Handler Benchmarks
//!
//! - Plaintext decode + dispatch per message type
//! - Outbound wrap under each protection policy
//! - Full sealed request → reply round trip
//! - Hostile input: random buffers that must be rejected cheaply

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use qt_01_message_handler::test_utils::{
    sample_info, sample_nat_detection_response, sample_payloads, CountingSecurifier,
};
use qt_01_message_handler::{
    protect, ForwardRendezvousRequest, ForwardRendezvousResponse, Info, KeyPairSecurifier,
    ManagedEndpointMessage, MessageHandler, MessageHandlerConfig, NatDetectionRequest,
    NatDetectionResponse, ProxyConnectRequest, ProxyConnectResponse, RendezvousAcknowledgement,
    RendezvousRequest, SecurityPolicy, TransportMessageApi, TransportMessageHandlers,
};
use rand::Rng;

/// Stateless handlers: replies to every request, records nothing.
struct EchoHandlers;

impl TransportMessageHandlers for EchoHandlers {
    fn on_managed_endpoint(
        &self,
        _info: &Info,
        request: &ManagedEndpointMessage,
    ) -> Option<ManagedEndpointMessage> {
        Some(request.clone())
    }

    fn on_nat_detection_request(
        &self,
        info: &Info,
        _request: &NatDetectionRequest,
    ) -> Option<NatDetectionResponse> {
        Some(sample_nat_detection_response(info.endpoint))
    }

    fn on_nat_detection_response(&self, _info: &Info, _response: &NatDetectionResponse) {}

    fn on_proxy_connect_request(
        &self,
        _info: &Info,
        _request: &ProxyConnectRequest,
    ) -> Option<ProxyConnectResponse> {
        Some(ProxyConnectResponse { result: true })
    }

    fn on_proxy_connect_response(&self, _info: &Info, _response: &ProxyConnectResponse) {}

    fn on_forward_rendezvous_request(
        &self,
        _info: &Info,
        request: &ForwardRendezvousRequest,
    ) -> Option<ForwardRendezvousResponse> {
        Some(ForwardRendezvousResponse {
            receiver_rendezvous_endpoint: request.receiver_endpoint,
        })
    }

    fn on_forward_rendezvous_response(&self, _info: &Info, _response: &ForwardRendezvousResponse) {}

    fn on_rendezvous_request(&self, _info: &Info, _request: &RendezvousRequest) {}

    fn on_rendezvous_acknowledgement(&self, _info: &Info, _ack: &RendezvousAcknowledgement) {}
}

fn loopback_handler(config: MessageHandlerConfig) -> MessageHandler {
    MessageHandler::new(Arc::new(EchoHandlers))
        .with_securifier(Arc::new(KeyPairSecurifier::generate()))
        .with_config(config)
}

pub fn bench_plaintext_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("qt-01/dispatch/plaintext");
    group.measurement_time(Duration::from_secs(5));
    let handler = MessageHandler::new(Arc::new(EchoHandlers));
    let info = sample_info();

    for (msg_type, payload) in sample_payloads() {
        let wire = protect(msg_type, payload, SecurityPolicy::NONE, None).unwrap_or_default();
        group.throughput(Throughput::Bytes(wire.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(msg_type),
            &wire,
            |b, wire| b.iter(|| black_box(handler.on_message_received(wire, &info))),
        );
    }

    group.finish();
}

pub fn bench_wrap_by_policy(c: &mut Criterion) {
    let mut group = c.benchmark_group("qt-01/wrap/policy");
    group.measurement_time(Duration::from_secs(5));
    let securifier = CountingSecurifier::new();
    let (msg_type, payload) = sample_payloads().swap_remove(3);

    for policy in SecurityPolicy::combinations() {
        group.bench_with_input(
            BenchmarkId::from_parameter(policy),
            &policy,
            |b, &policy| {
                b.iter(|| {
                    black_box(protect(msg_type, payload.clone(), policy, Some(&securifier)))
                })
            },
        );
    }

    group.finish();
}

pub fn bench_sealed_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("qt-01/round_trip/sealed");
    group.measurement_time(Duration::from_secs(10));
    let config = MessageHandlerConfig {
        response_policy: SecurityPolicy::SIGN | SecurityPolicy::ASYMMETRIC_ENCRYPT,
        verify_signatures: true,
        require_encryption: true,
        ..MessageHandlerConfig::default()
    };
    let receiver = KeyPairSecurifier::generate();
    let sender = KeyPairSecurifier::generate().with_peer(receiver.local_keys());
    let receiver = receiver.with_peer(sender.local_keys());
    let handler = MessageHandler::new(Arc::new(EchoHandlers))
        .with_securifier(Arc::new(receiver))
        .with_config(config);
    let info = sample_info();

    let (msg_type, payload) = sample_payloads().swap_remove(5);
    group.bench_function("forward_rendezvous_request", |b| {
        b.iter(|| {
            let wire = protect(
                msg_type,
                payload.clone(),
                SecurityPolicy::SIGN | SecurityPolicy::ASYMMETRIC_ENCRYPT,
                Some(&sender),
            )
            .unwrap_or_default();
            black_box(handler.on_message_received(&wire, &info))
        })
    });

    group.finish();
}

pub fn bench_hostile_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("qt-01/hostile");
    group.measurement_time(Duration::from_secs(5));
    let handler = loopback_handler(MessageHandlerConfig::default());
    let info = sample_info();
    let mut rng = rand::thread_rng();

    for size in [16usize, 256, 4096, 65536] {
        let buffer: Vec<u8> = (0..size).map(|_| rng.gen()).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("random_buffer", size), &buffer, |b, buffer| {
            b.iter(|| black_box(handler.on_message_received(buffer, &info)))
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_plaintext_dispatch(c);
    bench_wrap_by_policy(c);
    bench_sealed_round_trip(c);
    bench_hostile_input(c);
}
