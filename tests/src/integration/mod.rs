//! # Integration Tests
//!
//! Two `MessageHandler`s with `KeyPairSecurifier`s bound to each other,
//! exchanging real wire bytes.

pub mod message_flows;

use std::sync::Arc;

use qt_01_message_handler::test_utils::{CountingSecurifier, RecordingHandlers};
use qt_01_message_handler::{KeyPairSecurifier, MessageHandler, MessageHandlerConfig};

/// One side of a session.
pub struct Peer {
    pub handler: MessageHandler,
    pub handlers: Arc<RecordingHandlers>,
    pub securifier: Arc<CountingSecurifier>,
}

/// Parameters both peers mix into parameterized signatures.
pub const SESSION_PARAMETERS: &[u8] = b"qt-session-0001";

/// Two peers whose securifiers encrypt to and validate each other.
pub fn peer_pair(config: MessageHandlerConfig) -> (Peer, Peer) {
    let alice = KeyPairSecurifier::generate().with_parameters(SESSION_PARAMETERS);
    let bob = KeyPairSecurifier::generate().with_parameters(SESSION_PARAMETERS);
    let (alice_keys, bob_keys) = (alice.local_keys(), bob.local_keys());

    (
        peer(alice.with_peer(bob_keys), config.clone()),
        peer(bob.with_peer(alice_keys), config),
    )
}

fn peer(securifier: KeyPairSecurifier, config: MessageHandlerConfig) -> Peer {
    let handlers = Arc::new(RecordingHandlers::new());
    let securifier = Arc::new(CountingSecurifier::wrap(securifier));
    let handler = MessageHandler::new(handlers.clone())
        .with_securifier(securifier.clone())
        .with_config(config);

    Peer {
        handler,
        handlers,
        securifier,
    }
}

/// Route handler logs to the test writer. Safe to call from every test.
pub fn init_tracing() {
    #[cfg(test)]
    {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}
