//! Transport-facing value types: peer context, timeout directive and the
//! transport's condition codes.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Connection metadata supplied by the transport with each inbound buffer.
///
/// Opaque to the message handler; handed to application handlers untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Info {
    /// Remote endpoint the buffer arrived from.
    pub endpoint: SocketAddr,
    /// Round-trip time estimate, when the transport has one.
    pub rtt: Option<Duration>,
}

impl Info {
    /// Context for `endpoint` without an RTT estimate.
    #[must_use]
    pub const fn new(endpoint: SocketAddr) -> Self {
        Self {
            endpoint,
            rtt: None,
        }
    }

    /// Attach an RTT estimate.
    #[must_use]
    pub fn with_rtt(mut self, rtt: Duration) -> Self {
        self.rtt = Some(rtt);
        self
    }
}

/// How long the transport should keep the reply window open.
///
/// Advisory only; the transport owns the timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeoutDirective {
    /// No reply expected.
    #[default]
    Immediate,
    /// A response went out; keep waiting for the follow-up.
    DefaultInitial,
}

impl TimeoutDirective {
    /// Concrete wait, given the configured initial timeout.
    #[must_use]
    pub const fn duration(self, default_initial: Duration) -> Duration {
        match self {
            Self::Immediate => Duration::ZERO,
            Self::DefaultInitial => default_initial,
        }
    }
}

/// Condition codes the transport reports through the error sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportCondition {
    /// Operation completed.
    Success,
    /// Unspecified failure.
    Error,
    /// Peer could not be reached.
    RemoteUnreachable,
    /// No connection to the peer.
    NoConnection,
    /// No usable network interface.
    NoNetwork,
    /// Malformed endpoint.
    InvalidAddress,
    /// No rendezvous server available.
    NoRendezvous,
    /// Local node is behind a firewall that blocks the attempt.
    BehindFirewall,
    /// Send failed.
    SendFailure,
    /// Send did not complete in time.
    SendTimeout,
    /// Receive failed.
    ReceiveFailure,
    /// Nothing arrived before the timeout.
    ReceiveTimeout,
    /// Received bytes could not be parsed.
    ReceiveParseFailure,
    /// Message exceeds the transport's size limit.
    MessageSizeTooLarge,
    /// A managed endpoint stopped responding.
    ManagedEndpointLost,
}

impl fmt::Display for TransportCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::RemoteUnreachable => write!(f, "remote unreachable"),
            Self::NoConnection => write!(f, "no connection"),
            Self::NoNetwork => write!(f, "no network"),
            Self::InvalidAddress => write!(f, "invalid address"),
            Self::NoRendezvous => write!(f, "no rendezvous"),
            Self::BehindFirewall => write!(f, "behind firewall"),
            Self::SendFailure => write!(f, "send failure"),
            Self::SendTimeout => write!(f, "send timeout"),
            Self::ReceiveFailure => write!(f, "receive failure"),
            Self::ReceiveTimeout => write!(f, "receive timeout"),
            Self::ReceiveParseFailure => write!(f, "receive parse failure"),
            Self::MessageSizeTooLarge => write!(f, "message size too large"),
            Self::ManagedEndpointLost => write!(f, "managed endpoint lost"),
        }
    }
}
