//! Message handler configuration
//!
//! # Config File Format
//!
//! ```toml
//! [message_handler]
//! default_initial_timeout_secs = 10
//! max_envelope_size = 1048576
//! response_policy = ["sign", "asymmetric_encrypt"]
//! verify_signatures = false
//! require_encryption = false
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{SecurityPolicy, DEFAULT_MAX_ENVELOPE_SIZE};
use crate::error::ConfigError;

/// Default reply window after a response is emitted (seconds).
pub const DEFAULT_INITIAL_TIMEOUT_SECS: u64 = 10;

/// Smallest accepted envelope size limit.
///
/// An empty plaintext envelope is 13 bytes; anything below cannot hold one.
pub const MIN_ENVELOPE_SIZE: u64 = 13;

/// Largest accepted envelope size limit (64 MiB).
pub const MAX_ENVELOPE_SIZE_LIMIT: u64 = 64 * 1024 * 1024;

/// Largest accepted initial timeout (10 minutes).
pub const MAX_INITIAL_TIMEOUT_SECS: u64 = 600;

/// Runtime configuration of a `MessageHandler`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessageHandlerConfig {
    /// Reply window reported as `TimeoutDirective::DefaultInitial`.
    pub default_initial_timeout_secs: u64,
    /// Inbound envelopes (plaintext or decrypted) larger than this are dropped.
    pub max_envelope_size: u64,
    /// Protection applied to handler replies.
    pub response_policy: SecurityPolicy,
    /// Require and check an envelope signature before invoking handlers.
    pub verify_signatures: bool,
    /// Drop envelopes that did not arrive encrypted.
    pub require_encryption: bool,
}

impl Default for MessageHandlerConfig {
    fn default() -> Self {
        Self {
            default_initial_timeout_secs: DEFAULT_INITIAL_TIMEOUT_SECS,
            max_envelope_size: DEFAULT_MAX_ENVELOPE_SIZE,
            response_policy: SecurityPolicy::NONE,
            verify_signatures: false,
            require_encryption: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    message_handler: MessageHandlerConfig,
}

impl MessageHandlerConfig {
    /// Reply window as a `Duration`.
    #[must_use]
    pub fn default_initial_timeout(&self) -> Duration {
        Duration::from_secs(self.default_initial_timeout_secs)
    }

    /// Check bounds.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_initial_timeout_secs == 0
            || self.default_initial_timeout_secs > MAX_INITIAL_TIMEOUT_SECS
        {
            return Err(ConfigError::Invalid(format!(
                "default_initial_timeout_secs must be in 1..={MAX_INITIAL_TIMEOUT_SECS}, got {}",
                self.default_initial_timeout_secs
            )));
        }

        if !(MIN_ENVELOPE_SIZE..=MAX_ENVELOPE_SIZE_LIMIT).contains(&self.max_envelope_size) {
            return Err(ConfigError::Invalid(format!(
                "max_envelope_size must be in {MIN_ENVELOPE_SIZE}..={MAX_ENVELOPE_SIZE_LIMIT}, got {}",
                self.max_envelope_size
            )));
        }

        Ok(())
    }

    /// Parse the `[message_handler]` table from TOML and validate it.
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` for malformed TOML or unknown keys,
    /// `ConfigError::Invalid` for out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.message_handler.validate()?;
        Ok(file.message_handler)
    }

    /// Load from a TOML file.
    ///
    /// # Errors
    ///
    /// `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}
