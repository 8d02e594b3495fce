//! Security wrapper: outbound protection and the inbound decode strategy.
//!
//! Outbound order is sign, serialize, encrypt. Inbound tries a plaintext
//! parse first and only falls back to decryption when that fails, so an
//! unencrypted envelope never costs a provider call.

use tracing::trace;

use crate::domain::{Envelope, MessageType, SecurityPolicy, SigningMode};
use crate::error::MessageError;
use crate::ports::Securifier;

/// An inbound envelope plus how it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unwrapped {
    /// The decoded envelope.
    pub envelope: Envelope,
    /// True when the plaintext parse failed and decryption produced it.
    pub was_encrypted: bool,
}

/// Build the wire bytes for `payload` under `policy`.
///
/// # Errors
///
/// - `MissingCryptoProvider` when protection is requested without a provider
/// - `Protection` when the provider fails to sign or encrypt
pub fn protect(
    msg_type: MessageType,
    payload: Vec<u8>,
    policy: SecurityPolicy,
    securifier: Option<&dyn Securifier>,
) -> Result<Vec<u8>, MessageError> {
    let securifier = match securifier {
        Some(securifier) => Some(securifier),
        None if policy.is_none() => None,
        None => return Err(MessageError::MissingCryptoProvider),
    };

    let mut envelope = Envelope::new(msg_type, payload);

    if let (Some(mode), Some(securifier)) = (policy.signing_mode(), securifier) {
        let input = envelope.signing_input();
        let signature = match mode {
            SigningMode::Plain => securifier.sign(&input),
            SigningMode::WithParameters => securifier.sign_with_parameters(&input),
        }
        .map_err(|e| MessageError::Protection(e.to_string()))?;
        envelope.message_signature = Some(signature);
    }

    let serialized = envelope.encode();
    if serialized.is_empty() {
        return Err(MessageError::Protection(format!(
            "{msg_type} envelope failed to serialize"
        )));
    }

    match securifier {
        Some(securifier) if policy.encrypts() => securifier
            .asymmetric_encrypt(&serialized)
            .map_err(|e| MessageError::Protection(e.to_string())),
        _ => Ok(serialized),
    }
}

/// Decode an inbound buffer, plaintext first, then via decryption.
///
/// # Errors
///
/// - `MissingCryptoProvider` when the plaintext parse fails and there is
///   no provider to try decryption with
/// - `Decrypt` when decryption fails
/// - `EnvelopeParse` when the decrypted bytes are not an envelope
pub fn unwrap_envelope(
    bytes: &[u8],
    securifier: Option<&dyn Securifier>,
    max_size: u64,
) -> Result<Unwrapped, MessageError> {
    let plaintext_err = match Envelope::decode(bytes, max_size) {
        Ok(envelope) => {
            trace!(len = bytes.len(), "plaintext envelope");
            return Ok(Unwrapped {
                envelope,
                was_encrypted: false,
            });
        }
        Err(e) => e,
    };

    let securifier = securifier.ok_or(MessageError::MissingCryptoProvider)?;
    trace!(
        len = bytes.len(),
        plaintext_error = %plaintext_err,
        "plaintext parse failed, trying decryption"
    );

    let decrypted = securifier
        .asymmetric_decrypt(bytes)
        .map_err(|e| MessageError::Decrypt(e.to_string()))?;

    Ok(Unwrapped {
        envelope: Envelope::decode(&decrypted, max_size)?,
        was_encrypted: true,
    })
}
