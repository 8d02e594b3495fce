//! Outbound security policy flags.
//!
//! Flags combine with `|`. At most one signing mode applies per envelope and
//! `SIGN` is checked before `SIGN_WITH_PARAMETERS`, so setting both yields a
//! plain signature. `ASYMMETRIC_ENCRYPT` wraps the already-signed envelope.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::Deserialize;

/// Bit-flag protection policy for an outbound envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "Vec<PolicyFlag>")]
pub struct SecurityPolicy(u8);

/// Signing mode selected by a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningMode {
    /// `Securifier::sign`
    Plain,
    /// `Securifier::sign_with_parameters`
    WithParameters,
}

/// Config-file spelling of a single policy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyFlag {
    /// See [`SecurityPolicy::SIGN`].
    Sign,
    /// See [`SecurityPolicy::SIGN_WITH_PARAMETERS`].
    SignWithParameters,
    /// See [`SecurityPolicy::ASYMMETRIC_ENCRYPT`].
    AsymmetricEncrypt,
}

impl SecurityPolicy {
    /// No protection.
    pub const NONE: Self = Self(0);
    /// Sign the envelope.
    pub const SIGN: Self = Self(1);
    /// Sign the envelope with the provider's parameterized variant.
    pub const SIGN_WITH_PARAMETERS: Self = Self(1 << 1);
    /// Encrypt the serialized envelope to the peer.
    pub const ASYMMETRIC_ENCRYPT: Self = Self(1 << 2);

    const ALL_BITS: u8 = 0b111;

    /// True if every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when no protection is requested.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Signing mode that takes effect, `SIGN` first.
    #[must_use]
    pub const fn signing_mode(self) -> Option<SigningMode> {
        if self.contains(Self::SIGN) {
            Some(SigningMode::Plain)
        } else if self.contains(Self::SIGN_WITH_PARAMETERS) {
            Some(SigningMode::WithParameters)
        } else {
            None
        }
    }

    /// True when the serialized envelope must be encrypted.
    #[must_use]
    pub const fn encrypts(self) -> bool {
        self.contains(Self::ASYMMETRIC_ENCRYPT)
    }

    /// All eight flag combinations, `NONE` first.
    pub fn combinations() -> impl Iterator<Item = Self> {
        (0..=Self::ALL_BITS).map(Self)
    }
}

impl BitOr for SecurityPolicy {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SecurityPolicy {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<PolicyFlag> for SecurityPolicy {
    fn from(flag: PolicyFlag) -> Self {
        match flag {
            PolicyFlag::Sign => Self::SIGN,
            PolicyFlag::SignWithParameters => Self::SIGN_WITH_PARAMETERS,
            PolicyFlag::AsymmetricEncrypt => Self::ASYMMETRIC_ENCRYPT,
        }
    }
}

impl FromIterator<PolicyFlag> for SecurityPolicy {
    fn from_iter<I: IntoIterator<Item = PolicyFlag>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::NONE, |policy, flag| policy | Self::from(flag))
    }
}

impl From<Vec<PolicyFlag>> for SecurityPolicy {
    fn from(flags: Vec<PolicyFlag>) -> Self {
        flags.into_iter().collect()
    }
}

impl fmt::Display for SecurityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "NONE");
        }
        let names = [
            (Self::SIGN, "SIGN"),
            (Self::SIGN_WITH_PARAMETERS, "SIGN_WITH_PARAMETERS"),
            (Self::ASYMMETRIC_ENCRYPT, "ASYMMETRIC_ENCRYPT"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}
