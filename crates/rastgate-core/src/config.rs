//! Gate configuration, validation, and error types.
//!
//! There is no user-facing configuration surface: these structs carry the
//! fixed parameters of a run with their defaults, so components can be
//! exercised in isolation with different values.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use rastgate_arena::ArenaConfigError;

// ── TruncationPolicy ──────────────────────────────────────────────

/// What the gate does with a credential line longer than its buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TruncationPolicy {
    /// Deny authentication if either line was cut.
    #[default]
    Reject,
    /// Compare the kept prefixes as if they were the whole lines.
    Accept,
}

// ── GateConfig ────────────────────────────────────────────────────

/// Configuration for the [`CredentialGate`](crate::gate::CredentialGate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateConfig {
    /// Terminal device opened by [`TtySource`](crate::gate::TtySource).
    /// Default: `/dev/tty`.
    pub tty_path: PathBuf,
    /// Size in bytes of each credential buffer, terminator budget included.
    /// Default: 32 (31 usable bytes).
    pub credential_capacity: usize,
    /// Handling of over-long credential lines. Default: reject.
    pub truncation: TruncationPolicy,
}

impl GateConfig {
    /// Default terminal device.
    pub const DEFAULT_TTY_PATH: &'static str = "/dev/tty";

    /// Default credential buffer size in bytes.
    pub const DEFAULT_CREDENTIAL_CAPACITY: usize = 32;

    /// Smallest buffer that can hold one content byte.
    pub const MIN_CREDENTIAL_CAPACITY: usize = 2;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credential_capacity < Self::MIN_CREDENTIAL_CAPACITY {
            return Err(ConfigError::CredentialCapacityTooSmall {
                configured: self.credential_capacity,
            });
        }
        Ok(())
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            tty_path: PathBuf::from(Self::DEFAULT_TTY_PATH),
            credential_capacity: Self::DEFAULT_CREDENTIAL_CAPACITY,
            truncation: TruncationPolicy::default(),
        }
    }
}

// ── ConfigError ───────────────────────────────────────────────────

/// Errors detected while validating run configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Arena configuration is invalid.
    Arena(ArenaConfigError),
    /// Credential buffers cannot hold any content.
    CredentialCapacityTooSmall {
        /// The configured size that was too small.
        configured: usize,
    },
    /// The header magic is empty, so any line would pass as a header.
    EmptyHeaderMagic,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::CredentialCapacityTooSmall { configured } => write!(
                f,
                "credential capacity must be at least {} bytes (got {configured})",
                GateConfig::MIN_CREDENTIAL_CAPACITY
            ),
            Self::EmptyHeaderMagic => write!(f, "header magic must not be empty"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaConfigError> for ConfigError {
    fn from(e: ArenaConfigError) -> Self {
        Self::Arena(e)
    }
}
