//! Arena configuration parameters.

use std::fmt;

/// Configuration for the process arena.
///
/// The arena is a single fixed region sized once at construction; there is
/// no growth path, so the capacity here is the hard ceiling for every
/// allocation the process makes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the backing region in bytes.
    ///
    /// Default: 16_777_216 (16 MiB). Must be at least
    /// [`MIN_CAPACITY_BYTES`](Self::MIN_CAPACITY_BYTES).
    pub capacity_bytes: usize,
}

impl ArenaConfig {
    /// Default region size: 16 MiB.
    pub const DEFAULT_CAPACITY_BYTES: usize = 16 * 1024 * 1024;

    /// Smallest region accepted by [`validate`](Self::validate).
    ///
    /// An empty region can never satisfy an allocation (not even a
    /// zero-byte one), so at least one byte is required.
    pub const MIN_CAPACITY_BYTES: usize = 1;

    /// Create a config with the given region size.
    pub fn new(capacity_bytes: usize) -> Self {
        Self { capacity_bytes }
    }

    /// Check the configuration for values the arena cannot work with.
    pub fn validate(&self) -> Result<(), ArenaConfigError> {
        if self.capacity_bytes < Self::MIN_CAPACITY_BYTES {
            return Err(ArenaConfigError::CapacityTooSmall {
                capacity_bytes: self.capacity_bytes,
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY_BYTES)
    }
}

/// Rejected [`ArenaConfig`] values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaConfigError {
    /// The region is smaller than [`ArenaConfig::MIN_CAPACITY_BYTES`].
    CapacityTooSmall {
        /// The configured size.
        capacity_bytes: usize,
    },
}

impl fmt::Display for ArenaConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityTooSmall { capacity_bytes } => write!(
                f,
                "arena capacity must be at least {} bytes (got {capacity_bytes})",
                ArenaConfig::MIN_CAPACITY_BYTES
            ),
        }
    }
}

impl std::error::Error for ArenaConfigError {}
