//! Configuration for one end-to-end run.

use rastgate_arena::ArenaConfig;
use rastgate_core::{ConfigError, GateConfig, HEADER_MAGIC};

/// Everything [`run`](crate::run) needs besides its streams.
///
/// The binary always uses [`RunConfig::default`]; the fields exist so tests
/// and embedders can shrink the arena or change the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Backing region for credentials and the image.
    pub arena: ArenaConfig,
    /// Credential gate parameters.
    pub gate: GateConfig,
    /// Prefix the header line must start with. Default: `"V2 "`.
    pub header_magic: String,
}

impl RunConfig {
    /// Check every nested configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()?;
        self.gate.validate()?;
        if self.header_magic.is_empty() {
            return Err(ConfigError::EmptyHeaderMagic);
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            gate: GateConfig::default(),
            header_magic: HEADER_MAGIC.to_string(),
        }
    }
}
