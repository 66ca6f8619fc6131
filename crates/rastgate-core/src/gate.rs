//! Interactive credential gate.
//!
//! [`CredentialGate`] prompts twice on an interactive channel and grants
//! access only when both answers are byte-for-byte identical. Both answers
//! live in arena line buffers opened inside an [`ArenaScope`], so they are
//! released (but not wiped) as soon as the check finishes, whatever its
//! outcome.
//!
//! This is a naive equality check, not authentication in any cryptographic
//! sense.
//!
//! [`ArenaScope`]: rastgate_arena::ArenaScope

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use rastgate_arena::{Arena, BoundedLine, LineFill};
use tracing::{debug, warn};

use crate::config::{GateConfig, TruncationPolicy};
use crate::error::GateError;

/// Opens the interactive channel the gate prompts on.
///
/// Any `FnMut() -> io::Result<S>` closure is a source, which is how tests
/// supply scripted terminals.
pub trait ChannelSource {
    /// The bidirectional stream returned by [`open`](Self::open).
    type Stream: Read + Write;

    /// Open the channel. Failure denies authentication outright.
    fn open(&mut self) -> io::Result<Self::Stream>;
}

impl<F, S> ChannelSource for F
where
    F: FnMut() -> io::Result<S>,
    S: Read + Write,
{
    type Stream = S;

    fn open(&mut self) -> io::Result<S> {
        self()
    }
}

/// The process's controlling terminal, opened read-write.
#[derive(Clone, Debug)]
pub struct TtySource {
    path: PathBuf,
}

impl TtySource {
    /// A source opening the device at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A source opening the device named in `config`.
    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.tty_path.clone())
    }

    /// The device path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for TtySource {
    fn default() -> Self {
        Self::new(GateConfig::DEFAULT_TTY_PATH)
    }
}

impl ChannelSource for TtySource {
    type Stream = File;

    fn open(&mut self) -> io::Result<File> {
        OpenOptions::new().read(true).write(true).open(&self.path)
    }
}

/// Two-prompt equality check in front of the image pipeline.
#[derive(Clone, Debug, Default)]
pub struct CredentialGate {
    config: GateConfig,
}

impl CredentialGate {
    /// Prompt written before the first line.
    pub const USER_PROMPT: &'static str = "User: ";

    /// Prompt written before the second line.
    pub const PASSWORD_PROMPT: &'static str = "Password: ";

    /// Create a gate with the given configuration.
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// The gate's configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Run the check. `Ok(())` grants access; every error is a denial.
    ///
    /// The arena's bump pointer is the same on return as on entry.
    pub fn authenticate<C>(&self, arena: &mut Arena, source: &mut C) -> Result<(), GateError>
    where
        C: ChannelSource + ?Sized,
    {
        let result = self.check(arena, source);
        match &result {
            Ok(()) => debug!("credential gate passed"),
            Err(e) => warn!(reason = %e, "credential gate denied"),
        }
        result
    }

    fn check<C>(&self, arena: &mut Arena, source: &mut C) -> Result<(), GateError>
    where
        C: ChannelSource + ?Sized,
    {
        let stream = source.open().map_err(GateError::ChannelUnavailable)?;
        let mut channel = BufReader::new(stream);
        let capacity = self.config.credential_capacity;

        let mut scope = arena.scope();
        debug!(start = scope.start(), capacity, "credential buffers scoped");

        let mut user = BoundedLine::allocate(&mut scope, capacity).map_err(GateError::Arena)?;
        prompt(&mut channel, Self::USER_PROMPT)?;
        // End of stream leaves the user field empty.
        let user_fill = user.fill(&mut scope, &mut channel).map_err(GateError::Io)?;

        let mut password =
            BoundedLine::allocate(&mut scope, capacity).map_err(GateError::Arena)?;
        prompt(&mut channel, Self::PASSWORD_PROMPT)?;
        let password_fill = password
            .fill(&mut scope, &mut channel)
            .map_err(GateError::Io)?;
        if password_fill == LineFill::Eof {
            return Err(GateError::MissingPassword);
        }

        if self.config.truncation == TruncationPolicy::Reject {
            if user_fill == LineFill::Truncated {
                return Err(GateError::CredentialTruncated { field: "user" });
            }
            if password_fill == LineFill::Truncated {
                return Err(GateError::CredentialTruncated { field: "password" });
            }
        }

        let user_bytes = user.contents(&scope).map_err(GateError::Arena)?;
        let password_bytes = password.contents(&scope).map_err(GateError::Arena)?;
        if user_bytes == password_bytes {
            Ok(())
        } else {
            Err(GateError::AuthMismatch)
        }
    }
}

fn prompt<S: Read + Write>(channel: &mut BufReader<S>, text: &str) -> Result<(), GateError> {
    let stream = channel.get_mut();
    stream.write_all(text.as_bytes()).map_err(GateError::Io)?;
    stream.flush().map_err(GateError::Io)
}
