//! Error types for rastgate.
//!
//! Organised by subsystem: numeric field parsing, image header validation,
//! the credential gate, and the top-level [`RunError`] every fatal
//! condition funnels into. Nothing in this crate terminates the process;
//! the binary maps a `RunError` to its exit status.

use std::error::Error;
use std::fmt;
use std::io;

use rastgate_arena::ArenaError;

use crate::config::ConfigError;

/// Errors from [`parse_uint`](crate::field::parse_uint).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// No digit valid in the requested radix at the cursor.
    NoDigits {
        /// The byte found instead, or `None` at end of input.
        found: Option<u8>,
    },
    /// The digits were not followed by whitespace.
    BadTerminator {
        /// The byte found after the digits, or `None` at end of input.
        found: Option<u8>,
    },
    /// The value does not fit in a `u64`.
    Overflow,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDigits { .. } => write!(f, "expected an integer"),
            Self::BadTerminator { found: Some(b) } => {
                write!(f, "invalid character '{}'", b.escape_ascii())
            }
            Self::BadTerminator { found: None } => {
                write!(f, "integer not terminated by whitespace")
            }
            Self::Overflow => write!(f, "integer out of range"),
        }
    }
}

impl Error for ParseError {}

/// Errors validating the image header line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// The input ended before a header line was read.
    MissingHeader,
    /// The header line does not start with the expected magic.
    BadMagic {
        /// The magic the reader was configured with.
        expected: String,
    },
    /// `width * height` does not fit in the address space.
    DimensionOverflow {
        /// Parsed width.
        width: u64,
        /// Parsed height.
        height: u64,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "header read error"),
            Self::BadMagic { expected } => {
                write!(f, "bad header magic (expected {:?})", expected)
            }
            Self::DimensionOverflow { width, height } => {
                write!(f, "image dimensions {width}x{height} overflow")
            }
        }
    }
}

impl Error for FormatError {}

/// Reasons the credential gate denies access.
#[derive(Debug)]
pub enum GateError {
    /// The interactive channel could not be opened.
    ChannelUnavailable(io::Error),
    /// The arena could not supply or resolve a credential buffer.
    Arena(ArenaError),
    /// The password prompt reached end of stream without input.
    MissingPassword,
    /// A credential line exceeded the buffer and truncation is rejected.
    CredentialTruncated {
        /// Which prompt overflowed (`"user"` or `"password"`).
        field: &'static str,
    },
    /// The two lines differ.
    AuthMismatch,
    /// Reading from or writing to the open channel failed.
    Io(io::Error),
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelUnavailable(e) => write!(f, "terminal unavailable: {e}"),
            Self::Arena(e) => write!(f, "credential buffer unavailable: {e}"),
            Self::MissingPassword => write!(f, "no password entered"),
            Self::CredentialTruncated { field } => {
                write!(f, "{field} exceeds the credential buffer")
            }
            Self::AuthMismatch => write!(f, "credentials do not match"),
            Self::Io(e) => write!(f, "terminal I/O error: {e}"),
        }
    }
}

impl Error for GateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ChannelUnavailable(e) | Self::Io(e) => Some(e),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

/// Every fatal condition of a run.
///
/// None of these is recovered locally. They propagate to a single
/// top-level handler that reports the message and picks the exit status.
#[derive(Debug)]
pub enum RunError {
    /// The run configuration failed validation.
    Config(ConfigError),
    /// Authentication was denied.
    Gate(GateError),
    /// The image header is missing, malformed, or describes an
    /// unrepresentable size.
    Format(FormatError),
    /// A numeric field in the header or a command is malformed.
    Parse(ParseError),
    /// The arena could not satisfy an allocation.
    Memory(ArenaError),
    /// A command line starts with an unknown opcode.
    Protocol {
        /// The offending line, lossily decoded.
        line: String,
    },
    /// Reading input or writing output failed.
    Io(io::Error),
}

impl RunError {
    /// Short classification used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Gate(GateError::ChannelUnavailable(_)) => "channel_unavailable",
            Self::Gate(_) => "auth_failure",
            Self::Format(_) => "format_error",
            Self::Parse(_) => "parse_error",
            Self::Memory(_) => "memory_error",
            Self::Protocol { .. } => "protocol_error",
            Self::Io(_) => "io_error",
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Gate(e) => write!(f, "authentication failure: {e}"),
            Self::Format(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Memory(e) => write!(f, "not enough memory: {e}"),
            Self::Protocol { line } => write!(f, "bad command: {}", line.trim_end()),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Gate(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Memory(e) => Some(e),
            Self::Protocol { .. } => None,
            Self::Io(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GateError> for RunError {
    fn from(e: GateError) -> Self {
        Self::Gate(e)
    }
}

impl From<FormatError> for RunError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<ParseError> for RunError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ArenaError> for RunError {
    fn from(e: ArenaError) -> Self {
        Self::Memory(e)
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
