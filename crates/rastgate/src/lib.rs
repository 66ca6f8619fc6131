//! Rastgate: a credential-gated batch rasteriser backed by a bump arena.
//!
//! This is the top-level facade crate. It re-exports the public API of the
//! sub-crates and adds the [`run`] driver that wires them into one
//! pipeline, which is what the `rastgate` binary calls.
//!
//! # Quick start
//!
//! ```rust
//! use std::io::{self, Cursor, Read, Write};
//! use rastgate::prelude::*;
//!
//! // A terminal that answers both prompts with the same line and discards
//! // the prompts.
//! struct Answers(Cursor<&'static [u8]>);
//!
//! impl Read for Answers {
//!     fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
//!         self.0.read(buf)
//!     }
//! }
//!
//! impl Write for Answers {
//!     fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
//!         Ok(buf.len())
//!     }
//!     fn flush(&mut self) -> io::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut terminal = || -> io::Result<Answers> {
//!     Ok(Answers(Cursor::new(&b"alice\nalice\n"[..])))
//! };
//! let input = Cursor::new(b"V2 3 1\ns1 0 ff\n".to_vec());
//! let mut output = Vec::new();
//!
//! let summary = run(&RunConfig::default(), &mut terminal, input, &mut output).unwrap();
//! assert_eq!(summary.stats.applied, 1);
//! assert_eq!(output, b"P2\n3 1 255\n0 255 0 \n");
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `rastgate-arena` | Bump arena, scoped rollback, line buffers |
//! | [`pipeline`] | `rastgate-core` | Gate, header, interpreter, raster output, errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod config;
mod run;

pub use config::RunConfig;
pub use run::{run, RunSummary};

/// Bump arena and scoped rollback (`rastgate-arena`).
///
/// Most users only need [`arena::Arena`] and [`arena::ArenaConfig`], which
/// are also in the [`prelude`].
pub use rastgate_arena as arena;

/// Gate, protocol, interpreter, and output (`rastgate-core`).
///
/// The stages [`run`] chains together are usable on their own:
/// [`pipeline::CredentialGate`], [`pipeline::Image`],
/// [`pipeline::Interpreter`], and [`pipeline::write_image`].
pub use rastgate_core as pipeline;

/// Common imports for typical rastgate usage.
///
/// ```rust
/// use rastgate::prelude::*;
/// ```
pub mod prelude {
    // Driver
    pub use crate::{run, RunConfig, RunSummary};

    // Arena
    pub use rastgate_arena::{Arena, ArenaConfig, ArenaError};

    // Pipeline stages
    pub use rastgate_core::{
        ChannelSource, Command, CredentialGate, GateConfig, Image, InterpretStats, Interpreter,
        TruncationPolicy, TtySource,
    };

    // Errors
    pub use rastgate_core::{ConfigError, FormatError, GateError, ParseError, RunError};
}
