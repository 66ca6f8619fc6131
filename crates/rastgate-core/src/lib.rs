//! Core of the rastgate batch rasteriser.
//!
//! Everything between the arena and the binary lives here: the credential
//! gate, the stdin line protocol (header, numeric fields, commands), the
//! interpreter that mutates the image, and the `P2` formatter. All
//! allocation goes through a caller-owned [`rastgate_arena::Arena`].
//!
//! # Pipeline
//!
//! ```text
//! CredentialGate::authenticate   (two prompts, arena scope, equality check)
//!   → Image::read_header         ("V2 <w> <h>", checked w*h, zeroed pixels)
//!   → Interpreter::run           ("s<x> <y> <hex>" lines until end of stream)
//!   → raster::write_image        ("P2" text)
//! ```
//!
//! Every failure is a [`RunError`] returned to the caller; nothing here
//! exits the process.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod config;
pub mod error;
pub mod field;
pub mod gate;
pub mod image;
pub mod interpret;
pub mod line;
pub mod raster;

pub use command::Command;
pub use config::{ConfigError, GateConfig, TruncationPolicy};
pub use error::{FormatError, GateError, ParseError, RunError};
pub use field::parse_uint;
pub use gate::{ChannelSource, CredentialGate, TtySource};
pub use image::{Image, HEADER_MAGIC};
pub use interpret::{InterpretStats, Interpreter};
pub use raster::{write_image, write_raster};
