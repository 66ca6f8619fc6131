//! Fixed-capacity bump arena for rastgate.
//!
//! Every allocation the process makes comes from one [`Arena`]: a single
//! pre-sized byte region with a bump pointer. There is no per-allocation
//! free. Memory is handed back in bulk by rolling the bump pointer back to
//! a saved mark, normally through an [`ArenaScope`] guard.
//!
//! # Architecture
//!
//! ```text
//! Arena (one region, owned by the driver)
//! ├── ArenaSlice     (offset + len + generation handle)
//! ├── ArenaMark      (saved bump pointer)
//! ├── ArenaScope     (mark on open, rollback on drop)
//! └── BoundedLine    (fixed-size line buffer inside the region)
//! ```
//!
//! # Rollback safety
//!
//! Rollback never wipes memory, and slices are plain handles rather than
//! borrows. To keep released memory from silently aliasing the next
//! allocation, each rollback that lowers the bump pointer opens a new
//! generation, and access through a slice released that way fails with
//! [`ArenaError::StaleSlice`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod line;
pub mod scope;
pub mod slice;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::{ArenaConfig, ArenaConfigError};
pub use error::ArenaError;
pub use line::{BoundedLine, LineFill};
pub use scope::ArenaScope;
pub use slice::{ArenaMark, ArenaSlice};
