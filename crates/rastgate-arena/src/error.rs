//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The request does not leave at least one byte of headroom.
    ///
    /// Allocation requires `remaining > requested`, so a request equal to
    /// the remaining capacity also lands here.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes between the bump pointer and the end of the region.
        remaining: usize,
    },
    /// A rollback mark lies outside this arena's region.
    InvalidMark {
        /// Offset carried by the mark.
        offset: usize,
        /// Capacity of the arena that rejected it.
        capacity: usize,
    },
    /// An [`ArenaSlice`](crate::ArenaSlice) whose memory was released by a
    /// later rollback.
    StaleSlice {
        /// Start offset of the slice.
        offset: usize,
        /// Length of the slice in bytes.
        len: usize,
        /// The generation encoded in the slice.
        slice_generation: u64,
        /// The arena's current generation.
        current: u64,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::InvalidMark { offset, capacity } => {
                write!(
                    f,
                    "rollback mark at offset {offset} is outside arena of {capacity} bytes"
                )
            }
            Self::StaleSlice {
                offset,
                len,
                slice_generation,
                current,
            } => {
                write!(
                    f,
                    "stale slice: {len} bytes at offset {offset} from generation \
                     {slice_generation}, arena at generation {current}"
                )
            }
        }
    }
}

impl Error for ArenaError {}
