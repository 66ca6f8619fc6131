//! Allocation handles and rollback marks.
//!
//! An [`ArenaSlice`] encodes where an allocation lives within the arena. It
//! is generation-scoped: the `generation` field lets the arena detect
//! handles whose memory was handed back by a rollback.

use std::fmt;

/// Location of an allocation within an [`Arena`](crate::Arena).
///
/// Slices carry no borrow of the arena; the bytes are reached through
/// [`Arena::bytes`](crate::Arena::bytes) and
/// [`Arena::bytes_mut`](crate::Arena::bytes_mut), which reject slices
/// released by a later rollback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaSlice {
    /// Arena generation when this allocation was made.
    pub(crate) generation: u64,
    /// Byte offset from the start of the region.
    pub(crate) offset: usize,
    /// Length of the allocation in bytes.
    pub(crate) len: usize,
}

impl ArenaSlice {
    pub(crate) fn new(generation: u64, offset: usize, len: usize) -> Self {
        Self {
            generation,
            offset,
            len,
        }
    }

    /// The generation this slice belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Byte offset of the first byte of the allocation.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the allocation in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte of the allocation.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// A mark at the start of this allocation.
    ///
    /// Rolling back to it releases this allocation and everything made
    /// after it.
    pub fn mark(&self) -> ArenaMark {
        ArenaMark {
            offset: self.offset,
        }
    }
}

impl fmt::Display for ArenaSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArenaSlice(gen={}, off={}, len={})",
            self.generation, self.offset, self.len
        )
    }
}

/// A saved bump-pointer position.
///
/// Produced by [`Arena::mark`](crate::Arena::mark) or
/// [`ArenaSlice::mark`]; consumed by [`Arena::rollback`](crate::Arena::rollback).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArenaMark {
    pub(crate) offset: usize,
}

impl ArenaMark {
    /// The saved offset.
    pub fn offset(&self) -> usize {
        self.offset
    }
}
