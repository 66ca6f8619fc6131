//! The fixed-region bump allocator.
//!
//! An [`Arena`] owns one contiguous byte region and a bump pointer (`top`).
//! Allocation advances `top`; [`Arena::rollback`] moves it back to a saved
//! [`ArenaMark`], releasing everything allocated since in one step. There
//! is no per-allocation free and no record of individual allocation sizes.

use std::fmt;

use tracing::trace;

use crate::config::{ArenaConfig, ArenaConfigError};
use crate::error::ArenaError;
use crate::scope::ArenaScope;
use crate::slice::{ArenaMark, ArenaSlice};

/// Bump allocator over a single pre-sized byte region.
///
/// Invariant: `0 <= top <= capacity` at all times.
///
/// Released memory is never wiped: bytes written before a rollback remain
/// in the region and are visible through the next allocation that covers
/// them. Callers that need zeroed memory use
/// [`allocate_zeroed`](Self::allocate_zeroed).
pub struct Arena {
    /// Backing storage. Sized once at construction, never grows.
    region: Box<[u8]>,
    /// Bump pointer: next free offset.
    top: usize,
    /// Number of rollbacks that have lowered `top`.
    generation: u64,
    /// `(generation, floor)` for rollbacks that lowered `top`, oldest first.
    ///
    /// Floors are strictly increasing: a rollback drops every entry at or
    /// above its own floor, since it releases at least as much. The lowest
    /// floor reached after generation `g` is therefore the first entry with
    /// a generation above `g`, and the stack never holds more entries than
    /// the region has bytes.
    floors: Vec<(u64, usize)>,
}

impl Arena {
    /// Wrap a caller-supplied region. The bump pointer starts at offset 0.
    pub fn new(region: Box<[u8]>) -> Self {
        Self {
            region,
            top: 0,
            generation: 0,
            floors: Vec::new(),
        }
    }

    /// Create an arena over a fresh zero-filled region of `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(vec![0u8; capacity].into_boxed_slice())
    }

    /// Create an arena sized by `config`, validating it first.
    pub fn from_config(config: &ArenaConfig) -> Result<Self, ArenaConfigError> {
        config.validate()?;
        Ok(Self::with_capacity(config.capacity_bytes))
    }

    /// Bump-allocate `size` bytes.
    ///
    /// Succeeds only if the remaining capacity is strictly greater than
    /// `size`: a request that would consume the region exactly is refused.
    /// The returned memory is not initialised and may hold bytes from
    /// released allocations.
    pub fn allocate(&mut self, size: usize) -> Result<ArenaSlice, ArenaError> {
        let remaining = self.remaining();
        if remaining <= size {
            return Err(ArenaError::CapacityExceeded {
                requested: size,
                remaining,
            });
        }
        let slice = ArenaSlice::new(self.generation(), self.top, size);
        self.top += size;
        trace!(offset = slice.offset, len = size, top = self.top, "arena allocate");
        Ok(slice)
    }

    /// Bump-allocate `size` bytes and zero them.
    pub fn allocate_zeroed(&mut self, size: usize) -> Result<ArenaSlice, ArenaError> {
        let slice = self.allocate(size)?;
        self.region[slice.offset..slice.end()].fill(0);
        Ok(slice)
    }

    /// Capture the current bump pointer.
    pub fn mark(&self) -> ArenaMark {
        ArenaMark { offset: self.top }
    }

    /// Move the bump pointer to `mark`, releasing every allocation made at
    /// or after it.
    ///
    /// The caller must not use slices allocated at or after `mark` once
    /// this returns; the arena enforces that by failing later accesses with
    /// [`ArenaError::StaleSlice`] rather than letting them alias new
    /// allocations. Released bytes are left in place.
    ///
    /// Prefer [`scope`](Self::scope), which pairs the mark and the rollback
    /// in one owner.
    pub fn rollback(&mut self, mark: ArenaMark) -> Result<(), ArenaError> {
        if mark.offset > self.region.len() {
            return Err(ArenaError::InvalidMark {
                offset: mark.offset,
                capacity: self.region.len(),
            });
        }
        if mark.offset < self.top {
            self.generation += 1;
            while self
                .floors
                .last()
                .is_some_and(|&(_, floor)| floor >= mark.offset)
            {
                self.floors.pop();
            }
            self.floors.push((self.generation, mark.offset));
        }
        trace!(from = self.top, to = mark.offset, "arena rollback");
        self.top = mark.offset;
        Ok(())
    }

    /// Open a scope that rolls the arena back to the current mark when
    /// dropped.
    pub fn scope(&mut self) -> ArenaScope<'_> {
        ArenaScope::new(self)
    }

    /// Shared view of a live allocation.
    pub fn bytes(&self, slice: &ArenaSlice) -> Result<&[u8], ArenaError> {
        self.check_live(slice)?;
        Ok(&self.region[slice.offset..slice.end()])
    }

    /// Mutable view of a live allocation.
    pub fn bytes_mut(&mut self, slice: &ArenaSlice) -> Result<&mut [u8], ArenaError> {
        self.check_live(slice)?;
        Ok(&mut self.region[slice.offset..slice.end()])
    }

    /// Whether `slice` still refers to memory this arena has not released.
    pub fn is_live(&self, slice: &ArenaSlice) -> bool {
        self.check_live(slice).is_ok()
    }

    /// Total size of the region in bytes.
    pub fn capacity(&self) -> usize {
        self.region.len()
    }

    /// Bytes between the start of the region and the bump pointer.
    pub fn used(&self) -> usize {
        self.top
    }

    /// Bytes between the bump pointer and the end of the region.
    pub fn remaining(&self) -> usize {
        self.region.len() - self.top
    }

    /// Number of rollbacks that have lowered the bump pointer.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn check_live(&self, slice: &ArenaSlice) -> Result<(), ArenaError> {
        let stale = || ArenaError::StaleSlice {
            offset: slice.offset,
            len: slice.len,
            slice_generation: slice.generation,
            current: self.generation(),
        };
        let end = slice.offset.checked_add(slice.len).ok_or_else(stale)?;
        if end > self.region.len() {
            return Err(stale());
        }
        if slice.generation > self.generation {
            return Err(stale());
        }
        let first_later = self
            .floors
            .partition_point(|&(generation, _)| generation <= slice.generation);
        match self.floors.get(first_later) {
            Some(&(_, floor)) if floor < end => Err(stale()),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.region.len())
            .field("top", &self.top)
            .field("generation", &self.generation())
            .finish()
    }
}
