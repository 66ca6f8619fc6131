//! Fixed-capacity line buffers living in the arena.
//!
//! [`BoundedLine`] reads one line of text into an arena allocation of fixed
//! size. One byte of the allocation is reserved as terminator budget, so a
//! 32-byte line holds at most 31 bytes of content. Lines that do not fit are
//! cut and reported as [`LineFill::Truncated`]; the remainder of the line is
//! consumed so the next read starts on a fresh line.

use std::io::{self, BufRead};

use crate::arena::Arena;
use crate::error::ArenaError;
use crate::slice::ArenaSlice;

/// Outcome of [`BoundedLine::fill`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineFill {
    /// The whole line, including its `\n` if any, fit in the buffer.
    Complete,
    /// The line was longer than the usable capacity; only a prefix was kept.
    Truncated,
    /// End of stream before any byte was read. The buffer is empty.
    Eof,
}

/// One line of text held in an arena allocation.
#[derive(Clone, Copy, Debug)]
pub struct BoundedLine {
    slot: ArenaSlice,
    len: usize,
}

impl BoundedLine {
    /// Allocate a line buffer of `capacity` bytes from `arena`.
    ///
    /// The buffer starts empty. Its memory is not cleared; only the bytes
    /// written by [`fill`](Self::fill) are ever exposed.
    pub fn allocate(arena: &mut Arena, capacity: usize) -> Result<Self, ArenaError> {
        let slot = arena.allocate(capacity)?;
        Ok(Self { slot, len: 0 })
    }

    /// The arena allocation backing this line.
    pub fn slot(&self) -> ArenaSlice {
        self.slot
    }

    /// Size of the allocation in bytes.
    pub fn capacity(&self) -> usize {
        self.slot.len()
    }

    /// Maximum number of content bytes a fill can keep.
    pub fn usable(&self) -> usize {
        self.slot.len().saturating_sub(1)
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read one line from `reader` into the buffer.
    ///
    /// Bytes are kept up to and including the first `\n` while they fit in
    /// [`usable`](Self::usable). Anything past that point on the same line
    /// is read and dropped.
    pub fn fill<R: BufRead + ?Sized>(
        &mut self,
        arena: &mut Arena,
        reader: &mut R,
    ) -> io::Result<LineFill> {
        let usable = self.usable();
        let buf = arena.bytes_mut(&self.slot).map_err(io::Error::other)?;

        let mut len = 0;
        let mut read_any = false;
        let mut truncated = false;
        loop {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }
            read_any = true;

            let newline = available.iter().position(|&b| b == b'\n');
            let line_part = newline.map_or(available.len(), |pos| pos + 1);
            let keep = if truncated {
                0
            } else {
                line_part.min(usable - len)
            };
            buf[len..len + keep].copy_from_slice(&available[..keep]);
            len += keep;
            if keep < line_part {
                truncated = true;
            }
            reader.consume(line_part);
            if newline.is_some() {
                break;
            }
        }

        self.len = len;
        Ok(if !read_any {
            LineFill::Eof
        } else if truncated {
            LineFill::Truncated
        } else {
            LineFill::Complete
        })
    }

    /// The bytes held by the last fill.
    pub fn contents<'a>(&self, arena: &'a Arena) -> Result<&'a [u8], ArenaError> {
        Ok(&arena.bytes(&self.slot)?[..self.len])
    }
}
