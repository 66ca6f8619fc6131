//! Whole-line reads for the stdin protocol.
//!
//! Protocol lines are short, so they are read into an inline buffer that
//! only spills to the heap for unusually long input. A line is never split.

use std::io::{self, BufRead};

use smallvec::SmallVec;

/// Bytes kept inline before a line spills to the heap.
pub const LINE_INLINE_BYTES: usize = 256;

/// Buffer for one protocol line.
pub type LineBuf = SmallVec<[u8; LINE_INLINE_BYTES]>;

/// Replace `buf` with the next line from `reader`, `\n` included if present.
///
/// Returns `false` at end of stream with nothing read.
pub fn read_line<R: BufRead + ?Sized>(reader: &mut R, buf: &mut LineBuf) -> io::Result<bool> {
    buf.clear();
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(!buf.is_empty());
        }
        let (part, done) = match available.iter().position(|&b| b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (available.len(), false),
        };
        buf.extend_from_slice(&available[..part]);
        reader.consume(part);
        if done {
            return Ok(true);
        }
    }
}
