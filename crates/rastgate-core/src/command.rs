//! Commands of the image line protocol.

use crate::error::RunError;
use crate::field::parse_uint;

/// One command line, parsed.
///
/// The first byte of a line is its opcode; the rest are
/// whitespace-terminated numeric fields.
///
/// # Examples
///
/// ```
/// use rastgate_core::Command;
///
/// let cmd = Command::parse(b"s1 2 ff\n").unwrap();
/// assert_eq!(cmd, Command::SetPixel { x: 1, y: 2, value: 0xff });
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Write one sample: `s<x> <y> <value-hex>`.
    ///
    /// `x` and `y` are decimal, `value` hexadecimal. The value is stored
    /// truncated to its low byte.
    SetPixel {
        /// Column.
        x: u64,
        /// Row.
        y: u64,
        /// Sample value as parsed, before truncation.
        value: u64,
    },
}

impl Command {
    /// Opcode of [`Command::SetPixel`].
    pub const SET_PIXEL: u8 = b's';

    /// Parse a single line, including its trailing `\n` if present.
    ///
    /// Unknown opcodes are [`RunError::Protocol`]; malformed fields are
    /// [`RunError::Parse`].
    pub fn parse(line: &[u8]) -> Result<Self, RunError> {
        match line.split_first() {
            Some((&Self::SET_PIXEL, fields)) => {
                let (x, rest) = parse_uint(fields, 10)?;
                let (y, rest) = parse_uint(rest, 10)?;
                let (value, _) = parse_uint(rest, 16)?;
                Ok(Self::SetPixel { x, y, value })
            }
            _ => Err(RunError::Protocol {
                line: String::from_utf8_lossy(line).into_owned(),
            }),
        }
    }
}
