//! Reusable input fixtures.
//!
//! Builders for the stdin protocol and the raster it should produce:
//!
//! - [`ImageScript`]: a header plus command lines, rendered to bytes.
//! - [`expected_raster`]: the `P2` text for a given pixel grid.

use std::fmt::Write as _;

/// A header line followed by command lines, built up fluently.
#[derive(Clone, Debug)]
pub struct ImageScript {
    text: String,
}

impl ImageScript {
    /// Start a script with the header `V2 <width> <height>\n`.
    pub fn new(width: u64, height: u64) -> Self {
        Self {
            text: format!("V2 {width} {height}\n"),
        }
    }

    /// Append `s<x> <y> <value-hex>\n`.
    pub fn set(mut self, x: u64, y: u64, value: u64) -> Self {
        let _ = writeln!(self.text, "s{x} {y} {value:x}");
        self
    }

    /// Append a raw line; `\n` is added.
    pub fn line(mut self, line: &str) -> Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    /// The script as stdin bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.text.into_bytes()
    }
}

/// Render the `P2` text the formatter should emit for `pixels`.
pub fn expected_raster(width: usize, height: usize, pixels: &[u8]) -> String {
    assert_eq!(pixels.len(), width * height, "pixel count mismatch");
    let mut out = format!("P2\n{width} {height} 255\n");
    for row in pixels.chunks(width.max(1)).take(height) {
        for &p in row {
            let _ = write!(out, "{p} ");
        }
        out.push('\n');
    }
    // Zero-width images still print one empty line per row.
    if width == 0 {
        for _ in 0..height {
            out.push('\n');
        }
    }
    out
}
