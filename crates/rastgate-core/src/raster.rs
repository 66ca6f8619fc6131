//! Plain-text PGM (`P2`) output.

use std::io::{self, BufWriter, Write};

use rastgate_arena::Arena;

use crate::error::RunError;
use crate::image::Image;

/// Magic line of the output format.
pub const RASTER_MAGIC: &str = "P2";

/// Largest sample value, written in the header.
pub const MAX_SAMPLE: u8 = u8::MAX;

/// Write `pixels` as a `P2` raster.
///
/// Emits `P2`, then `<width> <height> 255`, then one line per row with each
/// sample followed by a single space. Rows run top to bottom, samples left
/// to right. Output is buffered and flushed once at the end.
///
/// # Panics
///
/// Panics if `pixels.len() != width * height`.
pub fn write_raster<W: Write>(
    out: W,
    width: usize,
    height: usize,
    pixels: &[u8],
) -> io::Result<()> {
    assert_eq!(pixels.len(), width * height, "pixel buffer size mismatch");

    let mut out = BufWriter::new(out);
    writeln!(out, "{RASTER_MAGIC}")?;
    writeln!(out, "{width} {height} {MAX_SAMPLE}")?;
    for y in 0..height {
        for sample in &pixels[y * width..(y + 1) * width] {
            write!(out, "{sample} ")?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Write `image` from `arena` as a `P2` raster.
pub fn write_image<W: Write>(out: W, image: &Image, arena: &Arena) -> Result<(), RunError> {
    let pixels = image.pixels(arena)?;
    write_raster(out, image.width(), image.height(), pixels)?;
    Ok(())
}
