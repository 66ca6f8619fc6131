//! The image store: header validation and the arena-backed pixel buffer.

use std::io::BufRead;

use rastgate_arena::{Arena, ArenaError, ArenaSlice};
use tracing::debug;

use crate::error::{FormatError, RunError};
use crate::field::parse_uint;
use crate::line::{read_line, LineBuf};

/// Header magic expected at the start of the input stream.
pub const HEADER_MAGIC: &str = "V2 ";

/// A `width × height` grayscale image whose samples live in the arena.
///
/// Samples are row-major, one byte each, zero-initialised at allocation.
/// The image is never resized or freed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: ArenaSlice,
}

impl Image {
    /// Allocate a zeroed `width × height` image from `arena`.
    ///
    /// The sample count is computed with checked arithmetic; a product that
    /// does not fit is a [`FormatError::DimensionOverflow`], never a wrapped
    /// small allocation.
    pub fn allocate(arena: &mut Arena, width: u64, height: u64) -> Result<Self, RunError> {
        let overflow = || FormatError::DimensionOverflow { width, height };
        let count = width.checked_mul(height).ok_or_else(overflow)?;
        let count = usize::try_from(count).map_err(|_| overflow())?;
        let w = usize::try_from(width).map_err(|_| overflow())?;
        let h = usize::try_from(height).map_err(|_| overflow())?;

        let pixels = arena.allocate_zeroed(count)?;
        debug!(width = w, height = h, offset = pixels.offset(), "image allocated");
        Ok(Self {
            width: w,
            height: h,
            pixels,
        })
    }

    /// Read the header line from `reader` and allocate the image it
    /// describes.
    ///
    /// The line must start with `magic`, followed by decimal `width` and
    /// `height` fields, each terminated by whitespace. Anything after the
    /// height is ignored.
    pub fn read_header<R: BufRead + ?Sized>(
        reader: &mut R,
        arena: &mut Arena,
        magic: &str,
    ) -> Result<Self, RunError> {
        let mut line = LineBuf::new();
        if !read_line(reader, &mut line)? {
            return Err(FormatError::MissingHeader.into());
        }
        Self::from_header(&line, arena, magic)
    }

    /// Parse an already-read header line and allocate the image.
    pub fn from_header(line: &[u8], arena: &mut Arena, magic: &str) -> Result<Self, RunError> {
        let fields = line
            .strip_prefix(magic.as_bytes())
            .ok_or_else(|| FormatError::BadMagic {
                expected: magic.to_string(),
            })?;
        let (width, rest) = parse_uint(fields, 10)?;
        let (height, _) = parse_uint(rest, 10)?;
        Self::allocate(arena, width, height)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the image has no samples.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major index of `(x, y)`, or `None` if it lies outside the image.
    pub fn index(&self, x: u64, y: u64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// The samples, row-major.
    pub fn pixels<'a>(&self, arena: &'a Arena) -> Result<&'a [u8], ArenaError> {
        arena.bytes(&self.pixels)
    }

    /// Mutable samples, row-major.
    pub fn pixels_mut<'a>(&self, arena: &'a mut Arena) -> Result<&'a mut [u8], ArenaError> {
        arena.bytes_mut(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rastgate_test_utils::arena_with_remaining;

    use super::*;
    use crate::error::ParseError;

    #[test]
    fn header_allocates_zeroed_image() {
        let mut arena = Arena::with_capacity(1024);
        // Dirty the region so zeroing is observable.
        let junk = arena.allocate(64).unwrap();
        arena.bytes_mut(&junk).unwrap().fill(0xEE);
        arena.rollback(junk.mark()).unwrap();

        let image = Image::from_header(b"V2 4 3\n", &mut arena, HEADER_MAGIC).unwrap();
        assert_eq!((image.width(), image.height()), (4, 3));
        assert_eq!(image.len(), 12);
        assert!(image.pixels(&arena).unwrap().iter().all(|&p| p == 0));
    }

    #[test]
    fn read_header_consumes_one_line() {
        let mut arena = Arena::with_capacity(1024);
        let mut input = Cursor::new(b"V2 2 2\ns0 0 1\n".to_vec());
        let image = Image::read_header(&mut input, &mut arena, HEADER_MAGIC).unwrap();
        assert_eq!(image.len(), 4);
        assert_eq!(input.position(), 7);
    }

    #[test]
    fn empty_input_is_missing_header() {
        let mut arena = Arena::with_capacity(1024);
        let mut input = Cursor::new(Vec::new());
        assert!(matches!(
            Image::read_header(&mut input, &mut arena, HEADER_MAGIC),
            Err(RunError::Format(FormatError::MissingHeader))
        ));
    }

    #[test]
    fn wrong_magic_rejected() {
        let mut arena = Arena::with_capacity(1024);
        for line in [&b"P2 4 3\n"[..], b"V2\n", b"v2 4 3\n", b"V24 3\n"] {
            assert!(matches!(
                Image::from_header(line, &mut arena, HEADER_MAGIC),
                Err(RunError::Format(FormatError::BadMagic { .. }))
            ));
        }
    }

    #[test]
    fn malformed_dimension_is_parse_error() {
        let mut arena = Arena::with_capacity(1024);
        assert!(matches!(
            Image::from_header(b"V2 4x 3\n", &mut arena, HEADER_MAGIC),
            Err(RunError::Parse(ParseError::BadTerminator { found: Some(b'x') }))
        ));
        assert!(matches!(
            Image::from_header(b"V2 4 3", &mut arena, HEADER_MAGIC),
            Err(RunError::Parse(ParseError::BadTerminator { found: None }))
        ));
    }

    #[test]
    fn overflowing_dimensions_are_format_error() {
        let mut arena = Arena::with_capacity(1024);
        // 2^32 * 2^32 wraps to 0 in 64-bit arithmetic.
        let line = b"V2 4294967296 4294967296\n";
        assert!(matches!(
            Image::from_header(line, &mut arena, HEADER_MAGIC),
            Err(RunError::Format(FormatError::DimensionOverflow {
                width: 4294967296,
                height: 4294967296
            }))
        ));
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn oversized_image_is_memory_error() {
        let mut arena = arena_with_remaining(4096, 12);
        assert!(matches!(
            Image::from_header(b"V2 4 3\n", &mut arena, HEADER_MAGIC),
            Err(RunError::Memory(ArenaError::CapacityExceeded {
                requested: 12,
                remaining: 12
            }))
        ));
    }

    #[test]
    fn index_is_row_major_and_bounded() {
        let mut arena = Arena::with_capacity(1024);
        let image = Image::allocate(&mut arena, 4, 3).unwrap();
        assert_eq!(image.index(1, 2), Some(9));
        assert_eq!(image.index(3, 2), Some(11));
        assert_eq!(image.index(4, 0), None);
        assert_eq!(image.index(0, 3), None);
        assert_eq!(image.index(u64::MAX, 0), None);
    }

    #[test]
    fn zero_width_image_is_empty() {
        let mut arena = Arena::with_capacity(16);
        let image = Image::allocate(&mut arena, 0, 5).unwrap();
        assert!(image.is_empty());
        assert_eq!(image.height(), 5);
        assert_eq!(image.index(0, 0), None);
    }
}
