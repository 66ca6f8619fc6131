//! The command interpreter.
//!
//! [`Interpreter`] consumes the command stream one line at a time and
//! mutates the image in place. Syntax errors are fatal; coordinates outside
//! the image are silently ignored and processing continues.

use std::io::BufRead;

use rastgate_arena::Arena;
use tracing::{debug, trace};

use crate::command::Command;
use crate::error::RunError;
use crate::image::Image;
use crate::line::{read_line, LineBuf};

/// Counters collected over one interpreter run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InterpretStats {
    /// Command lines parsed successfully.
    pub commands: u64,
    /// Commands that wrote a sample.
    pub applied: u64,
    /// Commands whose coordinates fell outside the image.
    pub ignored: u64,
}

/// Applies protocol commands to an [`Image`].
#[derive(Debug)]
pub struct Interpreter {
    image: Image,
    stats: InterpretStats,
}

impl Interpreter {
    /// Create an interpreter for `image`.
    pub fn new(image: Image) -> Self {
        Self {
            image,
            stats: InterpretStats::default(),
        }
    }

    /// The image being mutated.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Counters so far.
    pub fn stats(&self) -> InterpretStats {
        self.stats
    }

    /// Apply one command to `pixels`, the image's sample buffer.
    ///
    /// Returns whether a sample was written. Out-of-range coordinates are
    /// not an error.
    pub fn apply(&mut self, pixels: &mut [u8], command: Command) -> bool {
        self.stats.commands += 1;
        match command {
            Command::SetPixel { x, y, value } => match self.image.index(x, y) {
                Some(index) => {
                    // Only the low byte is stored.
                    pixels[index] = value as u8;
                    self.stats.applied += 1;
                    true
                }
                None => {
                    debug!(x, y, "set-pixel outside image ignored");
                    self.stats.ignored += 1;
                    false
                }
            },
        }
    }

    /// Interpret every remaining line of `reader`.
    ///
    /// Stops cleanly at end of stream. The first malformed line ends the
    /// run with its error and no further line is read.
    pub fn run<R: BufRead + ?Sized>(
        &mut self,
        reader: &mut R,
        arena: &mut Arena,
    ) -> Result<InterpretStats, RunError> {
        let pixels = self.image.pixels_mut(arena)?;
        let mut line = LineBuf::new();
        while read_line(reader, &mut line)? {
            let command = Command::parse(&line)?;
            trace!(?command, "command");
            self.apply(pixels, command);
        }
        debug!(
            commands = self.stats.commands,
            applied = self.stats.applied,
            ignored = self.stats.ignored,
            "command stream done"
        );
        Ok(self.stats)
    }
}
