//! Benchmark inputs for the rastgate arena and interpreter.
//!
//! - [`command_stream`]: a seeded stdin script of set-pixel commands
//! - [`BenchProfile`]: named image sizes used across the benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt::Write as _;

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// An image size and command count to benchmark against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchProfile {
    /// Name used as the criterion benchmark id.
    pub name: &'static str,
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// Number of command lines after the header.
    pub commands: usize,
}

impl BenchProfile {
    /// 64×64 image, 4K commands.
    pub const SMALL: Self = Self {
        name: "small_64x64",
        width: 64,
        height: 64,
        commands: 4_096,
    };

    /// 1024×1024 image, 100K commands.
    pub const LARGE: Self = Self {
        name: "large_1024x1024",
        width: 1024,
        height: 1024,
        commands: 100_000,
    };

    /// Sample count of the image.
    pub fn pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Arena capacity that fits the image with room to spare.
    pub fn arena_capacity(&self) -> usize {
        self.pixels() + 4096
    }

    /// The profile's seeded input script.
    pub fn script(&self, seed: u64) -> Vec<u8> {
        command_stream(self.width, self.height, self.commands, seed)
    }
}

/// Generate a deterministic stdin script: the `V2` header followed by
/// `commands` set-pixel lines.
///
/// Roughly one command in eight targets a coordinate just outside the image
/// so the ignore path is exercised too. The same seed always yields the
/// same bytes.
pub fn command_stream(width: u32, height: u32, commands: usize, seed: u64) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = format!("V2 {width} {height}\n");

    for _ in 0..commands {
        let roll = rng.next_u32();
        let (x, y) = if roll % 8 == 0 {
            (width + roll % 16, height)
        } else {
            (
                rng.next_u32() % width.max(1),
                rng.next_u32() % height.max(1),
            )
        };
        let value = rng.next_u32() & 0xff;
        let _ = writeln!(text, "s{x} {y} {value:x}");
    }

    text.into_bytes()
}
