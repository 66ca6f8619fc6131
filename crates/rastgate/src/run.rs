//! The end-to-end pipeline.

use std::io::{BufRead, Write};

use rastgate_arena::Arena;
use rastgate_core::{
    write_image, ChannelSource, ConfigError, CredentialGate, Image, InterpretStats, Interpreter,
    RunError,
};
use tracing::debug;

use crate::config::RunConfig;

/// What a successful run produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Image width from the header.
    pub width: usize,
    /// Image height from the header.
    pub height: usize,
    /// Interpreter counters.
    pub stats: InterpretStats,
    /// Arena bytes in use when the raster was written.
    pub arena_used: usize,
}

/// Authenticate, read the image description from `input`, and write the
/// raster to `output`.
///
/// The gate runs before `input` is touched. Nothing is written to `output`
/// unless the whole command stream was consumed without error.
pub fn run<C, R, W>(
    config: &RunConfig,
    source: &mut C,
    mut input: R,
    output: W,
) -> Result<RunSummary, RunError>
where
    C: ChannelSource + ?Sized,
    R: BufRead,
    W: Write,
{
    config.validate()?;
    let mut arena = Arena::from_config(&config.arena).map_err(ConfigError::Arena)?;

    CredentialGate::new(config.gate.clone()).authenticate(&mut arena, source)?;

    let image = Image::read_header(&mut input, &mut arena, &config.header_magic)?;
    let stats = Interpreter::new(image).run(&mut input, &mut arena)?;
    write_image(output, &image, &arena)?;

    debug!(
        width = image.width(),
        height = image.height(),
        arena_used = arena.used(),
        "raster written"
    );
    Ok(RunSummary {
        width: image.width(),
        height: image.height(),
        stats,
        arena_used: arena.used(),
    })
}
