//! End-to-end runs of the full pipeline against scripted terminals.

use std::io::Cursor;

use rastgate::arena::{ArenaConfig, ArenaError};
use rastgate::pipeline::{FormatError, GateError, ParseError, RunError};
use rastgate::{run, RunConfig, RunSummary};
use rastgate_test_utils::fixtures::{expected_raster, ImageScript};
use rastgate_test_utils::{no_terminal, ScriptedTerminal};

fn run_with(
    config: &RunConfig,
    term: &ScriptedTerminal,
    input: Vec<u8>,
) -> (Result<RunSummary, RunError>, Vec<u8>) {
    let mut out = Vec::new();
    let result = run(config, &mut term.source(), Cursor::new(input), &mut out);
    (result, out)
}

fn authorised() -> ScriptedTerminal {
    ScriptedTerminal::answering("alice", "alice")
}

#[test]
fn blank_image_round_trip() {
    let term = authorised();
    let (result, out) = run_with(&RunConfig::default(), &term, b"V2 4 3\n".to_vec());
    result.unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "P2\n4 3 255\n0 0 0 0 \n0 0 0 0 \n0 0 0 0 \n"
    );
    assert_eq!(term.transcript(), "User: Password: ");
}

#[test]
fn single_pixel_set() {
    let (result, out) = run_with(
        &RunConfig::default(),
        &authorised(),
        ImageScript::new(4, 3).set(1, 2, 0xff).into_bytes(),
    );
    result.unwrap();

    let mut pixels = [0u8; 12];
    pixels[2 * 4 + 1] = 255;
    assert_eq!(String::from_utf8(out).unwrap(), expected_raster(4, 3, &pixels));
}

#[test]
fn out_of_range_writes_are_skipped() {
    let script = ImageScript::new(4, 3)
        .set(9, 9, 0xff)
        .set(0, 0, 0x10)
        .into_bytes();
    let (result, out) = run_with(&RunConfig::default(), &authorised(), script);
    let summary = result.unwrap();
    assert_eq!(summary.stats.ignored, 1);
    assert_eq!(summary.stats.applied, 1);

    let mut pixels = [0u8; 12];
    pixels[0] = 16;
    assert_eq!(String::from_utf8(out).unwrap(), expected_raster(4, 3, &pixels));
}

#[test]
fn unknown_opcode_writes_nothing() {
    let script = ImageScript::new(4, 3).set(0, 0, 1).line("z").into_bytes();
    let (result, out) = run_with(&RunConfig::default(), &authorised(), script);
    let err = result.unwrap_err();
    assert!(matches!(err, RunError::Protocol { ref line } if line == "z\n"));
    assert_eq!(err.to_string(), "bad command: z");
    assert!(out.is_empty());
}

#[test]
fn malformed_field_writes_nothing() {
    let (result, out) = run_with(
        &RunConfig::default(),
        &authorised(),
        b"V2 4 3\ns1 2 fg\n".to_vec(),
    );
    assert!(matches!(
        result,
        Err(RunError::Parse(ParseError::BadTerminator { found: Some(b'g') }))
    ));
    assert!(out.is_empty());
}

#[test]
fn mismatch_fails_before_reading_input() {
    let term = ScriptedTerminal::answering("alice", "bob");
    let mut input = Cursor::new(b"V2 4 3\n".to_vec());
    let mut out = Vec::new();

    let result = run(&RunConfig::default(), &mut term.source(), &mut input, &mut out);
    assert!(matches!(result, Err(RunError::Gate(GateError::AuthMismatch))));
    assert_eq!(input.position(), 0);
    assert!(out.is_empty());
}

#[test]
fn missing_terminal_fails_before_reading_input() {
    let mut input = Cursor::new(b"V2 4 3\n".to_vec());
    let mut out = Vec::new();

    let err = run(&RunConfig::default(), &mut no_terminal(), &mut input, &mut out).unwrap_err();
    assert!(matches!(err, RunError::Gate(GateError::ChannelUnavailable(_))));
    assert_eq!(err.kind(), "channel_unavailable");
    assert_eq!(input.position(), 0);
    assert!(out.is_empty());
}

#[test]
fn unterminated_password_is_denied() {
    let term = ScriptedTerminal::new("alice\nalice");
    let (result, out) = run_with(&RunConfig::default(), &term, b"V2 1 1\n".to_vec());
    assert!(matches!(result, Err(RunError::Gate(GateError::AuthMismatch))));
    assert!(out.is_empty());
}

#[test]
fn bad_magic_is_format_error() {
    let (result, out) = run_with(&RunConfig::default(), &authorised(), b"P2 4 3\n".to_vec());
    assert!(matches!(
        result,
        Err(RunError::Format(FormatError::BadMagic { .. }))
    ));
    assert!(out.is_empty());
}

#[test]
fn overflowing_dimensions_are_format_error() {
    let (result, _) = run_with(
        &RunConfig::default(),
        &authorised(),
        b"V2 18446744073709551615 2\n".to_vec(),
    );
    assert!(matches!(
        result,
        Err(RunError::Format(FormatError::DimensionOverflow { .. }))
    ));
}

#[test]
fn image_larger_than_arena_is_memory_error() {
    let config = RunConfig {
        arena: ArenaConfig::new(100),
        ..RunConfig::default()
    };
    let (result, out) = run_with(&config, &authorised(), b"V2 10 10\n".to_vec());
    let err = result.unwrap_err();
    assert!(matches!(
        err,
        RunError::Memory(ArenaError::CapacityExceeded {
            requested: 100,
            remaining: 100
        })
    ));
    assert_eq!(err.kind(), "memory_error");
    assert!(out.is_empty());
}

#[test]
fn image_reusing_credential_memory_starts_blank() {
    // The image lands on the bytes the credential buffers used.
    let term = ScriptedTerminal::answering("secret", "secret");
    let (result, out) = run_with(&RunConfig::default(), &term, b"V2 8 8\n".to_vec());
    let summary = result.unwrap();
    assert_eq!(summary.arena_used, 64);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        expected_raster(8, 8, &[0; 64])
    );
}

#[test]
fn empty_command_stream_after_header() {
    let (result, out) = run_with(&RunConfig::default(), &authorised(), b"V2 0 0\n".to_vec());
    assert_eq!(result.unwrap().stats.commands, 0);
    assert_eq!(out, b"P2\n0 0 255\n");
}

mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn raster_matches_model(
            width in 1u64..8,
            height in 1u64..8,
            writes in prop::collection::vec((0u64..10, 0u64..10, any::<u16>()), 0..24),
        ) {
            let mut script = ImageScript::new(width, height);
            let mut model = vec![0u8; (width * height) as usize];
            for &(x, y, value) in &writes {
                script = script.set(x, y, u64::from(value));
                if x < width && y < height {
                    model[(y * width + x) as usize] = value as u8;
                }
            }

            let config = RunConfig {
                arena: ArenaConfig::new(4096),
                ..RunConfig::default()
            };
            let (result, out) = run_with(&config, &authorised(), script.into_bytes());
            let summary = result.unwrap();
            prop_assert_eq!(summary.stats.commands, writes.len() as u64);
            prop_assert_eq!(
                String::from_utf8(out).unwrap(),
                expected_raster(width as usize, height as usize, &model)
            );
        }
    }
}
