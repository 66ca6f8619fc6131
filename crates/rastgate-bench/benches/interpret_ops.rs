//! Criterion benchmarks for the gate, the interpreter, and raster output.

use std::hint::black_box;
use std::io::{self, Cursor};

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rastgate_arena::Arena;
use rastgate_bench::BenchProfile;
use rastgate_core::{write_raster, CredentialGate, Image, Interpreter, HEADER_MAGIC};
use rastgate_test_utils::ScriptedTerminal;

/// Benchmark: header plus full command stream for each profile.
fn bench_interpret(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpret");
    for profile in [BenchProfile::SMALL, BenchProfile::LARGE] {
        let script = profile.script(42);
        let mut arena = Arena::with_capacity(profile.arena_capacity());
        group.throughput(Throughput::Bytes(script.len() as u64));
        group.bench_function(profile.name, |b| {
            b.iter(|| {
                let mark = arena.mark();
                let mut input = Cursor::new(script.as_slice());
                let image = Image::read_header(&mut input, &mut arena, HEADER_MAGIC).unwrap();
                let stats = Interpreter::new(image).run(&mut input, &mut arena).unwrap();
                black_box(stats);
                arena.rollback(mark).unwrap();
            });
        });
    }
    group.finish();
}

/// Benchmark: `P2` formatting of each profile's image into a sink.
fn bench_write_raster(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_raster");
    for profile in [BenchProfile::SMALL, BenchProfile::LARGE] {
        let pixels: Vec<u8> = (0..profile.pixels()).map(|i| i as u8).collect();
        group.throughput(Throughput::Elements(pixels.len() as u64));
        group.bench_function(profile.name, |b| {
            b.iter(|| {
                write_raster(
                    io::sink(),
                    profile.width as usize,
                    profile.height as usize,
                    black_box(&pixels),
                )
                .unwrap();
            });
        });
    }
    group.finish();
}

/// Benchmark: one successful credential check against a scripted terminal.
fn bench_gate(c: &mut Criterion) {
    let gate = CredentialGate::default();
    let mut arena = Arena::with_capacity(4096);

    c.bench_function("gate_authenticate", |b| {
        b.iter(|| {
            let terminal = ScriptedTerminal::answering("alice", "alice");
            gate.authenticate(&mut arena, &mut terminal.source()).unwrap();
        });
    });
}

criterion_group!(benches, bench_interpret, bench_write_raster, bench_gate);
criterion_main!(benches);
