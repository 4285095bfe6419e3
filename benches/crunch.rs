//! Encoder throughput over C64-shaped payloads.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tscrunch::crunch_raw;

/// A payload shaped like a real program: code-ish spray, text, tables of
/// zeros and runs.
fn synthetic_prg(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut state = 0xBEEFu16;
    while out.len() < len {
        state = state.wrapping_mul(25173).wrapping_add(13849);
        match state >> 13 {
            0 => out.extend_from_slice(&[0u8; 24]),
            1 => out.extend_from_slice(&[(state >> 8) as u8; 12]),
            2 | 3 => out.extend_from_slice(b"PRESS PLAY ON TAPE "),
            _ => out.push((state >> 8) as u8),
        }
    }
    out.truncate(len);
    out
}

fn bench_crunch(c: &mut Criterion) {
    let mut group = c.benchmark_group("crunch");
    for len in [1usize << 10, 8 << 10, 32 << 10] {
        let src = synthetic_prg(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("raw", len), &src, |b, src| {
            b.iter(|| crunch_raw(src, None));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_crunch);
criterion_main!(benches);
