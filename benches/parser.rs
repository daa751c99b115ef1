//! Parser throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use vtscreen::Parser;

fn plain_text_input(size: usize) -> Vec<u8> {
    let line = b"The quick brown fox jumps over the lazy dog. \r\n";
    line.iter().cycle().take(size).copied().collect()
}

fn escape_heavy_input(size: usize) -> Vec<u8> {
    let chunk = b"\x1b[1;31mred\x1b[0m \x1b[4munder\x1b[24m \x1b[5;10Hmoved\x1b[2J";
    chunk.iter().cycle().take(size).copied().collect()
}

fn bench_plain_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_plain_text");
    for size in [1024, 16 * 1024, 256 * 1024] {
        let input = plain_text_input(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("{size}_bytes"), |b| {
            b.iter(|| {
                let mut parser = Parser::new();
                black_box(parser.process_data(black_box(&input)))
            })
        });
    }
    group.finish();
}

fn bench_escape_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_escape_heavy");
    for size in [1024, 16 * 1024, 256 * 1024] {
        let input = escape_heavy_input(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("{size}_bytes"), |b| {
            b.iter(|| {
                let mut parser = Parser::new();
                black_box(parser.process_data(black_box(&input)))
            })
        });
    }
    group.finish();
}

fn bench_utf8_text(c: &mut Criterion) {
    let line = "héllo wörld ありがとう ✓✗ ".as_bytes();
    let input: Vec<u8> = line.iter().cycle().take(64 * 1024).copied().collect();
    let mut group = c.benchmark_group("parser_utf8");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("64k_bytes", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            black_box(parser.process_data(black_box(&input)))
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_plain_text,
    bench_escape_sequences,
    bench_utf8_text
);
criterion_main!(benches);
