//! Huffman codec benchmarks
//!
//! Benchmarks cover:
//! - Frequency counting
//! - Tree construction and code assignment
//! - Encoding and bit packing
//! - Exact and tolerant decoding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huffpress::{CodeTable, DecodeMode, FrequencyTable, HuffmanCodec, HuffmanTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 4] = [1024, 16 * 1024, 256 * 1024, 1024 * 1024];

/// English-like text: a skewed distribution over a small alphabet.
fn generate_text(size: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"eeeeeeeeetttttttaaaaaaooooooiiiiiinnnnnnsssssshhhhhrrrrrdddllluu          ,.\n";
    let mut rng = StdRng::seed_from_u64(42);
    (0..size)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

/// Uniform random bytes: every symbol present, codes near eight bits.
fn generate_random(size: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..size).map(|_| rng.gen()).collect()
}

fn bench_frequency_counting(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequency");
    for size in SIZES {
        let data = generate_text(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &data, |b, data| {
            b.iter(|| FrequencyTable::from_bytes(black_box(data)))
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), &data, |b, data| {
            let shard = data.len().div_ceil(rayon::current_num_threads());
            b.iter(|| FrequencyTable::from_bytes_parallel(black_box(data), shard))
        });
    }
    group.finish();
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree");
    let inputs = [
        ("text", FrequencyTable::from_bytes(&generate_text(64 * 1024))),
        ("random", FrequencyTable::from_bytes(&generate_random(64 * 1024))),
    ];
    for (name, frequencies) in &inputs {
        group.throughput(Throughput::Elements(frequencies.len() as u64));

        group.bench_with_input(BenchmarkId::new("build", name), frequencies, |b, f| {
            b.iter(|| HuffmanTree::build(black_box(f)).unwrap())
        });

        let tree = HuffmanTree::build(frequencies).unwrap();
        group.bench_with_input(BenchmarkId::new("code_table", name), &tree, |b, tree| {
            b.iter(|| CodeTable::from_tree(black_box(tree)))
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for size in SIZES {
        let data = generate_text(size);
        let codec = HuffmanCodec::from_input(&data).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("text", size), &data, |b, data| {
            b.iter(|| codec.encode(black_box(data)).unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for size in SIZES {
        let data = generate_text(size);
        let codec = HuffmanCodec::from_input(&data).unwrap();
        let stream = codec.encode(&data).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("exact", size), &stream, |b, stream| {
            b.iter(|| codec.decode(black_box(stream), DecodeMode::Exact).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("tolerant", size), &stream, |b, stream| {
            b.iter(|| codec.decode(black_box(stream), DecodeMode::Tolerant).unwrap())
        });
    }
    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");
    let size = 256 * 1024;
    let inputs = [("text", generate_text(size)), ("random", generate_random(size))];
    group.throughput(Throughput::Bytes(size as u64));

    for (name, data) in &inputs {
        group.bench_with_input(BenchmarkId::new("full", name), data, |b, data| {
            b.iter(|| {
                let codec = HuffmanCodec::from_input(black_box(data)).unwrap();
                let stream = codec.encode(data).unwrap();
                codec.decode(&stream, DecodeMode::Exact).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_frequency_counting,
    bench_tree_build,
    bench_encode,
    bench_decode,
    bench_roundtrip,
);
criterion_main!(benches);
