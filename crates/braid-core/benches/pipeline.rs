use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use braid_core::{Block, Cipher};

const BENCH_KEY: [u64; 4] = [0x7365, 0x6372, 0x6574, 0x0202];

fn bench_blocks(count: usize) -> Vec<Block> {
    let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
    (0..count).map(|_| rng.gen_range(0..1u64 << 48)).collect()
}

fn bench_encrypt(c: &mut Criterion) {
    let cipher = Cipher::new(8).expect("valid width");
    let blocks = bench_blocks(64);

    let mut group = c.benchmark_group("encrypt");
    group.throughput(Throughput::Elements(blocks.len() as u64));
    group.bench_function("64_blocks", |b| {
        b.iter(|| cipher.encrypt(black_box(&blocks), black_box(&BENCH_KEY)));
    });
    group.finish();
}

fn bench_decrypt(c: &mut Criterion) {
    let cipher = Cipher::new(8).expect("valid width");
    let blocks = bench_blocks(64);
    let ciphertext = cipher.encrypt(&blocks, &BENCH_KEY);

    let mut group = c.benchmark_group("decrypt");
    group.throughput(Throughput::Elements(blocks.len() as u64));
    group.bench_function("64_blocks", |b| {
        b.iter(|| cipher.decrypt(black_box(ciphertext.clone()), black_box(&BENCH_KEY)));
    });
    group.finish();
}

fn bench_round_derivation(c: &mut Criterion) {
    let cipher = Cipher::new(8).expect("valid width");

    // Dominated by the meta-key chain, so a single empty message isolates
    // the per-call derivation cost.
    c.bench_function("derive_only_empty_message", |b| {
        b.iter(|| cipher.encrypt(black_box(&[]), black_box(&BENCH_KEY)));
    });
}

criterion_group!(benches, bench_encrypt, bench_decrypt, bench_round_derivation);
criterion_main!(benches);
