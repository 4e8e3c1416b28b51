use criterion::{black_box, criterion_group, criterion_main, Criterion};

use seqsim_rust::align::{
    self, find_best_window, identity_score, jaccard_kmer_score, NwParams, ScanParams,
};

fn make_sequence(len: usize, seed: u32) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = seed;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    seq
}

fn bench_nw_align(c: &mut Criterion) {
    let a = make_sequence(200, 42);
    let mut b = a.clone();
    b[60] = b'N'; // introduce mismatch
    b[140] = b'N';
    let params = NwParams::default();

    c.bench_function("nw_align_200bp", |bch| {
        bch.iter(|| {
            black_box(align::nw_align(black_box(&a), black_box(&b), params));
        })
    });
}

fn bench_identity_score(c: &mut Criterion) {
    let a = make_sequence(10_000, 42);
    let b = make_sequence(10_000, 7);

    c.bench_function("identity_score_10k", |bch| {
        bch.iter(|| {
            black_box(identity_score(black_box(&a), black_box(&b)));
        })
    });
}

fn bench_jaccard_kmer(c: &mut Criterion) {
    let a = make_sequence(10_000, 42);
    let b = make_sequence(10_000, 7);

    c.bench_function("jaccard_kmer_10k_k3", |bch| {
        bch.iter(|| {
            black_box(jaccard_kmer_score(black_box(&a), black_box(&b), 3));
        })
    });
}

fn bench_window_scan(c: &mut Criterion) {
    let a = make_sequence(15_000, 42);
    let b = make_sequence(30_000, 7);
    let p = ScanParams {
        window_len: 60,
        stride_a: 100,
        stride_b: 500,
    };

    c.bench_function("window_scan_15k_x_30k", |bch| {
        bch.iter(|| {
            black_box(find_best_window(black_box(&a), black_box(&b), p).unwrap());
        })
    });
}

criterion_group!(
    benches,
    bench_nw_align,
    bench_identity_score,
    bench_jaccard_kmer,
    bench_window_scan
);
criterion_main!(benches);
