//! 演示如何在 library 模式下使用 seqsim-rust 做序列对比。
//!
//! 运行方式：
//! ```bash
//! cargo run --example simple_compare
//! ```

use seqsim_rust::align::{
    self, identity_score, jaccard_kmer_score, weighted_score, NwParams, ScanParams,
};

fn main() {
    // 1. 全局对齐两条短序列
    let s1 = b"ACCGTGAAGCCAATAC";
    let s2 = b"AGCGTGCAGCCAATAC";
    println!("序列 1: {}", std::str::from_utf8(s1).unwrap());
    println!("序列 2: {}", std::str::from_utf8(s2).unwrap());

    let res = align::nw_align(s1, s2, NwParams::default());
    println!("\nNeedleman-Wunsch 对齐:");
    println!("{}", res.to_pretty());
    println!("回溯路径长度: {} 坐标", res.path.len());

    // 2. 三种相似度评分
    let (id_pct, id_matches) = identity_score(s1, s2);
    println!("\n同一性评分: {:.2}% ({} 匹配)", id_pct, id_matches);

    let (w_pct, w_raw) = weighted_score(s1, s2, 1, 1).unwrap();
    println!("加权评分:   {:.2}% (raw={})", w_pct, w_raw);

    let (j_pct, inter, union) = jaccard_kmer_score(s1, s2, 3);
    println!("Jaccard:    {:.2}% (交集={}, 并集={})", j_pct, inter, union);

    // 3. 长序列窗口扫描：埋一段共同区域再找回来
    let motif = b"ACGTTGCAACGTTGCAACGTTGCA";
    let mut genome_a = make_sequence(5_000, 42);
    let mut genome_b = make_sequence(20_000, 7);
    genome_a[1_200..1_200 + motif.len()].copy_from_slice(motif);
    genome_b[15_000..15_000 + motif.len()].copy_from_slice(motif);

    let scan = ScanParams {
        window_len: 24,
        stride_a: 4,
        stride_b: 4,
    };
    let summary = align::scan_and_align(&genome_a, &genome_b, scan, NwParams::default(), 3, false)
        .expect("scan");

    println!("\n窗口扫描结果:");
    println!(
        "  最佳窗口: A@{} / B@{}，同一性 {:.2}%",
        summary.best.start_a, summary.best.start_b, summary.best.score
    );
    println!("  窗口对齐:\n{}", summary.alignment.to_pretty());

    println!("完成！");
}

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
