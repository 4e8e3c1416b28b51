pub mod nw;
pub mod score;
pub mod window;

pub use nw::{build_matrix, nw_align, traceback, NwParams, NwResult, ScoreMatrix};
pub use score::{identity_score, jaccard_kmer_score, weighted_score};
pub use window::{find_best_window, find_best_window_par, ScanParams, WindowMatch};

use crate::error::Result;

/// scan 流程的汇总结果：粗扫描命中 + 对该窗口对的精细分析
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub best: WindowMatch,
    pub alignment: NwResult,
    /// (百分比, 匹配数)
    pub identity: (f64, usize),
    /// (归一化百分比, 原始得分)
    pub weighted: (f64, i64),
    /// (百分比, 交集, 并集)
    pub jaccard: (f64, usize, usize),
}

/// 基因组对比完整流程：先用粗扫描把两条长序列缩减为一个高相似窗口对，
/// 只对这个短窗口对跑二次方的 DP 对齐与三种相似度评分。
/// 加权评分的权重取 |match| 与 |mismatch|，与扫描打分方案保持一致。
pub fn scan_and_align(
    seq_a: &[u8],
    seq_b: &[u8],
    scan: ScanParams,
    nw_params: NwParams,
    k: usize,
    parallel: bool,
) -> Result<ScanSummary> {
    let best = if parallel {
        find_best_window_par(seq_a, seq_b, scan)?
    } else {
        find_best_window(seq_a, seq_b, scan)?
    };

    let alignment = nw_align(&best.window_a, &best.window_b, nw_params);
    let identity = identity_score(&best.window_a, &best.window_b);
    let weighted = weighted_score(
        &best.window_a,
        &best.window_b,
        nw_params.match_score.abs(),
        nw_params.mismatch_score.abs(),
    )?;
    let jaccard = jaccard_kmer_score(&best.window_a, &best.window_b, k);

    Ok(ScanSummary {
        best,
        alignment,
        identity,
        weighted,
        jaccard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_and_align_on_planted_region() {
        let core = b"ACGTTGCAACGTTGCA";
        let mut a = vec![b'A'; 64];
        let mut b = vec![b'T'; 256];
        a[10..26].copy_from_slice(core);
        b[200..216].copy_from_slice(core);

        let scan = ScanParams {
            window_len: 16,
            stride_a: 2,
            stride_b: 2,
        };
        let summary =
            scan_and_align(&a, &b, scan, NwParams::default(), 3, false).unwrap();

        assert_eq!(summary.best.score, 100.0);
        assert_eq!(summary.identity.1, 16);
        assert_eq!(summary.alignment.matches, 16);
        assert_eq!(summary.jaccard.0, 100.0);
        assert_eq!(summary.weighted.0, 100.0);

        // 并行路径给出同一命中
        let par = scan_and_align(&a, &b, scan, NwParams::default(), 3, true).unwrap();
        assert_eq!(par.best, summary.best);
    }

    #[test]
    fn scan_and_align_propagates_empty_search_space() {
        let scan = ScanParams {
            window_len: 50,
            stride_a: 1,
            stride_b: 1,
        };
        assert!(scan_and_align(b"ACGT", b"ACGT", scan, NwParams::default(), 3, false).is_err());
    }
}
