use std::collections::HashSet;

use crate::error::{Result, SeqSimError};

/// 位置同一性评分：只比较 [0, min(len_a, len_b)) 的字面位置，不插入间隙。
/// 返回 (百分比, 匹配数)；比较长度为 0 时返回 (0.0, 0)。
/// 这是窗口扫描用的快速代理，每次调用 O(min_len)。
pub fn identity_score(seq_a: &[u8], seq_b: &[u8]) -> (f64, usize) {
    let len = seq_a.len().min(seq_b.len());
    if len == 0 {
        return (0.0, 0);
    }

    let matches = seq_a
        .iter()
        .zip(seq_b)
        .filter(|(a, b)| a == b)
        .count();

    (matches as f64 / len as f64 * 100.0, matches)
}

/// 加权评分：匹配 +match_reward，错配 -mismatch_penalty，
/// 再按 min-max 归一化到 0-100。返回 (归一化百分比, 原始得分)。
/// 两个权重同时为 0 时归一化分母为零，直接拒绝。
pub fn weighted_score(
    seq_a: &[u8],
    seq_b: &[u8],
    match_reward: i32,
    mismatch_penalty: i32,
) -> Result<(f64, i64)> {
    if match_reward == 0 && mismatch_penalty == 0 {
        return Err(SeqSimError::ZeroScoreRange);
    }

    let len = seq_a.len().min(seq_b.len());
    if len == 0 {
        return Ok((0.0, 0));
    }

    let mut raw: i64 = 0;
    for (a, b) in seq_a.iter().zip(seq_b) {
        if a == b {
            raw += i64::from(match_reward);
        } else {
            raw -= i64::from(mismatch_penalty);
        }
    }

    let max_possible = len as i64 * i64::from(match_reward);
    let min_possible = -(len as i64) * i64::from(mismatch_penalty);
    let pct = (raw - min_possible) as f64 / (max_possible - min_possible) as f64 * 100.0;

    Ok((pct, raw))
}

/// Jaccard k-mer 评分：两条序列的 k-mer 集合（只看存在性，不计次数）的
/// 交并比。返回 (百分比, 交集大小, 并集大小)；任一序列短于 k 或并集为空
/// 时返回 (0.0, 0, 0)。对小幅位移不敏感，适合结构相似性粗判。
pub fn jaccard_kmer_score(seq_a: &[u8], seq_b: &[u8], k: usize) -> (f64, usize, usize) {
    if k == 0 || seq_a.len() < k || seq_b.len() < k {
        return (0.0, 0, 0);
    }

    let set_a: HashSet<&[u8]> = seq_a.windows(k).collect();
    let set_b: HashSet<&[u8]> = seq_b.windows(k).collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return (0.0, 0, 0);
    }

    (intersection as f64 / union as f64 * 100.0, intersection, union)
}
