use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::score::identity_score;
use crate::error::{Result, SeqSimError};

/// 粗扫描参数。步长刻意不对称：序列 A（较短/扫得快的一侧）步长细，
/// 序列 B（通常长得多的一侧）步长粗。合适的取值依赖具体工作负载，
/// 因此全部作为显式配置暴露，默认值来自流感/冠状病毒基因组对的标定。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanParams {
    pub window_len: usize,
    pub stride_a: usize,
    pub stride_b: usize,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            window_len: 60,
            stride_a: 100,
            stride_b: 500,
        }
    }
}

impl ScanParams {
    /// 配置校验：窗口与步长必须为正，在进入扫描循环之前拒绝
    fn validate(&self) -> Result<()> {
        if self.window_len == 0 || self.stride_a == 0 || self.stride_b == 0 {
            return Err(SeqSimError::BadScanParams {
                window: self.window_len,
                stride_a: self.stride_a,
                stride_b: self.stride_b,
            });
        }
        Ok(())
    }
}

/// 扫描命中：胜出的窗口对、各自起点和同一性得分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowMatch {
    pub start_a: usize,
    pub start_b: usize,
    pub window_a: Vec<u8>,
    pub window_b: Vec<u8>,
    pub score: f64,
}

/// 单行内最佳：固定 i，沿 j 升序扫描，严格大于才替换（先到者胜）
fn best_in_row(seq_a: &[u8], seq_b: &[u8], p: ScanParams, i: usize) -> (usize, f64) {
    let win_a = &seq_a[i..i + p.window_len];
    let mut best_j = 0usize;
    let mut best_score = -1.0f64;

    for j in (0..=seq_b.len() - p.window_len).step_by(p.stride_b) {
        let win_b = &seq_b[j..j + p.window_len];
        let (pct, _) = identity_score(win_a, win_b);
        if pct > best_score {
            best_score = pct;
            best_j = j;
        }
    }

    (best_j, best_score)
}

fn fold_rows(seq_a: &[u8], seq_b: &[u8], p: ScanParams, rows: Vec<(usize, usize, f64)>) -> WindowMatch {
    // 不可变的"当前最佳"沿候选序折叠；严格大于保证平分时先到者胜
    let (start_a, start_b, score) = rows
        .into_iter()
        .fold(None, |best: Option<(usize, usize, f64)>, cand| match best {
            Some(b) if cand.2 <= b.2 => Some(b),
            _ => Some(cand),
        })
        .unwrap_or((0, 0, 0.0));

    WindowMatch {
        start_a,
        start_b,
        window_a: seq_a[start_a..start_a + p.window_len].to_vec(),
        window_b: seq_b[start_b..start_b + p.window_len].to_vec(),
        score,
    }
}

/// 基因组级别的粗到细搜索第一阶段：用同一性得分（O(window) 每候选）
/// 代替全量 DP 扫描两条长序列，返回得分最高的窗口对。
/// 每候选代价 O(window)，总代价 O((len_a/stride_a) * (len_b/stride_b) * window)。
/// 候选集合为空（窗口放不进任一序列）时返回错误而不是伪造结果。
pub fn find_best_window(seq_a: &[u8], seq_b: &[u8], p: ScanParams) -> Result<WindowMatch> {
    p.validate()?;
    if p.window_len > seq_a.len() || p.window_len > seq_b.len() {
        return Err(SeqSimError::EmptySearchSpace {
            window: p.window_len,
            len_a: seq_a.len(),
            len_b: seq_b.len(),
        });
    }

    let rows: Vec<(usize, usize, f64)> = (0..=seq_a.len() - p.window_len)
        .step_by(p.stride_a)
        .map(|i| {
            let (j, score) = best_in_row(seq_a, seq_b, p, i);
            (i, j, score)
        })
        .collect();

    Ok(fold_rows(seq_a, seq_b, p, rows))
}

/// 并行版扫描：外层偏移按 rayon 并行求每行最佳，再按规范序
/// （i 升序，行内 j 升序）顺序归并，因此平分裁决与串行版逐位一致。
pub fn find_best_window_par(seq_a: &[u8], seq_b: &[u8], p: ScanParams) -> Result<WindowMatch> {
    p.validate()?;
    if p.window_len > seq_a.len() || p.window_len > seq_b.len() {
        return Err(SeqSimError::EmptySearchSpace {
            window: p.window_len,
            len_a: seq_a.len(),
            len_b: seq_b.len(),
        });
    }

    let offsets: Vec<usize> = (0..=seq_a.len() - p.window_len).step_by(p.stride_a).collect();
    let rows: Vec<(usize, usize, f64)> = offsets
        .into_par_iter()
        .map(|i| {
            let (j, score) = best_in_row(seq_a, seq_b, p, i);
            (i, j, score)
        })
        .collect();

    Ok(fold_rows(seq_a, seq_b, p, rows))
}
