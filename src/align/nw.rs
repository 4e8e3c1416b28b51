use serde::{Deserialize, Serialize};

use crate::util::dna::GAP;

/// Needleman-Wunsch 打分方案：线性间隙模型，核心不对符号正负做约束
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NwParams {
    pub match_score: i32,
    pub mismatch_score: i32,
    pub gap_score: i32,
}

impl Default for NwParams {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch_score: -1,
            gap_score: 0,
        }
    }
}

/// DP 得分矩阵，形状为 (len(seq_b)+1) x (len(seq_a)+1)。
/// 单元 (i, j) 保存 seq_b[0..i) 与 seq_a[0..j) 全局对齐的最优得分。
/// 整个矩阵保留在结果里供回溯和外部热图渲染使用，不做 O(n) 空间优化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<i32>,
}

impl ScoreMatrix {
    fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.cells[i * self.cols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, v: i32) {
        self.cells[i * self.cols + j] = v;
    }

    /// 第 i 行的切片，便于逐行渲染
    pub fn row(&self, i: usize) -> &[i32] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }
}

/// 全局对齐结果。aligned_a 与 aligned_b 长度始终相等，
/// path 是从右下角到 (0,0) 的回溯坐标序列（含起点）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NwResult {
    pub aligned_a: Vec<u8>,
    pub aligned_b: Vec<u8>,
    pub matches: usize,
    pub matrix: ScoreMatrix,
    pub path: Vec<(usize, usize)>,
}

impl NwResult {
    /// 对齐长度（两条对齐序列长度一致）
    pub fn len(&self) -> usize {
        self.aligned_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_a.is_empty()
    }

    /// 右下角的最优全局得分
    pub fn score(&self) -> i32 {
        self.matrix.get(self.matrix.rows() - 1, self.matrix.cols() - 1)
    }

    /// 匹配数 / 对齐长度的百分比
    pub fn similarity_pct(&self) -> f64 {
        if self.aligned_a.is_empty() {
            return 0.0;
        }
        self.matches as f64 / self.aligned_a.len() as f64 * 100.0
    }

    /// 匹配标记行：两侧符号相同且非间隙处为 '|'，否则空格
    pub fn marker_line(&self) -> String {
        self.aligned_a
            .iter()
            .zip(&self.aligned_b)
            .map(|(&a, &b)| if a == b && a != GAP { '|' } else { ' ' })
            .collect()
    }

    /// 三行文本展示 + 统计，对应报告打印输出
    pub fn to_pretty(&self) -> String {
        format!(
            "{}\n{}\n{}\n\nMatches    = {}\nLength     = {}\nSimilarity = {} %\nScore      = {}\n",
            String::from_utf8_lossy(&self.aligned_a),
            self.marker_line(),
            String::from_utf8_lossy(&self.aligned_b),
            self.matches,
            self.len(),
            self.similarity_pct() as i64,
            self.score(),
        )
    }
}

/// 构建 NW 得分矩阵。
/// 边界行/列按累积间隙罚分初始化，内部单元取
/// max(对角 + match/mismatch, 上方 + gap, 左方 + gap)。
/// 时间与空间均为 O(len_a * len_b)。
pub fn build_matrix(seq_a: &[u8], seq_b: &[u8], p: NwParams) -> ScoreMatrix {
    let rows = seq_b.len() + 1;
    let cols = seq_a.len() + 1;
    let mut m = ScoreMatrix::zeroed(rows, cols);

    for j in 1..cols {
        m.set(0, j, j as i32 * p.gap_score);
    }
    for i in 1..rows {
        m.set(i, 0, i as i32 * p.gap_score);
    }

    for i in 1..rows {
        for j in 1..cols {
            let subst = if seq_b[i - 1] == seq_a[j - 1] {
                p.match_score
            } else {
                p.mismatch_score
            };
            let diag = m.get(i - 1, j - 1) + subst;
            let up = m.get(i - 1, j) + p.gap_score;
            let left = m.get(i, j - 1) + p.gap_score;
            m.set(i, j, diag.max(up).max(left));
        }
    }

    m
}

/// 从右下角回溯一条最优路径。
/// 平分裁决（固定的、刻意的设计选择）：对角优先于上方，上方优先于左方。
/// 当最优得分可由多条路径达到时，这个顺序决定了输出的那一条。
pub fn traceback(m: &ScoreMatrix, seq_a: &[u8], seq_b: &[u8], p: NwParams) -> NwResult {
    let mut i = seq_b.len();
    let mut j = seq_a.len();

    let mut aligned_a: Vec<u8> = Vec::with_capacity(i + j);
    let mut aligned_b: Vec<u8> = Vec::with_capacity(i + j);
    let mut path: Vec<(usize, usize)> = Vec::with_capacity(i + j + 1);
    let mut matches = 0usize;

    path.push((i, j));

    while i > 0 || j > 0 {
        let here = m.get(i, j);

        let diag_ok = i > 0 && j > 0 && {
            let subst = if seq_a[j - 1] == seq_b[i - 1] {
                p.match_score
            } else {
                p.mismatch_score
            };
            here == m.get(i - 1, j - 1) + subst
        };

        if diag_ok {
            aligned_a.push(seq_a[j - 1]);
            aligned_b.push(seq_b[i - 1]);
            if seq_a[j - 1] == seq_b[i - 1] {
                matches += 1;
            }
            i -= 1;
            j -= 1;
        } else if i > 0 && here == m.get(i - 1, j) + p.gap_score {
            aligned_a.push(GAP);
            aligned_b.push(seq_b[i - 1]);
            i -= 1;
        } else {
            aligned_a.push(seq_a[j - 1]);
            aligned_b.push(GAP);
            j -= 1;
        }

        path.push((i, j));
    }

    // 回溯按从尾到头生成，末尾一次反转
    aligned_a.reverse();
    aligned_b.reverse();

    NwResult {
        aligned_a,
        aligned_b,
        matches,
        matrix: m.clone(),
        path,
    }
}

/// 完整的全局对齐入口：建矩阵 + 回溯。
/// 对任意两条有限序列（含空序列）都是全函数，不会失败。
pub fn nw_align(seq_a: &[u8], seq_b: &[u8], p: NwParams) -> NwResult {
    let m = build_matrix(seq_a, seq_b, p);
    traceback(&m, seq_a, seq_b, p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_boundary_and_cells() {
        // a="GA", b="G", 打分 {1,-1,-1}
        let p = NwParams {
            match_score: 1,
            mismatch_score: -1,
            gap_score: -1,
        };
        let m = build_matrix(b"GA", b"G", p);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.row(0), &[0, -1, -2]);
        assert_eq!(m.row(1), &[-1, 1, 0]);
    }

    #[test]
    fn self_alignment_has_no_gaps() {
        // match > mismatch 且 match > 2*gap 时对角严格占优
        let s = b"ACGTACGT";
        let res = nw_align(s, s, NwParams::default());
        assert_eq!(res.aligned_a, s.to_vec());
        assert_eq!(res.aligned_b, s.to_vec());
        assert_eq!(res.matches, s.len());
        assert_eq!(res.score(), s.len() as i32);
    }

    #[test]
    fn empty_against_nonempty_is_all_gaps() {
        let res = nw_align(b"", b"ACGT", NwParams::default());
        assert_eq!(res.aligned_a, b"----".to_vec());
        assert_eq!(res.aligned_b, b"ACGT".to_vec());
        assert_eq!(res.matches, 0);
        assert_eq!(res.path, vec![(4, 0), (3, 0), (2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn both_empty() {
        let res = nw_align(b"", b"", NwParams::default());
        assert!(res.is_empty());
        assert_eq!(res.path, vec![(0, 0)]);
        assert_eq!(res.score(), 0);
    }

    #[test]
    fn lab_reference_pair() {
        // 等长、高相似度的参考序列对；gap=0 时错配会被自由间隙对替换，
        // 因此匹配数达到 14，长度仍两侧一致
        let a = b"ACCGTGAAGCCAATAC";
        let b = b"AGCGTGCAGCCAATAC";
        let res = nw_align(a, b, NwParams::default());
        assert_eq!(res.aligned_a.len(), res.aligned_b.len());
        assert!(res.aligned_a.len() >= a.len());
        assert!(res.matches >= 13);
        assert!(res.matches <= a.len().min(b.len()));
        assert_eq!(res.score(), 14);
    }

    #[test]
    fn lab_reference_pair_penalized_gaps() {
        // 间隙罚分足够重时，错配保留在对角上，对齐长度等于输入长度
        let a = b"ACCGTGAAGCCAATAC";
        let b = b"AGCGTGCAGCCAATAC";
        let p = NwParams {
            match_score: 1,
            mismatch_score: -1,
            gap_score: -2,
        };
        let res = nw_align(a, b, p);
        assert_eq!(res.aligned_a.len(), 16);
        assert_eq!(res.aligned_b.len(), 16);
        assert_eq!(res.matches, 14);
    }

    #[test]
    fn tie_break_prefers_diagonal() {
        // 全零打分下所有方向得分相等，锁定对角优先的裁决顺序
        let p = NwParams {
            match_score: 0,
            mismatch_score: 0,
            gap_score: 0,
        };
        let res = nw_align(b"AC", b"GT", p);
        assert_eq!(res.aligned_a, b"AC".to_vec());
        assert_eq!(res.aligned_b, b"GT".to_vec());
        assert_eq!(res.matches, 0);
        assert_eq!(res.path, vec![(2, 2), (1, 1), (0, 0)]);
    }

    #[test]
    fn tie_break_prefers_up_over_left() {
        // 对角被排除后（i>0 且 j>0 不成立的列边界），先走上方
        let p = NwParams {
            match_score: 0,
            mismatch_score: 0,
            gap_score: 0,
        };
        let res = nw_align(b"A", b"GT", p);
        // 回溯从 (2,1)：对角与上方同分，取对角；剩余 (1,0) 只能向上
        assert_eq!(res.aligned_a.len(), res.aligned_b.len());
        assert_eq!(res.path.first(), Some(&(2, 1)));
        assert_eq!(res.path.last(), Some(&(0, 0)));
    }

    #[test]
    fn alignment_length_bounds() {
        let a = b"ACGTACC";
        let b = b"TTACG";
        let res = nw_align(a, b, NwParams::default());
        assert_eq!(res.aligned_a.len(), res.aligned_b.len());
        assert!(res.aligned_a.len() >= a.len().max(b.len()));
        assert!(res.matches <= a.len().min(b.len()));
    }

    #[test]
    fn marker_line_and_pretty() {
        let res = nw_align(b"ACGT", b"ACGT", NwParams::default());
        assert_eq!(res.marker_line(), "||||");
        let pretty = res.to_pretty();
        assert!(pretty.contains("Matches    = 4"));
        assert!(pretty.contains("Similarity = 100 %"));
    }

    #[test]
    fn path_steps_are_unit_moves() {
        let res = nw_align(b"ACCGT", b"AGT", NwParams::default());
        assert_eq!(res.path.first(), Some(&(3, 5)));
        assert_eq!(res.path.last(), Some(&(0, 0)));
        for w in res.path.windows(2) {
            let (i0, j0) = w[0];
            let (i1, j1) = w[1];
            let di = i0 - i1;
            let dj = j0 - j1;
            assert!(matches!((di, dj), (1, 1) | (1, 0) | (0, 1)));
        }
    }
}
