//! # seqsim-rust
//!
//! 基于 Needleman-Wunsch 的 Rust 版序列相似度工具箱。
//!
//! 本 crate 提供核苷酸序列对比的分析核心，包括：
//!
//! - **全局对齐**：Needleman-Wunsch 动态规划矩阵 + 确定性回溯（对角 > 上 > 左）
//! - **相似度评分**：同一性、加权归一化、Jaccard k-mer 三种独立公式
//! - **窗口扫描**：对两条基因组级长序列做粗到细搜索，定位最相似的短窗口对
//!
//! ## 快速示例
//!
//! ```rust
//! use seqsim_rust::align::{nw_align, identity_score, NwParams};
//!
//! let res = nw_align(b"ACCGT", b"ACGT", NwParams::default());
//! assert_eq!(res.aligned_a.len(), res.aligned_b.len());
//! println!("{}", res.to_pretty());
//!
//! let (pct, matches) = identity_score(b"ACGT", b"ACGA");
//! assert_eq!((pct, matches), (75.0, 3));
//! ```
//!
//! ## 模块说明
//!
//! - [`io`] — FASTA 文件解析与基因组拼接加载
//! - [`align`] — 对齐核心（NW 矩阵/回溯、相似度评分、窗口扫描）
//! - [`util`] — 序列规范化与间隙符号
//! - [`error`] — 核心的确定性错误类型

pub mod align;
pub mod error;
pub mod io;
pub mod util;
