use thiserror::Error;

pub type Result<T> = std::result::Result<T, SeqSimError>;

/// 比对核心的确定性错误。全部在调用入口同步返回，不存在可重试的瞬态错误。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeqSimError {
    /// 扫描配置非法：窗口或步长必须为正，进入扫描循环前拒绝
    #[error("scan parameters must be positive: window={window}, stride_a={stride_a}, stride_b={stride_b}")]
    BadScanParams {
        window: usize,
        stride_a: usize,
        stride_b: usize,
    },

    /// 候选窗口集合为空：窗口长度超过了至少一条输入序列
    #[error("window of {window} bp does not fit: sequence lengths are {len_a} and {len_b} bp")]
    EmptySearchSpace {
        window: usize,
        len_a: usize,
        len_b: usize,
    },

    /// 加权评分归一化分母为零：match 奖励与 mismatch 罚分不能同时为 0
    #[error("weighted score is undefined when match reward and mismatch penalty are both zero")]
    ZeroScoreRange,
}
