/// 对齐输出中使用的间隙符号
pub const GAP: u8 = b'-';

/// 规范化核苷酸序列：大写化，U -> T，其余非 {A,C,G,T,N} 字符映射为 N。
/// 比对核心假定输入已经过此处理，核心内部不再做大小写折叠。
pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .map(|&b| match b.to_ascii_uppercase() {
            c @ (b'A' | b'C' | b'G' | b'T' | b'N') => c,
            b'U' => b'T',
            _ => b'N',
        })
        .collect()
}
