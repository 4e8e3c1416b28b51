use anyhow::Result;
use std::io::BufRead;
use std::path::Path;

use crate::util::dna;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

/// 流式 FASTA 读取器。序列行会被去除空白并大写化；
/// 以 '[' 开头的注记行（某些基因组导出工具的遗留物）一并跳过。
pub struct FastaReader<R: BufRead> {
    lines: std::io::Lines<R>,
    pending: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: None,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(line) => Ok(Some(line?)),
            None => Ok(None),
        }
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        // 定位下一条 header
        let header = loop {
            let line = match self.pending.take() {
                Some(l) => l,
                None => match self.next_line()? {
                    Some(l) => l,
                    None => return Ok(None),
                },
            };
            if let Some(rest) = line.trim().strip_prefix('>') {
                break rest.trim().to_string();
            }
        };

        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let mut seq: Vec<u8> = Vec::new();
        while let Some(line) = self.next_line()? {
            let trimmed = line.trim();
            if trimmed.starts_with('>') {
                self.pending = Some(trimmed.to_string());
                break;
            }
            if trimmed.is_empty() || trimmed.starts_with('[') {
                continue;
            }
            seq.extend(
                trimmed
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .map(|b| b.to_ascii_uppercase()),
            );
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

/// 把一个 FASTA 源的所有记录拼接成一条规范化的裸序列。
/// 基因组常拆成多条 contig 下发，粗扫描按单条连续序列处理即可。
pub fn read_merged<R: BufRead>(reader: R) -> Result<Vec<u8>> {
    let mut r = FastaReader::new(reader);
    let mut merged: Vec<u8> = Vec::new();
    while let Some(rec) = r.next_record()? {
        merged.extend_from_slice(&dna::normalize_seq(&rec.seq));
    }
    Ok(merged)
}

/// 从路径加载并拼接。空结果视为输入错误，立即报告。
pub fn load_merged<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow::anyhow!("cannot open FASTA '{}': {}", path.display(), e))?;
    let merged = read_merged(std::io::BufReader::new(fh))?;
    if merged.is_empty() {
        anyhow::bail!("FASTA '{}' contains no sequence data", path.display());
    }
    Ok(merged)
}
