//! # 循环汇总表导出
//!
//! 每个循环输出一行，列为 21 个循环属性（固定顺序），数值格式可配置。
//!
//! ## 输出示例（默认格式）
//! ```text
//! # cycle_id charge_capacity discharge_capacity ...
//! 1.00000e+00 1.23400e+00 1.19800e+00 ...
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/cycles.rs` 使用
//! - 使用 `models/session.rs`
//! - 使用 `csv` 库写入分隔文本

use crate::error::{MtiError, Result};
use crate::models::Session;

use std::io::Write;
use std::path::{Path, PathBuf};

/// 数值记数法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// `1.23450e+02`
    Scientific,
    /// `123.45000`
    Fixed,
}

/// 汇总表格式
#[derive(Debug, Clone)]
pub struct TableFormat {
    pub notation: Notation,
    pub precision: usize,
    pub delimiter: u8,
    pub header: bool,
}

impl Default for TableFormat {
    fn default() -> Self {
        TableFormat {
            notation: Notation::Scientific,
            precision: 5,
            delimiter: b' ',
            header: true,
        }
    }
}

impl TableFormat {
    /// 按配置格式化单个数值
    pub fn format(&self, value: f64) -> String {
        match self.notation {
            Notation::Fixed => format!("{:.*}", self.precision, value),
            Notation::Scientific => format_scientific(value, self.precision),
        }
    }
}

/// C 风格科学计数法：指数带符号且至少两位
fn format_scientific(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = format!("{:.*e}", precision, value);
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => raw,
    }
}

/// 默认输出路径：`<输入文件名去扩展名>.cycles.dat`（当前目录）
pub fn default_output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("session");
    PathBuf::from(format!("{}.cycles.dat", stem))
}

/// 把汇总表写入任意输出
pub fn write_cycle_table<W: Write>(session: &Session, writer: W, format: &TableFormat) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(format.delimiter)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    if format.header {
        let names: Vec<String> = Session::property_names()
            .iter()
            .enumerate()
            .map(|(i, n)| if i == 0 { format!("# {}", n) } else { n.to_string() })
            .collect();
        wtr.write_record(&names)?;
    }

    for row in session.property_table() {
        wtr.write_record(row.iter().map(|v| format.format(*v)))?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// 把汇总表写入文件
pub fn save_cycle_table(session: &Session, output_path: &Path, format: &TableFormat) -> Result<()> {
    let file = std::fs::File::create(output_path).map_err(|e| MtiError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    write_cycle_table(session, std::io::BufWriter::new(file), format)
}
