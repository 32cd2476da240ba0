//! # cycles 命令实现
//!
//! 把循环汇总表写入文件。
//!
//! ## 依赖关系
//! - 使用 `cli/cycles.rs` 定义的参数
//! - 使用库中的 `export`
//! - 使用 `utils/output.rs`

use super::load_session;
use crate::cli::cycles::CyclesArgs;
use crate::utils::output;
use mtibattery::export::{self, TableFormat};
use mtibattery::{MtiError, Result};

/// 执行 cycles 命令
pub fn execute(args: CyclesArgs) -> Result<()> {
    output::print_header("Exporting Cycle Table");

    let format = TableFormat {
        notation: args.notation.into(),
        precision: args.precision,
        delimiter: parse_delimiter(&args.delimiter)?,
        header: !args.no_header,
    };

    let session = load_session(&args.file)?;
    if session.is_empty() {
        output::print_warning("No cycles found; the table will only contain the header.");
    }

    let output_path = args
        .output
        .unwrap_or_else(|| export::default_output_path(&args.file));
    export::save_cycle_table(&session, &output_path, &format)?;

    output::print_success(&format!(
        "Wrote {} rows to '{}'",
        session.cycle_count(),
        output_path.display()
    ));
    Ok(())
}

/// 分隔符必须是单个 ASCII 字符，`tab` 表示制表符
fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw {
        "tab" | "\\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => Err(MtiError::InvalidArgument(format!(
            "delimiter must be a single ASCII character, got {:?}",
            other
        ))),
    }
}
