//! # cycles 子命令 CLI 定义
//!
//! 导出循环汇总表（21 个循环属性，每循环一行）
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/cycles.rs`

use clap::{Args, ValueEnum};
use mtibattery::export::Notation;
use std::path::PathBuf;

/// 数值记数法
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum NotationArg {
    /// 1.23450e+02
    Scientific,
    /// 123.45000
    Fixed,
}

impl From<NotationArg> for Notation {
    fn from(n: NotationArg) -> Self {
        match n {
            NotationArg::Scientific => Notation::Scientific,
            NotationArg::Fixed => Notation::Fixed,
        }
    }
}

/// cycles 子命令参数
#[derive(Args, Debug)]
pub struct CyclesArgs {
    /// Analyzer export file (tab separated)
    pub file: PathBuf,

    /// Output file [default: <input stem>.cycles.dat]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number notation
    #[arg(long, value_enum, default_value_t = NotationArg::Scientific)]
    pub notation: NotationArg,

    /// Digits after the decimal point
    #[arg(long, default_value_t = 5)]
    pub precision: usize,

    /// Column delimiter (single ASCII character, 'tab' for a tab)
    #[arg(long, default_value = " ")]
    pub delimiter: String,

    /// Omit the '# name ...' header line
    #[arg(long, default_value_t = false)]
    pub no_header: bool,
}
