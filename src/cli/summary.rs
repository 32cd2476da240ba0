//! # summary 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/summary.rs`

use clap::{Args, ValueEnum};
use mtibattery::EfficiencyMode;
use std::path::PathBuf;

/// 效率模式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// discharge time / charge time
    Standard,
    /// charge time / discharge time
    Inverse,
}

impl From<ModeArg> for EfficiencyMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Standard => EfficiencyMode::Standard,
            ModeArg::Inverse => EfficiencyMode::Inverse,
        }
    }
}

/// summary 子命令参数
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Analyzer export file (tab separated)
    pub file: PathBuf,

    /// Efficiency definition
    #[arg(long, value_enum, default_value_t = ModeArg::Standard)]
    pub mode: ModeArg,

    /// Number of cycles to show in the terminal table (0 = all)
    #[arg(long, default_value_t = 20)]
    pub top_n: usize,

    /// Also save the full per-cycle overview as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
