//! # steps 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/steps.rs`

use clap::Args;
use std::path::PathBuf;

/// steps 子命令参数
#[derive(Args, Debug)]
pub struct StepsArgs {
    /// Analyzer export file (tab separated)
    pub file: PathBuf,

    /// Cycle id to inspect
    #[arg(long)]
    pub cycle: i64,
}
