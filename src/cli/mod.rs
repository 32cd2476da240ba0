//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `summary`: 会话概览（循环数、总时长、每循环指标）
//! - `cycles`: 导出循环汇总表
//! - `steps`: 查看单个循环的步骤
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: summary, cycles, steps

pub mod cycles;
pub mod steps;
pub mod summary;

use clap::{Parser, Subcommand, ValueEnum};

/// mtibattery - 电池循环分析仪导出文件工具
#[derive(Parser)]
#[command(name = "mtibattery")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Inspect MTI battery analyzer cycling exports", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (overridden by RUST_LOG)
    #[arg(long, global = true, env = "MTI_LOG_LEVEL", value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Print a per-cycle overview of an export file
    Summary(summary::SummaryArgs),

    /// Write the per-cycle property table (one row per cycle)
    Cycles(cycles::CyclesArgs),

    /// List the steps of one cycle
    Steps(steps::StepsArgs),
}

/// 日志级别
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
