//! # 统一错误处理模块
//!
//! 定义 mtibattery 的所有错误类型，使用 `thiserror` 派生。
//!
//! 解析阶段的错误（流、结构、字段解码）都会中止整个 Session 的构建；
//! 指标计算阶段的错误（效率模式、缺失步骤）在查询时才出现。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// mtibattery 统一错误类型
#[derive(Error, Debug)]
pub enum MtiError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stream read failed after line {line}")]
    StreamError {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 结构错误
    // ─────────────────────────────────────────────────────────────
    #[error("Line {line}: expected {expected}, found {found}")]
    UnexpectedLine {
        line: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Line {line}: input ended while expecting {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    #[error("Line {line}: {kind} needs at least {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 字段解码错误
    // ─────────────────────────────────────────────────────────────
    #[error("Line {line}: cannot decode field '{field}' from {value:?}\nReason: {reason}")]
    DecodeError {
        line: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 指标计算错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unsupported efficiency mode '{0}' (expected 'standard' or 'inverse')")]
    UnsupportedMode(String),

    #[error("Cycle {cycle_id} has no '{label}' step")]
    MissingStep { cycle_id: i64, label: String },

    #[error("Cycle {cycle_id}: '{label}' step has zero duration")]
    ZeroDuration { cycle_id: i64, label: String },

    // ─────────────────────────────────────────────────────────────
    // 查询与导出错误
    // ─────────────────────────────────────────────────────────────
    #[error("Cycle {0} not found")]
    CycleNotFound(i64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MtiError>;
