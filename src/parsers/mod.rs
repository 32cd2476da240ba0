//! # 解析器模块
//!
//! 读取电池分析仪导出的制表符分隔文本，重建 Session 层级结构。
//!
//! ## 数据流
//! ```text
//! LineCursor -> classify -> session 状态机 -> Cycle/Step -> fields -> StepRecordBuffer
//! ```
//!
//! ## 依赖关系
//! - 被二进制命令和库调用方使用
//! - 使用 `models/` 数据模型
//! - 子模块: cursor, classify, fields, records, session

pub mod classify;
pub mod cursor;
pub mod fields;
pub mod records;
pub mod session;

pub use session::{parse_session, PREAMBLE_LINES};

use crate::error::{MtiError, Result};
use crate::models::Session;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 解析分析仪导出文件
///
/// 文件句柄只在本函数内持有，任何返回路径都会关闭。
pub fn parse_session_file(path: &Path) -> Result<Session> {
    let file = File::open(path).map_err(|e| MtiError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_session(BufReader::new(file), &path.display().to_string())
}
