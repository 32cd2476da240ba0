//! # mtibattery - 电池循环分析仪导出文件读取库
//!
//! 读取分析仪导出的制表符分隔文本，单次扫描重建
//! Session → Cycle → Step → 记录表 的层级结构，并计算时长与效率等指标。
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── parsers/   (行游标、行分类、字段转换、记录缓冲、状态机)
//!   ├── models/    (Session, Cycle, Step, 派生指标)
//!   ├── export.rs  (循环汇总表导出)
//!   └── error.rs   (错误处理)
//! ```
//!
//! ## 示例
//! ```no_run
//! use mtibattery::{parse_session_file, EfficiencyMode};
//! use std::path::Path;
//!
//! let session = parse_session_file(Path::new("cell.txt"))?;
//! for cycle in session.cycles() {
//!     println!("{} {:?}", cycle, cycle.efficiency(EfficiencyMode::Standard));
//! }
//! # Ok::<(), mtibattery::MtiError>(())
//! ```

pub mod error;
pub mod export;
pub mod models;
pub mod parsers;

pub use error::{MtiError, Result};
pub use models::{Cycle, EfficiencyMode, RecordTable, Session, Step};
pub use parsers::{parse_session, parse_session_file};
