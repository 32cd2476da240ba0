//! # 数据模型模块
//!
//! 定义 Session → Cycle → Step → 记录表 的层级数据模型及其派生指标。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `export.rs` 和二进制命令使用
//! - 子模块: session, cycle, step, metrics

pub mod cycle;
pub mod metrics;
pub mod session;
pub mod step;

pub use cycle::{Cycle, Property};
pub use metrics::EfficiencyMode;
pub use session::Session;
pub use step::{labels, Column, RecordTable, Step, StepKind};
