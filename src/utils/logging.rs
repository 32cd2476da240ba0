//! # 日志初始化
//!
//! 安装 `tracing-subscriber`：优先使用 `RUST_LOG`，否则使用命令行给出的级别。
//! 日志写入 stderr，不干扰表格输出。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 使用 `tracing`, `tracing-subscriber`

use crate::cli::LogLevel;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化全局日志
pub fn setup_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mtibattery={}", level)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    if installed.is_ok() {
        debug!("Logging initialized at level: {}", level);
    }
}
