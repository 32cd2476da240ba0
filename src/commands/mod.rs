//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。所有命令只读取解析完成的 Session。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `utils/` 与库中的 `parsers/`, `models/`, `export`
//! - 子模块: summary, cycles, steps

pub mod cycles;
pub mod steps;
pub mod summary;

use crate::cli::Commands;
use crate::utils::{output, progress};
use mtibattery::{parse_session_file, Result, Session};
use std::path::Path;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Summary(args) => summary::execute(args),
        Commands::Cycles(args) => cycles::execute(args),
        Commands::Steps(args) => steps::execute(args),
    }
}

/// 解析输入文件，期间显示 spinner
fn load_session(path: &Path) -> Result<Session> {
    let pb = progress::create_spinner(&format!("Reading {}", path.display()));
    let result = parse_session_file(path);
    pb.finish_and_clear();

    let session = result?;
    output::print_info(&format!(
        "Read {} cycles from '{}'",
        session.cycle_count(),
        path.display()
    ));
    Ok(session)
}
