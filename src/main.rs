//! # mtibattery - 电池循环分析仪导出文件工具
//!
//! 命令行入口，只读取库解析出的 Session。
//!
//! ## 子命令
//! - `summary` - 会话概览
//! - `cycles`  - 导出循环汇总表
//! - `steps`   - 查看单个循环的步骤
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑，使用 mtibattery 库)
//!   └── utils/      (输出、spinner、日志)
//! ```

mod cli;
mod commands;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::setup_logging(cli.log_level);

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
