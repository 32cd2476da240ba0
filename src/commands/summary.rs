//! # summary 命令实现
//!
//! 显示会话概览：循环数、总时长，以及每个循环的时长、容量与效率。
//!
//! ## 依赖关系
//! - 使用 `cli/summary.rs` 定义的参数
//! - 使用 `models/`
//! - 使用 `utils/output.rs`

use super::load_session;
use crate::cli::summary::SummaryArgs;
use crate::utils::output;
use mtibattery::models::{Cycle, EfficiencyMode};
use mtibattery::parsers::fields::FieldValue;
use mtibattery::{MtiError, Result};

use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled};

/// 概览表的一行
#[derive(Debug, Clone, Serialize, Tabled)]
struct CycleRow {
    #[tabled(rename = "Cycle")]
    cycle: i64,
    #[tabled(rename = "Steps")]
    steps: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Cap_Chg")]
    charge_capacity: String,
    #[tabled(rename = "Cap_DChg")]
    discharge_capacity: String,
    #[tabled(rename = "Efficiency")]
    efficiency: String,
}

impl CycleRow {
    fn from_cycle(cycle: &Cycle, mode: EfficiencyMode) -> Self {
        CycleRow {
            cycle: cycle.id,
            steps: cycle.labels().collect::<Vec<_>>().join(","),
            duration: output::format_duration(cycle.duration()),
            charge_capacity: property_text(cycle, "charge_capacity"),
            discharge_capacity: property_text(cycle, "discharge_capacity"),
            efficiency: cycle
                .efficiency(mode)
                .map(|e| format!("{:.4}", e))
                .unwrap_or_else(|_| "n/a".to_string()),
        }
    }
}

fn property_text(cycle: &Cycle, name: &str) -> String {
    match cycle.property(name) {
        Some(FieldValue::Float(v)) => format!("{:.4}", v),
        Some(other) => other.as_f64().map(|v| v.to_string()).unwrap_or_default(),
        None => String::new(),
    }
}

/// 执行 summary 命令
pub fn execute(args: SummaryArgs) -> Result<()> {
    output::print_header("Session Summary");

    let session = load_session(&args.file)?;
    let mode = EfficiencyMode::from(args.mode);

    if session.is_empty() {
        output::print_warning("No cycles found in file.");
        return Ok(());
    }

    output::print_info(&format!(
        "Total duration: {}",
        output::format_duration(session.duration())
    ));

    let rows: Vec<CycleRow> = session
        .cycles()
        .iter()
        .map(|c| CycleRow::from_cycle(c, mode))
        .collect();

    let missing = rows.iter().filter(|r| r.efficiency == "n/a").count();
    if missing > 0 {
        output::print_warning(&format!(
            "{} cycles lack a CC_Chg/CC_DChg pair or have a zero duration; efficiency shown as n/a",
            missing
        ));
    }

    let shown = if args.top_n == 0 {
        rows.len()
    } else {
        args.top_n.min(rows.len())
    };
    output::print_header(&format!(
        "First {} of {} Cycles ({} efficiency)",
        shown,
        rows.len(),
        mode
    ));
    println!("{}", Table::new(&rows[..shown]));

    if let Some(ref path) = args.csv {
        save_rows_csv(&rows, path)?;
        output::print_success(&format!("Overview saved to '{}'", path.display()));
    }

    Ok(())
}

/// 保存概览到 CSV
fn save_rows_csv(rows: &[CycleRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| MtiError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    Ok(())
}
