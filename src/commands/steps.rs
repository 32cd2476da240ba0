//! # steps 命令实现
//!
//! 列出单个循环的全部步骤：标签、时长、电压差、记录数与 id 范围。
//!
//! ## 依赖关系
//! - 使用 `cli/steps.rs` 定义的参数
//! - 使用 `models/`
//! - 使用 `utils/output.rs`

use super::load_session;
use crate::cli::steps::StepsArgs;
use crate::utils::output;
use mtibattery::models::{Step, StepKind};
use mtibattery::{MtiError, Result};

use colored::Colorize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: i64,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "V start")]
    voltage_start: String,
    #[tabled(rename = "V end")]
    voltage_end: String,
    #[tabled(rename = "ΔV")]
    voltage_delta: String,
    #[tabled(rename = "Records")]
    records: usize,
    #[tabled(rename = "Id range")]
    id_range: String,
}

impl From<&Step> for StepRow {
    fn from(step: &Step) -> Self {
        let label = match step.kind() {
            StepKind::Charge => step.label.red().to_string(),
            StepKind::Discharge => step.label.blue().to_string(),
            StepKind::Rest | StepKind::Other => step.label.clone(),
        };
        StepRow {
            step: step.step_id,
            label,
            duration: output::format_duration(step.duration),
            voltage_start: format!("{:.4}", step.voltage_start),
            voltage_end: format!("{:.4}", step.voltage_end),
            voltage_delta: format!("{:+.4}", step.voltage_delta()),
            records: step.records().len(),
            id_range: step
                .id_range()
                .map(|(a, b)| format!("{}-{}", a, b))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// 执行 steps 命令
pub fn execute(args: StepsArgs) -> Result<()> {
    output::print_header(&format!("Steps of Cycle {}", args.cycle));

    let session = load_session(&args.file)?;
    let cycle = session
        .cycle(args.cycle)
        .ok_or(MtiError::CycleNotFound(args.cycle))?;

    let rows: Vec<StepRow> = cycle.steps().iter().map(StepRow::from).collect();
    println!("{}", Table::new(&rows));

    output::print_info(&format!(
        "Cycle duration: {}",
        output::format_duration(cycle.duration())
    ));
    Ok(())
}
