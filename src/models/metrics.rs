//! # 派生指标
//!
//! 基于已构建的 Session / Cycle / Step 计算时长总和与效率比，全部为只读计算。
//!
//! ## 效率定义
//! - `standard`: 放电时长 / 充电时长
//! - `inverse`:  充电时长 / 放电时长
//!
//! ## 依赖关系
//! - 扩展 `models/cycle.rs`, `models/session.rs`
//! - 使用 `chrono::Duration`

use super::cycle::Cycle;
use super::session::Session;
use super::step::labels;
use crate::error::{MtiError, Result};
use crate::parsers::fields::span_seconds;
use chrono::Duration;
use std::str::FromStr;

/// 效率计算模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EfficiencyMode {
    #[default]
    Standard,
    Inverse,
}

impl FromStr for EfficiencyMode {
    type Err = MtiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(EfficiencyMode::Standard),
            "inverse" => Ok(EfficiencyMode::Inverse),
            other => Err(MtiError::UnsupportedMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for EfficiencyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EfficiencyMode::Standard => write!(f, "standard"),
            EfficiencyMode::Inverse => write!(f, "inverse"),
        }
    }
}

impl Cycle {
    /// 各步骤时长之和（按步骤插入顺序累加，溢出时饱和到 `Duration::MAX`）
    pub fn duration(&self) -> Duration {
        sum_spans(self.steps().iter().map(|s| s.duration))
    }

    /// 循环效率，需要同时存在 `CC_DChg` 与 `CC_Chg` 步骤
    pub fn efficiency(&self, mode: EfficiencyMode) -> Result<f64> {
        let discharge = self.required_duration(labels::CC_DCHG)?;
        let charge = self.required_duration(labels::CC_CHG)?;

        let (num, den, den_label) = match mode {
            EfficiencyMode::Standard => (discharge, charge, labels::CC_CHG),
            EfficiencyMode::Inverse => (charge, discharge, labels::CC_DCHG),
        };

        if den == Duration::zero() {
            return Err(MtiError::ZeroDuration {
                cycle_id: self.id,
                label: den_label.to_string(),
            });
        }

        Ok(span_seconds(num) / span_seconds(den))
    }

    /// 以字符串指定模式计算效率，未知模式为配置错误
    pub fn efficiency_by_name(&self, mode: &str) -> Result<f64> {
        self.efficiency(mode.parse()?)
    }

    fn required_duration(&self, label: &str) -> Result<Duration> {
        self.step(label)
            .map(|s| s.duration)
            .ok_or_else(|| MtiError::MissingStep {
                cycle_id: self.id,
                label: label.to_string(),
            })
    }
}

impl Session {
    /// 全部循环时长之和（溢出时饱和）
    pub fn duration(&self) -> Duration {
        sum_spans(self.cycles().iter().map(Cycle::duration))
    }

    /// 每个循环的 (编号, 效率)；任一循环出错即返回错误
    pub fn efficiencies(&self, mode: EfficiencyMode) -> Result<Vec<(i64, f64)>> {
        self.cycles()
            .iter()
            .map(|c| c.efficiency(mode).map(|e| (c.id, e)))
            .collect()
    }
}

/// 饱和累加时长
fn sum_spans(spans: impl Iterator<Item = Duration>) -> Duration {
    spans.fold(Duration::zero(), |acc, d| {
        acc.checked_add(&d)
            .unwrap_or(if d < Duration::zero() { Duration::MIN } else { Duration::MAX })
    })
}
