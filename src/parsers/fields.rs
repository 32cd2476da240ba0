//! # 字段转换器
//!
//! 按位置把制表符分隔的字段转换为类型化的值。
//!
//! 每一种行（循环头、步骤头、记录行）都对应一张固定顺序的
//! `FieldSpec` 表：`(位置, 名称, 转换类型)`。转换类型是封闭枚举
//! `FieldKind`，由 `convert` 统一分派。
//!
//! ## 时长格式
//! ```text
//! H:M:S        3 段，循环头 platform_duration，结果为浮点秒
//! H:M:S:ms     4 段，步骤头时长与记录 rel_time，毫秒段解析后丢弃
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/session.rs`, `parsers/records.rs` 使用
//! - 使用 `chrono` 表示时长与时间戳

use crate::error::{MtiError, Result};
use chrono::{Duration, NaiveDateTime};

/// 记录时间戳格式（空格已替换为 `T`）
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// 转换类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 整数
    Int,
    /// 浮点数
    Float,
    /// 去掉末尾一个字符（单位/百分号）后解析浮点数
    PercentStripFloat,
    /// 截断到第一个 `#` 之前再解析浮点数
    TruncateFloat,
    /// `H:M:S`，结果为浮点秒
    Duration3,
    /// `H:M:S:ms`，毫秒被丢弃
    Duration4,
    /// `YYYY-MM-DD HH:MM:SS[.fff]`
    Timestamp,
    /// 原样保留的字符串
    Text,
}

/// 转换后的字段值
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    /// 浮点秒（来自 3 段时长）
    Seconds(f64),
    Span(Duration),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl FieldValue {
    /// 数值视图，用于导出表格；文本返回 None
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) | FieldValue::Seconds(v) => Some(*v),
            FieldValue::Span(d) => Some(span_seconds(*d)),
            FieldValue::Timestamp(t) => Some(t.and_utc().timestamp() as f64),
            FieldValue::Text(_) => None,
        }
    }
}

/// 单个字段的位置描述
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// 在拆分后字段序列中的位置
    pub index: usize,
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn spec(index: usize, name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { index, name, kind }
}

/// 循环头字段表（21 个字段）
pub const CYCLE_FIELDS: [FieldSpec; 21] = [
    spec(0, "cycle_id", FieldKind::Int),
    spec(1, "charge_capacity", FieldKind::Float),
    spec(2, "discharge_capacity", FieldKind::Float),
    spec(3, "charge_specific_capacity", FieldKind::Float),
    spec(4, "discharge_specific_capacity", FieldKind::Float),
    spec(5, "efficiency", FieldKind::Float),
    spec(6, "charge_energy", FieldKind::Float),
    spec(7, "discharge_energy", FieldKind::Float),
    spec(8, "mid_value_voltage", FieldKind::Float),
    spec(9, "charge_capacity_2", FieldKind::Float),
    spec(10, "charge_ratio", FieldKind::Float),
    spec(11, "platform_capacity", FieldKind::Float),
    spec(12, "platform_specific_capacity", FieldKind::Float),
    spec(13, "platform_efficiency", FieldKind::TruncateFloat),
    spec(14, "platform_duration", FieldKind::Duration3),
    spec(15, "charge_capacitance", FieldKind::Float),
    spec(16, "discharge_capacitance", FieldKind::Float),
    spec(17, "resistance_delta", FieldKind::Float),
    spec(18, "charge_specific_energy", FieldKind::Float),
    spec(19, "discharge_specific_energy", FieldKind::Float),
    spec(20, "energy_efficiency", FieldKind::PercentStripFloat),
];

/// 步骤头字段表（第 0 个字段为空，共 11 个字段）
pub const STEP_FIELDS: [FieldSpec; 10] = [
    spec(1, "step_id", FieldKind::Int),
    spec(2, "label", FieldKind::Text),
    spec(3, "duration", FieldKind::Duration4),
    spec(4, "capacity", FieldKind::Float),
    spec(5, "specific_capacity", FieldKind::Float),
    spec(6, "energy", FieldKind::Float),
    spec(7, "specific_energy", FieldKind::Float),
    spec(8, "capacitance", FieldKind::Float),
    spec(9, "voltage_start", FieldKind::Float),
    spec(10, "voltage_end", FieldKind::Float),
];

/// 记录行字段表，位置从去掉前两个空字段后的数据列算起
pub const RECORD_FIELDS: [FieldSpec; 6] = [
    spec(0, "id", FieldKind::Int),
    spec(1, "rel_time", FieldKind::Duration4),
    spec(2, "volt", FieldKind::Float),
    spec(5, "capacity", FieldKind::Float),
    spec(6, "sp_capacity", FieldKind::Float),
    spec(9, "time", FieldKind::Timestamp),
];

/// 循环头的最少字段数
pub const CYCLE_FIELD_COUNT: usize = 21;
/// 步骤头的最少字段数
pub const STEP_FIELD_COUNT: usize = 11;
/// 记录行数据列的最少列数
pub const RECORD_DATA_COUNT: usize = 10;

/// 按转换类型解析一个原始字段
pub fn convert(kind: FieldKind, raw: &str) -> std::result::Result<FieldValue, String> {
    match kind {
        FieldKind::Int => parse_int(raw).map(FieldValue::Int),
        FieldKind::Float => parse_float(raw).map(FieldValue::Float),
        FieldKind::PercentStripFloat => {
            let mut chars = raw.chars();
            if chars.next_back().is_none() {
                return Err("empty field".to_string());
            }
            parse_float(chars.as_str()).map(FieldValue::Float)
        }
        FieldKind::TruncateFloat => {
            let head = raw.split('#').next().unwrap_or(raw);
            parse_float(head).map(FieldValue::Float)
        }
        FieldKind::Duration3 => parse_duration3(raw).map(FieldValue::Seconds),
        FieldKind::Duration4 => parse_duration4(raw).map(FieldValue::Span),
        FieldKind::Timestamp => parse_timestamp(raw).map(FieldValue::Timestamp),
        FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
    }
}

/// 按字段表解码一整行，返回与表同序的值
///
/// 行字段数不足时报 `FieldCount`，任一字段失败时报 `DecodeError`。
pub fn decode_row(
    fields: &[&str],
    specs: &[FieldSpec],
    min_fields: usize,
    kind: &'static str,
    line: usize,
) -> Result<Vec<FieldValue>> {
    if fields.len() < min_fields {
        return Err(MtiError::FieldCount {
            line,
            kind,
            expected: min_fields,
            found: fields.len(),
        });
    }

    specs
        .iter()
        .map(|spec| {
            let raw = fields[spec.index];
            convert(spec.kind, raw).map_err(|reason| MtiError::DecodeError {
                line,
                field: spec.name,
                value: raw.to_string(),
                reason,
            })
        })
        .collect()
}

fn parse_int(raw: &str) -> std::result::Result<i64, String> {
    raw.trim().parse::<i64>().map_err(|e| e.to_string())
}

fn parse_float(raw: &str) -> std::result::Result<f64, String> {
    raw.trim().parse::<f64>().map_err(|e| e.to_string())
}

/// 拆分冒号分隔的时长，要求恰好 `parts` 段
fn split_duration(raw: &str, parts: usize) -> std::result::Result<Vec<i64>, String> {
    let pieces: Vec<&str> = raw.trim().split(':').collect();
    if pieces.len() != parts {
        return Err(format!(
            "expected {} colon-separated parts, found {}",
            parts,
            pieces.len()
        ));
    }
    pieces.iter().map(|p| parse_int(p)).collect()
}

/// 组合时分秒，任一分量或求和越界时报错
fn hms(hours: i64, minutes: i64, seconds: i64) -> std::result::Result<Duration, String> {
    Duration::try_hours(hours)
        .zip(Duration::try_minutes(minutes))
        .zip(Duration::try_seconds(seconds))
        .and_then(|((h, m), s)| h.checked_add(&m)?.checked_add(&s))
        .ok_or_else(|| "duration out of range".to_string())
}

/// 解析 `H:M:S`，返回浮点秒
pub fn parse_duration3(raw: &str) -> std::result::Result<f64, String> {
    let p = split_duration(raw, 3)?;
    hms(p[0], p[1], p[2]).map(span_seconds)
}

/// 解析 `H:M:S:ms`，毫秒段必须是整数但不计入结果
pub fn parse_duration4(raw: &str) -> std::result::Result<Duration, String> {
    let p = split_duration(raw, 4)?;
    hms(p[0], p[1], p[2])
}

/// 解析记录时间戳，日期与时间之间的单个空格替换为 ISO-8601 的 `T`
pub fn parse_timestamp(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    let iso = raw.trim().replacen(' ', "T", 1);
    NaiveDateTime::parse_from_str(&iso, TIMESTAMP_FORMAT).map_err(|e| e.to_string())
}

/// 时长转浮点秒
pub fn span_seconds(d: Duration) -> f64 {
    d.num_milliseconds() as f64 / 1000.0
}
