//! # 步骤记录缓冲
//!
//! 累积当前步骤的记录行，flush 时解码为按列存储的 `RecordTable`。
//!
//! ## 记录行格式
//! ```text
//! \t\tid\trel_time\tvolt\t-\t-\tcapacity\tsp_capacity\t-\t-\ttime
//!      0   1         2     3  4  5         6            7  8  9
//! ```
//! 前两个空字段在解码时跳过，数据列从 0 开始计数。
//!
//! ## 依赖关系
//! - 被 `parsers/session.rs` 使用
//! - 使用 `parsers/fields.rs`, `models/step.rs`

use super::classify::split_fields;
use super::fields::{decode_row, FieldValue, RECORD_DATA_COUNT, RECORD_FIELDS};
use crate::error::{MtiError, Result};
use crate::models::RecordTable;

/// 记录行开头的空字段数
const RECORD_LEAD_FIELDS: usize = 2;

/// 当前步骤尚未解码的记录行
#[derive(Debug, Default)]
pub struct StepRecordBuffer {
    /// (行号, 原始行)
    rows: Vec<(usize, String)>,
}

impl StepRecordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 追加一条原始记录行
    pub fn push(&mut self, line_no: usize, raw: &str) {
        self.rows.push((line_no, raw.to_string()));
    }

    /// 解码全部缓冲行并清空缓冲
    pub fn flush(&mut self) -> Result<RecordTable> {
        let rows = std::mem::take(&mut self.rows);
        let mut table = RecordTable::with_capacity(rows.len());

        for (line_no, raw) in &rows {
            let fields = split_fields(raw);
            if fields.len() < RECORD_LEAD_FIELDS + RECORD_DATA_COUNT {
                return Err(MtiError::FieldCount {
                    line: *line_no,
                    kind: "record row",
                    expected: RECORD_LEAD_FIELDS + RECORD_DATA_COUNT,
                    found: fields.len(),
                });
            }

            let values = decode_row(
                &fields[RECORD_LEAD_FIELDS..],
                &RECORD_FIELDS,
                RECORD_DATA_COUNT,
                "record row",
                *line_no,
            )?;

            match values.as_slice() {
                [FieldValue::Int(id), FieldValue::Span(rel), FieldValue::Float(volt), FieldValue::Float(cap), FieldValue::Float(sp), FieldValue::Timestamp(time)] =>
                {
                    table.id.push(*id);
                    table.rel_time.push(*rel);
                    table.volt.push(*volt);
                    table.capacity.push(*cap);
                    table.sp_capacity.push(*sp);
                    table.time.push(*time);
                }
                _ => {
                    return Err(MtiError::FieldCount {
                        line: *line_no,
                        kind: "record row",
                        expected: RECORD_FIELDS.len(),
                        found: values.len(),
                    })
                }
            }
        }

        Ok(table)
    }
}
