//! # Session 解析驱动
//!
//! 单次前向扫描输入流，用显式状态机重建 Session → Cycle → Step 层级。
//!
//! ## 状态转换
//! ```text
//! SkipPreamble(3) -> ExpectCycleHeader -> ExpectStepHeader -> ReadRecordRun
//!                          ^                      ^                 |
//!                          |                      +-- 步骤头 -------+
//!                          +------------- 循环头（复用已读行）------+
//! ReadRecordRun / ExpectCycleHeader 遇到输入结束 -> Done
//! ```
//! 记录段中途遇到输入结束是正常结束：当前缓冲写入步骤、当前循环追加到
//! Session。其他任何结构或解码错误都会中止整个构建。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `parsers/{cursor, classify, fields, records}.rs`, `models/`

use super::classify::{classify_fields, split_fields, LineKind};
use super::cursor::{Line, LineCursor, LineRead};
use super::fields::{
    decode_row, FieldValue, CYCLE_FIELDS, CYCLE_FIELD_COUNT, STEP_FIELDS, STEP_FIELD_COUNT,
};
use super::records::StepRecordBuffer;
use crate::error::{MtiError, Result};
use crate::models::{Cycle, Property, Session, Step};
use std::io::BufRead;
use tracing::{debug, info, trace, warn};

/// 文件开头需要跳过的行数
pub const PREAMBLE_LINES: usize = 3;

/// 解析状态
enum State {
    SkipPreamble,
    /// 携带已经读出的循环头行（来自上一个记录段）
    ExpectCycleHeader(Option<Line>),
    ExpectStepHeader,
    ReadRecordRun,
    Done,
}

/// 状态机持有的解析上下文
struct SessionParser<R> {
    cursor: LineCursor<R>,
    preamble: Vec<String>,
    cycles: Vec<Cycle>,
    cycle: Option<Cycle>,
    step: Option<Step>,
    buffer: StepRecordBuffer,
    /// 空行之后预读出的非空行
    lookahead: Option<Line>,
}

impl<R: BufRead> SessionParser<R> {
    fn new(reader: R) -> Self {
        SessionParser {
            cursor: LineCursor::new(reader),
            preamble: Vec::with_capacity(PREAMBLE_LINES),
            cycles: Vec::new(),
            cycle: None,
            step: None,
            buffer: StepRecordBuffer::new(),
            lookahead: None,
        }
    }

    fn run(mut self, source: &str) -> Result<Session> {
        let mut state = State::SkipPreamble;

        loop {
            state = match state {
                State::SkipPreamble => self.skip_preamble()?,
                State::ExpectCycleHeader(pending) => self.expect_cycle_header(pending)?,
                State::ExpectStepHeader => self.expect_step_header()?,
                State::ReadRecordRun => self.read_record_run()?,
                State::Done => break,
            };
        }

        info!(
            source,
            cycles = self.cycles.len(),
            lines = self.cursor.line_no(),
            "Finished reading file"
        );

        Ok(Session::new(source, self.preamble, self.cycles))
    }

    fn skip_preamble(&mut self) -> Result<State> {
        while self.preamble.len() < PREAMBLE_LINES {
            match self.cursor.next_line()? {
                LineRead::Line(line) => self.preamble.push(line.text),
                LineRead::EndOfInput => {
                    debug!("input ended inside the preamble");
                    return Ok(State::Done);
                }
            }
        }
        Ok(State::ExpectCycleHeader(None))
    }

    /// 读取下一行；只有直到输入结束都为空的尾部空行会被忽略
    ///
    /// 其他位置的空行原样返回，由调用方按结构错误处理。
    fn next_content_line(&mut self) -> Result<LineRead> {
        if let Some(line) = self.lookahead.take() {
            return Ok(LineRead::Line(line));
        }

        let blank = match self.cursor.next_line()? {
            LineRead::Line(line) if line.text.is_empty() => line,
            other => return Ok(other),
        };

        loop {
            match self.cursor.next_line()? {
                LineRead::Line(line) if line.text.is_empty() => {}
                LineRead::Line(line) => {
                    self.lookahead = Some(line);
                    return Ok(LineRead::Line(blank));
                }
                LineRead::EndOfInput => {
                    trace!(line = blank.number, "ignoring trailing blank lines");
                    return Ok(LineRead::EndOfInput);
                }
            }
        }
    }

    fn expect_cycle_header(&mut self, pending: Option<Line>) -> Result<State> {
        let line = match pending {
            Some(line) => line,
            None => match self.next_content_line()? {
                LineRead::Line(line) => line,
                LineRead::EndOfInput => return Ok(State::Done),
            },
        };

        let fields = split_fields(&line.text);
        expect_kind(&fields, LineKind::CycleHeader, line.number)?;

        let cycle = build_cycle(&fields, line.number)?;
        debug!(cycle = cycle.id, line = line.number, "cycle opened");
        self.cycle = Some(cycle);

        Ok(State::ExpectStepHeader)
    }

    fn expect_step_header(&mut self) -> Result<State> {
        let line = match self.next_content_line()? {
            LineRead::Line(line) => line,
            LineRead::EndOfInput => {
                return Err(MtiError::UnexpectedEof {
                    line: self.cursor.line_no(),
                    expected: LineKind::StepHeader.describe(),
                })
            }
        };

        expect_kind(&split_fields(&line.text), LineKind::StepHeader, line.number)?;
        self.open_step(line)
    }

    fn read_record_run(&mut self) -> Result<State> {
        loop {
            let line = match self.next_content_line()? {
                LineRead::Line(line) => line,
                LineRead::EndOfInput => {
                    self.flush_step()?;
                    self.close_cycle();
                    return Ok(State::Done);
                }
            };

            match classify_fields(&split_fields(&line.text)) {
                LineKind::RecordRow => self.buffer.push(line.number, &line.text),
                LineKind::StepHeader => {
                    self.flush_step()?;
                    return self.open_step(line);
                }
                LineKind::CycleHeader => {
                    self.flush_step()?;
                    self.close_cycle();
                    return Ok(State::ExpectCycleHeader(Some(line)));
                }
            }
        }
    }

    /// 由已确认的步骤头行打开新步骤
    fn open_step(&mut self, line: Line) -> Result<State> {
        let fields = split_fields(&line.text);
        let cycle_id = self.cycle.as_ref().map(|c| c.id).unwrap_or_default();
        let step = build_step(&fields, cycle_id, line.number)?;
        trace!(cycle = cycle_id, step = step.step_id, label = %step.label, "step opened");
        self.step = Some(step);
        Ok(State::ReadRecordRun)
    }

    /// 解码缓冲记录并把当前步骤放入当前循环
    fn flush_step(&mut self) -> Result<()> {
        let records = self.buffer.flush()?;
        let (Some(cycle), Some(mut step)) = (self.cycle.as_mut(), self.step.take()) else {
            return Ok(());
        };

        step.attach_records(records);
        let label = step.label.clone();
        let step_id = step.step_id;
        if let Some(replaced) = cycle.insert_step(step) {
            warn!(
                cycle = cycle.id,
                label = %label,
                replaced_step = replaced.step_id,
                step = step_id,
                "duplicate step label, earlier step discarded"
            );
        }
        Ok(())
    }

    fn close_cycle(&mut self) {
        if let Some(cycle) = self.cycle.take() {
            debug!(cycle = cycle.id, steps = cycle.steps().len(), "cycle closed");
            self.cycles.push(cycle);
        }
    }
}

fn expect_kind(fields: &[&str], expected: LineKind, line: usize) -> Result<()> {
    let found = classify_fields(fields);
    if found == expected {
        Ok(())
    } else {
        Err(MtiError::UnexpectedLine {
            line,
            expected: expected.describe(),
            found: found.describe(),
        })
    }
}

/// 由循环头字段构建 Cycle
fn build_cycle(fields: &[&str], line: usize) -> Result<Cycle> {
    let values = decode_row(
        fields,
        &CYCLE_FIELDS,
        CYCLE_FIELD_COUNT,
        LineKind::CycleHeader.describe(),
        line,
    )?;

    let id = match values.first() {
        Some(FieldValue::Int(id)) => *id,
        _ => {
            return Err(MtiError::DecodeError {
                line,
                field: "cycle_id",
                value: fields.first().copied().unwrap_or_default().to_string(),
                reason: "cycle id is not an integer".to_string(),
            })
        }
    };

    let properties = CYCLE_FIELDS
        .iter()
        .zip(values)
        .map(|(spec, value)| Property {
            name: spec.name,
            value,
        })
        .collect();

    Ok(Cycle::new(id, properties))
}

/// 由步骤头字段构建 Step
fn build_step(fields: &[&str], cycle_id: i64, line: usize) -> Result<Step> {
    let values = decode_row(
        fields,
        &STEP_FIELDS,
        STEP_FIELD_COUNT,
        LineKind::StepHeader.describe(),
        line,
    )?;

    use FieldValue::{Float, Int, Span, Text};
    match values.as_slice() {
        [Int(step_id), Text(label), Span(duration), Float(capacity), Float(sp_capacity), Float(energy), Float(sp_energy), Float(capacitance), Float(v_start), Float(v_end)] => {
            Ok(Step::new(
                cycle_id,
                *step_id,
                label.clone(),
                *duration,
                *capacity,
                *sp_capacity,
                *energy,
                *sp_energy,
                *capacitance,
                *v_start,
                *v_end,
            ))
        }
        _ => Err(MtiError::FieldCount {
            line,
            kind: LineKind::StepHeader.describe(),
            expected: STEP_FIELDS.len(),
            found: values.len(),
        }),
    }
}

/// 从任意带缓冲的输入流构建 Session
///
/// 返回时输入流已被完整读取；任何致命错误都不会返回部分结果。
pub fn parse_session<R: BufRead>(reader: R, source: &str) -> Result<Session> {
    SessionParser::new(reader).run(source)
}
