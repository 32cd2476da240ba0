//! # 行游标
//!
//! 顺序读取输入流的行。到达末尾时返回显式的 `LineRead::EndOfInput`，
//! 而不是空字符串；行尾的 `\n` / `\r\n` 会被去掉。
//!
//! ## 依赖关系
//! - 被 `parsers/session.rs` 使用
//! - 无外部模块依赖

use crate::error::{MtiError, Result};
use std::io::BufRead;

/// 一行原始文本及其行号（从 1 开始）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

/// 读取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    Line(Line),
    EndOfInput,
}

/// 输入流上的行游标
pub struct LineCursor<R> {
    reader: R,
    line_no: usize,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(reader: R) -> Self {
        LineCursor { reader, line_no: 0 }
    }

    /// 已读取的行数
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// 读取下一行
    ///
    /// I/O 或 UTF-8 解码失败会原样向上传递。
    pub fn next_line(&mut self) -> Result<LineRead> {
        let mut buf = String::new();
        let read = self
            .reader
            .read_line(&mut buf)
            .map_err(|e| MtiError::StreamError {
                line: self.line_no,
                source: e,
            })?;

        if read == 0 {
            return Ok(LineRead::EndOfInput);
        }

        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }

        self.line_no += 1;
        Ok(LineRead::Line(Line {
            number: self.line_no,
            text: buf,
        }))
    }
}
