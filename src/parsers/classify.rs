//! # 行分类器
//!
//! 根据前两个制表符字段是否为空，判断一行属于哪一类：
//!
//! ```text
//! 1\t...             字段 0 非空      -> 循环头
//! \t3\tCC_Chg\t...   字段 1 非空      -> 步骤头
//! \t\t17\t...        前两个字段均空   -> 记录行
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/session.rs` 使用
//! - 无外部模块依赖

/// 行类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    CycleHeader,
    StepHeader,
    RecordRow,
}

impl LineKind {
    pub fn describe(self) -> &'static str {
        match self {
            LineKind::CycleHeader => "cycle header",
            LineKind::StepHeader => "step header",
            LineKind::RecordRow => "record row",
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// 按制表符拆分，不做任何修剪
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split('\t').collect()
}

/// 对已拆分的字段分类
pub fn classify_fields(fields: &[&str]) -> LineKind {
    let filled = |i: usize| fields.get(i).is_some_and(|f| !f.is_empty());

    if filled(0) {
        LineKind::CycleHeader
    } else if filled(1) {
        LineKind::StepHeader
    } else {
        LineKind::RecordRow
    }
}

/// 对原始行分类
pub fn classify(line: &str) -> LineKind {
    classify_fields(&split_fields(line))
}
