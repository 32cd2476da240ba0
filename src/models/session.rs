//! # 测试会话数据模型
//!
//! 一个输入文件的完整解析结果：有序的循环序列。构建完成后不再修改。
//!
//! ## 依赖关系
//! - 被 `parsers/session.rs`, `export.rs`, 二进制命令使用
//! - 使用 `models/cycle.rs`

use super::cycle::Cycle;
use crate::parsers::fields::CYCLE_FIELDS;

/// 测试会话
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// 输入来源（文件名或调用方给出的名称）
    pub source: String,
    preamble: Vec<String>,
    cycles: Vec<Cycle>,
}

impl Session {
    pub(crate) fn new(source: impl Into<String>, preamble: Vec<String>, cycles: Vec<Cycle>) -> Self {
        Session {
            source: source.into(),
            preamble,
            cycles,
        }
    }

    /// 文件开头被跳过的三行
    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    /// 按文件顺序排列的循环
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// 按循环编号查找
    pub fn cycle(&self, id: i64) -> Option<&Cycle> {
        self.cycles.iter().find(|c| c.id == id)
    }

    /// 导出表格的固定列名
    pub fn property_names() -> Vec<&'static str> {
        CYCLE_FIELDS.iter().map(|f| f.name).collect()
    }

    /// 每个循环一行的属性向量
    pub fn property_table(&self) -> Vec<Vec<f64>> {
        self.cycles.iter().map(|c| c.property_values()).collect()
    }

    /// 各循环中指定标签步骤的电压差；缺少该步骤的循环被跳过
    pub fn voltage_deltas(&self, label: &str) -> Vec<(i64, f64)> {
        self.cycles
            .iter()
            .filter_map(|c| c.step(label).map(|s| (c.id, s.voltage_delta())))
            .collect()
    }
}
