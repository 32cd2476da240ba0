//! # 步骤数据模型
//!
//! 一个步骤是循环中的一个阶段（静置、恒流充电、恒流放电），
//! 包含步骤头的标量字段和按列存储的记录表。
//!
//! ## 依赖关系
//! - 被 `models/cycle.rs`, `parsers/` 使用
//! - 使用 `chrono` 表示时长与时间戳

use chrono::{Duration, NaiveDateTime};

/// 常见步骤标签
pub mod labels {
    pub const REST: &str = "Rest";
    pub const CC_CHG: &str = "CC_Chg";
    pub const CC_DCHG: &str = "CC_DChg";
}

/// 步骤类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Rest,
    Charge,
    Discharge,
    Other,
}

impl StepKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            labels::REST => StepKind::Rest,
            labels::CC_CHG => StepKind::Charge,
            labels::CC_DCHG => StepKind::Discharge,
            _ => StepKind::Other,
        }
    }
}

/// 记录表列名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    RelTime,
    Volt,
    Capacity,
    SpCapacity,
    Time,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Id,
        Column::RelTime,
        Column::Volt,
        Column::Capacity,
        Column::SpCapacity,
        Column::Time,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::RelTime => "rel_time",
            Column::Volt => "volt",
            Column::Capacity => "capacity",
            Column::SpCapacity => "sp_capacity",
            Column::Time => "time",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// 按列存储的记录表，各列长度始终相同
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    pub id: Vec<i64>,
    /// 相对时间，精确到整秒
    pub rel_time: Vec<Duration>,
    pub volt: Vec<f64>,
    pub capacity: Vec<f64>,
    pub sp_capacity: Vec<f64>,
    pub time: Vec<NaiveDateTime>,
}

impl RecordTable {
    pub fn with_capacity(n: usize) -> Self {
        RecordTable {
            id: Vec::with_capacity(n),
            rel_time: Vec::with_capacity(n),
            volt: Vec::with_capacity(n),
            capacity: Vec::with_capacity(n),
            sp_capacity: Vec::with_capacity(n),
            time: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// 某一列的数值视图（时间列为 Unix 秒，相对时间为秒）
    pub fn column_f64(&self, column: Column) -> Vec<f64> {
        match column {
            Column::Id => self.id.iter().map(|&v| v as f64).collect(),
            Column::RelTime => self
                .rel_time
                .iter()
                .map(|d| d.num_seconds() as f64)
                .collect(),
            Column::Volt => self.volt.clone(),
            Column::Capacity => self.capacity.clone(),
            Column::SpCapacity => self.sp_capacity.clone(),
            Column::Time => self
                .time
                .iter()
                .map(|t| t.and_utc().timestamp() as f64)
                .collect(),
        }
    }
}

/// 步骤
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// 所属循环编号
    pub cycle_id: i64,
    pub step_id: i64,
    pub label: String,
    pub duration: Duration,
    pub capacity: f64,
    pub specific_capacity: f64,
    pub energy: f64,
    pub specific_energy: f64,
    pub capacitance: f64,
    pub voltage_start: f64,
    pub voltage_end: f64,
    records: RecordTable,
    id_range: Option<(i64, i64)>,
}

impl Step {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cycle_id: i64,
        step_id: i64,
        label: impl Into<String>,
        duration: Duration,
        capacity: f64,
        specific_capacity: f64,
        energy: f64,
        specific_energy: f64,
        capacitance: f64,
        voltage_start: f64,
        voltage_end: f64,
    ) -> Self {
        Step {
            cycle_id,
            step_id,
            label: label.into(),
            duration,
            capacity,
            specific_capacity,
            energy,
            specific_energy,
            capacitance,
            voltage_start,
            voltage_end,
            records: RecordTable::default(),
            id_range: None,
        }
    }

    pub fn kind(&self) -> StepKind {
        StepKind::from_label(&self.label)
    }

    /// 终止电压减起始电压，放电时为负
    pub fn voltage_delta(&self) -> f64 {
        self.voltage_end - self.voltage_start
    }

    pub fn records(&self) -> &RecordTable {
        &self.records
    }

    /// (第二条记录的 id, 最后一条记录的 id)；不足两条记录时为 None
    ///
    /// 起点取下标 1 而不是 0，与分析仪工具链的既有输出保持一致。
    pub fn id_range(&self) -> Option<(i64, i64)> {
        self.id_range
    }

    /// 写入解码后的记录表，只在解析时调用一次
    pub(crate) fn attach_records(&mut self, records: RecordTable) {
        self.id_range = match (records.id.get(1), records.id.last()) {
            (Some(&second), Some(&last)) => Some((second, last)),
            _ => None,
        };
        self.records = records;
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Step {} type {} of Cycle {}",
            self.step_id, self.label, self.cycle_id
        )
    }
}
