//! # 循环数据模型
//!
//! 一个（静置-）充电-放电循环：21 个循环头属性 + 按标签索引的有序步骤。
//!
//! 同一循环内若出现相同标签的步骤，后者替换前者并保留原位置。
//!
//! ## 依赖关系
//! - 被 `models/session.rs`, `parsers/session.rs` 使用
//! - 使用 `models/step.rs`, `parsers/fields.rs` 的 `FieldValue`

use super::step::Step;
use crate::parsers::fields::FieldValue;

/// 一个命名属性
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: &'static str,
    pub value: FieldValue,
}

/// 循环
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub id: i64,
    properties: Vec<Property>,
    steps: Vec<Step>,
}

impl Cycle {
    pub fn new(id: i64, properties: Vec<Property>) -> Self {
        Cycle {
            id,
            properties,
            steps: Vec::new(),
        }
    }

    /// 按循环头顺序排列的全部属性
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&FieldValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// 属性的数值向量（与循环头顺序相同）
    pub fn property_values(&self) -> Vec<f64> {
        self.properties
            .iter()
            .map(|p| p.value.as_f64().unwrap_or(f64::NAN))
            .collect()
    }

    /// 按标签首次出现顺序排列的步骤
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, label: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.label.as_str())
    }

    /// 插入步骤；同标签已存在时原位替换并返回被替换的步骤
    pub(crate) fn insert_step(&mut self, step: Step) -> Option<Step> {
        match self.steps.iter_mut().find(|s| s.label == step.label) {
            Some(slot) => Some(std::mem::replace(slot, step)),
            None => {
                self.steps.push(step);
                None
            }
        }
    }

    /// 所有步骤记录拼接后的 (记录 id, 电压) 序列
    pub fn voltage_trace(&self) -> Vec<(i64, f64)> {
        self.steps
            .iter()
            .flat_map(|s| {
                let r = s.records();
                r.id.iter().copied().zip(r.volt.iter().copied())
            })
            .collect()
    }
}

impl std::fmt::Display for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cycle {}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn step(step_id: i64, label: &str, secs: i64) -> Step {
        Step::new(
            1,
            step_id,
            label,
            Duration::seconds(secs),
            0.0,
            0.0,
            0.0,
            0.0,
            0.0,
            3.0,
            3.5,
        )
    }

    #[test]
    fn test_duplicate_label_replaces_in_place() {
        let mut cycle = Cycle::new(1, Vec::new());
        assert!(cycle.insert_step(step(1, "Rest", 60)).is_none());
        assert!(cycle.insert_step(step(2, "CC_Chg", 600)).is_none());
        let old = cycle.insert_step(step(3, "Rest", 120));

        assert_eq!(old.map(|s| s.step_id), Some(1));
        assert_eq!(cycle.labels().collect::<Vec<_>>(), vec!["Rest", "CC_Chg"]);
        assert_eq!(cycle.step("Rest").map(|s| s.step_id), Some(3));
    }

    #[test]
    fn test_property_lookup() {
        let cycle = Cycle::new(
            4,
            vec![
                Property {
                    name: "cycle_id",
                    value: FieldValue::Int(4),
                },
                Property {
                    name: "label",
                    value: FieldValue::Text("x".into()),
                },
            ],
        );
        assert_eq!(cycle.property("cycle_id"), Some(&FieldValue::Int(4)));
        assert!(cycle.property("missing").is_none());
        let values = cycle.property_values();
        assert_eq!(values[0], 4.0);
        assert!(values[1].is_nan());
        assert_eq!(cycle.to_string(), "Cycle 4");
    }
}
