//! Common test utilities shared across the integration tests
//!
//! Builds synthetic analyzer exports line by line so each test can describe
//! exactly the cycle/step/record layout it needs.

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

/// Three opaque preamble lines, as written by the analyzer software
pub const PREAMBLE: &str = "Cycle ID\tCap_Chg(mAh)\tCap_DChg(mAh)\tSpec_Cap_Chg(mAh/g)\n\
\tStep ID\tStep Name\tTime(h:min:s.ms)\tCapacity(mAh)\n\
\t\tRecord ID\tTime(h:min:s.ms)\tVoltage(V)\tCurrent(mA)\n";

/// Synthetic export writer
pub struct ExportBuilder {
    text: String,
    next_record: i64,
}

impl Default for ExportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportBuilder {
    pub fn new() -> Self {
        ExportBuilder {
            text: PREAMBLE.to_string(),
            next_record: 1,
        }
    }

    /// Appends a 21-field cycle header
    pub fn cycle(mut self, id: i64) -> Self {
        self.text.push_str(&cycle_header(id));
        self.text.push('\n');
        self
    }

    /// Appends an 11-field step header
    pub fn step(mut self, id: i64, label: &str, duration: &str, v_start: f64, v_end: f64) -> Self {
        self.text.push_str(&format!(
            "\t{id}\t{label}\t{duration}\t1.2000\t120.00\t4.4400\t444.00\t0.0000\t{v_start}\t{v_end}\n"
        ));
        self
    }

    /// Appends `n` record rows with consecutive ids
    pub fn records(mut self, n: usize) -> Self {
        for _ in 0..n {
            let id = self.next_record;
            self.next_record += 1;
            self.text.push_str(&record_row(id, 3.0 + id as f64 * 0.01));
            self.text.push('\n');
        }
        self
    }

    /// Appends an arbitrary line (a trailing newline is added)
    pub fn raw(mut self, line: &str) -> Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    pub fn build(self) -> String {
        self.text
    }
}

pub fn cycle_header(id: i64) -> String {
    format!(
        "{id}\t1.2500\t1.2000\t125.00\t120.00\t96.000\t4.8000\t4.3000\t3.7000\t1.2500\t1.0000\t0.9000\t90.000\t85.50#1\t00:45:30\t0.0000\t0.0000\t0.0120\t480.00\t430.00\t89.6%"
    )
}

/// Record row: two empty lead fields then ten data columns
pub fn record_row(id: i64, volt: f64) -> String {
    let secs = id % 60;
    let mins = (id / 60) % 60;
    format!(
        "\t\t{id}\t00:{mins:02}:{secs:02}:500\t{volt:.4}\t120.0\t0.444\t{cap:.4}\t{sp:.3}\t0.1\t0.2\t2015-11-23 10:{mins:02}:{secs:02}",
        cap = id as f64 * 0.001,
        sp = id as f64 * 0.1,
    )
}

/// Standard three-step cycles: Rest 10 min, CC_Chg 30 min, CC_DChg 60 min
pub fn standard_export(cycles: i64) -> String {
    let mut b = ExportBuilder::new();
    for id in 1..=cycles {
        b = b
            .cycle(id)
            .step(1, "Rest", "00:10:00:000", 3.00, 3.05)
            .records(3)
            .step(2, "CC_Chg", "00:30:00:250", 3.05, 4.20)
            .records(4)
            .step(3, "CC_DChg", "01:00:00:999", 4.20, 2.80)
            .records(4);
    }
    b.build()
}

/// Writes text to a temporary file that lives as long as the handle
pub fn write_temp(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(text.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Float comparison helper
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
