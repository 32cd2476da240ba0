//! Integration tests for building a Session from analyzer exports
//!
//! Tests cover:
//! - Cycle count and ordering
//! - Determinism
//! - Clean end-of-input mid record run
//! - Fatal structure and decode errors
//! - Duplicate step labels (last write wins)

mod common;

use chrono::Duration;
use common::*;
use mtibattery::parsers::fields::FieldValue;
use mtibattery::{parse_session, parse_session_file, MtiError, Result, Session};
use std::io::Cursor;
use std::path::Path;

fn parse_text(text: &str) -> Result<Session> {
    parse_session(Cursor::new(text.as_bytes()), "fixture")
}

// ============================================
// Structure Tests
// ============================================

#[test]
fn test_cycle_count_and_ids_in_file_order() {
    let session = parse_text(&standard_export(5)).unwrap();
    assert_eq!(session.cycle_count(), 5);
    let ids: Vec<i64> = session.cycles().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(session.preamble().len(), 3);
    assert!(session.preamble()[0].starts_with("Cycle ID"));
}

#[test]
fn test_steps_and_records_are_attached() {
    let session = parse_text(&standard_export(2)).unwrap();
    let cycle = session.cycle(2).unwrap();

    assert_eq!(
        cycle.labels().collect::<Vec<_>>(),
        vec!["Rest", "CC_Chg", "CC_DChg"]
    );

    let charge = cycle.step("CC_Chg").unwrap();
    assert_eq!(charge.cycle_id, 2);
    assert_eq!(charge.step_id, 2);
    assert_eq!(charge.records().len(), 4);
    // 第二个循环的记录 id 接着第一个循环递增
    assert_eq!(charge.records().id, vec![15, 16, 17, 18]);
    for step in session.cycles().iter().flat_map(|c| c.steps()) {
        assert!(step.records().id.windows(2).all(|w| w[0] <= w[1]));
    }
    assert_eq!(charge.id_range(), Some((16, 18)));
    assert!(approx_eq(charge.voltage_delta(), 1.15));

    let records = charge.records();
    assert_eq!(records.volt.len(), records.time.len());
    assert_eq!(records.rel_time[0], Duration::seconds(15));
    assert_eq!(records.time[0].to_string(), "2015-11-23 10:00:15");
}

#[test]
fn test_cycle_properties_decoded_in_order() {
    let session = parse_text(&standard_export(1)).unwrap();
    let cycle = &session.cycles()[0];

    assert_eq!(cycle.properties().len(), 21);
    assert_eq!(cycle.properties()[0].name, "cycle_id");
    assert_eq!(cycle.property("cycle_id"), Some(&FieldValue::Int(1)));
    assert_eq!(cycle.property("platform_efficiency"), Some(&FieldValue::Float(85.5)));
    assert_eq!(cycle.property("platform_duration"), Some(&FieldValue::Seconds(2730.0)));
    assert_eq!(cycle.property("energy_efficiency"), Some(&FieldValue::Float(89.6)));
    assert_eq!(Session::property_names().len(), 21);
}

#[test]
fn test_step_duration_ignores_milliseconds() {
    let text = ExportBuilder::new()
        .cycle(1)
        .step(1, "CC_Chg", "01:02:03:004", 3.0, 4.2)
        .records(2)
        .build();
    let session = parse_text(&text).unwrap();
    let step = session.cycles()[0].step("CC_Chg").unwrap();
    assert_eq!(step.duration, Duration::hours(1) + Duration::minutes(2) + Duration::seconds(3));
}

#[test]
fn test_parse_is_deterministic() {
    let text = standard_export(3);
    let first = parse_text(&text).unwrap();
    let second = parse_text(&text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parse_from_file_matches_reader() {
    let text = standard_export(2);
    let file = write_temp(&text);

    let from_file = parse_session_file(file.path()).unwrap();
    let from_reader = parse_session(Cursor::new(text.as_bytes()), &file.path().display().to_string())
        .unwrap();
    assert_eq!(from_file, from_reader);
}

#[test]
fn test_crlf_line_endings() {
    let text = standard_export(2).replace('\n', "\r\n");
    let session = parse_text(&text).unwrap();
    assert_eq!(session.cycle_count(), 2);
    assert_eq!(
        session.cycles()[1].property("energy_efficiency"),
        Some(&FieldValue::Float(89.6))
    );
}

// ============================================
// End-of-input Tests
// ============================================

#[test]
fn test_truncated_record_run_keeps_partial_cycle() {
    let text = ExportBuilder::new()
        .cycle(1)
        .step(1, "Rest", "00:10:00:000", 3.0, 3.05)
        .records(3)
        .step(2, "CC_Chg", "00:30:00:000", 3.05, 4.2)
        .records(4)
        .step(3, "CC_DChg", "01:00:00:000", 4.2, 2.8)
        .records(4)
        .cycle(2)
        .step(1, "Rest", "00:10:00:000", 3.0, 3.05)
        .records(3)
        .step(2, "CC_Chg", "00:12:00:000", 3.05, 3.9)
        .records(2)
        .build();

    let session = parse_text(&text).unwrap();
    assert_eq!(session.cycle_count(), 2);

    let last = &session.cycles()[1];
    assert_eq!(last.labels().collect::<Vec<_>>(), vec!["Rest", "CC_Chg"]);
    assert_eq!(last.step("CC_Chg").unwrap().records().len(), 2);
    assert!(last.step("CC_DChg").is_none());
}

#[test]
fn test_step_header_as_last_line_has_empty_records() {
    let text = ExportBuilder::new()
        .cycle(1)
        .step(1, "Rest", "00:10:00:000", 3.0, 3.05)
        .build();
    let session = parse_text(&text).unwrap();
    let rest = session.cycles()[0].step("Rest").unwrap();
    assert!(rest.records().is_empty());
    assert_eq!(rest.id_range(), None);
}

#[test]
fn test_preamble_only_is_empty_session() {
    let session = parse_text(PREAMBLE).unwrap();
    assert!(session.is_empty());
    assert_eq!(session.duration(), Duration::zero());
}

// ============================================
// Error Tests
// ============================================

#[test]
fn test_truncated_cycle_header_fails() {
    let mut text = standard_export(2);
    text.push_str("3\t1.2500\t1.2000\t125.00");

    match parse_text(&text) {
        Err(MtiError::FieldCount {
            kind,
            expected,
            found,
            ..
        }) => {
            assert_eq!(kind, "cycle header");
            assert_eq!(expected, 21);
            assert_eq!(found, 4);
        }
        other => panic!("expected FieldCount, got {other:?}"),
    }
}

#[test]
fn test_truncated_step_header_fails() {
    let text = ExportBuilder::new()
        .cycle(1)
        .step(1, "Rest", "00:10:00:000", 3.0, 3.05)
        .records(2)
        .raw("\t2\tCC_Chg\t00:30")
        .build();
    assert!(matches!(
        parse_text(&text),
        Err(MtiError::FieldCount { kind: "step header", .. })
    ));
}

#[test]
fn test_record_where_step_header_expected() {
    let text = ExportBuilder::new().cycle(1).records(1).build();
    match parse_text(&text) {
        Err(MtiError::UnexpectedLine { line, expected, found }) => {
            assert_eq!(line, 5);
            assert_eq!(expected, "step header");
            assert_eq!(found, "record row");
        }
        other => panic!("expected UnexpectedLine, got {other:?}"),
    }
}

#[test]
fn test_non_numeric_record_aborts() {
    let text = ExportBuilder::new()
        .cycle(1)
        .step(1, "Rest", "00:10:00:000", 3.0, 3.05)
        .records(1)
        .raw("\t\t2\t00:00:02:000\tNaNish\t0\t0\t0.1\t1.0\t0\t0\t2015-11-23 10:00:02")
        .build();
    match parse_text(&text) {
        Err(MtiError::DecodeError { line, field, value, .. }) => {
            assert_eq!(line, 7);
            assert_eq!(field, "volt");
            assert_eq!(value, "NaNish");
        }
        other => panic!("expected DecodeError, got {other:?}"),
    }
}

#[test]
fn test_bad_cycle_id_aborts() {
    let mut text = PREAMBLE.to_string();
    text.push_str(&cycle_header(1).replacen('1', "one", 1));
    text.push('\n');
    assert!(matches!(
        parse_text(&text),
        Err(MtiError::DecodeError { field: "cycle_id", .. })
    ));
}

#[test]
fn test_out_of_range_step_duration_aborts() {
    let text = ExportBuilder::new()
        .cycle(1)
        .step(1, "Rest", "9999999999999999:00:00:000", 3.0, 3.05)
        .records(1)
        .build();
    match parse_text(&text) {
        Err(MtiError::DecodeError { line, field, reason, .. }) => {
            assert_eq!(line, 5);
            assert_eq!(field, "duration");
            assert_eq!(reason, "duration out of range");
        }
        other => panic!("expected DecodeError, got {other:?}"),
    }
}

#[test]
fn test_blank_line_between_records_aborts() {
    let text = ExportBuilder::new()
        .cycle(1)
        .step(1, "Rest", "00:10:00:000", 3.0, 3.05)
        .records(1)
        .raw("")
        .records(1)
        .build();
    assert!(matches!(
        parse_text(&text),
        Err(MtiError::FieldCount { line: 7, kind: "record row", found: 1, .. })
    ));
}

#[test]
fn test_trailing_blank_lines_end_cleanly() {
    let mut text = standard_export(2);
    text.push_str("\n\n");
    let session = parse_text(&text).unwrap();
    assert_eq!(session.cycle_count(), 2);
    assert_eq!(session.cycles()[1].step("CC_DChg").unwrap().records().len(), 4);
}

#[test]
fn test_missing_file() {
    let err = parse_session_file(Path::new("/definitely/not/here.txt")).unwrap_err();
    assert!(matches!(err, MtiError::FileReadError { .. }));
}

// ============================================
// Duplicate Label Tests
// ============================================

#[test]
fn test_duplicate_label_last_write_wins() {
    let text = ExportBuilder::new()
        .cycle(1)
        .step(1, "Rest", "00:10:00:000", 3.00, 3.05)
        .records(3)
        .step(2, "CC_Chg", "00:30:00:000", 3.05, 4.20)
        .records(2)
        .step(3, "Rest", "00:05:00:000", 4.20, 4.10)
        .records(1)
        .build();

    let session = parse_text(&text).unwrap();
    let cycle = &session.cycles()[0];

    // 标签位置保持首次出现的顺序
    assert_eq!(cycle.labels().collect::<Vec<_>>(), vec!["Rest", "CC_Chg"]);

    let rest = cycle.step("Rest").unwrap();
    assert_eq!(rest.step_id, 3);
    assert!(approx_eq(rest.voltage_start, 4.20));
    assert_eq!(rest.duration, Duration::minutes(5));
    // 前一个 Rest 步骤的三条记录被丢弃
    assert_eq!(rest.records().id, vec![6]);
    assert_eq!(cycle.duration(), Duration::minutes(35));
}
