//! Behavioural properties of loggers that do not touch process-wide state.

use std::cell::Cell;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use qlog::{context_from, display, labels, lazy, Context, OutputFormat, OutputMask, Severity, Value};

mod common;

#[derive(Debug)]
struct IoFailure;

impl fmt::Display for IoFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("io failure")
    }
}

impl std::error::Error for IoFailure {}

fn ctx() -> Context {
    context_from(&Context::background(), "props")
}

#[test]
fn test_output_iff_bit_set() {
    for raw in 0..=0b0111_1111u8 {
        let mask = OutputMask::from_bits_truncate(raw);
        for severity in Severity::ALL {
            if severity == Severity::Fatal {
                // The fatal hook would exit; covered in default_logger.rs.
                continue;
            }
            let (log, memory) = common::capture(mask, OutputFormat::Json, &[]);
            let calls = Cell::new(0);
            let thunk = lazy(|| {
                calls.set(calls.get() + 1);
                42i64
            });

            log.log(&ctx(), severity, "m", None, &[Value::from("n"), thunk]);

            let expected = raw & severity.flag().bits() != 0;
            assert_eq!(!memory.is_empty(), expected, "mask {raw:#b} {severity:?}");
            assert_eq!(calls.get(), usize::from(expected), "mask {raw:#b} {severity:?}");
        }
    }
}

#[test]
fn test_error_only_mask_scenario() {
    let (log, memory) = common::capture(OutputMask::ERROR, OutputFormat::Json, &[]);

    log.warning(&ctx(), "x", None, &[]);
    assert_eq!(memory.len(), 0);

    log.error(&ctx(), "boom", Some(&IoFailure), &[]);
    let line = memory.contents();
    assert!(line.contains(r#""error": "io failure""#));
    assert!(line.contains(r#""message": "boom""#));

    let parsed = common::parse_json(line.trim_end());
    assert_eq!(parsed["severity"], "ERROR");
    assert_eq!(parsed["trace"], "props");
}

#[test]
fn test_float_rounds_to_two_decimals() {
    let (log, memory) = common::capture(OutputMask::ALL, OutputFormat::Json, &[]);
    log.info(&ctx(), "m", &labels!["k", 3.14159]);
    let line = memory.contents();
    assert!(line.contains(r#""k": 3.14,"#));
    assert!(!line.contains("3.14159"));
}

#[test]
fn test_odd_labels_pair_last_key_with_missing() {
    for format in [OutputFormat::Json, OutputFormat::LogFmt] {
        let (log, memory) = common::capture(OutputMask::ALL, format, &labels!["x"]);
        log.info(&ctx(), "m", &labels!["a", 1, "b"]);
        let line = memory.contents();
        assert_eq!(line.matches("#missing#").count(), 2, "{line}");
    }

    let (log, memory) = common::capture(OutputMask::ALL, OutputFormat::Json, &[]);
    log.info(&ctx(), "m", &labels!["a", 1, "b"]);
    let parsed = common::parse_json(memory.contents().trim_end());
    assert_eq!(parsed["b"], "#missing#");
    assert_eq!(parsed["a"], 1);
}

#[test]
fn test_lazy_values_render_like_direct_values() {
    let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    let cases: Vec<(Value<'_>, Value<'_>)> = vec![
        (Value::from("text"), lazy(|| "text".to_string())),
        (Value::from(-5i32), lazy(|| -5i32)),
        (Value::from(5u64), lazy(|| 5u64)),
        (Value::from(true), lazy(|| true)),
        (Value::from(1.239f32), lazy(|| 1.239f32)),
        (Value::from(2.5f64), lazy(|| 2.5f64)),
        (display(&ip), lazy(|| ip.to_string())),
    ];

    for (direct, deferred) in cases {
        let is_display = matches!(direct, Value::Display(_));
        let (log, memory) = common::capture(OutputMask::ALL, OutputFormat::LogFmt, &[]);
        log.info(&ctx(), "m", &[Value::from("v"), direct]);
        log.info(&ctx(), "m", &[Value::from("v"), deferred]);

        let lines = memory.lines();
        let a = common::logfmt_field(&lines[0], "v").unwrap();
        let b = common::logfmt_field(&lines[1], "v").unwrap();
        if is_display {
            // Display output is unquoted, a lazy String is quoted.
            assert_eq!(format!("\"{a}\""), b);
        } else {
            assert_eq!(a, b);
        }
    }
}

#[test]
fn test_lazy_invoked_once_per_emitted_line() {
    let (log, memory) = common::capture(OutputMask::ALL, OutputFormat::Json, &[]);
    let calls = Cell::new(0u32);
    let labels = [
        Value::from("expensive"),
        lazy(|| {
            calls.set(calls.get() + 1);
            "done"
        }),
    ];

    log.info(&ctx(), "one", &labels);
    assert_eq!(calls.get(), 1);
    log.debug(&ctx(), "two", &labels);
    assert_eq!(calls.get(), 2);
    assert_eq!(memory.lines().len(), 2);
}

#[test]
fn test_derived_labels_parent_then_child_once() {
    let (parent, memory) = common::capture(OutputMask::ALL, OutputFormat::Json, &labels!["service", "api"]);
    let child = parent.with_labels(&labels!["module", "auth"]);

    child.notice(&ctx(), "ready", &labels!["port", 8080]);
    let line = memory.contents();

    assert_eq!(line.matches("\"service\"").count(), 1);
    assert_eq!(line.matches("\"module\"").count(), 1);
    assert!(line.find("\"service\"") < line.find("\"module\""));
    assert!(line.find("\"module\"") < line.find("\"port\""));

    let parsed = common::parse_json(line.trim_end());
    assert_eq!(parsed["service"], "api");
    assert_eq!(parsed["module"], "auth");
    assert_eq!(parsed["port"], 8080);
    assert_eq!(parsed["message"], "ready");
}

#[test]
fn test_field_order_logfmt() {
    let (log, memory) = common::capture(OutputMask::ALL, OutputFormat::LogFmt, &labels!["c", 1]);
    log.warning(&ctx(), "m", Some(&IoFailure), &labels!["l", 2]);
    let line = memory.contents();

    let positions: Vec<usize> = ["trace=", " severity=", " timestamp=", " error=", " c=", " l=", " message="]
        .iter()
        .map(|key| line.find(key).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{line}");
    assert!(line.starts_with("trace=\"props\""));
    assert!(!line.contains('{'));
}

#[test]
fn test_generated_trace_ids() {
    let ids: Vec<String> = (0..100)
        .map(|_| qlog::trace_id(&context_from(&Context::background(), "")))
        .collect();
    let width = ids[0].len();
    assert!(width > 0);
    assert!(ids.iter().all(|id| id.len() == width));
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

struct MultiLine;

impl fmt::Display for MultiLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("line1\nline2 \"q\"")
    }
}

#[test]
fn test_multiline_display_value_stays_on_one_line() {
    let (log, memory) = common::capture(OutputMask::ALL, OutputFormat::Json, &[]);

    log.info(&ctx(), "m", &labels!["v", display(&MultiLine)]);

    assert_eq!(memory.lines().len(), 1);
    let contents = memory.contents();
    assert!(contents.contains(r#""v": line1\nline2 \"q\""#), "{contents}");
}

#[test]
fn test_key_with_quote_and_newline_keeps_line_well_formed() {
    let (log, memory) = common::capture(OutputMask::ALL, OutputFormat::Json, &[]);

    log.info(&ctx(), "m", &labels!["bad\"key\nx", "v"]);

    let lines = memory.lines();
    assert_eq!(lines.len(), 1);
    let parsed = common::parse_json(&lines[0]);
    assert_eq!(parsed["bad\"key\nx"], "v");
}
