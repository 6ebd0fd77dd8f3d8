//! Rule evaluation — pure logic, no database access.
//!
//! `evaluate` applies one rule to one raw value and returns pass/fail.
//! Policy: classification outcomes are data, never errors. A value the
//! rule cannot interpret fails the rule; a rule the evaluator cannot
//! interpret (unknown kind, unparseable pattern) passes, so a bad rule
//! definition never blocks ingestion.

use std::borrow::Cow;

use regex::Regex;
use serde_json::Value;

use crate::rule::{Rule, RuleKind};

/// Evaluate a single value against a single rule.
pub fn evaluate(value: &Value, rule: &Rule) -> bool {
    match &rule.kind {
        RuleKind::Regex => evaluate_regex(value, &rule.definition),
        RuleKind::Range => evaluate_range(value, &rule.definition),
        // Unrecognized kinds never block ingestion.
        RuleKind::Other(_) => true,
    }
}

/// The string form a value takes for pattern matching and logging.
///
/// Null renders as the empty string; numbers and booleans use their
/// display form.
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Prefix-anchored pattern match.
///
/// The pattern is compiled as `\A(?:pattern)`, so an unanchored pattern
/// passes whenever the value's *prefix* matches; a pattern carrying its
/// own `$` anchor behaves as a full match. Unparseable patterns pass.
fn evaluate_regex(value: &Value, pattern: &str) -> bool {
    match Regex::new(&format!(r"\A(?:{pattern})")) {
        Ok(re) => re.is_match(value_text(value).as_ref()),
        Err(_) => true,
    }
}

/// Inclusive integer bounds check against a `"<min>-<max>"` definition.
///
/// Fails when either bound or the value does not parse as an integer.
fn evaluate_range(value: &Value, definition: &str) -> bool {
    let Some((min, max)) = definition.split_once('-') else {
        return false;
    };
    let (Ok(min), Ok(max)) = (min.trim().parse::<i64>(), max.trim().parse::<i64>()) else {
        return false;
    };
    let Some(v) = integer_value(value) else {
        return false;
    };
    min <= v && v <= max
}

/// Coerce a raw value to an integer: JSON integers directly, strings by
/// trimmed parse. Anything else has no integer form.
fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
