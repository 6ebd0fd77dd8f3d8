//! Row classification against an effective rule set.
//!
//! `classify` walks the rule map in its (sorted, deterministic) column
//! order, evaluates every rule for every column present on the row, and
//! collects one failure per failing (column, rule) pair. There is no
//! short-circuit: a row's verdict always lists the full set of failures.

use serde_json::{Map, Value};

use crate::evaluator::{evaluate, value_text};
use crate::rule::RuleKind;
use crate::ruleset::RuleMap;

/// One failing (column, rule) pair on a row.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleFailure {
    pub column: String,
    pub kind: RuleKind,
    pub definition: String,
    /// String form of the offending value, for log entries.
    pub value: String,
}

impl RuleFailure {
    /// Human-readable failure reason, e.g. `Column 'name' failed regex rule`.
    pub fn reason(&self) -> String {
        format!("Column '{}' failed {} rule", self.column, self.kind)
    }

    /// `<kind>:<definition>` label identifying the rule in log entries.
    pub fn rule_applied(&self) -> String {
        format!("{}:{}", self.kind, self.definition)
    }
}

/// Per-row classification outcome.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub valid: bool,
    pub failures: Vec<RuleFailure>,
}

impl Verdict {
    /// Ordered human-readable failure reasons, one per failing pair.
    pub fn failure_reasons(&self) -> Vec<String> {
        self.failures.iter().map(RuleFailure::reason).collect()
    }

    /// All failure reasons joined by `"; "`, as stored on a quarantined
    /// record. `None` for a valid row.
    pub fn error_reason(&self) -> Option<String> {
        if self.failures.is_empty() {
            None
        } else {
            Some(self.failure_reasons().join("; "))
        }
    }
}

/// Classify one row against the effective rule set.
///
/// Columns the row does not carry are "no opinion": their rules are
/// skipped, never failed. A row with zero applicable rules is valid.
pub fn classify(row: &Map<String, Value>, rules: &RuleMap) -> Verdict {
    let mut failures = Vec::new();

    for (column, column_rules) in rules {
        let Some(value) = row.get(column) else {
            continue;
        };
        for rule in column_rules {
            if !evaluate(value, rule) {
                failures.push(RuleFailure {
                    column: column.clone(),
                    kind: rule.kind.clone(),
                    definition: rule.definition.clone(),
                    value: value_text(value).into_owned(),
                });
            }
        }
    }

    Verdict {
        valid: failures.is_empty(),
        failures,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use crate::ruleset::group_rules;
    use serde_json::json;

    fn rule(column: &str, kind: &str, definition: &str) -> Rule {
        Rule {
            column_name: column.to_string(),
            kind: RuleKind::parse(kind),
            definition: definition.to_string(),
        }
    }

    fn row(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn row_passing_all_rules_is_valid() {
        let rules = group_rules(vec![
            rule("name", "regex", "^[A-Za-z ]+$"),
            rule("age", "range", "0-120"),
        ]);
        let verdict = classify(&row(&[("name", json!("John")), ("age", json!("25"))]), &rules);
        assert!(verdict.valid);
        assert!(verdict.failures.is_empty());
        assert_eq!(verdict.error_reason(), None);
    }

    #[test]
    fn single_failure_invalidates_row() {
        let rules = group_rules(vec![rule("name", "regex", "^[A-Za-z]+$")]);
        let verdict = classify(&row(&[("name", json!("Bob123"))]), &rules);
        assert!(!verdict.valid);
        assert_eq!(
            verdict.failure_reasons(),
            vec!["Column 'name' failed regex rule"]
        );
    }

    #[test]
    fn all_failing_pairs_are_recorded() {
        // Two rules on one column plus one on another; no short-circuit.
        let rules = group_rules(vec![
            rule("age", "range", "0-120"),
            rule("age", "regex", r"^\d+$"),
            rule("name", "regex", "^[A-Za-z]+$"),
        ]);
        let verdict = classify(
            &row(&[("name", json!("Bob123")), ("age", json!("abc"))]),
            &rules,
        );
        assert!(!verdict.valid);
        assert_eq!(verdict.failures.len(), 3);
        assert_eq!(
            verdict.error_reason().unwrap(),
            "Column 'age' failed range rule; Column 'age' failed regex rule; \
             Column 'name' failed regex rule"
        );
    }

    #[test]
    fn failures_follow_sorted_column_order() {
        let rules = group_rules(vec![
            rule("zeta", "range", "0-1"),
            rule("alpha", "range", "0-1"),
        ]);
        let verdict = classify(
            &row(&[("zeta", json!("9")), ("alpha", json!("9"))]),
            &rules,
        );
        let columns: Vec<_> = verdict.failures.iter().map(|f| f.column.as_str()).collect();
        assert_eq!(columns, ["alpha", "zeta"]);
    }

    #[test]
    fn missing_column_is_no_opinion() {
        let rules = group_rules(vec![rule("email", "regex", ".+@.+")]);
        let verdict = classify(&row(&[("name", json!("John"))]), &rules);
        assert!(verdict.valid);
    }

    #[test]
    fn null_value_is_still_evaluated() {
        // Present-but-null is not "missing": the rule sees an empty string.
        let rules = group_rules(vec![rule("name", "regex", "^[A-Za-z]+$")]);
        let verdict = classify(&row(&[("name", Value::Null)]), &rules);
        assert!(!verdict.valid);
    }

    #[test]
    fn no_applicable_rules_is_valid() {
        let verdict = classify(&row(&[("anything", json!("x"))]), &RuleMap::new());
        assert!(verdict.valid);
    }

    #[test]
    fn malformed_values_never_panic() {
        let rules = group_rules(vec![
            rule("age", "range", "0-120"),
            rule("name", "regex", "^[A-Za-z]+$"),
        ]);
        for value in [json!(null), json!([1, 2]), json!({"nested": true}), json!(1e40)] {
            let verdict = classify(
                &row(&[("age", value.clone()), ("name", value)]),
                &rules,
            );
            assert!(!verdict.valid);
        }
    }

    #[test]
    fn rule_applied_label_format() {
        let rules = group_rules(vec![rule("age", "range", "0-120")]);
        let verdict = classify(&row(&[("age", json!("999"))]), &rules);
        assert_eq!(verdict.failures[0].rule_applied(), "range:0-120");
        assert_eq!(verdict.failures[0].value, "999");
    }
}
