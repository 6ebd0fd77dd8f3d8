//! Effective rule-set resolution.
//!
//! A batch runs against a point-in-time snapshot of the active system rules,
//! optionally overridden per column for that one upload. The effective set
//! is a `BTreeMap` keyed by column name; the classifier relies on its
//! sorted iteration order to stay deterministic across runs.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::rule::{Rule, RuleKind};

/// The effective column → rules mapping applied to a batch.
pub type RuleMap = BTreeMap<String, Vec<Rule>>;

/// A per-upload override for one column, in the upload payload's
/// `{ "type": ..., "value": ... }` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleOverride {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "value")]
    pub definition: String,
}

/// Group a rule snapshot by column name, preserving per-column rule order.
pub fn group_rules<I>(rules: I) -> RuleMap
where
    I: IntoIterator<Item = Rule>,
{
    let mut map = RuleMap::new();
    for rule in rules {
        map.entry(rule.column_name.clone()).or_default().push(rule);
    }
    map
}

/// Merge per-upload overrides into the system rule snapshot.
///
/// An override with a non-empty definition *replaces* every system rule for
/// its column; columns only present in the overrides are added; all other
/// system columns pass through untouched. Empty-definition overrides are
/// ignored.
pub fn resolve(system: RuleMap, overrides: &BTreeMap<String, RuleOverride>) -> RuleMap {
    let mut effective = system;
    for (column, o) in overrides {
        if o.definition.is_empty() {
            continue;
        }
        effective.insert(
            column.clone(),
            vec![Rule {
                column_name: column.clone(),
                kind: RuleKind::parse(&o.kind),
                definition: o.definition.clone(),
            }],
        );
    }
    effective
}

/// Parse the raw per-upload override JSON.
///
/// Expected shape: `{ "<column>": { "type": ..., "value": ... }, ... }`.
/// Anything malformed (a non-object payload, or an entry that does not
/// deserialize) degrades to "no override" rather than failing the upload.
pub fn parse_overrides(raw: Option<&Value>) -> BTreeMap<String, RuleOverride> {
    let mut overrides = BTreeMap::new();
    let Some(Value::Object(entries)) = raw else {
        return overrides;
    };
    for (column, entry) in entries {
        if let Ok(o) = serde_json::from_value::<RuleOverride>(entry.clone()) {
            overrides.insert(column.clone(), o);
        }
    }
    overrides
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
