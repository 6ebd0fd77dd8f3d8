//! Column-scoped validation rule model.
//!
//! A rule binds a column name to a predicate: the rule's `kind` selects the
//! evaluation strategy and `definition` carries the kind-specific parameters
//! (a pattern for `regex`, `"<min>-<max>"` bounds for `range`).

use serde::{Deserialize, Serialize};

/// Maximum length of a rule's column name.
pub const MAX_COLUMN_NAME_LENGTH: usize = 255;

/// Maximum length of a rule definition.
pub const MAX_DEFINITION_LENGTH: usize = 1024;

// ---------------------------------------------------------------------------
// Rule kind
// ---------------------------------------------------------------------------

/// The validation strategy tag, determining how `definition` is interpreted.
///
/// Kinds outside the known set are preserved verbatim in `Other` and always
/// pass evaluation -- an unrecognized kind must never block ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleKind {
    Regex,
    Range,
    Other(String),
}

impl RuleKind {
    /// Parse a kind string. Unknown values land in `Other`, never an error.
    pub fn parse(s: &str) -> Self {
        match s {
            "regex" => Self::Regex,
            "range" => Self::Range,
            other => Self::Other(other.to_string()),
        }
    }

    /// Return the kind name as stored in the database.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Regex => "regex",
            Self::Range => "range",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Kinds with defined evaluation semantics.
    pub const KNOWN: &'static [&'static str] = &["regex", "range"];
}

impl From<String> for RuleKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<RuleKind> for String {
    fn from(kind: RuleKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A single column-scoped predicate, as consumed by the evaluator.
///
/// The column name is a case-sensitive key into a row. A column may carry
/// any number of rules; all of them must pass for the column to be valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub column_name: String,
    pub kind: RuleKind,
    pub definition: String,
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Validate a rule's column name.
pub fn validate_column_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Column name cannot be empty".to_string());
    }
    if name.len() > MAX_COLUMN_NAME_LENGTH {
        return Err(format!(
            "Column name exceeds maximum length of {MAX_COLUMN_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a rule definition string.
///
/// Only shape is checked here; a definition that fails to compile or parse
/// at evaluation time degrades per the evaluator's fail-open policy.
pub fn validate_definition(definition: &str) -> Result<(), String> {
    if definition.is_empty() {
        return Err("Rule definition cannot be empty".to_string());
    }
    if definition.len() > MAX_DEFINITION_LENGTH {
        return Err(format!(
            "Rule definition exceeds maximum length of {MAX_DEFINITION_LENGTH} characters"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
