//! Job lifecycle and record placement enums with string conversions.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Job status
// ---------------------------------------------------------------------------

/// Status of a batch job. Jobs move `processing` → `completed`; both the
/// job row and its records are written in one transaction, so an aborted
/// batch leaves no `processing` orphan behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Processing,
    Completed,
}

impl JobStatus {
    /// Return the status name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
        }
    }

    /// Parse a status string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// All valid status values.
    pub const ALL: &'static [&'static str] = &["processing", "completed"];
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Partition
// ---------------------------------------------------------------------------

/// Which partition a classified record landed in.
///
/// Records enter either partition at batch time; revalidation may move a
/// quarantined record to `clean` (never the reverse, outside a full job
/// rebuild).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    Clean,
    Quarantine,
}

impl Partition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Quarantine => "quarantine",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "clean" => Some(Self::Clean),
            "quarantine" => Some(Self::Quarantine),
            _ => None,
        }
    }

    pub const ALL: &'static [&'static str] = &["clean", "quarantine"];
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Log status color
// ---------------------------------------------------------------------------

/// Per-log-entry outcome color: `green` for a passing row or a corrective
/// entry, `red` for one failing (column, rule) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Green,
    Red,
}

impl StatusColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "green" => Some(Self::Green),
            "red" => Some(Self::Red),
            _ => None,
        }
    }
}

impl std::fmt::Display for StatusColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
