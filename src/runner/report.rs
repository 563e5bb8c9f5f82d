//! Run reports.
//!
//! A [`RunReport`] holds one [`CheckRecord`] per evaluated check, in
//! evaluation order. Checks after the first fatal failure are never
//! evaluated, so they never appear here.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{PrereqError, Result};
use crate::requirements::{Check, CheckOutcome, Severity};

/// The outcome of one evaluated check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRecord {
    pub name: String,
    pub kind: String,
    pub severity: Severity,
    pub status: String,
    pub detail: String,
    pub duration_ms: u64,
}

impl CheckRecord {
    /// Record `outcome` for `check`.
    pub fn new(check: &Check, outcome: &CheckOutcome, duration_ms: u64) -> Self {
        Self {
            name: check.name.clone(),
            kind: check.kind.label().to_string(),
            severity: check.severity,
            status: outcome.label().to_string(),
            detail: outcome.detail(),
            duration_ms,
        }
    }
}

/// Everything a run did, serializable for `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Header the run was shown under.
    pub phase: String,
    pub started_at: DateTime<Utc>,
    pub records: Vec<CheckRecord>,
    /// Process exit code for this run.
    pub exit_code: i32,
}

impl RunReport {
    /// Start an empty report.
    pub fn new(phase: &str) -> Self {
        Self {
            phase: phase.to_string(),
            started_at: Utc::now(),
            records: Vec::new(),
            exit_code: 0,
        }
    }

    /// Whether every mandatory check passed.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Number of records with `status`.
    pub fn count(&self, status: &str) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    /// Names of checks that were satisfied by an install.
    pub fn installed(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.status == "installed")
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PrereqError::Other(e.into()))
    }
}
