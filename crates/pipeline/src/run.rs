//! State of a single import run and its read-only projections.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Counters of a run at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub processed: usize,
    pub success: usize,
    pub failed: usize,
}

impl ProgressSnapshot {
    /// Fraction of source rows consumed, in `0.0..=1.0`. An empty run is complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Overall result of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOutcome {
    /// The file had no data rows.
    Empty,
    /// Every row was stored.
    Succeeded,
    /// Some rows were stored, some failed.
    Partial,
    /// No row was stored.
    Failed,
}

impl ImportOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Succeeded => "succeeded",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }

    fn from_counts(success: usize, failed: usize) -> Self {
        match (success, failed) {
            (0, 0) => Self::Empty,
            (_, 0) => Self::Succeeded,
            (0, _) => Self::Failed,
            _ => Self::Partial,
        }
    }
}

impl std::fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Mutable state of one import run.
///
/// Counters only grow. `processed` reaches `total` when the last batch is
/// done. The error log is append-only and in file order.
#[derive(Debug, Clone)]
pub struct ImportRun {
    snapshot: ProgressSnapshot,
    error_log: Vec<String>,
}

impl ImportRun {
    pub fn new(total: usize) -> Self {
        Self {
            snapshot: ProgressSnapshot {
                total,
                ..Default::default()
            },
            error_log: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.snapshot
    }

    pub fn errors(&self) -> &[String] {
        &self.error_log
    }

    /// Row `row_number` (1-based) could not be transformed.
    pub(crate) fn record_row_failure(&mut self, row_number: usize, error: impl std::fmt::Display) {
        self.snapshot.failed += 1;
        self.error_log.push(format!("Row {row_number}: {error}"));
    }

    /// Batch `batch_number` (1-based) covering `rows` was refused by the store.
    pub(crate) fn record_batch_failure(
        &mut self,
        batch_number: usize,
        rows: std::ops::RangeInclusive<usize>,
        records: usize,
        error: impl std::fmt::Display,
    ) {
        self.snapshot.failed += records;
        self.error_log.push(format!(
            "Batch {batch_number} (rows {}-{}): {error}",
            rows.start(),
            rows.end()
        ));
    }

    pub(crate) fn record_batch_success(&mut self, records: usize) {
        self.snapshot.success += records;
    }

    pub(crate) fn advance_to(&mut self, processed: usize) {
        self.snapshot.processed = self.snapshot.processed.max(processed.min(self.snapshot.total));
    }

    pub fn finish(self) -> ImportReport {
        let outcome = ImportOutcome::from_counts(self.snapshot.success, self.snapshot.failed);
        ImportReport {
            snapshot: self.snapshot,
            errors: self.error_log,
            outcome,
            refresh_required: self.snapshot.success > 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Final tally of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    #[serde(flatten)]
    pub snapshot: ProgressSnapshot,
    pub errors: Vec<String>,
    pub outcome: ImportOutcome,
    /// At least one record was stored, so lists of this entity are stale.
    pub refresh_required: bool,
}

impl ImportReport {
    /// Every row was stored and there was at least one.
    pub fn is_full_success(&self) -> bool {
        self.snapshot.failed == 0 && self.snapshot.success > 0
    }
}
