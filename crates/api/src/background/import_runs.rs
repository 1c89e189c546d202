//! In-memory tracking of bulk import runs.
//!
//! The upload handler registers a run, hands the parsed rows to
//! [`spawn_import`], and returns immediately. The spawned task feeds batch
//! progress back into the [`ImportTracker`], which the status endpoint
//! reads. Runs are not persisted; a restart forgets them, and finished runs
//! are purged by [`super::run_retention`] once their retention expires.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use batohi_core::csv_rows::RawRow;
use batohi_core::entities::EntityKind;
use batohi_core::error::CoreError;
use batohi_core::import_config::ImportConfig;
use batohi_core::types::Timestamp;
use batohi_events::{EventBus, PlatformEvent};
use batohi_pipeline::{BatchProgress, ImportOutcome, ImportPipeline, ImportReport, ProgressSnapshot};
use serde::Serialize;
use tokio::task::JoinHandle;
use uuid::Uuid;

// ── Run state ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    /// The run's task ended without reporting; counters are as last seen.
    Aborted,
}

/// Everything the dashboard shows about one import run.
#[derive(Debug, Clone, Serialize)]
pub struct TrackedRun {
    pub id: Uuid,
    pub entity: EntityKind,
    pub status: RunStatus,
    #[serde(flatten)]
    pub snapshot: ProgressSnapshot,
    /// Row and batch error messages in file order.
    pub errors: Vec<String>,
    /// Set once the run completes.
    pub outcome: Option<ImportOutcome>,
    /// True once at least one row of this run was stored.
    pub refresh_required: bool,
    pub started_at: Timestamp,
    pub finished_at: Option<Timestamp>,
}

impl TrackedRun {
    fn new(entity: EntityKind, total: usize) -> Self {
        Self {
            id: Uuid::now_v7(),
            entity,
            status: RunStatus::Running,
            snapshot: ProgressSnapshot {
                total,
                ..Default::default()
            },
            errors: Vec::new(),
            outcome: None,
            refresh_required: false,
            started_at: chrono::Utc::now(),
            finished_at: None,
        }
    }
}

// ── Tracker ──────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Runs {
    by_id: HashMap<Uuid, TrackedRun>,
    /// Entities with a run still in progress.
    active: HashSet<EntityKind>,
}

/// Registry of import runs plus the one-active-run-per-entity guard.
#[derive(Debug, Default)]
pub struct ImportTracker {
    runs: RwLock<Runs>,
}

impl ImportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new run for `entity`.
    ///
    /// Fails with [`CoreError::Conflict`] while another run for the same
    /// entity is still in progress.
    pub fn begin(&self, entity: EntityKind, total: usize) -> Result<TrackedRun, CoreError> {
        let mut runs = self.write();
        if !runs.active.insert(entity) {
            return Err(CoreError::Conflict(format!(
                "An import for '{entity}' is already in progress"
            )));
        }
        let run = TrackedRun::new(entity, total);
        runs.by_id.insert(run.id, run.clone());
        Ok(run)
    }

    /// Fold one batch's progress into the run.
    pub fn record_batch(&self, id: Uuid, progress: &BatchProgress<'_>) {
        let mut runs = self.write();
        if let Some(run) = runs.by_id.get_mut(&id) {
            run.snapshot = progress.snapshot;
            run.errors.extend_from_slice(progress.new_errors);
            if progress.snapshot.success > 0 {
                run.refresh_required = true;
            }
        }
    }

    /// Mark the run complete with its final report and release the entity.
    pub fn finish(&self, id: Uuid, report: &ImportReport) {
        let mut runs = self.write();
        let Some(run) = runs.by_id.get_mut(&id) else {
            return;
        };
        run.status = RunStatus::Completed;
        run.snapshot = report.snapshot;
        run.errors.clone_from(&report.errors);
        run.outcome = Some(report.outcome);
        run.refresh_required = report.refresh_required;
        run.finished_at = Some(chrono::Utc::now());
        let entity = run.entity;
        runs.active.remove(&entity);
    }

    /// Mark a run that never reported completion as aborted and release
    /// its entity. No-op for runs that already finished.
    pub fn abort(&self, id: Uuid) {
        let mut runs = self.write();
        let Some(run) = runs.by_id.get_mut(&id) else {
            return;
        };
        if run.status != RunStatus::Running {
            return;
        }
        run.status = RunStatus::Aborted;
        run.finished_at = Some(chrono::Utc::now());
        let entity = run.entity;
        runs.active.remove(&entity);
    }

    /// Forget runs that finished at or before `cutoff`. Returns how many
    /// were removed. Running runs are never purged.
    pub fn purge_finished_before(&self, cutoff: Timestamp) -> usize {
        let mut runs = self.write();
        let before = runs.by_id.len();
        runs.by_id
            .retain(|_, run| run.finished_at.map_or(true, |finished| finished > cutoff));
        before - runs.by_id.len()
    }

    pub fn get(&self, id: Uuid) -> Option<TrackedRun> {
        self.read().by_id.get(&id).cloned()
    }

    pub fn is_active(&self, entity: EntityKind) -> bool {
        self.read().active.contains(&entity)
    }

    pub fn active_count(&self) -> usize {
        self.read().active.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, Runs> {
        self.runs.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Runs> {
        self.runs.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// ── Runner ───────────────────────────────────────────────────────────

/// Aborts the run on drop unless it finished normally, so a panicking
/// import task cannot leave its entity locked.
struct RunGuard {
    tracker: Arc<ImportTracker>,
    run_id: Uuid,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.tracker.abort(self.run_id);
    }
}

/// Run a registered import in the background.
///
/// Progress is written to `tracker` after every batch. When the run stored
/// anything, an `entity.imported` event tells list views to refresh.
pub fn spawn_import(
    pipeline: ImportPipeline,
    tracker: Arc<ImportTracker>,
    event_bus: Arc<EventBus>,
    config: &'static ImportConfig,
    run_id: Uuid,
    rows: Vec<RawRow>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let _guard = RunGuard {
            tracker: Arc::clone(&tracker),
            run_id,
        };
        let progress_tracker = Arc::clone(&tracker);
        let mut on_batch =
            move |progress: &BatchProgress<'_>| progress_tracker.record_batch(run_id, progress);

        let report = pipeline.run(config, &rows, &mut on_batch).await;
        tracker.finish(run_id, &report);

        tracing::info!(
            run_id = %run_id,
            entity = config.key(),
            success = report.snapshot.success,
            failed = report.snapshot.failed,
            "Import run completed"
        );

        if report.refresh_required {
            event_bus.publish(PlatformEvent::entity_imported(
                config.kind,
                report.snapshot.success,
                report.snapshot.failed,
            ));
        }
    })
}
