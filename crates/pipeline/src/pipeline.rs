//! The batch import routine.

use std::num::NonZeroUsize;
use std::sync::Arc;

use batohi_core::csv_rows::{parse_rows, RawRow};
use batohi_core::import_config::{require_config, ImportConfig};
use batohi_core::store::RecordStore;

use crate::error::PipelineError;
use crate::progress::{BatchProgress, ProgressSink};
use crate::run::{ImportReport, ImportRun};

/// Rows per insert unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Runs bulk imports against a [`RecordStore`].
///
/// Batches are processed strictly one after another; a batch's insert is
/// awaited before the next batch is transformed.
#[derive(Clone)]
pub struct ImportPipeline {
    store: Arc<dyn RecordStore>,
    batch_size: NonZeroUsize,
}

impl ImportPipeline {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }

    pub fn with_batch_size(mut self, batch_size: NonZeroUsize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    /// Resolve `key`, parse `data`, and run the import.
    ///
    /// An unknown key fails before the file is read. A parse failure fails
    /// before any insert. Everything after that is reported on the
    /// returned [`ImportReport`].
    pub async fn import_csv(
        &self,
        key: &str,
        data: &[u8],
        sink: &mut dyn ProgressSink,
    ) -> Result<ImportReport, PipelineError> {
        let config = require_config(key)?;
        let rows = parse_rows(data)?;
        Ok(self.run(config, &rows, sink).await)
    }

    /// Transform and insert `rows` in batches.
    pub async fn run(
        &self,
        config: &ImportConfig,
        rows: &[RawRow],
        sink: &mut dyn ProgressSink,
    ) -> ImportReport {
        let total = rows.len();
        let batch_size = self.batch_size.get();
        let mut run = ImportRun::new(total);

        tracing::info!(
            entity = config.key(),
            total,
            batch_size,
            "Starting bulk import"
        );

        for (batch_index, chunk) in rows.chunks(batch_size).enumerate() {
            let batch_number = batch_index + 1;
            let offset = batch_index * batch_size;
            let errors_before = run.errors().len();

            let mut records = Vec::with_capacity(chunk.len());
            for (i, row) in chunk.iter().enumerate() {
                match config.transform(row) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        tracing::debug!(entity = config.key(), row = offset + i + 1, error = %e, "Row rejected");
                        run.record_row_failure(offset + i + 1, e);
                    }
                }
            }

            if !records.is_empty() {
                match self.store.insert(config.target_collection, &records).await {
                    Ok(_) => run.record_batch_success(records.len()),
                    Err(e) => {
                        tracing::warn!(
                            entity = config.key(),
                            batch = batch_number,
                            records = records.len(),
                            error = %e,
                            "Batch insert failed"
                        );
                        run.record_batch_failure(
                            batch_number,
                            offset + 1..=offset + chunk.len(),
                            records.len(),
                            e,
                        );
                    }
                }
            }

            run.advance_to(offset + chunk.len());
            let snapshot = run.snapshot();
            tracing::debug!(
                entity = config.key(),
                batch = batch_number,
                processed = snapshot.processed,
                success = snapshot.success,
                failed = snapshot.failed,
                "Batch complete"
            );
            sink.on_batch(&BatchProgress {
                batch_number,
                snapshot,
                new_errors: &run.errors()[errors_before..],
            });
        }

        let report = run.finish();
        tracing::info!(
            entity = config.key(),
            total = report.snapshot.total,
            success = report.snapshot.success,
            failed = report.snapshot.failed,
            outcome = %report.outcome,
            "Bulk import finished"
        );
        report
    }
}
