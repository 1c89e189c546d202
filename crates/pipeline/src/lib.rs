//! Bulk CSV import pipeline.
//!
//! Rows are transformed and inserted in fixed-size batches, one batch at a
//! time. A bad row only drops that row; a refused insert only fails that
//! batch. Nothing is retried and there is no transaction across batches, so
//! a large file makes partial progress instead of failing as a whole.

pub mod error;
pub mod memory;
pub mod pipeline;
pub mod progress;
pub mod run;

pub use error::PipelineError;
pub use pipeline::{ImportPipeline, DEFAULT_BATCH_SIZE};
pub use progress::{BatchProgress, NoProgress, ProgressSink};
pub use run::{ImportOutcome, ImportReport, ImportRun, ProgressSnapshot};
