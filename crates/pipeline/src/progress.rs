//! Per-batch progress callbacks.

use crate::run::ProgressSnapshot;

/// What a caller sees after each batch completes.
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress<'a> {
    /// 1-based batch number.
    pub batch_number: usize,
    pub snapshot: ProgressSnapshot,
    /// Error entries appended while processing this batch.
    pub new_errors: &'a [String],
}

/// Receives progress after every batch, in order.
pub trait ProgressSink: Send {
    fn on_batch(&mut self, progress: &BatchProgress<'_>);
}

/// Ignores progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_batch(&mut self, _progress: &BatchProgress<'_>) {}
}

impl<F> ProgressSink for F
where
    F: FnMut(&BatchProgress<'_>) + Send,
{
    fn on_batch(&mut self, progress: &BatchProgress<'_>) {
        self(progress)
    }
}
