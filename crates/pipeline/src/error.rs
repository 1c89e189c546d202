use batohi_core::error::{CoreError, CsvError};

/// Errors that stop an import before its first batch.
///
/// Row and batch failures never surface here; they are counted and logged
/// on the run instead.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("CSV parse error: {0}")]
    Parse(#[from] CsvError),
}
