use thiserror::Error;

/// Failure anywhere in the fetch -> fit pipeline.
///
/// The HTTP layer flattens this into the `{"error": "..."}` payload, so the
/// `Display` text is what clients end up showing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("market data request failed: {0}")]
    Upstream(String),
    #[error("insufficient data: at least one price point is required")]
    InsufficientData,
}

impl PipelineError {
    pub fn upstream(detail: impl Into<String>) -> Self {
        Self::Upstream(detail.into())
    }
}
