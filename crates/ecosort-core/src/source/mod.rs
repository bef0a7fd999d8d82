pub mod gemini;
pub mod prompt;
pub mod response;

pub use gemini::{GeminiClient, GeminiSource};
pub use response::{parse_batch, RawExternalClassification};

use async_trait::async_trait;

/// An external service able to classify a batch of labels at once.
///
/// Implementations return whatever the service said, untrusted; the
/// reconciler turns each entry into a canonical record.
#[async_trait]
pub trait ClassificationSource: Send + Sync {
    /// Classify all `labels` in one request.
    async fn classify_batch(
        &self,
        labels: &[String],
    ) -> Result<Vec<RawExternalClassification>, SourceError>;

    /// Short name used in logs and traces.
    fn name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status}: {body}")]
    Api { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("source not configured: {0}")]
    NotConfigured(String),
}
