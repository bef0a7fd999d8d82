pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod parsing;
pub mod pipeline;
pub mod rules;
pub mod source;
pub mod trace;

use classify::{aggregate, classify_heuristically_with, AggregateStats};
use error::EcosortError;
use model::DetectedItem;
use rules::RuleBook;
use source::GeminiClient;

pub use pipeline::{ClassificationReport, Pipeline};

/// Classify a detection list with local rules only.
///
/// Synchronous; makes no external requests. Equivalent to a pipeline run in
/// which every external source failed.
pub fn classify_offline(items: &[DetectedItem], rulebook: &RuleBook) -> AggregateStats {
    aggregate(items, |label| classify_heuristically_with(rulebook, label))
}

/// Ask the external service for a free-text markdown report on a detection
/// list. Unlike classification there is no local fallback, so failures are
/// returned to the caller.
pub async fn analyze(
    client: &GeminiClient,
    items: &[DetectedItem],
) -> Result<String, EcosortError> {
    if items.is_empty() {
        return Err(EcosortError::InvalidInput("no items to analyze".into()));
    }
    Ok(client.analyze(items).await?)
}
