use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classify::{aggregate, reconcile_traced, unique_labels, AggregateStats};
use crate::model::DetectedItem;
use crate::parsing::normalize_label;
use crate::rules::RuleBook;
use crate::source::{ClassificationSource, RawExternalClassification};
use crate::trace::{Resolution, TraceBundle, TraceEntry, TraceSeverity};

/// Result of one classification pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub stats: AggregateStats,
    pub trace: TraceBundle,
}

/// One optional external source, with local rules as the fallback.
pub struct Pipeline {
    rulebook: RuleBook,
    source: Option<Box<dyn ClassificationSource>>,
}

/// A successful batch response, keyed by normalized label.
struct ExternalBatch {
    source: String,
    by_label: HashMap<String, RawExternalClassification>,
}

impl Pipeline {
    pub fn new(rulebook: RuleBook) -> Self {
        Self {
            rulebook,
            source: None,
        }
    }

    /// Set the external source, replacing any previous one.
    pub fn with_source(mut self, source: impl ClassificationSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Classify a detection list.
    ///
    /// Sends at most one batch request with every distinct label. If it
    /// fails, or no source is configured, every label is classified
    /// locally. Never fails.
    pub async fn run(&self, items: &[DetectedItem]) -> ClassificationReport {
        let mut trace = TraceBundle::default();
        let labels = unique_labels(items);

        let external = if labels.is_empty() {
            None
        } else {
            self.fetch(&labels, &mut trace).await
        };
        if let Some(batch) = &external {
            trace.source = Some(batch.source.clone());
        }

        let mut entries: Vec<TraceEntry> = Vec::new();
        let stats = aggregate(items, |label| {
            let raw = external.as_ref().and_then(|b| b.by_label.get(label));
            let resolution = match (&external, raw) {
                (Some(batch), Some(_)) => Resolution::External {
                    source: batch.source.clone(),
                },
                (Some(batch), None) => {
                    warn!(
                        label,
                        source = %batch.source,
                        "label missing from response, using local rules"
                    );
                    Resolution::Heuristic
                }
                (None, _) => Resolution::Heuristic,
            };
            let (record, steps) = reconcile_traced(&self.rulebook, label, raw);
            debug!(label, material = %record.material, kind = %record.kind, "classified label");
            entries.push(TraceEntry {
                label: label.to_string(),
                occurrences: 0,
                resolution,
                steps,
            });
            record
        });

        for entry in &mut entries {
            entry.occurrences = stats.counts.get(&entry.label).copied().unwrap_or(0);
        }
        trace.entries = entries;

        for (index, item) in items.iter().enumerate() {
            if item.usable_label().is_none() {
                trace.warn(
                    Some(index),
                    "item has no label and was skipped",
                    TraceSeverity::Info,
                );
            }
        }

        info!(
            items = stats.total(),
            labels = labels.len(),
            source = trace.source.as_deref().unwrap_or("local rules"),
            "classification pass complete"
        );
        ClassificationReport { stats, trace }
    }

    async fn fetch(&self, labels: &[String], trace: &mut TraceBundle) -> Option<ExternalBatch> {
        let source = self.source.as_ref()?;
        debug!(
            source = source.name(),
            labels = labels.len(),
            "requesting batch classification"
        );
        match source.classify_batch(labels).await {
            Ok(raws) => {
                let by_label = index_by_label(raws);
                debug!(
                    source = source.name(),
                    entries = by_label.len(),
                    "batch classification received"
                );
                Some(ExternalBatch {
                    source: source.name().to_string(),
                    by_label,
                })
            }
            Err(e) => {
                warn!(
                    source = source.name(),
                    error = %e,
                    "external classification failed, classifying with local rules"
                );
                trace.warn(
                    None,
                    format!("{} failed: {e}", source.name()),
                    TraceSeverity::Important,
                );
                None
            }
        }
    }
}

/// Key entries by normalized label. Entries without a label are dropped;
/// on duplicates the first entry wins.
fn index_by_label(
    raws: Vec<RawExternalClassification>,
) -> HashMap<String, RawExternalClassification> {
    let mut by_label = HashMap::new();
    for raw in raws {
        let label = raw
            .label
            .as_deref()
            .map(normalize_label)
            .filter(|l| !l.is_empty());
        let Some(label) = label else {
            debug!("dropping classification entry without a label");
            continue;
        };
        by_label.entry(label).or_insert(raw);
    }
    by_label
}
