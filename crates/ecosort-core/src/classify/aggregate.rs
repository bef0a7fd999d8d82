use super::outcome::{AggregateStats, ClassifiedItem};
use crate::model::{Biodegradability, ClassificationRecord, DetectedItem};
use crate::parsing::normalize_label;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Fold a detection list into summary statistics.
///
/// `classify` is called once per distinct normalized label; later items with
/// the same label reuse that record. Items without a usable label are
/// skipped and counted in `skipped`.
pub fn aggregate<F>(items: &[DetectedItem], mut classify: F) -> AggregateStats
where
    F: FnMut(&str) -> ClassificationRecord,
{
    let mut stats = AggregateStats::default();
    let mut records: HashMap<String, ClassificationRecord> = HashMap::new();

    for (index, item) in items.iter().enumerate() {
        let Some(raw_label) = item.usable_label() else {
            warn!(index, "skipping waste item without a label");
            stats.skipped += 1;
            continue;
        };

        let label = normalize_label(raw_label);
        let record = records
            .entry(label.clone())
            .or_insert_with(|| classify(&label))
            .clone();

        *stats.counts.entry(label.clone()).or_insert(0) += 1;
        match record.kind {
            Biodegradability::Biodegradable => stats.biodegradable_count += 1,
            Biodegradability::NonBiodegradable => stats.non_biodegradable_count += 1,
            Biodegradability::Partial => stats.unknown_count += 1,
        }

        stats.waste_items.push(ClassifiedItem {
            item: item.clone(),
            formatted_label: label,
            classification: record,
        });
    }

    info!(
        items = stats.total(),
        labels = stats.counts.len(),
        skipped = stats.skipped,
        unknown = stats.unknown_count,
        "aggregated waste items"
    );
    stats
}

/// Distinct normalized labels in first-seen order.
pub fn unique_labels(items: &[DetectedItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(DetectedItem::usable_label)
        .map(normalize_label)
        .filter(|label| seen.insert(label.clone()))
        .collect()
}
