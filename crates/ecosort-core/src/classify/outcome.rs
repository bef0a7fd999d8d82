use crate::model::{ClassificationRecord, DetectedItem};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A detected item paired with the record of its normalized label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    /// The input item, unchanged.
    #[serde(flatten)]
    pub item: DetectedItem,
    /// Normalized label the record was looked up by.
    pub formatted_label: String,
    pub classification: ClassificationRecord,
}

/// Summary of one classification pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Items per normalized label, sorted by label.
    pub counts: BTreeMap<String, usize>,
    pub biodegradable_count: usize,
    pub non_biodegradable_count: usize,
    /// Items whose type is neither canonical value.
    pub unknown_count: usize,
    /// Items skipped for having no usable label.
    pub skipped: usize,
    /// Classified items in input order.
    pub waste_items: Vec<ClassifiedItem>,
}

/// A count with its share of the classified items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub name: String,
    pub count: usize,
    /// Percentage of classified items, one decimal place.
    pub percent: Decimal,
}

impl AggregateStats {
    /// Number of classified items.
    pub fn total(&self) -> usize {
        self.waste_items.len()
    }

    /// Count and percentage per label, largest first; ties keep label order.
    pub fn label_shares(&self) -> Vec<Share> {
        let mut shares: Vec<Share> = self
            .counts
            .iter()
            .map(|(label, &count)| self.share(label, count))
            .collect();
        shares.sort_by(|a, b| b.count.cmp(&a.count));
        shares
    }

    /// Count and percentage per biodegradability class.
    pub fn type_shares(&self) -> Vec<Share> {
        vec![
            self.share("biodegradable", self.biodegradable_count),
            self.share("non-biodegradable", self.non_biodegradable_count),
            self.share("unknown", self.unknown_count),
        ]
    }

    fn share(&self, name: &str, count: usize) -> Share {
        Share {
            name: name.to_string(),
            count,
            percent: percent(count, self.total()),
        }
    }
}

fn percent(count: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(count) * Decimal::ONE_HUNDRED / Decimal::from(total))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
