pub mod aggregate;
pub mod heuristic;
pub mod outcome;
pub mod reconcile;

pub use aggregate::{aggregate, unique_labels};
pub use heuristic::{classify_heuristically, classify_heuristically_with};
pub use outcome::{AggregateStats, ClassifiedItem, Share};
pub use reconcile::{reconcile, reconcile_traced, reconcile_with};
