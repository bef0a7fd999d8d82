pub mod normalize;

pub use normalize::normalize_label;

use crate::error::EcosortError;
use crate::model::DetectedItem;
use std::path::Path;

/// Parse a detection list: a JSON array of `{ "label", "box_2d" }` objects.
///
/// Items without a label are kept here; the aggregator skips them.
pub fn parse_items(json: &str) -> Result<Vec<DetectedItem>, EcosortError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(EcosortError::InvalidInput(
            "detection file must contain a JSON array of items".into(),
        ));
    }
    let items: Vec<DetectedItem> = serde_json::from_value(value)?;
    Ok(items)
}

/// Load a detection list from a JSON file.
pub fn load_items(path: &Path) -> Result<Vec<DetectedItem>, EcosortError> {
    let content = std::fs::read_to_string(path)?;
    parse_items(&content)
}
