use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel coordinates of a detection: `[x1, y1, x2, y2]`.
pub type BoundingBox = [f64; 4];

/// One detected waste object, as supplied by the upstream detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_2d: Option<BoundingBox>,
}

impl DetectedItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            box_2d: None,
        }
    }

    /// The raw label, if present and not blank.
    pub fn usable_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.trim().is_empty())
    }
}

/// Biodegradability of an item.
///
/// `Partial` only arises when an external classification names something
/// other than the two canonical values; aggregate statistics count it as
/// unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biodegradability {
    #[serde(rename = "biodegradable")]
    Biodegradable,
    #[serde(rename = "non-biodegradable")]
    NonBiodegradable,
    #[serde(rename = "partially-biodegradable")]
    Partial,
}

impl Biodegradability {
    pub fn is_canonical(&self) -> bool {
        !matches!(self, Biodegradability::Partial)
    }
}

impl fmt::Display for Biodegradability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Biodegradability::Biodegradable => write!(f, "biodegradable"),
            Biodegradability::NonBiodegradable => write!(f, "non-biodegradable"),
            Biodegradability::Partial => write!(f, "partially-biodegradable"),
        }
    }
}

/// Yes / No / Potentially, used for recyclability and reusability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriState {
    Yes,
    No,
    Potentially,
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriState::Yes => write!(f, "Yes"),
            TriState::No => write!(f, "No"),
            TriState::Potentially => write!(f, "Potentially"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hazard {
    Yes,
    #[default]
    No,
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hazard::Yes => write!(f, "yes"),
            Hazard::No => write!(f, "no"),
        }
    }
}

/// The canonical classification of one normalized label.
///
/// Every field carries a specific value: `material` is never generic or
/// "unknown", `disposal` is always an actionable instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: Biodegradability,
    pub material: String,
    pub disposal: String,
    pub recyclable: TriState,
    pub reusable: TriState,
    #[serde(default)]
    pub hazardous: Hazard,
    pub icon: String,
}
