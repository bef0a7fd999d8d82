use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    Important,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    /// External value used as given.
    ExternalAccepted,
    /// External value mapped onto the canonical vocabulary.
    ExternalCoerced,
    /// External value rejected and replaced by a local one.
    ExternalRejected,
    /// No external value; the local rules decided.
    HeuristicFallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub field: String,
    pub message: String,
}

impl TraceStep {
    pub fn new(step_type: TraceStepType, field: &str, message: impl Into<String>) -> Self {
        Self {
            step_type,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Which strategy produced a label's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Resolution {
    External { source: String },
    Heuristic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Normalized label.
    pub label: String,
    /// Number of input items carrying this label.
    pub occurrences: usize,
    pub resolution: Resolution,
    pub steps: Vec<TraceStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceWarning {
    /// Position in the input list, for item-level warnings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_index: Option<usize>,
    pub message: String,
    pub severity: TraceSeverity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceBundle {
    pub trace_schema_version: String,
    /// Source that answered the batch request, if any did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub entries: Vec<TraceEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
}

impl Default for TraceBundle {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            source: None,
            entries: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl TraceBundle {
    pub fn entry(&self, label: &str) -> Option<&TraceEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn warn(
        &mut self,
        item_index: Option<usize>,
        message: impl Into<String>,
        severity: TraceSeverity,
    ) {
        self.warnings.push(TraceWarning {
            item_index,
            message: message.into(),
            severity,
        });
    }
}
