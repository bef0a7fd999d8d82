//! Merging untrusted external classifications with local rules.
//!
//! The reconciler is the only place external text enters a
//! [`ClassificationRecord`]. Each field is either accepted, mapped onto its
//! canonical vocabulary, or replaced by the heuristic value, so the output
//! never carries "unknown" or a generic material whatever the input was.
//! A field missing from the external record takes the heuristic value.

use super::heuristic::classify_heuristically_with;
use crate::model::{Biodegradability, ClassificationRecord, Hazard, TriState};
use crate::rules::material::is_acceptable_material;
use crate::rules::tables::{icon_for, is_valid_icon};
use crate::rules::RuleBook;
use crate::source::RawExternalClassification;
use crate::trace::{TraceStep, TraceStepType};

/// Hedging stems that make a recyclability answer "Potentially".
const HEDGE_STEMS: &[&str] = &["potential", "possibl", "maybe"];

/// Reconcile with the built-in rules only.
pub fn reconcile(label: &str, raw: Option<&RawExternalClassification>) -> ClassificationRecord {
    reconcile_with(&RuleBook::builtin(), label, raw)
}

pub fn reconcile_with(
    book: &RuleBook,
    label: &str,
    raw: Option<&RawExternalClassification>,
) -> ClassificationRecord {
    reconcile_traced(book, label, raw).0
}

/// Reconcile and report which step decided each field.
pub fn reconcile_traced(
    book: &RuleBook,
    label: &str,
    raw: Option<&RawExternalClassification>,
) -> (ClassificationRecord, Vec<TraceStep>) {
    let local = classify_heuristically_with(book, label);

    let Some(raw) = raw else {
        let step = TraceStep::new(
            TraceStepType::HeuristicFallback,
            "*",
            "no external classification; record built from local rules",
        );
        return (local, vec![step]);
    };

    let mut steps = Vec::new();

    let kind = match present(&raw.kind) {
        Some(text) => {
            let kind = resolve_type(text);
            steps.push(vocabulary_step("type", text, &kind.to_string()));
            kind
        }
        None => {
            steps.push(missing_step("type", &local.kind.to_string()));
            local.kind
        }
    };

    let material = match present(&raw.material) {
        Some(text) if is_acceptable_material(text) => {
            steps.push(TraceStep::new(
                TraceStepType::ExternalAccepted,
                "material",
                format!("kept '{text}'"),
            ));
            text.to_string()
        }
        other => {
            let inferred = book.infer_material(label);
            steps.push(match other {
                Some(text) => TraceStep::new(
                    TraceStepType::ExternalRejected,
                    "material",
                    format!("'{text}' is not specific enough; inferred '{inferred}'"),
                ),
                None => missing_step("material", &inferred),
            });
            inferred
        }
    };

    let disposal = match present(&raw.disposal) {
        Some(text) if is_actionable_disposal(text) => {
            steps.push(TraceStep::new(
                TraceStepType::ExternalAccepted,
                "disposal",
                format!("kept '{text}'"),
            ));
            text.to_string()
        }
        Some(text) => {
            steps.push(TraceStep::new(
                TraceStepType::ExternalRejected,
                "disposal",
                format!("'{text}' is not actionable; used '{}'", local.disposal),
            ));
            local.disposal.clone()
        }
        None => {
            steps.push(missing_step("disposal", &local.disposal));
            local.disposal.clone()
        }
    };

    let recyclable = match present(&raw.recyclable) {
        Some(text) => {
            let value = resolve_recyclable(text);
            steps.push(vocabulary_step("recyclable", text, &value.to_string()));
            value
        }
        None => {
            steps.push(missing_step("recyclable", &local.recyclable.to_string()));
            local.recyclable
        }
    };

    let reusable = match present(&raw.reusable) {
        Some(text) => {
            let value = resolve_reusable(text);
            steps.push(vocabulary_step("reusable", text, &value.to_string()));
            value
        }
        None => {
            steps.push(missing_step("reusable", &local.reusable.to_string()));
            local.reusable
        }
    };

    let hazardous = match present(&raw.hazardous) {
        Some(text) => {
            let value = resolve_hazard(text);
            steps.push(vocabulary_step("hazardous", text, &value.to_string()));
            value
        }
        None => {
            steps.push(missing_step("hazardous", &local.hazardous.to_string()));
            local.hazardous
        }
    };

    let icon = match present(&raw.icon) {
        Some(text) if is_valid_icon(text) => text.to_string(),
        Some(text) => {
            let icon = icon_for(&material, label, kind).to_string();
            steps.push(TraceStep::new(
                TraceStepType::ExternalRejected,
                "icon",
                format!("'{text}' is not an icon key; used '{icon}'"),
            ));
            icon
        }
        None => icon_for(&material, label, kind).to_string(),
    };

    let record = ClassificationRecord {
        label: label.to_string(),
        kind,
        material,
        disposal,
        recyclable,
        reusable,
        hazardous,
        icon,
    };
    (record, steps)
}

/// Map free text onto Yes / No / Potentially. "yes" wins over "no", and
/// anything unrecognised is No.
pub fn resolve_recyclable(raw: &str) -> TriState {
    let lower = raw.to_lowercase();
    if lower.contains("yes") {
        TriState::Yes
    } else if lower.contains("no") {
        TriState::No
    } else if HEDGE_STEMS.iter().any(|s| lower.contains(s)) {
        TriState::Potentially
    } else {
        TriState::No
    }
}

/// Exact (case-insensitive) "yes" or "potentially"; anything else is No.
pub fn resolve_reusable(raw: &str) -> TriState {
    match raw.trim().to_lowercase().as_str() {
        "yes" => TriState::Yes,
        "potentially" => TriState::Potentially,
        _ => TriState::No,
    }
}

/// The two canonical biodegradability values, tolerating case and a space
/// or underscore for the hyphen. Anything else is `Partial`.
pub fn resolve_type(raw: &str) -> Biodegradability {
    let canonical: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect();
    match canonical.as_str() {
        "biodegradable" => Biodegradability::Biodegradable,
        "non-biodegradable" => Biodegradability::NonBiodegradable,
        _ => Biodegradability::Partial,
    }
}

pub fn resolve_hazard(raw: &str) -> Hazard {
    if raw.to_lowercase().contains("yes") {
        Hazard::Yes
    } else {
        Hazard::No
    }
}

fn is_actionable_disposal(text: &str) -> bool {
    !text.to_lowercase().contains("check local")
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn vocabulary_step(field: &str, raw: &str, resolved: &str) -> TraceStep {
    if raw.eq_ignore_ascii_case(resolved) {
        TraceStep::new(
            TraceStepType::ExternalAccepted,
            field,
            format!("kept '{resolved}'"),
        )
    } else {
        TraceStep::new(
            TraceStepType::ExternalCoerced,
            field,
            format!("'{raw}' read as '{resolved}'"),
        )
    }
}

fn missing_step(field: &str, value: &str) -> TraceStep {
    TraceStep::new(
        TraceStepType::HeuristicFallback,
        field,
        format!("not provided; used '{value}'"),
    )
}
