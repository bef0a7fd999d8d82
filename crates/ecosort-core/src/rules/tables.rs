//! Built-in keyword tables for the heuristic classifier.

use super::Rule;
use crate::model::{Biodegradability, Hazard, TriState};

pub static BIODEGRADABLE: &[Rule<Biodegradability>] = &[Rule::when(
    &["paper", "cardboard", "textile", "organic", "food", "wood"],
    Biodegradability::Biodegradable,
)];

/// Anything not listed is treated as not recyclable.
pub static RECYCLABLE: &[Rule<TriState>] = &[
    Rule::when(&["paper", "cardboard", "metal", "glass"], TriState::Yes),
    Rule::when_not(&["plastic"], &["bag"], TriState::Yes),
    Rule::when(
        &["e-waste", "electronic", "textile", "fabric"],
        TriState::Potentially,
    ),
    Rule::when(&["food", "organic", "soiled"], TriState::No),
];

const PLASTIC_REUSE: &[Rule<TriState>] =
    &[Rule::when(&["bottle", "container"], TriState::Potentially)];

/// Anything not listed is treated as single-use.
pub static REUSABLE: &[Rule<TriState>] = &[
    Rule::when(&["e-waste"], TriState::Potentially),
    Rule::when(&["glass", "metal"], TriState::Yes),
    Rule::when(&["textile", "fabric"], TriState::Yes),
    Rule::when(&["cardboard", "paper"], TriState::No),
    Rule::when(&["wood"], TriState::Potentially),
    Rule::refine(&["plastic"], PLASTIC_REUSE, TriState::No),
];

pub static HAZARDOUS: &[Rule<Hazard>] = &[Rule::when(
    &["battery", "batteries", "paint", "chemical", "e-waste", "electronic"],
    Hazard::Yes,
)];

pub static DISPOSAL: &[Rule<&'static str>] = &[
    Rule::when(
        &["plastic"],
        "Rinse thoroughly, remove labels if possible, place in plastic recycling",
    ),
    Rule::when(
        &["paper", "cardboard"],
        "Remove tape/staples, flatten, place in paper recycling",
    ),
    Rule::when(
        &["metal"],
        "Clean, crush if possible, place in metal recycling",
    ),
    Rule::when(
        &["glass"],
        "Rinse, remove caps and lids, place in glass recycling",
    ),
    Rule::when(
        &["organic", "food"],
        "Place in compost bin or food waste collection",
    ),
    Rule::when(
        &["electronic", "e-waste"],
        "Take to electronics recycling center or retailer take-back program",
    ),
    Rule::when(
        &["textile", "fabric", "cloth"],
        "Donate if still usable, otherwise drop off at a textile recycling point",
    ),
    Rule::when(
        &["wood"],
        "Compost untreated wood or take it to a wood recycling facility",
    ),
    Rule::when(
        &["battery", "batteries", "paint", "chemical"],
        "Tape battery terminals or seal the container, \
         then take it to a hazardous waste collection point",
    ),
];

pub const DEFAULT_DISPOSAL: &str = "Separate by material type and dispose accordingly";

/// Material descriptions assigned straight from a label keyword, before
/// falling back to full material inference.
pub static DIRECT_MATERIAL: &[Rule<&'static str>] = &[
    Rule::when(&["paper"], "Paper fiber"),
    Rule::when(&["cardboard"], "Processed paper pulp"),
    Rule::when(&["plastic"], "Synthetic polymer"),
    Rule::when(&["textile"], "Woven fabric fibers"),
    Rule::when(&["glass"], "Silica-based material"),
    Rule::when(&["metal"], "Metallic alloy"),
    Rule::when(&["e-waste"], "Electronic components and circuitry"),
    Rule::when(&["wood"], "Processed timber"),
];

/// Icon keys by material or label keyword.
pub static ICONS: &[Rule<&'static str>] = &[
    Rule::when(&["cardboard"], "fas fa-box"),
    Rule::when(&["textile"], "fas fa-tshirt"),
    Rule::when(&["paper"], "fas fa-scroll"),
    Rule::when(&["e-waste", "electronic"], "fas fa-laptop"),
    Rule::when(&["plastic"], "fas fa-wine-bottle"),
    Rule::when(&["glass"], "fas fa-wine-glass"),
    Rule::when(&["metal"], "fas fa-utensils"),
    Rule::when(&["organic"], "fas fa-apple-alt"),
];

pub const ICON_BIODEGRADABLE: &str = "fas fa-leaf";
pub const ICON_NON_BIODEGRADABLE: &str = "fas fa-trash";
pub const ICON_FALLBACK: &str = "fas fa-question";

/// Accepted prefixes for icon keys supplied by an external service.
pub const ICON_PREFIXES: &[&str] = &["fas fa-", "far fa-", "fab fa-"];

/// Pick an icon key: material text first, then the label, then the
/// biodegradability class.
pub fn icon_for(material: &str, label: &str, kind: Biodegradability) -> &'static str {
    super::first_match(ICONS, material)
        .or_else(|| super::first_match(ICONS, label))
        .unwrap_or(match kind {
            Biodegradability::Biodegradable => ICON_BIODEGRADABLE,
            Biodegradability::NonBiodegradable => ICON_NON_BIODEGRADABLE,
            Biodegradability::Partial => ICON_FALLBACK,
        })
}

/// Whether an externally supplied icon key is well-formed, e.g.
/// `fas fa-box`.
pub fn is_valid_icon(icon: &str) -> bool {
    let icon = icon.trim();
    ICON_PREFIXES.iter().any(|prefix| {
        icon.strip_prefix(prefix).is_some_and(|name| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        })
    })
}
