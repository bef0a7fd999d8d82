//! Material inference: turns an item label into a specific material
//! description.
//!
//! The tables below are ordered from most to least specific. A label like
//! "plastic bag" carries several keywords, so the plastic family is tried
//! (and refined to LDPE) long before the generic "bag" compound rule or the
//! keyword-scoring fallback.

use super::{first_match, Rule};

/// Shortest material description accepted from any source.
pub const MIN_MATERIAL_LEN: usize = 10;

/// Bare material families that are too generic to show on their own.
pub const GENERIC_MATERIALS: &[&str] = &["plastic", "metal", "paper", "glass", "textile", "wood"];

/// Used when a label matches no keyword at all.
pub const COMPOSITE_FALLBACK: &str = "Composite materials";

/// Used for an empty label.
pub const UNIDENTIFIED: &str = "Unidentified material";

type MaterialRule = Rule<&'static str>;

const PAPER: &[MaterialRule] = &[
    Rule::when(
        &["magazine", "glossy"],
        "Coated paper with clay and binding agents",
    ),
    Rule::when(&["newspaper"], "Low-grade recycled cellulose fiber"),
];

const CARDBOARD: &[MaterialRule] = &[Rule::when(
    &["corrugated"],
    "Corrugated paper pulp with fluted medium",
)];

const PLASTIC: &[MaterialRule] = &[
    Rule::when(&["bottle", "pet"], "Polyethylene terephthalate (PET)"),
    Rule::when(&["bag"], "Low-density polyethylene (LDPE)"),
    Rule::when(&["container", "tub"], "High-density polyethylene (HDPE)"),
    Rule::when(&["wrap"], "Polyvinyl chloride (PVC) film"),
    Rule::when(&["pipe"], "Polyvinyl chloride (PVC)"),
];

const TEXTILE: &[MaterialRule] = &[
    Rule::when(&["cotton"], "Cotton cellulose fibers"),
    Rule::when(&["polyester"], "Polyester synthetic fibers"),
    Rule::when(&["wool"], "Keratin protein fibers"),
    Rule::when(&["jute"], "Jute plant bast fibers"),
];

const METAL: &[MaterialRule] = &[
    Rule::when(&["aluminum", "can"], "Aluminum alloy"),
    Rule::when(&["steel"], "Carbon steel alloy"),
    Rule::when(&["tin"], "Tin-plated steel"),
];

const WOOD: &[MaterialRule] = &[
    Rule::when(&["plywood"], "Layered wood veneer with adhesive"),
    Rule::when(
        &["particleboard"],
        "Compressed wood particles with resin binder",
    ),
];

const ORGANIC: &[MaterialRule] = &[
    Rule::when(
        &["fruit", "vegetable"],
        "Plant-based cellulose and carbohydrates",
    ),
    Rule::when(&["meat"], "Protein and fat-based organic matter"),
];

const BAG: &[MaterialRule] = &[Rule::when(
    &["plastic", "poly"],
    "Low-density polyethylene film",
)];

/// Material families and specific objects, most specific first.
pub static MATERIAL_RULES: &[MaterialRule] = &[
    // Natural items
    Rule::when(
        &["banana", "fruit peel", "vegetable peel"],
        "Plant-based cellulose and organic fibers",
    ),
    Rule::when(&["coconut", "nut shell"], "Lignin and cellulose plant fibers"),
    Rule::when(&["jute", "hemp", "cotton bag"], "Natural plant-based fibers"),
    // Material families with sub-types
    Rule::refine(&["paper"], PAPER, "Processed cellulose fiber"),
    Rule::refine(&["cardboard", "card"], CARDBOARD, "Compressed paper pulp fibers"),
    Rule::refine(&["plastic"], PLASTIC, "Thermoplastic polymer"),
    Rule::refine(
        &["textile", "cloth", "fabric"],
        TEXTILE,
        "Woven textile fiber composite",
    ),
    Rule::when(
        &["glass"],
        "Amorphous silica with sodium and calcium oxides",
    ),
    Rule::refine(&["metal"], METAL, "Metal alloy composite"),
    Rule::when(
        &["e-waste", "electronic"],
        "Circuit boards with copper, gold, and polymer substrate",
    ),
    Rule::refine(&["wood"], WOOD, "Cellulose and lignin composite"),
    Rule::refine(
        &["organic", "food"],
        ORGANIC,
        "Biodegradable organic compounds",
    ),
    // Everyday objects made of several materials
    Rule::when(&["toy"], "Plastic, metal, and fabric components"),
    Rule::when(&["furniture"], "Wood, metal, and textile materials"),
    Rule::when(&["packaging"], "Paper and plastic laminate"),
    Rule::when(&["container"], "Plastic polymer with metal components"),
    Rule::when(&["device"], "Electronic components and plastic housing"),
    Rule::refine(&["bag"], BAG, "Woven natural or synthetic fibers"),
    Rule::when(&["box"], "Pressed paper fibers and adhesive"),
    Rule::when(&["bottle"], "PET plastic with polymer label"),
    Rule::when(&["can"], "Aluminum with polymer coating"),
    Rule::when(&["wrapper"], "Plastic film and metallic foil"),
    Rule::when(&["cup", "plate"], "Molded paper pulp or polymer"),
    Rule::when(&["clothing"], "Natural and synthetic textile fibers"),
    Rule::when(&["shell"], "Natural calcium carbonate and protein matrix"),
];

/// Keyword scoring used when no material rule matched. Every matching
/// entry contributes, in table order.
pub static MATERIAL_KEYWORDS: &[(&str, &str)] = &[
    ("plastic", "Synthetic polymer"),
    ("wood", "Processed timber"),
    ("paper", "Cellulose fiber"),
    ("metal", "Metal alloy"),
    ("glass", "Silica-based material"),
    ("fabric", "Textile fibers"),
    ("organic", "Biodegradable material"),
    ("ceramic", "Clay-based ceramic"),
    ("rubber", "Vulcanized elastomer"),
    ("leather", "Processed animal hide"),
    ("plant", "Cellulose-based organic material"),
    ("leaf", "Plant cellulose and fiber"),
    ("bamboo", "Natural cellulose fibers"),
    ("cotton", "Natural plant fibers"),
    ("food", "Organic biodegradable material"),
];

/// At most this many keyword-scored materials are combined.
const MAX_SCORED_MATERIALS: usize = 3;

/// Labels that still look natural after every table failed.
pub static NATURAL_KEYWORDS: &[&str] = &["peel", "seed", "fruit", "vegetable", "leaf", "food"];

pub const NATURAL_FALLBACK: &str = "Organic biodegradable material";

/// Infer a specific material description from a label using the built-in
/// tables. Always returns an acceptable description.
pub fn infer_material(label: &str) -> String {
    let lower = label.trim().to_lowercase();

    if let Some(material) = first_match(MATERIAL_RULES, &lower) {
        return material.to_string();
    }

    let scored: Vec<&str> = MATERIAL_KEYWORDS
        .iter()
        .filter(|(keyword, _)| lower.contains(keyword))
        .map(|(_, material)| *material)
        .take(MAX_SCORED_MATERIALS)
        .collect();
    if !scored.is_empty() {
        return scored.join(" and ");
    }

    if NATURAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
        NATURAL_FALLBACK.to_string()
    } else if !lower.is_empty() {
        COMPOSITE_FALLBACK.to_string()
    } else {
        UNIDENTIFIED.to_string()
    }
}

/// Whether a material description is specific enough to keep: present,
/// free of "unknown", not a bare material family and at least
/// [`MIN_MATERIAL_LEN`] characters long.
pub fn is_acceptable_material(material: &str) -> bool {
    let trimmed = material.trim();
    let lower = trimmed.to_lowercase();
    !lower.contains("unknown")
        && !GENERIC_MATERIALS.contains(&lower.as_str())
        && trimmed.chars().count() >= MIN_MATERIAL_LEN
}
