use crate::model::{Biodegradability, ClassificationRecord, TriState};
use crate::rules::tables::{
    icon_for, BIODEGRADABLE, DEFAULT_DISPOSAL, DIRECT_MATERIAL, DISPOSAL, HAZARDOUS, RECYCLABLE,
    REUSABLE,
};
use crate::rules::{first_match, RuleBook};

/// Classify a label with the built-in keyword tables only.
pub fn classify_heuristically(label: &str) -> ClassificationRecord {
    classify_heuristically_with(&RuleBook::builtin(), label)
}

/// Classify a label from keyword tables, consulting custom material rules
/// first. Total: every label, including one matching no keyword, gets a
/// complete record.
pub fn classify_heuristically_with(book: &RuleBook, label: &str) -> ClassificationRecord {
    let lower = label.to_lowercase();

    let kind = first_match(BIODEGRADABLE, &lower).unwrap_or(Biodegradability::NonBiodegradable);
    let material = heuristic_material(book, label);
    let icon = icon_for(&material, label, kind).to_string();

    ClassificationRecord {
        label: label.to_string(),
        kind,
        material,
        disposal: heuristic_disposal(&lower).to_string(),
        recyclable: first_match(RECYCLABLE, &lower).unwrap_or(TriState::No),
        reusable: first_match(REUSABLE, &lower).unwrap_or(TriState::No),
        hazardous: first_match(HAZARDOUS, &lower).unwrap_or_default(),
        icon,
    }
}

/// Material for a label: a custom rule, then a direct keyword, then full
/// inference.
pub fn heuristic_material(book: &RuleBook, label: &str) -> String {
    book.custom_material(label)
        .or_else(|| first_match(DIRECT_MATERIAL, label).map(str::to_string))
        .unwrap_or_else(|| book.infer_material(label))
}

pub fn heuristic_disposal(label: &str) -> &'static str {
    first_match(DISPOSAL, label).unwrap_or(DEFAULT_DISPOSAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Hazard;
    use crate::rules::material::{is_acceptable_material, COMPOSITE_FALLBACK};
    use crate::rules::parse_ruleset_str;

    #[test]
    fn test_plastic() {
        let r = classify_heuristically("Plastic");
        assert_eq!(r.kind, Biodegradability::NonBiodegradable);
        assert_eq!(r.recyclable, TriState::Yes);
        assert_eq!(r.reusable, TriState::No);
        assert_eq!(r.material, "Synthetic polymer");
        assert_eq!(r.hazardous, Hazard::No);
        assert_eq!(r.icon, "fas fa-wine-bottle");
        assert!(r.disposal.contains("plastic recycling"));
    }

    #[test]
    fn test_cardboard() {
        let r = classify_heuristically("Cardboard");
        assert_eq!(r.kind, Biodegradability::Biodegradable);
        assert_eq!(r.recyclable, TriState::Yes);
        assert_eq!(r.reusable, TriState::No);
        assert_eq!(r.material, "Processed paper pulp");
        // material text is matched before the label
        assert_eq!(r.icon, "fas fa-scroll");
    }

    #[test]
    fn test_plastic_bag_not_recyclable() {
        let r = classify_heuristically("Plastic bag");
        assert_eq!(r.recyclable, TriState::No);
    }

    #[test]
    fn test_plastic_bottle_potentially_reusable() {
        let r = classify_heuristically("Plastic bottle");
        assert_eq!(r.reusable, TriState::Potentially);
    }

    #[test]
    fn test_e_waste() {
        let r = classify_heuristically("E-waste");
        assert_eq!(r.kind, Biodegradability::NonBiodegradable);
        assert_eq!(r.recyclable, TriState::Potentially);
        assert_eq!(r.reusable, TriState::Potentially);
        assert_eq!(r.hazardous, Hazard::Yes);
        assert_eq!(r.material, "Electronic components and circuitry");
        assert!(r.disposal.contains("electronics recycling"));
    }

    #[test]
    fn test_battery_is_hazardous() {
        let r = classify_heuristically("Battery");
        assert_eq!(r.hazardous, Hazard::Yes);
        assert!(r.disposal.contains("hazardous waste"));
    }

    #[test]
    fn test_material_disposal_before_hazardous() {
        let r = classify_heuristically("Plastic paint bucket");
        assert_eq!(r.hazardous, Hazard::Yes);
        assert!(r.disposal.contains("plastic recycling"));
    }

    #[test]
    fn test_soiled_food_not_recyclable() {
        let r = classify_heuristically("Food scraps");
        assert_eq!(r.kind, Biodegradability::Biodegradable);
        assert_eq!(r.recyclable, TriState::No);
        assert!(r.disposal.contains("compost"));
    }

    #[test]
    fn test_unmatched_label_defaults() {
        let r = classify_heuristically("Sponge");
        assert_eq!(r.kind, Biodegradability::NonBiodegradable);
        assert_eq!(r.recyclable, TriState::No);
        assert_eq!(r.reusable, TriState::No);
        assert_eq!(r.material, COMPOSITE_FALLBACK);
        assert_eq!(r.disposal, DEFAULT_DISPOSAL);
        assert_eq!(r.icon, "fas fa-trash");
    }

    #[test]
    fn test_records_satisfy_invariants() {
        for label in ["Plastic", "Glass", "Metal", "Wood", "Textile", "Paper", "X", "Unknown"] {
            let r = classify_heuristically(label);
            assert!(is_acceptable_material(&r.material), "{label}: {}", r.material);
            assert!(r.kind.is_canonical());
            assert!(!r.disposal.to_lowercase().contains("check local"));
        }
    }

    #[test]
    fn test_custom_material_rule_wins() {
        let rs = parse_ruleset_str(
            r#"{ "name": "Site", "version": "1",
                 "rules": [
                   { "keywords": ["plastic"], "material": "Recycled polypropylene (PP)" }
                 ] }"#,
        )
        .unwrap();
        let book = RuleBook::builtin().with_ruleset(rs);
        let r = classify_heuristically_with(&book, "Plastic");
        assert_eq!(r.material, "Recycled polypropylene (PP)");
        assert_eq!(r.recyclable, TriState::Yes);
    }
}
