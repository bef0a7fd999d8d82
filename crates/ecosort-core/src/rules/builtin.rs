use super::material::{MATERIAL_KEYWORDS, MATERIAL_RULES, NATURAL_FALLBACK, NATURAL_KEYWORDS};
use super::tables;
use super::{Outcome, Rule};
use crate::error::EcosortError;
use std::fmt::Display;

/// Names of the built-in rule tables, in evaluation order of a heuristic
/// classification.
pub const TABLES: &[&str] = &[
    "material",
    "biodegradable",
    "recyclable",
    "reusable",
    "hazardous",
    "disposal",
    "direct-material",
    "icon",
];

/// One-line summary of a built-in table.
pub fn summary(name: &str) -> Result<&'static str, EcosortError> {
    let text = match name {
        "material" => "Material inference: specific rules, keyword scoring, natural fallback",
        "biodegradable" => "Keywords marking an item biodegradable (default: non-biodegradable)",
        "recyclable" => "Recyclability by keyword (default: No)",
        "reusable" => "Reusability by keyword (default: No)",
        "hazardous" => "Keywords flagging hazardous items (default: no)",
        "disposal" => "Disposal instruction by keyword",
        "direct-material" => "Material assigned directly from a label keyword",
        "icon" => "Icon key by material or label keyword",
        other => return Err(EcosortError::UnknownTable(other.to_string())),
    };
    Ok(text)
}

/// Render a built-in table as indented text lines, one rule per line.
pub fn explain(name: &str) -> Result<Vec<String>, EcosortError> {
    let mut lines = Vec::new();
    match name {
        "material" => {
            render(MATERIAL_RULES, 0, &mut lines);
            lines.push("then keyword scoring (up to 3 joined with \"and\"):".into());
            for (keyword, material) in MATERIAL_KEYWORDS {
                lines.push(format!("  {keyword} -> {material}"));
            }
            lines.push(format!(
                "then [{}] -> {}",
                NATURAL_KEYWORDS.join(", "),
                NATURAL_FALLBACK
            ));
            lines.push(format!("otherwise -> {}", super::material::COMPOSITE_FALLBACK));
        }
        "biodegradable" => {
            render(tables::BIODEGRADABLE, 0, &mut lines);
            lines.push("otherwise -> non-biodegradable".into());
        }
        "recyclable" => {
            render(tables::RECYCLABLE, 0, &mut lines);
            lines.push("otherwise -> No".into());
        }
        "reusable" => {
            render(tables::REUSABLE, 0, &mut lines);
            lines.push("otherwise -> No".into());
        }
        "hazardous" => {
            render(tables::HAZARDOUS, 0, &mut lines);
            lines.push("otherwise -> no".into());
        }
        "disposal" => {
            render(tables::DISPOSAL, 0, &mut lines);
            lines.push(format!("otherwise -> {}", tables::DEFAULT_DISPOSAL));
        }
        "direct-material" => {
            render(tables::DIRECT_MATERIAL, 0, &mut lines);
            lines.push("otherwise -> material inference".into());
        }
        "icon" => {
            render(tables::ICONS, 0, &mut lines);
            lines.push(format!(
                "otherwise -> {} / {} by type, else {}",
                tables::ICON_BIODEGRADABLE,
                tables::ICON_NON_BIODEGRADABLE,
                tables::ICON_FALLBACK
            ));
        }
        other => return Err(EcosortError::UnknownTable(other.to_string())),
    }
    Ok(lines)
}

fn render<T: Display + 'static>(rules: &[Rule<T>], depth: usize, out: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for rule in rules {
        let mut condition = format!("[{}]", rule.any.join(", "));
        if !rule.none.is_empty() {
            condition.push_str(&format!(" without [{}]", rule.none.join(", ")));
        }
        match &rule.then {
            Outcome::Is(value) => out.push(format!("{indent}{condition} -> {value}")),
            Outcome::Refine { rules, otherwise } => {
                out.push(format!("{indent}{condition} ->"));
                render(rules, depth + 1, out);
                out.push(format!("{indent}  otherwise -> {otherwise}"));
            }
        }
    }
}
