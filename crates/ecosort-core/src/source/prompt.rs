use crate::model::DetectedItem;
use crate::rules::{tables, Outcome};
use std::fmt::Write;

/// Prompt asking for one classification per label, as a single JSON
/// document.
pub fn classification_prompt(labels: &[String]) -> String {
    let mut prompt = String::from(
        "You are an environmental science expert specializing in waste classification.\n\n\
         Please classify these waste items:\n",
    );
    for (idx, label) in labels.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", idx + 1, label);
    }

    prompt.push_str(
        r#"
Respond with JSON only, exactly in this format:
{
  "classifications": [
    {
      "label": "[item label exactly as listed]",
      "type": "[biodegradable or non-biodegradable]",
      "material": "[specific material composition, e.g. Polyethylene terephthalate (PET)]",
      "disposal": "[specific actionable disposal steps]",
      "recyclable": "[yes, no, or potentially]",
      "reusable": "[yes, no, or potentially]",
      "hazardous": "[yes or no]",
      "icon": "[FontAwesome 5 icon class for this item]"
    }
  ]
}

Rules:
- Include one entry for every listed item.
- Never answer "unknown" for any field. If unsure, make the best determination based on similar items.
- The material must be specific (at least a few words), never just "plastic", "metal", "paper", "glass", "textile" or "wood".
- The disposal recommendation must be concrete steps such as "Rinse thoroughly, remove labels, place in recycling bin", never "Check local guidelines".
- Icons must start with 'fas fa-', 'far fa-' or 'fab fa-'. Use these icons for these waste types:
"#,
    );
    for rule in tables::ICONS {
        if let (Some(keyword), Outcome::Is(icon)) = (rule.any.first(), &rule.then) {
            let _ = writeln!(prompt, "  - {keyword}: \"{icon}\"");
        }
    }
    prompt.push_str(
        "\nProvide accurate classifications based on environmental science. \
         Ensure every item has a complete classification with all fields filled in.",
    );
    prompt
}

/// Prompt asking for a free-text markdown report on a detection list.
pub fn analysis_prompt(items: &[DetectedItem]) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string_pretty(items)?;
    Ok(format!(
        "Analyze this waste data and provide detailed information about it:\n\n\
         Waste Data:\n{data}\n\n\
         Please provide a comprehensive analysis including:\n\
         1. Waste type classification (biodegradable, non-biodegradable, recyclable, hazardous, etc.)\n\
         2. Material composition (plastic, metal, paper, etc.)\n\
         3. Detailed disposal methods for each type\n\
         4. Environmental impact assessment\n\
         5. Recycling possibilities and processes\n\
         6. Eco-friendly alternatives or reduction strategies\n\
         7. Potential contamination issues\n\
         8. Special handling requirements if any\n\n\
         Format the response in clear, well-structured markdown with appropriate headings and bullet points."
    ))
}
