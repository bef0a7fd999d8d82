use ecosort_core::error::EcosortError;
use ecosort_core::rules::builtin;
use std::collections::HashMap;
use std::path::Path;

pub fn list() -> Result<(), EcosortError> {
    println!("Built-in rule tables:\n");
    for name in builtin::TABLES {
        println!("  {:<16} {}", name, builtin::summary(name)?);
    }
    println!("\nRun `ecosort rules explain <table>` to print a table.");
    Ok(())
}

pub fn explain(table: &str) -> Result<(), EcosortError> {
    let lines = builtin::explain(table)?;

    println!("{} ({})\n", table, builtin::summary(table)?);
    println!("Rules are tried top to bottom against the lower-cased label;");
    println!("the first rule whose keywords appear in the label wins.\n");
    for line in lines {
        println!("  {line}");
    }
    println!();
    Ok(())
}

pub fn schema() -> Result<(), EcosortError> {
    print!(
        r#"JSON Rule Schema
================

A rule file adds material rules that are tried before the built-in
material tables. When you run `ecosort classify --rules FILE`, each
label is matched against these rules first; labels no custom rule
matches fall through to the built-in inference.

Top-level fields:
  name          (string, required)  Human-readable name of the ruleset
  description   (string, optional)  What this ruleset is for
  version       (string, required)  Version identifier (e.g., "2025.1")
  rules         (array, required)   Ordered list of material rules;
                                    the first matching rule wins

Each rule in the "rules" array:
  keywords      (array, required)   The rule applies when the label
                                    contains any of these (case-insensitive)
  exclude       (array, optional)   ...and none of these
  material      (string, required)  Specific material description.
                                    At least 10 characters, must not
                                    contain "unknown" and must not be a
                                    bare family such as "plastic".
  note          (string, optional)  Where the description comes from

Example:
{{
  "name": "Kitchen waste overrides",
  "description": "Materials for items common in our canteen",
  "version": "1.0",
  "rules": [
    {{
      "keywords": ["sponge"],
      "material": "Polyurethane foam with cellulose",
      "note": "Supplier data sheet"
    }},
    {{
      "keywords": ["bag"],
      "exclude": ["paper", "jute"],
      "material": "Recycled polypropylene weave"
    }}
  ]
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), EcosortError> {
    let rs = ecosort_core::rules::load_ruleset(file)?;

    println!("Ruleset '{}' (v{}) is valid.", rs.name, rs.version);
    println!("  Rules: {}", rs.rules.len());

    // Potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    for (idx, rule) in rs.rules.iter().enumerate() {
        for keyword in &rule.keywords {
            let key = keyword.trim().to_lowercase();
            match first_seen.get(&key) {
                Some(&earlier) if rs.rules[earlier].exclude.is_empty() => {
                    warnings.push(format!(
                        "rule {} keyword '{}' is already matched by rule {}",
                        idx + 1,
                        keyword,
                        earlier + 1
                    ));
                }
                Some(_) => {}
                None => {
                    first_seen.insert(key, idx);
                }
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
