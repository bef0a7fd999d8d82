use ecosort_core::classify::classify_heuristically_with;
use ecosort_core::error::EcosortError;
use ecosort_core::model::ClassificationRecord;
use ecosort_core::parsing::normalize_label;
use std::path::PathBuf;

use crate::output;

pub fn run(
    labels: &[String],
    rule_files: Vec<PathBuf>,
    output_format: &str,
) -> Result<(), EcosortError> {
    let rulebook = super::load_rulebook(&rule_files)?;

    let mut records: Vec<ClassificationRecord> = Vec::new();
    for raw in labels {
        let label = normalize_label(raw);
        if label.is_empty() {
            return Err(EcosortError::InvalidInput("label must not be blank".into()));
        }
        records.push(classify_heuristically_with(&rulebook, &label));
    }

    if output_format == "json" {
        return output::json::print(&records);
    }

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===\n", record.label);
        println!("  Type:        {}", record.kind);
        println!("  Material:    {}", record.material);
        let inferred = rulebook.infer_material(&record.label);
        if inferred != record.material {
            println!("  Inferred:    {}", inferred);
        }
        println!("  Recyclable:  {}", record.recyclable);
        println!("  Reusable:    {}", record.reusable);
        println!("  Hazardous:   {}", record.hazardous);
        println!("  Disposal:    {}", record.disposal);
        println!("  Icon:        {}", record.icon);
    }

    Ok(())
}
