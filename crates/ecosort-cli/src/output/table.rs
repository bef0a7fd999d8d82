use ecosort_core::model::ClassificationRecord;
use ecosort_core::trace::TraceSeverity;
use ecosort_core::ClassificationReport;
use std::collections::HashMap;

pub fn print(report: &ClassificationReport, verbose: bool) {
    let stats = &report.stats;
    let source = report.trace.source.as_deref().unwrap_or("local rules");

    println!(
        "=== Waste items: {} classified, {} skipped (source: {}) ===\n",
        stats.total(),
        stats.skipped,
        source
    );

    if stats.total() == 0 {
        println!("  No labelled items.\n");
        return;
    }

    // First record per label; all items with a label share it.
    let mut records: HashMap<&str, &ClassificationRecord> = HashMap::new();
    for item in &stats.waste_items {
        records
            .entry(item.formatted_label.as_str())
            .or_insert(&item.classification);
    }

    let shares = stats.label_shares();
    let max_label = shares.iter().map(|s| s.name.len()).max().unwrap_or(5).max(5);

    println!(
        "  {:<width$}  {:>5}  {:>6}  {:<18}  {:<11}  {:<11}  {:<9}  Material",
        "Label",
        "Count",
        "Share",
        "Type",
        "Recyclable",
        "Reusable",
        "Hazardous",
        width = max_label
    );
    let rule_width = max_label + 2 + 5 + 2 + 6 + 2 + 18 + 2 + 11 + 2 + 11 + 2 + 9 + 2 + 8;
    println!("  {}", "-".repeat(rule_width));

    for share in &shares {
        let Some(record) = records.get(share.name.as_str()) else {
            continue;
        };
        println!(
            "  {:<width$}  {:>5}  {:>5}%  {:<18}  {:<11}  {:<11}  {:<9}  {}",
            share.name,
            share.count,
            share.percent.to_string(),
            record.kind.to_string(),
            record.recyclable.to_string(),
            record.reusable.to_string(),
            record.hazardous.to_string(),
            record.material,
            width = max_label
        );
    }
    println!();

    println!("  Biodegradability:");
    for share in stats.type_shares() {
        println!("    {:<18}  {:>5}  {:>5}%", share.name, share.count, share.percent.to_string());
    }
    println!();

    println!("  Disposal:");
    for share in &shares {
        if let Some(record) = records.get(share.name.as_str()) {
            println!("    {:<width$}  {}", share.name, record.disposal, width = max_label);
        }
    }
    println!();

    if verbose {
        for entry in &report.trace.entries {
            println!("  {} ({} items):", entry.label, entry.occurrences);
            for step in &entry.steps {
                println!("    {:<11} {}", step.field, step.message);
            }
        }
        println!();
    }

    let important: Vec<_> = report
        .trace
        .warnings
        .iter()
        .filter(|w| verbose || w.severity == TraceSeverity::Important)
        .collect();
    if !important.is_empty() {
        println!("  Warnings:");
        for w in important {
            match w.item_index {
                Some(idx) => println!("    - item {}: {}", idx, w.message),
                None => println!("    - {}", w.message),
            }
        }
        println!();
    }
}
