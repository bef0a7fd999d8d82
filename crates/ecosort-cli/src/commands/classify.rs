use ecosort_core::config::GeminiConfig;
use ecosort_core::error::EcosortError;
use ecosort_core::parsing::load_items;
use ecosort_core::source::{GeminiClient, GeminiSource};
use ecosort_core::Pipeline;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    rule_files: Vec<PathBuf>,
    offline: bool,
    output_format: &str,
    verbose: bool,
) -> Result<(), EcosortError> {
    let items = load_items(&input_file)?;
    let rulebook = super::load_rulebook(&rule_files)?;

    let mut pipeline = Pipeline::new(rulebook);
    if offline {
        tracing::debug!("offline mode, external classification disabled");
    } else {
        let config = GeminiConfig::from_env();
        config.log_summary();
        if config.is_configured() {
            let client = GeminiClient::new(&config)?;
            pipeline = pipeline.with_source(GeminiSource::new(client));
        } else {
            tracing::warn!("GEMINI_API_KEY is not set, classifying with local rules only");
        }
    }

    let report = super::runtime()?.block_on(pipeline.run(&items));

    match output_format {
        "json" => output::json::print(&report)?,
        _ => output::table::print(&report, verbose),
    }

    Ok(())
}
