use ecosort_core::config::GeminiConfig;
use ecosort_core::error::EcosortError;
use ecosort_core::parsing::load_items;
use ecosort_core::source::GeminiClient;
use std::path::PathBuf;

pub fn run(input_file: PathBuf) -> Result<(), EcosortError> {
    let items = load_items(&input_file)?;

    let config = GeminiConfig::from_env();
    config.log_summary();
    let client = GeminiClient::new(&config)?;

    let report = super::runtime()?.block_on(ecosort_core::analyze(&client, &items))?;
    println!("{report}");
    Ok(())
}
