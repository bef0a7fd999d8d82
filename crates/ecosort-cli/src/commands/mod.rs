pub mod analyze;
pub mod classify;
pub mod inspect;
pub mod rules;

use ecosort_core::error::EcosortError;
use ecosort_core::rules::RuleBook;
use std::path::PathBuf;

/// Built-in rules plus the given custom rule files, in order.
pub fn load_rulebook(rule_files: &[PathBuf]) -> Result<RuleBook, EcosortError> {
    let mut book = RuleBook::builtin();
    for path in rule_files {
        let rs = ecosort_core::rules::load_ruleset(path)?;
        tracing::debug!(
            path = %path.display(),
            name = %rs.name,
            rules = rs.rules.len(),
            "loaded ruleset"
        );
        book = book.with_ruleset(rs);
    }
    Ok(book)
}

/// Single-threaded runtime for the async pipeline.
pub fn runtime() -> Result<tokio::runtime::Runtime, EcosortError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
