pub mod builtin;
pub mod material;
pub mod schema;
pub mod tables;

use crate::error::EcosortError;
use schema::RuleSetDef;
use std::path::Path;

/// One entry of an ordered keyword table.
///
/// A rule matches a lower-cased label when the label contains any of the
/// `any` keywords and none of the `none` keywords. Tables are evaluated
/// top to bottom and the first matching rule wins, so more specific rules
/// must come before generic ones.
#[derive(Debug)]
pub struct Rule<T: 'static> {
    pub any: &'static [&'static str],
    pub none: &'static [&'static str],
    pub then: Outcome<T>,
}

#[derive(Debug)]
pub enum Outcome<T: 'static> {
    /// The rule resolves directly to a value.
    Is(T),
    /// The rule narrows the label down further; `otherwise` applies when no
    /// nested rule matches.
    Refine {
        rules: &'static [Rule<T>],
        otherwise: T,
    },
}

impl<T: 'static> Rule<T> {
    pub const fn when(any: &'static [&'static str], value: T) -> Self {
        Rule {
            any,
            none: &[],
            then: Outcome::Is(value),
        }
    }

    pub const fn when_not(
        any: &'static [&'static str],
        none: &'static [&'static str],
        value: T,
    ) -> Self {
        Rule {
            any,
            none,
            then: Outcome::Is(value),
        }
    }

    pub const fn refine(
        any: &'static [&'static str],
        rules: &'static [Rule<T>],
        otherwise: T,
    ) -> Self {
        Rule {
            any,
            none: &[],
            then: Outcome::Refine { rules, otherwise },
        }
    }

    /// Whether this rule applies to an already lower-cased label.
    pub fn matches(&self, lower: &str) -> bool {
        self.any.iter().any(|k| lower.contains(k)) && !self.none.iter().any(|k| lower.contains(k))
    }
}

/// Evaluate an ordered table against a label. Returns the value of the
/// first matching rule, following refinements.
pub fn first_match<T: Copy + 'static>(rules: &[Rule<T>], label: &str) -> Option<T> {
    let lower = label.to_lowercase();
    match_lower(rules, &lower)
}

fn match_lower<T: Copy + 'static>(rules: &[Rule<T>], lower: &str) -> Option<T> {
    let rule = rules.iter().find(|r| r.matches(lower))?;
    match &rule.then {
        Outcome::Is(value) => Some(*value),
        Outcome::Refine { rules, otherwise } => {
            Some(match_lower(rules, lower).unwrap_or(*otherwise))
        }
    }
}

/// The rules in effect for one classification pass: the built-in tables
/// plus any custom material rulesets, which take precedence.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    custom: Vec<RuleSetDef>,
}

impl RuleBook {
    /// Only the built-in tables.
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn with_ruleset(mut self, ruleset: RuleSetDef) -> Self {
        self.custom.push(ruleset);
        self
    }

    /// Material from the first matching custom rule, if any.
    pub fn custom_material(&self, label: &str) -> Option<String> {
        let lower = label.to_lowercase();
        self.custom
            .iter()
            .flat_map(|rs| rs.rules.iter())
            .find(|rule| rule.matches(&lower))
            .map(|rule| rule.material.clone())
    }

    /// Infer a specific material description for a label. Custom rules are
    /// consulted before the built-in inference tables.
    pub fn infer_material(&self, label: &str) -> String {
        self.custom_material(label)
            .unwrap_or_else(|| material::infer_material(label))
    }
}

/// Load a custom material ruleset from a JSON file.
pub fn load_ruleset(path: &Path) -> Result<RuleSetDef, EcosortError> {
    let content = std::fs::read_to_string(path).map_err(|e| EcosortError::RulesetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_ruleset(&content, path)
}

/// Parse a custom material ruleset from a JSON string.
pub fn parse_ruleset(json: &str, source: &Path) -> Result<RuleSetDef, EcosortError> {
    let ruleset: RuleSetDef =
        serde_json::from_str(json).map_err(|e| EcosortError::RulesetLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Parse a custom material ruleset from a JSON string (no file path context).
pub fn parse_ruleset_str(json: &str) -> Result<RuleSetDef, EcosortError> {
    let ruleset: RuleSetDef = serde_json::from_str(json).map_err(EcosortError::Json)?;
    validate_ruleset(&ruleset)?;
    Ok(ruleset)
}

/// Validate that a custom ruleset is well-formed and can only produce
/// acceptable material descriptions.
pub fn validate_ruleset(ruleset: &RuleSetDef) -> Result<(), EcosortError> {
    if ruleset.name.trim().is_empty() {
        return Err(EcosortError::RulesetInvalid("name must not be empty".into()));
    }

    if ruleset.rules.is_empty() {
        return Err(EcosortError::RulesetInvalid("rules must not be empty".into()));
    }

    for (idx, rule) in ruleset.rules.iter().enumerate() {
        if rule.keywords.is_empty() || rule.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(EcosortError::RulesetInvalid(format!(
                "rule {} has an empty keyword list or a blank keyword",
                idx + 1
            )));
        }

        if rule.exclude.iter().any(|k| k.trim().is_empty()) {
            return Err(EcosortError::RulesetInvalid(format!(
                "rule {} has a blank exclude keyword",
                idx + 1
            )));
        }

        if !material::is_acceptable_material(&rule.material) {
            return Err(EcosortError::RulesetInvalid(format!(
                "rule {} material '{}' is too generic (needs at least {} characters, \
                 no 'unknown', not a bare material family)",
                idx + 1,
                rule.material,
                material::MIN_MATERIAL_LEN
            )));
        }
    }

    Ok(())
}
