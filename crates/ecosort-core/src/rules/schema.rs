use serde::{Deserialize, Serialize};

/// A user-supplied set of material rules, tried before the built-in tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Evaluated in order; the first matching rule wins.
    pub rules: Vec<MaterialRuleDef>,
}

/// A single material rule within a custom ruleset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRuleDef {
    /// The rule applies if the label contains any of these (case-insensitive).
    pub keywords: Vec<String>,
    /// ...and none of these.
    #[serde(default)]
    pub exclude: Vec<String>,
    pub material: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl MaterialRuleDef {
    /// Whether this rule applies to an already lower-cased label.
    pub fn matches(&self, lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| lower.contains(&k.to_lowercase()))
            && !self
                .exclude
                .iter()
                .any(|k| lower.contains(&k.to_lowercase()))
    }
}
