use std::fmt;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the Gemini classification service.
#[derive(Clone, PartialEq)]
pub struct GeminiConfig {
    /// Absent means the pipeline runs on local rules only.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as
    /// unset; unparsable numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_key: get("GEMINI_API_KEY"),
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature: parse_or(get("LLM_TEMPERATURE"), "LLM_TEMPERATURE", DEFAULT_TEMPERATURE),
            max_tokens: parse_or(get("LLM_MAX_TOKENS"), "LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS),
            timeout_secs: parse_or(
                get("LLM_TIMEOUT_SECS"),
                "LLM_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            ),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Log a redacted summary.
    pub fn log_summary(&self) {
        tracing::info!(
            model = %self.model,
            base_url = %self.base_url,
            temperature = self.temperature,
            max_tokens = self.max_tokens,
            timeout_secs = self.timeout_secs,
            configured = self.is_configured(),
            "gemini config loaded"
        );
    }

    /// A redacted view safe to print (no secrets).
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "base_url": self.base_url,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "timeout_secs": self.timeout_secs,
            "configured": self.is_configured(),
        })
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparsable setting");
            default
        }),
    }
}
