use std::env;

use serde::{Deserialize, Serialize};

use crate::error::PdfqaError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PDFQA_PROFILE`. When set (e.g. `PROD`), every key
    /// is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PDFQA_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Reject values that would only fail later at the network boundary.
    pub fn validate(&self) -> Result<(), PdfqaError> {
        if !(self.llm.base_url.starts_with("http://") || self.llm.base_url.starts_with("https://")) {
            return Err(PdfqaError::InvalidConfig {
                key: "LLM_BASE_URL",
                value: self.llm.base_url.clone(),
                reason: "must be an http(s) URL",
            });
        }
        if self.llm.timeout_secs == 0 {
            return Err(PdfqaError::InvalidConfig {
                key: "LLM_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:  {}:{}, cors_origin={}", self.server.host, self.server.port, self.server.cors_origin);
        tracing::info!(
            "  llm:     base_url={}, model={}, timeout={}s, api_key={}",
            self.llm.base_url,
            self.llm.model,
            self.llm.timeout_secs,
            if self.llm.is_configured() { "set" } else { "(unset)" }
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 5002),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
        }
    }
}

// ── LLM (GitHub Models / OpenAI-compatible) ───────────────────

pub const DEFAULT_LLM_BASE_URL: &str = "https://models.inference.ai.azure.com";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Bearer token for the completion endpoint. Never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            api_key: profiled_env_opt(p, "GITHUB_TOKEN"),
            base_url: profiled_env_or(p, "LLM_BASE_URL", DEFAULT_LLM_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: profiled_env_or(p, "LLM_MODEL", DEFAULT_LLM_MODEL),
            timeout_secs: profiled_env_u64(p, "LLM_TIMEOUT_SECS", 60),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own profile prefix so parallel tests never share keys.

    #[test]
    fn profiled_keys_override_defaults() {
        env::set_var("CFGTESTA_PORT", "8080");
        env::set_var("CFGTESTA_LLM_MODEL", "gpt-4o-mini");
        env::set_var("CFGTESTA_LLM_BASE_URL", "http://localhost:9999/");

        let config = Config::for_profile("cfgtesta");
        assert_eq!(config.profile, "CFGTESTA");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.base_url, "http://localhost:9999");
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        env::set_var("CFGTESTB_LLM_TIMEOUT_SECS", "soon");
        let config = Config::for_profile("CFGTESTB");
        assert_eq!(config.llm.timeout_secs, 60);
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::for_profile("CFGTESTC");
        config.llm.base_url = "models.example.com".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LLM_BASE_URL"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::for_profile("CFGTESTD");
        config.llm.base_url = DEFAULT_LLM_BASE_URL.into();
        config.llm.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn api_key_is_not_serialized() {
        let llm = LlmConfig {
            api_key: Some("secret-token".into()),
            ..LlmConfig::default()
        };
        let json = serde_json::to_string(&llm).unwrap();
        assert!(!json.contains("secret-token"));
        assert!(llm.is_configured());
    }

    #[test]
    fn profile_label_defaults() {
        let config = Config::for_profile("");
        assert_eq!(config.profile_label(), "default");
    }
}
