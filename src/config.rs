// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "FACTS_CONFIG_PATH";

fn default_user_agent() -> String {
    concat!("remote-facts/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Runtime configuration for the fetcher and catalog.
#[derive(Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-call deadline applied when the caller passes none. Unset = client default.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Credential name -> value. `"ENV"` means: read the env var of the same name.
    #[serde(default)]
    pub credentials: HashMap<String, String>,
    /// Catalog entry name -> URL template override (mirrors, proxies, local stubs).
    #[serde(default)]
    pub endpoints: HashMap<String, EndpointOverride>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EndpointOverride {
    pub url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_ms: None,
            credentials: HashMap::new(),
            endpoints: HashMap::new(),
        }
    }
}

impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("user_agent", &self.user_agent)
            .field("timeout_ms", &self.timeout_ms)
            .field("credentials", &Credentials::from_config(self))
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl FetchConfig {
    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading facts config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        parse_config(&content, &ext).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load using env var + fallbacks:
    /// 1) $FACTS_CONFIG_PATH
    /// 2) config/facts.toml
    /// 3) config/facts.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        let toml_p = PathBuf::from("config/facts.toml");
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from("config/facts.json");
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default())
    }

    pub fn default_timeout(&self) -> Option<std::time::Duration> {
        self.timeout_ms.map(std::time::Duration::from_millis)
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<FetchConfig> {
    if hint_ext == "json" || s.trim_start().starts_with('{') {
        return serde_json::from_str(s).context("invalid JSON config");
    }
    toml::from_str(s).context("invalid TOML config")
}

/// Credential values resolved from config first, then the environment.
#[derive(Clone, Default)]
pub struct Credentials {
    explicit: HashMap<String, String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            explicit: cfg.credentials.clone(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.explicit.insert(name.into(), value.into());
        self
    }

    /// Placeholders and blanks resolve to `None`.
    pub fn resolve(&self, name: &str) -> Option<String> {
        let from_env = || std::env::var(name).ok();
        let v = match self.explicit.get(name) {
            Some(v) if v.trim().eq_ignore_ascii_case("env") => from_env(),
            Some(v) => Some(v.clone()),
            None => from_env(),
        }?;
        let v = v.trim().to_string();
        if is_placeholder(&v) {
            None
        } else {
            Some(v)
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Names only; values stay out of logs.
        let mut names: Vec<&String> = self.explicit.keys().collect();
        names.sort();
        f.debug_struct("Credentials").field("names", &names).finish()
    }
}

fn is_placeholder(v: &str) -> bool {
    if v.is_empty() {
        return true;
    }
    let norm = v
        .trim_matches(|c| c == '<' || c == '>')
        .to_ascii_lowercase()
        .replace('-', "_");
    matches!(
        norm.as_str(),
        "your_api_key" | "your_api_key_here" | "api_key" | "changeme" | "xxx" | "todo"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn parses_toml_and_json() {
        let toml = r#"
user_agent = "facts-test"
timeout_ms = 2500

[credentials]
NASA_API_KEY = "abc"

[endpoints.cat_fact]
url = "http://127.0.0.1:9/fact"
"#;
        let c = parse_config(toml, "toml").unwrap();
        assert_eq!(c.user_agent, "facts-test");
        assert_eq!(c.timeout_ms, Some(2500));
        assert_eq!(c.credentials["NASA_API_KEY"], "abc");
        assert_eq!(c.endpoints["cat_fact"].url, "http://127.0.0.1:9/fact");

        let json = r#"{"credentials": {"X": "1"}}"#;
        let j = parse_config(json, "").unwrap();
        assert_eq!(j.credentials["X"], "1");
        assert!(j.user_agent.starts_with("remote-facts/"));
        assert_eq!(j.default_timeout(), None);
    }

    #[test]
    fn placeholders_are_missing() {
        let c = Credentials::new()
            .with("A", "YOUR_API_KEY")
            .with("B", "your_api_key_here")
            .with("C", "  ")
            .with("D", "<your-api-key>")
            .with("E", "real-key");
        assert_eq!(c.resolve("A"), None);
        assert_eq!(c.resolve("B"), None);
        assert_eq!(c.resolve("C"), None);
        assert_eq!(c.resolve("D"), None);
        assert_eq!(c.resolve("E").as_deref(), Some("real-key"));
    }

    #[serial_test::serial]
    #[test]
    fn env_marker_reads_environment() {
        env::set_var("FACTS_TEST_CRED_XYZ", "from-env");
        let c = Credentials::new().with("FACTS_TEST_CRED_XYZ", "ENV");
        assert_eq!(c.resolve("FACTS_TEST_CRED_XYZ").as_deref(), Some("from-env"));
        // Unconfigured names fall through to the environment too.
        assert_eq!(
            Credentials::new().resolve("FACTS_TEST_CRED_XYZ").as_deref(),
            Some("from-env")
        );
        env::remove_var("FACTS_TEST_CRED_XYZ");
        assert_eq!(c.resolve("FACTS_TEST_CRED_XYZ"), None);
    }

    #[test]
    fn debug_hides_values() {
        let c = Credentials::new().with("K", "secret-value");
        let dbg = format!("{c:?}");
        assert!(dbg.contains("K"));
        assert!(!dbg.contains("secret-value"));

        let mut cfg = FetchConfig::default();
        cfg.credentials.insert("NASA_API_KEY".into(), "hunter2".into());
        let dbg = format!("{cfg:?}");
        assert!(dbg.contains("NASA_API_KEY"));
        assert!(!dbg.contains("hunter2"));
    }
}
