//! Project configuration for the validation harness

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::report::MatchStrategy;

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the user-management service under test
    pub base_url: String,

    /// Login credentials used to obtain the bearer token
    pub credentials: Credentials,

    /// Extra HTTP headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Directory for persisted reports
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Message comparison strategy ("substring" or "exact")
    #[serde(default)]
    pub match_strategy: MatchStrategy,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Credentials of an existing admin user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

fn default_report_dir() -> PathBuf {
    PathBuf::from(".usercheck/reports")
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            credentials: Credentials {
                email: "prashant@yopmail.com".to_string(),
                password: "Prashant".to_string(),
            },
            headers: HashMap::new(),
            report_dir: default_report_dir(),
            match_strategy: MatchStrategy::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }

    /// Load from default location (.usercheck.toml)
    ///
    /// # Errors
    ///
    /// Returns error if an existing config file cannot be read or parsed
    pub fn load_default() -> Result<Self, ConfigError> {
        let candidates = [".usercheck.toml", ".usercheck.json", "usercheck.toml"];

        for name in candidates {
            let path = Path::new(name);
            if path.exists() {
                return Self::load(path);
            }
        }

        // No config file, return default
        Ok(Self::default())
    }

    /// Create example config file
    #[must_use]
    pub fn example() -> &'static str {
        r#"# usercheck configuration

# User-management service to test
base_url = "http://localhost:8080"

# Admin credentials used for POST /users/login
[credentials]
email = "prashant@yopmail.com"
password = "Prashant"

# Extra HTTP headers sent with every request
# [headers]
# X-API-Key = "your-api-key"

# Directory for persisted reports (default: ".usercheck/reports")
# report_dir = ".usercheck/reports"

# Message comparison: "substring" (default, tolerant) or "exact"
# match_strategy = "substring"

# Per-request timeout in seconds (default: 10)
# timeout_secs = 10
"#
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {0}: {1}")]
    Io(PathBuf, String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.report_dir, PathBuf::from(".usercheck/reports"));
        assert_eq!(config.match_strategy, MatchStrategy::Substring);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn parse_toml() {
        let toml = r#"
base_url = "http://localhost:3000"

[credentials]
email = "admin@example.com"
password = "secret"

[headers]
X-API-Key = "key123"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.credentials.email, "admin@example.com");
        assert_eq!(config.headers.get("X-API-Key"), Some(&"key123".to_string()));
        assert_eq!(config.match_strategy, MatchStrategy::Substring);
    }

    #[test]
    fn parse_toml_exact_strategy() {
        let toml = r#"
base_url = "http://localhost:3000"
match_strategy = "exact"

[credentials]
email = "admin@example.com"
password = "secret"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.match_strategy, MatchStrategy::Exact);
    }

    #[test]
    fn example_config_parses() {
        let config: Config = toml::from_str(Config::example()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.credentials.email, "prashant@yopmail.com");
    }
}
