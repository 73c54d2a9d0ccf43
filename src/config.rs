use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: None,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    8080
}

impl BackendConfig {
    /// Base URL for every backend route. The scheme is always plain HTTP.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        let host = self.backend.host.trim();
        if host.is_empty() {
            anyhow::bail!("backend.host must not be empty");
        }
        if host.contains("://") || host.contains('/') {
            anyhow::bail!(
                "backend.host must be a bare hostname, got '{}'",
                self.backend.host
            );
        }

        if self.backend.port == 0 {
            anyhow::bail!("backend.port must be > 0");
        }

        if self.backend.timeout_secs == Some(0) {
            anyhow::bail!("backend.timeout_secs must be > 0 when set");
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content)?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.backend.base_url(), "http://localhost:8080");
        assert_eq!(cfg.backend.timeout_secs, None);
        assert_eq!(cfg.logging.filter, "warn");
    }

    #[test]
    fn host_substitution() {
        let cfg = parse_config("[backend]\nhost = \"10.0.0.7\"\n").unwrap();
        assert_eq!(cfg.backend.base_url(), "http://10.0.0.7:8080");
    }

    #[test]
    fn rejects_url_as_host() {
        let err = parse_config("[backend]\nhost = \"https://example.com\"\n").unwrap_err();
        assert!(err.to_string().contains("bare hostname"));
    }

    #[test]
    fn rejects_blank_host_and_zero_values() {
        assert!(parse_config("[backend]\nhost = \"  \"\n").is_err());
        assert!(parse_config("[backend]\nport = 0\n").is_err());
        assert!(parse_config("[backend]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn load_missing_file_errors() {
        let err = load_config(Path::new("/nonexistent/chatbot.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
