//! CLI configuration handling.
//!
//! ```toml
//! [defaults]
//! dialect = "sqlserver"
//!
//! [connections]
//! main = "Server=db01;Database=app;User ID=svc;Password=secret"
//!
//! [dialects.pg]
//! keywords = ["host", "port", "user", "password", "dbname"]
//! aliases = { server = "host", database = "dbname" }
//!
//! [redact]
//! keywords = ["password", "pwd", "user id"]
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use connstr_parse::{Dialect, DialectSpec};

use crate::error::{CliError, CliResult};

/// Default config file name (looked up in the working directory)
pub const CONFIG_FILE_NAME: &str = "connstr.toml";

/// connstr CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for commands
    pub defaults: DefaultsConfig,

    /// Named connection strings
    pub connections: IndexMap<String, String>,

    /// Custom dialects by name
    pub dialects: IndexMap<String, DialectSpec>,

    /// Redaction settings
    pub redact: RedactConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` when given, otherwise `connstr.toml` from the working
    /// directory if it exists, otherwise the defaults.
    pub fn discover(path: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = std::env::current_dir()?.join(CONFIG_FILE_NAME);
        if default_path.is_file() {
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve a dialect by name, falling back to `defaults.dialect`.
    ///
    /// Configured dialects take precedence over built-in ones.
    pub fn dialect(&self, name: Option<&str>) -> CliResult<Dialect> {
        let name = name.unwrap_or(&self.defaults.dialect);
        if let Some(spec) = self.dialects.get(name) {
            return Ok(spec.clone().into_dialect(name)?);
        }
        Ok(Dialect::by_name(name)?.clone())
    }

    /// Look up a named connection string.
    pub fn connection(&self, name: &str) -> CliResult<&str> {
        self.connections
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| CliError::Config(format!("No connection named `{}`", name)))
    }
}

/// Defaults configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Dialect used when `--dialect` is not given
    pub dialect: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            dialect: "generic".to_string(),
        }
    }
}

/// Redaction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactConfig {
    /// Keywords whose pairs are removed or masked
    pub keywords: Vec<String>,
}

impl Default for RedactConfig {
    fn default() -> Self {
        Self {
            keywords: connstr_parse::options::DEFAULT_REDACTED
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl RedactConfig {
    /// Check if `keyword` should be hidden.
    pub fn hides(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.dialect, "generic");
        assert!(config.connections.is_empty());
        assert!(config.redact.hides("password"));
        assert!(config.redact.hides("PWD"));
        assert!(!config.redact.hides("user id"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [defaults]
            dialect = "sqlserver"

            [connections]
            main = "Server=db;Password=x"

            [dialects.pg]
            keywords = ["host", "port"]
            aliases = { server = "host" }

            [redact]
            keywords = ["secret"]
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.defaults.dialect, "sqlserver");
        assert_eq!(config.connection("main").unwrap(), "Server=db;Password=x");
        assert!(config.connection("other").is_err());
        assert!(config.redact.hides("secret"));
        assert!(!config.redact.hides("password"));

        let pg = config.dialect(Some("pg")).unwrap();
        assert_eq!(pg.name(), "pg");
        assert!(pg.parse("Server=x;port=1").is_ok());

        let default = config.dialect(None).unwrap();
        assert_eq!(default.name(), "sqlserver");
    }

    #[test]
    fn test_unknown_dialect() {
        let err = Config::default().dialect(Some("nope")).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/connstr.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
