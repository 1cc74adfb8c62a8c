use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::protocol::error::ConfigError;

/// Longest seed that can be cut from a simple uuid.
pub const MAX_SEED_LENGTH: usize = 32;

/// Defaults applied to every traversal built from this config.
///
/// ```toml
/// graph_variable = "g"
/// anon_variable = "__"
/// param_prefix = "GREMLIN_PARAM"
/// seed_length = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GremlinConfig {
    /// Text of the root step of a new traversal. May be empty.
    #[serde(default = "default_graph_variable")]
    pub graph_variable: String,
    /// Root text for anonymous traversals.
    #[serde(default = "default_anon_variable")]
    pub anon_variable: String,
    /// Prefix of generated parameter names: `<prefix>_<seed>_<counter>`.
    #[serde(default = "default_param_prefix")]
    pub param_prefix: String,
    #[serde(default = "default_seed_length")]
    pub seed_length: usize,
}

fn default_graph_variable() -> String {
    "g".to_string()
}

fn default_anon_variable() -> String {
    "__".to_string()
}

fn default_param_prefix() -> String {
    "GREMLIN_PARAM".to_string()
}

fn default_seed_length() -> usize {
    5
}

impl Default for GremlinConfig {
    fn default() -> Self {
        Self {
            graph_variable: default_graph_variable(),
            anon_variable: default_anon_variable(),
            param_prefix: default_param_prefix(),
            seed_length: default_seed_length(),
        }
    }
}

impl GremlinConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GremlinConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_length == 0 || self.seed_length > MAX_SEED_LENGTH {
            return Err(ConfigError::InvalidSeedLength(self.seed_length));
        }
        Ok(())
    }

    pub fn with_graph_variable(mut self, graph_variable: impl Into<String>) -> Self {
        self.graph_variable = graph_variable.into();
        self
    }

    pub fn with_param_prefix(mut self, param_prefix: impl Into<String>) -> Self {
        self.param_prefix = param_prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GremlinConfig::default();
        assert_eq!(config.graph_variable, "g");
        assert_eq!(config.anon_variable, "__");
        assert_eq!(config.param_prefix, "GREMLIN_PARAM");
        assert_eq!(config.seed_length, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GremlinConfig::from_toml_str("graph_variable = \"graph\"\n").unwrap();
        assert_eq!(config.graph_variable, "graph");
        assert_eq!(config.param_prefix, "GREMLIN_PARAM");
        assert_eq!(config.seed_length, 5);
    }

    #[test]
    fn test_empty_graph_variable_is_allowed() {
        let config = GremlinConfig::from_toml_str("graph_variable = \"\"\n").unwrap();
        assert_eq!(config.graph_variable, "");
    }

    #[test]
    fn test_invalid_seed_length_rejected() {
        let err = GremlinConfig::from_toml_str("seed_length = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeedLength(0)));

        let err = GremlinConfig::from_toml_str("seed_length = 40\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeedLength(40)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = GremlinConfig::from_toml_str("graph_variable = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gremlin.toml");

        let config = GremlinConfig::default()
            .with_graph_variable("graph")
            .with_param_prefix("P");
        config.save(&path).unwrap();

        let loaded = GremlinConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = GremlinConfig::load(Path::new("/nonexistent/gremlin.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/gremlin.toml"));
    }
}
