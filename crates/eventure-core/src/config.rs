//! Engine configuration.
//!
//! Defaults point at local dev services; a TOML file and a handful of
//! environment variables override them.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Configuration for connecting to the graph store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "eventure_dev".to_string(),
        }
    }
}

/// Configuration for the relational source the synchronizer reads from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub db_path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("eventure.db"),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub graph: GraphConfig,
    pub source: SourceConfig,
}

impl EngineConfig {
    /// Load configuration with the usual precedence: defaults, then the TOML
    /// file named by `EVENTURE_CONFIG` (or `eventure.toml` if present), then
    /// individual environment variables.
    pub fn load() -> EngineResult<Self> {
        let path = std::env::var("EVENTURE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("eventure.toml"));

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|e| {
                EngineError::config(format!("cannot read {}: {e}", path.display()))
            })?;
            Self::parse(&raw)?
        } else {
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Parse a TOML document. Unknown keys are ignored.
    pub fn parse(raw: &str) -> EngineResult<Self> {
        toml::from_str(raw).map_err(|e| EngineError::config(e.to_string()))
    }

    fn apply_env(&mut self) {
        if let Ok(uri) = std::env::var("NEO4J_URI") {
            self.graph.uri = uri;
        }
        if let Ok(user) = std::env::var("NEO4J_USER") {
            self.graph.user = user;
        }
        if let Ok(password) = std::env::var("NEO4J_PASSWORD") {
            self.graph.password = password;
        }
        if let Ok(db) = std::env::var("EVENTURE_DB") {
            self.source.db_path = PathBuf::from(db);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_services() {
        let config = EngineConfig::default();
        assert_eq!(config.graph.uri, "bolt://localhost:7687");
        assert_eq!(config.source.db_path, PathBuf::from("eventure.db"));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let config = EngineConfig::parse(
            r#"
            [graph]
            uri = "bolt://graph.internal:7687"
            "#,
        )
        .unwrap();
        assert_eq!(config.graph.uri, "bolt://graph.internal:7687");
        assert_eq!(config.graph.user, "neo4j");
        assert_eq!(config.source.db_path, PathBuf::from("eventure.db"));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = EngineConfig::parse("graph = ]").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
