//! Configuration management for the MedKG CLI.

use anyhow::{Context, Result};
use medkg::prelude::{Aggregation, Neo4jConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "medkg.toml";
pub const DATA_DIR: &str = ".medkg";
pub const GRAPH_FILE: &str = "graph.json";

/// MedKG project configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub intent: IntentConfig,
    #[serde(default)]
    pub llm: LlmSection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphBackend {
    #[default]
    Memory,
    Neo4j,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub backend: GraphBackend,
    /// Snapshot file for the memory backend. Defaults to `.medkg/graph.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_graph_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Lexicon TOML replacing the built-in term lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default)]
    pub aggregation: Aggregation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Ollama,
    Openai,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSection {
    #[serde(default)]
    pub backend: LlmProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u32>,
    /// Falls back to `OPENAI_API_KEY` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

// Default value functions
fn default_uri() -> String { "http://localhost:7474".to_string() }
fn default_user() -> String { "neo4j".to_string() }
fn default_database() -> String { "neo4j".to_string() }
fn default_graph_timeout() -> u64 { 10 }
fn default_threshold() -> f32 { 0.3 }
fn default_temperature() -> f32 { 0.8 }
fn default_max_tokens() -> u32 { 512 }

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            backend: GraphBackend::default(),
            snapshot: None,
            uri: default_uri(),
            user: default_user(),
            password: String::new(),
            database: default_database(),
            timeout_secs: default_graph_timeout(),
        }
    }
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            aggregation: Aggregation::default(),
        }
    }
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            backend: LlmProvider::default(),
            endpoint: None,
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: None,
            api_key: None,
        }
    }
}

impl GraphConfig {
    pub fn neo4j(&self) -> Neo4jConfig {
        Neo4jConfig {
            uri: self.uri.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

impl Config {
    /// Load config from medkg.toml in the current or parent directories,
    /// then apply environment overrides.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let mut config = match find_config_file(&cwd) {
            Some(path) => Self::load_from(&path)?,
            None => Config::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// `NEO4J_URI`, `NEO4J_USER` and `NEO4J_PASSWORD` win over the file.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup("NEO4J_URI") {
            self.graph.uri = uri;
        }
        if let Some(user) = lookup("NEO4J_USER") {
            self.graph.user = user;
        }
        if let Some(password) = lookup("NEO4J_PASSWORD") {
            self.graph.password = password;
        }
    }

    /// Snapshot path for the memory backend.
    pub fn snapshot_path(&self) -> Result<PathBuf> {
        match &self.graph.snapshot {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(GRAPH_FILE)),
        }
    }
}

/// Find medkg.toml in `start` or one of its parents.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Get the MedKG data directory (.medkg/).
pub fn data_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.graph.backend, GraphBackend::Memory);
        assert_eq!(config.intent.threshold, 0.3);
        assert_eq!(config.llm.max_tokens, 512);
    }

    #[test]
    fn sections_parse() {
        let config: Config = toml::from_str(
            r#"
            [graph]
            backend = "neo4j"
            uri = "http://kg:7474"
            password = "secret"

            [intent]
            threshold = 0.45
            aggregation = "mean"

            [llm]
            backend = "openai"
            model = "gpt-4o-mini"
            temperature = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.graph.backend, GraphBackend::Neo4j);
        assert_eq!(config.graph.neo4j().commit_url(), "http://kg:7474/db/neo4j/tx/commit");
        assert_eq!(config.intent.aggregation, Aggregation::Mean);
        assert_eq!(config.llm.backend, LlmProvider::Openai);
        assert_eq!(config.llm.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.llm.max_tokens, 512);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(toml::from_str::<Config>("[graph]\nbackend = \"sqlite\"").is_err());
    }

    #[test]
    fn env_overrides_neo4j_credentials() {
        let env: HashMap<&str, &str> = [("NEO4J_URI", "http://prod:7474"), ("NEO4J_PASSWORD", "pw")]
            .into_iter()
            .collect();
        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.graph.uri, "http://prod:7474");
        assert_eq!(config.graph.user, "neo4j");
        assert_eq!(config.graph.password, "pw");
    }

    #[test]
    fn save_then_load_from_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let mut config = Config::default();
        config.llm.backend = LlmProvider::None;
        config.save(&dir.path().join(CONFIG_FILE)).unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE));
        assert_eq!(Config::load_from(&found).unwrap(), config);
    }
}
