//! Configuration: storage paths per mode, graph namespaces and oracle commands.
//!
//! Every field has a default, so an empty TOML document is a valid configuration.
//!
//! ```toml
//! auto_clarify = false
//!
//! [storage]
//! guided_knowledge = "knowledge.json"
//! guided_graph = "ontology.owl"
//! auto_knowledge = "auto_knowledge.json"
//! auto_graph = "auto_ontology.owl"
//!
//! [graph]
//! individual_namespace = "http://example.org/ex#"
//! ontology_namespace = "http://example.org/bfo#"
//! format = "rdfxml"
//!
//! [oracles]
//! dependency_command = ["python3", "parse_tokens.py"]
//! clarification_command = ["ollama", "run", "llama3"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which pair of (knowledge file, graph file) is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// Answers to clarification questions come from the user.
    #[default]
    Guided,
    /// The clarification oracle answers its own questions.
    Auto,
}

impl std::fmt::Display for StoreMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreMode::Guided => write!(f, "guided"),
            StoreMode::Auto => write!(f, "auto"),
        }
    }
}

/// Graph serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    #[default]
    RdfXml,
    Turtle,
}

/// A knowledge file and the graph file exported from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub knowledge: PathBuf,
    pub graph: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub guided_knowledge: PathBuf,
    pub guided_graph: PathBuf,
    pub auto_knowledge: PathBuf,
    pub auto_graph: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            guided_knowledge: PathBuf::from("knowledge.json"),
            guided_graph: PathBuf::from("ontology.owl"),
            auto_knowledge: PathBuf::from("auto_knowledge.json"),
            auto_graph: PathBuf::from("auto_ontology.owl"),
        }
    }
}

impl StorageConfig {
    /// Every mode's files placed under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        let defaults = Self::default();
        Self {
            guided_knowledge: dir.join(defaults.guided_knowledge),
            guided_graph: dir.join(defaults.guided_graph),
            auto_knowledge: dir.join(defaults.auto_knowledge),
            auto_graph: dir.join(defaults.auto_graph),
        }
    }

    pub fn paths(&self, mode: StoreMode) -> StoragePaths {
        match mode {
            StoreMode::Guided => StoragePaths {
                knowledge: self.guided_knowledge.clone(),
                graph: self.guided_graph.clone(),
            },
            StoreMode::Auto => StoragePaths {
                knowledge: self.auto_knowledge.clone(),
                graph: self.auto_graph.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Namespace for individuals (subjects and plain objects).
    pub individual_namespace: String,
    /// Namespace for classes and relation predicates.
    pub ontology_namespace: String,
    pub format: GraphFormat,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            individual_namespace: "http://example.org/ex#".to_string(),
            ontology_namespace: "http://example.org/bfo#".to_string(),
            format: GraphFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Program and arguments of the dependency parser; statement on stdin, JSON tokens on stdout.
    pub dependency_command: Vec<String>,
    /// Program and arguments of the clarification oracle; prompt on stdin, answer on stdout.
    pub clarification_command: Vec<String>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            dependency_command: vec!["logos-parse".to_string()],
            clarification_command: vec![
                "ollama".to_string(),
                "run".to_string(),
                "llama3".to_string(),
            ],
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub graph: GraphConfig,
    pub oracles: OracleConfig,
    /// Offer every newly extracted subject to the clarification oracle.
    pub auto_clarify: bool,
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.guided_knowledge, PathBuf::from("knowledge.json"));
        assert_eq!(config.graph.format, GraphFormat::RdfXml);
        assert!(!config.auto_clarify);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml_str(
            r#"
            auto_clarify = true

            [graph]
            format = "turtle"

            [oracles]
            clarification_command = ["ollama", "run", "mistral"]
            "#,
        )
        .unwrap();

        assert!(config.auto_clarify);
        assert_eq!(config.graph.format, GraphFormat::Turtle);
        assert_eq!(config.graph.ontology_namespace, "http://example.org/bfo#");
        assert_eq!(config.oracles.clarification_command[2], "mistral");
        assert_eq!(config.storage.auto_graph, PathBuf::from("auto_ontology.owl"));
    }

    #[test]
    fn test_paths_per_mode() {
        let storage = StorageConfig::in_dir(Path::new("/tmp/kb"));
        let auto = storage.paths(StoreMode::Auto);
        assert_eq!(auto.knowledge, PathBuf::from("/tmp/kb/auto_knowledge.json"));
        assert_eq!(auto.graph, PathBuf::from("/tmp/kb/auto_ontology.owl"));
        assert_eq!(
            storage.paths(StoreMode::Guided).graph,
            PathBuf::from("/tmp/kb/ontology.owl")
        );
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml_str("[graph\nformat = 1").is_err());
    }
}
