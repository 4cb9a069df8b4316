//! Knowledge Store - the knowledge base bound to its files.
//!
//! Every mutation synchronously rewrites the knowledge file and the graph file
//! before returning.

use std::fs;
use std::io;
use std::path::Path;

use ontology_rules::Fact;
use tracing::{debug, info, warn};

use super::{EntityReport, KnowledgeBase};
use crate::config::StoragePaths;
use crate::error::StoreError;
use crate::graph_export::GraphExporter;

/// A knowledge base with persistence and graph export.
#[derive(Debug)]
pub struct KnowledgeStore {
    base: KnowledgeBase,
    paths: StoragePaths,
    exporter: GraphExporter,
}

impl KnowledgeStore {
    /// Load the knowledge file (empty when missing) and export its graph.
    pub fn open(paths: StoragePaths, exporter: GraphExporter) -> Result<Self, StoreError> {
        let mut base = Self::load(&paths.knowledge)?;
        let pruned = base.prune_empty();
        if pruned > 0 {
            warn!(path = %paths.knowledge.display(), pruned, "dropped empty entries from knowledge file");
        }
        info!(
            path = %paths.knowledge.display(),
            facts = base.fact_count(),
            "knowledge base loaded"
        );

        let store = Self {
            base,
            paths,
            exporter,
        };
        store.export()?;
        Ok(store)
    }

    /// Read a knowledge file. A missing file is an empty knowledge base.
    pub fn load(path: &Path) -> Result<KnowledgeBase, StoreError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no knowledge file, starting empty");
                return Ok(KnowledgeBase::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the full snapshot to the knowledge file.
    pub fn persist(&self) -> Result<(), StoreError> {
        let path = &self.paths.knowledge;
        let json = serde_json::to_string_pretty(&self.base).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        write_atomically(path, json.as_bytes()).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), facts = self.base.fact_count(), "knowledge file written");
        Ok(())
    }

    /// Regenerate the graph file from the whole knowledge base.
    pub fn export(&self) -> Result<(), StoreError> {
        self.exporter.export(&self.base, &self.paths.graph)?;
        Ok(())
    }

    /// Insert a fact, then persist and re-export.
    ///
    /// The in-memory insert is kept even when writing fails.
    pub fn store_fact(&mut self, fact: &Fact) -> Result<(), StoreError> {
        if self.base.insert(fact) {
            info!(%fact, "fact stored");
        } else {
            debug!(%fact, "fact already known");
        }
        self.persist()?;
        self.export()
    }

    /// Everything known about `entity`, in both directions.
    pub fn query_entity(&self, entity: &str) -> EntityReport {
        self.base.query(entity)
    }

    pub fn base(&self) -> &KnowledgeBase {
        &self.base
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }
}

/// Write `contents` to a temporary sibling, then rename it over `path`.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use ontology_rules::Relation;
    use tempfile::TempDir;

    fn paths(dir: &TempDir) -> StoragePaths {
        StoragePaths {
            knowledge: dir.path().join("knowledge.json"),
            graph: dir.path().join("ontology.owl"),
        }
    }

    fn open(dir: &TempDir) -> KnowledgeStore {
        KnowledgeStore::open(paths(dir), GraphExporter::from_config(&GraphConfig::default())).unwrap()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir);
        assert!(store.base().is_empty());
        assert!(dir.path().join("ontology.owl").exists());
    }

    #[test]
    fn test_store_fact_persists_and_exports() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        store.store_fact(&Fact::is_a(" Car ", "vehicle")).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("knowledge.json")).unwrap())
                .unwrap();
        assert_eq!(json, serde_json::json!({"Car": {"isa": ["vehicle"]}}));

        let graph = fs::read_to_string(dir.path().join("ontology.owl")).unwrap();
        assert!(graph.contains("http://example.org/bfo#Vehicle"));
        assert!(!dir.path().join("knowledge.json.tmp").exists());
    }

    #[test]
    fn test_persisted_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);
        store.store_fact(&Fact::is_a("Car", "vehicle")).unwrap();

        let text = fs::read_to_string(dir.path().join("knowledge.json")).unwrap();
        assert!(text.contains("\n  \"Car\": {\n    \"isa\": ["));
    }

    #[test]
    fn test_reload_restores_facts() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = open(&dir);
            store.store_fact(&Fact::verb("Car", "has-part", "wheel")).unwrap();
            store.store_fact(&Fact::is_a("Car", "dog").negated()).unwrap();
        }

        let store = open(&dir);
        assert_eq!(store.base().fact_count(), 2);
        assert!(store.base().objects("Car", &Relation::not_is_a()).is_some());
        assert_eq!(store.query_entity("wheel").incoming.len(), 1);
    }

    #[test]
    fn test_reserved_verb_survives_reopen_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let facts = [
            Fact::verb("Car", "isa", "vehicle"),
            Fact::verb("Rex", "", "cats").negated(),
            Fact::verb("Rex", "neg-relation-chase", "cats"),
        ];

        let (before, graph_before) = {
            let mut store = open(&dir);
            for fact in &facts {
                store.store_fact(fact).unwrap();
            }
            let graph = fs::read_to_string(dir.path().join("ontology.owl")).unwrap();
            (store.base().facts().collect::<Vec<_>>(), graph)
        };

        let store = open(&dir);
        assert_eq!(store.base().facts().collect::<Vec<_>>(), before);
        let graph_after = fs::read_to_string(dir.path().join("ontology.owl")).unwrap();
        assert_eq!(graph_after, graph_before);
        assert!(graph_after.contains("<rdf:type rdf:resource=\"http://example.org/bfo#Vehicle\"/>"));
    }

    #[test]
    fn test_open_prunes_empty_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("knowledge.json"),
            r#"{"Car": {"isa": ["vehicle", "vehicle"], "causes": []}, "Ghost": {}}"#,
        )
        .unwrap();

        let store = open(&dir);
        assert_eq!(store.base().subjects().collect::<Vec<_>>(), vec!["Car"]);
        assert_eq!(store.base().fact_count(), 1);
    }

    #[test]
    fn test_open_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("knowledge.json"), "not json").unwrap();

        let result = KnowledgeStore::open(
            paths(&dir),
            GraphExporter::from_config(&GraphConfig::default()),
        );
        assert!(matches!(result, Err(StoreError::Json { .. })));
    }

    #[test]
    fn test_write_failure_keeps_memory_insert() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open(&dir);

        // A directory where the knowledge file should be makes the rename fail.
        fs::remove_file(dir.path().join("knowledge.json")).ok();
        fs::create_dir(dir.path().join("knowledge.json")).unwrap();
        fs::write(dir.path().join("knowledge.json").join("blocker"), "x").unwrap();

        let result = store.store_fact(&Fact::is_a("Car", "vehicle"));
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(store.base().contains(&Fact::is_a("Car", "vehicle")));
    }

    #[test]
    fn test_write_atomically_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/file.json");
        write_atomically(&path, b"{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
