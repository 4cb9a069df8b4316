//! Query results for a single entity.

use ontology_rules::Fact;
use serde::{Deserialize, Serialize};

/// Everything the knowledge base knows about one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReport {
    pub entity: String,

    /// Facts with the entity as subject.
    pub outgoing: Vec<Fact>,

    /// Facts with the entity as object.
    pub incoming: Vec<Fact>,
}

impl EntityReport {
    /// True when the entity appears nowhere.
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }
}

impl std::fmt::Display for EntityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "No information about {}.", self.entity);
        }

        let mut lines = Vec::new();
        if !self.outgoing.is_empty() {
            lines.push("Outgoing relations:".to_string());
            lines.extend(self.outgoing.iter().map(edge_line));
        }
        if !self.incoming.is_empty() {
            lines.push("Incoming relations:".to_string());
            lines.extend(self.incoming.iter().map(edge_line));
        }
        write!(f, "{}", lines.join("\n"))
    }
}

fn edge_line(fact: &Fact) -> String {
    format!("  {} -[{}]-> {}", fact.subject, fact.relation(), fact.object)
}
