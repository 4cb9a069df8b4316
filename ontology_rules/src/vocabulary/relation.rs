//! Ontology relation definitions.

use serde::{Deserialize, Serialize};

/// Relations known to the ontology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OntologyRelation {
    PartOf,
    HasPart,
    Causes,
}

impl OntologyRelation {
    pub const ALL: [OntologyRelation; 3] = [
        OntologyRelation::PartOf,
        OntologyRelation::HasPart,
        OntologyRelation::Causes,
    ];

    /// Look up a relation by its lower-case surface form (e.g. `has-part`).
    pub fn from_surface(surface: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|relation| relation.surface() == surface)
    }

    pub fn surface(&self) -> &'static str {
        match self {
            OntologyRelation::PartOf => "part-of",
            OntologyRelation::HasPart => "has-part",
            OntologyRelation::Causes => "causes",
        }
    }

    /// Canonical camel-case relation name.
    pub fn name(&self) -> &'static str {
        match self {
            OntologyRelation::PartOf => "partOf",
            OntologyRelation::HasPart => "hasPart",
            OntologyRelation::Causes => "causes",
        }
    }

    /// Canonical name for a verb lemma, or the lemma itself when it is not in the vocabulary.
    pub fn canonical_verb(lemma: &str) -> &str {
        match Self::from_surface(lemma) {
            Some(relation) => relation.name(),
            None => lemma,
        }
    }
}

impl std::fmt::Display for OntologyRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
