//! Controlled vocabulary and the token classifier.

mod class;
mod relation;

pub use class::*;
pub use relation::*;

use serde::{Deserialize, Serialize};

/// A surface word resolved against the controlled vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// A known ontology class.
    Class(OntologyClass),

    /// A known ontology relation.
    Relation(OntologyRelation),

    /// Anything else, kept verbatim as a named individual.
    NamedIndividual(String),
}

impl Term {
    /// Classify surface text.
    ///
    /// Classes win over relations; unknown text always succeeds as a named individual
    /// with its original casing.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if let Some(class) = OntologyClass::from_surface(&lower) {
            return Term::Class(class);
        }
        if let Some(relation) = OntologyRelation::from_surface(&lower) {
            return Term::Relation(relation);
        }
        Term::NamedIndividual(text.to_string())
    }

    /// The canonical rendering of this term.
    pub fn canonical(&self) -> &str {
        match self {
            Term::Class(class) => class.name(),
            Term::Relation(relation) => relation.name(),
            Term::NamedIndividual(name) => name,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}
