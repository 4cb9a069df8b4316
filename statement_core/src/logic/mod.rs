//! Logic rendering - descriptors to first-order-logic strings, plus the session log.

use ontology_rules::{OntologyRelation, Predicate, Term};

use crate::extraction::Descriptor;

/// Opening of an inline error fragment.
pub const ERROR_MARKER: &str = "[ERROR:";

/// Render descriptors as one logic expression, fragments joined with ` & `.
pub fn render(descriptors: &[Descriptor]) -> String {
    descriptors
        .iter()
        .map(render_descriptor)
        .collect::<Vec<_>>()
        .join(" & ")
}

/// Render a single descriptor.
pub fn render_descriptor(descriptor: &Descriptor) -> String {
    match descriptor {
        Descriptor::IsA { subject, object } => type_membership(subject, object),
        Descriptor::Relation {
            verb,
            subject,
            object,
        } => verb_relation(verb, subject, object),
        Descriptor::Negation {
            predicate: Predicate::IsA,
            subject,
            object,
        } => format!("~{}", type_membership(subject, object)),
        Descriptor::Negation {
            predicate: Predicate::Verb(verb),
            subject,
            object,
        } => format!("~{}", verb_relation(verb, subject, object)),
        Descriptor::Error(err) => format!("{ERROR_MARKER} {err}]"),
    }
}

fn type_membership(subject: &str, object: &str) -> String {
    format!(
        "∃x ({}(x) & x={})",
        Term::classify(object),
        Term::classify(subject)
    )
}

fn verb_relation(verb: &str, subject: &str, object: &str) -> String {
    format!(
        "{}({},{})",
        OntologyRelation::canonical_verb(verb),
        Term::classify(subject),
        Term::classify(object)
    )
}

/// Ordered record of every error-free expression rendered in a session.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    entries: Vec<String>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `expression` unless it carries an error marker.
    ///
    /// Returns whether it was recorded.
    pub fn record(&mut self, expression: &str) -> bool {
        if expression.contains(ERROR_MARKER) {
            return false;
        }
        self.entries.push(expression.to_string());
        true
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
