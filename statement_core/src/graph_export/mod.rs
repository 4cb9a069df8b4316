//! Graph export - projects the whole knowledge base onto RDF triples.
//!
//! The graph is rebuilt from scratch on every export and the destination file
//! is always overwritten in full.
//!
//! | stored relation        | predicate               |
//! |------------------------|-------------------------|
//! | `isa`                  | `rdf:type`              |
//! | `neg-isa`              | `bfo:negIsa`            |
//! | `neg-relation-<verb>`  | `bfo:neg<Verb>`         |
//! | `<verb>`               | `bfo:<verb>`            |
//!
//! Subjects and verb objects live in the individuals namespace; type objects are
//! classes in the ontology namespace, named canonically when the vocabulary knows them.

mod rdfxml;
mod turtle;

pub use rdfxml::RdfXml;
pub use turtle::Turtle;

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use ontology_rules::{Fact, OntologyClass, Polarity, Predicate};
use tracing::debug;

use crate::config::{GraphConfig, GraphFormat};
use crate::error::ExportError;
use crate::knowledge_base::{write_atomically, KnowledgeBase};

pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Predicate local name for negated type membership.
pub const NEG_ISA_PREDICATE: &str = "negIsa";

/// One `(subject, predicate, object)` statement with every term a full IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

/// A set of triples, ordered for stable output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TripleGraph {
    triples: BTreeSet<Triple>,
}

impl TripleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, triple: Triple) {
        self.triples.insert(triple);
    }

    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

/// The two namespaces a graph is written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    pub individuals: String,
    pub ontology: String,
}

impl Namespaces {
    /// Prefix bindings, `(prefix, namespace)`, sorted by prefix.
    pub fn prefixes(&self) -> Vec<(&str, &str)> {
        vec![
            ("bfo", self.ontology.as_str()),
            ("ex", self.individuals.as_str()),
            ("rdf", RDF_NAMESPACE),
        ]
    }

    /// Split an IRI into a bound prefix and its local name.
    ///
    /// The longest matching namespace wins.
    pub fn compact<'a>(&self, iri: &'a str) -> Option<(&str, &'a str)> {
        self.prefixes()
            .into_iter()
            .filter(|(_, namespace)| iri.starts_with(namespace))
            .max_by_key(|(_, namespace)| namespace.len())
            .map(|(prefix, namespace)| (prefix, &iri[namespace.len()..]))
    }
}

/// Builds and writes the exported graph.
#[derive(Debug, Clone)]
pub struct GraphExporter {
    namespaces: Namespaces,
    format: GraphFormat,
}

impl GraphExporter {
    pub fn new(namespaces: Namespaces, format: GraphFormat) -> Self {
        Self { namespaces, format }
    }

    pub fn from_config(config: &GraphConfig) -> Self {
        Self::new(
            Namespaces {
                individuals: config.individual_namespace.clone(),
                ontology: config.ontology_namespace.clone(),
            },
            config.format,
        )
    }

    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    pub fn format(&self) -> GraphFormat {
        self.format
    }

    /// Project every stored fact onto a triple.
    pub fn build(&self, base: &KnowledgeBase) -> TripleGraph {
        let mut graph = TripleGraph::new();
        for fact in base.facts() {
            graph.add(self.triple(&fact));
        }
        graph
    }

    /// The triple a single fact maps to.
    pub fn triple(&self, fact: &Fact) -> Triple {
        let subject = self.individual(&fact.subject);
        match (&fact.predicate, fact.polarity) {
            (Predicate::IsA, Polarity::Positive) => Triple {
                subject,
                predicate: format!("{RDF_NAMESPACE}type"),
                object: self.class(&fact.object),
            },
            (Predicate::IsA, Polarity::Negative) => Triple {
                subject,
                predicate: self.ontology(NEG_ISA_PREDICATE),
                object: self.class(&fact.object),
            },
            (Predicate::Verb(verb), Polarity::Negative) => Triple {
                subject,
                predicate: self.ontology(&format!("neg{}", capitalize(verb))),
                object: self.individual(&fact.object),
            },
            (Predicate::Verb(verb), Polarity::Positive) => Triple {
                subject,
                predicate: self.ontology(verb),
                object: self.individual(&fact.object),
            },
        }
    }

    /// Serialize `graph` in the configured format.
    pub fn write<W: Write>(&self, graph: &TripleGraph, writer: W) -> std::io::Result<()> {
        match self.format {
            GraphFormat::RdfXml => RdfXml::write(graph, &self.namespaces, writer),
            GraphFormat::Turtle => Turtle::write(graph, &self.namespaces, writer),
        }
    }

    /// Serialize `graph` to a string in the configured format.
    pub fn to_string(&self, graph: &TripleGraph) -> Result<String, ExportError> {
        let mut buf = Vec::new();
        self.write(graph, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).to_string())
    }

    /// Rebuild the graph of `base` and overwrite `path` with it.
    pub fn export(&self, base: &KnowledgeBase, path: &Path) -> Result<(), ExportError> {
        let graph = self.build(base);
        let text = self.to_string(&graph)?;
        write_atomically(path, text.as_bytes()).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), triples = graph.len(), "graph exported");
        Ok(())
    }

    fn individual(&self, name: &str) -> String {
        format!("{}{}", self.namespaces.individuals, urlencoding::encode(name))
    }

    fn ontology(&self, local: &str) -> String {
        format!("{}{}", self.namespaces.ontology, urlencoding::encode(local))
    }

    fn class(&self, name: &str) -> String {
        match OntologyClass::from_surface(&name.to_lowercase()) {
            Some(class) => self.ontology(class.name()),
            None => self.ontology(name),
        }
    }
}

/// First character upper-case, the rest lower-case.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Whether `local` can follow a prefix as an XML element name.
pub(crate) fn is_ncname(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
