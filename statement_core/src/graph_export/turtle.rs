//! Turtle writer.
//!
//! ```turtle
//! @prefix bfo: <http://example.org/bfo#> .
//! @prefix ex: <http://example.org/ex#> .
//!
//! ex:Car bfo:has-part ex:wheel ;
//!     rdf:type bfo:Vehicle .
//! ```

use std::collections::BTreeMap;
use std::io::Write;

use super::{Namespaces, Triple, TripleGraph};

/// Turtle format handler.
pub struct Turtle;

impl Turtle {
    /// Write `graph`, grouping triples by subject.
    pub fn write<W: Write>(
        graph: &TripleGraph,
        namespaces: &Namespaces,
        mut writer: W,
    ) -> std::io::Result<()> {
        for (prefix, namespace) in namespaces.prefixes() {
            writeln!(writer, "@prefix {}: <{}> .", prefix, namespace)?;
        }
        writeln!(writer)?;

        let mut by_subject: BTreeMap<&str, Vec<&Triple>> = BTreeMap::new();
        for triple in graph.triples() {
            by_subject.entry(&triple.subject).or_default().push(triple);
        }

        for (subject, triples) in by_subject {
            write!(writer, "{}", format_iri(subject, namespaces))?;
            for (i, triple) in triples.iter().enumerate() {
                let predicate = format_iri(&triple.predicate, namespaces);
                let object = format_iri(&triple.object, namespaces);
                if i == 0 {
                    write!(writer, " {} {}", predicate, object)?;
                } else {
                    write!(writer, " ;\n    {} {}", predicate, object)?;
                }
            }
            writeln!(writer, " .")?;
        }

        Ok(())
    }
}

/// Compact with a prefix when the local part allows it, else `<iri>`.
fn format_iri(iri: &str, namespaces: &Namespaces) -> String {
    match namespaces.compact(iri) {
        Some((prefix, local)) if is_valid_local_name(local) => format!("{}:{}", prefix, local),
        _ => format!("<{}>", iri),
    }
}

fn is_valid_local_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use crate::graph_export::GraphExporter;
    use crate::knowledge_base::KnowledgeBase;
    use ontology_rules::Fact;

    fn render(base: &KnowledgeBase) -> String {
        let exporter = GraphExporter::from_config(&GraphConfig::default());
        let mut buf = Vec::new();
        Turtle::write(&exporter.build(base), exporter.namespaces(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_turtle_groups_by_subject() {
        let mut base = KnowledgeBase::new();
        base.insert(&Fact::is_a("Car", "vehicle"));
        base.insert(&Fact::verb("Car", "has-part", "wheel"));

        let output = render(&base);
        assert!(output.contains("@prefix ex: <http://example.org/ex#> ."));
        assert!(output.contains("ex:Car bfo:has-part ex:wheel ;\n    rdf:type bfo:Vehicle ."));
    }

    #[test]
    fn test_turtle_falls_back_to_full_iri() {
        let mut base = KnowledgeBase::new();
        base.insert(&Fact::is_a("Blue Car", "vehicle"));

        let output = render(&base);
        assert!(output.contains("<http://example.org/ex#Blue%20Car> rdf:type bfo:Vehicle ."));
    }
}
