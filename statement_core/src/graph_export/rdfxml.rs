//! RDF/XML writer.
//!
//! One `rdf:Description` per subject; every predicate becomes a property element
//! pointing at its object through `rdf:resource`.

use std::collections::BTreeMap;
use std::io::Write;

use tracing::warn;

use super::{is_ncname, Namespaces, Triple, TripleGraph};

/// RDF/XML format handler.
pub struct RdfXml;

impl RdfXml {
    /// Write `graph` as an RDF/XML document.
    ///
    /// Predicates that cannot be written as a prefixed element name are skipped.
    pub fn write<W: Write>(
        graph: &TripleGraph,
        namespaces: &Namespaces,
        mut writer: W,
    ) -> std::io::Result<()> {
        writeln!(writer, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
        writeln!(writer, "<rdf:RDF")?;
        for (prefix, namespace) in namespaces.prefixes() {
            writeln!(writer, r#"   xmlns:{}="{}""#, prefix, escape(namespace))?;
        }
        writeln!(writer, ">")?;

        let mut by_subject: BTreeMap<&str, Vec<&Triple>> = BTreeMap::new();
        for triple in graph.triples() {
            by_subject.entry(&triple.subject).or_default().push(triple);
        }

        for (subject, triples) in by_subject {
            writeln!(writer, r#"  <rdf:Description rdf:about="{}">"#, escape(subject))?;
            for triple in triples {
                let Some(element) = property_element(&triple.predicate, namespaces) else {
                    warn!(predicate = %triple.predicate, "predicate is not a valid XML name, skipped");
                    continue;
                };
                writeln!(
                    writer,
                    r#"    <{} rdf:resource="{}"/>"#,
                    element,
                    escape(&triple.object)
                )?;
            }
            writeln!(writer, "  </rdf:Description>")?;
        }

        writeln!(writer, "</rdf:RDF>")?;
        Ok(())
    }
}

fn property_element(predicate: &str, namespaces: &Namespaces) -> Option<String> {
    let (prefix, local) = namespaces.compact(predicate)?;
    is_ncname(local).then(|| format!("{}:{}", prefix, local))
}

/// Escape text for use inside a double-quoted attribute.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
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
        RdfXml::write(&exporter.build(base), exporter.namespaces(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a&b<"c">"#), "a&amp;b&lt;&quot;c&quot;&gt;");
    }

    #[test]
    fn test_document_structure() {
        let mut base = KnowledgeBase::new();
        base.insert(&Fact::is_a("Car", "vehicle"));
        base.insert(&Fact::verb("Car", "has-part", "wheel").negated());

        let output = render(&base);
        assert!(output.starts_with("<?xml"));
        assert!(output.contains(r#"xmlns:bfo="http://example.org/bfo#""#));
        assert!(output.contains(r#"<rdf:Description rdf:about="http://example.org/ex#Car">"#));
        assert!(output.contains(r#"<rdf:type rdf:resource="http://example.org/bfo#Vehicle"/>"#));
        assert!(output.contains(r#"<bfo:negHas-part rdf:resource="http://example.org/ex#wheel"/>"#));
        assert!(output.trim_end().ends_with("</rdf:RDF>"));
    }

    #[test]
    fn test_invalid_predicate_is_skipped() {
        let mut base = KnowledgeBase::new();
        base.insert(&Fact::verb("Car", "drives on", "road"));
        base.insert(&Fact::is_a("Car", "vehicle"));

        let output = render(&base);
        assert!(!output.contains("road"));
        assert!(output.contains("rdf:type"));
    }

    #[test]
    fn test_empty_graph() {
        let output = render(&KnowledgeBase::new());
        assert!(output.contains("<rdf:RDF"));
        assert!(!output.contains("rdf:Description"));
    }
}
