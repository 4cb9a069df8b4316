//! Knowledge Base - the in-memory fact map.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use ontology_rules::{Fact, Relation};

use super::EntityReport;

/// Subject -> relation -> objects.
///
/// Serializes as the knowledge file: a JSON object of subjects, each an object of
/// encoded relation names, each a list of objects. Duplicate objects in a loaded
/// list collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct KnowledgeBase {
    subjects: BTreeMap<String, BTreeMap<Relation, BTreeSet<String>>>,
}

impl KnowledgeBase {
    /// Create a new empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fact, trimming subject and object.
    ///
    /// The relation is stored in canonical form, so the in-memory key is the
    /// one a reload of the knowledge file yields. Returns `false` if the fact
    /// was already present.
    pub fn insert(&mut self, fact: &Fact) -> bool {
        let subject = fact.subject.trim();
        let object = fact.object.trim();

        self.subjects
            .entry(subject.to_string())
            .or_default()
            .entry(fact.relation().canonical())
            .or_default()
            .insert(object.to_string())
    }

    /// Check whether a fact is stored (after trimming).
    pub fn contains(&self, fact: &Fact) -> bool {
        self.subjects
            .get(fact.subject.trim())
            .and_then(|relations| relations.get(&fact.relation().canonical()))
            .is_some_and(|objects| objects.contains(fact.object.trim()))
    }

    /// Outgoing edges by direct lookup, incoming edges by a scan over every fact.
    pub fn query(&self, entity: &str) -> EntityReport {
        let outgoing: Vec<Fact> = self
            .subjects
            .get(entity)
            .map(|relations| {
                relations
                    .iter()
                    .flat_map(|(relation, objects)| {
                        objects
                            .iter()
                            .map(move |object| Fact::from_parts(entity, relation, object.as_str()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let incoming: Vec<Fact> = self
            .facts()
            .filter(|fact| fact.object == entity)
            .collect();

        EntityReport {
            entity: entity.to_string(),
            outgoing,
            incoming,
        }
    }

    /// Every stored fact, ordered by subject, relation, object.
    pub fn facts(&self) -> impl Iterator<Item = Fact> + '_ {
        self.subjects.iter().flat_map(|(subject, relations)| {
            relations.iter().flat_map(move |(relation, objects)| {
                objects
                    .iter()
                    .map(move |object| Fact::from_parts(subject.as_str(), relation, object.as_str()))
            })
        })
    }

    /// Get the total number of facts.
    pub fn fact_count(&self) -> usize {
        self.subjects
            .values()
            .flat_map(|relations| relations.values())
            .map(BTreeSet::len)
            .sum()
    }

    /// Get all subjects.
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects.keys().map(String::as_str)
    }

    /// Objects stored under `subject` and `relation`.
    pub fn objects(&self, subject: &str, relation: &Relation) -> Option<&BTreeSet<String>> {
        self.subjects.get(subject)?.get(relation)
    }

    pub fn is_empty(&self) -> bool {
        self.fact_count() == 0
    }

    /// Drop relations without objects and subjects without relations.
    ///
    /// Returns the number of entries removed.
    pub fn prune_empty(&mut self) -> usize {
        let mut removed = 0;
        for relations in self.subjects.values_mut() {
            let before = relations.len();
            relations.retain(|_, objects| !objects.is_empty());
            removed += before - relations.len();
        }
        let before = self.subjects.len();
        self.subjects.retain(|_, relations| !relations.is_empty());
        removed + before - self.subjects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        kb.insert(&Fact::is_a("Car", "vehicle"));
        kb.insert(&Fact::verb("Car", "has-part", "wheel"));
        kb.insert(&Fact::verb("Bike", "has-part", "wheel"));
        kb
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut kb = KnowledgeBase::new();
        assert!(kb.insert(&Fact::is_a("Car", "vehicle")));
        assert!(!kb.insert(&Fact::is_a("Car", "vehicle")));
        assert!(!kb.insert(&Fact::is_a(" Car ", "vehicle ")));
        assert_eq!(kb.fact_count(), 1);
    }

    #[test]
    fn test_polarity_keeps_facts_apart() {
        let mut kb = KnowledgeBase::new();
        kb.insert(&Fact::is_a("Car", "dog"));
        kb.insert(&Fact::is_a("Car", "dog").negated());
        assert_eq!(kb.fact_count(), 2);
        assert!(kb.contains(&Fact::is_a("Car", "dog").negated()));
        assert!(kb.objects("Car", &Relation::not_is_a()).is_some());
    }

    #[test]
    fn test_reserved_verb_names_are_stored_canonically() {
        let mut kb = KnowledgeBase::new();
        assert!(kb.insert(&Fact::verb("Car", "isa", "vehicle")));
        assert!(!kb.insert(&Fact::is_a("Car", "vehicle")));
        assert!(kb.contains(&Fact::verb("Car", "isa", "vehicle")));

        kb.insert(&Fact::verb("Rex", "", "cats").negated());
        assert_eq!(
            kb.query("Rex").outgoing,
            vec![Fact::verb("Rex", "neg-relation-", "cats")]
        );

        let reloaded: KnowledgeBase =
            serde_json::from_str(&serde_json::to_string(&kb).unwrap()).unwrap();
        assert_eq!(reloaded, kb);
    }

    #[test]
    fn test_query_outgoing_and_incoming() {
        let kb = sample();

        let car = kb.query("Car");
        assert_eq!(
            car.outgoing,
            vec![
                Fact::is_a("Car", "vehicle"),
                Fact::verb("Car", "has-part", "wheel"),
            ]
        );
        assert!(car.incoming.is_empty());

        let wheel = kb.query("wheel");
        assert!(wheel.outgoing.is_empty());
        assert_eq!(wheel.incoming.len(), 2);
        assert_eq!(wheel.incoming[0].subject, "Bike");

        assert!(kb.query("Plane").is_empty());
    }

    #[test]
    fn test_query_is_case_sensitive() {
        let kb = sample();
        assert!(kb.query("car").is_empty());
    }

    #[test]
    fn test_knowledge_file_shape() {
        let mut kb = sample();
        kb.insert(&Fact::verb("Rex", "chase", "cats").negated());

        let json: serde_json::Value = serde_json::to_value(&kb).unwrap();
        assert_eq!(json["Car"]["isa"], serde_json::json!(["vehicle"]));
        assert_eq!(json["Car"]["has-part"], serde_json::json!(["wheel"]));
        assert_eq!(json["Rex"]["neg-relation-chase"], serde_json::json!(["cats"]));
    }

    #[test]
    fn test_load_tolerates_duplicates_and_empty_entries() {
        let json = r#"{
            "Car": {"isa": ["vehicle", "vehicle"], "neg-isa": []},
            "Ghost": {}
        }"#;
        let mut kb: KnowledgeBase = serde_json::from_str(json).unwrap();
        assert_eq!(kb.fact_count(), 1);
        assert!(kb.query("Ghost").is_empty());

        assert_eq!(kb.prune_empty(), 2);
        assert_eq!(kb.subjects().collect::<Vec<_>>(), vec!["Car"]);
    }
}
