//! Property-based tests for the knowledge store.
//!
//! These tests verify invariants that should hold for any set of facts:
//! - Storing is idempotent
//! - Persisting and reloading keeps the same facts
//! - Negated relation names recover their verb
//! - Every stored fact is visible from both ends

use std::collections::BTreeSet;

use ontology_rules::{Fact, Polarity, Predicate, Relation};
use proptest::prelude::*;
use statement_core::{GraphConfig, GraphExporter, KnowledgeBase, KnowledgeStore, StoragePaths};

fn arb_entity() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,12}".prop_map(|s| s)
}

fn arb_verb() -> impl Strategy<Value = String> {
    "[a-z][a-z-]{0,12}".prop_map(|s| s)
}

/// Any lemma an oracle might hand over, reserved relation names and the empty lemma included.
fn arb_lemma() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => arb_verb(),
        1 => Just("isa".to_string()),
        1 => Just("neg-isa".to_string()),
        1 => Just(String::new()),
        1 => "neg-relation-[a-z]{0,6}".prop_map(|s| s),
    ]
}

fn arb_fact() -> impl Strategy<Value = Fact> {
    let predicate = prop_oneof![
        Just(Predicate::IsA),
        arb_lemma().prop_map(Predicate::Verb),
    ];
    (arb_entity(), predicate, arb_entity(), any::<bool>()).prop_map(
        |(subject, predicate, object, negated)| {
            Fact::new(subject, predicate, object).with_polarity(Polarity::from_negated(negated))
        },
    )
}

fn open(dir: &tempfile::TempDir) -> KnowledgeStore {
    let paths = StoragePaths {
        knowledge: dir.path().join("knowledge.json"),
        graph: dir.path().join("ontology.owl"),
    };
    KnowledgeStore::open(paths, GraphExporter::from_config(&GraphConfig::default())).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn storing_twice_is_idempotent(facts in prop::collection::vec(arb_fact(), 1..20)) {
        let mut once = KnowledgeBase::new();
        let mut twice = KnowledgeBase::new();
        for fact in &facts {
            once.insert(fact);
            twice.insert(fact);
            prop_assert!(!twice.insert(fact));
        }
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn negated_relation_recovers_verb(verb in arb_verb()) {
        let encoded = Relation::not_verb(verb.as_str()).encode();
        prop_assert_eq!(encoded.strip_prefix("neg-relation-"), Some(verb.as_str()));
        prop_assert_eq!(Relation::decode(&encoded), Relation::not_verb(verb.as_str()));
    }

    #[test]
    fn every_fact_is_visible_from_both_ends(facts in prop::collection::vec(arb_fact(), 1..20)) {
        let mut base = KnowledgeBase::new();
        for fact in &facts {
            base.insert(fact);
        }
        for fact in facts.iter().cloned().map(Fact::canonical) {
            prop_assert!(base.query(&fact.subject).outgoing.contains(&fact));
            prop_assert!(base.query(&fact.object).incoming.contains(&fact));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn persist_reload_round_trip(facts in prop::collection::vec(arb_fact(), 0..20)) {
        let dir = tempfile::tempdir().unwrap();
        let expected: BTreeSet<Fact> = facts.iter().cloned().map(Fact::canonical).collect();
        let stored: BTreeSet<Fact> = {
            let mut store = open(&dir);
            for fact in &facts {
                store.store_fact(fact).unwrap();
            }
            store.base().facts().collect()
        };
        prop_assert_eq!(&stored, &expected);

        let reloaded = open(&dir);
        let actual: BTreeSet<Fact> = reloaded.base().facts().collect();
        prop_assert_eq!(actual, stored);
    }
}
