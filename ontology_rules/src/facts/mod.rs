//! The fact algebra: subject, predicate, object and polarity.
//!
//! Negation lives in [`Polarity`]. The string forms `neg-isa` and
//! `neg-relation-<verb>` only exist at the persistence boundary, see
//! [`Relation::encode`] and [`Relation::decode`].

use serde::{Deserialize, Serialize};

/// Persisted name of a positive type membership.
pub const ISA: &str = "isa";

/// Persisted name of a negated type membership.
pub const NEG_ISA: &str = "neg-isa";

/// Prefix of a negated verb relation; the verb follows it verbatim.
pub const NEG_RELATION_PREFIX: &str = "neg-relation-";

/// Whether a fact is asserted or negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Polarity {
    #[default]
    Positive,
    Negative,
}

impl Polarity {
    pub fn from_negated(negated: bool) -> Self {
        if negated {
            Polarity::Negative
        } else {
            Polarity::Positive
        }
    }
}

/// What a fact says about its subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Predicate {
    /// Type membership (copula statements).
    IsA,

    /// An action or relation named by a verb lemma.
    Verb(String),
}

impl Predicate {
    pub fn verb(lemma: impl Into<String>) -> Self {
        Predicate::Verb(lemma.into())
    }
}

/// A predicate together with its polarity: the key facts are grouped by in a knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Relation {
    pub predicate: Predicate,
    pub polarity: Polarity,
}

impl Relation {
    pub fn new(predicate: Predicate, polarity: Polarity) -> Self {
        Self {
            predicate,
            polarity,
        }
    }

    pub fn is_a() -> Self {
        Self::new(Predicate::IsA, Polarity::Positive)
    }

    pub fn not_is_a() -> Self {
        Self::new(Predicate::IsA, Polarity::Negative)
    }

    pub fn verb(lemma: impl Into<String>) -> Self {
        Self::new(Predicate::verb(lemma), Polarity::Positive)
    }

    pub fn not_verb(lemma: impl Into<String>) -> Self {
        Self::new(Predicate::verb(lemma), Polarity::Negative)
    }

    /// Persisted string form: `isa`, `neg-isa`, `<verb>` or `neg-relation-<verb>`.
    pub fn encode(&self) -> String {
        match (&self.predicate, self.polarity) {
            (Predicate::IsA, Polarity::Positive) => ISA.to_string(),
            (Predicate::IsA, Polarity::Negative) => NEG_ISA.to_string(),
            (Predicate::Verb(verb), Polarity::Positive) => verb.clone(),
            (Predicate::Verb(verb), Polarity::Negative) => format!("{NEG_RELATION_PREFIX}{verb}"),
        }
    }

    /// Parse a persisted relation name. Total: anything unrecognised is a positive verb.
    pub fn decode(encoded: &str) -> Self {
        if encoded == ISA {
            return Self::is_a();
        }
        if encoded == NEG_ISA {
            return Self::not_is_a();
        }
        match encoded.strip_prefix(NEG_RELATION_PREFIX) {
            Some(verb) if !verb.is_empty() => Self::not_verb(verb),
            _ => Self::verb(encoded),
        }
    }

    /// The relation a persisted knowledge base would hold for this one.
    ///
    /// Verbs spelled like a reserved name (`isa`, `neg-isa`, `neg-relation-..`)
    /// and negated empty verbs collapse onto what their encoding decodes to.
    pub fn canonical(&self) -> Self {
        Self::decode(&self.encode())
    }

    /// The verb lemma, if this is not a type-membership relation.
    pub fn verb_lemma(&self) -> Option<&str> {
        match &self.predicate {
            Predicate::IsA => None,
            Predicate::Verb(verb) => Some(verb),
        }
    }
}

impl From<Relation> for String {
    fn from(relation: Relation) -> Self {
        relation.encode()
    }
}

impl From<String> for Relation {
    fn from(encoded: String) -> Self {
        Relation::decode(&encoded)
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// A subject-predicate-object statement with a polarity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fact {
    pub subject: String,
    pub predicate: Predicate,
    pub object: String,
    pub polarity: Polarity,
}

impl Fact {
    /// Create a positive fact.
    pub fn new(subject: impl Into<String>, predicate: Predicate, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
            polarity: Polarity::Positive,
        }
    }

    /// `subject` is a member of type `object`.
    pub fn is_a(subject: impl Into<String>, object: impl Into<String>) -> Self {
        Self::new(subject, Predicate::IsA, object)
    }

    /// `subject` relates to `object` through `verb`.
    pub fn verb(
        subject: impl Into<String>,
        verb: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self::new(subject, Predicate::verb(verb), object)
    }

    /// Set the polarity.
    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Negate this fact.
    pub fn negated(self) -> Self {
        self.with_polarity(Polarity::Negative)
    }

    /// Build a fact from a knowledge-base entry.
    pub fn from_parts(subject: impl Into<String>, relation: &Relation, object: impl Into<String>) -> Self {
        Self::new(subject, relation.predicate.clone(), object).with_polarity(relation.polarity)
    }

    /// This fact with its relation in canonical form, see [`Relation::canonical`].
    pub fn canonical(self) -> Self {
        let relation = self.relation().canonical();
        Self::from_parts(self.subject, &relation, self.object)
    }

    /// The knowledge-base key for this fact.
    pub fn relation(&self) -> Relation {
        Relation::new(self.predicate.clone(), self.polarity)
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.relation(), self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_relations() {
        assert_eq!(Relation::is_a().encode(), "isa");
        assert_eq!(Relation::not_is_a().encode(), "neg-isa");
        assert_eq!(Relation::verb("has-part").encode(), "has-part");
        assert_eq!(Relation::not_verb("eat").encode(), "neg-relation-eat");
    }

    #[test]
    fn test_decode_relations() {
        assert_eq!(Relation::decode("isa"), Relation::is_a());
        assert_eq!(Relation::decode("neg-isa"), Relation::not_is_a());
        assert_eq!(Relation::decode("neg-relation-eat"), Relation::not_verb("eat"));
        assert_eq!(Relation::decode("causes"), Relation::verb("causes"));
    }

    #[test]
    fn test_negated_verb_recoverable_by_stripping_prefix() {
        let encoded = Relation::not_verb("has-part").encode();
        assert_eq!(encoded.strip_prefix(NEG_RELATION_PREFIX), Some("has-part"));
        assert_eq!(Relation::decode(&encoded).verb_lemma(), Some("has-part"));
    }

    #[test]
    fn test_bare_prefix_is_a_plain_verb() {
        let relation = Relation::decode("neg-relation-");
        assert_eq!(relation.polarity, Polarity::Positive);
        assert_eq!(relation.verb_lemma(), Some("neg-relation-"));
    }

    #[test]
    fn test_canonical_collapses_reserved_verbs() {
        assert_eq!(Relation::verb("isa").canonical(), Relation::is_a());
        assert_eq!(Relation::verb("neg-isa").canonical(), Relation::not_is_a());
        assert_eq!(
            Relation::verb("neg-relation-eat").canonical(),
            Relation::not_verb("eat")
        );
        assert_eq!(
            Relation::not_verb("").canonical(),
            Relation::verb("neg-relation-")
        );
        assert_eq!(Relation::not_verb("chase").canonical(), Relation::not_verb("chase"));

        let fact = Fact::verb("Car", "isa", "vehicle").canonical();
        assert_eq!(fact, Fact::is_a("Car", "vehicle"));
    }

    #[test]
    fn test_fact_builder() {
        let fact = Fact::is_a("Car", "dog").negated();
        assert_eq!(fact.relation(), Relation::not_is_a());
        assert_eq!(fact.to_string(), "(Car, neg-isa, dog)");

        let rebuilt = Fact::from_parts("Car", &Relation::not_is_a(), "dog");
        assert_eq!(rebuilt, fact);
    }

    #[test]
    fn test_relation_serializes_as_string() {
        let json = serde_json::to_string(&Relation::not_verb("chase")).unwrap();
        assert_eq!(json, "\"neg-relation-chase\"");

        let back: Relation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Relation::not_verb("chase"));
    }
}
