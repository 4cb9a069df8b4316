//! Statement extraction - from one sentence to at most one fact.
//!
//! The extraction pipeline works as follows:
//! 1. **Marker check**: statements starting with `?` are queries, not facts
//! 2. **Pronouns**: `it`/`they`/`them` are replaced by the last subject
//! 3. **Annotation**: a [`DependencyOracle`] supplies tokens with roles and heads
//! 4. **Negation**: any negation cue anywhere negates the statement
//! 5. **Roles**: root, first subject of the root, first object of the root
//! 6. **Shape**: copula roots give type membership, other roots give a verb relation

mod oracle;
mod pronoun;

pub use oracle::*;
pub use pronoun::*;

use ontology_rules::{DependencyRole, Fact, ParsedStatement, Polarity, Predicate};
use tracing::debug;

use crate::error::{OracleError, ParseError};

/// Leading character that marks a query instead of a statement.
pub const QUERY_MARKER: char = '?';

/// Root lemmas treated as a copula.
pub const COPULA_LEMMAS: [&str; 2] = ["is", "be"];

/// One extraction outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// `subject` is a member of type `object`.
    IsA { subject: String, object: String },

    /// `subject` relates to `object` through the verb lemma.
    Relation {
        verb: String,
        subject: String,
        object: String,
    },

    /// A negated type membership or verb relation.
    Negation {
        predicate: Predicate,
        subject: String,
        object: String,
    },

    /// The statement could not be reduced to a fact.
    Error(ParseError),
}

impl Descriptor {
    /// The fact to store, as it will be persisted: object lower-cased and
    /// relation in canonical form.
    pub fn fact(&self) -> Option<Fact> {
        let fact = match self {
            Descriptor::IsA { subject, object } => {
                Some(Fact::is_a(subject.as_str(), object.to_lowercase()))
            }
            Descriptor::Relation {
                verb,
                subject,
                object,
            } => Some(Fact::verb(subject.as_str(), verb.as_str(), object.to_lowercase())),
            Descriptor::Negation {
                predicate,
                subject,
                object,
            } => Some(
                Fact::new(subject.as_str(), predicate.clone(), object.to_lowercase())
                    .with_polarity(Polarity::Negative),
            ),
            Descriptor::Error(_) => None,
        };
        fact.map(Fact::canonical)
    }

    /// The subject as written in the statement, if a fact was extracted.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Descriptor::IsA { subject, .. }
            | Descriptor::Relation { subject, .. }
            | Descriptor::Negation { subject, .. } => Some(subject),
            Descriptor::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Descriptor::Error(_))
    }
}

/// Result of running a line through the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The line starts with the query marker; route it elsewhere.
    NotAStatement,

    /// Descriptors in extraction order (exactly one in this design).
    Extracted(Vec<Descriptor>),
}

/// Turns statements into fact descriptors using a dependency oracle.
pub struct StatementParser<'a> {
    oracle: &'a dyn DependencyOracle,
}

impl<'a> StatementParser<'a> {
    pub fn new(oracle: &'a dyn DependencyOracle) -> Self {
        Self { oracle }
    }

    /// Parse one statement.
    ///
    /// Linguistic failures come back as [`Descriptor::Error`]; only an oracle
    /// failure is an `Err`.
    pub fn parse(
        &self,
        statement: &str,
        last_subject: Option<&str>,
    ) -> Result<ParseOutcome, OracleError> {
        let statement = statement.trim();
        if statement.starts_with(QUERY_MARKER) {
            return Ok(ParseOutcome::NotAStatement);
        }

        let resolved = resolve_pronouns(statement, last_subject);
        let parsed = self.oracle.parse(&resolved)?;
        let descriptor = interpret(&parsed);
        debug!(statement = %resolved, ?descriptor, "statement interpreted");

        Ok(ParseOutcome::Extracted(vec![descriptor]))
    }
}

/// Reduce an annotated statement to one descriptor.
pub fn interpret(parsed: &ParsedStatement) -> Descriptor {
    let negated = parsed.has_negation_cue();

    let Some((root_index, root)) = parsed.root() else {
        return Descriptor::Error(ParseError::NoRootFound);
    };
    let lemma = root.lemma.to_lowercase();

    let subject = parsed
        .first_dependent(root_index, DependencyRole::is_subject)
        .map(|token| token.text.clone());
    let object = parsed
        .first_dependent(root_index, DependencyRole::is_object)
        .map(|token| token.text.clone());

    let is_copula = COPULA_LEMMAS.contains(&lemma.as_str());

    match (subject, object) {
        (Some(subject), Some(object)) => match (is_copula, negated) {
            (true, false) => Descriptor::IsA { subject, object },
            (true, true) => Descriptor::Negation {
                predicate: Predicate::IsA,
                subject,
                object,
            },
            (false, false) => Descriptor::Relation {
                verb: lemma,
                subject,
                object,
            },
            (false, true) => Descriptor::Negation {
                predicate: Predicate::Verb(lemma),
                subject,
                object,
            },
        },
        _ if is_copula => Descriptor::Error(ParseError::IncompleteIsA),
        _ => Descriptor::Error(ParseError::IncompleteRelation { lemma }),
    }
}
