//! Token schema delivered by a dependency oracle.
//!
//! Labels follow the ClearNLP/Universal Dependencies names most English parsers
//! emit (`ROOT`, `nsubj`, `dobj`, ...). A token's `head` is the index of its
//! syntactic head in the same statement; the root is its own head.

use serde::{Deserialize, Serialize};

/// Words that mark a statement as negated.
pub const NEGATION_CUES: [&str; 3] = ["not", "no", "never"];

/// Dependency roles the extraction pipeline cares about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DependencyRole {
    /// Head of the clause.
    Root,
    NominalSubject,
    PassiveSubject,
    DirectObject,
    PrepositionalObject,
    Object,
    Attribute,
    AdjectivalComplement,
    /// Any other label, kept verbatim.
    Other(String),
}

impl DependencyRole {
    /// Parse a parser label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "ROOT" | "root" => DependencyRole::Root,
            "nsubj" => DependencyRole::NominalSubject,
            "nsubjpass" | "nsubj:pass" => DependencyRole::PassiveSubject,
            "dobj" => DependencyRole::DirectObject,
            "pobj" => DependencyRole::PrepositionalObject,
            "obj" => DependencyRole::Object,
            "attr" => DependencyRole::Attribute,
            "acomp" => DependencyRole::AdjectivalComplement,
            other => DependencyRole::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            DependencyRole::Root => "ROOT",
            DependencyRole::NominalSubject => "nsubj",
            DependencyRole::PassiveSubject => "nsubjpass",
            DependencyRole::DirectObject => "dobj",
            DependencyRole::PrepositionalObject => "pobj",
            DependencyRole::Object => "obj",
            DependencyRole::Attribute => "attr",
            DependencyRole::AdjectivalComplement => "acomp",
            DependencyRole::Other(label) => label,
        }
    }

    /// Nominal or passive subject.
    pub fn is_subject(&self) -> bool {
        matches!(
            self,
            DependencyRole::NominalSubject | DependencyRole::PassiveSubject
        )
    }

    /// Direct or prepositional object, attribute, or adjectival complement.
    pub fn is_object(&self) -> bool {
        matches!(
            self,
            DependencyRole::DirectObject
                | DependencyRole::PrepositionalObject
                | DependencyRole::Object
                | DependencyRole::Attribute
                | DependencyRole::AdjectivalComplement
        )
    }
}

impl From<String> for DependencyRole {
    fn from(label: String) -> Self {
        DependencyRole::from_label(&label)
    }
}

impl From<DependencyRole> for String {
    fn from(role: DependencyRole) -> Self {
        role.label().to_string()
    }
}

/// One annotated token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text as it appeared in the statement.
    pub text: String,
    pub lemma: String,
    pub dep: DependencyRole,
    /// Index of the head token.
    pub head: usize,
}

impl Token {
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        dep: DependencyRole,
        head: usize,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            dep,
            head,
        }
    }

    /// Whether the surface text is one of [`NEGATION_CUES`].
    pub fn is_negation_cue(&self) -> bool {
        let lower = self.text.to_lowercase();
        NEGATION_CUES.contains(&lower.as_str())
    }
}

/// A statement as annotated by a dependency oracle, tokens in oracle order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ParsedStatement {
    tokens: Vec<Token>,
}

impl ParsedStatement {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Append a token given its parser label.
    pub fn with_token(
        mut self,
        text: impl Into<String>,
        lemma: impl Into<String>,
        dep_label: &str,
        head: usize,
    ) -> Self {
        self.tokens
            .push(Token::new(text, lemma, DependencyRole::from_label(dep_label), head));
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The first root token and its index.
    pub fn root(&self) -> Option<(usize, &Token)> {
        self.tokens
            .iter()
            .enumerate()
            .find(|(_, token)| token.dep == DependencyRole::Root)
    }

    /// True if any token anywhere in the statement is a negation cue.
    pub fn has_negation_cue(&self) -> bool {
        self.tokens.iter().any(Token::is_negation_cue)
    }

    /// The first token, in oracle order, attached to `head` whose role satisfies `role`.
    pub fn first_dependent<F>(&self, head: usize, role: F) -> Option<&Token>
    where
        F: Fn(&DependencyRole) -> bool,
    {
        self.tokens
            .iter()
            .enumerate()
            .find(|(index, token)| *index != head && token.head == head && role(&token.dep))
            .map(|(_, token)| token)
    }
}
