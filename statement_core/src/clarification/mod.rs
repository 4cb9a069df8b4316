//! Clarification - asking a language model what else is true about an entity.
//!
//! A round goes:
//! 1. **Questions**: the oracle proposes a few questions about the entity
//! 2. **Answers**: each question is answered by the oracle (auto mode) or by the user
//! 3. **Feedback**: every answer runs through statement processing like typed input
//!
//! This module holds the prompts, the oracle seam and the per-question outcomes;
//! the session drives the round.

use tracing::debug;

use crate::error::{ClarifyError, OracleError};
use crate::extraction::run_with_stdin;
use crate::knowledge_base::EntityReport;

/// Prefix every oracle failure displays with.
pub const ORACLE_ERROR_PREFIX: &str = "[ERROR from oracle]";

/// Guided answers that carry no statement.
pub const BARE_ANSWERS: [&str; 2] = ["yes", "no"];

/// A text-in, text-out language model.
pub trait ClarificationOracle {
    fn ask(&self, prompt: &str) -> Result<String, OracleError>;
}

/// Runs a command with the prompt on stdin and takes its stdout as the response.
#[derive(Debug, Clone)]
pub struct CommandClarificationOracle {
    program: String,
    args: Vec<String>,
}

impl CommandClarificationOracle {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a `[program, args...]` command line.
    pub fn from_command(command: &[String]) -> Result<Self, OracleError> {
        let (program, args) = command.split_first().ok_or(OracleError::NoCommand)?;
        Ok(Self::new(program.clone(), args.to_vec()))
    }
}

impl ClarificationOracle for CommandClarificationOracle {
    fn ask(&self, prompt: &str) -> Result<String, OracleError> {
        let response = run_with_stdin(&self.program, &self.args, prompt)?;
        debug!(program = %self.program, bytes = response.len(), "clarification response");
        Ok(response)
    }
}

/// Prompt asking for questions about `entity`.
pub fn question_prompt(entity: &str) -> String {
    format!(
        "You are building an ontology using Basic Formal Ontology (BFO).\n\
         We just learned about an entity named '{entity}'.\n\
         Please propose 1-3 concise questions about '{entity}' to clarify how it fits into BFO.\n\
         Respond with short bullet points, each a question.\n"
    )
}

/// Prompt asking the oracle to answer `question` with a single statement.
pub fn answer_prompt(entity: &str, known: &EntityReport, question: &str) -> String {
    format!(
        "We have the following knowledge about '{entity}':\n\
         {known}\n\
         \n\
         Here's a BFO-related question about '{entity}':\n\
         \"{question}\"\n\
         \n\
         Answer succinctly in a single statement (like \"Entity is a X\" or \"Entity verb Y\").\n\
         Try to handle negation if appropriate, using 'not' or 'no' if needed.\n"
    )
}

/// One question per non-empty line, bullet characters stripped.
pub fn parse_questions(response: &str) -> Vec<String> {
    response
        .lines()
        .map(|line| line.trim_matches(|c| matches!(c, '-' | '*' | ' ' | '\t')))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Why an answer was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing was entered.
    Empty,
    /// A bare "yes" or "no".
    BareAnswer,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Empty => write!(f, "no answer given"),
            SkipReason::BareAnswer => {
                write!(f, "Skipping short yes/no. Rephrase in a full statement if needed.")
            }
        }
    }
}

/// Whether a guided answer should be skipped rather than processed.
pub fn skip_reason(answer: &str) -> Option<SkipReason> {
    let answer = answer.trim();
    if answer.is_empty() {
        Some(SkipReason::Empty)
    } else if BARE_ANSWERS.contains(&answer.to_lowercase().as_str()) {
        Some(SkipReason::BareAnswer)
    } else {
        None
    }
}

/// What became of a single answer.
#[derive(Debug)]
pub enum AnswerOutcome {
    /// The answer was processed and produced at least one fact.
    Translated { logic: String },

    /// The answer was not processed.
    Skipped(SkipReason),

    /// The answer could not be obtained or produced no fact.
    Failed(ClarifyError),
}

/// One question of a clarification round.
#[derive(Debug)]
pub struct QuestionOutcome {
    pub question: String,
    pub answer: Option<String>,
    pub outcome: AnswerOutcome,
}

/// The result of a whole round.
#[derive(Debug, Default)]
pub struct ClarificationReport {
    pub entity: String,
    pub questions: Vec<QuestionOutcome>,
}

impl ClarificationReport {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            questions: Vec::new(),
        }
    }

    /// Number of answers that produced facts.
    pub fn translated(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| matches!(q.outcome, AnswerOutcome::Translated { .. }))
            .count()
    }
}

/// Hands out canned responses in order, one per call.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedClarificationOracle {
    responses: std::cell::RefCell<std::collections::VecDeque<String>>,
    prompts: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl ScriptedClarificationOracle {
    pub(crate) fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: std::cell::RefCell::new(responses.into_iter().map(Into::into).collect()),
            prompts: std::cell::RefCell::new(Vec::new()),
        }
    }

    /// Every prompt received so far.
    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

#[cfg(test)]
impl ClarificationOracle for ScriptedClarificationOracle {
    fn ask(&self, prompt: &str) -> Result<String, OracleError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| OracleError::Unrecorded(prompt.to_string()))
    }
}
