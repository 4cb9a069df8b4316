//! Session - one interactive run of the statement pipeline.
//!
//! Owns everything that outlives a single statement: the knowledge store for
//! the active mode, the logic log, the last subject, the clarified entities and
//! both oracles.

use std::collections::HashSet;
use std::fs;
use std::io;

use ontology_rules::Fact;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clarification::{
    answer_prompt, parse_questions, question_prompt, skip_reason, AnswerOutcome,
    ClarificationOracle, ClarificationReport, CommandClarificationOracle, QuestionOutcome,
};
use crate::config::{Config, StoreMode};
use crate::error::{ClarifyError, Error, ExportError, OracleError, StoreError};
use crate::extraction::{
    CommandDependencyOracle, DependencyOracle, Descriptor, ParseOutcome, StatementParser,
};
use crate::graph_export::GraphExporter;
use crate::knowledge_base::{EntityReport, KnowledgeStore};
use crate::logic::{self, SessionLog};

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supplies answers to clarification questions in guided mode.
pub trait AnswerSource {
    /// Answer `question` about `entity`; `None` skips it.
    fn answer(&mut self, entity: &str, question: &str) -> Option<String>;
}

impl<F> AnswerSource for F
where
    F: FnMut(&str, &str) -> Option<String>,
{
    fn answer(&mut self, entity: &str, question: &str) -> Option<String> {
        self(entity, question)
    }
}

/// What one processed statement produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementOutcome {
    /// The rendered logic expression, error markers included.
    pub logic: String,
    pub descriptors: Vec<Descriptor>,
    /// Facts handed to the store, in extraction order.
    pub facts: Vec<Fact>,
}

impl StatementOutcome {
    /// Subjects of the extracted facts, as written.
    pub fn subjects(&self) -> Vec<String> {
        self.descriptors
            .iter()
            .filter_map(Descriptor::subject)
            .map(str::to_string)
            .collect()
    }
}

/// The explicit context every pipeline operation runs in.
pub struct Session {
    id: SessionId,
    config: Config,
    mode: StoreMode,
    store: KnowledgeStore,
    log: SessionLog,
    last_subject: Option<String>,
    clarified: HashSet<String>,
    dependency_oracle: Box<dyn DependencyOracle>,
    clarification_oracle: Box<dyn ClarificationOracle>,
}

impl Session {
    /// Start a session in `mode`, loading that mode's knowledge file.
    pub fn new(
        config: Config,
        mode: StoreMode,
        dependency_oracle: Box<dyn DependencyOracle>,
        clarification_oracle: Box<dyn ClarificationOracle>,
    ) -> Result<Self, StoreError> {
        let id = SessionId::new();
        let store = open_store(&config, mode)?;
        info!(session = %id, %mode, facts = store.base().fact_count(), "session started");

        Ok(Self {
            id,
            config,
            mode,
            store,
            log: SessionLog::new(),
            last_subject: None,
            clarified: HashSet::new(),
            dependency_oracle,
            clarification_oracle,
        })
    }

    /// Start a session with the command oracles named in `config`.
    pub fn from_config(config: Config, mode: StoreMode) -> Result<Self, Error> {
        let dependency = CommandDependencyOracle::from_command(&config.oracles.dependency_command)?;
        let clarification =
            CommandClarificationOracle::from_command(&config.oracles.clarification_command)?;
        Ok(Self::new(
            config,
            mode,
            Box::new(dependency),
            Box::new(clarification),
        )?)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> StoreMode {
        self.mode
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn last_subject(&self) -> Option<&str> {
        self.last_subject.as_deref()
    }

    /// Every error-free expression rendered so far, oldest first.
    pub fn logic_history(&self) -> &[String] {
        self.log.entries()
    }

    /// Extract, render, log and store one statement.
    ///
    /// Returns `None` for query-marked input. Store failures are logged and do
    /// not fail the statement.
    pub fn process_statement(
        &mut self,
        statement: &str,
    ) -> Result<Option<StatementOutcome>, OracleError> {
        let parser = StatementParser::new(self.dependency_oracle.as_ref());
        let descriptors = match parser.parse(statement, self.last_subject.as_deref())? {
            ParseOutcome::NotAStatement => return Ok(None),
            ParseOutcome::Extracted(descriptors) => descriptors,
        };

        let logic = logic::render(&descriptors);
        if !self.log.record(&logic) {
            debug!(session = %self.id, %logic, "error marker, not logged");
        }

        let mut facts = Vec::new();
        for descriptor in &descriptors {
            let Some(fact) = descriptor.fact() else {
                continue;
            };
            if let Err(err) = self.store.store_fact(&fact) {
                warn!(session = %self.id, %fact, error = %err, "storing fact failed");
            }
            self.last_subject = descriptor.subject().map(str::to_string);
            facts.push(fact);
        }

        Ok(Some(StatementOutcome {
            logic,
            descriptors,
            facts,
        }))
    }

    /// Everything known about `entity`.
    pub fn query(&self, entity: &str) -> EntityReport {
        self.store.query_entity(entity.trim())
    }

    /// Activate `mode`, reloading its knowledge file and regenerating its graph.
    ///
    /// The logic log and last subject carry over.
    pub fn switch_mode(&mut self, mode: StoreMode) -> Result<(), StoreError> {
        self.store = open_store(&self.config, mode)?;
        self.mode = mode;
        info!(session = %self.id, %mode, facts = self.store.base().fact_count(), "mode switched");
        Ok(())
    }

    /// Current contents of the active graph file, `None` if it does not exist.
    pub fn graph_contents(&self) -> Result<Option<String>, ExportError> {
        let path = &self.store.paths().graph;
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ExportError::Io {
                path: path.clone(),
                source,
            }),
        }
    }

    /// Run a clarification round about `entity`.
    ///
    /// In auto mode the oracle answers its own questions and `answers` is not
    /// consulted. In guided mode empty and bare yes/no answers are skipped.
    pub fn clarify(
        &mut self,
        entity: &str,
        answers: &mut dyn AnswerSource,
    ) -> Result<ClarificationReport, ClarifyError> {
        let response = self.clarification_oracle.ask(&question_prompt(entity))?;
        let questions = parse_questions(&response);
        info!(session = %self.id, entity, questions = questions.len(), "clarification round");

        let mut report = ClarificationReport::new(entity);
        for question in questions {
            let outcome = self.answer_question(entity, &question, answers);
            report.questions.push(outcome);
        }
        Ok(report)
    }

    /// Clarify `entity` unless it was already offered in this session.
    pub fn maybe_clarify(
        &mut self,
        entity: &str,
        answers: &mut dyn AnswerSource,
    ) -> Option<Result<ClarificationReport, ClarifyError>> {
        if !self.clarified.insert(entity.to_lowercase()) {
            debug!(session = %self.id, entity, "already clarified");
            return None;
        }
        Some(self.clarify(entity, answers))
    }

    /// Offer the subjects of `outcome` for clarification when `auto_clarify` is on.
    pub fn clarify_new_subjects(
        &mut self,
        outcome: &StatementOutcome,
        answers: &mut dyn AnswerSource,
    ) -> Vec<Result<ClarificationReport, ClarifyError>> {
        if !self.config.auto_clarify {
            return Vec::new();
        }
        outcome
            .subjects()
            .iter()
            .filter_map(|subject| self.maybe_clarify(subject, answers))
            .collect()
    }

    fn answer_question(
        &mut self,
        entity: &str,
        question: &str,
        answers: &mut dyn AnswerSource,
    ) -> QuestionOutcome {
        let answer = match self.mode {
            StoreMode::Auto => {
                let prompt = answer_prompt(entity, &self.query(entity), question);
                match self.clarification_oracle.ask(&prompt) {
                    Ok(answer) => answer,
                    Err(err) => {
                        warn!(session = %self.id, entity, error = %err, "auto answer failed");
                        return QuestionOutcome {
                            question: question.to_string(),
                            answer: None,
                            outcome: AnswerOutcome::Failed(err.into()),
                        };
                    }
                }
            }
            StoreMode::Guided => {
                let answer = answers.answer(entity, question).unwrap_or_default();
                if let Some(reason) = skip_reason(&answer) {
                    return QuestionOutcome {
                        question: question.to_string(),
                        answer: Some(answer),
                        outcome: AnswerOutcome::Skipped(reason),
                    };
                }
                answer.trim().to_string()
            }
        };

        let outcome = match self.process_statement(&answer) {
            Ok(Some(outcome)) if !outcome.facts.is_empty() => AnswerOutcome::Translated {
                logic: outcome.logic,
            },
            Ok(_) => AnswerOutcome::Failed(ClarifyError::UnparseableOutput {
                answer: answer.clone(),
            }),
            Err(err) => AnswerOutcome::Failed(err.into()),
        };

        QuestionOutcome {
            question: question.to_string(),
            answer: Some(answer),
            outcome,
        }
    }
}

fn open_store(config: &Config, mode: StoreMode) -> Result<KnowledgeStore, StoreError> {
    KnowledgeStore::open(
        config.storage.paths(mode),
        GraphExporter::from_config(&config.graph),
    )
}
