//! Error types for the statement pipeline.
//!
//! [`ParseError`] is data: it travels through the pipeline inside an error
//! descriptor and ends up as an inline marker in the rendered logic. Everything
//! else is a recoverable failure reported to the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Linguistic failures while extracting a fact from one statement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No token carries the clause-root role.
    #[error("No root found")]
    NoRootFound,

    /// Copula statement without a subject or an object.
    #[error("incomplete is-a statement")]
    IncompleteIsA,

    /// Verb statement without a subject or an object.
    #[error("incomplete relation: {lemma}")]
    IncompleteRelation { lemma: String },
}

/// Failures talking to an external oracle process.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("[ERROR from oracle]: could not run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("[ERROR from oracle]: `{command}` exited with {status}: {stderr}")]
    Exit {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("[ERROR from oracle]: no command configured")]
    NoCommand,

    #[error("[ERROR from oracle]: unreadable token list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("[ERROR from oracle]: I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A recorded oracle was asked about a statement it has no parse for.
    #[error("[ERROR from oracle]: no recorded parse for {0:?}")]
    Unrecorded(String),
}

/// Knowledge file failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("knowledge file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("knowledge file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Graph export failures.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("graph file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("graph serialization failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failures of the clarification workflow for a single question.
#[derive(Error, Debug)]
pub enum ClarifyError {
    /// The clarification oracle is unreachable or failed.
    #[error(transparent)]
    OracleFailure(#[from] OracleError),

    /// The answer produced no fact.
    #[error("[No parseable statement recognized] {answer:?}")]
    UnparseableOutput { answer: String },
}

/// Crate-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Clarify(#[from] ClarifyError),
}

/// Result type for statement pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(ParseError::NoRootFound.to_string(), "No root found");
        assert_eq!(ParseError::IncompleteIsA.to_string(), "incomplete is-a statement");
        assert_eq!(
            ParseError::IncompleteRelation {
                lemma: "wow".to_string()
            }
            .to_string(),
            "incomplete relation: wow"
        );
    }

    #[test]
    fn test_oracle_errors_carry_prefix() {
        let err = OracleError::Exit {
            command: "ollama run llama3".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "model not found".to_string(),
        };
        assert!(err.to_string().starts_with(crate::clarification::ORACLE_ERROR_PREFIX));
    }
}
