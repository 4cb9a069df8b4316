//! Dependency oracles: whatever turns raw text into annotated tokens.

use std::collections::HashMap;
use std::io::Write;
use std::process::{Command, Stdio};

use ontology_rules::ParsedStatement;
use tracing::debug;

use crate::error::OracleError;

/// Annotates a statement with lemma, dependency role and head for every token.
///
/// Implementations must be deterministic for a given input.
pub trait DependencyOracle {
    fn parse(&self, text: &str) -> Result<ParsedStatement, OracleError>;
}

/// Runs an external parser: statement text on stdin, a JSON token list on stdout.
///
/// Each token is `{"text": .., "lemma": .., "dep": .., "head": ..}` with `head`
/// the index of the head token.
#[derive(Debug, Clone)]
pub struct CommandDependencyOracle {
    program: String,
    args: Vec<String>,
}

impl CommandDependencyOracle {
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

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl DependencyOracle for CommandDependencyOracle {
    fn parse(&self, text: &str) -> Result<ParsedStatement, OracleError> {
        let stdout = run_with_stdin(&self.program, &self.args, text)?;
        let parsed: ParsedStatement = serde_json::from_str(&stdout)?;
        debug!(command = %self.command_line(), tokens = parsed.len(), "dependency parse");
        Ok(parsed)
    }
}

/// Replays parses recorded ahead of time, keyed by the exact statement text.
#[derive(Debug, Clone, Default)]
pub struct RecordedOracle {
    parses: HashMap<String, ParsedStatement>,
}

impl RecordedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the parse of `text`.
    pub fn with(mut self, text: impl Into<String>, parsed: ParsedStatement) -> Self {
        self.insert(text, parsed);
        self
    }

    pub fn insert(&mut self, text: impl Into<String>, parsed: ParsedStatement) {
        self.parses.insert(text.into(), parsed);
    }
}

impl DependencyOracle for RecordedOracle {
    fn parse(&self, text: &str) -> Result<ParsedStatement, OracleError> {
        self.parses
            .get(text)
            .cloned()
            .ok_or_else(|| OracleError::Unrecorded(text.to_string()))
    }
}

/// Run `program args..` with `input` on stdin and return its stdout.
///
/// Blocks until the process exits; there is no timeout.
pub(crate) fn run_with_stdin(
    program: &str,
    args: &[String],
    input: &str,
) -> Result<String, OracleError> {
    let command_line = || {
        std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| OracleError::Spawn {
            command: command_line(),
            source,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        // A process that exits without reading its input still reports through its status.
        if let Err(err) = stdin.write_all(input.as_bytes()) {
            if err.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(err.into());
            }
        }
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(OracleError::Exit {
            command: command_line(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_oracle() {
        let parsed = ParsedStatement::default().with_token("Wow", "wow", "ROOT", 0);
        let oracle = RecordedOracle::new().with("Wow", parsed.clone());

        assert_eq!(oracle.parse("Wow").unwrap(), parsed);
        assert!(matches!(
            oracle.parse("Huh"),
            Err(OracleError::Unrecorded(text)) if text == "Huh"
        ));
    }

    #[test]
    fn test_empty_command_is_rejected() {
        assert!(matches!(
            CommandDependencyOracle::from_command(&[]),
            Err(OracleError::NoCommand)
        ));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let oracle = CommandDependencyOracle::new("logos-definitely-missing-parser", Vec::new());
        let err = oracle.parse("Car is a vehicle").unwrap_err();
        assert!(matches!(err, OracleError::Spawn { .. }));
        assert!(err.to_string().starts_with("[ERROR from oracle]"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_oracle_reads_json_tokens() {
        let script = r#"cat > /dev/null; echo '[{"text":"Wow","lemma":"wow","dep":"ROOT","head":0}]'"#;
        let oracle =
            CommandDependencyOracle::new("sh", vec!["-c".to_string(), script.to_string()]);
        let parsed = oracle.parse("Wow").unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.root().unwrap().1.lemma, "wow");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_oracle_non_zero_exit() {
        let oracle = CommandDependencyOracle::new(
            "sh",
            vec!["-c".to_string(), "echo broken >&2; exit 3".to_string()],
        );
        match oracle.parse("anything") {
            Err(OracleError::Exit { stderr, .. }) => assert_eq!(stderr, "broken"),
            other => panic!("expected exit error, got {:?}", other),
        }
    }
}
