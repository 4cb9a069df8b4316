//! Shell input lines and what they ask for.

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    AutoOn,
    AutoOff,
    /// Show the session logic log.
    Logic,
    /// Show the active graph file.
    Graph,
    /// `? <entity>`
    Query(String),
    /// `clarify <entity>` or `ollama <entity>`; `None` when the entity is missing.
    Clarify(Option<String>),
    Statement(String),
    Empty,
}

const CLARIFY_KEYWORDS: [&str; 2] = ["clarify", "ollama"];

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let lower = line.to_lowercase();

        match lower.as_str() {
            "" => return Command::Empty,
            "exit" | "quit" => return Command::Exit,
            "auto on" => return Command::AutoOn,
            "auto off" => return Command::AutoOff,
            "logic?" => return Command::Logic,
            "owl?" => return Command::Graph,
            _ => {}
        }

        if let Some(entity) = line.strip_prefix('?') {
            return Command::Query(entity.trim().to_string());
        }

        let mut words = line.splitn(2, char::is_whitespace);
        if let Some(keyword) = words.next() {
            if CLARIFY_KEYWORDS.contains(&keyword.to_lowercase().as_str()) {
                let entity = words.next().map(str::trim).filter(|e| !e.is_empty());
                return Command::Clarify(entity.map(str::to_string));
            }
        }

        Command::Statement(line.to_string())
    }
}
