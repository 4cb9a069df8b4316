//! Logos shell - enter statements, query entities, ask for clarifications.
//!
//! # Usage
//!
//! ```bash
//! # Guided mode with the default configuration
//! logos
//!
//! # Auto mode, custom configuration, debug logging on stderr
//! logos --auto --config logos.toml --verbose
//! ```

mod command;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use statement_core::{AnswerOutcome, ClarificationReport, Config, Session, StoreMode};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use command::Command;

#[derive(Parser)]
#[command(name = "logos")]
#[command(about = "Turn statements into ontology facts", long_about = None)]
struct Cli {
    /// Configuration file (TOML); defaults apply when it does not exist
    #[arg(short, long, default_value = "logos.toml")]
    config: PathBuf,

    /// Start in auto mode
    #[arg(long)]
    auto: bool,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = if cli.config.exists() {
        Config::load(&cli.config)
            .with_context(|| format!("Failed to load config: {}", cli.config.display()))?
    } else {
        warn!(path = %cli.config.display(), "no config file, using defaults");
        Config::default()
    };

    let mode = if cli.auto {
        StoreMode::Auto
    } else {
        StoreMode::Guided
    };
    let mut session = Session::from_config(config, mode).context("Failed to start session")?;

    print_banner(&session);
    run(&mut session)
}

fn print_banner(session: &Session) {
    let paths = session.store().paths();
    println!("=== Logos: statements to ontology facts ===");
    println!("Mode: {} ({} and {}).", session.mode(), paths.knowledge.display(), paths.graph.display());
    println!("Enter statements (e.g. 'Car is a vehicle'), queries '? Car', or 'clarify <Entity>'.");
    println!(" - 'auto on' / 'auto off' => switch storage mode.");
    println!(" - 'logic?' => view logic statements.");
    println!(" - 'owl?' => display the current graph file.");
    println!(" - 'exit' or 'quit' => stop.\n");
}

fn run(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        let mut answers = |_: &str, question: &str| -> Option<String> {
            println!("{question}");
            print!("Your answer (or Enter to skip): ");
            io::stdout().flush().ok()?;
            lines.next()?.ok()
        };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Exit => {
                println!("Goodbye!");
                break;
            }
            Command::AutoOn => switch_mode(session, StoreMode::Auto),
            Command::AutoOff => switch_mode(session, StoreMode::Guided),
            Command::Logic => print_logic(session),
            Command::Graph => print_graph(session),
            Command::Query(entity) => println!("{}\n", session.query(&entity)),
            Command::Clarify(None) => println!("[Usage: clarify <Entity>]\n"),
            Command::Clarify(Some(entity)) => {
                println!("Asking for clarifications about '{entity}'...\n");
                match session.clarify(&entity, &mut answers) {
                    Ok(report) if report.questions.is_empty() => println!("No questions found.\n"),
                    Ok(report) => print_report(&report),
                    Err(err) => println!("{err}\n"),
                }
            }
            Command::Statement(statement) => match session.process_statement(&statement) {
                Ok(Some(outcome)) => {
                    println!("Logic: {}\n", outcome.logic);
                    for result in session.clarify_new_subjects(&outcome, &mut answers) {
                        match result {
                            Ok(report) => print_report(&report),
                            Err(err) => println!("{err}\n"),
                        }
                    }
                }
                Ok(None) => println!("[Unrecognized or query syntax.]\n"),
                Err(err) => println!("{err}\n"),
            },
        }
    }

    Ok(())
}

fn switch_mode(session: &mut Session, mode: StoreMode) {
    match session.switch_mode(mode) {
        Ok(()) => {
            let paths = session.store().paths();
            println!("=== Switched to {} mode ===", mode.to_string().to_uppercase());
            println!("Now using {} and {}.\n", paths.knowledge.display(), paths.graph.display());
        }
        Err(err) => println!("[Could not switch to {mode} mode: {err}]\n"),
    }
}

fn print_logic(session: &Session) {
    let history = session.logic_history();
    if history.is_empty() {
        println!("No logic statements recorded yet.\n");
        return;
    }
    println!("=== Logic Statements Recorded ===");
    for (i, statement) in history.iter().enumerate() {
        println!("{}. {}", i + 1, statement);
    }
    println!();
}

fn print_graph(session: &Session) {
    let path = &session.store().paths().graph;
    match session.graph_contents() {
        Ok(Some(contents)) => {
            println!("=== Contents of {} ===\n", path.display());
            println!("{contents}");
            println!("=== End of Graph File ===\n");
        }
        Ok(None) => println!("[No graph file found: {}]\n", path.display()),
        Err(err) => println!("[{err}]\n"),
    }
}

fn print_report(report: &ClarificationReport) {
    println!("{} question(s) about '{}':", report.questions.len(), report.entity);
    for (i, question) in report.questions.iter().enumerate() {
        println!("{}. {}", i + 1, question.question);
        if let Some(answer) = &question.answer {
            if !answer.is_empty() {
                println!("   Answer: {answer}");
            }
        }
        match &question.outcome {
            AnswerOutcome::Translated { logic } => println!("   Translated to logic: {logic}"),
            AnswerOutcome::Skipped(reason) => println!("   {reason}"),
            AnswerOutcome::Failed(err) => println!("   {err}"),
        }
    }
    println!();
}
