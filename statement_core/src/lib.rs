//! # Statement Core
//!
//! Turns plain-English statements into ontology facts. This crate takes the
//! vocabulary and fact algebra from `ontology_rules`, extracts facts with a
//! dependency oracle, renders them as first-order logic, keeps them in a
//! persistent knowledge store and exports that store as an RDF graph.
//!
//! ## Core Components
//!
//! - **extraction**: Pronoun resolution and dependency-based fact extraction
//! - **logic**: First-order-logic rendering and the session log
//! - **knowledge_base**: The fact map, its JSON persistence and bidirectional query
//! - **graph_export**: RDF/XML and Turtle projection of the knowledge base
//! - **clarification**: Questions and answers from a language model
//! - **session**: The context every operation runs in
//!
//! ## Design Philosophy
//!
//! - **Errors as Data**: A statement that yields no fact is a descriptor, not a failure
//! - **Snapshot Storage**: Every mutation rewrites the knowledge and graph files in full
//! - **Pluggable Oracles**: Parsers and language models sit behind traits

pub mod clarification;
pub mod config;
pub mod error;
pub mod extraction;
pub mod graph_export;
pub mod knowledge_base;
pub mod logic;
pub mod session;

pub use clarification::*;
pub use config::*;
pub use error::{
    ClarifyError, ConfigError, Error, ExportError, OracleError, ParseError, StoreError,
};
pub use extraction::*;
pub use graph_export::*;
pub use knowledge_base::*;
pub use logic::*;
pub use session::*;
