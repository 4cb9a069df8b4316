//! # Ontology Rules
//!
//! The "vocabulary bible" crate - the closed ontology vocabulary, the fact algebra
//! and the token schema a dependency oracle has to deliver.
//! This crate is the single source of truth for what a fact can be and does not
//! contain any parsing or storage logic.

pub mod facts;
pub mod tokens;
pub mod vocabulary;

pub use facts::*;
pub use tokens::*;
pub use vocabulary::*;
