//! Knowledge Base module - long-term memory of extracted facts.
//!
//! The knowledge base consists of:
//! - **Base**: the in-memory map subject -> relation -> objects
//! - **Report**: the bidirectional view of one entity
//! - **Store**: the base bound to its knowledge file and graph file

mod base;
mod report;
mod store;

pub use base::*;
pub use report::*;
pub use store::*;
