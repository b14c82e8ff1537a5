//! Dialect-independent OpenAPI ingestion: parses 2.0/3.0.x/3.1.x
//! documents into one intermediate representation, runs configured
//! transforms over it, and drives a dependency-ordered plugin
//! pipeline over an event bus.

pub mod config;
pub mod context;
pub mod dialect;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod events;
pub mod files;
pub mod filter;
pub mod identifier;
pub mod ir;
pub mod naming;
pub mod orchestrator;
pub mod plugin;
pub mod spec;
pub mod transform;
