//! A small progress/warning sink, decoupled from `println!`.
//!
//! The dialect parsers and the plugin orchestrator report
//! human-readable progress and recoverable-error warnings through
//! this trait rather than writing to stdout directly, so that tests
//! can capture diagnostics instead of scraping terminal output, and
//! so a CLI host can route them through its own logging setup.

use std::fmt;

/// A single diagnostic emitted during parsing, transformation, or
/// emission.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    Info,
    Warning,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.level {
            Level::Info => "info",
            Level::Warning => "warning",
        };
        write!(f, "{prefix}: {}", self.message)
    }
}

/// A sink that receives diagnostics as the pipeline runs.
pub trait Diagnostics {
    fn emit(&mut self, diagnostic: Diagnostic);

    fn info(&mut self, message: impl Into<String>) {
        self.emit(Diagnostic {
            level: Level::Info,
            message: message.into(),
        });
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.emit(Diagnostic {
            level: Level::Warning,
            message: message.into(),
        });
    }
}

/// Prints diagnostics to stderr, prefixed by level. This is what a
/// CLI host wires up by default.
#[derive(Debug, Default)]
pub struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn emit(&mut self, diagnostic: Diagnostic) {
        eprintln!("{diagnostic}");
    }
}

/// Collects diagnostics in memory, for tests that assert on warnings
/// without capturing stdout/stderr.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    pub records: Vec<Diagnostic>,
}

impl Diagnostics for RecordingDiagnostics {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.records.push(diagnostic);
    }
}

impl RecordingDiagnostics {
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(|d| d.level == Level::Warning)
            .map(|d| d.message.as_str())
    }
}
