//! Error kinds shared by every stage of the ingestion and emission pipeline.

use miette::Diagnostic;
use thiserror::Error;

/// The top-level error type returned by fallible core operations.
///
/// Each variant corresponds to one of the error kinds in the error
/// handling design: a spec that can't be recognized, a dangling
/// reference, a broadcast that a plugin failed to handle, and so on.
/// Enough context travels with each variant (the offending `$ref`,
/// plugin name, or event) to render a useful diagnostic without the
/// caller having to re-derive it.
#[derive(Debug, Error, Diagnostic)]
pub enum LoomError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid OpenAPI document: {0}")]
    Spec(#[from] SpecError),

    #[error("reference not found: {pointer}")]
    RefNotFound {
        pointer: String,
        #[source]
        cause: Option<loomkit_pointer::BadJsonPointer>,
    },

    #[error("failed to parse schema at {path}")]
    Parse {
        path: String,
        #[source]
        cause: ParseError,
    },

    #[error(transparent)]
    Broadcast(#[from] BroadcastError),

    #[error("emission error: {0}")]
    Emission(#[from] EmissionError),

    #[error("failed to deserialize spec document")]
    Deserialize(#[from] SerdeError),
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("plugin `{plugin}` depends on `{dependency}`, which isn't configured")]
    MissingDependency { plugin: String, dependency: String },

    #[error("plugin dependency cycle: {}", .cycle.join(" -> "))]
    DependencyCycle { cycle: Vec<String> },

    #[error("output path `{path}` is invalid: {reason}")]
    InvalidOutputPath { path: String, reason: String },
}

#[derive(Debug, Error, Diagnostic)]
pub enum SpecError {
    #[error("unrecognized OpenAPI version `{found}`; expected 2.0, 3.0.x, or 3.1.x")]
    UnrecognizedVersion { found: String },

    #[error("document declares neither `swagger` nor `openapi`")]
    MissingVersion,

    #[error("malformed root document: {reason}")]
    MalformedRoot { reason: String },
}

/// A schema object that couldn't be normalized into the IR.
///
/// Per the error handling policy, this is recoverable: when
/// strictness is off, the caller substitutes an `unknown` schema
/// and logs a warning through [`crate::diagnostics::Diagnostics`]
/// instead of propagating this error.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("unsupported JSON Schema keyword `{keyword}`")]
    UnsupportedKeyword { keyword: String },

    #[error("schema has no recognizable shape")]
    UnrecognizedShape,
}

#[derive(Debug, Error, Diagnostic)]
#[error("plugin `{plugin_name}` failed while handling `{event}` ({args})")]
pub struct BroadcastError {
    pub event: String,
    pub plugin_name: String,
    /// A rendered descriptor of the payload the failing subscriber was
    /// handling (e.g. `schema #/components/schemas/Pet`), since the
    /// payload itself borrows from the IR and can't outlive the
    /// broadcast call that produced it.
    pub args: String,
    #[source]
    pub cause: Box<LoomError>,
}

#[derive(Debug, Error, Diagnostic)]
pub enum EmissionError {
    #[error(
        "identifier collision for `{base_name}` in file `{file_id}`, namespace `{namespace}`: \
         exhausted disambiguation suffixes"
    )]
    UnresolvableCollision {
        base_name: String,
        file_id: String,
        namespace: String,
    },

    #[error("failed to write `{path}`")]
    Write {
        path: String,
        #[source]
        cause: std::io::Error,
    },
}

/// Wraps [`serde_path_to_error`]'s path-annotated deserialization
/// failures for both YAML and JSON spec documents.
#[derive(Debug, Error, Diagnostic)]
#[error("{path}: {cause}")]
pub struct SerdeError {
    pub path: String,
    #[source]
    pub cause: serde_yaml::Error,
}

impl From<serde_path_to_error::Error<serde_yaml::Error>> for SerdeError {
    fn from(error: serde_path_to_error::Error<serde_yaml::Error>) -> Self {
        Self {
            path: error.path().to_string(),
            cause: error.into_inner(),
        }
    }
}
