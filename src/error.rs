//! Error handling for gnome-ext.
//! Defines the error taxonomy and result type used throughout the application.

use std::fmt;
use std::io;
use thiserror::Error;

use crate::output;

/// Stages of the `create` pipeline, used to name the failing step in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Derive,
    Resolve,
    Conflict,
    Materialize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Derive => "derive",
            Stage::Resolve => "resolve",
            Stage::Conflict => "conflict",
            Stage::Materialize => "materialize",
        };
        f.write_str(name)
    }
}

/// Custom error types for gnome-ext operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing required input.
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// The requested template variant has no directory under the templates root.
    #[error("Template '{variant}' not found at '{searched_path}'.")]
    TemplateNotFoundError { variant: String, searched_path: String },

    /// A marked template file failed to parse or render.
    #[error("Failed to render template '{file}': {source}.")]
    TemplateRenderError {
        file: String,
        #[source]
        source: minijinja::Error,
    },

    /// A read, write, copy or traversal failed on a specific path.
    #[error("Filesystem error at '{path}': {source}.")]
    FilesystemError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    /// An external tool could not be started or exited unsuccessfully.
    #[error("Command '{command}' failed: {reason}.")]
    ProcessError { command: String, reason: String },

    #[error("Metadata error: {0}.")]
    MetadataError(String),

    #[error("'{project_dir}' is not an extension project: package.json not found.")]
    NotAnExtensionProjectError { project_dir: String },

    /// A failure of one `create` pipeline stage.
    #[error("{stage} failed: {source}")]
    StageError {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Builds a `FilesystemError` for `path`, for use with `map_err`.
    pub fn fs<P: AsRef<std::path::Path>>(path: P) -> impl FnOnce(io::Error) -> Error {
        let path = path.as_ref().display().to_string();
        move |source| Error::FilesystemError { path, source }
    }

    /// Tags the error with the pipeline stage it escaped from.
    pub fn during(self, stage: Stage) -> Error {
        match self {
            Error::StageError { .. } => self,
            other => Error::StageError { stage, source: Box::new(other) },
        }
    }

    /// Returns the error underneath any stage tag.
    pub fn root(&self) -> &Error {
        match self {
            Error::StageError { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Prints a single coloured line to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    output::error(&err.to_string());
    std::process::exit(1);
}
