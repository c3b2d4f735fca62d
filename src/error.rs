//! Error handling for rtg-template.
//! Defines the error type and result alias used throughout the application.
//!
//! Every variant here is fatal for the pipeline. Stages that are allowed to
//! fail after the template is materialized still return these errors, but
//! their callers downgrade them to a `log::warn!`.

use thiserror::Error;

/// Main error type for rtg-template operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Project name failed validation.
    #[error("Invalid project name '{name}': {reason}.")]
    InvalidProjectName { name: String, reason: String },

    /// Template is absent from the registry.
    #[error("Template \"{template}\" not found. Available templates: {available}.")]
    UnknownTemplate { template: String, available: String },

    /// Selected add-ons are not supported by the chosen template.
    #[error(
        "Template \"{template}\" does not support the following addons: {unsupported}. Supported addons: {supported}."
    )]
    UnsupportedAddons {
        template: String,
        unsupported: String,
        supported: String,
    },

    /// Output directory is already occupied.
    #[error("Directory \"{target}\" already exists.")]
    TargetExists { target: String },

    /// Local template source could not be resolved.
    #[error("Template not found. Tried paths: {tried}.")]
    TemplateNotFound { tried: String },

    /// A required positional argument was not given.
    #[error("{0} is required.")]
    MissingArgument(String),

    /// Represents errors that occur while materializing or rendering a template.
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents errors in the template registry document.
    #[error("Registry error: {0}.")]
    RegistryError(String),

    /// Represents failures of external commands run after materialization.
    #[error("Command '{command}' failed: {reason}.")]
    CommandError { command: String, reason: String },

    /// Represents errors raised by interactive prompts.
    #[error("Prompt error: {0}.")]
    PromptError(String),

    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("Render error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Directory walk error: {0}.")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Glob pattern error: {0}.")]
    GlobSetError(#[from] globset::Error),

    #[error("Regex error: {0}.")]
    RegexError(#[from] regex::Error),
}

/// Convenience type alias for rtg-template operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("Error: {err}");
    std::process::exit(1);
}
