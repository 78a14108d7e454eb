//! CLI error types and result alias.

use connstr_parse::{ConnStrError, SyntaxReport};
use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(connstr::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(connstr::config))]
    Config(String),

    /// Bad command input
    #[error("Input error: {0}")]
    #[diagnostic(code(connstr::input))]
    Input(String),

    /// The connection string was rejected, with the source attached
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(SyntaxReport),

    /// Any other connection string error
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConnStr(#[from] ConnStrError),

    /// Output could not be produced
    #[error("Output error: {0}")]
    #[diagnostic(code(connstr::output))]
    Output(String),
}

impl From<SyntaxReport> for CliError {
    fn from(report: SyntaxReport) -> Self {
        CliError::Syntax(report)
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output(format!("Failed to serialize JSON: {}", err))
    }
}
