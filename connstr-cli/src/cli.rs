//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// connstr - inspect connection strings
#[derive(Parser, Debug)]
#[command(name = "connstr")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "connstr - parse, normalize and redact connection strings", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to ./connstr.toml when present)
    #[arg(long, global = true, env = "CONNSTR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a connection string and show its pairs
    Parse(ParseArgs),

    /// Print the canonical form of a connection string
    Normalize(NormalizeArgs),

    /// Print a connection string with secret pairs removed
    Redact(RedactArgs),

    /// List known dialects
    Dialects,

    /// Display version information
    Version,
}

/// Where the connection string comes from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Connection string (`-` reads standard input)
    #[arg(required_unless_present = "name", conflicts_with = "name")]
    pub input: Option<String>,

    /// Named connection from the configuration file
    #[arg(short, long)]
    pub name: Option<String>,

    /// Dialect to parse with (entity, sqlserver, generic or a configured one)
    #[arg(short, long)]
    pub dialect: Option<String>,
}

// =============================================================================
// Parse Command
// =============================================================================

/// Arguments for the `parse` command
#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Show values of redacted keywords instead of masking them
    #[arg(long)]
    pub reveal: bool,
}

/// Output formats for `parse`
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// =============================================================================
// Normalize Command
// =============================================================================

/// Arguments for the `normalize` command
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

// =============================================================================
// Redact Command
// =============================================================================

/// Arguments for the `redact` command
#[derive(Args, Debug)]
pub struct RedactArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Additional keyword to remove (repeatable)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,
}
