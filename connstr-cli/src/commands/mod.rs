//! CLI command implementations.

pub mod dialects;
pub mod normalize;
pub mod parse;
pub mod redact;
pub mod version;

use std::io::Read;

use connstr_parse::ConnectionOptions;

use crate::cli::SourceArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Read the connection string named by `source` and parse it.
///
/// Syntax errors carry the source so they render with a label.
pub(crate) fn load_options(source: &SourceArgs, config: &Config) -> CliResult<ConnectionOptions> {
    let input = match (&source.input, &source.name) {
        (Some(input), _) if input == "-" => read_stdin()?,
        (Some(input), _) => input.clone(),
        (None, Some(name)) => config.connection(name)?.to_string(),
        (None, None) => {
            return Err(CliError::Input(
                "a connection string or --name is required".to_string(),
            ));
        }
    };
    let dialect = config.dialect(source.dialect.as_deref())?;
    ConnectionOptions::parse(input.as_str(), &dialect).map_err(|e| e.with_source(input).into())
}

fn read_stdin() -> CliResult<String> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let trimmed = input.trim_end_matches(['\n', '\r']).len();
    input.truncate(trimmed);
    Ok(input)
}
