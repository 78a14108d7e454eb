//! `connstr redact` command - Print the source without secret pairs.

use crate::cli::RedactArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::output;

/// Run the redact command
pub fn run(args: RedactArgs, config: &Config) -> CliResult<()> {
    let options = super::load_options(&args.source, config)?;
    let hidden: Vec<&str> = config
        .redact
        .keywords
        .iter()
        .chain(&args.keywords)
        .map(String::as_str)
        .collect();
    output::plain(&options.redacted(&hidden));
    Ok(())
}
