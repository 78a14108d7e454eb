//! `connstr normalize` command - Print the canonical form.

use crate::cli::NormalizeArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::output;

/// Run the normalize command
pub fn run(args: NormalizeArgs, config: &Config) -> CliResult<()> {
    let options = super::load_options(&args.source, config)?;
    output::plain(&options.to_connection_string()?);
    Ok(())
}
