//! `connstr dialects` command - List known dialects.

use connstr_parse::Dialect;

use crate::config::Config;
use crate::error::CliResult;
use crate::output::{self, kv};

/// Run the dialects command
pub fn run(config: &Config) -> CliResult<()> {
    output::header("Dialects");

    for dialect in Dialect::builtin() {
        describe(dialect, "built-in");
    }
    for name in config.dialects.keys() {
        describe(&config.dialect(Some(name))?, "configured");
    }

    output::dim(&format!("Default dialect: {}", config.defaults.dialect));
    Ok(())
}

fn describe(dialect: &Dialect, origin: &str) {
    output::section(&format!("{} ({})", dialect.name(), origin));
    let keywords: Vec<&str> = dialect.recognized().iter().collect();
    if dialect.recognized().is_open() {
        kv("Keywords", "any");
    } else {
        kv("Keywords", &keywords.join(", "));
    }
    if !dialect.aliases().is_empty() {
        let mut aliases: Vec<String> = dialect
            .aliases()
            .iter()
            .map(|(alias, keyword)| format!("{} -> {}", alias, keyword))
            .collect();
        aliases.sort();
        kv("Aliases", &aliases.join(", "));
    }
    output::newline();
}
