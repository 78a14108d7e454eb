//! connstr CLI - Command-line interface for inspecting connection strings.

use clap::Parser;

use connstr_cli::cli::{Cli, Command};
use connstr_cli::commands;
use connstr_cli::config::Config;
use connstr_cli::error::CliResult;
use connstr_cli::output;

fn main() {
    connstr_parse::logging::init();

    if let Err(e) = run() {
        output::report(e);
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = Config::discover(cli.config.as_deref())?;

    match cli.command {
        Command::Parse(args) => commands::parse::run(args, &config),
        Command::Normalize(args) => commands::normalize::run(args, &config),
        Command::Redact(args) => commands::redact::run(args, &config),
        Command::Dialects => commands::dialects::run(&config),
        Command::Version => commands::version::run(),
    }
}
