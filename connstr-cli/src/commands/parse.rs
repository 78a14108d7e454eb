//! `connstr parse` command - Show the pairs of a connection string.

use serde::Serialize;

use connstr_parse::{ConnectionOptions, KeywordMap};

use crate::cli::{OutputFormat, ParseArgs};
use crate::config::{Config, RedactConfig};
use crate::error::CliResult;
use crate::output::{self, kv};

/// JSON form of a parse result
#[derive(Debug, Serialize)]
struct ParseReport<'a> {
    dialect: &'a str,
    pairs: Vec<PairReport<'a>>,
    mapping: KeywordMap,
}

/// One chain node in JSON output
#[derive(Debug, Serialize)]
struct PairReport<'a> {
    keyword: &'a str,
    value: Option<&'a str>,
    start: usize,
    end: usize,
}

/// Run the parse command
pub fn run(args: ParseArgs, config: &Config) -> CliResult<()> {
    let options = super::load_options(&args.source, config)?;
    let mask = Mask {
        redact: &config.redact,
        reveal: args.reveal,
    };

    match args.format {
        OutputFormat::Json => print_json(&options, &mask),
        OutputFormat::Text => {
            print_text(&options, &mask);
            Ok(())
        }
    }
}

/// Decides which values are shown.
struct Mask<'a> {
    redact: &'a RedactConfig,
    reveal: bool,
}

impl Mask<'_> {
    fn hides(&self, keyword: &str) -> bool {
        !self.reveal && self.redact.hides(keyword)
    }

    fn apply<'v>(&self, keyword: &str, value: Option<&'v str>) -> Option<&'v str> {
        if self.hides(keyword) && value.is_some() {
            Some("****")
        } else {
            value
        }
    }
}

fn print_json(options: &ConnectionOptions, mask: &Mask<'_>) -> CliResult<()> {
    let report = ParseReport {
        dialect: options.dialect(),
        pairs: options
            .chain()
            .spans()
            .map(|(node, span)| PairReport {
                keyword: node.keyword(),
                value: mask.apply(node.keyword(), node.value()),
                start: span.start,
                end: span.end,
            })
            .collect(),
        mapping: options
            .mapping()
            .iter()
            .map(|(keyword, value)| {
                let value = mask.apply(keyword, value.as_deref()).map(str::to_string);
                (keyword.clone(), value)
            })
            .collect(),
    };
    output::plain(&serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(options: &ConnectionOptions, mask: &Mask<'_>) {
    output::header("Connection String");
    kv("Dialect", options.dialect());
    kv("Length", &options.as_str().len().to_string());
    output::newline();

    output::section("Pairs");
    for (node, span) in options.chain().spans() {
        let value = if mask.hides(node.keyword()) && node.value().is_some() {
            output::style_masked()
        } else {
            output::style_value(node.value())
        };
        output::list_item(&format!("{} = {} [{}..{}]", node.keyword(), value, span.start, span.end));
    }
    output::newline();

    output::section("Keywords");
    for (keyword, value) in options.pairs() {
        let value = if mask.hides(keyword) && value.is_some() {
            output::style_masked()
        } else {
            output::style_value(value)
        };
        kv(keyword, &value);
    }
    output::newline();
    output::success(&format!(
        "{} pairs, {} keywords",
        options.chain().len(),
        options.len()
    ));
}
