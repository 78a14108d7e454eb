//! Styled terminal output utilities.

use owo_colors::OwoColorize;

/// Print a header/title
pub fn header(text: &str) {
    println!();
    println!("{}", text.bold().cyan());
    println!("{}", "─".repeat(text.chars().count()).dimmed());
    println!();
}

/// Print a section header
pub fn section(text: &str) {
    println!("{}", text.bold().white());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Print a list item
pub fn list_item(text: &str) {
    println!("  {} {}", "•".dimmed(), text);
}

/// Print a success message
pub fn success(text: &str) {
    println!("{} {}", "✔".green().bold(), text.green());
}

/// Print a newline
pub fn newline() {
    println!();
}

/// Print dimmed text
pub fn dim(text: &str) {
    println!("{}", text.dimmed());
}

/// Print unstyled text, for output meant to be piped
pub fn plain(text: &str) {
    println!("{}", text);
}

/// Render an error with its diagnostic to stderr
pub fn report(err: impl miette::Diagnostic + Send + Sync + 'static) {
    eprintln!("{:?}", miette::Report::new(err));
}

/// Render a connection string value for display
pub fn style_value(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{:?}", value).green().to_string(),
        None => "(no value)".dimmed().to_string(),
    }
}

/// Render a masked value
pub fn style_masked() -> String {
    "****".yellow().to_string()
}
