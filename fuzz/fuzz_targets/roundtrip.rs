//! Fuzz target for canonical re-serialization.
//!
//! Any string that parses must serialize to a string that parses back to
//! the same mapping and serializes identically again.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_roundtrip
//! ```

#![no_main]

use connstr_parse::{ConnectionOptions, Dialect};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &str| {
    let Ok(options) = ConnectionOptions::parse(input, Dialect::generic()) else {
        return;
    };
    let Ok(text) = options.to_connection_string() else {
        return;
    };
    let reparsed = ConnectionOptions::parse(text.as_str(), Dialect::generic())
        .unwrap_or_else(|e| panic!("canonical form {text:?} rejected: {e}"));
    assert_eq!(reparsed.mapping(), options.mapping());
    assert_eq!(reparsed.to_connection_string().ok().as_deref(), Some(text.as_str()));

    let redacted = options.redacted_default();
    let reparsed = ConnectionOptions::parse(redacted.as_str(), Dialect::generic())
        .unwrap_or_else(|e| panic!("redacted form {redacted:?} rejected: {e}"));
    assert!(!reparsed.contains("password"));
});
