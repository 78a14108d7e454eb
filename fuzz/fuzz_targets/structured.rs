//! Structured fuzzing for the connection string builder.
//!
//! Generates keyword/value pairs with the `arbitrary` crate, writes them with
//! the builder and checks that the scanner reads back exactly what was
//! written.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use connstr_parse::{ConnectionStringBuilder, Dialect};
use libfuzzer_sys::fuzz_target;

/// A generated pair.
#[derive(Debug, Arbitrary)]
struct FuzzPair {
    keyword: String,
    value: Option<String>,
}

fuzz_target!(|pairs: Vec<FuzzPair>| {
    let mut builder = ConnectionStringBuilder::new();
    let mut expected = Vec::new();
    for pair in pairs {
        let keyword = pair.keyword.to_lowercase();
        builder.push(keyword.as_str(), pair.value.clone());
        expected.push((keyword, pair.value));
    }

    // Keywords or values that cannot be written are rejected, never mangled.
    let Ok(text) = builder.build() else {
        return;
    };
    let parsed = Dialect::generic()
        .parse(&text)
        .unwrap_or_else(|e| panic!("builder output {text:?} rejected: {e}"));
    let actual: Vec<_> = parsed
        .chain
        .iter()
        .map(|n| (n.keyword().to_string(), n.value().map(str::to_string)))
        .collect();
    assert_eq!(actual, expected);
});
