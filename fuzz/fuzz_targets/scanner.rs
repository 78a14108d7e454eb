//! Fuzz target for the connection string scanner.
//!
//! Feeds arbitrary strings to the scanner and the assembler and checks that
//! neither panics and that pair spans tile the consumed input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_scanner
//! ```

#![no_main]

use connstr_parse::{Dialect, Scanner};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &str| {
    let mut end = 0;
    let mut failed = false;
    for scanned in Scanner::new(input).pairs() {
        match scanned {
            Ok(scanned) => {
                assert_eq!(scanned.span.start, end);
                assert!(scanned.span.end > scanned.span.start);
                assert!(scanned.span.end <= input.len());
                assert!(scanned.pair.offset >= scanned.span.start);
                assert!(scanned.pair.offset < scanned.span.end);
                end = scanned.span.end;
            }
            Err(err) => {
                assert!(err.offset() >= end);
                assert!(err.offset() <= input.len());
                failed = true;
            }
        }
    }

    match Dialect::generic().parse(input) {
        Ok(parsed) => {
            assert!(!failed);
            assert_eq!(parsed.chain.consumed(), end);
            assert!(input[end..].chars().all(|c| c == ';' || c == '\0' || c.is_whitespace()));
        }
        Err(_) => assert!(failed),
    }
});
