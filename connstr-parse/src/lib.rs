//! # connstr-parse
//!
//! Scanner and assembler for semicolon-delimited `keyword=value`
//! connection strings.
//!
//! This crate provides:
//! - A single-pass, grammar-exact scanner with byte-offset error reporting
//! - Keyword alias resolution and recognized-keyword checks per dialect
//! - The keyword mapping plus an ordered chain of every accepted pair
//! - Typed option lookup, redaction and canonical re-serialization
//!
//! ## Example
//!
//! ```rust
//! use connstr_parse::{ConnectionOptions, Dialect};
//!
//! let options = ConnectionOptions::parse(
//!     "Data Source=db;Initial Catalog=app;Password='p;w''d'",
//!     Dialect::sql_server(),
//! )
//! .unwrap();
//!
//! assert_eq!(options.get("password"), Some("p;w'd"));
//! assert_eq!(options.redacted_default(), "Data Source=db;Initial Catalog=app;");
//! ```

pub mod assembler;
pub mod builder;
pub mod cache;
pub mod chain;
pub mod dialect;
pub mod error;
pub mod keywords;
pub mod logging;
pub mod options;
pub mod scanner;

pub use assembler::{KeywordMap, ParsedPairs, parse};
pub use builder::{ConnectionStringBuilder, to_connection_string};
pub use cache::{CacheStats, OptionsCache};
pub use chain::{PairChain, PairChainBuilder, PairNode};
pub use dialect::{Dialect, DialectSpec};
pub use error::{ConnStrError, ConnStrResult, SyntaxError, SyntaxErrorKind, SyntaxReport};
pub use keywords::{AliasTable, RecognizedSet, is_key_name_valid};
pub use options::ConnectionOptions;
pub use scanner::{RawPair, ScanStep, Scanner};
