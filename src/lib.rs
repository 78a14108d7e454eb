//! # connstr
//!
//! Grammar-exact parsing for semicolon-delimited database connection strings
//! such as `Data Source=db;Initial Catalog=app;User ID=svc;Password='p;w'`.
//!
//! connstr provides:
//! - A single-pass scanner that rejects malformed input with the byte offset
//!   of the failing pair
//! - Dialects that resolve keyword aliases and reject unknown keywords
//! - The final keyword mapping plus the ordered chain of every pair as written
//! - Typed lookups, redaction and canonical re-serialization
//!
//! ## Quick Start
//!
//! ```rust
//! use connstr::prelude::*;
//!
//! let options = ConnectionOptions::parse(
//!     "Server=db01;Database=app;Trusted_Connection=yes;Password=hunter2",
//!     Dialect::sql_server(),
//! )?;
//!
//! assert_eq!(options.get("data source"), Some("db01"));
//! assert_eq!(options.get_bool("integrated security")?, Some(true));
//! assert_eq!(options.redacted_default(), "Server=db01;Database=app;Trusted_Connection=yes;");
//! assert_eq!(
//!     options.to_connection_string()?,
//!     "data source=db01;initial catalog=app;integrated security=yes;password=hunter2"
//! );
//! # Ok::<(), connstr::ConnStrError>(())
//! ```
//!
//! ## Errors
//!
//! ```rust
//! use connstr::prelude::*;
//!
//! let err = ConnectionOptions::parse("Server=db;Password='open", Dialect::sql_server()).unwrap_err();
//! assert_eq!(err.offset(), 10);
//! assert_eq!(
//!     err.to_string(),
//!     "Format of the initialization string does not conform to specification starting at index 10."
//! );
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Low-level scanning, keyword tables and the pair chain.
pub mod parser {
    pub use connstr_parse::{assembler, builder, cache, chain, dialect, keywords, scanner};
}

/// Logging setup for applications.
pub mod logging {
    pub use connstr_parse::logging::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use connstr_parse::{
        ConnStrError, ConnStrResult, ConnectionOptions, ConnectionStringBuilder, Dialect,
        OptionsCache, SyntaxError,
    };
}

// Re-export key types at the crate root
pub use connstr_parse::{
    AliasTable, CacheStats, ConnStrError, ConnStrResult, ConnectionOptions,
    ConnectionStringBuilder, Dialect, DialectSpec, KeywordMap, PairChain, PairNode, ParsedPairs,
    RecognizedSet, SyntaxError, SyntaxErrorKind, SyntaxReport, is_key_name_valid,
    to_connection_string,
};
pub use connstr_parse::{OptionsCache, parse};
