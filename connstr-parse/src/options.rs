//! Parsed connection options.
//!
//! [`ConnectionOptions`] keeps the source string next to its parse result,
//! so it can answer typed lookups and also rebuild the source with some
//! pairs left out.
//!
//! ```rust
//! use connstr_parse::{ConnectionOptions, Dialect};
//!
//! let options = ConnectionOptions::parse(
//!     "Server=db;User ID=sa;Password=hunter2;Pooling=yes;Max Pool Size=50",
//!     Dialect::sql_server(),
//! )
//! .unwrap();
//!
//! assert_eq!(options.get("Data Source"), Some("db"));
//! assert_eq!(options.get_bool("pooling").unwrap(), Some(true));
//! assert_eq!(options.get_i32("max pool size").unwrap(), Some(50));
//! assert_eq!(options.redacted_default(), "Server=db;User ID=sa;Pooling=yes;Max Pool Size=50");
//! ```

use smol_str::SmolStr;

use crate::assembler::{KeywordMap, ParsedPairs};
use crate::builder;
use crate::chain::PairChain;
use crate::dialect::Dialect;
use crate::error::{ConnStrError, ConnStrResult, SyntaxError};

/// Keywords dropped by [`ConnectionOptions::redacted_default`].
pub const DEFAULT_REDACTED: [&str; 2] = ["password", "pwd"];

/// A parsed connection string together with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    source: String,
    dialect: SmolStr,
    mapping: KeywordMap,
    chain: PairChain,
}

impl ConnectionOptions {
    /// Parse `input` with `dialect`.
    pub fn parse(input: impl Into<String>, dialect: &Dialect) -> Result<Self, SyntaxError> {
        let source = input.into();
        let ParsedPairs { mapping, chain } = dialect.parse(&source)?;
        Ok(Self {
            source,
            dialect: SmolStr::new(dialect.name()),
            mapping,
            chain,
        })
    }

    /// The source string.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Name of the dialect the string was parsed with.
    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    /// Value of a canonical keyword, matched case-insensitively.
    ///
    /// Returns `None` both when the keyword is absent and when it was given
    /// without a value; use [`contains`](Self::contains) to tell them apart.
    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.mapping
            .get(keyword.to_lowercase().as_str())
            .and_then(Option::as_deref)
    }

    /// Check if a canonical keyword is present.
    pub fn contains(&self, keyword: &str) -> bool {
        self.mapping.contains_key(keyword.to_lowercase().as_str())
    }

    /// Number of distinct keywords.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Check if no keyword was given.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Distinct keywords in order of first appearance.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.mapping.keys().map(SmolStr::as_str)
    }

    /// Final `(keyword, value)` pairs in order of first appearance.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.mapping
            .iter()
            .map(|(keyword, value)| (keyword.as_str(), value.as_deref()))
    }

    /// The keyword mapping.
    pub fn mapping(&self) -> &KeywordMap {
        &self.mapping
    }

    /// Every accepted pair in source order.
    pub fn chain(&self) -> &PairChain {
        &self.chain
    }

    /// Boolean value of a keyword. Accepts `true`/`yes` and `false`/`no`.
    pub fn get_bool(&self, keyword: &str) -> ConnStrResult<Option<bool>> {
        let Some(value) = self.get(keyword) else {
            return Ok(None);
        };
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" => Ok(Some(true)),
            "false" | "no" => Ok(Some(false)),
            _ => Err(ConnStrError::invalid_value(
                keyword,
                format!("expected true, false, yes or no, found `{value}`"),
            )),
        }
    }

    /// Integer value of a keyword.
    pub fn get_i32(&self, keyword: &str) -> ConnStrResult<Option<i32>> {
        let Some(value) = self.get(keyword) else {
            return Ok(None);
        };
        value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConnStrError::invalid_value(keyword, format!("`{value}`: {e}")))
    }

    /// Rebuild the source without the pairs whose keyword is in `hidden`.
    ///
    /// Kept pairs are copied byte for byte, so the result parses to the same
    /// values minus the hidden ones.
    pub fn redacted(&self, hidden: &[&str]) -> String {
        let hidden: Vec<String> = hidden.iter().map(|k| k.to_lowercase()).collect();
        let mut out = String::with_capacity(self.source.len());
        for (node, span) in self.chain.spans() {
            if !hidden.iter().any(|k| k == node.keyword()) {
                out.push_str(&self.source[span]);
            }
        }
        out.push_str(&self.source[self.chain.consumed()..]);
        out
    }

    /// Rebuild the source without passwords.
    pub fn redacted_default(&self) -> String {
        self.redacted(&DEFAULT_REDACTED)
    }

    /// Parse the value of `keyword` as a connection string of `dialect`.
    ///
    /// Offsets in a syntax error are relative to the nested value.
    pub fn nested(&self, keyword: &str, dialect: &Dialect) -> ConnStrResult<Option<Self>> {
        let Some(value) = self.get(keyword) else {
            return Ok(None);
        };
        Ok(Some(Self::parse(value, dialect)?))
    }

    /// Canonical serialization of the final pairs.
    pub fn to_connection_string(&self) -> ConnStrResult<String> {
        builder::to_connection_string(self.pairs())
    }
}

impl AsRef<str> for ConnectionOptions {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
