//! Drives the scanner over a whole string and builds the keyword mapping.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::chain::{PairChain, PairChainBuilder};
use crate::error::SyntaxError;
use crate::keywords::{AliasTable, RecognizedSet};
use crate::scanner::{RawPair, ScannedPair, Scanner};

/// Canonical keyword to value, in order of first appearance.
pub type KeywordMap = IndexMap<SmolStr, Option<String>>;

/// The result of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPairs {
    /// One entry per keyword; a repeated keyword keeps its last value.
    pub mapping: KeywordMap,
    /// Every accepted pair in source order.
    pub chain: PairChain,
}

impl ParsedPairs {
    /// Split into the mapping and the chain.
    pub fn into_parts(self) -> (KeywordMap, PairChain) {
        (self.mapping, self.chain)
    }

    /// Value of a canonical keyword. `Some(None)` means the keyword was given
    /// without a value.
    pub fn get(&self, keyword: &str) -> Option<Option<&str>> {
        self.mapping.get(keyword).map(Option::as_deref)
    }
}

/// Parse a connection string.
///
/// Each key is resolved through `aliases` (falling back to the key itself)
/// and must then be in `recognized`. When a keyword appears more than once
/// the last pair wins in the mapping, while the chain keeps every pair.
///
/// # Errors
///
/// Returns the first [`SyntaxError`] met; nothing is returned for the pairs
/// before it.
///
/// ```rust
/// use connstr_parse::{parse, AliasTable, RecognizedSet};
///
/// let aliases: AliasTable = [("pwd", "password")].into_iter().collect();
/// let parsed = parse("user=sa;PWD='x;y';user=admin", &aliases, &RecognizedSet::any()).unwrap();
///
/// assert_eq!(parsed.get("password"), Some(Some("x;y")));
/// assert_eq!(parsed.get("user"), Some(Some("admin")));
/// assert_eq!(parsed.chain.len(), 3);
/// ```
pub fn parse(
    input: &str,
    aliases: &AliasTable,
    recognized: &RecognizedSet,
) -> Result<ParsedPairs, SyntaxError> {
    debug!(input_len = input.len(), "connstr::parse()");

    let mut mapping = KeywordMap::new();
    let mut chain = PairChainBuilder::new();

    for scanned in Scanner::new(input).pairs() {
        let scanned = scanned?;
        let length = scanned.consumed_len();
        let ScannedPair {
            pair: RawPair { key, value, offset },
            ..
        } = scanned;

        let keyword = aliases.resolve(&key);
        if !recognized.contains(keyword) {
            debug!(offset, "unsupported keyword");
            return Err(SyntaxError::unsupported(key, offset));
        }
        let keyword = SmolStr::new(keyword);

        trace!(
            keyword = %keyword,
            value_len = value.as_ref().map_or(0, String::len),
            consumed = length,
            "pair accepted"
        );
        mapping.insert(keyword.clone(), value.clone());
        chain.push(keyword, value, length);
    }

    let chain = chain.finish();
    debug!(pairs = chain.len(), keywords = mapping.len(), "connection string parsed");
    Ok(ParsedPairs { mapping, chain })
}
