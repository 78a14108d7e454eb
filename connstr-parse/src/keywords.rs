//! Keyword tables: alias resolution and the recognized keyword set.

use std::collections::HashMap;

use indexmap::IndexSet;
use smol_str::SmolStr;

/// Immutable map from lower-cased alias to canonical keyword.
///
/// An empty table resolves every key to itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: HashMap<SmolStr, SmolStr>,
}

impl AliasTable {
    /// A table without aliases.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Look up the canonical keyword for an already lower-cased key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.aliases.get(key).map(SmolStr::as_str)
    }

    /// Resolve `key`, falling back to the key itself.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Check if the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Iterate over `(alias, canonical)` entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }
}

impl<A, C> FromIterator<(A, C)> for AliasTable
where
    A: AsRef<str>,
    C: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (A, C)>>(iter: I) -> Self {
        let aliases = iter
            .into_iter()
            .map(|(alias, canonical)| {
                (
                    SmolStr::new(alias.as_ref().to_lowercase()),
                    SmolStr::new(canonical.as_ref()),
                )
            })
            .collect();
        Self { aliases }
    }
}

/// The canonical keywords a dialect accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizedSet {
    /// `None` accepts any structurally valid keyword.
    keywords: Option<IndexSet<SmolStr>>,
}

impl RecognizedSet {
    /// Accept any keyword that passes [`is_key_name_valid`].
    pub fn any() -> Self {
        Self { keywords: None }
    }

    /// Check whether `keyword` is recognized.
    pub fn contains(&self, keyword: &str) -> bool {
        is_key_name_valid(keyword)
            && self
                .keywords
                .as_ref()
                .is_none_or(|keywords| keywords.contains(keyword))
    }

    /// Check if any keyword is accepted.
    pub fn is_open(&self) -> bool {
        self.keywords.is_none()
    }

    /// Iterate over the fixed keywords in declaration order. Empty for
    /// [`RecognizedSet::any`].
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().flatten().map(SmolStr::as_str)
    }
}

impl<K: AsRef<str>> FromIterator<K> for RecognizedSet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keywords: Some(iter.into_iter().map(|k| SmolStr::new(k.as_ref())).collect()),
        }
    }
}

/// Structural check applied to every canonical keyword.
///
/// A keyword must be non-empty, must not start with `;` or whitespace and
/// must not contain NUL.
pub fn is_key_name_valid(keyword: &str) -> bool {
    match keyword.chars().next() {
        Some(first) => first != ';' && !first.is_whitespace() && !keyword.contains('\0'),
        None => false,
    }
}
