//! Canonical connection string serialization.
//!
//! Output written here parses back to the same keywords and values. Values
//! are left bare whenever the scanner would read them back unchanged and
//! quoted otherwise.
//!
//! ```rust
//! use connstr_parse::ConnectionStringBuilder;
//!
//! let mut builder = ConnectionStringBuilder::new();
//! builder
//!     .push("data source", "db01".to_string())
//!     .push("password", "a;b".to_string())
//!     .push("pooling", None);
//!
//! assert_eq!(builder.build().unwrap(), r#"data source=db01;password="a;b";pooling="#);
//! ```

use std::borrow::Cow;

use smol_str::SmolStr;

use crate::error::{ConnStrError, ConnStrResult};
use crate::keywords::is_key_name_valid;

/// Collects pairs and serializes them in push order.
#[derive(Debug, Clone, Default)]
pub struct ConnectionStringBuilder {
    pairs: Vec<(SmolStr, Option<String>)>,
}

impl ConnectionStringBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. Pass `None` for a keyword without a value.
    pub fn push(
        &mut self,
        keyword: impl Into<SmolStr>,
        value: impl Into<Option<String>>,
    ) -> &mut Self {
        self.pairs.push((keyword.into(), value.into()));
        self
    }

    /// Number of pairs pushed so far.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if nothing was pushed.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serialize the collected pairs joined by `;`.
    ///
    /// # Errors
    ///
    /// See [`write_pair`].
    pub fn build(&self) -> ConnStrResult<String> {
        to_connection_string(
            self.pairs
                .iter()
                .map(|(keyword, value)| (keyword.as_str(), value.as_deref())),
        )
    }
}

impl<K, V> Extend<(K, V)> for ConnectionStringBuilder
where
    K: Into<SmolStr>,
    V: Into<Option<String>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.pairs
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

/// Serialize pairs in iteration order.
///
/// # Errors
///
/// See [`write_pair`].
pub fn to_connection_string<'a, I>(pairs: I) -> ConnStrResult<String>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut out = String::new();
    for (index, (keyword, value)) in pairs.into_iter().enumerate() {
        if index > 0 {
            out.push(';');
        }
        write_pair(&mut out, keyword, value)?;
    }
    Ok(out)
}

/// Append one `keyword=value` pair to `out`.
///
/// # Errors
///
/// [`ConnStrError::InvalidKeyword`] when the keyword could not be read back:
/// it fails [`is_key_name_valid`], ends in whitespace or holds a
/// non-whitespace control character. [`ConnStrError::InvalidValue`] when
/// the value contains NUL.
pub fn write_pair(out: &mut String, keyword: &str, value: Option<&str>) -> ConnStrResult<()> {
    out.push_str(&escape_keyword(keyword)?);
    out.push('=');

    let Some(value) = value else {
        return Ok(());
    };
    if value.contains('\0') {
        return Err(ConnStrError::invalid_value(keyword, "value contains NUL"));
    }
    if !needs_quoting(value) {
        out.push_str(value);
        return Ok(());
    }

    let quote = if value.contains('"') && !value.contains('\'') {
        '\''
    } else {
        '"'
    };
    out.push(quote);
    for c in value.chars() {
        if c == quote {
            out.push(quote);
        }
        out.push(c);
    }
    out.push(quote);
    Ok(())
}

/// Escape `=` in a keyword by doubling it.
pub fn escape_keyword(keyword: &str) -> ConnStrResult<Cow<'_, str>> {
    let readable = is_key_name_valid(keyword)
        && !keyword.ends_with(char::is_whitespace)
        && !keyword.contains(|c: char| c.is_control() && !c.is_whitespace());
    if !readable {
        return Err(ConnStrError::InvalidKeyword(keyword.to_string()));
    }
    if keyword.contains('=') {
        Ok(Cow::Owned(keyword.replace('=', "==")))
    } else {
        Ok(Cow::Borrowed(keyword))
    }
}

/// Check whether a value must be quoted to survive a round trip.
pub fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.starts_with(['"', '\'', '='])
        || value.ends_with(['"', '\''])
        || value.contains(|c: char| c == ';' || c.is_control())
}
