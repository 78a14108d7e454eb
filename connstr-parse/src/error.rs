//! Error types for connection string parsing.
//!
//! Parsing fails fast: the first problem found ends the whole parse and is
//! reported as a [`SyntaxError`]. Everything that is not the pure parse
//! (writing strings back out, typed value conversion, dialect lookup) reports
//! a [`ConnStrError`].

use std::fmt;

use miette::{Diagnostic, LabeledSpan, SourceSpan};
use thiserror::Error;

/// Result type for operations beyond the raw parse.
pub type ConnStrResult<T> = Result<T, ConnStrError>;

/// A connection string was rejected.
///
/// Both variants carry the byte offset of the start of the pair that was
/// being scanned when the failure occurred, not the offset of the offending
/// character.
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SyntaxError {
    /// The input does not follow the connection string grammar.
    #[error(
        "Format of the initialization string does not conform to specification starting at index {offset}."
    )]
    #[diagnostic(
        code(connstr::malformed_syntax),
        help("check the quoting and escapes in this pair")
    )]
    MalformedSyntax {
        /// Start of the failing pair.
        offset: usize,
    },

    /// The key parsed, but no recognized keyword matches it.
    #[error("Keyword not supported: '{raw_key}'.")]
    #[diagnostic(code(connstr::unsupported_keyword))]
    UnsupportedKeyword {
        /// The key as written (trimmed and lower-cased), before alias resolution.
        raw_key: String,
        /// Start of the pair holding the key.
        offset: usize,
    },
}

/// The failure category of a [`SyntaxError`], without its position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxErrorKind {
    /// See [`SyntaxError::MalformedSyntax`].
    MalformedSyntax,
    /// See [`SyntaxError::UnsupportedKeyword`].
    UnsupportedKeyword(String),
}

impl SyntaxError {
    pub(crate) fn malformed(offset: usize) -> Self {
        Self::MalformedSyntax { offset }
    }

    pub(crate) fn unsupported(raw_key: impl Into<String>, offset: usize) -> Self {
        Self::UnsupportedKeyword {
            raw_key: raw_key.into(),
            offset,
        }
    }

    /// Byte offset of the start of the failing pair.
    pub fn offset(&self) -> usize {
        match self {
            Self::MalformedSyntax { offset } | Self::UnsupportedKeyword { offset, .. } => *offset,
        }
    }

    /// The failure category.
    pub fn kind(&self) -> SyntaxErrorKind {
        match self {
            Self::MalformedSyntax { .. } => SyntaxErrorKind::MalformedSyntax,
            Self::UnsupportedKeyword { raw_key, .. } => {
                SyntaxErrorKind::UnsupportedKeyword(raw_key.clone())
            }
        }
    }

    /// Attach the rejected input so the error can be rendered with a label
    /// pointing into it.
    pub fn with_source(self, input: impl Into<String>) -> SyntaxReport {
        let src = input.into();
        let span = failing_span(&src, self.offset());
        SyntaxReport {
            error: self,
            src,
            span,
        }
    }
}

/// Span from `offset` to the end of the failing pair.
fn failing_span(src: &str, offset: usize) -> SourceSpan {
    let start = offset.min(src.len());
    let rest = src.get(start..).unwrap_or_default();
    (start, pair_len(rest)).into()
}

/// Length of the pair at the start of `rest`. Keys may hold `;`, a quoted
/// value is skipped whole, and the pair ends at the next `;` after that. An
/// unclosed quote runs to the end of input.
fn pair_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut i = 0;

    loop {
        match bytes.get(i) {
            None => return rest.len(),
            Some(b'=') if bytes.get(i + 1) == Some(&b'=') => i += 2,
            Some(b'=') => {
                i += 1;
                break;
            }
            Some(_) => i += 1,
        }
    }

    let value = &rest[i..];
    i += value.len() - value.trim_start().len();

    if let Some(&quote @ (b'"' | b'\'')) = bytes.get(i) {
        i += 1;
        loop {
            match bytes.get(i) {
                None => return rest.len(),
                Some(&b) if b == quote && bytes.get(i + 1) == Some(&quote) => i += 2,
                Some(&b) if b == quote => {
                    i += 1;
                    break;
                }
                Some(_) => i += 1,
            }
        }
    }

    i + rest[i..].find(';').unwrap_or(rest.len() - i)
}

/// A [`SyntaxError`] together with the input it was raised for.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct SyntaxReport {
    error: SyntaxError,
    src: String,
    span: SourceSpan,
}

impl SyntaxReport {
    /// The underlying error.
    pub fn error(&self) -> &SyntaxError {
        &self.error
    }

    /// The labelled span within the source.
    pub fn span(&self) -> SourceSpan {
        self.span
    }
}

impl Diagnostic for SyntaxReport {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.error.code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.error.help()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = match &self.error {
            SyntaxError::MalformedSyntax { .. } => "pair starts here".to_string(),
            SyntaxError::UnsupportedKeyword { raw_key, .. } => {
                format!("`{raw_key}` is not a keyword of this dialect")
            }
        };
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(label),
            self.span,
        ))))
    }
}

/// Errors outside of the raw parse.
#[derive(Error, Debug, Diagnostic)]
pub enum ConnStrError {
    /// The input was rejected by the parser.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    /// A keyword cannot be written to a connection string.
    #[error("keyword `{0}` cannot be written to a connection string")]
    #[diagnostic(code(connstr::invalid_keyword))]
    InvalidKeyword(String),

    /// A value cannot be written or converted.
    #[error("invalid value for `{keyword}`: {message}")]
    #[diagnostic(code(connstr::invalid_value))]
    InvalidValue { keyword: String, message: String },

    /// No dialect with this name is known.
    #[error("unknown dialect `{0}`")]
    #[diagnostic(code(connstr::unknown_dialect))]
    UnknownDialect(String),
}

impl ConnStrError {
    /// Create an invalid value error.
    pub fn invalid_value(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            keyword: keyword.into(),
            message: message.into(),
        }
    }
}
