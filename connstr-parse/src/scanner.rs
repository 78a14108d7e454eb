//! Single-pass scanner for connection string pairs.
//!
//! The scanner is a character-level state machine. One call to
//! [`Scanner::scan_at`] extracts the next key/value pair starting at a byte
//! offset and reports where scanning should resume. It looks at one character
//! at a time and never backtracks.
//!
//! The accepted language is:
//!
//! ```text
//! [\s;]*
//! (?<key>([^=\s\p{Cc}]|\s+[^=\s\p{Cc}]|\s+==|==)+)
//! \s*=(?!=)\s*
//! (?<value>
//!     "([^"\u0000]|"")*"
//!   | '([^'\u0000]|'')*'
//!   | (?![\"'\s])([^;\s\p{Cc}]|\s+[^;\s\p{Cc}])*(?<![\"'])
//! )
//! (\s*)(;|[\u0000\s]*$)
//! ```
//!
//! Keys are trimmed and lower-cased. `==` inside a key stands for a literal
//! `=`. Quoted values keep their whitespace and escape their own quote
//! character by doubling it. Unquoted values are trimmed and may not end in a
//! quote character. A NUL after a complete pair terminates the input: only
//! whitespace and further NULs may follow it.
//!
//! ```rust
//! use connstr_parse::scanner::Scanner;
//!
//! let mut scanner = Scanner::new("Data Source = .; pwd='it''s'");
//! let step = scanner.scan_at(0).unwrap();
//! let pair = step.pair.unwrap();
//! assert_eq!(pair.key, "data source");
//! assert_eq!(pair.value.as_deref(), Some("."));
//! assert_eq!(step.next, 16);
//!
//! let pair = scanner.scan_at(step.next).unwrap().pair.unwrap();
//! assert_eq!(pair.value.as_deref(), Some("it's"));
//! ```

use std::ops::Range;

use tracing::trace;

use crate::error::SyntaxError;

/// Scanner states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Skipping separators before a key.
    NothingYet,
    /// Accumulating key text.
    Key,
    /// Saw `=` after key text; a second `=` escapes it.
    KeyEqual,
    /// Key finished, skipping whitespace before the value.
    KeyEnd,
    UnquotedValue,
    DoubleQuoteValue,
    /// Saw `"` inside a double-quoted value.
    DoubleQuoteValueQuote,
    SingleQuoteValue,
    /// Saw `'` inside a single-quoted value.
    SingleQuoteValueQuote,
    /// After a closing quote; only whitespace, `;` or NUL may follow.
    QuotedValueEnd,
    /// After a terminating NUL; only whitespace and NUL may follow.
    NullTermination,
}

/// What to do with the current character.
enum Step {
    /// Consume without buffering.
    Skip,
    /// Consume and append to the scratch buffer.
    Buffer,
    /// Stop scanning this pair at the current character.
    Exit,
}

/// One key/value unit as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPair {
    /// Trimmed, lower-cased key with `==` unescaped.
    pub key: String,
    /// `None` when the key had no value text at all.
    pub value: Option<String>,
    /// Byte offset where the key starts.
    pub offset: usize,
}

/// Result of one scanner invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStep {
    /// The pair found, or `None` when the input holds no more pairs.
    pub pair: Option<RawPair>,
    /// Byte offset to resume scanning from. A `;` ending the pair is
    /// included in the consumed range.
    pub next: usize,
}

/// A pair together with the source range it was scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedPair {
    pub pair: RawPair,
    /// From the scan start (leading separators included) to the resume offset.
    pub span: Range<usize>,
}

impl ScannedPair {
    /// Number of source bytes consumed producing this pair.
    pub fn consumed_len(&self) -> usize {
        self.span.end - self.span.start
    }
}

/// Pair scanner over one input string.
///
/// The scanner owns a scratch buffer that is reused by every call, so
/// scanning a whole string allocates only for the keys and values it
/// returns.
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    buffer: String,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            buffer: String::new(),
        }
    }

    /// The scanned input.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Iterate over every pair in the input, stopping after the first error.
    pub fn pairs(self) -> Pairs<'a> {
        Pairs {
            scanner: self,
            position: 0,
            done: false,
        }
    }

    /// Scan the next pair starting at byte offset `start`.
    ///
    /// `start` must lie on a char boundary; an offset outside the input is
    /// rejected as malformed.
    pub fn scan_at(&mut self, start: usize) -> Result<ScanStep, SyntaxError> {
        let input = self.input;
        let Some(rest) = input.get(start..) else {
            return Err(SyntaxError::malformed(start));
        };

        self.buffer.clear();
        let mut state = ScanState::NothingYet;
        let mut pair_start = start;
        let mut key: Option<String> = None;
        let mut value: Option<String> = None;
        let mut exit: Option<(usize, char)> = None;

        for (index, c) in rest.char_indices() {
            let at = start + index;
            let step = match state {
                ScanState::NothingYet => {
                    if c == ';' || c.is_whitespace() {
                        Step::Skip
                    } else if c == '\0' {
                        state = ScanState::NullTermination;
                        Step::Skip
                    } else if c.is_control() {
                        return Err(reject(pair_start, state));
                    } else {
                        pair_start = at;
                        if c == '=' {
                            state = ScanState::KeyEqual;
                            Step::Skip
                        } else {
                            state = ScanState::Key;
                            Step::Buffer
                        }
                    }
                }
                ScanState::Key => {
                    if c == '=' {
                        state = ScanState::KeyEqual;
                        Step::Skip
                    } else if c.is_whitespace() {
                        Step::Buffer
                    } else if c.is_control() {
                        return Err(reject(pair_start, state));
                    } else {
                        Step::Buffer
                    }
                }
                ScanState::KeyEqual => {
                    if c == '=' {
                        state = ScanState::Key;
                        Step::Buffer
                    } else {
                        key = Some(self.take_key(pair_start)?);
                        state = ScanState::KeyEnd;
                        key_end(c, &mut state, pair_start)?
                    }
                }
                ScanState::KeyEnd => key_end(c, &mut state, pair_start)?,
                ScanState::UnquotedValue => {
                    if c.is_whitespace() {
                        Step::Buffer
                    } else if c.is_control() || c == ';' {
                        Step::Exit
                    } else {
                        Step::Buffer
                    }
                }
                ScanState::DoubleQuoteValue => {
                    quoted_value(c, '"', &mut state, ScanState::DoubleQuoteValueQuote, pair_start)?
                }
                ScanState::SingleQuoteValue => {
                    quoted_value(c, '\'', &mut state, ScanState::SingleQuoteValueQuote, pair_start)?
                }
                ScanState::DoubleQuoteValueQuote | ScanState::SingleQuoteValueQuote => {
                    let (quote, reopened) = if state == ScanState::DoubleQuoteValueQuote {
                        ('"', ScanState::DoubleQuoteValue)
                    } else {
                        ('\'', ScanState::SingleQuoteValue)
                    };
                    if c == quote {
                        state = reopened;
                        Step::Buffer
                    } else {
                        value = Some(self.buffer.clone());
                        state = ScanState::QuotedValueEnd;
                        quoted_value_end(c, &mut state, pair_start)?
                    }
                }
                ScanState::QuotedValueEnd => quoted_value_end(c, &mut state, pair_start)?,
                ScanState::NullTermination => {
                    if c == '\0' || c.is_whitespace() {
                        Step::Skip
                    } else {
                        return Err(reject(pair_start, state));
                    }
                }
            };

            match step {
                Step::Skip => {}
                Step::Buffer => self.buffer.push(c),
                Step::Exit => {
                    exit = Some((at, c));
                    break;
                }
            }
        }

        match state {
            ScanState::Key | ScanState::DoubleQuoteValue | ScanState::SingleQuoteValue => {
                return Err(reject(pair_start, state));
            }
            ScanState::KeyEqual => key = Some(self.take_key(pair_start)?),
            ScanState::UnquotedValue => {
                let trimmed = self.buffer.trim();
                if trimmed.ends_with(['\'', '"']) {
                    return Err(reject(pair_start, state));
                }
                value = Some(trimmed.to_string());
            }
            ScanState::DoubleQuoteValueQuote | ScanState::SingleQuoteValueQuote => {
                value = Some(self.buffer.clone());
            }
            ScanState::QuotedValueEnd
            | ScanState::NothingYet
            | ScanState::KeyEnd
            | ScanState::NullTermination => {}
        }

        let next = match exit {
            Some((at, ';')) => at + 1,
            Some((at, _)) => at,
            None => input.len(),
        };

        Ok(ScanStep {
            pair: key.map(|key| RawPair {
                key,
                value,
                offset: pair_start,
            }),
            next,
        })
    }

    /// Finish the buffered key: trim trailing whitespace and lower-case it.
    fn take_key(&mut self, pair_start: usize) -> Result<String, SyntaxError> {
        let key = self.buffer.trim_end().to_lowercase();
        self.buffer.clear();
        if key.is_empty() {
            return Err(reject(pair_start, ScanState::KeyEqual));
        }
        Ok(key)
    }
}

fn key_end(c: char, state: &mut ScanState, pair_start: usize) -> Result<Step, SyntaxError> {
    if c.is_whitespace() {
        return Ok(Step::Skip);
    }
    match c {
        '\'' => {
            *state = ScanState::SingleQuoteValue;
            Ok(Step::Skip)
        }
        '"' => {
            *state = ScanState::DoubleQuoteValue;
            Ok(Step::Skip)
        }
        ';' | '\0' => Ok(Step::Exit),
        c if c.is_control() => Err(reject(pair_start, *state)),
        _ => {
            *state = ScanState::UnquotedValue;
            Ok(Step::Buffer)
        }
    }
}

fn quoted_value(
    c: char,
    quote: char,
    state: &mut ScanState,
    on_quote: ScanState,
    pair_start: usize,
) -> Result<Step, SyntaxError> {
    if c == quote {
        *state = on_quote;
        Ok(Step::Skip)
    } else if c == '\0' {
        Err(reject(pair_start, *state))
    } else {
        Ok(Step::Buffer)
    }
}

fn quoted_value_end(c: char, state: &mut ScanState, pair_start: usize) -> Result<Step, SyntaxError> {
    if c.is_whitespace() {
        Ok(Step::Skip)
    } else if c == ';' {
        Ok(Step::Exit)
    } else if c == '\0' {
        *state = ScanState::NullTermination;
        Ok(Step::Skip)
    } else {
        Err(reject(pair_start, *state))
    }
}

fn reject(pair_start: usize, state: ScanState) -> SyntaxError {
    trace!(offset = pair_start, state = ?state, "connection string rejected");
    SyntaxError::malformed(pair_start)
}

/// Iterator over the pairs of an input. See [`Scanner::pairs`].
#[derive(Debug)]
pub struct Pairs<'a> {
    scanner: Scanner<'a>,
    position: usize,
    done: bool,
}

impl Iterator for Pairs<'_> {
    type Item = Result<ScannedPair, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.position >= self.scanner.input.len() {
            return None;
        }
        let start = self.position;
        match self.scanner.scan_at(start) {
            Ok(ScanStep {
                pair: Some(pair),
                next,
            }) => {
                self.position = next;
                Some(Ok(ScannedPair {
                    pair,
                    span: start..next,
                }))
            }
            Ok(ScanStep { pair: None, .. }) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Pairs<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Result<Vec<(String, Option<String>)>, SyntaxError> {
        Scanner::new(input)
            .pairs()
            .map(|p| p.map(|p| (p.pair.key, p.pair.value)))
            .collect()
    }

    fn pair(key: &str, value: Option<&str>) -> (String, Option<String>) {
        (key.to_string(), value.map(str::to_string))
    }

    fn offset(input: &str) -> usize {
        scan(input).unwrap_err().offset()
    }

    #[test]
    fn test_simple_pair() {
        assert_eq!(scan("a=b").unwrap(), vec![pair("a", Some("b"))]);
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert!(scan("").unwrap().is_empty());
        assert!(scan(";;  ; ").unwrap().is_empty());
        assert!(scan("\r ").unwrap().is_empty());
    }

    #[test]
    fn test_key_is_trimmed_and_lowercased() {
        assert_eq!(
            scan("  Data Source  =  x  ;").unwrap(),
            vec![pair("data source", Some("x"))]
        );
    }

    #[test]
    fn test_escaped_equals_in_key() {
        assert_eq!(scan("a==b=val").unwrap(), vec![pair("a=b", Some("val"))]);
        assert_eq!(scan("===1").unwrap(), vec![pair("=", Some("1"))]);
        assert_eq!(scan("a===b").unwrap(), vec![pair("a=", Some("b"))]);
    }

    #[test]
    fn test_semicolon_inside_key() {
        assert_eq!(scan("na;=x").unwrap(), vec![pair("na;", Some("x"))]);
    }

    #[test]
    fn test_value_without_text() {
        assert_eq!(scan("a=").unwrap(), vec![pair("a", None)]);
        assert_eq!(scan("a=;b=1").unwrap(), vec![pair("a", None), pair("b", Some("1"))]);
        assert_eq!(scan("a=   ").unwrap(), vec![pair("a", None)]);
    }

    #[test]
    fn test_double_quote_doubling() {
        assert_eq!(scan(r#"k="a""b""#).unwrap(), vec![pair("k", Some("a\"b"))]);
        assert_eq!(scan(r#"k="""#).unwrap(), vec![pair("k", Some(""))]);
    }

    #[test]
    fn test_single_quote_doubling() {
        assert_eq!(scan("k='a''b'").unwrap(), vec![pair("k", Some("a'b"))]);
        assert_eq!(scan("k='say \"hi\"'").unwrap(), vec![pair("k", Some("say \"hi\""))]);
    }

    #[test]
    fn test_quoted_value_keeps_whitespace_and_separators() {
        assert_eq!(scan(r#"k="  v  ""#).unwrap(), vec![pair("k", Some("  v  "))]);
        assert_eq!(scan(r#"val=";xyz";a=1"#).unwrap(), vec![
            pair("val", Some(";xyz")),
            pair("a", Some("1")),
        ]);
        assert_eq!(scan("k=\"de\rfg\"").unwrap(), vec![pair("k", Some("de\rfg"))]);
    }

    #[test]
    fn test_unquoted_value_inner_whitespace() {
        assert_eq!(
            scan("abc def=xa 34 ;").unwrap(),
            vec![pair("abc def", Some("xa 34"))]
        );
        assert_eq!(scan("a=b\r\nc=d").unwrap(), vec![pair("a", Some("b\r\nc=d"))]);
    }

    #[test]
    fn test_unquoted_value_may_contain_quotes_inside() {
        assert_eq!(scan("k=it's ok").unwrap(), vec![pair("k", Some("it's ok"))]);
        assert_eq!(scan("k={Odbc\"Driver}").unwrap(), vec![pair("k", Some("{Odbc\"Driver}"))]);
    }

    #[test]
    fn test_next_offset_includes_separator() {
        let mut scanner = Scanner::new("a=1;b=2");
        let step = scanner.scan_at(0).unwrap();
        assert_eq!(step.next, 4);
        let step = scanner.scan_at(step.next).unwrap();
        assert_eq!(step.pair.unwrap().key, "b");
        assert_eq!(step.next, 7);
        let step = scanner.scan_at(step.next).unwrap();
        assert_eq!(step.pair, None);
    }

    #[test]
    fn test_pair_spans_cover_leading_separators() {
        let spans: Vec<_> = Scanner::new(";; a=1 ; b='x' ;c=")
            .pairs()
            .map(|p| p.unwrap().span)
            .collect();
        assert_eq!(spans, vec![0..8, 8..16, 16..18]);
    }

    #[test]
    fn test_raw_pair_offset_is_key_start() {
        let pairs: Vec<_> = Scanner::new("a=1;  b=2; ==c=3")
            .pairs()
            .map(|p| p.unwrap().pair.offset)
            .collect();
        assert_eq!(pairs, vec![0, 6, 11]);
    }

    #[test]
    fn test_null_termination() {
        assert_eq!(scan("a='x'\0\0 ").unwrap(), vec![pair("a", Some("x"))]);
        assert_eq!(scan("a=x\0").unwrap(), vec![pair("a", Some("x"))]);
        assert_eq!(scan("a=\0").unwrap(), vec![pair("a", None)]);
        assert_eq!(scan("\0").unwrap(), vec![]);
    }

    #[test]
    fn test_null_termination_rejects_trailing_text() {
        assert_eq!(offset("a='x'\0b=1"), 0);
        assert_eq!(offset("a=1;\0;"), 4);
        assert_eq!(offset("a=x\0y"), 3);
    }

    #[test]
    fn test_errors_report_pair_start() {
        assert_eq!(offset("k=\"unterminated"), 0);
        assert_eq!(offset("a=1; k='open"), 5);
        assert_eq!(offset("a=1;b"), 4);
        assert_eq!(offset("a=1;b  "), 4);
    }

    #[test]
    fn test_empty_key_is_rejected() {
        assert_eq!(offset("=x"), 0);
        assert_eq!(offset("a=1; =x"), 5);
        assert_eq!(offset("="), 0);
        assert_eq!(offset("=="), 0);
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(offset("a\u{1}b=1"), 0);
        assert_eq!(offset("a=\u{1}"), 0);
        assert_eq!(offset("a=1;\u{1}"), 4);
        // Whitespace controls are whitespace, not errors.
        assert_eq!(scan("\ta\t=\t1\t").unwrap(), vec![pair("a", Some("1"))]);
    }

    #[test]
    fn test_unquoted_value_ending_in_quote() {
        assert_eq!(offset("a=b'"), 0);
        assert_eq!(offset("x=1;a=b\"  ;"), 4);
    }

    #[test]
    fn test_text_after_closing_quote() {
        assert_eq!(offset("a='x' y"), 0);
        assert_eq!(offset("a=\"x\"\"y"), 0);
    }

    #[test]
    fn test_unquoted_value_stops_at_control() {
        let mut scanner = Scanner::new("a=b\u{1}");
        let step = scanner.scan_at(0).unwrap();
        assert_eq!(step.pair.unwrap().value.as_deref(), Some("b"));
        assert_eq!(step.next, 3);
        assert_eq!(scanner.scan_at(3).unwrap_err().offset(), 3);
    }

    #[test]
    fn test_multibyte_offsets_are_bytes() {
        let input = "clé=välue;b=\"x";
        assert_eq!(
            Scanner::new(input).pairs().next().unwrap().unwrap().span,
            0..12
        );
        assert_eq!(offset(input), 12);
    }

    #[test]
    fn test_scan_at_outside_input() {
        let mut scanner = Scanner::new("a=1");
        assert!(scanner.scan_at(10).is_err());
        assert_eq!(scanner.scan_at(3).unwrap().pair, None);
    }

    #[test]
    fn test_pairs_is_fused_after_error() {
        let mut pairs = Scanner::new("a=1;'").pairs();
        assert!(pairs.next().unwrap().is_ok());
        assert!(pairs.next().unwrap().is_err());
        assert!(pairs.next().is_none());
    }
}
