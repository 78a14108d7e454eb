//! Differential tests: the hand-written scanner against a PEG grammar of the
//! same language.

use connstr_parse::{AliasTable, RecognizedSet, Scanner, parse};
use pest::Parser;
use pest_derive::Parser;
use pretty_assertions::assert_eq;

#[derive(Parser)]
#[grammar_inline = r#"
connection = { SOI ~ (sep* ~ pair)* ~ sep* ~ null_tail? ~ EOI }

sep       = _{ ";" | WHITE_SPACE }
ctrl      = _{ !WHITE_SPACE ~ CONTROL }
null_tail = _{ "\u{00}" ~ ("\u{00}" | WHITE_SPACE)* }
pair_end  = _{ ";" | &"\u{00}" | &EOI }

pair      = { key ~ "=" ~ WHITE_SPACE* ~ value }
key       = @{ key_start ~ key_char* }
key_start = _{ "==" | !("=" | sep | CONTROL) ~ ANY }
key_char  = _{ "==" | !("=" | ctrl) ~ ANY }

value     = _{
      (dq_value | sq_value) ~ WHITE_SPACE* ~ pair_end
    | unquoted ~ pair_end
    | no_value ~ pair_end
}
dq_value  = @{ "\"" ~ ("\"\"" | !("\"" | "\u{00}") ~ ANY)* ~ "\"" }
sq_value  = @{ "'" ~ ("''" | !("'" | "\u{00}") ~ ANY)* ~ "'" }
unquoted  = @{ !("\"" | "'" | sep | CONTROL) ~ (!(";" | ctrl) ~ ANY)+ }
no_value  = { &(";" | "\u{00}" | EOI) }
"#]
struct Oracle;

type Pairs = Vec<(String, Option<String>)>;

/// Pairs as the grammar sees them, or `None` when the input is rejected.
fn oracle(input: &str) -> Option<Pairs> {
    let connection = Oracle::parse(Rule::connection, input).ok()?.next()?;
    let mut out = Vec::new();
    for pair in connection.into_inner() {
        if pair.as_rule() != Rule::pair {
            continue;
        }
        let mut inner = pair.into_inner();
        let key = inner.next()?.as_str().replace("==", "=");
        let key = key.trim_end().to_lowercase();
        let value = inner.next()?;
        let text = value.as_str();
        let value = match value.as_rule() {
            Rule::dq_value => Some(text[1..text.len() - 1].replace("\"\"", "\"")),
            Rule::sq_value => Some(text[1..text.len() - 1].replace("''", "'")),
            Rule::unquoted => {
                let trimmed = text.trim();
                if trimmed.ends_with(['"', '\'']) {
                    return None;
                }
                Some(trimmed.to_string())
            }
            _ => None,
        };
        out.push((key, value));
    }
    Some(out)
}

fn scanned(input: &str) -> Option<Pairs> {
    Scanner::new(input)
        .pairs()
        .map(|p| p.map(|p| (p.pair.key, p.pair.value)))
        .collect::<Result<_, _>>()
        .ok()
}

fn assembled(input: &str) -> Option<Pairs> {
    let parsed = parse(input, &AliasTable::identity(), &RecognizedSet::any()).ok()?;
    Some(
        parsed
            .chain
            .iter()
            .map(|n| (n.keyword().to_string(), n.value().map(str::to_string)))
            .collect(),
    )
}

fn check(input: &str) {
    let expected = oracle(input);
    assert_eq!(scanned(input), expected, "scanner disagrees on {input:?}");
    assert_eq!(assembled(input), expected, "parse disagrees on {input:?}");
}

#[test]
fn test_oracle_accepts_known_strings() {
    assert_eq!(
        oracle("Data Source=.;pwd='a;b'"),
        Some(vec![
            ("data source".to_string(), Some(".".to_string())),
            ("pwd".to_string(), Some("a;b".to_string())),
        ])
    );
    assert_eq!(oracle("k=\"a\"\"b\""), Some(vec![("k".to_string(), Some("a\"b".to_string()))]));
    assert_eq!(oracle("k='open"), None);
}

#[test]
fn test_hand_picked_corpus() {
    let corpus = [
        "",
        ";;; ",
        "Server=localhost",
        "a=1;b=2;",
        "  Key  =  v a l  ;",
        "A==B=x",
        "==a=1",
        "===",
        "a===b",
        "a====b",
        "a;b=1",
        "'key'=1",
        "k=\"a;b\"",
        "k='it''s'",
        "k=\"\"",
        "k=\"\"\"\"",
        "k=\"x\"  ;  j='y'\t",
        "k=x'y",
        "k=x'",
        "k=x\" ;",
        "k='x' y",
        "k=",
        "k=;j=",
        "k= ;",
        "k=\0",
        "k=v\0 \0",
        "k='v'\0",
        "k='v' \0 ;",
        "k=v\0j=1",
        "\0",
        "\0a=1",
        "k=\u{1}",
        "k=v\u{1}",
        "k\u{1}=v",
        "\u{1}",
        "k=\"v\u{1}\"",
        "k=\"v\0\"",
        "\u{85}k\u{a0}=\u{2003}v\u{85}",
        "ключ=значение",
        "k = \t\"padded\"\t ; x=1",
        "provider connection string=\"Data Source=.;Initial Catalog=db\"",
    ];
    for input in corpus {
        check(input);
    }
}

#[test]
fn test_exhaustive_short_strings() {
    const ALPHABET: [char; 8] = ['a', '=', ';', ' ', '\'', '"', '\0', '\u{1}'];
    const MAX_LEN: u32 = 5;

    let mut accepted = 0;
    let mut rejected = 0;
    for len in 0..=MAX_LEN {
        let count = ALPHABET.len().pow(len);
        for mut n in 0..count {
            let mut input = String::with_capacity(len as usize);
            for _ in 0..len {
                input.push(ALPHABET[n % ALPHABET.len()]);
                n /= ALPHABET.len();
            }
            if oracle(&input).is_some() {
                accepted += 1;
            } else {
                rejected += 1;
            }
            check(&input);
        }
    }
    assert!(accepted > 0);
    assert!(rejected > 0);
}
