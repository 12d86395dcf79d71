pub(crate) mod control;
pub(crate) mod tokenizer;

use std::borrow::Cow;

use log::debug;

use super::escape::unescape;
use super::Record;

pub use self::tokenizer::{Token, TokenKind};

use self::tokenizer::Tokenizer;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("input contains a control character the tokenizer doesn't know about")]
    NotParsable,
    #[error("input doesn't contain any well-formed entries")]
    MalformattedInput,
}

/// Parses the text of a `.strings` file into its records, in file order.
pub fn parse(data: &str) -> ParseResult<Vec<Record>> {
    let tokens = tokenize(data)?;
    interpret(tokens)
}

/// Splits `data` into tokens. Never fails on malformed input: unterminated
/// literals and comments are cut at the nearest plausible boundary and text
/// outside of any token is dropped.
pub fn tokenize(data: &str) -> ParseResult<Vec<Token<'_>>> {
    Tokenizer::tokens_from(data)
}

/// Assembles records from `tokens`.
///
/// Entries are delimited by one terminator for the whole file: the
/// semicolon, unless the first semicolon is directly followed by something
/// other than a line break (usually a trailing comment), in which case that
/// token delimits entries. Files mixing both styles are mis-terminated, and a
/// file whose first semicolon is its last token has no terminator at all.
pub fn interpret(tokens: Vec<Token<'_>>) -> ParseResult<Vec<Record>> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let terminator = entries_terminator(&tokens).ok_or(ParseError::MalformattedInput)?;
    debug!("entries are terminated by {terminator:?}");

    let mut current_key: Option<Cow<'_, str>> = None;
    let mut current_value: Option<Cow<'_, str>> = None;
    let mut current_message: Option<Cow<'_, str>> = None;
    let mut records = Vec::new();

    let token_count = tokens.len();
    for token in tokens {
        let kind = token.kind();
        match token {
            Token::Message(text) => current_message = Some(text),
            Token::Key(text) => current_key = Some(text),
            Token::Value(text) => current_value = Some(text),
            Token::Equal | Token::Semicolon | Token::Newline => {}
        }

        if kind != terminator {
            continue;
        }

        // stray terminators don't close anything
        let (Some(key), Some(value)) = (current_key.as_deref(), current_value.as_deref()) else {
            continue;
        };
        if key.is_empty() {
            debug!("skipping entry with empty key");
            current_key = None;
            current_value = None;
            current_message = None;
            continue;
        }

        records.push(Record {
            key: key.to_owned(),
            value: unescape(value),
            message: current_message.as_deref().map(|m| m.trim_matches(' ').to_owned()),
        });
        current_key = None;
        current_value = None;
        current_message = None;
    }

    if records.is_empty() {
        debug!("{token_count} tokens didn't yield a single entry");
        return Err(ParseError::MalformattedInput);
    }

    Ok(records)
}

fn entries_terminator(tokens: &[Token<'_>]) -> Option<TokenKind> {
    let semicolon = tokens.iter().position(|t| *t == Token::Semicolon)?;

    match tokens.get(semicolon + 1) {
        Some(Token::Newline) => Some(TokenKind::Semicolon),
        Some(token) => Some(token.kind()),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, value: &str, message: Option<&str>) -> Record {
        Record {
            key: key.into(),
            value: value.into(),
            message: message.map(Into::into),
        }
    }

    mod entries_terminator {
        use super::*;

        #[test]
        fn test_semicolon_followed_by_newline() {
            let tokens = tokenize("\"k\" = \"v\";\n").unwrap();
            assert_eq!(entries_terminator(&tokens), Some(TokenKind::Semicolon));
        }

        #[test]
        fn test_semicolon_at_end_of_input() {
            let tokens = tokenize("\"k\" = \"v\";").unwrap();
            assert_eq!(entries_terminator(&tokens), None);
        }

        #[test]
        fn test_semicolon_followed_by_message() {
            let tokens = tokenize("\"k\" = \"v\"; /* note */\n").unwrap();
            assert_eq!(entries_terminator(&tokens), Some(TokenKind::Message));
        }

        #[test]
        fn test_without_semicolon() {
            let tokens = tokenize("\"k\" = \"v\"\n").unwrap();
            assert_eq!(entries_terminator(&tokens), None);
        }
    }

    mod interpret {
        use super::*;

        #[test]
        fn test_empty_tokens_succeed() {
            assert_eq!(interpret(vec![]), Ok(vec![]));
        }

        #[test]
        fn test_without_semicolon_fails() {
            let tokens = vec![Token::Message(" header ".into()), Token::Newline];
            assert_eq!(interpret(tokens), Err(ParseError::MalformattedInput));
        }

        #[test]
        fn test_without_any_entry_fails() {
            let tokens = vec![Token::Key("lonely".into()), Token::Semicolon, Token::Newline];
            assert_eq!(interpret(tokens), Err(ParseError::MalformattedInput));
        }

        #[test]
        fn test_value_is_unescaped_but_key_is_not() {
            let tokens = vec![
                Token::Key(r#"a\"b"#.into()),
                Token::Equal,
                Token::Value(r#"say \"hi\"\n"#.into()),
                Token::Semicolon,
                Token::Newline,
            ];

            assert_eq!(
                interpret(tokens),
                Ok(vec![record(r#"a\"b"#, "say \"hi\"\n", None)])
            );
        }

        #[test]
        fn test_message_is_trimmed_of_spaces_only() {
            let tokens = vec![
                Token::Message("  note\t ".into()),
                Token::Newline,
                Token::Key("k".into()),
                Token::Equal,
                Token::Value("v".into()),
                Token::Semicolon,
                Token::Newline,
            ];

            assert_eq!(interpret(tokens), Ok(vec![record("k", "v", Some("note\t"))]));
        }

        #[test]
        fn test_empty_value_is_kept() {
            let tokens = tokenize("\"k\" = \"\";\n").unwrap();
            assert_eq!(interpret(tokens), Ok(vec![record("k", "", None)]));
        }

        #[test]
        fn test_empty_key_is_skipped() {
            let tokens = tokenize("\"\" = \"x\";\n\"k\" = \"v\";\n").unwrap();
            assert_eq!(interpret(tokens), Ok(vec![record("k", "v", None)]));
        }

        #[test]
        fn test_skipped_entry_takes_its_message_along() {
            let tokens = tokenize("/* m */\n\"\" = \"x\";\n\"k\" = \"v\";\n").unwrap();
            assert_eq!(interpret(tokens), Ok(vec![record("k", "v", None)]));
        }

        #[test]
        fn test_message_does_not_leak_into_next_entry() {
            let data = "/* first */\n\"a\" = \"1\";\n\"b\" = \"2\";\n";

            let tokens = tokenize(data).unwrap();

            assert_eq!(
                interpret(tokens),
                Ok(vec![record("a", "1", Some("first")), record("b", "2", None)])
            );
        }
    }

    mod parse {
        use super::*;

        #[test]
        fn test_empty_input_succeeds() {
            assert_eq!(parse(""), Ok(vec![]));
        }

        #[test]
        fn test_input_without_control_characters_succeeds() {
            assert_eq!(parse("plain text\twithout anything"), Ok(vec![]));
        }

        #[test]
        fn test_missing_semicolon_fails() {
            assert_eq!(parse("/* header */\n"), Err(ParseError::MalformattedInput));
        }

        #[test]
        fn test_keys_without_values_fail() {
            assert_eq!(
                parse("\"a\";\n\"b\";\n"),
                Err(ParseError::MalformattedInput)
            );
        }

        #[test]
        fn test_quote_continuation_succeeds() {
            let data = "\"a\\\"b\" = \"1\\n2\";\n";

            assert_eq!(parse(data), Ok(vec![record(r#"a\"b"#, "1\n2", None)]));
        }

        #[test]
        fn test_semicolon_as_last_token_fails() {
            assert_eq!(parse("\"k\" = \"v\";"), Err(ParseError::MalformattedInput));
        }

        #[test]
        fn test_trailing_comment_terminates_entries() {
            let data = "\"k1\" = \"v1\"; // c1\n\"k2\" = \"v2\"; // c2\n";

            assert_eq!(
                parse(data),
                Ok(vec![
                    record("k1", "v1", Some("c1")),
                    record("k2", "v2", Some("c2")),
                ])
            );
        }

        #[test]
        fn test_trailing_multi_line_comment_terminates_entries() {
            let data = "/* header */\n\"k1\" = \"v1\"; /* c1 */\n\"k2\" = \"v2\"; /* c2 */\n";

            assert_eq!(
                parse(data),
                Ok(vec![
                    record("k1", "v1", Some("c1")),
                    record("k2", "v2", Some("c2")),
                ])
            );
        }

        #[test]
        fn test_orphan_terminator_is_skipped() {
            let data = ";\n\"k\" = \"v\";\n;\n";

            assert_eq!(parse(data), Ok(vec![record("k", "v", None)]));
        }

        #[test]
        fn test_duplicate_keys_are_kept_in_order() {
            let data = "\"k\" = \"first\";\n\"k\" = \"second\";\n";

            assert_eq!(
                parse(data),
                Ok(vec![record("k", "first", None), record("k", "second", None)])
            );
        }

        #[test]
        fn test_realistic_file_succeeds() {
            let data = r#"/*
  Localizable.strings
  Example

  Created by someone.
*/

/* Title of the main window */
"window.title" = "Localization Editor";

/* Shown when nothing was found */
"search.empty" = "No results for \"%@\"";

// not attached to anything
"multi.line" = "first line\nsecond line";
"url" = "https://example.com/a;b";
"#;

            assert_eq!(
                parse(data),
                Ok(vec![
                    record("window.title", "Localization Editor", Some("Title of the main window")),
                    record("search.empty", "No results for \"%@\"", Some("Shown when nothing was found")),
                    record("multi.line", "first line\nsecond line", Some("not attached to anything")),
                    record("url", "https://example.com/a;b", None),
                ])
            );
        }
    }
}
