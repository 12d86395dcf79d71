//! Reading `.strings` localization files.
//!
//! Parsing happens in two steps: the tokenizer turns the text into a flat
//! list of [`Token`]s using a small state machine, then the interpreter
//! walks those tokens and assembles [`Record`]s. Both steps are lenient,
//! hand-edited files with a broken line still yield every entry that can be
//! recovered.

mod escape;
mod localization;
mod parser;
mod record;

pub use self::escape::{escape, unescape};
pub use self::localization::{IoError, Localization, BASE_LANGUAGE};
pub use self::parser::{interpret, parse, tokenize, ParseError, ParseResult, Token, TokenKind};
pub use self::record::Record;

pub type Error = parser::ParseError;
