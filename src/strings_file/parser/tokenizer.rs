use std::borrow::Cow;

use log::{debug, warn};

use super::control::{
    first_unescaped, next_control_character, recovery_offset, skip_chars, ControlCharacter,
    Enclosing, Separating,
};
use super::ParseError;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token<'a> {
    Key(Cow<'a, str>),
    Value(Cow<'a, str>),
    Message(Cow<'a, str>),
    Equal,     // =
    Semicolon, // ;
    Newline,   // \n
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    Key,
    Value,
    Message,
    Equal,
    Semicolon,
    Newline,
}

impl<'a> Token<'a> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Key(_) => TokenKind::Key,
            Token::Value(_) => TokenKind::Value,
            Token::Message(_) => TokenKind::Message,
            Token::Equal => TokenKind::Equal,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Newline => TokenKind::Newline,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum ParserState {
    ReadingKey,
    ReadingValue,
    ReadingMessage { single_line: bool },
    Other,
}

/// Splits the text of a `.strings` file into [`Token`]s.
///
/// The scan position only ever moves forward, so tokenizing terminates for
/// any input. Text that can't be attributed to a token is dropped.
#[derive(Debug)]
pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    state: ParserState,
    tokens: Vec<Token<'a>>,
    // key or value text that may still be continued by the next extraction
    pending: Option<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            state: ParserState::Other,
            tokens: Vec::new(),
            pending: None,
        }
    }

    pub(crate) fn tokens_from(input: &'a str) -> Result<Vec<Token<'a>>, ParseError> {
        Tokenizer::new(input).tokenize()
    }

    pub(crate) fn tokenize(mut self) -> Result<Vec<Token<'a>>, ParseError> {
        while !self.rest().is_empty() {
            match self.state {
                ParserState::Other => self.prepare_next_state()?,
                ParserState::ReadingKey => self.read_literal(TokenKind::Key),
                ParserState::ReadingValue => self.read_literal(TokenKind::Value),
                ParserState::ReadingMessage { single_line } => self.read_message(single_line),
            }
        }
        self.flush_pending();

        debug!("tokenized {} bytes into {} tokens", self.input.len(), self.tokens.len());

        Ok(self.tokens)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn discard_rest(&mut self) {
        self.pos = self.input.len();
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.pending.as_ref().or(self.tokens.last()).map(Token::kind)
    }

    fn flush_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.tokens.push(token);
        }
    }

    fn emit(&mut self, token: Token<'a>) {
        self.flush_pending();
        self.tokens.push(token);
    }

    // consume everything up to and including the next control character
    fn prepare_next_state(&mut self) -> Result<(), ParseError> {
        let Some((control, offset)) = next_control_character(self.rest()) else {
            self.discard_rest();
            return Ok(());
        };
        self.pos += offset + control.marker().len();

        match control {
            ControlCharacter::Enclosing(Enclosing::Quote) => {
                self.state = self.state_for_quote();
            }
            ControlCharacter::Enclosing(Enclosing::MessageOpen) => {
                self.state = ParserState::ReadingMessage { single_line: false };
            }
            ControlCharacter::Enclosing(Enclosing::MessageClose) => {
                // only meaningful while reading a message
                debug!("ignoring stray {:?} at byte {}", control.marker(), self.pos);
            }
            ControlCharacter::Enclosing(Enclosing::SingleLineMessageOpen) => {
                self.state = ParserState::ReadingMessage { single_line: true };
            }
            ControlCharacter::Enclosing(Enclosing::SingleLineMessageClose)
            | ControlCharacter::Separating(Separating::Newline) => self.emit(Token::Newline),
            ControlCharacter::Separating(Separating::Equal) => self.emit(Token::Equal),
            ControlCharacter::Separating(Separating::Semicolon) => self.emit(Token::Semicolon),
        }

        Ok(())
    }

    fn state_for_quote(&self) -> ParserState {
        match self.last_kind() {
            // continuation of an interrupted key
            Some(TokenKind::Key) => ParserState::ReadingKey,
            Some(TokenKind::Value | TokenKind::Equal) => ParserState::ReadingValue,
            Some(TokenKind::Semicolon) | None => ParserState::ReadingKey,
            Some(_) => ParserState::ReadingKey,
        }
    }

    fn read_literal(&mut self, kind: TokenKind) {
        let text = self.extract_text(Enclosing::Quote);

        let token = match (self.pending.take(), kind) {
            (Some(Token::Key(prior)), TokenKind::Key) => Token::Key(joined(prior, text)),
            (Some(Token::Value(prior)), TokenKind::Value) => Token::Value(joined(prior, text)),
            (prior, TokenKind::Key) => {
                self.pending = prior;
                self.flush_pending();
                Token::Key(Cow::Borrowed(text))
            }
            (prior, _) => {
                self.pending = prior;
                self.flush_pending();
                Token::Value(Cow::Borrowed(text))
            }
        };
        self.pending = Some(token);

        // a newline or another quote right after the closing quote means the
        // literal may continue, anything else ends it
        match next_control_character(self.rest()) {
            Some((
                ControlCharacter::Separating(Separating::Newline)
                | ControlCharacter::Enclosing(Enclosing::SingleLineMessageClose)
                | ControlCharacter::Enclosing(Enclosing::Quote),
                _,
            )) => {}
            Some(_) => self.state = ParserState::Other,
            None => {
                self.discard_rest();
                self.state = ParserState::Other;
            }
        }
    }

    fn read_message(&mut self, single_line: bool) {
        let end = if single_line {
            Enclosing::SingleLineMessageClose
        } else {
            Enclosing::MessageClose
        };
        let text = self.extract_text(end);

        // never merged: the message before may be an unrelated file header
        self.emit(Token::Message(Cow::Borrowed(text)));
        self.state = ParserState::Other;
    }

    /// Takes the text up to the `end` delimiter and moves past the delimiter.
    fn extract_text(&mut self, end: Enclosing) -> &'a str {
        let rest = self.rest();
        let offset = match first_unescaped(rest, end.marker()) {
            Some(offset) => offset,
            None => {
                let offset = recovery_offset(rest);
                warn!(
                    "missing closing {:?} after byte {}, recovering at byte {}",
                    end.marker(),
                    self.pos,
                    self.pos + offset
                );
                offset
            }
        };

        let text = &rest[..offset];
        self.pos += skip_chars(rest, offset, end.marker().chars().count());
        text
    }
}

fn joined<'a>(prior: Cow<'a, str>, text: &str) -> Cow<'a, str> {
    let mut joined = prior.into_owned();
    joined.push_str(Enclosing::Quote.marker());
    joined.push_str(text);
    Cow::Owned(joined)
}
