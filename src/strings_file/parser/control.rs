//! Control characters and the lookups the tokenizer drives its state machine with.
//!
//! Everything in here is a pure function over the remaining input, so the
//! tokenizer never has to cache offsets between steps.

pub(crate) const ESCAPE: char = '\\';

/// Delimiters that open or close a span of literal text.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Enclosing {
    Quote,                  // "
    MessageOpen,            // /*
    MessageClose,           // */
    SingleLineMessageOpen,  // //
    SingleLineMessageClose, // end of line
}

impl Enclosing {
    pub(crate) const ALL: [Enclosing; 5] = [
        Enclosing::Quote,
        Enclosing::MessageOpen,
        Enclosing::MessageClose,
        Enclosing::SingleLineMessageOpen,
        Enclosing::SingleLineMessageClose,
    ];

    pub(crate) fn marker(self) -> &'static str {
        match self {
            Enclosing::Quote => "\"",
            Enclosing::MessageOpen => "/*",
            Enclosing::MessageClose => "*/",
            Enclosing::SingleLineMessageOpen => "//",
            Enclosing::SingleLineMessageClose => "\n",
        }
    }
}

/// Delimiters that mark a boundary between fields.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum Separating {
    Equal,     // =
    Semicolon, // ;
    Newline,   // \n
}

impl Separating {
    pub(crate) const ALL: [Separating; 3] =
        [Separating::Equal, Separating::Semicolon, Separating::Newline];

    pub(crate) fn marker(self) -> &'static str {
        match self {
            Separating::Equal => "=",
            Separating::Semicolon => ";",
            Separating::Newline => "\n",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum ControlCharacter {
    Enclosing(Enclosing),
    Separating(Separating),
}

impl ControlCharacter {
    pub(crate) fn marker(self) -> &'static str {
        match self {
            ControlCharacter::Enclosing(e) => e.marker(),
            ControlCharacter::Separating(s) => s.marker(),
        }
    }
}

/// Finds the nearest control character in `rest` together with its byte offset.
///
/// A separating character only wins when it is strictly nearer than the
/// nearest enclosing one, so a `\n` is always reported as end of line.
pub(crate) fn next_control_character(rest: &str) -> Option<(ControlCharacter, usize)> {
    let enclosing = Enclosing::ALL
        .iter()
        .filter_map(|e| rest.find(e.marker()).map(|offset| (*e, offset)))
        .min_by_key(|(_, offset)| *offset);
    let separating = Separating::ALL
        .iter()
        .filter_map(|s| rest.find(s.marker()).map(|offset| (*s, offset)))
        .min_by_key(|(_, offset)| *offset);

    match (enclosing, separating) {
        (None, None) => None,
        (Some((e, offset)), None) => Some((ControlCharacter::Enclosing(e), offset)),
        (None, Some((s, offset))) => Some((ControlCharacter::Separating(s), offset)),
        (Some((e, e_offset)), Some((s, s_offset))) => {
            if s_offset < e_offset {
                Some((ControlCharacter::Separating(s), s_offset))
            } else {
                Some((ControlCharacter::Enclosing(e), e_offset))
            }
        }
    }
}

/// Byte offset of the first occurrence of `marker` in `haystack` that is not
/// escaped.
///
/// Only single character markers can be escaped: a backslash makes the scan
/// skip the character after it. Longer markers are a plain substring search.
pub(crate) fn first_unescaped(haystack: &str, marker: &str) -> Option<usize> {
    let mut marker_chars = marker.chars();
    match (marker_chars.next(), marker_chars.next()) {
        (Some(control), None) => {
            let mut chars = haystack.char_indices();
            while let Some((offset, c)) = chars.next() {
                if c == control {
                    return Some(offset);
                }
                if c == ESCAPE {
                    chars.next();
                }
            }
            None
        }
        _ => haystack.find(marker),
    }
}

/// Fallback boundaries for a span whose closing delimiter is missing, tried
/// in this order.
const RECOVERY_MARKERS: [&str; 4] = ["*/", "\n", "\"", ";"];

/// Best-effort end of an unterminated span: the first recovery marker found,
/// or the end of `rest`.
pub(crate) fn recovery_offset(rest: &str) -> usize {
    RECOVERY_MARKERS
        .iter()
        .find_map(|marker| rest.find(marker))
        .unwrap_or(rest.len())
}

/// Byte offset reached after skipping `count` characters of `rest` starting at
/// byte `from`, bounded by the end of `rest`.
pub(crate) fn skip_chars(rest: &str, from: usize, count: usize) -> usize {
    rest[from..]
        .char_indices()
        .nth(count)
        .map_or(rest.len(), |(offset, _)| from + offset)
}
