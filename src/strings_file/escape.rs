use std::str::Chars;

use super::parser::control::ESCAPE;

/// Resolves the escape sequences `\n`, `\t`, `\r`, `\"`, `\'` and `\\` in a
/// single left-to-right pass. Unknown escape sequences are kept as they are.
pub fn unescape(raw: &str) -> String {
    let mut unescaper = Unescaper {
        chars: raw.chars(),
        cur: None,
    };
    unescaper.bump();

    unescaper.unescape(raw.len())
}

/// Inverse of [`unescape`] for the characters a written file needs escaped:
/// only `"` and line breaks are touched.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }

    escaped
}

struct Unescaper<'a> {
    chars: Chars<'a>,
    cur: Option<char>,
}

impl<'a> Unescaper<'a> {
    fn bump(&mut self) {
        self.cur = self.chars.next();
    }

    fn unescape(&mut self, capacity: usize) -> String {
        let mut result = String::with_capacity(capacity);

        while let Some(c) = self.cur {
            if c == ESCAPE {
                self.bump();
                match self.cur {
                    Some(escaped) => match unescaped_char(escaped) {
                        Some(u) => result.push(u),
                        None => {
                            result.push(ESCAPE);
                            result.push(escaped);
                        }
                    },
                    // trailing backslash
                    None => result.push(ESCAPE),
                }
            } else {
                result.push(c);
            }
            self.bump();
        }

        result
    }
}

fn unescaped_char(escaped: char) -> Option<char> {
    match escaped {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '"' => Some('"'),
        '\'' => Some('\''),
        '\\' => Some('\\'),
        _ => None,
    }
}
