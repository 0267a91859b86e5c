//! Value scanner
//! Cursor over a command line plus the quoted/unquoted value state machine

use super::ParseError;

/// Cursor over the raw command line, tracking a byte offset
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// True at end of input or before a separator (space / horizontal tab)
    pub(crate) fn at_boundary(&self) -> bool {
        match self.peek() {
            None => true,
            Some(c) => is_separator(c),
        }
    }

    /// Skip a run of separator characters
    pub(crate) fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if is_separator(c) {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    /// Consume `c` if it is the next character
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume `prefix` if the remaining input starts with it
    pub(crate) fn eat_prefix(&mut self, prefix: &str) -> bool {
        if self.input[self.pos..].starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    /// The input between `start` and the current position
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.pos]
    }

    /// The raw text from `start` up to the next separator, for error reports
    pub(crate) fn token_from(&self, start: usize) -> String {
        self.input[start..]
            .split([' ', '\t'])
            .next()
            .unwrap_or("")
            .to_owned()
    }
}

/// Separators between the command name and parameters: space and horizontal
/// tab only. Newlines are not part of the grammar.
pub(crate) fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

pub(crate) fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// First character of an implicit (unquoted) value: letter, digit, or symbol,
/// excluding the quote, the bare backslash, the colon (a separator in this
/// context), and `-` (only allowed after the first character).
pub(crate) fn is_implicit_start(c: char) -> bool {
    c.is_ascii_alphanumeric() || (c.is_ascii_punctuation() && !matches!(c, '"' | '\\' | ':' | '-'))
}

pub(crate) fn is_implicit_continue(c: char) -> bool {
    is_implicit_start(c) || c == '-'
}

/// Characters legal inside an explicit (quoted) value without escaping:
/// everything printable except the quote itself and the bare backslash,
/// plus the space.
fn is_quoted_raw(c: char) -> bool {
    c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\')
}

/// Legal escape targets: any letter, digit, or symbol, plus the space.
/// This deliberately includes `"`, `\`, `:`, and the space itself, so an
/// escaped space may appear inside an implicit value without quoting.
fn is_escape_target(c: char) -> bool {
    c == ' ' || c.is_ascii_graphic()
}

/// Per-value scanner state. `Escape` remembers which body state to return to
/// after consuming exactly one escaped character.
enum ScanState {
    Start,
    Unquoted,
    Quoted,
    Escape { quoted: bool },
}

/// Scan a single value (implicit or explicit) starting at the cursor.
///
/// On success the cursor rests on the first character after the value; the
/// caller is responsible for checking that it is a legal boundary. Reaching
/// end of input inside a quoted body or an escape is an error, never a
/// silently truncated value.
pub(crate) fn scan_value(cur: &mut Cursor) -> Result<String, ParseError> {
    let open_offset = cur.pos();
    let mut out = String::new();
    let mut state = ScanState::Start;

    loop {
        match state {
            ScanState::Start => match cur.peek() {
                None => return Err(ParseError::EmptyValue { offset: cur.pos() }),
                Some('"') => {
                    cur.bump();
                    state = ScanState::Quoted;
                }
                Some('\\') => {
                    cur.bump();
                    state = ScanState::Escape { quoted: false };
                }
                Some(c) if is_implicit_start(c) => {
                    cur.bump();
                    out.push(c);
                    state = ScanState::Unquoted;
                }
                Some(c) => {
                    return Err(ParseError::MalformedParameter {
                        found: c,
                        offset: cur.pos(),
                    })
                }
            },
            ScanState::Unquoted => match cur.peek() {
                Some('\\') => {
                    cur.bump();
                    state = ScanState::Escape { quoted: false };
                }
                Some(c) if is_implicit_continue(c) => {
                    cur.bump();
                    out.push(c);
                }
                // Separator, colon, or anything else: the value ends here.
                // The caller decides whether what follows is legal.
                _ => return Ok(out),
            },
            ScanState::Quoted => match cur.peek() {
                None => {
                    return Err(ParseError::UnterminatedString {
                        offset: open_offset,
                    })
                }
                Some('"') => {
                    cur.bump();
                    return Ok(out);
                }
                Some('\\') => {
                    cur.bump();
                    state = ScanState::Escape { quoted: true };
                }
                Some(c) if is_quoted_raw(c) => {
                    cur.bump();
                    out.push(c);
                }
                Some(c) => {
                    return Err(ParseError::MalformedParameter {
                        found: c,
                        offset: cur.pos(),
                    })
                }
            },
            ScanState::Escape { quoted } => match cur.peek() {
                None => {
                    return Err(ParseError::InvalidEscape {
                        found: None,
                        offset: cur.pos(),
                    })
                }
                Some(c) if is_escape_target(c) => {
                    cur.bump();
                    out.push(c);
                    state = if quoted {
                        ScanState::Quoted
                    } else {
                        ScanState::Unquoted
                    };
                }
                Some(c) => {
                    return Err(ParseError::InvalidEscape {
                        found: Some(c),
                        offset: cur.pos(),
                    })
                }
            },
        }
    }
}
