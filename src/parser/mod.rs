//! Command parser
//! Parses a raw console line into a structured command

use std::fmt;

mod display;
mod value;

use value::Cursor;

/// A parsed console command: a name and its parameters in input order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    /// Command identifier, always non-empty
    pub name: String,
    /// Parameters in the order they appeared on the line
    pub parameters: Vec<Parameter>,
}

/// One command parameter
///
/// The grammar of the three forms overlaps, so classification is an ordered
/// match: the `--` flag prefix first, then a colon-bearing `name: value`
/// shape, then the positional fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Boolean switch: `--name`
    Flag { name: String },
    /// Positional value with no name
    Indexed { value: String },
    /// `name: value` pair
    NamedValue { name: String, value: String },
}

/// Parse failure. All errors are terminal: the first failure of the
/// left-to-right scan is reported and no partial command is produced.
/// Offsets are byte positions into the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is empty or whitespace-only
    EmptyCommand,
    /// A command or parameter name does not match `[A-Za-z_][A-Za-z0-9_]*`
    InvalidIdentifier { found: String, offset: usize },
    /// A quoted value with no closing `"` before end of line
    UnterminatedString { offset: usize },
    /// A backslash at end of input, or followed by a disallowed character
    InvalidEscape { found: Option<char>, offset: usize },
    /// A value was required but none was supplied
    EmptyValue { offset: usize },
    /// A character that fits none of the flag/named/indexed grammars
    MalformedParameter { found: char, offset: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCommand => write!(f, "empty command line"),
            Self::InvalidIdentifier { found, offset } => {
                write!(f, "invalid identifier '{found}' at offset {offset}")
            }
            Self::UnterminatedString { offset } => {
                write!(f, "unterminated string starting at offset {offset}")
            }
            Self::InvalidEscape {
                found: Some(c),
                offset,
            } => write!(f, "invalid escape '\\{c}' at offset {offset}"),
            Self::InvalidEscape {
                found: None,
                offset,
            } => write!(f, "incomplete escape sequence at offset {offset}"),
            Self::EmptyValue { offset } => write!(f, "missing value at offset {offset}"),
            Self::MalformedParameter { found, offset } => {
                write!(f, "unexpected character '{found}' at offset {offset}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one console line into a [`Command`].
///
/// The line is a command name followed by whitespace-separated parameters;
/// separators are runs of spaces and horizontal tabs, except inside a quoted
/// value. Leading and trailing whitespace is tolerated. Parsing is pure and
/// deterministic: the same input always yields the same result.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut cur = Cursor::new(line);

    cur.skip_ws();
    if cur.at_end() {
        return Err(ParseError::EmptyCommand);
    }

    let name_start = cur.pos();
    let name = parse_identifier(&mut cur)?;
    if !cur.at_boundary() {
        return Err(ParseError::InvalidIdentifier {
            found: cur.token_from(name_start),
            offset: name_start,
        });
    }

    let mut parameters = Vec::new();
    loop {
        cur.skip_ws();
        if cur.at_end() {
            break;
        }
        parameters.push(parse_parameter(&mut cur)?);
    }

    Ok(Command { name, parameters })
}

/// Scan an identifier (`[A-Za-z_][A-Za-z0-9_]*`) at the cursor
fn parse_identifier(cur: &mut Cursor) -> Result<String, ParseError> {
    let start = cur.pos();
    match cur.peek() {
        Some(c) if value::is_identifier_start(c) => {
            cur.bump();
        }
        _ => {
            return Err(ParseError::InvalidIdentifier {
                found: cur.token_from(start),
                offset: start,
            })
        }
    }
    while let Some(c) = cur.peek() {
        if value::is_identifier_continue(c) {
            cur.bump();
        } else {
            break;
        }
    }
    Ok(cur.slice_from(start).to_owned())
}

/// Parse one parameter at the cursor, classifying it in grammar order
fn parse_parameter(cur: &mut Cursor) -> Result<Parameter, ParseError> {
    let start = cur.pos();

    // 1. Flag: `--` followed by an identifier and nothing else
    if cur.eat_prefix("--") {
        let name = parse_identifier(cur).map_err(|_| ParseError::InvalidIdentifier {
            found: cur.token_from(start),
            offset: start,
        })?;
        if !cur.at_boundary() {
            return Err(ParseError::InvalidIdentifier {
                found: cur.token_from(start),
                offset: start,
            });
        }
        return Ok(Parameter::Flag { name });
    }

    // 2. Named value: `<identifier> <ws>* : <ws>* <value>`. Probe on a clone
    //    so a plain value with an identifier-shaped prefix (e.g. `main.rs`)
    //    falls through untouched.
    if cur.peek().is_some_and(value::is_identifier_start) {
        let mut probe = cur.clone();
        let name = parse_identifier(&mut probe)?;
        probe.skip_ws();
        if probe.eat(':') {
            probe.skip_ws();
            if probe.at_end() {
                return Err(ParseError::EmptyValue {
                    offset: probe.pos(),
                });
            }
            let val = value::scan_value(&mut probe)?;
            match probe.peek() {
                None => {}
                Some(c) if value::is_separator(c) => {}
                // An unescaped colon (or other junk) directly after the value
                Some(c) => {
                    return Err(ParseError::MalformedParameter {
                        found: c,
                        offset: probe.pos(),
                    })
                }
            }
            *cur = probe;
            return Ok(Parameter::NamedValue { name, value: val });
        }
    }

    // 3. Indexed: the whole token is a value
    let val = value::scan_value(cur)?;
    match cur.peek() {
        None => {}
        Some(c) if value::is_separator(c) => {}
        // A colon terminator means the token was meant as a named pair whose
        // name failed identifier rules (e.g. `9abc: x`, `main.rs: x`)
        Some(':') => {
            return Err(ParseError::InvalidIdentifier {
                found: cur.token_from(start),
                offset: start,
            })
        }
        Some(c) => {
            return Err(ParseError::MalformedParameter {
                found: c,
                offset: cur.pos(),
            })
        }
    }
    Ok(Parameter::Indexed { value: val })
}
