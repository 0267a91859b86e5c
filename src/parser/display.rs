//! Command serialization
//! Renders a command back to grammar-conformant text; round-trips through parse

use std::fmt;

use super::value::{is_implicit_continue, is_implicit_start};
use super::{Command, Parameter};

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for param in &self.parameters {
            write!(f, " {param}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag { name } => write!(f, "--{name}"),
            Self::Indexed { value } => write_value(f, value),
            Self::NamedValue { name, value } => {
                write!(f, "{name}: ")?;
                write_value(f, value)
            }
        }
    }
}

/// Write a value implicitly when the implicit grammar admits it verbatim,
/// otherwise quoted with `"` and `\` escaped
fn write_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if is_implicit_safe(value) {
        return f.write_str(value);
    }
    f.write_str("\"")?;
    for c in value.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}

fn is_implicit_safe(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if is_implicit_start(c) => {}
        _ => return false,
    }
    chars.all(is_implicit_continue)
}
