//! Command executor
//! Parses a line, binds parameters against a command's argument definitions,
//! and invokes the callback

use std::collections::{BTreeMap, VecDeque};

use crate::error::{ConsoleError, ErrorKind};
use crate::parser::{self, Parameter};
use crate::registry::{
    ArgumentDefinition, ArgumentType, ArgumentValue, CommandArgs, CommandRegistry,
};

/// Parse `line`, look up the command in `registry`, bind its parameters, and
/// run the callback.
///
/// Binding rules, in order:
/// - flags contribute `name -> "true"`, named values their text; a repeated
///   name is an error, positional values queue up in input order
/// - each definition takes its named binding (converted to its type), a
///   missing flag defaults to `false`, other missing definitions queue up
///   mandatory-first
/// - positional values then fill that queue front to back; too few for the
///   mandatory definitions or more than the whole queue is an error
pub fn dispatch(registry: &mut CommandRegistry, line: &str) -> Result<(), ConsoleError> {
    let command = parser::parse(line)?;
    log::trace!("parsed console command: {command}");

    let bound = match registry.get(&command.name) {
        Some(cmd) => bind_arguments(cmd.definitions(), &command.parameters)?,
        None => {
            let suggestions = registry.suggestions(&command.name);
            let message = if suggestions.is_empty() {
                format!("command not found: {}", command.name)
            } else {
                format!(
                    "command not found: {} (did you mean {}?)",
                    command.name,
                    suggestions.join(", ")
                )
            };
            return Err(ConsoleError::new(
                ErrorKind::Execution,
                "UNKNOWN_COMMAND",
                message,
            ));
        }
    };

    if let Some(cmd) = registry.get_mut(&command.name) {
        cmd.invoke(bound).map_err(|msg| {
            ConsoleError::new(
                ErrorKind::Execution,
                "COMMAND_FAILED",
                format!("{}: {msg}", command.name),
            )
        })?;
    }
    Ok(())
}

/// Bind parsed parameters to argument definitions, producing the callback's
/// argument map
pub fn bind_arguments(
    defs: &[ArgumentDefinition],
    parameters: &[Parameter],
) -> Result<CommandArgs, ConsoleError> {
    let mut named: BTreeMap<&str, &str> = BTreeMap::new();
    let mut indexed: VecDeque<&str> = VecDeque::new();

    for param in parameters {
        let (name, value) = match param {
            Parameter::Indexed { value } => {
                indexed.push_back(value);
                continue;
            }
            // A flag is a named value set to true
            Parameter::Flag { name } => (name.as_str(), "true"),
            Parameter::NamedValue { name, value } => (name.as_str(), value.as_str()),
        };
        if named.insert(name, value).is_some() {
            return Err(ConsoleError::new(
                ErrorKind::Binding,
                "DUPLICATE_PARAMETER",
                format!("duplicate command parameter: {name}"),
            ));
        }
    }

    let mut bound = CommandArgs::new();
    let mut missing_mandatory: VecDeque<&ArgumentDefinition> = VecDeque::new();
    let mut missing_optional: VecDeque<&ArgumentDefinition> = VecDeque::new();

    for def in defs {
        if let Some(raw) = named.remove(def.name.as_str()) {
            bound.insert(def.name.clone(), convert_argument(raw, def)?);
        } else if let ArgumentType::Flag = def.ty {
            // Missing flags default to false
            bound.insert(def.name.clone(), ArgumentValue::Flag(false));
        } else if def.optional {
            missing_optional.push_back(def);
        } else {
            missing_mandatory.push_back(def);
        }
    }

    if let Some((name, _)) = named.pop_first() {
        return Err(ConsoleError::new(
            ErrorKind::Binding,
            "UNKNOWN_PARAMETER",
            format!("unknown parameter: {name}"),
        ));
    }

    // Positional values fill whatever named bindings left open,
    // mandatory definitions first
    let mandatory_len = missing_mandatory.len();
    let mut missing = missing_mandatory;
    missing.append(&mut missing_optional);

    if indexed.len() < mandatory_len {
        return Err(ConsoleError::new(
            ErrorKind::Binding,
            "TOO_FEW_ARGS",
            format!(
                "too few arguments: expected {mandatory_len} more, got {}",
                indexed.len()
            ),
        ));
    }
    if indexed.len() > missing.len() {
        return Err(ConsoleError::new(
            ErrorKind::Binding,
            "TOO_MANY_ARGS",
            format!(
                "too many arguments: at most {} unbound, got {}",
                missing.len(),
                indexed.len()
            ),
        ));
    }

    while let Some(value) = indexed.pop_front() {
        if let Some(def) = missing.pop_front() {
            bound.insert(def.name.clone(), convert_argument(value, def)?);
        }
    }

    Ok(bound)
}

/// Convert one raw parameter string per its argument definition
fn convert_argument(
    raw: &str,
    def: &ArgumentDefinition,
) -> Result<ArgumentValue, ConsoleError> {
    let invalid = |ty: &str| {
        ConsoleError::new(
            ErrorKind::Binding,
            "INVALID_ARGUMENT",
            format!("argument '{}': '{raw}' is not a valid {ty}", def.name),
        )
    };
    match def.ty {
        ArgumentType::Float32 => raw
            .parse()
            .map(ArgumentValue::Float32)
            .map_err(|_| invalid("f32")),
        ArgumentType::Float64 => raw
            .parse()
            .map(ArgumentValue::Float64)
            .map_err(|_| invalid("f64")),
        ArgumentType::Int32 => raw
            .parse()
            .map(ArgumentValue::Int32)
            .map_err(|_| invalid("i32")),
        ArgumentType::Int64 => raw
            .parse()
            .map(ArgumentValue::Int64)
            .map_err(|_| invalid("i64")),
        ArgumentType::String => Ok(ArgumentValue::String(raw.to_owned())),
        ArgumentType::Bool => match raw {
            "true" | "1" => Ok(ArgumentValue::Bool(true)),
            "false" | "0" => Ok(ArgumentValue::Bool(false)),
            _ => Err(invalid("bool")),
        },
        // Any bound text means the switch was given
        ArgumentType::Flag => Ok(ArgumentValue::Flag(true)),
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
