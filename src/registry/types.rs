//! Console command and typed argument definitions

use std::collections::BTreeMap;

/// Type a command argument is converted to before the callback runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentType {
    Float32,
    Float64,
    Int32,
    Int64,
    String,
    Bool,
    /// Boolean switch; absent means `false`, `--name` means `true`
    Flag,
}

/// A converted argument value handed to a command callback
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Float32(f32),
    Float64(f64),
    Int32(i32),
    Int64(i64),
    String(String),
    Bool(bool),
    Flag(bool),
}

/// Declares one argument a command accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDefinition {
    /// Argument name, a valid identifier
    pub name: String,
    pub ty: ArgumentType,
    /// Optional arguments may be omitted; mandatory ones must be bound
    /// either by name or positionally
    pub optional: bool,
}

impl ArgumentDefinition {
    /// Create a mandatory argument definition
    pub fn new(name: impl Into<String>, ty: ArgumentType) -> Self {
        ArgumentDefinition {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    /// Mark the argument as optional
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Fully bound arguments, keyed by definition name
pub type CommandArgs = BTreeMap<String, ArgumentValue>;

/// An executable console command: a callback, the arguments it accepts,
/// and a one-line description for help output
pub struct ConsoleCommand {
    callback: Box<dyn FnMut(CommandArgs) -> std::result::Result<(), String>>,
    args: Vec<ArgumentDefinition>,
    description: String,
}

impl ConsoleCommand {
    pub fn new(
        callback: impl FnMut(CommandArgs) -> std::result::Result<(), String> + 'static,
        args: Vec<ArgumentDefinition>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            callback: Box::new(callback),
            args,
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn definitions(&self) -> &[ArgumentDefinition] {
        &self.args
    }

    /// Run the callback with fully bound arguments
    pub(crate) fn invoke(&mut self, args: CommandArgs) -> std::result::Result<(), String> {
        (self.callback)(args)
    }
}

impl std::fmt::Debug for ConsoleCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleCommand")
            .field("args", &self.args)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
