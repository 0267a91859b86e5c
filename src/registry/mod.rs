//! Command registry
//! Maps command names to console commands and provides autocomplete suggestions

use std::collections::BTreeMap;

mod types;

pub use types::{ArgumentDefinition, ArgumentType, ArgumentValue, CommandArgs, ConsoleCommand};

/// Registry of console commands, sorted by name
///
/// Lookup is exact and case-sensitive; prefix matching is exposed only as
/// [`suggestions`](CommandRegistry::suggestions) for autocomplete and
/// did-you-mean hints.
pub struct CommandRegistry {
    commands: BTreeMap<String, ConsoleCommand>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        CommandRegistry {
            commands: BTreeMap::new(),
        }
    }

    /// Register a command under `name`, replacing (with a warning) any
    /// command already registered under that name
    pub fn register(mut self, name: impl Into<String>, command: ConsoleCommand) -> Self {
        let name = name.into();
        if self.commands.insert(name.clone(), command).is_some() {
            log::warn!("console command '{name}' was overwritten");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ConsoleCommand> {
        self.commands.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ConsoleCommand> {
        self.commands.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Command names starting with `prefix`, in sorted order. An empty
    /// prefix yields nothing: there is no input to complete yet.
    pub fn suggestions(&self, prefix: &str) -> Vec<String> {
        if prefix.is_empty() {
            return Vec::new();
        }
        self.commands
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// All registered command names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
