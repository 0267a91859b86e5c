//! Centralized error handling for the console
//! Defines the crate error type, severity levels, and error codes

use std::fmt;

use crate::parser::ParseError;

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational message (not really an error)
    Info,
    /// Warning - something might be wrong but operation can continue
    Warning,
    /// Standard error - the command failed but the console can continue
    Error,
    /// Critical error - the console itself is in a bad state
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Category of the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Command line parsing errors
    Parse,
    /// Argument binding errors (types, arity, duplicates)
    Binding,
    /// Command lookup or callback execution errors
    Execution,
    /// Errors that don't fit other categories
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "Parse"),
            Self::Binding => write!(f, "Binding"),
            Self::Execution => write!(f, "Execution"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A structured console error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleError {
    /// How serious the error is
    pub severity: ErrorSeverity,
    /// What kind of error occurred
    pub kind: ErrorKind,
    /// Machine-readable error code (e.g. "UNKNOWN_COMMAND")
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl ConsoleError {
    /// Create a new standard error (Severity: Error)
    pub fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new warning (Severity: Warning)
    pub fn warning(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Warning,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Check if the message contains a substring (useful for tests)
    pub fn contains_msg(&self, sub: &str) -> bool {
        self.message.contains(sub)
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}({}): {}",
            self.severity, self.kind, self.code, self.message
        )
    }
}

impl std::error::Error for ConsoleError {}

impl From<ParseError> for ConsoleError {
    fn from(err: ParseError) -> Self {
        let code = match &err {
            ParseError::EmptyCommand => "EMPTY_COMMAND",
            ParseError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            ParseError::UnterminatedString { .. } => "UNTERMINATED_STRING",
            ParseError::InvalidEscape { .. } => "INVALID_ESCAPE",
            ParseError::EmptyValue { .. } => "EMPTY_VALUE",
            ParseError::MalformedParameter { .. } => "MALFORMED_PARAMETER",
        };
        Self::new(ErrorKind::Parse, code, err.to_string())
    }
}

/// Result alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;
