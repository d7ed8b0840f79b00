use std::error::Error;
use std::fmt::{Display, Formatter, Result};

/// Broad category of a [`ShellError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required arguments were missing or malformed.
    Usage,
    /// A file or process name is not present in its store.
    NotFound,
    /// A create targeted a name that already exists.
    Duplicate,
    /// A numeric argument failed to parse or is out of range.
    Validation,
    /// A memory request would exceed the pool.
    Capacity,
    /// Division by zero or an operator `calc` doesn't know.
    Arithmetic,
    /// The command word is not recognized.
    UnknownCommand,
}

/// Which memory operation found no process to work on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryOp {
    Allocate,
    Free,
}

/// Recoverable failure of a single shell command.
///
/// None of these end the session: the command boundary prints the error's
/// `Display` text and the loop reads the next line. The text of each variant is
/// exactly what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// Holds the complete usage text of the offending command.
    Usage(&'static str),
    FileNotFound(String),
    FileExists(String),
    ProcessNotFound(String),
    ProcessExists(String),
    InvalidExpression,
    InvalidNumbers,
    InvalidMemoryAmount,
    NonPositiveAmount,
    NoProcesses(MemoryOp),
    OutOfMemory,
    DivisionByZero,
    UnsupportedOperator,
    UnknownCommand,
}

impl ShellError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) => ErrorKind::Usage,
            Self::FileNotFound(_) | Self::ProcessNotFound(_) => ErrorKind::NotFound,
            Self::FileExists(_) | Self::ProcessExists(_) => ErrorKind::Duplicate,
            Self::InvalidExpression
            | Self::InvalidNumbers
            | Self::InvalidMemoryAmount
            | Self::NonPositiveAmount
            | Self::NoProcesses(_) => ErrorKind::Validation,
            Self::OutOfMemory => ErrorKind::Capacity,
            Self::DivisionByZero | Self::UnsupportedOperator => ErrorKind::Arithmetic,
            Self::UnknownCommand => ErrorKind::UnknownCommand,
        }
    }
}

impl Error for ShellError {}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Usage(text) => write!(f, "{text}"),
            Self::FileNotFound(name) => write!(f, "File '{name}' not found."),
            Self::FileExists(name) => write!(f, "File '{name}' already exists."),
            Self::ProcessNotFound(name) => write!(f, "Process '{name}' not found."),
            Self::ProcessExists(name) => write!(f, "Process '{name}' already exists."),
            Self::InvalidExpression => {
                write!(f, "Invalid expression. Format: <num1> <operator> <num2>")
            }
            Self::InvalidNumbers => write!(f, "Invalid numbers."),
            Self::InvalidMemoryAmount => write!(f, "Invalid memory amount."),
            Self::NonPositiveAmount => write!(f, "Memory amount must be positive."),
            Self::NoProcesses(MemoryOp::Allocate) => {
                write!(f, "No processes to allocate memory to.")
            }
            Self::NoProcesses(MemoryOp::Free) => write!(f, "No processes to free memory from."),
            Self::OutOfMemory => write!(f, "Error: Not enough memory available."),
            Self::DivisionByZero => write!(f, "Error: Division by zero."),
            Self::UnsupportedOperator => write!(f, "Unsupported operator. Use +, -, *, or /."),
            Self::UnknownCommand => write!(f, "Unknown command. Type 'help' for a list."),
        }
    }
}
