use std::{fmt, io};

use crate::core::Pid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Input line with a field count other than three.
    MalformedRecord { line: usize, fields: usize },
    /// Input field that is not a non-negative integer.
    InvalidNumber { line: usize, field: String },
    InvalidQuantum(u64),
    InvalidAlpha(f64),
    DuplicateProcessId(Pid),
    Usage(String),
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRecord { line, fields } => write!(
                f,
                "wrong input format on line {line}: expected 3 fields, found {fields}"
            ),
            Self::InvalidNumber { line, field } => {
                write!(f, "line {line}: {field:?} is not a non-negative integer")
            }
            Self::InvalidQuantum(q) => write!(f, "time quantum must be positive, got {q}"),
            Self::InvalidAlpha(a) => write!(f, "alpha must lie within [0, 1], got {a}"),
            Self::DuplicateProcessId(pid) => write!(f, "process id {pid} appears more than once"),
            Self::Usage(msg) => f.write_str(msg),
            Self::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}
