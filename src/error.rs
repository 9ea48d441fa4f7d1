//! Error types for TFS parsing, encoding and dataframe access.
//!
//! Every fallible operation in this crate returns [`Result`], and every
//! failure is one of the [`Error`] variants below.
//!
//! ## Error Categories
//!
//! - **Type Mismatches**: A value or column was read through the wrong accessor
//! - **Unsupported Types**: The operation is not implemented for a [`DataType`]
//!   (notably the binary codec on Bool, Int and Complex columns)
//! - **Lookups**: A property, column or index key was not found, or a position
//!   was out of range
//! - **Parse Errors**: Malformed header lines, bad numeric tokens, rows whose
//!   token count differs from the column count; all carry the 1-based line number
//! - **Binary Errors**: Truncated streams and invalid payloads
//! - **I/O Errors**: File reading/writing failures
//!
//! ## Examples
//!
//! ```rust
//! use tfs_frame::{from_str, Error};
//!
//! let result = from_str("* A\n$ %le\nnot-a-number\n");
//! assert!(matches!(result, Err(Error::Parse { line: 3, .. })));
//! ```

use crate::DataType;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the data model and the codecs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A value or column was accessed as a kind it does not hold
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: DataType, found: DataType },

    /// The operation is not implemented for this data type
    #[error("Unsupported type: {operation} is not implemented for {data_type}")]
    UnsupportedType {
        data_type: String,
        operation: &'static str,
    },

    /// Name lookup failed
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// Positional access beyond bounds
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Malformed text input
    #[error("Parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    /// A column does not share the frame's row count
    #[error("Length mismatch in column {column}: expected {expected} rows, found {found}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Binary input ended before a complete item was read
    #[error("Unexpected end of binary input while reading {0}")]
    Truncated(&'static str),

    /// Binary input or output that cannot be represented
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tfs_frame::{DataType, Error};
    ///
    /// let err = Error::type_mismatch(DataType::Float, DataType::String);
    /// assert!(err.to_string().contains("expected %le"));
    /// ```
    pub fn type_mismatch(expected: DataType, found: DataType) -> Self {
        Error::TypeMismatch { expected, found }
    }

    /// Creates an unsupported type error for `operation` on `data_type`.
    pub fn unsupported(data_type: impl fmt::Display, operation: &'static str) -> Self {
        Error::UnsupportedType {
            data_type: data_type.to_string(),
            operation,
        }
    }

    /// Creates a lookup failure, `kind` names what was looked up.
    pub fn not_found(kind: &'static str, name: &str) -> Self {
        Error::NotFound {
            kind,
            name: name.to_string(),
        }
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    /// Creates a parse error at a 1-based line number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tfs_frame::Error;
    ///
    /// let err = Error::parse(7, "expected 3 fields, found 2");
    /// assert!(err.to_string().contains("line 7"));
    /// ```
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Error::Parse {
            line,
            msg: msg.into(),
        }
    }

    pub fn length_mismatch(column: &str, expected: usize, found: usize) -> Self {
        Error::LengthMismatch {
            column: column.to_string(),
            expected,
            found,
        }
    }

    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Error::InvalidData(msg.into())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Attaches the line number to errors raised below the line level.
    ///
    /// Token conversion errors are produced without knowing where the token
    /// came from; the parser rewrites them into [`Error::Parse`] here.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Error::Parse { msg, .. } => Error::Parse { line, msg },
            other => Error::Parse {
                line,
                msg: other.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

impl From<fmt::Error> for Error {
    fn from(err: fmt::Error) -> Self {
        Error::custom(err)
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
