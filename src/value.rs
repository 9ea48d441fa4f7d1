//! Scalar values and the TFS type tags.
//!
//! ## Core Types
//!
//! - [`DataType`]: The type tag of a property or column (`%s`, `%le`, `%d`, `%b`, `%lz`)
//! - [`ScalarValue`]: A single datum holding exactly one payload of its tag
//!
//! ## Typed Access
//!
//! Accessors fail with [`Error::TypeMismatch`] unless the tag matches. The one
//! implicit conversion is [`ScalarValue::as_complex`] on a Float, which yields a
//! zero imaginary part.
//!
//! ```rust
//! use tfs_frame::{Error, ScalarValue};
//!
//! let value = ScalarValue::from(2.5);
//! assert_eq!(value.as_float(), Ok(2.5));
//! assert_eq!(value.as_complex().map(|c| c.im), Ok(0.0));
//! assert!(matches!(value.as_str(), Err(Error::TypeMismatch { .. })));
//! ```

use crate::{Error, Result};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The type tag of a TFS property or column.
///
/// The discriminants are the tag values written by the binary codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum DataType {
    String = 0,
    Float = 1,
    Int = 2,
    Bool = 3,
    Complex = 4,
}

impl DataType {
    /// Maps a `$`-line or `@`-line type token to its tag.
    ///
    /// Unrecognized tokens (including width-qualified `%20s`) are strings.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tfs_frame::DataType;
    ///
    /// assert_eq!(DataType::from_token("%le"), DataType::Float);
    /// assert_eq!(DataType::from_token("%d"), DataType::Int);
    /// assert_eq!(DataType::from_token("%20s"), DataType::String);
    /// ```
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "%d" | "%hd" | "%ld" => DataType::Int,
            "%le" | "%lf" | "%f" | "%e" => DataType::Float,
            "%b" => DataType::Bool,
            "%lz" => DataType::Complex,
            _ => DataType::String,
        }
    }

    /// The token the text writer emits for this tag.
    #[must_use]
    pub const fn as_token(&self) -> &'static str {
        match self {
            DataType::String => "%s",
            DataType::Float => "%le",
            DataType::Int => "%d",
            DataType::Bool => "%b",
            DataType::Complex => "%lz",
        }
    }

    /// Decodes a binary tag value.
    pub fn from_tag(tag: u32) -> Result<Self> {
        match tag {
            0 => Ok(DataType::String),
            1 => Ok(DataType::Float),
            2 => Ok(DataType::Int),
            3 => Ok(DataType::Bool),
            4 => Ok(DataType::Complex),
            other => Err(Error::unsupported(
                format!("tag {other}"),
                "binary decoding",
            )),
        }
    }

    #[inline]
    #[must_use]
    pub const fn tag(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_token())
    }
}

/// A single tagged TFS datum.
///
/// The variant is the tag: there is no way to build a value whose payload
/// disagrees with [`ScalarValue::data_type`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Complex(Complex64),
    String(String),
}

impl ScalarValue {
    #[inline]
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            ScalarValue::Int(_) => DataType::Int,
            ScalarValue::Float(_) => DataType::Float,
            ScalarValue::Bool(_) => DataType::Bool,
            ScalarValue::Complex(_) => DataType::Complex,
            ScalarValue::String(_) => DataType::String,
        }
    }

    /// Returns the integer payload.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is an Int.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            ScalarValue::Int(i) => Ok(*i),
            other => Err(Error::type_mismatch(DataType::Int, other.data_type())),
        }
    }

    /// Returns the floating-point payload.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is a Float.
    pub fn as_float(&self) -> Result<f64> {
        match self {
            ScalarValue::Float(f) => Ok(*f),
            other => Err(Error::type_mismatch(DataType::Float, other.data_type())),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            ScalarValue::Bool(b) => Ok(*b),
            other => Err(Error::type_mismatch(DataType::Bool, other.data_type())),
        }
    }

    /// Returns the complex payload, or a Float widened to `(value, 0)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tfs_frame::ScalarValue;
    /// use num_complex::Complex64;
    ///
    /// let value = ScalarValue::from(1.5);
    /// assert_eq!(value.as_complex(), Ok(Complex64::new(1.5, 0.0)));
    /// ```
    pub fn as_complex(&self) -> Result<Complex64> {
        match self {
            ScalarValue::Complex(c) => Ok(*c),
            ScalarValue::Float(f) => Ok(Complex64::new(*f, 0.0)),
            other => Err(Error::type_mismatch(DataType::Complex, other.data_type())),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            ScalarValue::String(s) => Ok(s),
            other => Err(Error::type_mismatch(DataType::String, other.data_type())),
        }
    }

    /// Parses a single text token as a value of `data_type`.
    ///
    /// Strings are taken verbatim. Numeric, bool and complex tokens must parse
    /// completely; there is no fallback to zero.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] (with line 0, the caller attaches the real line) when
    /// the token is not a valid literal of `data_type`.
    pub fn parse_token(data_type: DataType, token: &str) -> Result<Self> {
        let invalid = || Error::parse(0, format!("invalid {data_type} token '{token}'"));
        match data_type {
            DataType::String => Ok(ScalarValue::String(token.to_string())),
            DataType::Int => token
                .parse::<i64>()
                .map(ScalarValue::Int)
                .map_err(|_| invalid()),
            DataType::Float => token
                .parse::<f64>()
                .map(ScalarValue::Float)
                .map_err(|_| invalid()),
            DataType::Bool => parse_bool(token)
                .map(ScalarValue::Bool)
                .ok_or_else(invalid),
            DataType::Complex => Complex64::from_str(token)
                .map(ScalarValue::Complex)
                .map_err(|_| invalid()),
        }
    }
}

pub(crate) fn parse_bool(token: &str) -> Option<bool> {
    if token == "1" || token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token == "0" || token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Int(i) => write!(f, "{}", i),
            ScalarValue::Float(fl) => write!(f, "{}", fl),
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Complex(c) => write!(f, "{}", c),
            ScalarValue::String(s) => f.write_str(s),
        }
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        ScalarValue::Int(value as i64)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int(value)
    }
}

impl From<f32> for ScalarValue {
    fn from(value: f32) -> Self {
        ScalarValue::Float(value as f64)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Bool(value)
    }
}

impl From<Complex64> for ScalarValue {
    fn from(value: Complex64) -> Self {
        ScalarValue::Complex(value)
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::String(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::String(value.to_string())
    }
}
