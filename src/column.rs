//! Homogeneously typed data columns.
//!
//! A [`Column`] owns a name and one typed vector. The vector variant is the
//! column's [`DataType`], so the tag is fixed for the life of the column and
//! every element has the declared kind.
//!
//! ```rust
//! use tfs_frame::{Column, DataType, Error};
//!
//! let mut s = Column::new("S", DataType::Float);
//! s.push_token("0.0").unwrap();
//! s.push(12.5).unwrap();
//!
//! assert_eq!(s.as_floats(), Ok(&[0.0, 12.5][..]));
//! assert!(matches!(s.push("IP1"), Err(Error::TypeMismatch { .. })));
//! ```

use crate::options::FIELD_WIDTH;
use crate::{DataType, Error, Result, ScalarValue};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The typed storage behind a [`Column`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    String(Vec<String>),
    Float(Vec<f64>),
    Int(Vec<i64>),
    Bool(Vec<bool>),
    Complex(Vec<Complex64>),
}

impl ColumnData {
    /// Creates empty storage for `data_type`.
    #[must_use]
    pub fn empty(data_type: DataType) -> Self {
        match data_type {
            DataType::String => ColumnData::String(Vec::new()),
            DataType::Float => ColumnData::Float(Vec::new()),
            DataType::Int => ColumnData::Int(Vec::new()),
            DataType::Bool => ColumnData::Bool(Vec::new()),
            DataType::Complex => ColumnData::Complex(Vec::new()),
        }
    }

    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            ColumnData::String(_) => DataType::String,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::Int(_) => DataType::Int,
            ColumnData::Bool(_) => DataType::Bool,
            ColumnData::Complex(_) => DataType::Complex,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnData::String(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Int(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Complex(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named, homogeneously typed column of a [`DataFrame`](crate::DataFrame).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Creates an empty column of `data_type`.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Column {
            name: name.into(),
            data: ColumnData::empty(data_type),
        }
    }

    /// Wraps already-typed storage.
    pub fn from_data(name: impl Into<String>, data: ColumnData) -> Self {
        Column {
            name: name.into(),
            data,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reserves capacity for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        match &mut self.data {
            ColumnData::String(v) => v.reserve(additional),
            ColumnData::Float(v) => v.reserve(additional),
            ColumnData::Int(v) => v.reserve(additional),
            ColumnData::Bool(v) => v.reserve(additional),
            ColumnData::Complex(v) => v.reserve(additional),
        }
    }

    /// Appends a value of the column's own kind.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the value's kind differs from the column's
    /// tag. Ints are not widened into Float columns.
    pub fn push(&mut self, value: impl Into<ScalarValue>) -> Result<()> {
        match (&mut self.data, value.into()) {
            (ColumnData::String(v), ScalarValue::String(s)) => v.push(s),
            (ColumnData::Float(v), ScalarValue::Float(f)) => v.push(f),
            (ColumnData::Int(v), ScalarValue::Int(i)) => v.push(i),
            (ColumnData::Bool(v), ScalarValue::Bool(b)) => v.push(b),
            (ColumnData::Complex(v), ScalarValue::Complex(c)) => v.push(c),
            (data, other) => {
                return Err(Error::type_mismatch(data.data_type(), other.data_type()))
            }
        }
        Ok(())
    }

    /// Converts one whitespace-delimited text token and appends it.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] when the token is not a valid literal of the column's
    /// type. Nothing is appended in that case.
    pub fn push_token(&mut self, token: &str) -> Result<()> {
        let value = ScalarValue::parse_token(self.data_type(), token)?;
        self.push(value)
    }

    /// Returns element `index` as a [`ScalarValue`].
    pub fn get(&self, index: usize) -> Result<ScalarValue> {
        if index >= self.len() {
            return Err(Error::index_out_of_range(index, self.len()));
        }
        Ok(match &self.data {
            ColumnData::String(v) => ScalarValue::String(v[index].clone()),
            ColumnData::Float(v) => ScalarValue::Float(v[index]),
            ColumnData::Int(v) => ScalarValue::Int(v[index]),
            ColumnData::Bool(v) => ScalarValue::Bool(v[index]),
            ColumnData::Complex(v) => ScalarValue::Complex(v[index]),
        })
    }

    /// Writes element `index` right-justified in a field of `width`, followed
    /// by one separating space.
    pub fn write_at<W: fmt::Write>(&self, index: usize, width: usize, out: &mut W) -> Result<()> {
        if index >= self.len() {
            return Err(Error::index_out_of_range(index, self.len()));
        }
        let written = match &self.data {
            ColumnData::String(v) => write!(out, "{:>width$} ", v[index]),
            ColumnData::Float(v) => write!(out, "{:>width$} ", v[index]),
            ColumnData::Int(v) => write!(out, "{:>width$} ", v[index]),
            ColumnData::Bool(v) => write!(out, "{:>width$} ", v[index]),
            // Complex64's Display ignores width, render it first
            ColumnData::Complex(v) => write!(out, "{:>width$} ", v[index].to_string()),
        };
        written.map_err(Error::custom)
    }

    /// Element `index` rendered as a default-width text field.
    pub fn display_at(&self, index: usize) -> Result<String> {
        let mut field = String::with_capacity(FIELD_WIDTH + 1);
        self.write_at(index, FIELD_WIDTH, &mut field)?;
        Ok(field)
    }

    pub fn as_strings(&self) -> Result<&[String]> {
        match &self.data {
            ColumnData::String(v) => Ok(v),
            other => Err(Error::type_mismatch(DataType::String, other.data_type())),
        }
    }

    pub fn as_floats(&self) -> Result<&[f64]> {
        match &self.data {
            ColumnData::Float(v) => Ok(v),
            other => Err(Error::type_mismatch(DataType::Float, other.data_type())),
        }
    }

    pub fn as_ints(&self) -> Result<&[i64]> {
        match &self.data {
            ColumnData::Int(v) => Ok(v),
            other => Err(Error::type_mismatch(DataType::Int, other.data_type())),
        }
    }

    pub fn as_bools(&self) -> Result<&[bool]> {
        match &self.data {
            ColumnData::Bool(v) => Ok(v),
            other => Err(Error::type_mismatch(DataType::Bool, other.data_type())),
        }
    }

    pub fn as_complexes(&self) -> Result<&[Complex64]> {
        match &self.data {
            ColumnData::Complex(v) => Ok(v),
            other => Err(Error::type_mismatch(DataType::Complex, other.data_type())),
        }
    }
}

impl From<(String, Vec<f64>)> for Column {
    fn from((name, values): (String, Vec<f64>)) -> Self {
        Column::from_data(name, ColumnData::Float(values))
    }
}

impl From<(String, Vec<String>)> for Column {
    fn from((name, values): (String, Vec<String>)) -> Self {
        Column::from_data(name, ColumnData::String(values))
    }
}
