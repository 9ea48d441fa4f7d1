//! # tfs_frame
//!
//! A typed dataframe for TFS tables, the column-oriented text format used to
//! exchange accelerator-physics simulation results, together with a compact
//! binary mirror of the same data.
//!
//! ## What is TFS?
//!
//! A TFS file is a header of sigil-prefixed lines followed by whitespace
//! separated rows:
//!
//! ```text
//! @ TITLE  %s  "twiss"
//! @ Q1     %le 62.31
//! * NAME   S       BETX
//! $ %s     %le     %le
//!   "IP1"  0.0     0.55
//!   "IP5"  13329.3 0.55
//! ```
//!
//! ## Key Features
//!
//! - **Typed Model**: [`ScalarValue`], [`Property`], [`Column`] and [`DataFrame`],
//!   with accessors that fail on the wrong type instead of casting
//! - **Text Codec**: A streaming, line-at-a-time [`Parser`] and a fixed-width [`Writer`]
//! - **Binary Codec**: A self-framed [`Encoder`]/[`Decoder`] pair for fast round-trips
//! - **Strict Parsing**: Unparsable numbers and ragged rows are errors with line numbers
//! - **Serde Compatible**: Every model type implements `Serialize` and `Deserialize`
//!
//! ## Quick Start
//!
//! ```rust
//! use tfs_frame::{from_str, to_string, DataType};
//!
//! let text = "@ TITLE %s \"t\"\n* A B\n$ %le %s\n1.5 foo\n";
//! let df = from_str(text).unwrap();
//!
//! assert_eq!(df.row_count(), 1);
//! assert_eq!(df.column_count(), 2);
//! let a = df.column_by_name("A").unwrap();
//! assert_eq!(a.data_type(), DataType::Float);
//! assert_eq!(a.as_floats().unwrap(), &[1.5]);
//!
//! // Write it back out
//! let out = to_string(&df).unwrap();
//! assert_eq!(from_str(&out).unwrap(), df);
//! ```
//!
//! ### Binary round-trip
//!
//! ```rust
//! use tfs_frame::{from_binary_slice, from_str, to_binary_vec};
//!
//! let df = from_str("* S\n$ %le\n0.0\n1.0\n").unwrap();
//! let bytes = to_binary_vec(&df).unwrap();
//! assert_eq!(from_binary_slice(&bytes).unwrap(), df);
//! ```
//!
//! ### Files
//!
//! [`read_file`] and [`write_file`] pick the codec from the extension:
//! `.btfs` is binary, `.tfs`, `.dat` and anything else is text.
//!
//! ## Concurrency
//!
//! A [`DataFrame`] is a plain value without interior mutability. Share it
//! by reference for concurrent reads; it is only mutated while being built.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (header completion, file loads,
//! duplicate names) and never installs a subscriber itself.
//!
//! ## Format Specification
//!
//! See the [`format`] module for the text grammar and the binary layout.

pub mod binary;
pub mod column;
pub mod error;
pub mod format;
pub mod frame;
pub mod map;
pub mod options;
pub mod parser;
pub mod property;
pub mod value;
pub mod writer;

pub use binary::{Decoder, Encoder};
pub use column::{Column, ColumnData};
pub use error::{Error, Result};
pub use format::Format;
pub use frame::DataFrame;
pub use map::KeyIndex;
pub use options::{ColumnOrder, ReadOptions, WriteOptions};
pub use parser::Parser;
pub use property::Property;
pub use value::{DataType, ScalarValue};
pub use writer::Writer;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Parse a TFS text table.
///
/// # Examples
///
/// ```rust
/// use tfs_frame::from_str;
///
/// let df = from_str("* X\n$ %d\n1\n2\n").unwrap();
/// assert_eq!(df.row_count(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] with the offending line number for malformed
/// input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<DataFrame> {
    from_str_with_options(s, &ReadOptions::default())
}

/// Parse a TFS text table with custom options.
///
/// # Errors
///
/// Returns an error if the input is malformed or the index column is missing
/// or not a string column.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: &ReadOptions) -> Result<DataFrame> {
    let mut parser = Parser::new();
    for line in s.lines() {
        parser.feed_line(line)?;
    }
    parser.finish(options)
}

/// Parse a TFS text table from a reader, one line at a time.
///
/// # Examples
///
/// ```rust
/// use tfs_frame::{from_reader, ReadOptions};
/// use std::io::Cursor;
///
/// let cursor = Cursor::new("* X\n$ %s\nA\n");
/// let df = from_reader(cursor, &ReadOptions::default()).unwrap();
/// assert_eq!(df.row_count(), 1);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the input is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R, options: &ReadOptions) -> Result<DataFrame>
where
    R: io::Read,
{
    let mut parser = Parser::new();
    for line in BufReader::new(reader).lines() {
        parser.feed_line(&line?)?;
    }
    parser.finish(options)
}

/// Render a frame as TFS text.
///
/// # Errors
///
/// [`Error::InvalidData`] if a name or String value cannot be delimited in
/// text, for example an empty cell or one containing whitespace.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(df: &DataFrame) -> Result<String> {
    to_string_with_options(df, &WriteOptions::default())
}

/// Render a frame as TFS text with custom layout options.
///
/// # Examples
///
/// ```rust
/// use tfs_frame::{from_str, to_string_with_options, WriteOptions};
///
/// let df = from_str("* X\n$ %d\n1\n").unwrap();
/// let out = to_string_with_options(&df, &WriteOptions::new().with_field_width(3)).unwrap();
/// assert_eq!(out, "*   X \n$  %d \n    1 \n");
/// ```
///
/// # Errors
///
/// [`Error::InvalidData`] if a name or String value cannot be delimited in
/// text, for example an empty cell or one containing whitespace.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(df: &DataFrame, options: &WriteOptions) -> Result<String> {
    let mut writer = Writer::new(options.clone());
    writer.write_frame(df)?;
    Ok(writer.into_inner())
}

/// Write a frame as TFS text to a writer.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(mut writer: W, df: &DataFrame, options: &WriteOptions) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(df, options)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Encode a frame in the binary format.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if the frame holds Int, Bool or Complex
/// columns or Bool or Complex properties.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_binary_vec(df: &DataFrame) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(Vec::new());
    encoder.encode_frame(df)?;
    Ok(encoder.into_inner())
}

/// Encode a frame in the binary format into a writer.
///
/// # Errors
///
/// See [`to_binary_vec`]; also fails if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_binary_writer<W>(writer: W, df: &DataFrame) -> Result<()>
where
    W: io::Write,
{
    Encoder::new(writer).encode_frame(df)
}

/// Decode a binary frame from bytes.
///
/// # Errors
///
/// Returns an error for truncated or invalid input and for unsupported types.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_binary_slice(bytes: &[u8]) -> Result<DataFrame> {
    Decoder::new(bytes).decode_frame()
}

/// Decode a binary frame from a reader.
///
/// # Errors
///
/// Returns an error if reading fails, for truncated or invalid input and for
/// unsupported types.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_binary_reader<R>(reader: R) -> Result<DataFrame>
where
    R: io::Read,
{
    Decoder::new(BufReader::new(reader)).decode_frame()
}

/// Load a frame from `path`, choosing the codec by extension.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened, plus any codec error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_file(path: impl AsRef<Path>) -> Result<DataFrame> {
    read_file_with_options(path, &ReadOptions::default())
}

/// Load a frame from `path` with custom read options.
///
/// A secondary index is built for binary files too.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened, plus any codec error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_file_with_options(path: impl AsRef<Path>, options: &ReadOptions) -> Result<DataFrame> {
    let path = path.as_ref();
    let format = Format::from_path(path);
    let file = File::open(path)
        .map_err(|e| Error::io(&format!("cannot open {}: {}", path.display(), e)))?;

    let df = match format {
        Format::Text => from_reader(file, options)?,
        Format::Binary => {
            let mut df = from_binary_reader(file)?;
            if let Some(index) = &options.index_column {
                df.build_index(index)?;
            }
            df
        }
    };
    tracing::info!(
        path = %path.display(),
        ?format,
        rows = df.row_count(),
        columns = df.column_count(),
        "loaded tfs file"
    );
    Ok(df)
}

/// Save a frame to `path`, choosing the codec by extension.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created, plus any codec error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_file(df: &DataFrame, path: impl AsRef<Path>) -> Result<()> {
    write_file_with_options(df, path, &WriteOptions::default())
}

/// Save a frame to `path` with custom text layout options.
///
/// The binary codec ignores `options`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created, plus any codec error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write_file_with_options(
    df: &DataFrame,
    path: impl AsRef<Path>,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path);

    // Encode before touching the file so a rejected frame leaves no output
    let bytes = match format {
        Format::Text => to_string_with_options(df, options)?.into_bytes(),
        Format::Binary => to_binary_vec(df)?,
    };
    let file = File::create(path)
        .map_err(|e| Error::io(&format!("cannot create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;

    tracing::info!(
        path = %path.display(),
        ?format,
        rows = df.row_count(),
        columns = df.column_count(),
        "wrote tfs file"
    );
    Ok(())
}
