//! Binary TFS encoding and decoding.
//!
//! The binary mirror of a frame is written and read in a single pass. See
//! [`format`](crate::format) for the layout. Numbers use the native byte
//! order and width of the machine that wrote the file.
//!
//! Only Float and String values are representable, in columns and scalars
//! alike. Anything else fails with [`Error::UnsupportedType`] before a
//! single byte of the frame is written, and is rejected the same way when
//! decoding.
//!
//! ```rust
//! use tfs_frame::{from_binary_slice, from_str, to_binary_vec};
//!
//! let df = from_str("@ TITLE %s \"t\"\n* A B\n$ %le %s\n1.5 foo\n").unwrap();
//! let bytes = to_binary_vec(&df).unwrap();
//! assert_eq!(from_binary_slice(&bytes).unwrap(), df);
//! ```

use crate::{Column, ColumnData, DataFrame, DataType, Error, Property, Result, ScalarValue};
use std::io::{self, Read, Write};

/// Upper bound on capacity reserved from an untrusted element count.
const MAX_PREALLOC: usize = 1 << 16;

/// Streams a [`DataFrame`] into the binary format.
pub struct Encoder<W> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Encoder { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes the whole frame, properties first.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] for Int, Bool or Complex properties and
    /// columns; [`Error::InvalidData`] for strings longer than
    /// `u16::MAX` bytes. Both are detected before anything is written.
    pub fn encode_frame(&mut self, df: &DataFrame) -> Result<()> {
        for p in df.properties() {
            check_property(p)?;
        }
        for c in df.columns() {
            check_column(c)?;
        }

        self.write_u64(df.property_count() as u64)?;
        for p in df.properties() {
            self.encode_property(p)?;
        }
        self.write_u64(df.column_count() as u64)?;
        for c in df.columns() {
            self.encode_column(c)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn encode_property(&mut self, property: &Property) -> Result<()> {
        check_property(property)?;
        self.write_str(property.name())?;
        self.encode_scalar(property.value())
    }

    /// Writes the tag then the payload of one scalar.
    pub fn encode_scalar(&mut self, value: &ScalarValue) -> Result<()> {
        check_scalar(value)?;
        self.write_u32(value.data_type().tag())?;
        match value {
            ScalarValue::String(s) => self.write_str(s),
            ScalarValue::Float(f) => self.write_bytes(&f.to_ne_bytes()),
            ScalarValue::Int(_) | ScalarValue::Bool(_) | ScalarValue::Complex(_) => Err(
                Error::unsupported(value.data_type(), "binary scalar encoding"),
            ),
        }
    }

    pub fn encode_column(&mut self, column: &Column) -> Result<()> {
        check_column(column)?;
        self.write_str(column.name())?;
        self.write_u32(column.data_type().tag())?;
        self.write_u64(column.len() as u64)?;
        match column.data() {
            ColumnData::Float(values) => {
                for v in values {
                    self.write_bytes(&v.to_ne_bytes())?;
                }
                Ok(())
            }
            ColumnData::String(values) => {
                for v in values {
                    self.write_str(v)?;
                }
                Ok(())
            }
            ColumnData::Int(_) | ColumnData::Bool(_) | ColumnData::Complex(_) => Err(
                Error::unsupported(column.data_type(), "binary column encoding"),
            ),
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn write_u32(&mut self, v: u32) -> Result<()> {
        self.write_bytes(&v.to_ne_bytes())
    }

    fn write_u64(&mut self, v: u64) -> Result<()> {
        self.write_bytes(&v.to_ne_bytes())
    }

    fn write_str(&mut self, s: &str) -> Result<()> {
        let len = string_len(s)?;
        self.write_bytes(&len.to_ne_bytes())?;
        self.write_bytes(s.as_bytes())
    }
}

fn string_len(s: &str) -> Result<u16> {
    u16::try_from(s.len()).map_err(|_| {
        Error::invalid_data(format!(
            "string of {} bytes exceeds the u16 length prefix",
            s.len()
        ))
    })
}

fn check_scalar(value: &ScalarValue) -> Result<()> {
    match value {
        ScalarValue::String(s) => string_len(s).map(drop),
        ScalarValue::Float(_) => Ok(()),
        ScalarValue::Int(_) | ScalarValue::Bool(_) | ScalarValue::Complex(_) => Err(
            Error::unsupported(value.data_type(), "binary scalar encoding"),
        ),
    }
}

fn check_property(property: &Property) -> Result<()> {
    string_len(property.name())?;
    check_scalar(property.value())
}

fn check_column(column: &Column) -> Result<()> {
    string_len(column.name())?;
    match column.data() {
        ColumnData::Float(_) => Ok(()),
        ColumnData::String(values) => values.iter().try_for_each(|v| string_len(v).map(drop)),
        ColumnData::Int(_) | ColumnData::Bool(_) | ColumnData::Complex(_) => Err(
            Error::unsupported(column.data_type(), "binary column encoding"),
        ),
    }
}

/// Reads a [`DataFrame`] from the binary format.
pub struct Decoder<R> {
    reader: R,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Decoder { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads one complete frame.
    ///
    /// # Errors
    ///
    /// [`Error::Truncated`] if the input ends early, [`Error::UnsupportedType`]
    /// for tags the format cannot carry, [`Error::InvalidData`] for invalid
    /// UTF-8 and [`Error::LengthMismatch`] for columns of differing length.
    pub fn decode_frame(&mut self) -> Result<DataFrame> {
        let property_count = self.read_count("property count")?;
        let mut properties = Vec::with_capacity(property_count.min(MAX_PREALLOC));
        for _ in 0..property_count {
            properties.push(self.decode_property()?);
        }

        let column_count = self.read_count("column count")?;
        let mut columns = Vec::with_capacity(column_count.min(MAX_PREALLOC));
        for _ in 0..column_count {
            columns.push(self.decode_column()?);
        }

        let df = DataFrame::from_parts(properties, columns)?;
        tracing::debug!(
            properties = df.property_count(),
            columns = df.column_count(),
            rows = df.row_count(),
            "decoded binary frame"
        );
        Ok(df)
    }

    pub fn decode_property(&mut self) -> Result<Property> {
        let name = self.read_string("property name")?;
        let value = self.decode_scalar()?;
        Ok(Property::new(name, value))
    }

    pub fn decode_scalar(&mut self) -> Result<ScalarValue> {
        let data_type = DataType::from_tag(self.read_u32("scalar tag")?)?;
        match data_type {
            DataType::String => Ok(ScalarValue::String(self.read_string("string scalar")?)),
            DataType::Float => Ok(ScalarValue::Float(f64::from_ne_bytes(
                self.read_array("float scalar")?,
            ))),
            DataType::Int | DataType::Bool | DataType::Complex => {
                Err(Error::unsupported(data_type, "binary scalar decoding"))
            }
        }
    }

    pub fn decode_column(&mut self) -> Result<Column> {
        let name = self.read_string("column name")?;
        let data_type = DataType::from_tag(self.read_u32("column tag")?)?;
        let count = self.read_count("element count")?;

        let data = match data_type {
            DataType::Float => {
                let mut values = Vec::with_capacity(count.min(MAX_PREALLOC));
                for _ in 0..count {
                    values.push(f64::from_ne_bytes(self.read_array("float element")?));
                }
                ColumnData::Float(values)
            }
            DataType::String => {
                let mut values = Vec::with_capacity(count.min(MAX_PREALLOC));
                for _ in 0..count {
                    values.push(self.read_string("string element")?);
                }
                ColumnData::String(values)
            }
            DataType::Int | DataType::Bool | DataType::Complex => {
                return Err(Error::unsupported(data_type, "binary column decoding"))
            }
        };
        Ok(Column::from_data(name, data))
    }

    fn read_array<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf, what)?;
        Ok(buf)
    }

    fn read_exact(&mut self, buf: &mut [u8], what: &'static str) -> Result<()> {
        self.reader.read_exact(buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::Truncated(what),
            _ => Error::from(e),
        })
    }

    fn read_u32(&mut self, what: &'static str) -> Result<u32> {
        Ok(u32::from_ne_bytes(self.read_array(what)?))
    }

    fn read_count(&mut self, what: &'static str) -> Result<usize> {
        let count = u64::from_ne_bytes(self.read_array(what)?);
        usize::try_from(count)
            .map_err(|_| Error::invalid_data(format!("{what} {count} does not fit in memory")))
    }

    fn read_string(&mut self, what: &'static str) -> Result<String> {
        let len = u16::from_ne_bytes(self.read_array(what)?);
        let mut buf = vec![0u8; usize::from(len)];
        self.read_exact(&mut buf, what)?;
        String::from_utf8(buf).map_err(|e| Error::invalid_data(format!("{what}: {e}")))
    }
}
