//! TFS text output.
//!
//! The [`Writer`] renders a [`DataFrame`] as `@` property lines, one `*` and one
//! `$` line, then one right-justified row per record:
//!
//! ```rust
//! use tfs_frame::{from_str, to_string};
//!
//! let df = from_str("@ TITLE %s \"t\"\n* A B\n$ %le %s\n1.5 foo\n").unwrap();
//! let text = to_string(&df).unwrap();
//! assert_eq!(from_str(&text).unwrap(), df);
//! ```
//!
//! Fields are whitespace-delimited, so names and String cells must be single
//! non-empty tokens. String property values may contain single spaces between
//! words. A frame that breaks either rule is rejected before anything is
//! written.

use crate::{ColumnData, ColumnOrder, DataFrame, Error, Result, ScalarValue, WriteOptions};
use std::fmt::Write;

/// The TFS text writer.
///
/// Created via [`Writer::new`]; [`Writer::write_frame`] appends one complete
/// table to the internal buffer.
pub struct Writer {
    output: String,
    options: WriteOptions,
}

impl Writer {
    pub fn new(options: WriteOptions) -> Self {
        Writer {
            output: String::with_capacity(1024),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends `df` in text form.
    ///
    /// With [`ColumnOrder::Sorted`] columns are emitted by name, one per
    /// distinct name. A frame without columns produces only property lines.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidData`] for a name or String value the reader would
    /// split differently. The buffer is left untouched in that case.
    pub fn write_frame(&mut self, df: &DataFrame) -> Result<()> {
        let order = self.column_order(df);
        check_frame(df, &order)?;
        let WriteOptions {
            field_width,
            name_width,
            type_width,
            ..
        } = self.options;

        self.output
            .reserve((order.len() * (field_width + 1) + 3) * (df.row_count() + 2));

        for p in df.properties() {
            writeln!(
                self.output,
                "@ {:<name_width$} {:>type_width$} {}",
                p.name(),
                p.value().data_type().as_token(),
                p.value()
            )?;
        }

        if order.is_empty() {
            return Ok(());
        }

        self.output.push_str("* ");
        for &position in &order {
            write!(self.output, "{:>field_width$} ", df.column(position)?.name())?;
        }
        self.output.push_str("\n$ ");
        for &position in &order {
            write!(
                self.output,
                "{:>field_width$} ",
                df.column(position)?.data_type().as_token()
            )?;
        }
        self.output.push('\n');

        for row in 0..df.row_count() {
            self.output.push_str("  ");
            for &position in &order {
                df.column(position)?
                    .write_at(row, field_width, &mut self.output)?;
            }
            self.output.push('\n');
        }
        Ok(())
    }

    fn column_order(&self, df: &DataFrame) -> Vec<usize> {
        match self.options.column_order {
            ColumnOrder::Preserve => (0..df.column_count()).collect(),
            ColumnOrder::Sorted => df
                .column_index()
                .sorted_by_key()
                .into_iter()
                .map(|(_, position)| position)
                .collect(),
        }
    }
}

fn check_token(what: &str, token: &str) -> Result<()> {
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(Error::invalid_data(format!(
            "{what} {token:?} is not a single whitespace-free token"
        )));
    }
    Ok(())
}

// Property values are read back as their tokens joined by single spaces.
fn check_property_text(name: &str, value: &str) -> Result<()> {
    if !value.is_empty() && value.split_whitespace().ne(value.split(' ')) {
        return Err(Error::invalid_data(format!(
            "property {name} value {value:?} does not survive whitespace splitting"
        )));
    }
    Ok(())
}

fn check_frame(df: &DataFrame, order: &[usize]) -> Result<()> {
    for p in df.properties() {
        check_token("property name", p.name())?;
        if let ScalarValue::String(value) = p.value() {
            check_property_text(p.name(), value)?;
        }
    }
    for &position in order {
        let column = df.column(position)?;
        check_token("column name", column.name())?;
        if let ColumnData::String(values) = column.data() {
            for value in values {
                check_token("string cell", value)?;
            }
        }
    }
    Ok(())
}
