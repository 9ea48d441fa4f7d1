//! TFS text parsing.
//!
//! The [`Parser`] consumes one line at a time and moves through three phases:
//! header lines (`@`, `*`, `$` in any order), the header latch once names and
//! types agree, then data rows. Most users should use the high-level functions
//! in the crate root:
//!
//! ```rust
//! use tfs_frame::from_str;
//!
//! let df = from_str("@ TITLE %s \"t\"\n* A B\n$ %le %s\n1.5 foo\n").unwrap();
//! assert_eq!(df.row_count(), 1);
//! assert_eq!(df.column_by_name("A").unwrap().as_floats(), Ok(&[1.5][..]));
//! ```
//!
//! ## Driving the parser directly
//!
//! ```rust
//! use tfs_frame::{Parser, ReadOptions};
//!
//! let mut parser = Parser::new();
//! for line in ["* X", "$ %d"] {
//!     parser.feed_line(line).unwrap();
//! }
//! assert!(parser.is_header_complete());
//! parser.feed_line("  7").unwrap();
//! let df = parser.finish(&ReadOptions::default()).unwrap();
//! assert_eq!(df.column(0).unwrap().as_ints(), Ok(&[7][..]));
//! ```

use crate::{Column, DataFrame, DataType, Error, Property, ReadOptions, Result, ScalarValue};

/// Incremental TFS text parser.
///
/// Created via [`Parser::new`], fed with [`Parser::feed_line`] and turned into a
/// [`DataFrame`] by [`Parser::finish`]. Any error leaves the parser unusable;
/// the caller discards it together with everything read so far.
#[derive(Debug, Default)]
pub struct Parser {
    properties: Vec<Property>,
    names: Option<Vec<String>>,
    columns: Option<Vec<Column>>,
    header_complete: bool,
    line: usize,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// `true` once names and types have both been read and their counts agree.
    #[must_use]
    pub fn is_header_complete(&self) -> bool {
        self.header_complete
    }

    /// Consumes one line of input, without its line terminator.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for malformed header lines, data rows before the header
    /// is complete, bad tokens and rows with the wrong number of fields.
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        self.line += 1;
        if line.trim().is_empty() {
            return Ok(());
        }
        if self.header_complete {
            return self.read_row(line);
        }

        // Sigils are ASCII, slicing past them stays on a char boundary
        match line.as_bytes()[0] {
            b'@' => self.read_property(&line[1..])?,
            b'*' => self.read_names(&line[1..])?,
            b'$' => self.read_types(&line[1..])?,
            _ => {
                return Err(Error::parse(
                    self.line,
                    "data row before the column header is complete",
                ))
            }
        }
        self.check_header()
    }

    /// Ends the input and assembles the frame.
    ///
    /// If `options` names an index column, the key to row lookup is built
    /// from it.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if only one of the name and type lines was seen, plus
    /// any error from building the index.
    pub fn finish(self, options: &ReadOptions) -> Result<DataFrame> {
        let columns = match (self.header_complete, self.names, self.columns) {
            (true, _, Some(columns)) => columns,
            (_, None, None) => Vec::new(),
            (_, Some(_), None) => {
                return Err(Error::parse(self.line, "column name line without a type line"))
            }
            (_, _, Some(_)) => {
                return Err(Error::parse(self.line, "column type line without a name line"))
            }
        };

        let mut df = DataFrame::from_parts(self.properties, columns)?;
        if let Some(index) = &options.index_column {
            df.build_index(index)?;
        }
        Ok(df)
    }

    fn read_property(&mut self, rest: &str) -> Result<()> {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        let (name, type_token, values) = match tokens.as_slice() {
            [name, type_token, values @ ..] => (*name, *type_token, values),
            _ => {
                return Err(Error::parse(
                    self.line,
                    "property line needs a name and a type",
                ))
            }
        };

        let value = match DataType::from_token(type_token) {
            DataType::String => ScalarValue::String(values.join(" ")),
            data_type => {
                let token = values.first().ok_or_else(|| {
                    Error::parse(self.line, format!("property {name} has no value"))
                })?;
                ScalarValue::parse_token(data_type, token)
                    .map_err(|e| e.at_line(self.line))?
            }
        };
        self.properties.push(Property::new(name, value));
        Ok(())
    }

    fn read_names(&mut self, rest: &str) -> Result<()> {
        if self.names.is_some() {
            return Err(Error::parse(self.line, "duplicate column name line"));
        }
        let names: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
        if names.is_empty() {
            return Err(Error::parse(self.line, "column name line without names"));
        }
        self.names = Some(names);
        Ok(())
    }

    fn read_types(&mut self, rest: &str) -> Result<()> {
        if self.columns.is_some() {
            return Err(Error::parse(self.line, "duplicate column type line"));
        }
        let columns: Vec<Column> = rest
            .split_whitespace()
            .map(|token| Column::new(String::new(), DataType::from_token(token)))
            .collect();
        if columns.is_empty() {
            return Err(Error::parse(self.line, "column type line without types"));
        }
        for (position, column) in columns.iter().enumerate() {
            tracing::debug!(position, data_type = %column.data_type(), "new column");
        }
        self.columns = Some(columns);
        Ok(())
    }

    fn check_header(&mut self) -> Result<()> {
        let (Some(names), Some(columns)) = (&self.names, &mut self.columns) else {
            return Ok(());
        };
        if names.len() != columns.len() {
            return Err(Error::parse(
                self.line,
                format!(
                    "{} column names but {} column types",
                    names.len(),
                    columns.len()
                ),
            ));
        }
        for (column, name) in columns.iter_mut().zip(names) {
            column.set_name(name.as_str());
        }
        self.header_complete = true;
        tracing::debug!(columns = columns.len(), line = self.line, "header complete");
        Ok(())
    }

    fn read_row(&mut self, line: &str) -> Result<()> {
        let columns = match self.columns.as_mut() {
            Some(columns) => columns,
            None => return Err(Error::parse(self.line, "data row without columns")),
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != columns.len() {
            return Err(Error::parse(
                self.line,
                format!(
                    "expected {} fields, found {}",
                    columns.len(),
                    tokens.len()
                ),
            ));
        }
        for (column, token) in columns.iter_mut().zip(tokens) {
            column.push_token(token).map_err(|e| e.at_line(self.line))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<DataFrame> {
        let mut parser = Parser::new();
        for line in text.lines() {
            parser.feed_line(line)?;
        }
        parser.finish(&ReadOptions::default())
    }

    #[test]
    fn test_latch_waits_for_both_lines() {
        let mut parser = Parser::new();
        parser.feed_line("* A B").unwrap();
        assert!(!parser.is_header_complete());
        parser.feed_line("@ X %d 1").unwrap();
        assert!(!parser.is_header_complete());
        parser.feed_line("$ %le %s").unwrap();
        assert!(parser.is_header_complete());
    }

    #[test]
    fn test_types_before_names() {
        let df = parse("$ %d %s\n* N LABEL\n3 x\n").unwrap();
        assert_eq!(df.column(0).unwrap().name(), "N");
        assert_eq!(df.column(1).unwrap().name(), "LABEL");
        assert_eq!(df.column_by_name("N").unwrap().as_ints(), Ok(&[3][..]));
    }

    #[test]
    fn test_sigil_without_space() {
        let df = parse("@TITLE %s t\n*A\n$%le\n1\n").unwrap();
        assert_eq!(df.property_by_name("TITLE").unwrap().value().as_str(), Ok("t"));
        assert_eq!(df.column_by_name("A").unwrap().as_floats(), Ok(&[1.0][..]));
    }

    #[test]
    fn test_string_property_joins_tokens() {
        let df = parse("@ ORIGIN %16s \"5.07.00   Linux 64\"\n").unwrap();
        assert_eq!(
            df.property(0).unwrap().value().as_str(),
            Ok("\"5.07.00 Linux 64\"")
        );
    }

    #[test]
    fn test_numeric_property_values() {
        let df = parse("@ N %d 12\n@ E %le 6.8e3\n@ ON %b true\n").unwrap();
        assert_eq!(df.property(0).unwrap().value(), &ScalarValue::Int(12));
        assert_eq!(df.property(1).unwrap().value(), &ScalarValue::Float(6800.0));
        assert_eq!(df.property(2).unwrap().value(), &ScalarValue::Bool(true));
        assert_eq!(df.column_count(), 0);
    }

    #[test]
    fn test_bad_numeric_property_is_error() {
        assert_eq!(
            parse("@ Q1 %le sixty\n").unwrap_err(),
            Error::parse(1, "invalid %le token 'sixty'")
        );
        assert!(matches!(
            parse("@ Q1 %le\n"),
            Err(Error::Parse { line: 1, .. })
        ));
        assert!(matches!(parse("@ Q1\n"), Err(Error::Parse { line: 1, .. })));
    }

    #[test]
    fn test_row_arity_is_checked() {
        let short = parse("* A B\n$ %le %le\n1 2\n3\n").unwrap_err();
        assert_eq!(short, Error::parse(4, "expected 2 fields, found 1"));

        let long = parse("* A\n$ %le\n1 2\n").unwrap_err();
        assert_eq!(long, Error::parse(3, "expected 1 fields, found 2"));
    }

    #[test]
    fn test_header_count_mismatch() {
        assert!(matches!(
            parse("* A B\n$ %le\n"),
            Err(Error::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_data_before_header() {
        assert_eq!(
            parse("* A\n1.0\n").unwrap_err(),
            Error::parse(2, "data row before the column header is complete")
        );
    }

    #[test]
    fn test_incomplete_header_at_end() {
        assert!(matches!(parse("* A\n"), Err(Error::Parse { .. })));
        assert!(matches!(parse("$ %s\n"), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_duplicate_header_lines() {
        assert!(parse("* A\n* B\n$ %s\n").is_err());
        assert!(parse("$ %s %s\n$ %s\n* A\n").is_err());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let df = parse("\n* A\n\n$ %d\n  \n1\n\n2\n").unwrap();
        assert_eq!(df.column(0).unwrap().as_ints(), Ok(&[1, 2][..]));
    }

    #[test]
    fn test_sigil_lines_after_latch_are_rows() {
        let df = parse("* A\n$ %s\n@\n").unwrap();
        assert_eq!(df.column(0).unwrap().as_strings().unwrap(), &["@".to_string()]);
    }

    #[test]
    fn test_bad_row_token_reports_line() {
        assert_eq!(
            parse("* A\n$ %d\n1\nx\n").unwrap_err(),
            Error::parse(4, "invalid %d token 'x'")
        );
    }

    #[derive(Clone, Default)]
    struct Capture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_column_creation_logged_at_debug() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut parser = Parser::new();
            parser.feed_line("$ %le %s").unwrap();
        });

        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert_eq!(logs.matches("new column").count(), 2);
    }
}
