//! Configuration options for reading and writing TFS data.
//!
//! - [`ReadOptions`]: Post-parse behaviour (secondary index column)
//! - [`WriteOptions`]: Text layout (field widths, column order)
//! - [`ColumnOrder`]: Whether written columns keep frame order or sort by name
//!
//! ## Examples
//!
//! ```rust
//! use tfs_frame::{
//!     from_str_with_options, to_string_with_options, ColumnOrder, ReadOptions, WriteOptions,
//! };
//!
//! let text = "* NAME S\n$ %s %le\nIP1 0.0\nIP5 13329.3\n";
//! let df = from_str_with_options(text, &ReadOptions::new().with_index_column("NAME")).unwrap();
//! assert_eq!(df.row_of("IP5"), Ok(1));
//!
//! let options = WriteOptions::new()
//!     .with_field_width(10)
//!     .with_column_order(ColumnOrder::Sorted);
//! let out = to_string_with_options(&df, &options).unwrap();
//! assert!(out.starts_with("* "));
//! ```

/// Default width of one column field in text output.
pub const FIELD_WIDTH: usize = 15;

/// Default width of a property name in text output.
pub const NAME_WIDTH: usize = 32;

/// Default width of a property type token in text output.
pub const TYPE_WIDTH: usize = 4;

/// Column order used by the text writer.
///
/// # Examples
///
/// ```rust
/// use tfs_frame::ColumnOrder;
///
/// assert_eq!(ColumnOrder::default(), ColumnOrder::Preserve);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColumnOrder {
    /// Columns in the order they were read or added
    #[default]
    Preserve,
    /// Columns sorted by name
    Sorted,
}

/// Options applied while building a frame from text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub index_column: Option<String>,
}

impl ReadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a key to row lookup from this string column after parsing.
    #[must_use]
    pub fn with_index_column(mut self, name: impl Into<String>) -> Self {
        self.index_column = Some(name.into());
        self
    }
}

/// Layout options for the text writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    pub field_width: usize,
    pub name_width: usize,
    pub type_width: usize,
    pub column_order: ColumnOrder,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            field_width: FIELD_WIDTH,
            name_width: NAME_WIDTH,
            type_width: TYPE_WIDTH,
            column_order: ColumnOrder::default(),
        }
    }
}

impl WriteOptions {
    /// Creates default options (15-wide fields, columns in frame order).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tfs_frame::WriteOptions;
    ///
    /// let options = WriteOptions::new();
    /// assert_eq!(options.field_width, 15);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field_width(mut self, width: usize) -> Self {
        self.field_width = width;
        self
    }

    #[must_use]
    pub fn with_name_width(mut self, width: usize) -> Self {
        self.name_width = width;
        self
    }

    #[must_use]
    pub fn with_type_width(mut self, width: usize) -> Self {
        self.type_width = width;
        self
    }

    #[must_use]
    pub fn with_column_order(mut self, order: ColumnOrder) -> Self {
        self.column_order = order;
        self
    }
}
