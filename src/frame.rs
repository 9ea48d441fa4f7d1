//! The owning TFS dataframe.
//!
//! A [`DataFrame`] holds an ordered list of [`Property`] entries, an ordered
//! list of equally long [`Column`]s, a name to column lookup and an optional
//! secondary key to row lookup built from one string column.
//!
//! Frames are built by the codecs ([`from_str`](crate::from_str),
//! [`from_binary_slice`](crate::from_binary_slice), ...) or programmatically
//! with [`DataFrame::add_column`] and [`DataFrame::add_property`]. A failed
//! parse never yields a partially built frame.
//!
//! ```rust
//! use tfs_frame::{Column, DataFrame, DataType};
//!
//! let mut df = DataFrame::new();
//! df.add_property("TITLE", "\"twiss\"");
//! df.add_column(Column::from(("S".to_string(), vec![0.0, 1.5]))).unwrap();
//!
//! assert_eq!(df.row_count(), 2);
//! assert_eq!(df.column_by_name("S").unwrap().data_type(), DataType::Float);
//! assert_eq!(df.property_by_name("TITLE").unwrap().value().as_str(), Ok("\"twiss\""));
//! ```

use crate::{Column, DataType, Error, KeyIndex, Property, Result, ScalarValue};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A TFS table: properties plus named, typed columns of equal length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataFrame {
    properties: Vec<Property>,
    columns: Vec<Column>,
    column_index: KeyIndex,
    row_index: Option<KeyIndex>,
}

impl DataFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a frame from decoded parts, checking column lengths.
    pub(crate) fn from_parts(properties: Vec<Property>, columns: Vec<Column>) -> Result<Self> {
        let mut df = DataFrame {
            properties,
            columns: Vec::with_capacity(columns.len()),
            column_index: KeyIndex::with_capacity(columns.len()),
            row_index: None,
        };
        for column in columns {
            df.add_column(column)?;
        }
        Ok(df)
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows, zero for a frame without columns.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.row_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Result<&Column> {
        self.columns
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.columns.len()))
    }

    pub fn column_by_name(&self, name: &str) -> Result<&Column> {
        let position = self.column_position(name)?;
        self.column(position)
    }

    /// Position of the column called `name`. For duplicate names the column
    /// added last wins.
    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.column_index
            .get(name)
            .ok_or_else(|| Error::not_found("column", name))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub(crate) fn column_index(&self) -> &KeyIndex {
        &self.column_index
    }

    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn property(&self, index: usize) -> Result<&Property> {
        self.properties
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.properties.len()))
    }

    /// First property called `name`.
    pub fn property_by_name(&self, name: &str) -> Result<&Property> {
        self.properties
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| Error::not_found("property", name))
    }

    /// Appends a property. Duplicate names are kept.
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<ScalarValue>) {
        self.properties.push(Property::new(name, value));
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// [`Error::LengthMismatch`] if the frame already has columns and this one
    /// has a different number of rows.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(Error::length_mismatch(
                    column.name(),
                    first.len(),
                    column.len(),
                ));
            }
        }
        let position = self.columns.len();
        if let Some(previous) = self.column_index.insert(column.name().to_string(), position) {
            tracing::warn!(
                column = column.name(),
                previous,
                position,
                "duplicate column name, lookups resolve to the later column"
            );
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn reserve_columns(&mut self, additional: usize) {
        self.columns.reserve(additional);
    }

    pub fn reserve_rows(&mut self, additional: usize) {
        for column in &mut self.columns {
            column.reserve(additional);
        }
    }

    /// Builds the secondary key to row lookup from the string column `name`.
    ///
    /// A key that occurs more than once maps to its last row.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if there is no such column and
    /// [`Error::TypeMismatch`] if it is not a string column.
    pub fn build_index(&mut self, name: &str) -> Result<()> {
        let keys = self.column_by_name(name)?.as_strings()?;
        let mut index = KeyIndex::with_capacity(keys.len());
        let mut duplicates = 0usize;
        for (row, key) in keys.iter().enumerate() {
            if index.insert(key.clone(), row).is_some() {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            tracing::warn!(column = name, duplicates, "duplicate index keys, later rows win");
        }
        tracing::debug!(column = name, keys = index.len(), "built row index");
        self.row_index = Some(index);
        Ok(())
    }

    #[must_use]
    pub fn has_index(&self) -> bool {
        self.row_index.is_some()
    }

    /// Row number of `key` in the secondary index.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no index was built or the key is absent.
    pub fn row_of(&self, key: &str) -> Result<usize> {
        self.row_index
            .as_ref()
            .and_then(|index| index.get(key))
            .ok_or_else(|| Error::not_found("index key", key))
    }

    /// Checks that every column has the frame's row count.
    pub fn verify(&self) -> Result<()> {
        let rows = self.row_count();
        for column in &self.columns {
            if column.len() != rows {
                return Err(Error::length_mismatch(column.name(), rows, column.len()));
            }
        }
        Ok(())
    }

    /// Columns of `data_type`, in frame order.
    pub fn columns_of_type(&self, data_type: DataType) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(move |c| c.data_type() == data_type)
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DataFrame{{")?;
        writeln!(f, "{} columns, {} rows", self.column_count(), self.row_count())?;
        writeln!(f, "Headers:")?;
        for p in &self.properties {
            writeln!(f, "{:>32}: {}", p.name(), p.value())?;
        }
        write!(f, "---")
    }
}

impl Serialize for DataFrame {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("DataFrame", 2)?;
        state.serialize_field("properties", &self.properties)?;
        state.serialize_field("columns", &self.columns)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for DataFrame {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Parts {
            #[serde(default)]
            properties: Vec<Property>,
            #[serde(default)]
            columns: Vec<Column>,
        }

        let parts = Parts::deserialize(deserializer)?;
        DataFrame::from_parts(parts.properties, parts.columns)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnData;

    fn optics() -> DataFrame {
        let mut df = DataFrame::new();
        df.add_property("TYPE", "\"TWISS\"");
        df.add_property("Q1", 62.31);
        df.add_property("Q1", 62.28);
        df.add_column(Column::from_data(
            "NAME",
            ColumnData::String(vec!["IP1".into(), "MQ.1".into(), "IP1".into()]),
        ))
        .unwrap();
        df.add_column(Column::from(("S".to_string(), vec![0.0, 10.0, 20.0])))
            .unwrap();
        df
    }

    #[test]
    fn test_accessors() {
        let df = optics();
        assert_eq!(df.column_count(), 2);
        assert_eq!(df.row_count(), 3);
        assert_eq!(df.property_count(), 3);
        assert_eq!(df.column(1).unwrap().name(), "S");
        assert_eq!(df.column(2), Err(Error::index_out_of_range(2, 2)));
        assert_eq!(
            df.column_by_name("BETX"),
            Err(Error::not_found("column", "BETX"))
        );
        assert_eq!(df.column_names().collect::<Vec<_>>(), vec!["NAME", "S"]);
    }

    #[test]
    fn test_property_lookup_first_match() {
        let df = optics();
        assert_eq!(df.property_by_name("Q1").unwrap().value(), &ScalarValue::Float(62.31));
        assert_eq!(df.property(2).unwrap().value(), &ScalarValue::Float(62.28));
        assert!(matches!(df.property(3), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(
            df.property_by_name("Q2"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_add_column_rejects_ragged() {
        let mut df = optics();
        let err = df
            .add_column(Column::from(("BETX".to_string(), vec![1.0])))
            .unwrap_err();
        assert_eq!(err, Error::length_mismatch("BETX", 3, 1));
        assert_eq!(df.column_count(), 2);
    }

    #[test]
    fn test_duplicate_column_name_last_wins() {
        let mut df = optics();
        df.add_column(Column::from(("S".to_string(), vec![1.0, 2.0, 3.0])))
            .unwrap();
        assert_eq!(df.column_position("S"), Ok(2));
        assert_eq!(df.column_count(), 3);
    }

    #[test]
    fn test_index_later_keys_overwrite() {
        let mut df = optics();
        assert!(df.row_of("IP1").is_err());
        df.build_index("NAME").unwrap();
        assert!(df.has_index());
        assert_eq!(df.row_of("IP1"), Ok(2));
        assert_eq!(df.row_of("MQ.1"), Ok(1));
        assert_eq!(df.row_of("IP8"), Err(Error::not_found("index key", "IP8")));
    }

    #[test]
    fn test_index_requires_string_column() {
        let mut df = optics();
        assert_eq!(
            df.build_index("S"),
            Err(Error::type_mismatch(DataType::String, DataType::Float))
        );
    }

    #[test]
    fn test_display_summary() {
        let summary = optics().to_string();
        assert!(summary.starts_with("DataFrame{\n2 columns, 3 rows\n"));
        assert!(summary.contains(&format!("{:>32}: 62.31", "Q1")));
    }

    #[test]
    fn test_empty_frame() {
        let df = DataFrame::new();
        assert_eq!(df.row_count(), 0);
        assert!(df.is_empty());
        assert!(df.verify().is_ok());
    }

    #[test]
    fn test_columns_of_type() {
        let df = optics();
        let names: Vec<_> = df
            .columns_of_type(DataType::Float)
            .map(Column::name)
            .collect();
        assert_eq!(names, vec!["S"]);
    }
}
