//! Ordered string-key to position lookup.
//!
//! [`KeyIndex`] wraps an [`IndexMap`] and backs both the column-name lookup
//! of a [`DataFrame`](crate::DataFrame) and its optional secondary row index.
//! Keys are unique; inserting an existing key overwrites its position but keeps
//! the key's original place in iteration order.
//!
//! ```rust
//! use tfs_frame::KeyIndex;
//!
//! let mut index = KeyIndex::new();
//! index.insert("IP1".to_string(), 0);
//! index.insert("IP5".to_string(), 1);
//! index.insert("IP1".to_string(), 2);
//!
//! assert_eq!(index.get("IP1"), Some(2));
//! assert_eq!(index.len(), 2);
//! ```

use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyIndex(IndexMap<String, usize>);

impl KeyIndex {
    #[must_use]
    pub fn new() -> Self {
        KeyIndex(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        KeyIndex(IndexMap::with_capacity(capacity))
    }

    /// Inserts `key`, returning the position it previously mapped to.
    pub fn insert(&mut self, key: String, position: usize) -> Option<usize> {
        self.0.insert(key, position)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<usize> {
        self.0.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in first-insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, usize> {
        self.0.keys()
    }

    /// Entries ordered by key, the column order of name-sorted output.
    #[must_use]
    pub fn sorted_by_key(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.0.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl FromIterator<(String, usize)> for KeyIndex {
    fn from_iter<T: IntoIterator<Item = (String, usize)>>(iter: T) -> Self {
        KeyIndex(IndexMap::from_iter(iter))
    }
}
