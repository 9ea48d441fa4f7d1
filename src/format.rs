//! TFS file formats as implemented by this library.
//!
//! # Text format (`.tfs`, `.dat`)
//!
//! Each line is classified by its first character:
//!
//! ```text
//! @ TITLE            %s   "LHC optics"
//! @ ENERGY           %le  6800
//! * NAME             S         BETX
//! $ %s               %le       %le
//!   "IP1"            0.0       0.55
//!   "IP5"            13329.3   0.55
//! ```
//!
//! | Sigil | Line | Content |
//! |-------|------|---------|
//! | `@` | property | name, type token, value tokens |
//! | `*` | column names | one name per column |
//! | `$` | column types | one type token per column |
//! | none | data row | one token per column |
//!
//! **Rules**:
//! - The sigil is the first character; the rest of the line is split on whitespace
//! - Numeric properties take exactly one value token; string properties join all
//!   remaining tokens with single spaces, quotes kept verbatim
//! - The header is complete once both a name line and a type line have been read
//!   and their counts agree; every later line is a data row
//! - Property lines may appear before, between or after the name and type lines,
//!   as long as the header is not yet complete
//! - Blank lines are ignored
//! - Every row must have exactly one token per column
//!
//! ## Type tokens
//!
//! | Type | Read | Written |
//! |------|------|---------|
//! | String | `%s`, `%20s`, anything unrecognized | `%s` |
//! | Float | `%le`, `%lf`, `%f`, `%e` | `%le` |
//! | Int | `%d`, `%hd`, `%ld` | `%d` |
//! | Bool | `%b` (`true`/`false`/`1`/`0`) | `%b` |
//! | Complex | `%lz` (`1.5-2i`, `1.5-2j`) | `%lz` |
//!
//! # Binary format (`.btfs`)
//!
//! A self-framed single-pass layout. Integers and floats are written in the
//! encoding machine's native byte order, so files are not portable between
//! machines of different endianness.
//!
//! ```text
//! [propertyCount: u64] { [nameLen: u16][name][tag: u32][payload] }*
//! [columnCount:   u64] { [nameLen: u16][name][tag: u32][count: u64][elements] }*
//! ```
//!
//! | Tag | Type | Scalar payload | Column element |
//! |-----|------|----------------|----------------|
//! | 0 | String | `[len: u16][utf-8]` | `[len: u16][utf-8]` |
//! | 1 | Float | `f64` | `f64` |
//! | 2 | Int | unsupported | unsupported |
//! | 3 | Bool | unsupported | unsupported |
//! | 4 | Complex | unsupported | unsupported |
//!
//! Unsupported combinations fail with
//! [`Error::UnsupportedType`](crate::Error::UnsupportedType) on both encode and decode.

use std::path::Path;

/// The codec a file is read or written with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Binary,
}

impl Format {
    /// Picks the codec from the file extension: `.btfs` is binary, everything
    /// else is text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tfs_frame::Format;
    ///
    /// assert_eq!(Format::from_path("twiss.btfs"), Format::Binary);
    /// assert_eq!(Format::from_path("twiss.tfs"), Format::Text);
    /// assert_eq!(Format::from_path("twiss.dat"), Format::Text);
    /// ```
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("btfs") => Format::Binary,
            _ => Format::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_extension_case() {
        assert_eq!(Format::from_path("/data/TWISS.BTFS"), Format::Binary);
        assert_eq!(Format::from_path("twiss"), Format::Text);
        assert_eq!(Format::from_path("twiss.btfs.tfs"), Format::Text);
    }
}
