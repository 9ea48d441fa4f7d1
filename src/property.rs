//! Named header entries (`@` lines).

use crate::ScalarValue;
use serde::{Deserialize, Serialize};

/// A named [`ScalarValue`] from a TFS header.
///
/// Names are not unique: a frame keeps every property in insertion order and
/// lookups by name return the first match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    name: String,
    value: ScalarValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Property {
            name: name.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &ScalarValue {
        &self.value
    }

    pub fn into_parts(self) -> (String, ScalarValue) {
        (self.name, self.value)
    }
}
