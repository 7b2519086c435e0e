use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// A position in either an original or a generated source
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub source_id: String,
    pub line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl Location {
    pub fn new(source_id: impl Into<String>, line: u32) -> Self {
        Self {
            source_id: source_id.into(),
            line,
            column: None,
        }
    }

    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }

    pub fn key(&self) -> LocationKey {
        make_location_key(self)
    }
}

/// Identity of a breakpoint location, used as the key of the breakpoints map.
///
/// Rendered as `source:line:column`. Line and column are always numeric, so
/// splitting from the right is unambiguous even when the source id contains
/// colons.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct LocationKey(String);

impl LocationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LocationKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&Location> for LocationKey {
    fn from(location: &Location) -> Self {
        make_location_key(location)
    }
}

/// Derive the key for a location. A missing column is the same as column 0.
pub fn make_location_key(location: &Location) -> LocationKey {
    LocationKey(format!(
        "{}:{}:{}",
        location.source_id,
        location.line,
        location.column.unwrap_or(0)
    ))
}
