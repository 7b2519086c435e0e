use serde::{Deserialize, Serialize};

use crate::location::{Location, LocationKey};

/// Position relative to a named symbol
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct AstOffset {
    pub line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

/// Semantic anchor used to find a breakpoint again after its source changes
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct AstLocation {
    #[serde(default)]
    pub name: Option<String>,
    pub offset: AstOffset,
}

/// A line breakpoint
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Position in the original source
    pub location: Location,

    /// Position in the generated source, if it differs from `location`
    #[serde(default)]
    pub generated_location: Option<Location>,

    #[serde(default)]
    pub ast_location: Option<AstLocation>,

    /// Installed in the debuggee but inactive
    #[serde(default)]
    pub disabled: bool,

    /// Internal breakpoint that is not shown to the user, e.g. "run to here"
    #[serde(default)]
    pub hidden: bool,

    /// An install or removal is in flight with the debuggee
    #[serde(default)]
    pub loading: bool,

    #[serde(default)]
    pub condition: Option<String>,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub original_text: String,
}

impl Breakpoint {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            ..Default::default()
        }
    }

    pub fn key(&self) -> LocationKey {
        self.location.key()
    }

    /// The location to compare against when listing breakpoints for a source.
    ///
    /// Generated sources use `generated_location` where present; everything
    /// else uses `location`.
    pub fn effective_location(&self, generated_source: bool) -> &Location {
        match (&self.generated_location, generated_source) {
            (Some(generated), true) => generated,
            _ => &self.location,
        }
    }
}

/// Pauses when a request matching `path` and `method` is made
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct XhrBreakpoint {
    pub path: String,
    pub method: String,
    #[serde(default)]
    pub disabled: bool,
}

impl XhrBreakpoint {
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            disabled: false,
        }
    }

    /// Exact match on both path and method
    pub fn matches(&self, path: &str, method: &str) -> bool {
        self.path == path && self.method == method
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_location_falls_back_to_location() {
        let original = Location::new("original", 4);
        let generated = Location::new("generated", 40);

        let mut bp = Breakpoint::new(original.clone());
        assert_eq!(bp.effective_location(true), &original);

        bp.generated_location = Some(generated.clone());
        assert_eq!(bp.effective_location(true), &generated);
        assert_eq!(bp.effective_location(false), &original);
    }

    #[test]
    fn xhr_match_is_exact() {
        let bp = XhrBreakpoint::new("/api", "GET");
        assert!(bp.matches("/api", "GET"));
        assert!(!bp.matches("/api", "get"));
        assert!(!bp.matches("/api/", "GET"));
    }

    #[test]
    fn deserialises_breakpoint_with_defaults() {
        let bp: Breakpoint = serde_json::from_str(
            r#"{
                "location": {"sourceId": "s1", "line": 5},
                "astLocation": {"name": "main", "offset": {"line": 1}},
                "loading": true
            }"#,
        )
        .unwrap();

        assert!(bp.loading);
        assert!(!bp.disabled);
        assert_eq!(bp.generated_location, None);
        assert_eq!(
            bp.ast_location.and_then(|ast| ast.name),
            Some("main".to_string())
        );
    }
}
