use std::{io::Read, path::Path};

use eyre::Context;
use serde::{Deserialize, Serialize};

use crate::types::XhrBreakpoint;

/// Settings for a [`crate::BreakpointStore`]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// XHR breakpoints restored from a previous session
    pub xhr_breakpoints: Vec<XhrBreakpoint>,

    /// Publish a [`crate::StoreEvent`] to subscribers after every change
    pub publish_events: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            xhr_breakpoints: Vec::new(),
            publish_events: true,
        }
    }
}

impl StoreConfig {
    pub fn load(reader: impl Read) -> eyre::Result<Self> {
        let config = serde_json::from_reader(reader).context("reading store configuration")?;
        Ok(config)
    }

    pub fn load_from(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .with_context(|| format!("opening store configuration {}", path.display()))?;
        let config = Self::load(f).context("reading from configuration file")?;
        Ok(config)
    }
}
