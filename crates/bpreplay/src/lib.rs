//! Replay a recorded breakpoint action log through a [`BreakpointStore`]
//!
//! The log holds one JSON encoded action per line. Blank lines are skipped.

use std::{fmt, io::BufRead, path::Path};

use breakpoints::{
    Action, Breakpoint, BreakpointStore, Location, Snapshot, XhrBreakpoint, selectors,
    sources::OriginalSourceIds,
};
use eyre::WrapErr;
use serde::Serialize;

pub fn read_actions(reader: impl BufRead) -> eyre::Result<Vec<Action>> {
    let mut actions = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line.wrap_err("reading action log")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let action: Action = serde_json::from_str(line)
            .wrap_err_with(|| format!("parsing action on line {}", n + 1))?;
        if action == Action::Unknown {
            tracing::debug!(line = n + 1, "ignoring unknown action");
        }
        actions.push(action);
    }
    Ok(actions)
}

pub fn read_actions_from(path: impl AsRef<Path>) -> eyre::Result<Vec<Action>> {
    let path = path.as_ref();
    let f = std::fs::File::open(path)
        .wrap_err_with(|| format!("opening action log {}", path.display()))?;
    read_actions(std::io::BufReader::new(f))
}

/// Dispatch every action in order, returning the final snapshot
pub fn replay(store: &BreakpointStore, actions: &[Action]) -> Snapshot {
    for action in actions {
        store.dispatch(action);
    }
    store.snapshot()
}

/// Optional queries to include in a [`Report`]
#[derive(Debug, Default, Clone)]
pub struct Query {
    pub source: Option<String>,
    pub line: Option<u32>,
}

/// Query results for the final snapshot of a replay
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub version: u64,
    pub breakpoints: Vec<&'a Breakpoint>,
    pub xhr_breakpoints: &'a [XhrBreakpoint],
    pub disabled: bool,
    pub loading: bool,
    pub hidden_location: Option<&'a Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub for_source: Option<Vec<&'a Breakpoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub for_line: Option<&'a Breakpoint>,
}

impl<'a> Report<'a> {
    pub fn new(snapshot: &'a Snapshot, query: &Query) -> Self {
        let state = &snapshot.state;

        let for_source = query.source.as_deref().map(|source_id| {
            selectors::get_breakpoints_for_source(state, &OriginalSourceIds, source_id)
                .into_values()
                .collect()
        });
        let for_line = match (query.source.as_deref(), query.line) {
            (Some(source_id), Some(line)) => {
                selectors::get_breakpoint_for_line(state, &OriginalSourceIds, source_id, line)
            }
            _ => None,
        };

        Self {
            version: snapshot.version,
            breakpoints: selectors::get_breakpoints(state).values().collect(),
            xhr_breakpoints: selectors::get_xhr_breakpoints(state),
            disabled: selectors::get_breakpoints_disabled(state),
            loading: selectors::get_breakpoints_loading(state),
            hidden_location: selectors::get_hidden_breakpoint_location(state),
            for_source,
            for_line,
        }
    }
}

fn write_breakpoint(f: &mut fmt::Formatter<'_>, bp: &Breakpoint) -> fmt::Result {
    write!(f, "  {}", bp.location.key())?;
    if let Some(generated) = &bp.generated_location {
        write!(f, " (generated {})", generated.key())?;
    }
    if bp.disabled {
        f.write_str(" disabled")?;
    }
    if bp.hidden {
        f.write_str(" hidden")?;
    }
    if bp.loading {
        f.write_str(" loading")?;
    }
    if let Some(condition) = &bp.condition {
        write!(f, " if {condition}")?;
    }
    writeln!(f)
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version {}", self.version)?;
        writeln!(f, "breakpoints: {}", self.breakpoints.len())?;
        for bp in &self.breakpoints {
            write_breakpoint(f, bp)?;
        }
        writeln!(f, "xhr breakpoints: {}", self.xhr_breakpoints.len())?;
        for (index, bp) in self.xhr_breakpoints.iter().enumerate() {
            let status = if bp.disabled { " disabled" } else { "" };
            writeln!(f, "  [{index}] {} {}{status}", bp.method, bp.path)?;
        }
        writeln!(f, "all disabled: {}", self.disabled)?;
        writeln!(f, "loading: {}", self.loading)?;
        if let Some(location) = self.hidden_location {
            writeln!(f, "hidden: {}", location.key())?;
        }
        if let Some(for_source) = &self.for_source {
            writeln!(f, "in source: {}", for_source.len())?;
            for bp in for_source {
                write_breakpoint(f, bp)?;
            }
        }
        if let Some(bp) = self.for_line {
            f.write_str("on line:\n")?;
            write_breakpoint(f, bp)?;
        }
        Ok(())
    }
}
