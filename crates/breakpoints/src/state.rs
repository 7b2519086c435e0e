use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    location::LocationKey,
    types::{Breakpoint, XhrBreakpoint},
};

/// Line breakpoints by location, in insertion order
pub type BreakpointsMap = IndexMap<LocationKey, Breakpoint>;

/// Snapshot of all breakpoints in a debugging session.
///
/// Cloning is cheap: both collections are shared until a transition writes to
/// them, at which point the writer gets its own copy. A clone held by a reader
/// never observes later writes.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointsState {
    breakpoints: Arc<BreakpointsMap>,
    xhr_breakpoints: Arc<Vec<XhrBreakpoint>>,
}

impl BreakpointsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state with XHR breakpoints restored from a previous session
    pub fn with_xhr_breakpoints(xhr_breakpoints: impl Into<Vec<XhrBreakpoint>>) -> Self {
        Self {
            breakpoints: Arc::default(),
            xhr_breakpoints: Arc::new(xhr_breakpoints.into()),
        }
    }

    pub fn breakpoints(&self) -> &BreakpointsMap {
        &self.breakpoints
    }

    pub fn xhr_breakpoints(&self) -> &[XhrBreakpoint] {
        &self.xhr_breakpoints
    }

    /// True if `other` shares both collections with this snapshot, i.e. no
    /// transition has written between them
    pub fn is_same(&self, other: &BreakpointsState) -> bool {
        Arc::ptr_eq(&self.breakpoints, &other.breakpoints)
            && Arc::ptr_eq(&self.xhr_breakpoints, &other.xhr_breakpoints)
    }

    pub(crate) fn breakpoints_mut(&mut self) -> &mut BreakpointsMap {
        Arc::make_mut(&mut self.breakpoints)
    }

    pub(crate) fn replace_breakpoints(&mut self, breakpoints: BreakpointsMap) {
        self.breakpoints = Arc::new(breakpoints);
    }

    pub(crate) fn xhr_breakpoints_mut(&mut self) -> &mut Vec<XhrBreakpoint> {
        Arc::make_mut(&mut self.xhr_breakpoints)
    }
}
