//! Read-only queries over a [`BreakpointsState`] snapshot
//!
//! Where a query returns "the first" breakpoint, the order is the insertion
//! order of the breakpoints map. Overwriting an entry keeps its position.

use indexmap::IndexMap;

use crate::{
    location::{Location, LocationKey, make_location_key},
    sources::SourceClassifier,
    state::{BreakpointsMap, BreakpointsState},
    types::{Breakpoint, XhrBreakpoint},
};

/// Breakpoints borrowed from a snapshot, keyed by location
pub type BreakpointsView<'a> = IndexMap<&'a LocationKey, &'a Breakpoint>;

pub fn get_breakpoints(state: &BreakpointsState) -> &BreakpointsMap {
    state.breakpoints()
}

pub fn get_breakpoint<'a>(
    state: &'a BreakpointsState,
    location: &Location,
) -> Option<&'a Breakpoint> {
    state.breakpoints().get(&make_location_key(location))
}

/// True when every breakpoint is disabled, including when there are none
pub fn get_breakpoints_disabled(state: &BreakpointsState) -> bool {
    state.breakpoints().values().all(|bp| bp.disabled)
}

/// True when at least one breakpoint has an install or removal in flight
pub fn get_breakpoints_loading(state: &BreakpointsState) -> bool {
    let breakpoints = state.breakpoints();
    !breakpoints.is_empty() && breakpoints.values().any(|bp| bp.loading)
}

/// Breakpoints located in `source_id`.
///
/// For a generated source this compares against each breakpoint's generated
/// location where it has one. An empty `source_id` matches nothing.
pub fn get_breakpoints_for_source<'a>(
    state: &'a BreakpointsState,
    sources: &impl SourceClassifier,
    source_id: &str,
) -> BreakpointsView<'a> {
    if source_id.is_empty() {
        return BreakpointsView::new();
    }

    let generated = sources.is_generated_source_id(source_id);
    state
        .breakpoints()
        .iter()
        .filter(|(_, bp)| bp.effective_location(generated).source_id == source_id)
        .collect()
}

/// First breakpoint in `source_id` whose original line is `line`
pub fn get_breakpoint_for_line<'a>(
    state: &'a BreakpointsState,
    sources: &impl SourceClassifier,
    source_id: &str,
    line: u32,
) -> Option<&'a Breakpoint> {
    get_breakpoints_for_source(state, sources, source_id)
        .into_values()
        .find(|bp| bp.location.line == line)
}

pub fn get_hidden_breakpoint(state: &BreakpointsState) -> Option<&Breakpoint> {
    state.breakpoints().values().find(|bp| bp.hidden)
}

pub fn get_hidden_breakpoint_location(state: &BreakpointsState) -> Option<&Location> {
    get_hidden_breakpoint(state).map(|bp| &bp.location)
}

pub fn get_xhr_breakpoints(state: &BreakpointsState) -> &[XhrBreakpoint] {
    state.xhr_breakpoints()
}

/// Position of the XHR breakpoint for `path` and `method`, as expected by the
/// index-addressed XHR update actions
pub fn get_xhr_breakpoint_index(
    state: &BreakpointsState,
    path: &str,
    method: &str,
) -> Option<usize> {
    state
        .xhr_breakpoints()
        .iter()
        .position(|bp| bp.matches(path, method))
}
