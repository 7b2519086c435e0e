//! Breakpoint state for the debugger UI
//!
//! Line breakpoints and XHR breakpoints are held in an immutable
//! [`BreakpointsState`] snapshot. Snapshots only change by applying an
//! [`Action`] through [`transition`], and are read through the functions in
//! [`selectors`]. [`BreakpointStore`] owns the current snapshot for a
//! debugging session and serialises writers.
mod actions;
mod config;
mod error;
mod location;
mod pending;
mod reducer;
pub mod remap;
pub mod selectors;
pub mod sources;
mod state;
mod store;
mod types;

pub use actions::{Action, AddBreakpoint, AsyncStatus, SyncBreakpoint};
pub use config::StoreConfig;
pub use error::StoreError;
pub use location::{Location, LocationKey, make_location_key};
pub use pending::{InstallState, PendingInstalls};
pub use reducer::transition;
pub use state::{BreakpointsMap, BreakpointsState};
pub use store::{BreakpointStore, Snapshot, StoreEvent};
pub use types::{AstLocation, AstOffset, Breakpoint, XhrBreakpoint};
