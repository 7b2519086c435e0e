//! Tracking breakpoint installs with the debuggee
//!
//! Every `ADD_BREAKPOINT`/`ENABLE_BREAKPOINT` start creates a provisional
//! install for its location. The matching done or error settles it exactly
//! once, as either committed or rolled back.

use std::collections::HashMap;

use crate::{
    actions::{Action, AddBreakpoint, SyncBreakpoint},
    location::LocationKey,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallState {
    /// Inserted optimistically, waiting for the debuggee
    Provisional,
    /// Accepted by the debuggee, possibly at a different location
    Committed { location: LocationKey },
    /// Rejected by the debuggee, or resolved to no location
    RolledBack,
}

impl InstallState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, InstallState::Provisional)
    }
}

/// Install state per requested location
#[derive(Debug, Default)]
pub struct PendingInstalls {
    installs: HashMap<LocationKey, InstallState>,
}

impl PendingInstalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the install protocol for the given action.
    ///
    /// Settled installs are forgotten once their breakpoint is removed or the
    /// breakpoints are remapped, and navigation forgets every install.
    pub fn observe(&mut self, action: &Action) {
        match action {
            Action::AddBreakpoint(phase) | Action::EnableBreakpoint(phase) => self.advance(phase),
            Action::RemoveBreakpoint { breakpoint } => self.forget_removed(&breakpoint.key()),
            Action::RemapBreakpoints { .. } => self.clear_settled(),
            Action::Navigate => self.installs.clear(),
            _ => {}
        }
    }

    fn forget_removed(&mut self, removed: &LocationKey) {
        self.installs.retain(|requested, state| match state {
            InstallState::Provisional => true,
            InstallState::Committed { location } => location != removed,
            InstallState::RolledBack => requested != removed,
        });
    }

    fn advance(&mut self, phase: &AddBreakpoint) {
        match phase {
            AddBreakpoint::Start { breakpoint } => {
                let key = breakpoint.key();
                tracing::debug!(%key, "install started");
                self.installs.insert(key, InstallState::Provisional);
            }
            AddBreakpoint::Done { value } => {
                let SyncBreakpoint {
                    breakpoint,
                    previous_location,
                } = value;
                let requested = match (previous_location, breakpoint) {
                    (Some(previous), _) => previous.key(),
                    (None, Some(breakpoint)) => breakpoint.key(),
                    (None, None) => {
                        tracing::warn!("install completed without a location");
                        return;
                    }
                };
                let settled = match breakpoint {
                    Some(breakpoint) => InstallState::Committed {
                        location: breakpoint.key(),
                    },
                    None => InstallState::RolledBack,
                };
                self.settle(requested, settled);
            }
            AddBreakpoint::Error { breakpoint } => {
                self.settle(breakpoint.key(), InstallState::RolledBack);
            }
        }
    }

    fn settle(&mut self, key: LocationKey, settled: InstallState) {
        match self.installs.get(&key) {
            Some(InstallState::Provisional) => {
                tracing::debug!(%key, state = ?settled, "install settled");
            }
            Some(previous) => {
                tracing::warn!(%key, ?previous, state = ?settled, "install settled twice");
            }
            None => {
                tracing::warn!(%key, state = ?settled, "install settled without being started");
            }
        }
        self.installs.insert(key, settled);
    }

    pub fn state(&self, key: &LocationKey) -> Option<&InstallState> {
        self.installs.get(key)
    }

    pub fn is_pending(&self, key: &LocationKey) -> bool {
        matches!(self.installs.get(key), Some(InstallState::Provisional))
    }

    pub fn pending_count(&self) -> usize {
        self.installs
            .values()
            .filter(|state| !state.is_settled())
            .count()
    }

    /// Forget installs that have been committed or rolled back
    pub fn clear_settled(&mut self) {
        self.installs.retain(|_, state| !state.is_settled());
    }
}
