//! Actions accepted by [`crate::transition`]
//!
//! The wire form matches the action log recorded by the UI layer: a JSON object
//! tagged by `type`, with `ADD_BREAKPOINT` and `ENABLE_BREAKPOINT` further
//! tagged by `status`.

use serde::{Deserialize, Serialize};

use crate::{
    location::Location,
    types::{Breakpoint, XhrBreakpoint},
};

/// Phase of an operation that is performed remotely by the debuggee
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AsyncStatus {
    Start,
    Done,
    Error,
}

/// Result of installing a breakpoint in the debuggee.
///
/// The debuggee may move the breakpoint (e.g. onto the nearest breakable
/// line), in which case `previous_location` names the provisional entry to
/// drop. A missing `breakpoint` means the install resolved to nothing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncBreakpoint {
    #[serde(default)]
    pub breakpoint: Option<Breakpoint>,
    #[serde(default)]
    pub previous_location: Option<Location>,
}

/// Optimistic add protocol: `Start` inserts a provisional entry which is then
/// either committed by `Done` or rolled back by `Error`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AddBreakpoint {
    Start { breakpoint: Breakpoint },
    Done { value: SyncBreakpoint },
    Error { breakpoint: Breakpoint },
}

impl AddBreakpoint {
    pub fn status(&self) -> AsyncStatus {
        match self {
            AddBreakpoint::Start { .. } => AsyncStatus::Start,
            AddBreakpoint::Done { .. } => AsyncStatus::Done,
            AddBreakpoint::Error { .. } => AsyncStatus::Error,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    AddBreakpoint(AddBreakpoint),
    /// Enabling goes through the same start/done/error path as adding
    EnableBreakpoint(AddBreakpoint),
    SyncBreakpoint(SyncBreakpoint),
    DisableBreakpoint {
        breakpoint: Breakpoint,
    },
    SetBreakpointCondition {
        breakpoint: Breakpoint,
    },
    DisableAllBreakpoints {
        breakpoints: Vec<Breakpoint>,
    },
    EnableAllBreakpoints {
        breakpoints: Vec<Breakpoint>,
    },
    RemoveBreakpoint {
        breakpoint: Breakpoint,
    },
    /// Replaces every line breakpoint with the given set
    RemapBreakpoints {
        breakpoints: Vec<Breakpoint>,
    },
    Navigate,
    SetXhrBreakpoint {
        breakpoint: XhrBreakpoint,
    },
    RemoveXhrBreakpoint {
        breakpoint: XhrBreakpoint,
    },
    UpdateXhrBreakpoint {
        breakpoint: XhrBreakpoint,
        index: usize,
    },
    EnableXhrBreakpoint {
        breakpoint: XhrBreakpoint,
        index: usize,
    },
    DisableXhrBreakpoint {
        breakpoint: XhrBreakpoint,
        index: usize,
    },
    /// Any action this module does not handle
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn set_breakpoint_start(breakpoint: Breakpoint) -> Self {
        Action::AddBreakpoint(AddBreakpoint::Start { breakpoint })
    }

    pub fn set_breakpoint_done(
        breakpoint: Option<Breakpoint>,
        previous_location: Option<Location>,
    ) -> Self {
        Action::AddBreakpoint(AddBreakpoint::Done {
            value: SyncBreakpoint {
                breakpoint,
                previous_location,
            },
        })
    }

    pub fn set_breakpoint_error(breakpoint: Breakpoint) -> Self {
        Action::AddBreakpoint(AddBreakpoint::Error { breakpoint })
    }

    /// The `type` tag of this action
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddBreakpoint(_) => "ADD_BREAKPOINT",
            Action::EnableBreakpoint(_) => "ENABLE_BREAKPOINT",
            Action::SyncBreakpoint(_) => "SYNC_BREAKPOINT",
            Action::DisableBreakpoint { .. } => "DISABLE_BREAKPOINT",
            Action::SetBreakpointCondition { .. } => "SET_BREAKPOINT_CONDITION",
            Action::DisableAllBreakpoints { .. } => "DISABLE_ALL_BREAKPOINTS",
            Action::EnableAllBreakpoints { .. } => "ENABLE_ALL_BREAKPOINTS",
            Action::RemoveBreakpoint { .. } => "REMOVE_BREAKPOINT",
            Action::RemapBreakpoints { .. } => "REMAP_BREAKPOINTS",
            Action::Navigate => "NAVIGATE",
            Action::SetXhrBreakpoint { .. } => "SET_XHR_BREAKPOINT",
            Action::RemoveXhrBreakpoint { .. } => "REMOVE_XHR_BREAKPOINT",
            Action::UpdateXhrBreakpoint { .. } => "UPDATE_XHR_BREAKPOINT",
            Action::EnableXhrBreakpoint { .. } => "ENABLE_XHR_BREAKPOINT",
            Action::DisableXhrBreakpoint { .. } => "DISABLE_XHR_BREAKPOINT",
            Action::Unknown => "UNKNOWN",
        }
    }
}
