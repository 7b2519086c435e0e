use crate::{
    actions::{Action, AddBreakpoint, SyncBreakpoint},
    location::make_location_key,
    state::{BreakpointsMap, BreakpointsState},
    types::{Breakpoint, XhrBreakpoint},
};

/// Compute the snapshot that follows `state` once `action` is applied.
///
/// `state` is never modified. Actions that leave the state untouched return a
/// snapshot for which [`BreakpointsState::is_same`] holds.
///
/// # Panics
///
/// If an XHR breakpoint update addresses an index past the end of the list.
pub fn transition(state: &BreakpointsState, action: &Action) -> BreakpointsState {
    match action {
        Action::AddBreakpoint(phase) | Action::EnableBreakpoint(phase) => {
            add_breakpoint(state, phase)
        }
        Action::SyncBreakpoint(data) => sync_breakpoint(state, data),
        Action::DisableBreakpoint { breakpoint }
        | Action::SetBreakpointCondition { breakpoint } => set_breakpoint(state, breakpoint),
        Action::DisableAllBreakpoints { breakpoints }
        | Action::EnableAllBreakpoints { breakpoints } => {
            update_all_breakpoints(state, breakpoints)
        }
        Action::RemoveBreakpoint { breakpoint } => remove_breakpoint(state, breakpoint),
        Action::RemapBreakpoints { breakpoints } => remap_breakpoints(state, breakpoints),
        Action::Navigate => navigate(state),
        Action::SetXhrBreakpoint { breakpoint } => set_xhr_breakpoint(state, breakpoint),
        Action::RemoveXhrBreakpoint { breakpoint } => remove_xhr_breakpoint(state, breakpoint),
        Action::UpdateXhrBreakpoint { breakpoint, index }
        | Action::EnableXhrBreakpoint { breakpoint, index }
        | Action::DisableXhrBreakpoint { breakpoint, index } => {
            update_xhr_breakpoint(state, breakpoint, *index)
        }
        Action::Unknown => state.clone(),
    }
}

fn navigate(state: &BreakpointsState) -> BreakpointsState {
    if state.breakpoints().is_empty() && state.xhr_breakpoints().is_empty() {
        return state.clone();
    }
    BreakpointsState::default()
}

fn add_breakpoint(state: &BreakpointsState, phase: &AddBreakpoint) -> BreakpointsState {
    match phase {
        AddBreakpoint::Start { breakpoint } => set_breakpoint(state, breakpoint),
        AddBreakpoint::Done { value } => sync_breakpoint(state, value),
        // undo the provisional insert
        AddBreakpoint::Error { breakpoint } => remove_breakpoint(state, breakpoint),
    }
}

fn sync_breakpoint(state: &BreakpointsState, data: &SyncBreakpoint) -> BreakpointsState {
    let mut next = state.clone();
    let committed_key = data.breakpoint.as_ref().map(Breakpoint::key);

    // a breakpoint committed where it was requested is overwritten in place
    if let Some(previous_location) = &data.previous_location {
        let key = make_location_key(previous_location);
        if committed_key.as_ref() != Some(&key) && next.breakpoints().contains_key(&key) {
            next.breakpoints_mut().shift_remove(&key);
        }
    }

    if let (Some(breakpoint), Some(key)) = (&data.breakpoint, committed_key) {
        tracing::debug!(%key, "committing breakpoint");
        next.breakpoints_mut().insert(key, breakpoint.clone());
    }

    next
}

fn set_breakpoint(state: &BreakpointsState, breakpoint: &Breakpoint) -> BreakpointsState {
    let mut next = state.clone();
    next.breakpoints_mut().insert(breakpoint.key(), breakpoint.clone());
    next
}

fn update_all_breakpoints(
    state: &BreakpointsState,
    breakpoints: &[Breakpoint],
) -> BreakpointsState {
    let mut next = state.clone();
    let map = next.breakpoints_mut();
    for breakpoint in breakpoints {
        map.insert(breakpoint.key(), breakpoint.clone());
    }
    next
}

fn remove_breakpoint(state: &BreakpointsState, breakpoint: &Breakpoint) -> BreakpointsState {
    let key = breakpoint.key();
    if !state.breakpoints().contains_key(&key) {
        return state.clone();
    }

    let mut next = state.clone();
    next.breakpoints_mut().shift_remove(&key);
    next
}

fn remap_breakpoints(state: &BreakpointsState, breakpoints: &[Breakpoint]) -> BreakpointsState {
    let map: BreakpointsMap = breakpoints
        .iter()
        .map(|breakpoint| (breakpoint.key(), breakpoint.clone()))
        .collect();

    let mut next = state.clone();
    next.replace_breakpoints(map);
    next
}

fn set_xhr_breakpoint(state: &BreakpointsState, breakpoint: &XhrBreakpoint) -> BreakpointsState {
    let existing = state
        .xhr_breakpoints()
        .iter()
        .position(|bp| bp.matches(&breakpoint.path, &breakpoint.method));

    match existing {
        None => {
            let mut next = state.clone();
            next.xhr_breakpoints_mut().push(breakpoint.clone());
            next
        }
        Some(index) if state.xhr_breakpoints()[index] != *breakpoint => {
            let mut next = state.clone();
            next.xhr_breakpoints_mut()[index] = breakpoint.clone();
            next
        }
        Some(_) => state.clone(),
    }
}

fn remove_xhr_breakpoint(state: &BreakpointsState, breakpoint: &XhrBreakpoint) -> BreakpointsState {
    let Some(index) = state
        .xhr_breakpoints()
        .iter()
        .position(|bp| bp.matches(&breakpoint.path, &breakpoint.method))
    else {
        tracing::warn!(
            path = %breakpoint.path,
            method = %breakpoint.method,
            "removing unknown xhr breakpoint"
        );
        return state.clone();
    };

    let mut next = state.clone();
    next.xhr_breakpoints_mut().remove(index);
    next
}

fn update_xhr_breakpoint(
    state: &BreakpointsState,
    breakpoint: &XhrBreakpoint,
    index: usize,
) -> BreakpointsState {
    let len = state.xhr_breakpoints().len();
    assert!(
        index < len,
        "xhr breakpoint index {index} out of range for {len} breakpoints"
    );

    let mut next = state.clone();
    next.xhr_breakpoints_mut()[index] = breakpoint.clone();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Location, LocationKey};

    fn bp(source_id: &str, line: u32) -> Breakpoint {
        Breakpoint::new(Location::new(source_id, line))
    }

    fn apply(state: &BreakpointsState, actions: &[Action]) -> BreakpointsState {
        actions
            .iter()
            .fold(state.clone(), |state, action| transition(&state, action))
    }

    #[test]
    fn same_location_overwrites() {
        let first = bp("s1", 3);
        let second = Breakpoint {
            condition: Some("x > 1".to_string()),
            ..bp("s1", 3)
        };
        let third = Breakpoint {
            disabled: true,
            ..second.clone()
        };

        let state = apply(
            &BreakpointsState::new(),
            &[
                Action::set_breakpoint_start(first),
                Action::SetBreakpointCondition {
                    breakpoint: second,
                },
                Action::DisableBreakpoint {
                    breakpoint: third.clone(),
                },
            ],
        );

        assert_eq!(state.breakpoints().len(), 1);
        assert_eq!(state.breakpoints().get(&third.key()), Some(&third));
    }

    #[test]
    fn start_then_error_rolls_back() {
        let existing = bp("s1", 1);
        let initial = transition(
            &BreakpointsState::new(),
            &Action::set_breakpoint_start(existing.clone()),
        );
        let provisional = Breakpoint {
            loading: true,
            ..bp("s1", 9)
        };

        let state = apply(
            &initial,
            &[
                Action::set_breakpoint_start(provisional.clone()),
                Action::set_breakpoint_error(provisional.clone()),
            ],
        );

        assert!(!state.breakpoints().contains_key(&provisional.key()));
        assert_eq!(state.breakpoints().get(&existing.key()), Some(&existing));
    }

    #[test]
    fn done_with_relocation_moves_the_entry() {
        let provisional = Breakpoint {
            loading: true,
            ..bp("s1", 4)
        };
        let relocated = bp("s1", 6);

        let state = apply(
            &BreakpointsState::new(),
            &[
                Action::set_breakpoint_start(provisional.clone()),
                Action::set_breakpoint_done(
                    Some(relocated.clone()),
                    Some(provisional.location.clone()),
                ),
            ],
        );

        assert!(!state.breakpoints().contains_key(&provisional.key()));
        assert_eq!(state.breakpoints().len(), 1);
        assert_eq!(state.breakpoints().get(&relocated.key()), Some(&relocated));
    }

    #[test]
    fn done_at_requested_location_keeps_position() {
        let first = Breakpoint {
            hidden: true,
            loading: true,
            ..bp("s1", 1)
        };
        let second = Breakpoint {
            hidden: true,
            ..bp("s1", 2)
        };
        let committed = Breakpoint {
            hidden: true,
            ..bp("s1", 1)
        };

        let state = apply(
            &BreakpointsState::new(),
            &[
                Action::set_breakpoint_start(first.clone()),
                Action::set_breakpoint_start(second.clone()),
                Action::set_breakpoint_done(
                    Some(committed.clone()),
                    Some(first.location.clone()),
                ),
            ],
        );

        let keys: Vec<_> = state.breakpoints().keys().map(LocationKey::as_str).collect();
        assert_eq!(keys, vec!["s1:1:0", "s1:2:0"]);
        assert_eq!(state.breakpoints()[&committed.key()], committed);
        assert_eq!(
            crate::selectors::get_hidden_breakpoint_location(&state),
            Some(&Location::new("s1", 1))
        );
    }

    #[test]
    fn done_without_breakpoint_only_removes() {
        let provisional = bp("s1", 4);
        let state = apply(
            &BreakpointsState::new(),
            &[
                Action::set_breakpoint_start(provisional.clone()),
                Action::set_breakpoint_done(None, Some(provisional.location.clone())),
            ],
        );

        assert!(state.breakpoints().is_empty());
    }

    #[test]
    fn sync_breakpoint_action_commits() {
        let synced = bp("s2", 10);
        let state = transition(
            &BreakpointsState::new(),
            &Action::SyncBreakpoint(SyncBreakpoint {
                breakpoint: Some(synced.clone()),
                previous_location: None,
            }),
        );
        assert_eq!(state.breakpoints().get(&synced.key()), Some(&synced));
    }

    #[test]
    fn enable_breakpoint_uses_add_path() {
        let disabled = Breakpoint {
            disabled: true,
            ..bp("s1", 2)
        };
        let enabled = bp("s1", 2);

        let state = apply(
            &BreakpointsState::new(),
            &[
                Action::set_breakpoint_start(disabled),
                Action::EnableBreakpoint(AddBreakpoint::Start {
                    breakpoint: enabled.clone(),
                }),
            ],
        );
        assert_eq!(state.breakpoints().get(&enabled.key()), Some(&enabled));
    }

    #[test]
    fn bulk_update_leaves_unmentioned_entries() {
        let a = bp("s1", 1);
        let b = bp("s1", 2);
        let c = bp("s2", 1);
        let state = apply(
            &BreakpointsState::new(),
            &[
                Action::set_breakpoint_start(a.clone()),
                Action::set_breakpoint_start(b.clone()),
                Action::set_breakpoint_start(c.clone()),
            ],
        );

        let disabled = vec![
            Breakpoint {
                disabled: true,
                ..a.clone()
            },
            Breakpoint {
                disabled: true,
                ..b.clone()
            },
        ];
        let state = transition(
            &state,
            &Action::DisableAllBreakpoints {
                breakpoints: disabled,
            },
        );

        assert!(state.breakpoints()[&a.key()].disabled);
        assert!(state.breakpoints()[&b.key()].disabled);
        assert!(!state.breakpoints()[&c.key()].disabled);
    }

    #[test]
    fn remove_is_idempotent() {
        let a = bp("s1", 1);
        let state = transition(
            &BreakpointsState::new(),
            &Action::set_breakpoint_start(a.clone()),
        );
        let removed = transition(
            &state,
            &Action::RemoveBreakpoint {
                breakpoint: a.clone(),
            },
        );
        assert!(removed.breakpoints().is_empty());

        let again = transition(&removed, &Action::RemoveBreakpoint { breakpoint: a });
        assert!(again.is_same(&removed));
    }

    #[test]
    fn remap_replaces_wholesale() {
        let stale = bp("s1", 1);
        let b1 = bp("s1", 2);
        let b2 = bp("s3", 7);
        let state = transition(
            &BreakpointsState::new(),
            &Action::set_breakpoint_start(stale.clone()),
        );

        let state = transition(
            &state,
            &Action::RemapBreakpoints {
                breakpoints: vec![b1.clone(), b2.clone()],
            },
        );

        let expected: BreakpointsMap = [(b1.key(), b1), (b2.key(), b2)].into_iter().collect();
        assert_eq!(state.breakpoints(), &expected);
    }

    #[test]
    fn navigate_resets_everything() {
        let state = apply(
            &BreakpointsState::with_xhr_breakpoints(vec![XhrBreakpoint::new("/a", "GET")]),
            &[Action::set_breakpoint_start(bp("s1", 1)), Action::Navigate],
        );
        assert_eq!(state, BreakpointsState::default());
    }

    #[test]
    fn navigate_on_empty_state_is_identity() {
        let empty = BreakpointsState::new();
        assert!(transition(&empty, &Action::Navigate).is_same(&empty));
    }

    #[test]
    fn unknown_action_is_identity() {
        let state = transition(
            &BreakpointsState::new(),
            &Action::set_breakpoint_start(bp("s1", 1)),
        );
        assert!(transition(&state, &Action::Unknown).is_same(&state));
    }

    #[test]
    fn previous_snapshot_is_unaffected() {
        let before = transition(
            &BreakpointsState::new(),
            &Action::set_breakpoint_start(bp("s1", 1)),
        );
        let after = transition(&before, &Action::set_breakpoint_start(bp("s1", 2)));
        assert_eq!(before.breakpoints().len(), 1);
        assert_eq!(after.breakpoints().len(), 2);
    }

    #[test]
    fn set_xhr_is_idempotent_on_identical_value() {
        let xhr = XhrBreakpoint::new("/api", "GET");
        let once = transition(
            &BreakpointsState::new(),
            &Action::SetXhrBreakpoint {
                breakpoint: xhr.clone(),
            },
        );
        let twice = transition(&once, &Action::SetXhrBreakpoint { breakpoint: xhr });

        assert!(twice.is_same(&once));
        assert_eq!(twice.xhr_breakpoints().len(), 1);
    }

    #[test]
    fn set_xhr_replaces_in_place() {
        let state = apply(
            &BreakpointsState::new(),
            &[
                Action::SetXhrBreakpoint {
                    breakpoint: XhrBreakpoint::new("/a", "GET"),
                },
                Action::SetXhrBreakpoint {
                    breakpoint: XhrBreakpoint::new("/b", "GET"),
                },
            ],
        );

        let disabled = XhrBreakpoint {
            disabled: true,
            ..XhrBreakpoint::new("/a", "GET")
        };
        let state = transition(
            &state,
            &Action::SetXhrBreakpoint {
                breakpoint: disabled.clone(),
            },
        );

        assert_eq!(
            state.xhr_breakpoints(),
            &[disabled, XhrBreakpoint::new("/b", "GET")]
        );
    }

    #[test]
    fn remove_xhr_miss_is_a_no_op() {
        let state = transition(
            &BreakpointsState::new(),
            &Action::SetXhrBreakpoint {
                breakpoint: XhrBreakpoint::new("/a", "GET"),
            },
        );

        let missed = transition(
            &state,
            &Action::RemoveXhrBreakpoint {
                breakpoint: XhrBreakpoint::new("/a", "POST"),
            },
        );
        assert!(missed.is_same(&state));

        let removed = transition(
            &state,
            &Action::RemoveXhrBreakpoint {
                breakpoint: XhrBreakpoint::new("/a", "GET"),
            },
        );
        assert!(removed.xhr_breakpoints().is_empty());
    }

    #[test]
    fn update_xhr_by_index() {
        let state = BreakpointsState::with_xhr_breakpoints(vec![
            XhrBreakpoint::new("/a", "GET"),
            XhrBreakpoint::new("/b", "GET"),
        ]);
        let enabled = XhrBreakpoint::new("/b", "PUT");

        let state = transition(
            &state,
            &Action::EnableXhrBreakpoint {
                breakpoint: enabled.clone(),
                index: 1,
            },
        );
        assert_eq!(state.xhr_breakpoints()[1], enabled);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn update_xhr_out_of_range_panics() {
        transition(
            &BreakpointsState::new(),
            &Action::UpdateXhrBreakpoint {
                breakpoint: XhrBreakpoint::new("/a", "GET"),
                index: 0,
            },
        );
    }
}
