use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    actions::Action,
    config::StoreConfig,
    error::StoreError,
    location::Location,
    pending::{InstallState, PendingInstalls},
    reducer::transition,
    remap::{self, SourceMaps},
    state::BreakpointsState,
};

/// A versioned breakpoint state
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Incremented whenever `state` changes value
    pub version: u64,
    pub state: BreakpointsState,
}

/// Published to subscribers of a [`BreakpointStore`]
#[derive(Debug, Clone)]
pub enum StoreEvent {
    Changed(Snapshot),
}

struct StoreInner {
    current: Snapshot,
    installs: PendingInstalls,
    subscribers: Vec<crossbeam_channel::Sender<StoreEvent>>,
}

/// Owner of the breakpoint state for one debugging session.
///
/// All writes go through [`BreakpointStore::dispatch`] or
/// [`BreakpointStore::compare_and_swap`] and are applied one at a time.
/// Readers take a [`Snapshot`], which stays valid and unchanged however many
/// writes follow.
pub struct BreakpointStore {
    inner: Mutex<StoreInner>,
    publish_events: bool,
}

impl Default for BreakpointStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl BreakpointStore {
    pub fn new(config: StoreConfig) -> Self {
        let StoreConfig {
            xhr_breakpoints,
            publish_events,
        } = config;

        Self {
            inner: Mutex::new(StoreInner {
                current: Snapshot {
                    version: 0,
                    state: BreakpointsState::with_xhr_breakpoints(xhr_breakpoints),
                },
                installs: PendingInstalls::new(),
                subscribers: Vec::new(),
            }),
            publish_events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().current.clone()
    }

    pub fn version(&self) -> u64 {
        self.lock().current.version
    }

    /// Receive a [`StoreEvent`] after every change
    pub fn subscribe(&self) -> crossbeam_channel::Receiver<StoreEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.lock().subscribers.push(tx);
        rx
    }

    /// Apply `action` to the current state and return the resulting snapshot
    #[tracing::instrument(skip(self, action), fields(action = action.name()))]
    pub fn dispatch(&self, action: &Action) -> Snapshot {
        let mut inner = self.lock();
        self.apply(&mut inner, action)
    }

    /// Apply `action` only if the store is still at `expected_version`
    #[tracing::instrument(skip(self, action), fields(action = action.name()))]
    pub fn compare_and_swap(
        &self,
        expected_version: u64,
        action: &Action,
    ) -> Result<Snapshot, StoreError> {
        let mut inner = self.lock();
        let actual = inner.current.version;
        if actual != expected_version {
            tracing::warn!(expected_version, actual, "rejecting update to stale snapshot");
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual,
            });
        }
        Ok(self.apply(&mut inner, action))
    }

    fn apply(&self, inner: &mut StoreInner, action: &Action) -> Snapshot {
        inner.installs.observe(action);

        let next = transition(&inner.current.state, action);
        if next.is_same(&inner.current.state) || next == inner.current.state {
            tracing::trace!(version = inner.current.version, "state unchanged");
            return inner.current.clone();
        }

        inner.current = Snapshot {
            version: inner.current.version + 1,
            state: next,
        };
        tracing::debug!(version = inner.current.version, "state updated");

        let snapshot = inner.current.clone();
        if self.publish_events {
            // drop subscribers that have gone away
            inner
                .subscribers
                .retain(|tx| tx.send(StoreEvent::Changed(snapshot.clone())).is_ok());
        }
        snapshot
    }

    /// Install progress for a breakpoint requested at `location`
    pub fn install_state(&self, location: &Location) -> Option<InstallState> {
        self.lock().installs.state(&location.key()).cloned()
    }

    /// Number of installs still waiting on the debuggee
    pub fn pending_installs(&self) -> usize {
        self.lock().installs.pending_count()
    }

    pub fn clear_settled_installs(&self) {
        self.lock().installs.clear_settled();
    }

    /// Move every breakpoint in `source_id` to its original location.
    ///
    /// The remap is computed against the current snapshot and only applied if
    /// nothing else was written in the meantime.
    #[tracing::instrument(skip(self, source_maps))]
    pub async fn remap_source<S: SourceMaps>(
        &self,
        source_id: &str,
        source_maps: &S,
    ) -> Result<Snapshot, StoreError> {
        let base = self.snapshot();
        let breakpoints = base.state.breakpoints().values().cloned().collect::<Vec<_>>();
        let remapped = remap::remap_locations(breakpoints, source_id, source_maps).await;

        self.compare_and_swap(
            base.version,
            &Action::RemapBreakpoints {
                breakpoints: remapped,
            },
        )
    }
}
