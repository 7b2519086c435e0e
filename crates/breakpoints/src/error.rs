//! Error types for the breakpoint store.

use crate::location::LocationKey;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A compare-and-swap update was based on an outdated snapshot.
    #[error("snapshot version {expected} is stale, store is at version {actual}")]
    VersionConflict {
        /// The version the caller based its update on.
        expected: u64,
        /// The current version of the store.
        actual: u64,
    },

    /// The source map service could not resolve a breakpoint location.
    #[error("resolving original location for {location}")]
    Remap {
        location: LocationKey,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
