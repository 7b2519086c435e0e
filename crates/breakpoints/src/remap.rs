//! Re-resolving breakpoint locations against a source map
//!
//! When a source gains a source map, breakpoints recorded against it need to
//! move to their original locations. Resolution happens concurrently for the
//! whole batch and the result is delivered as one complete replacement set, so
//! the store never sees a half-remapped state.

use std::future::Future;

use futures::future::{join_all, try_join_all};

use crate::{error::StoreError, location::Location, types::Breakpoint};

/// Source map service
pub trait SourceMaps {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get_original_location(
        &self,
        location: &Location,
    ) -> impl Future<Output = Result<Location, Self::Error>>;
}

/// Resolve the original location of every breakpoint in `source_id`.
///
/// Breakpoints in other sources are returned unchanged, in their original
/// order, so the output can be dispatched directly as a
/// [`crate::Action::RemapBreakpoints`]. A location that fails to resolve
/// keeps its previous value.
#[tracing::instrument(skip(breakpoints, source_maps))]
pub async fn remap_locations<S: SourceMaps>(
    breakpoints: impl IntoIterator<Item = Breakpoint>,
    source_id: &str,
    source_maps: &S,
) -> Vec<Breakpoint> {
    let remapped = breakpoints.into_iter().map(|breakpoint| async move {
        if breakpoint.location.source_id != source_id {
            return breakpoint;
        }

        let resolved = source_maps.get_original_location(&breakpoint.location).await;
        match resolved {
            Ok(location) => Breakpoint {
                location,
                ..breakpoint
            },
            Err(error) => {
                tracing::warn!(
                    key = %breakpoint.key(),
                    %error,
                    "keeping unresolved breakpoint location"
                );
                breakpoint
            }
        }
    });

    join_all(remapped).await
}

/// As [`remap_locations`], but fails the whole batch if any location cannot
/// be resolved
#[tracing::instrument(skip(breakpoints, source_maps))]
pub async fn try_remap_locations<S: SourceMaps>(
    breakpoints: impl IntoIterator<Item = Breakpoint>,
    source_id: &str,
    source_maps: &S,
) -> Result<Vec<Breakpoint>, StoreError> {
    let remapped = breakpoints.into_iter().map(|breakpoint| async move {
        if breakpoint.location.source_id != source_id {
            return Ok(breakpoint);
        }

        let resolved = source_maps.get_original_location(&breakpoint.location).await;
        match resolved {
            Ok(location) => Ok(Breakpoint {
                location,
                ..breakpoint
            }),
            Err(error) => Err(StoreError::Remap {
                location: breakpoint.key(),
                source: Box::new(error),
            }),
        }
    });

    try_join_all(remapped).await
}
