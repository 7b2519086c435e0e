//! Classifying source ids as original or generated

/// Decides whether a source id names a generated source
pub trait SourceClassifier {
    fn is_generated_source_id(&self, source_id: &str) -> bool;
}

impl<F> SourceClassifier for F
where
    F: Fn(&str) -> bool,
{
    fn is_generated_source_id(&self, source_id: &str) -> bool {
        self(source_id)
    }
}

/// Source map service convention: original sources are registered with ids
/// containing `/originalSource`, every other id is generated.
#[derive(Debug, Clone, Copy, Default)]
pub struct OriginalSourceIds;

const ORIGINAL_SOURCE_MARKER: &str = "/originalSource";

pub fn is_original_id(source_id: &str) -> bool {
    source_id.contains(ORIGINAL_SOURCE_MARKER)
}

impl SourceClassifier for OriginalSourceIds {
    fn is_generated_source_id(&self, source_id: &str) -> bool {
        !is_original_id(source_id)
    }
}
