use super::fingerprint::Fingerprint;
use super::model::ExtractionResult;

/// Port for memoizing the last successful extraction.
///
/// Lookups never reach the network. Whether a hit is honored is up to the
/// caller.
pub trait ResultCache: Send + Sync {
    fn get(&self, fingerprint: &Fingerprint) -> Option<ExtractionResult>;
    fn put(&self, fingerprint: Fingerprint, result: ExtractionResult);
    /// Forgets both the stored result and its fingerprint.
    fn clear(&self);
}
