use std::sync::{Mutex, MutexGuard};

use business::domain::extraction::cache::ResultCache;
use business::domain::extraction::fingerprint::Fingerprint;
use business::domain::extraction::model::ExtractionResult;

type Entry = Option<(Fingerprint, ExtractionResult)>;

/// Process-local cache holding only the most recent extraction.
///
/// A `put` replaces whatever was stored before; nothing survives a restart.
#[derive(Default)]
pub struct LastResultCache {
    entry: Mutex<Entry>,
}

impl LastResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    // Writes replace the whole entry, so a poisoned lock still holds a valid one.
    fn lock(&self) -> MutexGuard<'_, Entry> {
        self.entry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ResultCache for LastResultCache {
    fn get(&self, fingerprint: &Fingerprint) -> Option<ExtractionResult> {
        match self.lock().as_ref() {
            Some((stored, result)) if stored == fingerprint => Some(result.clone()),
            _ => None,
        }
    }

    fn put(&self, fingerprint: Fingerprint, result: ExtractionResult) {
        tracing::debug!(fingerprint = %fingerprint, "storing extraction result");
        *self.lock() = Some((fingerprint, result));
    }

    fn clear(&self) {
        *self.lock() = None;
    }
}
