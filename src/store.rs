use std::sync::{Arc, Mutex};

use crate::types::Sample;

/// Append-only accumulation of downsampled samples, shared between the
/// ingestion thread and the GUI thread.
///
/// A cloneable handle around a single mutex-guarded sequence: every append
/// lands as one critical section, so a concurrent `snapshot` observes either
/// the pre- or post-append state, never a half-appended batch. Readers get
/// owned copies and can never block the ingestion loop beyond the lock.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    inner: Arc<Mutex<Vec<Sample>>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the series with `batch` in arrival order, atomically.
    pub fn append(&self, batch: &[Sample]) {
        let mut series = self.inner.lock().expect("series lock poisoned");
        series.extend_from_slice(batch);
    }

    /// Independent copy of the series as of the call.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.inner.lock().expect("series lock poisoned").clone()
    }

    /// Truncates the series to empty. The store itself stays usable.
    pub fn clear(&self) {
        self.inner.lock().expect("series lock poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("series lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
