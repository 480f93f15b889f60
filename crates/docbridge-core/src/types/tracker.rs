use indexmap::IndexSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Records which paths of one document have been modified since the last
/// persisted write.
///
/// Cheap to clone; clones share the same set of paths. A tracker belongs to
/// exactly one document instance.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    dirty: Arc<Mutex<IndexSet<String>>>,
}

impl ChangeTracker {
    pub fn new() -> ChangeTracker {
        ChangeTracker::default()
    }

    pub fn mark(&self, path: &str) {
        self.lock().insert(path.to_string());
    }

    pub fn is_modified(&self, path: &str) -> bool {
        self.lock().contains(path)
    }

    /// Modified paths in the order they were first touched.
    pub fn modified_paths(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, IndexSet<String>> {
        // A panic while holding the lock leaves the set intact.
        self.dirty.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
