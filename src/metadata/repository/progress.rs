//! Re-entrancy guard for symbols that are mid-load.
//!
//! While a symbol is being assembled, any lookup that would re-enter it must
//! short-circuit to absence instead of recursing; this is what breaks
//! class↔interface prerequisite cycles. Membership is scoped: a
//! [`ProgressGuard`] removes its key on drop, so the mark cannot outlive the
//! load operation on any exit path, including error propagation and panics.

use dashmap::DashSet;

/// Set of `namespace.symbol` keys currently being loaded.
pub(crate) struct ProgressTracker {
    keys: DashSet<String>,
}

impl ProgressTracker {
    pub(crate) fn new() -> Self {
        ProgressTracker {
            keys: DashSet::new(),
        }
    }

    /// Whether `key` is currently marked in-progress.
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Mark `key` in-progress for the lifetime of the returned guard.
    ///
    /// Returns `None` when the key is already marked, which is exactly the
    /// re-entrant case the caller must short-circuit.
    pub(crate) fn acquire(&self, key: String) -> Option<ProgressGuard<'_>> {
        if self.keys.insert(key.clone()) {
            Some(ProgressGuard {
                tracker: self,
                key,
            })
        } else {
            None
        }
    }
}

/// Scoped in-progress mark; clears itself on every exit path.
pub(crate) struct ProgressGuard<'a> {
    tracker: &'a ProgressTracker,
    key: String,
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.tracker.keys.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_and_release() {
        let tracker = ProgressTracker::new();
        assert!(!tracker.contains("Foo.Bar"));

        let guard = tracker.acquire("Foo.Bar".to_string()).unwrap();
        assert!(tracker.contains("Foo.Bar"));
        drop(guard);
        assert!(!tracker.contains("Foo.Bar"));
    }

    #[test]
    fn test_reentrant_acquire_fails() {
        let tracker = ProgressTracker::new();
        let _guard = tracker.acquire("Foo.Bar".to_string()).unwrap();
        assert!(tracker.acquire("Foo.Bar".to_string()).is_none());
    }

    #[test]
    fn test_released_on_unwind() {
        let tracker = ProgressTracker::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = tracker.acquire("Foo.Bar".to_string()).unwrap();
            panic!("load abandoned");
        }));
        assert!(result.is_err());
        assert!(!tracker.contains("Foo.Bar"));
    }
}
