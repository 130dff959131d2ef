//! Process-wide change counter.
//!
//! The watcher is the only writer; every open reload stream reads it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter bumped once per detected batch of file changes.
///
/// Starts at 0 and never decreases while the process runs.
#[derive(Debug, Default)]
pub struct VersionState {
    value: AtomicU64,
}

impl VersionState {
    /// Create a counter starting at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest committed version.
    pub fn read(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    /// Advance the version by one and return the new value.
    pub(crate) fn increment(&self) -> u64 {
        self.value.fetch_add(1, Ordering::AcqRel) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(VersionState::new().read(), 0);
    }

    #[test]
    fn test_increment_returns_new_value() {
        let version = VersionState::new();
        assert_eq!(version.increment(), 1);
        assert_eq!(version.increment(), 2);
        assert_eq!(version.read(), 2);
    }

    #[test]
    fn test_concurrent_readers_never_see_decrease() {
        let version = Arc::new(VersionState::new());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let version = Arc::clone(&version);
                thread::spawn(move || {
                    let mut last = 0;
                    for _ in 0..10_000 {
                        let current = version.read();
                        assert!(current >= last);
                        last = current;
                    }
                })
            })
            .collect();

        for _ in 0..1_000 {
            version.increment();
        }

        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(version.read(), 1_000);
    }
}
