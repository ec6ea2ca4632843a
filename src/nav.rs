//! Injected navigation capability with in-process history.
//!
//! The viewer never reads ambient global location state. Embedders hand
//! it a [`Navigator`], and the viewer both reads the current location
//! and performs navigation through that handle. [`MemoryNavigator`]
//! provides a browser-like history (push, back, forward) for embedders
//! and tests.

use std::sync::Mutex;

use crate::route::Location;

/// Navigation capability injected into the viewer.
///
/// Implementations must be `Send + Sync`; the viewer reads and navigates
/// from async contexts.
pub trait Navigator: Send + Sync {
    /// The current location.
    fn current(&self) -> Location;

    /// Navigate to a new location, making it current.
    fn navigate(&self, to: Location);
}

/// An in-process history-backed [`Navigator`].
///
/// Behaves like browser history: [`Navigator::navigate`] truncates any
/// forward entries and pushes, [`MemoryNavigator::back`] and
/// [`MemoryNavigator::forward`] move the cursor without changing the
/// entries. Starts at the landing route.
pub struct MemoryNavigator {
    inner: Mutex<History>,
}

struct History {
    entries: Vec<Location>,
    cursor: usize,
}

impl MemoryNavigator {
    /// A navigator whose history starts at the landing route.
    pub fn new() -> Self {
        Self::starting_at(Location::landing())
    }

    /// A navigator whose history starts at the given location.
    pub fn starting_at(location: Location) -> Self {
        Self {
            inner: Mutex::new(History {
                entries: vec![location],
                cursor: 0,
            }),
        }
    }

    /// Move one entry back in history. Returns `false` at the oldest entry.
    pub fn back(&self) -> bool {
        let mut inner = self.lock();
        if inner.cursor == 0 {
            return false;
        }
        inner.cursor -= 1;
        true
    }

    /// Move one entry forward in history. Returns `false` at the newest entry.
    pub fn forward(&self) -> bool {
        let mut inner = self.lock();
        if inner.cursor + 1 >= inner.entries.len() {
            return false;
        }
        inner.cursor += 1;
        true
    }

    /// Number of entries currently in history.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the history is empty. Always `false`: there is at least
    /// the starting entry.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, History> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for MemoryNavigator {
    fn current(&self) -> Location {
        let inner = self.lock();
        inner.entries[inner.cursor].clone()
    }

    fn navigate(&self, to: Location) {
        tracing::trace!(location = %to, "navigate");
        let mut inner = self.lock();
        let next = inner.cursor + 1;
        inner.entries.truncate(next);
        inner.entries.push(to);
        inner.cursor = next;
    }
}
