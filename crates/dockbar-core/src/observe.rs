//! Change observation with explicit watcher handles.
//!
//! An [`Observed`] cell pairs a value with a version counter that only moves
//! when a write actually changes the value. A [`Watcher`] is a cursor handle
//! over that counter: polling it reports whether the cell changed since the
//! watcher last looked, on the same thread, in program order. Dropping the
//! watcher ends the subscription.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(1);

/// A value cell whose changes can be watched.
#[derive(Debug)]
pub struct Observed<T> {
    cell_id: u64,
    value: T,
    version: u64,
}

impl<T: Clone + PartialEq> Observed<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell_id: NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed),
            value,
            version: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value. Returns true and bumps the version only when the
    /// new value differs from the current one.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version += 1;
        true
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Create a watcher positioned at the current version, so it reports
    /// only changes made after this call.
    pub fn watch(&self) -> Watcher {
        Watcher {
            cell_id: self.cell_id,
            last_seen: self.version,
        }
    }
}

impl<T: Clone + PartialEq + Default> Default for Observed<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Cursor handle over one [`Observed`] cell.
#[derive(Debug, Clone)]
pub struct Watcher {
    cell_id: u64,
    last_seen: u64,
}

impl Watcher {
    /// Whether the cell changed since this watcher last polled. Consumes the
    /// pending change: a second poll without an intervening write reports
    /// false.
    pub fn changed<T: Clone + PartialEq>(&mut self, cell: &Observed<T>) -> bool {
        debug_assert_eq!(
            self.cell_id, cell.cell_id,
            "watcher polled against a cell it does not watch"
        );
        if cell.version == self.last_seen {
            return false;
        }
        self.last_seen = cell.version;
        true
    }

    /// The current value when it changed since the last poll, `None`
    /// otherwise.
    pub fn latest<'a, T: Clone + PartialEq>(&mut self, cell: &'a Observed<T>) -> Option<&'a T> {
        if self.changed(cell) {
            Some(cell.get())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_bumps_version_only_on_change() {
        let mut cell = Observed::new(44.0f32);
        assert_eq!(cell.version(), 0);
        assert!(!cell.set(44.0));
        assert_eq!(cell.version(), 0);
        assert!(cell.set(61.5));
        assert_eq!(cell.version(), 1);
    }

    #[test]
    fn test_watcher_sees_each_change_once() {
        let mut cell = Observed::new(0u32);
        let mut watcher = cell.watch();
        assert!(!watcher.changed(&cell));

        cell.set(1);
        assert!(watcher.changed(&cell));
        assert!(!watcher.changed(&cell));

        cell.set(2);
        cell.set(3);
        assert_eq!(watcher.latest(&cell), Some(&3));
        assert_eq!(watcher.latest(&cell), None);
    }

    #[test]
    fn test_watcher_starts_at_current_version() {
        let mut cell = Observed::new(String::from("a"));
        cell.set(String::from("b"));
        let mut watcher = cell.watch();
        assert!(!watcher.changed(&cell));
        cell.set(String::from("c"));
        assert!(watcher.changed(&cell));
    }

    #[test]
    fn test_independent_watchers() {
        let mut cell = Observed::new(10i64);
        let mut first = cell.watch();
        let mut second = cell.watch();
        cell.set(20);
        assert!(first.changed(&cell));
        assert!(second.changed(&cell));
        assert!(!first.changed(&cell));
    }
}
