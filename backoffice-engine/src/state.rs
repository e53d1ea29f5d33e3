use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared state cell with interior mutability.
///
/// `State<T>` is the storage behind every table and form. Cloning a
/// `State<T>` yields another handle to the same cell, which is how a table
/// hands a [`TableHandle`](crate::table::TableHandle) to its owning page
/// without exposing the state itself.
///
/// Every mutation marks the cell dirty so a renderer can tell whether the
/// view needs refreshing.
///
/// # Example
///
/// ```
/// use backoffice_engine::state::State;
///
/// let count = State::new(0usize);
/// count.update(|c| *c += 1);
/// assert_eq!(count.get(), 1);
/// assert!(count.is_dirty());
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    dirty: Arc<AtomicBool>,
}

impl<T> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.read(T::clone)
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Read the value through a closure without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.read_guard())
    }

    /// Update the value using a closure, returning whatever the closure returns.
    ///
    /// The whole closure runs under one write lock, so callers observe the
    /// update as a single transition.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.write_guard());
        self.dirty.store(true, Ordering::SeqCst);
        result
    }

    /// Check if the state has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, T> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, T> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_cell() {
        let a = State::new(String::from("before"));
        let b = a.clone();
        b.set(String::from("after"));
        assert_eq!(a.get(), "after");
    }

    #[test]
    fn dirty_flag_tracks_mutation() {
        let state = State::new(1);
        assert!(!state.is_dirty());
        let doubled = state.update(|v| {
            *v *= 2;
            *v
        });
        assert_eq!(doubled, 2);
        assert!(state.is_dirty());
        state.clear_dirty();
        assert!(!state.is_dirty());
    }

    #[test]
    fn read_does_not_mark_dirty() {
        let state = State::new(vec![1, 2, 3]);
        assert_eq!(state.read(|v| v.len()), 3);
        assert!(!state.is_dirty());
    }
}
