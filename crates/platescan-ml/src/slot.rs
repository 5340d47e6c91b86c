//! Swappable, read-mostly model handle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Holds the current model behind an `Arc` that readers clone.
///
/// A reader takes a [`snapshot`](Self::snapshot) and releases the lock before
/// running inference, so a concurrent [`replace`](Self::replace) never blocks
/// on prediction work and never changes a model someone is using. Reloads
/// build the new model completely before publishing it.
#[derive(Debug)]
pub struct ModelSlot<T> {
    current: RwLock<Arc<T>>,
    generation: AtomicU64,
}

impl<T> ModelSlot<T> {
    pub fn new(model: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(model)),
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> Arc<T> {
        Arc::clone(&self.current.read())
    }

    /// Publish `model`, returning the previous one.
    pub fn replace(&self, model: T) -> Arc<T> {
        let next = Arc::new(model);
        let prev = std::mem::replace(&mut *self.current.write(), next);
        self.generation.fetch_add(1, Ordering::AcqRel);
        prev
    }

    /// Build a model with `load` and publish it only if that succeeds.
    ///
    /// On error the slot keeps serving the previous model.
    pub fn reload_with<E>(&self, load: impl FnOnce() -> Result<T, E>) -> Result<(), E> {
        let model = load()?;
        self.replace(model);
        Ok(())
    }

    /// Derive the next model from the current one under the write lock.
    ///
    /// Concurrent updates are applied one after another, so none of them is
    /// lost. Readers wait for `derive` to finish; keep file I/O outside it. On
    /// error the slot is unchanged.
    pub fn update<E>(&self, derive: impl FnOnce(&T) -> Result<T, E>) -> Result<(), E> {
        let mut current = self.current.write();
        let next = derive(&current)?;
        *current = Arc::new(next);
        self.generation.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    /// Number of successful replacements since construction.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
