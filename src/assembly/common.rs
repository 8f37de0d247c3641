//! Common utility functions
use crate::types::{RwgError, RwgResult};
use rayon::ThreadPoolBuilder;
use std::cell::UnsafeCell;

/// Create a pool with `num_threads` workers
pub(crate) fn create_pool(num_threads: usize) -> RwgResult<rayon::ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| RwgError::ThreadPool(e.to_string()))
}

/// The number of workers to use: the requested number, or the available hardware parallelism
pub(crate) fn worker_count(requested: Option<usize>) -> usize {
    match requested {
        Some(n) if n > 0 => n,
        _ => std::thread::available_parallelism().map_or(1, |n| n.get()),
    }
}

/// Scratch storage with one slot per worker of a thread pool
///
/// All slots are allocated when the storage is created and are never
/// resized. Slot `i` may only be used by the worker with index `i`.
pub(crate) struct WorkerScratch<T> {
    slots: Vec<UnsafeCell<T>>,
}

unsafe impl<T: Send> Sync for WorkerScratch<T> {}

impl<T: Clone> WorkerScratch<T> {
    /// Create storage for `nworkers` workers, each slot starting as `init`
    pub(crate) fn new(nworkers: usize, init: T) -> Self {
        Self {
            slots: (0..nworkers).map(|_| UnsafeCell::new(init.clone())).collect(),
        }
    }
}

impl<T> WorkerScratch<T> {
    /// The number of slots
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Get the slot of a worker
    ///
    /// # Safety
    /// The caller must be running on the worker with index `worker`, and must not
    /// hold another reference to the same slot.
    #[allow(clippy::mut_from_ref)]
    pub(crate) unsafe fn slot(&self, worker: usize) -> &mut T {
        &mut *self.slots[worker].get()
    }
}
