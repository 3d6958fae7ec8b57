use std::sync::Arc;

use rayon::ThreadPool;

use crate::{ScratchPool, SortError, Thresholds};

/// Reusable state for sorting sequences of `T`.
///
/// Holds the tier thresholds, the scratch buffers the merge sorts rent, and
/// optionally a dedicated thread pool for parallel quicksort (the global
/// rayon pool otherwise). One context may serve concurrent sorts of different
/// sequences.
#[derive(Debug)]
pub struct SortContext<T> {
    thresholds: Thresholds,
    scratch: ScratchPool<T>,
    pool: Option<Arc<ThreadPool>>,
}

impl<T> Default for SortContext<T> {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::for_type::<T>(),
            scratch: ScratchPool::new(),
            pool: None,
        }
    }
}

impl<T> SortContext<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Result<Self, SortError> {
        self.thresholds = thresholds.validate()?;
        Ok(self)
    }

    pub fn with_thread_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    #[inline]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    #[inline]
    pub fn scratch(&self) -> &ScratchPool<T> {
        &self.scratch
    }

    /// Runs `op` inside the dedicated pool, if any.
    pub(crate) fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}
