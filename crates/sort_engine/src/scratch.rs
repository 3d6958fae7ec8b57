use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use tracing::trace;

const MAX_RETAINED: usize = 4;

/// Free list of auxiliary buffers for the merge sorts.
///
/// Each rental is exclusive to one sort call. Returned buffers are emptied
/// before they are pooled, so only their capacity is kept alive.
#[derive(Debug)]
pub struct ScratchPool<T> {
    free: Mutex<Vec<Vec<T>>>,
}

impl<T> Default for ScratchPool<T> {
    fn default() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
        }
    }
}

impl<T> ScratchPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffers currently waiting for reuse.
    pub fn retained(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Vec<T>>> {
        // Pooled buffers are always empty, so a poisoned lock holds nothing stale.
        self.free
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn take(&self, len: usize) -> Vec<T> {
        let mut free = self.lock();
        match free.iter().position(|buf| buf.capacity() >= len) {
            Some(i) => {
                trace!(len, "scratch pool hit");
                free.swap_remove(i)
            }
            None => {
                trace!(len, "scratch pool miss");
                free.pop().unwrap_or_default()
            }
        }
    }

    fn release(&self, mut buf: Vec<T>) {
        buf.clear();
        let mut free = self.lock();
        if free.len() < MAX_RETAINED {
            free.push(buf);
        }
    }
}

impl<T: Clone> ScratchPool<T> {
    /// Rents a buffer holding a copy of `seed`, so `len == seed.len()`.
    ///
    /// Callers treat the contents as garbage and overwrite before reading.
    /// Only the allocation is pooled: the elements are cloned on every rental,
    /// which for owning types such as `String` means one heap allocation per
    /// element that the merge passes later overwrite through `clone_from`.
    pub fn acquire(&self, seed: &[T]) -> Scratch<'_, T> {
        let mut buf = self.take(seed.len());
        buf.extend_from_slice(seed);
        Scratch { pool: self, buf }
    }
}

/// A rented buffer, handed back to its pool on drop.
#[derive(Debug)]
pub struct Scratch<'p, T> {
    pool: &'p ScratchPool<T>,
    buf: Vec<T>,
}

impl<T> Deref for Scratch<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.buf
    }
}

impl<T> DerefMut for Scratch<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T> Drop for Scratch<'_, T> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn rental_matches_requested_length() {
        let pool = ScratchPool::new();
        let seed = [3_u64, 1, 2];
        let scratch = pool.acquire(&seed);
        assert_eq!(&*scratch, &seed);
        assert_eq!(pool.retained(), 0);
        drop(scratch);
        assert_eq!(pool.retained(), 1);
    }

    #[test]
    fn released_capacity_is_reused() {
        let pool = ScratchPool::new();
        let big = vec![0_u32; 1000];
        let ptr = {
            let scratch = pool.acquire(&big);
            scratch.as_ptr()
        };
        let scratch = pool.acquire(&big[..10]);
        assert_eq!(scratch.len(), 10);
        assert_eq!(scratch.as_ptr(), ptr);
    }

    #[test]
    fn shorter_pooled_buffers_are_grown() {
        let pool = ScratchPool::new();
        drop(pool.acquire(&[1_u8; 4]));
        let scratch = pool.acquire(&[7_u8; 64]);
        assert_eq!(scratch.len(), 64);
        assert!(scratch.iter().all(|&x| x == 7));
    }

    #[test]
    fn concurrent_rentals_are_distinct() {
        let pool = ScratchPool::new();
        let a = pool.acquire(&[1_u8; 8]);
        let b = pool.acquire(&[2_u8; 8]);
        assert_ne!(a.as_ptr(), b.as_ptr());
        drop(a);
        drop(b);
        assert_eq!(pool.retained(), 2);
    }

    #[test]
    fn release_drops_elements() {
        let shared = Rc::new(());
        let pool = ScratchPool::new();
        let seed = vec![Rc::clone(&shared); 5];
        drop(pool.acquire(&seed));
        drop(seed);
        assert_eq!(Rc::strong_count(&shared), 1);
        assert_eq!(pool.retained(), 1);
    }

    #[test]
    fn every_rental_clones_the_seed() {
        let shared = Rc::new(());
        let pool = ScratchPool::new();
        let seed = vec![Rc::clone(&shared); 5];
        assert_eq!(Rc::strong_count(&shared), 6);

        let ptr = {
            let scratch = pool.acquire(&seed);
            assert_eq!(Rc::strong_count(&shared), 11);
            scratch.as_ptr()
        };
        assert_eq!(Rc::strong_count(&shared), 6);

        let scratch = pool.acquire(&seed);
        assert_eq!(scratch.as_ptr(), ptr);
        assert_eq!(Rc::strong_count(&shared), 11);
    }

    #[test]
    fn retention_is_bounded() {
        let pool = ScratchPool::new();
        let rentals: Vec<_> = (0..MAX_RETAINED + 3)
            .map(|_| pool.acquire(&[0_u16; 4]))
            .collect();
        drop(rentals);
        assert_eq!(pool.retained(), MAX_RETAINED);
    }
}
