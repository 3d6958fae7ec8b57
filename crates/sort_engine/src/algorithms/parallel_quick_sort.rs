use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::Scope;
use tracing::{debug, trace};

use crate::{StrictOrder, Thresholds};

use super::{common, quick_sort};

/// Extra doublings of the chunk count on top of one chunk per worker.
const SPLIT_SCALE_SLACK: usize = 2;

/// Smallest range that can be partitioned around a median-of-7 pivot.
const MIN_SPLIT: usize = 7;

struct ForkPlan<'a, O> {
    split_size: usize,
    order: &'a O,
    params: &'a Thresholds,
    spawned: AtomicUsize,
}

/// Sorts `data` on the current rayon pool.
///
/// The calling thread keeps partitioning the left side while every right side
/// of at least the split size becomes its own task. Returns once all tasks
/// are done. Inputs below `params.min_parallel_batch`, or a single-worker pool,
/// run the sequential quicksort on the calling thread.
pub fn sort<T: Send, O: StrictOrder<T> + Sync>(data: &mut [T], order: &O, params: &Thresholds) {
    sort_counting_forks(data, order, params);
}

/// [`sort`], returning how many right sides were handed off as tasks.
fn sort_counting_forks<T: Send, O: StrictOrder<T> + Sync>(
    data: &mut [T],
    order: &O,
    params: &Thresholds,
) -> usize {
    let len = data.len();
    let workers = rayon::current_num_threads();
    if workers <= 1 || len < params.min_parallel_batch.max(MIN_SPLIT) {
        quick_sort::quick_sort(data, order, params);
        return 0;
    }

    let plan = ForkPlan {
        split_size: split_size(len, workers, params),
        order,
        params,
        spawned: AtomicUsize::new(0),
    };
    rayon::scope(|s| fork(s, data, &plan));
    let tasks = plan.spawned.load(Ordering::Relaxed);
    debug!(
        len,
        workers,
        split_size = plan.split_size,
        tasks,
        "parallel quicksort joined"
    );
    tasks
}

/// Ranges at least this long are split and their right side handed off.
pub fn split_size(len: usize, workers: usize, params: &Thresholds) -> usize {
    let split_scale = common::ceil_log2(workers) + SPLIT_SCALE_SLACK;
    (len >> split_scale)
        .max(params.min_parallel_batch)
        .max(MIN_SPLIT)
}

fn fork<'s, T: Send, O: StrictOrder<T> + Sync>(
    scope: &Scope<'s>,
    mut data: &'s mut [T],
    plan: &'s ForkPlan<'s, O>,
) {
    while data.len() >= plan.split_size {
        let (left, right) = quick_sort::partition_median7(data, plan.order);
        if !right.is_empty() {
            trace!(left = left.len(), right = right.len(), "fork");
            plan.spawned.fetch_add(1, Ordering::Relaxed);
            scope.spawn(move |s| fork(s, right, plan));
        }
        data = left;
    }

    quick_sort::quick_sort(data, plan.order, plan.params);
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::Ascending;

    fn pool(threads: usize) -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("thread pool")
    }

    #[test]
    fn split_size_tracks_workers() {
        let params = Thresholds {
            min_parallel_batch: 100,
            ..Thresholds::for_type::<u32>()
        };
        assert_eq!(split_size(1 << 20, 1, &params), 1 << 18);
        assert_eq!(split_size(1 << 20, 8, &params), 1 << 15);
        assert_eq!(split_size(1 << 20, 6, &params), 1 << 15);
        assert_eq!(split_size(1000, 64, &params), 100);
    }

    #[test]
    fn forks_on_multi_worker_pool() {
        let params = Thresholds {
            min_parallel_batch: 64,
            ..Thresholds::for_type::<u64>()
        };
        let mut rng = StdRng::seed_from_u64(0x9A2A_2026);
        let base: Vec<u64> = (0..50_000).map(|_| rng.random()).collect();
        let mut expected = base.clone();
        expected.sort_unstable();

        for threads in [1, 2, 4, 7] {
            let mut data = base.clone();
            pool(threads).install(|| sort(&mut data, &Ascending, &params));
            assert_eq!(data, expected, "threads={threads}");
        }
    }

    #[test]
    fn one_past_split_threshold_forks_once() {
        let params = Thresholds {
            min_parallel_batch: 1000,
            ..Thresholds::for_type::<u32>()
        };
        assert_eq!(split_size(1001, 4, &params), 1000);

        let mut data: Vec<u32> = (0..1001).rev().collect();
        let forks = pool(4).install(|| sort_counting_forks(&mut data, &Ascending, &params));
        assert_eq!(forks, 1);
        assert!(data.iter().copied().eq(0..1001));

        let mut data: Vec<u32> = (0..999).rev().collect();
        let forks = pool(4).install(|| sort_counting_forks(&mut data, &Ascending, &params));
        assert_eq!(forks, 0);
        assert!(data.iter().copied().eq(0..999));
    }

    #[test]
    fn single_worker_pool_never_forks() {
        let params = Thresholds {
            min_parallel_batch: 64,
            ..Thresholds::for_type::<u32>()
        };
        let mut data: Vec<u32> = (0..10_000).rev().collect();
        let forks = pool(1).install(|| sort_counting_forks(&mut data, &Ascending, &params));
        assert_eq!(forks, 0);
        assert!(data.iter().copied().eq(0..10_000));
    }

    #[test]
    fn large_input_forks_repeatedly() {
        let params = Thresholds {
            min_parallel_batch: 64,
            ..Thresholds::for_type::<u64>()
        };
        let mut rng = StdRng::seed_from_u64(0x9A2C_2026);
        let mut data: Vec<u64> = (0..100_000).map(|_| rng.random()).collect();
        let mut expected = data.clone();
        expected.sort_unstable();
        let forks = pool(4).install(|| sort_counting_forks(&mut data, &Ascending, &params));
        assert!(forks >= 4, "forks={forks}");
        assert_eq!(data, expected);
    }

    #[test]
    fn below_batch_floor_stays_sequential() {
        let params = Thresholds::for_type::<i32>();
        let mut data: Vec<i32> = (0..(params.min_parallel_batch as i32 - 1)).rev().collect();
        sort(&mut data, &Ascending, &params);
        assert!(data.windows(2).all(|w| w[0] <= w[1]));
    }
}
