//! In-memory comparison sorting over caller-supplied strict orders.
//!
//! Every algorithm sorts a mutable slice in place:
//!
//! - parallel quicksort ([`sort`]), the default,
//! - two-tier single-pivot quicksort ([`quicksort`]),
//! - dual-pivot quicksort ([`dual_pivot_quicksort`]),
//! - top-down and bottom-up merge sort ([`merge_sort_top_down`],
//!   [`merge_sort_bottom_up`]), both stable,
//! - insertion sort ([`insertion_sort`]), stable.
//!
//! [`merge_sort_copy`] returns a sorted copy instead. Sub-ranges and scratch
//! reuse across calls go through [`Sorter`] and [`SortContext`].
//!
//! Tier cutovers come from [`Thresholds::for_type`], which depends only on
//! the element type.

mod algorithms;
mod context;
mod error;
mod handle;
mod order;
mod scratch;
mod thresholds;

use tracing::instrument;

use algorithms::{
    common, dual_pivot_quick_sort, insertion_sort as insertion, merge_sort_bottom_up,
    merge_sort_top_down, parallel_quick_sort, quick_sort,
};

pub use context::SortContext;
pub use error::SortError;
pub use handle::{Sorter, checked_range};
pub use order::{Ascending, ByKey, Descending, StrictOrder};
pub use scratch::{Scratch, ScratchPool};
pub use thresholds::{DUAL_PIVOT_CUTOVER, Thresholds};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Algorithm {
    ParallelQuickSort,
    QuickSort,
    DualPivotQuickSort,
    MergeSortTopDown,
    MergeSortBottomUp,
    InsertionSort,
}

pub const ALL_ALGORITHMS: [Algorithm; 6] = [
    Algorithm::ParallelQuickSort,
    Algorithm::QuickSort,
    Algorithm::DualPivotQuickSort,
    Algorithm::MergeSortTopDown,
    Algorithm::MergeSortBottomUp,
    Algorithm::InsertionSort,
];

pub fn all_algorithms() -> &'static [Algorithm] {
    &ALL_ALGORITHMS
}

pub fn algorithm_name(algo: Algorithm) -> &'static str {
    match algo {
        Algorithm::ParallelQuickSort => "parallel_quick_sort",
        Algorithm::QuickSort => "quick_sort",
        Algorithm::DualPivotQuickSort => "dual_pivot_quick_sort",
        Algorithm::MergeSortTopDown => "merge_sort_top_down",
        Algorithm::MergeSortBottomUp => "merge_sort_bottom_up",
        Algorithm::InsertionSort => "insertion_sort",
    }
}

/// Whether `algo` keeps equivalent elements in their original order.
pub fn is_stable(algo: Algorithm) -> bool {
    matches!(
        algo,
        Algorithm::MergeSortTopDown | Algorithm::MergeSortBottomUp | Algorithm::InsertionSort
    )
}

/// Parallel quicksort on the global rayon pool.
pub fn sort<T: Send, O: StrictOrder<T> + Sync>(data: &mut [T], order: &O) {
    parallel_quick_sort::sort(data, order, &Thresholds::for_type::<T>());
}

pub fn quicksort<T, O: StrictOrder<T>>(data: &mut [T], order: &O) {
    quick_sort::sort(data, order, &Thresholds::for_type::<T>());
}

pub fn dual_pivot_quicksort<T, O: StrictOrder<T>>(data: &mut [T], order: &O) {
    dual_pivot_quick_sort::sort(data, order, &Thresholds::for_type::<T>());
}

/// Allocates a fresh scratch buffer per call; sort through a [`Sorter`] bound
/// to a shared [`SortContext`] to reuse buffers across calls.
pub fn merge_sort_top_down<T: Clone, O: StrictOrder<T>>(data: &mut [T], order: &O) {
    merge_sort_top_down::sort(
        data,
        order,
        &Thresholds::for_type::<T>(),
        &ScratchPool::new(),
    );
}

/// Allocates a fresh scratch buffer per call; sort through a [`Sorter`] bound
/// to a shared [`SortContext`] to reuse buffers across calls.
pub fn merge_sort_bottom_up<T: Clone, O: StrictOrder<T>>(data: &mut [T], order: &O) {
    merge_sort_bottom_up::sort(
        data,
        order,
        &Thresholds::for_type::<T>(),
        &ScratchPool::new(),
    );
}

pub fn insertion_sort<T, O: StrictOrder<T>>(data: &mut [T], order: &O) {
    insertion::sort(data, order);
}

/// Stable sorted copy of `data`.
///
/// Like the other whole-slice merge sorts, the scratch buffer is not pooled
/// across calls; use [`Sorter::merge_sort_copy`] with a [`SortContext`] for
/// that.
pub fn merge_sort_copy<T: Clone, O: StrictOrder<T>>(data: &[T], order: &O) -> Vec<T> {
    merge_sort_top_down::sort_copy(
        data,
        order,
        &Thresholds::for_type::<T>(),
        &ScratchPool::new(),
    )
}

/// `true` when no element is less than its predecessor.
pub fn is_sorted_by<T, O: StrictOrder<T>>(data: &[T], order: &O) -> bool {
    common::is_sorted_by(data, order)
}

#[instrument(level = "trace", skip_all, fields(algorithm = algorithm_name(algo), len = data.len()))]
pub fn sort_with_ctx<T: Clone + Send, O: StrictOrder<T> + Sync>(
    algo: Algorithm,
    data: &mut [T],
    order: &O,
    ctx: &SortContext<T>,
) {
    let params = ctx.thresholds();
    match algo {
        Algorithm::ParallelQuickSort => {
            ctx.install(|| parallel_quick_sort::sort(data, order, params))
        }
        Algorithm::QuickSort => quick_sort::sort(data, order, params),
        Algorithm::DualPivotQuickSort => dual_pivot_quick_sort::sort(data, order, params),
        Algorithm::MergeSortTopDown => {
            merge_sort_top_down::sort(data, order, params, ctx.scratch())
        }
        Algorithm::MergeSortBottomUp => {
            merge_sort_bottom_up::sort(data, order, params, ctx.scratch())
        }
        Algorithm::InsertionSort => insertion::sort(data, order),
    }
}
