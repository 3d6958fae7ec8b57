use std::mem::{needs_drop, size_of};

use crate::SortError;

/// Size cutovers between algorithm tiers.
///
/// Ranges are measured in elements. Every algorithm falls back to insertion
/// sort at or below its insertion cutover.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Thresholds {
    /// Insertion-sort cutover for quicksorts and top-down merge sort.
    pub insertion: usize,
    /// Batch size insertion-sorted by the first bottom-up merge pass.
    pub bottom_up_insertion: usize,
    /// Ranges at least this long pick a median-of-7 pivot instead of median-of-3.
    pub median_of_seven: usize,
    /// Ranges shorter than this are never handed to another worker.
    pub min_parallel_batch: usize,
}

/// Below this length dual-pivot partitioning stops paying off.
pub const DUAL_PIVOT_CUTOVER: usize = 400;

const OWNING_PARAMS: Thresholds = Thresholds {
    insertion: 12,
    bottom_up_insertion: 16,
    median_of_seven: 256,
    min_parallel_batch: 2048,
};

const WORD_PARAMS: Thresholds = Thresholds {
    insertion: 24,
    bottom_up_insertion: 32,
    median_of_seven: 512,
    min_parallel_batch: 8192,
};

const SMALL_PARAMS: Thresholds = Thresholds {
    insertion: 16,
    bottom_up_insertion: 24,
    median_of_seven: 384,
    min_parallel_batch: 4096,
};

const LARGE_PARAMS: Thresholds = Thresholds {
    insertion: 10,
    bottom_up_insertion: 12,
    median_of_seven: 256,
    min_parallel_batch: 2048,
};

impl Thresholds {
    /// Tiers for element type `T`.
    ///
    /// Types that own resources (`needs_drop`) are costly to move and compare,
    /// so they switch to the cheaper tier earlier. Plain data is bucketed by
    /// size. Evaluated at compile time per instantiation.
    pub const fn for_type<T>() -> Self {
        if needs_drop::<T>() {
            OWNING_PARAMS
        } else if size_of::<T>() <= 8 {
            WORD_PARAMS
        } else if size_of::<T>() <= 32 {
            SMALL_PARAMS
        } else {
            LARGE_PARAMS
        }
    }

    pub fn validate(self) -> Result<Self, SortError> {
        if self.median_of_seven <= 1 {
            return Err(SortError::InvalidThresholds {
                reason: "median_of_seven must be greater than 1",
            });
        }
        if self.min_parallel_batch == 0 {
            return Err(SortError::InvalidThresholds {
                reason: "min_parallel_batch must be non-zero",
            });
        }
        Ok(self)
    }
}
