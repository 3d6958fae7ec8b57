pub(crate) mod common;
pub(crate) mod dual_pivot_quick_sort;
pub(crate) mod insertion_sort;
pub(crate) mod merge_sort_bottom_up;
pub(crate) mod merge_sort_top_down;
pub(crate) mod parallel_quick_sort;
pub(crate) mod quick_sort;
