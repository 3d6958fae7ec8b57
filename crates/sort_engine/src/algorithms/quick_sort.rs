use crate::{StrictOrder, Thresholds};

use super::common;

pub fn sort<T, O: StrictOrder<T>>(data: &mut [T], order: &O, params: &Thresholds) {
    quick_sort(data, order, params);
}

/// Median-of-7 tier. Hands ranges shorter than `params.median_of_seven` to
/// [`quick_sort_small`].
pub fn quick_sort<T, O: StrictOrder<T>>(mut data: &mut [T], order: &O, params: &Thresholds) {
    let cutover = params.median_of_seven.max(7);
    while data.len() >= cutover {
        let (left, right) = partition_median7(data, order);
        if left.len() < right.len() {
            quick_sort(left, order, params);
            data = right;
        } else {
            quick_sort(right, order, params);
            data = left;
        }
    }

    quick_sort_small(data, order, params);
}

/// Median-of-3 tier.
///
/// Recurses into the smaller side and loops on the larger one, so the stack
/// depth stays logarithmic for any input.
pub fn quick_sort_small<T, O: StrictOrder<T>>(
    mut data: &mut [T],
    order: &O,
    params: &Thresholds,
) {
    let cutover = params.insertion.max(2);
    while data.len() > cutover {
        let pivot = common::choose_pivot_median3(data, order);
        let p = common::partition_at(data, pivot, order);
        let (left, rest) = data.split_at_mut(p);
        let right = &mut rest[1..];

        if left.len() < right.len() {
            quick_sort_small(left, order, params);
            data = right;
        } else {
            quick_sort_small(right, order, params);
            data = left;
        }
    }

    common::insertion_sort(data, order);
}

/// Partitions around a median-of-7 pivot and returns the ranges on either
/// side of the placed pivot. Requires `len >= 7`.
#[inline]
pub fn partition_median7<'a, T, O: StrictOrder<T>>(
    data: &'a mut [T],
    order: &O,
) -> (&'a mut [T], &'a mut [T]) {
    let pivot = common::choose_pivot_median7(data, order);
    let p = common::partition_at(data, pivot, order);
    let (left, rest) = data.split_at_mut(p);
    (left, &mut rest[1..])
}
