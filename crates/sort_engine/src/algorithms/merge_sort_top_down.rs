use crate::{ScratchPool, StrictOrder, Thresholds};

use super::common;

/// Buffer a subtree must leave its sorted output in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Target {
    Items,
    Scratch,
}

impl Target {
    #[inline]
    fn flip(self) -> Self {
        match self {
            Self::Items => Self::Scratch,
            Self::Scratch => Self::Items,
        }
    }
}

pub fn sort<T: Clone, O: StrictOrder<T>>(
    data: &mut [T],
    order: &O,
    params: &Thresholds,
    pool: &ScratchPool<T>,
) {
    let len = data.len();
    if len < 2 {
        return;
    }
    if common::is_sorted_by(data, order) {
        return;
    }

    let cutover = params.insertion.max(1);
    if len <= cutover {
        common::insertion_sort(data, order);
        return;
    }

    let mut scratch = pool.acquire(data);
    merge_sort_recursive(data, &mut scratch, 0, len, Target::Items, order, cutover);
}

/// Sorts a copy of `data`, leaving `data` untouched.
pub fn sort_copy<T: Clone, O: StrictOrder<T>>(
    data: &[T],
    order: &O,
    params: &Thresholds,
    pool: &ScratchPool<T>,
) -> Vec<T> {
    let mut out = data.to_vec();
    sort(&mut out, order, params, pool);
    out
}

/// Sorts `left..right` into `target`.
///
/// Children sort into the other buffer so the merge reads one buffer and
/// writes the other, with no separate copy step. Leaves insertion-sort in
/// `items`, where the unsorted input still sits, and copy out only when
/// their parent reads from `items`.
fn merge_sort_recursive<T: Clone, O: StrictOrder<T>>(
    items: &mut [T],
    scratch: &mut [T],
    left: usize,
    right: usize,
    target: Target,
    order: &O,
    cutover: usize,
) {
    let len = right - left;
    if len <= cutover {
        common::insertion_sort(&mut items[left..right], order);
        if target == Target::Scratch {
            scratch[left..right].clone_from_slice(&items[left..right]);
        }
        return;
    }

    let mid = left + (len >> 1);
    merge_sort_recursive(items, scratch, left, mid, target.flip(), order, cutover);
    merge_sort_recursive(items, scratch, mid, right, target.flip(), order, cutover);

    match target {
        Target::Items => merge_or_copy(scratch, items, left, mid, right, order),
        Target::Scratch => merge_or_copy(items, scratch, left, mid, right, order),
    }
}

#[inline]
fn merge_or_copy<T: Clone, O: StrictOrder<T>>(
    src: &[T],
    dst: &mut [T],
    left: usize,
    mid: usize,
    right: usize,
    order: &O,
) {
    if !order.less(&src[mid], &src[mid - 1]) {
        dst[left..right].clone_from_slice(&src[left..right]);
        return;
    }

    common::merge_ranges(src, dst, left, mid, right, order);
}
