use crate::thresholds::DUAL_PIVOT_CUTOVER;
use crate::{StrictOrder, Thresholds};

use super::{common, quick_sort};

pub fn sort<T, O: StrictOrder<T>>(data: &mut [T], order: &O, params: &Thresholds) {
    dual_pivot_quick_sort(data, order, params);
}

fn dual_pivot_quick_sort<T, O: StrictOrder<T>>(
    mut data: &mut [T],
    order: &O,
    params: &Thresholds,
) {
    while data.len() >= DUAL_PIVOT_CUTOVER.max(5) {
        let (left, middle, right) = partition_dual(data, order);

        // Loop on the largest part, recurse into the others.
        if left.len() >= middle.len() && left.len() >= right.len() {
            dual_pivot_quick_sort(middle, order, params);
            dual_pivot_quick_sort(right, order, params);
            data = left;
        } else if middle.len() >= right.len() {
            dual_pivot_quick_sort(left, order, params);
            dual_pivot_quick_sort(right, order, params);
            data = middle;
        } else {
            dual_pivot_quick_sort(left, order, params);
            dual_pivot_quick_sort(middle, order, params);
            data = right;
        }
    }

    quick_sort::quick_sort_small(data, order, params);
}

/// Splits `data` into `< low`, `low..=high` and `> high` around two pivots
/// taken from a sorted sample of five, leaving both pivots in place between
/// the parts. When the pivots are equivalent the middle part is returned
/// empty since it is already in order. Requires `len >= 5`.
fn partition_dual<'a, T, O: StrictOrder<T>>(
    data: &'a mut [T],
    order: &O,
) -> (&'a mut [T], &'a mut [T], &'a mut [T]) {
    let len = data.len();
    let last = len - 1;
    let quarter = len >> 2;
    let s = [0, quarter, len >> 1, last - quarter, last];
    common::sort5_at(data, s, order);
    data.swap(0, s[1]);
    data.swap(last, s[3]);

    let (lt, gt, pivots_equal) = {
        let (low, rest) = data.split_at_mut(1);
        let (inner, high) = rest.split_at_mut(len - 2);
        let (low, high) = (&low[0], &high[0]);

        // inner[..lt] < low, inner[lt..k] in between, inner[gt..] > high.
        let mut lt = 0usize;
        let mut k = 0usize;
        let mut gt = inner.len();
        while k < gt {
            if order.less(&inner[k], low) {
                inner.swap(k, lt);
                lt += 1;
                k += 1;
            } else if order.less(high, &inner[k]) {
                while k + 1 < gt && order.less(high, &inner[gt - 1]) {
                    gt -= 1;
                }
                gt -= 1;
                if k < gt {
                    inner.swap(k, gt);
                    // The element swapped in is unclassified against `low`.
                    if order.less(&inner[k], low) {
                        inner.swap(k, lt);
                        lt += 1;
                    }
                    k += 1;
                }
            } else {
                k += 1;
            }
        }
        (lt, gt, !order.less(low, high))
    };

    // Shift from `inner` to `data` coordinates and drop the pivots in place.
    data.swap(0, lt);
    data.swap(last, gt + 1);

    let (left, rest) = data.split_at_mut(lt);
    let (middle, rest) = rest[1..].split_at_mut(gt - lt);
    let right = &mut rest[1..];
    let middle = if pivots_equal {
        &mut middle[..0]
    } else {
        middle
    };
    (left, middle, right)
}
