use crate::{ScratchPool, StrictOrder, Thresholds};

use super::common;

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

    let batch = params.bottom_up_insertion.max(2);
    if len <= batch {
        common::insertion_sort(data, order);
        return;
    }

    let run = even_pass_run(len, batch);
    for chunk in data.chunks_mut(run) {
        common::insertion_sort(chunk, order);
    }

    let mut buf = pool.acquire(data);
    let mut width = run;
    let mut src_is_buf = false;
    while width < len {
        if src_is_buf {
            merge_pass(&buf, data, width, order);
        } else {
            merge_pass(data, &mut buf, width, order);
        }
        src_is_buf = !src_is_buf;
        width <<= 1;
    }

    if src_is_buf {
        data.clone_from_slice(&buf);
    }
}

/// Number of doubling merge passes needed to grow runs of `run` to `len`.
#[inline]
fn merge_passes(len: usize, run: usize) -> usize {
    let mut width = run;
    let mut passes = 0;
    while width < len {
        width <<= 1;
        passes += 1;
    }
    passes
}

/// Picks the initial run length so the merge passes come out even and the
/// last pass writes into the items buffer.
///
/// An odd pass count with `batch` is bumped by one, shrinking the runs to
/// `ceil(len / 2^(passes + 1))`, which is at most half of `batch`.
#[inline]
fn even_pass_run(len: usize, batch: usize) -> usize {
    let passes = merge_passes(len, batch);
    if passes % 2 == 0 {
        batch
    } else {
        len.div_ceil(1 << (passes + 1)).max(1)
    }
}

fn merge_pass<T: Clone, O: StrictOrder<T>>(src: &[T], dst: &mut [T], width: usize, order: &O) {
    let len = src.len();
    let mut left = 0usize;
    while left < len {
        let mid = (left + width).min(len);
        let right = (mid + width).min(len);

        if mid >= right || !order.less(&src[mid], &src[mid - 1]) {
            dst[left..right].clone_from_slice(&src[left..right]);
        } else {
            common::merge_ranges(src, dst, left, mid, right, order);
        }

        left = right;
    }
}
