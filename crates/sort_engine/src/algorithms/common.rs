use crate::StrictOrder;

/// Shift-based insertion sort. Stable.
#[inline]
pub fn insertion_sort<T, O: StrictOrder<T>>(data: &mut [T], order: &O) {
    let len = data.len();
    if len < 2 {
        return;
    }

    for i in 1..len {
        let mut j = i;
        // Hot loop: unchecked accesses remove repeated bounds checks.
        // SAFETY: `j - 1 < j <= i < len` on every access.
        unsafe {
            let key = data.get_unchecked(i);
            while j > 0 && order.less(key, data.get_unchecked(j - 1)) {
                j -= 1;
            }
        }
        if j < i {
            data[j..=i].rotate_right(1);
        }
    }
}

#[inline]
pub fn is_sorted_by<T, O: StrictOrder<T>>(data: &[T], order: &O) -> bool {
    data.windows(2).all(|w| !order.less(&w[1], &w[0]))
}

#[inline]
pub fn floor_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        usize::BITS as usize - 1 - n.leading_zeros() as usize
    }
}

#[inline]
pub fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        floor_log2(n - 1) + 1
    }
}

#[inline(always)]
fn cswap<T, O: StrictOrder<T>>(data: &mut [T], a: usize, b: usize, order: &O) {
    if order.less(&data[b], &data[a]) {
        data.swap(a, b);
    }
}

/// Sorts `data[0]`, `data[len / 2]` and `data[len - 1]` and returns the
/// index of the median. Requires `len >= 3`.
#[inline]
pub fn choose_pivot_median3<T, O: StrictOrder<T>>(data: &mut [T], order: &O) -> usize {
    debug_assert!(data.len() >= 3);
    let a = 0;
    let b = data.len() >> 1;
    let c = data.len() - 1;
    cswap(data, a, b, order);
    cswap(data, b, c, order);
    cswap(data, a, b, order);
    b
}

/// Evenly spaced sample of seven positions spanning the whole range.
#[inline]
fn sample7(len: usize) -> [usize; 7] {
    let last = len - 1;
    std::array::from_fn(|i| i * last / 6)
}

/// Places the median of seven evenly spaced samples at the middle sample
/// position and returns that index. Requires `len >= 7`.
#[inline]
pub fn choose_pivot_median7<T, O: StrictOrder<T>>(data: &mut [T], order: &O) -> usize {
    debug_assert!(data.len() >= 7);
    let s = sample7(data.len());
    // 13-comparator median selection network.
    const NET: [(usize, usize); 13] = [
        (0, 5),
        (0, 3),
        (1, 6),
        (2, 4),
        (0, 1),
        (3, 5),
        (2, 6),
        (2, 3),
        (3, 6),
        (4, 5),
        (1, 4),
        (1, 3),
        (3, 4),
    ];
    for (a, b) in NET {
        cswap(data, s[a], s[b], order);
    }
    s[3]
}

/// Sorts the five positions in `s` with a 9-comparator network.
#[inline]
pub fn sort5_at<T, O: StrictOrder<T>>(data: &mut [T], s: [usize; 5], order: &O) {
    const NET: [(usize, usize); 9] = [
        (0, 1),
        (3, 4),
        (2, 4),
        (2, 3),
        (0, 3),
        (0, 2),
        (1, 4),
        (1, 3),
        (1, 2),
    ];
    for (a, b) in NET {
        cswap(data, s[a], s[b], order);
    }
}

/// Hoare partition around `data[pivot]`.
///
/// Returns the final pivot position `p`: nothing in `data[..p]` is greater
/// than the pivot and nothing in `data[p + 1..]` is less. Both scans stop on
/// equivalent elements, so runs of equal keys split evenly. Every access is
/// guarded by the scan bounds, whatever the relation answers.
#[inline]
pub fn partition_at<T, O: StrictOrder<T>>(data: &mut [T], pivot: usize, order: &O) -> usize {
    data.swap(0, pivot);
    let (head, tail) = data.split_at_mut(1);
    let pivot = &head[0];

    let mut l = 0usize;
    let mut r = tail.len();
    loop {
        while l < r && order.less(&tail[l], pivot) {
            l += 1;
        }
        while l < r && order.less(pivot, &tail[r - 1]) {
            r -= 1;
        }
        if l >= r {
            break;
        }
        r -= 1;
        tail.swap(l, r);
        l += 1;
    }

    data.swap(0, r);
    r
}

/// Stable merge of `src[left..mid]` and `src[mid..right]` into `dst[left..right]`.
/// Ties take from the left run.
#[inline]
pub fn merge_ranges<T: Clone, O: StrictOrder<T>>(
    src: &[T],
    dst: &mut [T],
    left: usize,
    mid: usize,
    right: usize,
    order: &O,
) {
    let mut i = left;
    let mut j = mid;
    let mut k = left;

    while i < mid && j < right {
        if order.less(&src[j], &src[i]) {
            dst[k].clone_from(&src[j]);
            j += 1;
        } else {
            dst[k].clone_from(&src[i]);
            i += 1;
        }
        k += 1;
    }

    if i < mid {
        dst[k..right].clone_from_slice(&src[i..mid]);
    } else if j < right {
        dst[k..right].clone_from_slice(&src[j..right]);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::Ascending;

    fn permutations(n: usize) -> Vec<Vec<u32>> {
        if n == 0 {
            return vec![vec![]];
        }
        let mut out = Vec::new();
        for p in permutations(n - 1) {
            for pos in 0..=p.len() {
                let mut q = p.clone();
                q.insert(pos, (n - 1) as u32);
                out.push(q);
            }
        }
        out
    }

    #[test]
    fn median7_network_selects_median() {
        for p in permutations(7) {
            let mut data = p.clone();
            let at = choose_pivot_median7(&mut data, &Ascending);
            assert_eq!(at, 3);
            assert_eq!(data[at], 3, "input={p:?}");
        }
    }

    #[test]
    fn median7_samples_span_range() {
        assert_eq!(sample7(7), [0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(sample7(601), [0, 100, 200, 300, 400, 500, 600]);
    }

    #[test]
    fn sort5_network_sorts() {
        for p in permutations(5) {
            let mut data = p.clone();
            sort5_at(&mut data, [0, 1, 2, 3, 4], &Ascending);
            assert_eq!(data, vec![0, 1, 2, 3, 4], "input={p:?}");
        }
    }

    #[test]
    fn median3_orders_samples() {
        for p in permutations(3) {
            let mut data = p.clone();
            let at = choose_pivot_median3(&mut data, &Ascending);
            assert_eq!(data, vec![0, 1, 2]);
            assert_eq!(at, 1);
        }
    }

    #[test]
    fn partition_postcondition() {
        let mut rng = StdRng::seed_from_u64(0x9A27_2026);
        for len in 1..200_usize {
            let mut data: Vec<u32> = (0..len).map(|_| rng.random_range(0..16)).collect();
            let pivot_at = rng.random_range(0..len);
            let pivot = data[pivot_at];
            let p = partition_at(&mut data, pivot_at, &Ascending);
            assert_eq!(data[p], pivot);
            assert!(data[..p].iter().all(|&x| x <= pivot));
            assert!(data[p + 1..].iter().all(|&x| x >= pivot));
        }
    }

    #[test]
    fn partition_splits_equal_keys_evenly() {
        let mut data = vec![7_u8; 1001];
        let p = partition_at(&mut data, 0, &Ascending);
        assert!((400..=600).contains(&p), "p={p}");
    }

    #[test]
    fn partition_survives_inconsistent_relation() {
        let mut rng = StdRng::seed_from_u64(0xBAD0_2026);
        let chaos = |_: &u32, _: &u32| rand::random::<bool>();
        for len in 1..64_usize {
            let mut data: Vec<u32> = (0..len as u32).collect();
            let p = partition_at(&mut data, rng.random_range(0..len), &chaos);
            assert!(p < len);
            data.sort_unstable();
            assert_eq!(data, (0..len as u32).collect::<Vec<_>>());
        }
    }

    #[test]
    fn insertion_sort_is_stable() {
        let mut data = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (0, 'e')];
        let by_key = |a: &(i32, char), b: &(i32, char)| a.0 < b.0;
        insertion_sort(&mut data, &by_key);
        assert_eq!(data, vec![(0, 'e'), (1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn merge_prefers_left_on_ties() {
        let src = vec![(1, 'l'), (3, 'l'), (1, 'r'), (2, 'r'), (3, 'r')];
        let mut dst = src.clone();
        let by_key = |a: &(i32, char), b: &(i32, char)| a.0 < b.0;
        merge_ranges(&src, &mut dst, 0, 2, 5, &by_key);
        assert_eq!(dst, vec![(1, 'l'), (1, 'r'), (2, 'r'), (3, 'l'), (3, 'r')]);
    }

    #[test]
    fn log2_helpers() {
        assert_eq!(floor_log2(0), 0);
        assert_eq!(floor_log2(1), 0);
        assert_eq!(floor_log2(8), 3);
        assert_eq!(floor_log2(9), 3);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(8), 3);
        assert_eq!(ceil_log2(9), 4);
    }
}
