use std::ops::{Bound, Range, RangeBounds};

use tracing::debug;

use crate::algorithms::{
    dual_pivot_quick_sort, insertion_sort, merge_sort_bottom_up, merge_sort_top_down,
    parallel_quick_sort, quick_sort,
};
use crate::{Algorithm, SortContext, SortError, StrictOrder, algorithm_name, sort_with_ctx};

/// Resolves `range` against a sequence of `len` elements.
pub fn checked_range<R: RangeBounds<usize>>(
    len: usize,
    range: R,
) -> Result<Range<usize>, SortError> {
    let first = match range.start_bound() {
        Bound::Included(&s) => Some(s),
        Bound::Excluded(&s) => s.checked_add(1),
        Bound::Unbounded => Some(0),
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.checked_add(1),
        Bound::Excluded(&e) => Some(e),
        Bound::Unbounded => Some(len),
    };

    match (first, end) {
        (Some(first), Some(end)) if first <= end && end <= len => Ok(first..end),
        (first, end) => Err(SortError::InvalidRange {
            first: first.unwrap_or(usize::MAX),
            end: end.unwrap_or(usize::MAX),
            len,
        }),
    }
}

enum ContextRef<'a, T> {
    Owned(SortContext<T>),
    Borrowed(&'a SortContext<T>),
}

impl<T> ContextRef<'_, T> {
    #[inline]
    fn get(&self) -> &SortContext<T> {
        match self {
            Self::Owned(ctx) => ctx,
            Self::Borrowed(ctx) => *ctx,
        }
    }
}

/// A sequence bound to an order relation and a sort context.
///
/// Every call takes a sub-range (`..` for the whole sequence), validated once
/// here; the algorithms below trust the slice they are given.
pub struct Sorter<'a, T, O> {
    data: &'a mut [T],
    order: O,
    ctx: ContextRef<'a, T>,
}

impl<'a, T, O: StrictOrder<T>> Sorter<'a, T, O> {
    /// Binds `data` to a private context; merge sorts through this handle
    /// do not share scratch buffers with other handles. Use
    /// [`Sorter::with_context`] for that.
    pub fn new(data: &'a mut [T], order: O) -> Self {
        Self {
            data,
            order,
            ctx: ContextRef::Owned(SortContext::default()),
        }
    }

    pub fn with_context(data: &'a mut [T], order: O, ctx: &'a SortContext<T>) -> Self {
        Self {
            data,
            order,
            ctx: ContextRef::Borrowed(ctx),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        self.data
    }

    fn parts<R: RangeBounds<usize>>(
        &mut self,
        algo: Algorithm,
        range: R,
    ) -> Result<(&mut [T], &O, &SortContext<T>), SortError> {
        let range = checked_range(self.data.len(), range)?;
        debug!(
            algorithm = algorithm_name(algo),
            first = range.start,
            end = range.end,
            "sort dispatch"
        );
        Ok((&mut self.data[range], &self.order, self.ctx.get()))
    }

    pub fn quicksort<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), SortError> {
        let (data, order, ctx) = self.parts(Algorithm::QuickSort, range)?;
        quick_sort::sort(data, order, ctx.thresholds());
        Ok(())
    }

    pub fn dual_pivot_quicksort<R: RangeBounds<usize>>(
        &mut self,
        range: R,
    ) -> Result<(), SortError> {
        let (data, order, ctx) = self.parts(Algorithm::DualPivotQuickSort, range)?;
        dual_pivot_quick_sort::sort(data, order, ctx.thresholds());
        Ok(())
    }

    pub fn insertion_sort<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), SortError> {
        let (data, order, _) = self.parts(Algorithm::InsertionSort, range)?;
        insertion_sort::sort(data, order);
        Ok(())
    }
}

impl<T: Send, O: StrictOrder<T> + Sync> Sorter<'_, T, O> {
    /// Parallel quicksort.
    pub fn sort<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), SortError> {
        let (data, order, ctx) = self.parts(Algorithm::ParallelQuickSort, range)?;
        let thresholds = *ctx.thresholds();
        ctx.install(|| parallel_quick_sort::sort(data, order, &thresholds));
        Ok(())
    }
}

impl<T: Clone, O: StrictOrder<T>> Sorter<'_, T, O> {
    pub fn merge_sort_top_down<R: RangeBounds<usize>>(
        &mut self,
        range: R,
    ) -> Result<(), SortError> {
        let (data, order, ctx) = self.parts(Algorithm::MergeSortTopDown, range)?;
        merge_sort_top_down::sort(data, order, ctx.thresholds(), ctx.scratch());
        Ok(())
    }

    pub fn merge_sort_bottom_up<R: RangeBounds<usize>>(
        &mut self,
        range: R,
    ) -> Result<(), SortError> {
        let (data, order, ctx) = self.parts(Algorithm::MergeSortBottomUp, range)?;
        merge_sort_bottom_up::sort(data, order, ctx.thresholds(), ctx.scratch());
        Ok(())
    }

    /// Sorted copy of `range`; the bound sequence is left untouched.
    pub fn merge_sort_copy<R: RangeBounds<usize>>(
        &self,
        range: R,
    ) -> Result<Vec<T>, SortError> {
        let range = checked_range(self.data.len(), range)?;
        let ctx = self.ctx.get();
        Ok(merge_sort_top_down::sort_copy(
            &self.data[range],
            &self.order,
            ctx.thresholds(),
            ctx.scratch(),
        ))
    }
}

impl<T: Clone + Send, O: StrictOrder<T> + Sync> Sorter<'_, T, O> {
    pub fn run<R: RangeBounds<usize>>(&mut self, algo: Algorithm, range: R) -> Result<(), SortError> {
        let (data, order, ctx) = self.parts(algo, range)?;
        sort_with_ctx(algo, data, order, ctx);
        Ok(())
    }
}
