use std::marker::PhantomData;

/// Strict "less-than" relation supplied by the caller.
///
/// - `less(a, a)` must be `false` and the relation must be transitive.
/// - Equality is never asked for: when neither `less(a, b)` nor `less(b, a)`
///   holds the two elements are treated as equivalent.
///
/// An inconsistent relation cannot make any algorithm touch memory outside the
/// requested range; only the resulting order is unspecified.
pub trait StrictOrder<T: ?Sized> {
    fn less(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F> StrictOrder<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline(always)]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Natural order of `T`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ascending;

impl<T: Ord + ?Sized> StrictOrder<T> for Ascending {
    #[inline(always)]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Reverse of the natural order of `T`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Descending;

impl<T: Ord + ?Sized> StrictOrder<T> for Descending {
    #[inline(always)]
    fn less(&self, a: &T, b: &T) -> bool {
        b < a
    }
}

/// Orders elements by a key extracted from each of them.
pub struct ByKey<T: ?Sized, F> {
    key: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized, K: Ord, F: Fn(&T) -> K> ByKey<T, F> {
    pub fn new(key: F) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, K: Ord, F: Fn(&T) -> K> StrictOrder<T> for ByKey<T, F> {
    #[inline(always)]
    fn less(&self, a: &T, b: &T) -> bool {
        (self.key)(a) < (self.key)(b)
    }
}
