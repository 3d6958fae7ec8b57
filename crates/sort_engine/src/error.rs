use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SortError {
    /// `[first, end)` does not lie within `[0, len]`, or `first > end`.
    #[error("invalid range {first}..{end} for a sequence of length {len}")]
    InvalidRange {
        first: usize,
        end: usize,
        len: usize,
    },

    #[error("invalid thresholds: {reason}")]
    InvalidThresholds { reason: &'static str },
}
