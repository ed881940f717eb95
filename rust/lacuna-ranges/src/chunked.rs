//! An iterator adapter that chunks ranges from an underlying iterator.
//!
//! Splitting ranges by a maximum length pairs naturally with coverage
//! tracking: the uncovered portions reported by
//! [`RangeSet::gaps`](crate::RangeSet::gaps) can be arbitrarily large, and
//! turning them into work items (read requests, fetch batches) usually means
//! capping the size of each item. The [`RangeIteratorsExt`] trait is
//! implemented for all iterators over `Range<T>`, providing a convenient
//! method to construct the adapter.

use std::ops::Range;

use num_traits::PrimInt;

/// An iterator adapter that chunks ranges from an underlying iterator.
///
/// Given an iterator yielding `Range<T>`, this adapter yields `Range<T>`
/// such that no outputted range has a length greater than `chunk_size`.
/// If an input range is larger than `chunk_size`, it's split into multiple
/// smaller ranges. The adapter preserves empty ranges and ranges smaller
/// than `chunk_size` as-is.
#[derive(Debug, Clone)]
pub struct ChunkedRanges<I, T>
where
    I: Iterator<Item = Range<T>>,
{
    /// The underlying iterator of ranges.
    inner: I,
    /// The maximum size of each output chunk.
    chunk_size: T,
    /// Stores the remainder of a range being processed.
    range_remainder: Range<T>,
}

impl<I, T> ChunkedRanges<I, T>
where
    I: Iterator<Item = Range<T>>,
    T: PrimInt,
{
    /// Creates a new `ChunkedRanges` iterator.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is 0, as this would prevent progress.
    ///
    /// # Arguments
    ///
    /// * `inner` - The underlying iterator of `Range<T>`.
    /// * `chunk_size` - The maximum size of each output chunk. Must be
    ///   greater than 0.
    pub fn new(inner: I, chunk_size: T) -> Self {
        if chunk_size == T::zero() {
            panic!("chunk_size must be greater than 0");
        }
        Self {
            inner,
            chunk_size,
            range_remainder: T::zero()..T::zero(),
        }
    }
}

impl<I, T> Iterator for ChunkedRanges<I, T>
where
    I: Iterator<Item = Range<T>>,
    T: PrimInt,
{
    type Item = Range<T>;

    /// Returns the next chunked range from the iterator.
    ///
    /// If the current range is larger than `chunk_size`, it is split and the
    /// remainder is stored for subsequent calls.
    fn next(&mut self) -> Option<Self::Item> {
        if self.range_remainder.is_empty() {
            self.range_remainder = self.inner.next()?;
        }

        let range_remainder = std::mem::replace(&mut self.range_remainder, T::zero()..T::zero());

        let current_len = range_remainder.end.saturating_sub(range_remainder.start);

        if current_len <= self.chunk_size {
            Some(range_remainder)
        } else {
            let split_point = range_remainder.start + self.chunk_size;
            let output_chunk = range_remainder.start..split_point;
            self.range_remainder = split_point..range_remainder.end;
            Some(output_chunk)
        }
    }
}

/// Extension trait for more idiomatic usage of the range iterator adapters.
pub trait RangeIteratorsExt<T>: Iterator<Item = Range<T>> + Sized
where
    T: PrimInt,
{
    /// Adapts an iterator of `Range<T>` to yield ranges chunked to a
    /// maximum size.
    ///
    /// Each output range will have a length at most `chunk_size`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is 0.
    fn chunk_ranges(self, chunk_size: T) -> ChunkedRanges<Self, T> {
        ChunkedRanges::new(self, chunk_size)
    }
}

impl<I, T> RangeIteratorsExt<T> for I
where
    I: Iterator<Item = Range<T>>,
    T: PrimInt,
{
}
