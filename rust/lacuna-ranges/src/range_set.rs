//! A mutable set of disjoint, sorted half-open ranges.
//!
//! A `RangeSet<T>` tracks which portions of a discretely ordered domain are
//! covered, storing the coverage as the minimal sequence of `Range<T>`
//! values: ascending by start, pairwise separated by at least one uncovered
//! position, and never empty. Ranges inserted into the set are folded into
//! that canonical form as they arrive, so overlapping and touching inserts
//! collapse into single entries.
//!
//! Insertion and querying deliberately disagree about adjacency: two ranges
//! that merely touch (`end == start`) are merged by [`RangeSet::insert`],
//! while a query range that merely touches stored coverage reports no
//! intersection. Compaction wants the coarsest representation; coverage
//! questions are about shared positions, of which touching ranges have none.

use std::cmp::{max, min};
use std::fmt;
use std::ops::Range;

use num_traits::PrimInt;

/// A mutable set of disjoint, sorted, non-empty half-open ranges over a
/// discretely ordered domain.
///
/// The key properties are:
/// - **Canonical storage**: after every mutating call the stored ranges are
///   ascending, strictly separated (no overlap, no adjacency) and non-empty.
/// - **Merge-on-insert**: [`insert`](RangeSet::insert) folds a new range
///   into the existing coverage, collapsing any entries it overlaps or
///   touches.
/// - **Coverage queries**: [`gaps`](RangeSet::gaps) and
///   [`intersections`](RangeSet::intersections) split an arbitrary query
///   range into its uncovered and covered portions.
///
/// Typically `T` is an integral type (e.g. `u32`, `u64`, `usize`); any
/// primitive integer works, including signed ones. All operations are total.
/// The only arithmetic performed on the domain is subtraction of a range's
/// start from its end ([`count_positions`](RangeSet::count_positions)), so
/// bounds may span the full representable width as long as that length
/// fits in `T`.
#[derive(Clone, PartialEq, Eq)]
pub struct RangeSet<T> {
    /// Canonical coverage: ascending by `start`, consecutive entries satisfy
    /// `ranges[i].end < ranges[i + 1].start`, no entry is empty.
    ranges: Vec<Range<T>>,
}

impl<T> RangeSet<T> {
    /// Creates a new, empty `RangeSet<T>`.
    pub fn new() -> RangeSet<T> {
        RangeSet { ranges: Vec::new() }
    }

    /// Returns the number of stored ranges.
    ///
    /// This counts ranges, not covered positions; see
    /// [`count_positions`](RangeSet::count_positions) for the latter.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if the set covers nothing.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns the canonical stored ranges as a slice.
    pub fn as_slice(&self) -> &[Range<T>] {
        &self.ranges
    }

    /// Returns an iterator over the canonical stored ranges.
    pub fn iter(&self) -> std::slice::Iter<'_, Range<T>> {
        self.ranges.iter()
    }

    /// Removes all coverage, resetting the set to the empty state.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}

impl<T: PrimInt> RangeSet<T> {
    /// Builds a set from an arbitrary collection of ranges.
    ///
    /// The input may be unsorted and may contain duplicates, overlapping
    /// ranges, touching ranges and empty ranges; it is brought into
    /// canonical form here. The set copies what it needs out of the
    /// iterator, so the caller's collection can be mutated or dropped
    /// afterward without affecting the set.
    ///
    /// # Complexity
    ///
    /// `O(n log n)` for the sort; the merge pass is linear except when many
    /// entries collapse, where removal shifts the tail.
    pub fn from_ranges<I>(ranges: I) -> RangeSet<T>
    where
        I: IntoIterator<Item = Range<T>>,
    {
        let mut ranges: Vec<Range<T>> =
            ranges.into_iter().filter(|range| !range.is_empty()).collect();
        ranges.sort_by_key(|range| range.start);
        Self::merge_sorted_ranges(&mut ranges, 0, false);
        RangeSet { ranges }
    }

    /// Builds a set from ranges that are already in canonical form.
    ///
    /// The vector is stored as-is, with no release-mode validation. The
    /// caller asserts that the ranges are ascending by start, strictly
    /// separated (no overlap, no adjacency) and non-empty; handing over
    /// anything else is a logic error that makes the results of subsequent
    /// operations unspecified. Debug builds check the claim.
    ///
    /// Use this to rebuild a set from a source already known to be
    /// canonical, such as the output of [`gaps`](RangeSet::gaps) or
    /// [`intersections`](RangeSet::intersections), without paying the
    /// sort/merge cost again.
    pub fn from_sorted_ranges(ranges: Vec<Range<T>>) -> RangeSet<T> {
        debug_assert!(
            ranges.iter().all(|range| range.start < range.end),
            "ranges must be non-empty"
        );
        debug_assert!(
            ranges.windows(2).all(|pair| pair[0].end < pair[1].start),
            "ranges must be ascending and strictly separated"
        );
        RangeSet { ranges }
    }

    /// Inserts a range, merging it with any stored ranges it overlaps or
    /// touches, and reports whether the set changed.
    ///
    /// # Returns
    ///
    /// `false` if `range` is empty or every position in it was already
    /// covered; `true` otherwise. A `false` result guarantees the set was
    /// not touched.
    ///
    /// # Complexity
    ///
    /// `O(n)`: a linear scan locates the affected region, after which only
    /// the entries actually folded in are examined again.
    pub fn insert(&mut self, range: Range<T>) -> bool {
        if range.is_empty() {
            return false;
        }
        let mut index = 0;
        while index < self.ranges.len() {
            let stored = self.ranges[index].clone();
            if stored.end < range.start {
                // Entirely before the new range, with a genuine gap between.
                index += 1;
            } else if stored.start <= range.start && range.end <= stored.end {
                // Already fully covered.
                return false;
            } else if range.end < stored.start {
                // A genuine gap separates the new range from this entry and
                // every later one; every entry already passed ends strictly
                // before `range.start`, so no merge is possible on either
                // side.
                self.ranges.insert(index, range);
                return true;
            } else {
                // Overlaps or touches this entry: widen it in place, then
                // fold in any subsequent entries the widened range reaches.
                // Preceding entries end strictly before `range.start` and
                // cannot be affected.
                self.ranges[index] = min(stored.start, range.start)..max(stored.end, range.end);
                Self::merge_sorted_ranges(&mut self.ranges, index, true);
                return true;
            }
        }
        // Past every stored range.
        self.ranges.push(range);
        true
    }

    /// Merges overlapping and touching neighbors in a buffer already sorted
    /// by start, beginning at `start_index`.
    ///
    /// Each adjacent pair is either separated by a genuine gap
    /// (`ranges[i].end < ranges[i + 1].start`) or collapsed into
    /// `ranges[i].start..max` of the two ends, re-testing the same index
    /// since the merged range may reach the next entry as well. With
    /// `stop_at_first_gap` the sweep ends at the first genuine gap, which
    /// suffices after a localized insert; otherwise it continues to the end
    /// of the buffer, as normalization requires.
    fn merge_sorted_ranges(
        ranges: &mut Vec<Range<T>>,
        start_index: usize,
        stop_at_first_gap: bool,
    ) {
        let mut index = start_index;
        while index + 1 < ranges.len() {
            if ranges[index].end < ranges[index + 1].start {
                if stop_at_first_gap {
                    return;
                }
                index += 1;
            } else {
                let end = max(ranges[index].end, ranges[index + 1].end);
                ranges[index].end = end;
                ranges.remove(index + 1);
            }
        }
    }

    /// Returns the portions of `query` not covered by the set, ascending
    /// and strictly separated.
    ///
    /// # Returns
    ///
    /// - `None` if `query` is empty or every position in it is covered.
    /// - `Some(gaps)` otherwise. On an empty set the query itself comes
    ///   back as the single gap, which distinguishes "nothing covered" from
    ///   the fully-covered `None`.
    ///
    /// The returned ranges are in canonical form and can be fed back
    /// through [`from_sorted_ranges`](RangeSet::from_sorted_ranges).
    /// Stored ranges that merely touch `query` contribute nothing: a range
    /// ending at `query.start` leaves the whole query uncovered.
    pub fn gaps(&self, query: Range<T>) -> Option<Vec<Range<T>>> {
        if query.is_empty() {
            return None;
        }
        let mut gaps = Vec::new();
        let mut remainder = query;
        for stored in &self.ranges {
            if stored.end <= remainder.start {
                // Entirely before the uncovered remainder.
                continue;
            }
            if remainder.end <= stored.start {
                // The remainder sits in front of this entry and every later
                // one; it is the final gap.
                gaps.push(remainder);
                return Some(gaps);
            }
            if stored.start <= remainder.start && remainder.end <= stored.end {
                // The remainder is fully covered by this entry.
                return if gaps.is_empty() { None } else { Some(gaps) };
            }
            if remainder.start < stored.start {
                // Uncovered prefix up to the start of this entry.
                gaps.push(remainder.start..stored.start);
                if remainder.end <= stored.end {
                    return Some(gaps);
                }
            }
            // This entry covers the head of what remains.
            remainder.start = stored.end;
        }
        gaps.push(remainder);
        Some(gaps)
    }

    /// Returns the portions of `query` covered by the set, clipped to the
    /// query bounds, ascending.
    ///
    /// # Returns
    ///
    /// - `None` if `query` is empty or no stored range overlaps it. A
    ///   stored range that merely touches `query` (`end == start` at either
    ///   boundary) shares no positions with it and does not count as
    ///   overlap, even though [`insert`](RangeSet::insert) would merge the
    ///   same two ranges.
    /// - `Some(covered)` otherwise, one entry per overlapping stored range.
    pub fn intersections(&self, query: Range<T>) -> Option<Vec<Range<T>>> {
        if query.is_empty() {
            return None;
        }
        let mut covered = Vec::new();
        for stored in &self.ranges {
            if stored.end <= query.start {
                continue;
            }
            if query.end <= stored.start {
                break;
            }
            covered.push(max(query.start, stored.start)..min(query.end, stored.end));
        }
        if covered.is_empty() {
            None
        } else {
            Some(covered)
        }
    }

    /// Searches for the stored range containing the specified position.
    ///
    /// # Returns
    ///
    /// - `Ok(index)` if `pos` is contained within the range at `index`.
    /// - `Err(index)` if no range contains `pos`; `index` is the position
    ///   where a range containing `pos` would be inserted to keep the
    ///   storage ordered. An empty set always yields `Err(0)`; a position
    ///   at or past the end of the last range yields `Err(len)`.
    ///
    /// # Complexity
    ///
    /// Binary search, `O(log n)`.
    pub fn search_position(&self, pos: T) -> Result<usize, usize> {
        self.ranges.binary_search_by(|range| {
            if pos < range.start {
                std::cmp::Ordering::Greater
            } else if pos >= range.end {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Equal
            }
        })
    }

    /// Returns `true` if the specified position is covered by the set.
    ///
    /// # Complexity
    ///
    /// Binary search, `O(log n)`.
    pub fn contains_position(&self, pos: T) -> bool {
        self.search_position(pos).is_ok()
    }

    /// Returns the tight bounds of the covered extent as a single range,
    /// from the start of the first stored range to the end of the last.
    /// Positions between stored ranges are not necessarily covered. An
    /// empty set yields the empty range `0..0`.
    pub fn bounds(&self) -> Range<T> {
        match (self.ranges.first(), self.ranges.last()) {
            (Some(first), Some(last)) => first.start..last.end,
            _ => T::zero()..T::zero(),
        }
    }

    /// Returns the total number of covered positions, the sum of the
    /// lengths of the stored ranges.
    ///
    /// The sum is computed in `T`; callers working near the representable
    /// limits of `T` must leave headroom for it (e.g. an `i8` set covering
    /// more than 127 positions overflows).
    ///
    /// # Complexity
    ///
    /// `O(len)` over the stored ranges.
    pub fn count_positions(&self) -> T {
        self.ranges
            .iter()
            .fold(T::zero(), |count, range| count + (range.end - range.start))
    }
}

impl<T> Default for RangeSet<T> {
    fn default() -> RangeSet<T> {
        RangeSet::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RangeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ranges.iter()).finish()
    }
}

impl<T: PrimInt> FromIterator<Range<T>> for RangeSet<T> {
    fn from_iter<I: IntoIterator<Item = Range<T>>>(iter: I) -> RangeSet<T> {
        RangeSet::from_ranges(iter)
    }
}

impl<T: PrimInt> From<Vec<Range<T>>> for RangeSet<T> {
    fn from(ranges: Vec<Range<T>>) -> RangeSet<T> {
        RangeSet::from_ranges(ranges)
    }
}

impl<T: PrimInt> Extend<Range<T>> for RangeSet<T> {
    fn extend<I: IntoIterator<Item = Range<T>>>(&mut self, iter: I) {
        for range in iter {
            self.insert(range);
        }
    }
}

impl<'a, T> IntoIterator for &'a RangeSet<T> {
    type Item = &'a Range<T>;

    type IntoIter = std::slice::Iter<'a, Range<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl<T> IntoIterator for RangeSet<T> {
    type Item = Range<T>;

    type IntoIter = std::vec::IntoIter<Range<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}
