//! Coverage tracking over sparse position ranges.
//!
//! This crate maintains a compact picture of which portions of a discretely
//! ordered domain have been seen so far (downloaded byte ranges, fetched id
//! ranges, booked slots) as a minimal sequence of sorted, disjoint
//! `Range<T>` values. It offers:
//!
//! - **Merge-on-insert**: inserted ranges are folded into the existing
//!   coverage, collapsing overlaps and adjacency as they appear
//! - **Coverage queries**: any query range can be split into its covered
//!   and uncovered portions in a single pass
//! - **Chunking**: an iterator adapter that bounds the length of yielded
//!   ranges, for turning large uncovered regions into sized requests
//!
//! # Key Types
//!
//! - [`RangeSet`] - A mutable set of disjoint, sorted half-open ranges
//! - [`RangeIteratorsExt`] - Extension trait providing the chunking adapter

pub mod chunked;
pub mod range_set;

pub use chunked::RangeIteratorsExt;
pub use range_set::RangeSet;
