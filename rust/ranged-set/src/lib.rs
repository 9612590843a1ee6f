//! Compact sets of `i64` values stored as sorted, disjoint inclusive runs.
//!
//! Memory is proportional to the number of runs rather than the number of
//! values, so sets spanning the entire 2^64-value domain are cheap. The
//! crate offers:
//!
//! - **Mutable sets**: add, remove and retain single values or ranges, with
//!   automatic coalescing of adjacent and overlapping runs
//! - **Windowed views**: read and write a sub-interval of a set in place
//! - **Iteration**: lazy value iterators, a removing cursor, and a
//!   recursively splittable traversal that backs rayon parallel iterators
//! - **Combinators**: union and intersection reducers for parallel folds
//!
//! # Key Types
//!
//! - [`RangeSet`] - The set itself
//! - [`RangeSetView`] - A window over a borrowed set
//! - [`Spliterator`] - Splittable traversal of a set or view
//! - [`RangeCollector`] - Fold ranges into a set

pub mod collect;
pub mod iter;
pub mod range;
pub mod range_list;
pub mod range_set;
pub mod set_ops;
pub mod split;
pub mod view;

#[cfg(test)]
mod tests;

pub use collect::{CollectorFlags, IntersectionCollector, RangeCollector, UnionCollector};
pub use iter::{Cursor, Runs, Values};
pub use range::Run;
pub use range_list::RangeList;
pub use range_set::RangeSet;
#[cfg(feature = "rayon")]
pub use split::ParValues;
pub use split::{Characteristics, Spliterator};
pub use view::RangeSetView;

pub use ranged_common::{Result, error::Error, error::ErrorKind};
