//! Bulk algorithms over observable lists
//!
//! Every algorithm works through the [`ObservableList`] contract only, so it
//! applies to any list: handles, sub-lists, wrappers. Two event policies are
//! used:
//!
//! - **Full replace** (`rotate`, `reverse`, `sort`, `fill`, `copy`,
//!   `replace_all`): the new contents are computed from a snapshot and swapped
//!   in with one `clear` and one `push_all`. Observers see one
//!   `ElementsRemoved` carrying the old contents and one `ElementsAdded`, or
//!   nothing when the contents would not change.
//! - **In place** (`shuffle` swaps with `set`, `dedup` removes with `remove`):
//!   observers see every intermediate step.
//!
//! The algorithms are available as free functions and, through [`ListOps`],
//! as methods on every list.

pub mod concat;
pub mod dedup;
pub mod fill;
pub mod reorder;

use std::cmp::Ordering;

pub use concat::concat;
pub use dedup::{dedup, dedup_by};
pub use fill::{copy, fill, replace_all};
pub use reorder::{reverse, rotate, shuffle, sort, sort_by, RandomSource};

use crate::{error::Result, observable::ObservableList};

/// Swap in `contents` as one removal and one addition.
fn replace_contents<T, L>(list: &L, contents: Vec<T>) -> Result<()>
where
  L: ObservableList<T> + ?Sized,
{
  list.clear()?;
  list.push_all(contents).map(drop)
}

/// Method form of the bulk algorithms, implemented for every
/// [`ObservableList`].
///
/// ```rust
/// use rxcollections::prelude::*;
///
/// let list = ListHandle::wrap(vec![3, 1, 2, 2]);
/// list.sort().unwrap();
/// list.dedup().unwrap();
/// list.reverse().unwrap();
/// assert_eq!(list.to_vec(), vec![3, 2, 1]);
/// ```
pub trait ListOps<T>: ObservableList<T> {
  fn rotate(&self, distance: isize) -> Result<()>
  where
    T: Clone,
  {
    reorder::rotate(self, distance)
  }

  fn reverse(&self) -> Result<()>
  where
    T: Clone,
  {
    reorder::reverse(self)
  }

  fn sort(&self) -> Result<()>
  where
    T: Clone + Ord,
  {
    reorder::sort(self)
  }

  fn sort_by<F>(&self, compare: F) -> Result<()>
  where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
  {
    reorder::sort_by(self, compare)
  }

  fn shuffle<R>(&self, rng: &mut R) -> Result<()>
  where
    R: RandomSource + ?Sized,
  {
    reorder::shuffle(self, rng)
  }

  fn fill(&self, value: T) -> Result<()>
  where
    T: Clone,
  {
    fill::fill(self, value)
  }

  /// See [`copy`].
  fn copy_from(&self, src: &[T]) -> Result<()>
  where
    T: Clone,
  {
    fill::copy(self, src)
  }

  fn replace_all(&self, old: &T, new: T) -> Result<bool>
  where
    T: Clone + PartialEq,
  {
    fill::replace_all(self, old, new)
  }

  fn dedup(&self) -> Result<usize>
  where
    T: PartialEq,
  {
    dedup::dedup(self)
  }

  fn dedup_by<F>(&self, same: F) -> Result<usize>
  where
    F: FnMut(&T, &T) -> bool,
  {
    dedup::dedup_by(self, same)
  }
}

impl<T, L: ObservableList<T> + ?Sized> ListOps<T> for L {}
