//! Removing cursors over sets and maps
//!
//! A [`Cursor`] walks a snapshot of a container taken when the cursor was
//! created and can remove the item it is positioned on. Removal goes through
//! the container's observable surface, so it fires the usual change.
//!
//! ```rust
//! use rxcollections::prelude::*;
//!
//! let set: SetHandle<i32> = (1..=4).collect();
//! let mut cursor = set.cursor();
//! assert_eq!(cursor.remove(), Err(CollectionError::InvalidIteratorState));
//! while let Some(value) = cursor.next() {
//!   if value % 2 == 0 {
//!     cursor.remove().unwrap();
//!   }
//! }
//! assert_eq!(set.len(), 2);
//! ```

use crate::{
  error::{CollectionError, Result},
  observable::{ObservableMap, ObservableSet},
};

/// Where a [`Cursor`] stands relative to the item it last yielded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CursorState {
  /// Nothing yielded yet, or the snapshot is exhausted.
  NotPositioned,
  /// On the item last yielded; it can be removed.
  Positioned,
  /// The item last yielded was removed.
  Consumed,
}

/// Container a cursor can remove items from.
pub trait CursorSource<I> {
  /// Remove `item`, returning whether it was still present.
  fn remove_item(&self, item: &I) -> bool;
}

impl<T> CursorSource<T> for dyn ObservableSet<T> + '_ {
  fn remove_item(&self, item: &T) -> bool { self.remove(item) }
}

impl<K, V> CursorSource<(K, V)> for dyn ObservableMap<K, V> + '_ {
  fn remove_item(&self, (key, _): &(K, V)) -> bool { self.remove(key).is_some() }
}

/// Iterator over a container snapshot that can remove the current item.
pub struct Cursor<'a, S: ?Sized, I> {
  source: &'a S,
  pending: std::vec::IntoIter<I>,
  current: Option<I>,
  state: CursorState,
}

/// Cursor over the members of a set.
pub type SetCursor<'a, T> = Cursor<'a, dyn ObservableSet<T> + 'a, T>;

/// Cursor over the `(key, value)` entries of a map.
pub type MapCursor<'a, K, V> = Cursor<'a, dyn ObservableMap<K, V> + 'a, (K, V)>;

impl<'a, S: ?Sized, I> Cursor<'a, S, I> {
  pub(crate) fn new(source: &'a S, snapshot: Vec<I>) -> Self {
    Self {
      source,
      pending: snapshot.into_iter(),
      current: None,
      state: CursorState::NotPositioned,
    }
  }

  #[inline]
  pub fn state(&self) -> CursorState { self.state }

  /// Items of the snapshot not yet yielded.
  #[inline]
  pub fn remaining(&self) -> usize { self.pending.len() }
}

impl<S, I> Cursor<'_, S, I>
where
  S: CursorSource<I> + ?Sized,
{
  /// Remove the item the cursor is positioned on from the container.
  ///
  /// Fails with [`CollectionError::InvalidIteratorState`] unless the cursor
  /// is [`CursorState::Positioned`].
  pub fn remove(&mut self) -> Result<()> {
    if self.state != CursorState::Positioned {
      return Err(CollectionError::InvalidIteratorState);
    }
    if let Some(item) = self.current.take() {
      self.source.remove_item(&item);
    }
    self.state = CursorState::Consumed;
    Ok(())
  }
}

impl<S: ?Sized, I: Clone> Iterator for Cursor<'_, S, I> {
  type Item = I;

  fn next(&mut self) -> Option<I> {
    self.current = self.pending.next();
    self.state = match self.current {
      Some(_) => CursorState::Positioned,
      None => CursorState::NotPositioned,
    };
    self.current.clone()
  }

  fn size_hint(&self) -> (usize, Option<usize>) { self.pending.size_hint() }
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use super::*;
  use crate::map::MapHandle;

  #[test]
  fn state_machine() {
    let map = MapHandle::wrap(BTreeMap::from([(1, 'a'), (2, 'b')]));
    let mut cursor = map.cursor();
    assert_eq!(cursor.state(), CursorState::NotPositioned);
    assert_eq!(cursor.remove(), Err(CollectionError::InvalidIteratorState));

    assert_eq!(cursor.next(), Some((1, 'a')));
    assert_eq!(cursor.state(), CursorState::Positioned);
    assert_eq!(cursor.remove(), Ok(()));
    assert_eq!(cursor.state(), CursorState::Consumed);
    assert_eq!(cursor.remove(), Err(CollectionError::InvalidIteratorState));

    assert_eq!(cursor.remaining(), 1);
    assert_eq!(cursor.next(), Some((2, 'b')));
    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.state(), CursorState::NotPositioned);
    assert_eq!(cursor.remove(), Err(CollectionError::InvalidIteratorState));

    assert_eq!(map.entries(), vec![(2, 'b')]);
  }

  #[test]
  fn snapshot_is_unaffected_by_later_writes() {
    let map = MapHandle::wrap(BTreeMap::from([(1, 'a')]));
    let mut cursor = map.cursor();
    map.put(2, 'b');
    assert_eq!(cursor.by_ref().count(), 1);
  }
}
