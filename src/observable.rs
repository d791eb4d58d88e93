//! Container contracts
//!
//! [`ObservableList`], [`ObservableSet`] and [`ObservableMap`] are the full
//! read/write surface of each container kind plus observer registration.
//! They are object safe: observers receive the firing container as a trait
//! object, so a callback can read from, or re-entrantly write to, whichever
//! container notified it without knowing its concrete type.
//!
//! All methods take `&self`. Containers are shared handles with interior
//! mutability; a write locks the delegate only for the mutation itself and
//! notifies observers after the lock is released.

use std::sync::Arc;

use crate::{
  error::Result,
  observer::{ListObserver, MapObserver, SetObserver},
};

/// Full contract of an observable sequence.
///
/// Writes fire exactly one [`ListChange`](crate::observer::ListChange) per
/// call, and none when the call changes nothing.
pub trait ObservableList<T>: Send + Sync {
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool { self.len() == 0 }

  /// Clone of the element at `index`.
  fn get(&self, index: usize) -> Result<T>;

  /// Snapshot of all elements in order.
  fn to_vec(&self) -> Vec<T>;

  fn index_of(&self, value: &T) -> Option<usize>
  where
    T: PartialEq,
  {
    self.to_vec().iter().position(|v| v == value)
  }

  fn contains(&self, value: &T) -> bool
  where
    T: PartialEq,
  {
    self.index_of(value).is_some()
  }

  /// Replace the element at `index`, returning the previous one.
  fn set(&self, index: usize, value: T) -> Result<T>;

  /// Insert `value` at `index`, shifting later elements right.
  fn insert(&self, index: usize, value: T) -> Result<()>;

  /// Append `value` at the end.
  fn push(&self, value: T) -> Result<()>;

  /// Insert all `values` at `index` as one change. Returns whether anything
  /// was inserted.
  fn insert_all(&self, index: usize, values: Vec<T>) -> Result<bool>;

  /// Append all `values` as one change.
  fn push_all(&self, values: Vec<T>) -> Result<bool>;

  /// Remove and return the element at `index`.
  fn remove(&self, index: usize) -> Result<T>;

  /// Remove the elements in `from..to` as one change.
  fn remove_range(&self, from: usize, to: usize) -> Result<Vec<T>>;

  /// Remove every element as one change.
  fn clear(&self) -> Result<()>;

  /// Live window over `from..to`. See [`SubList`](crate::list::SubList) for
  /// how changes propagate.
  fn sub_list(&self, from: usize, to: usize) -> Result<Arc<dyn ObservableList<T>>>;

  fn add_observer(&self, observer: Arc<dyn ListObserver<T>>);

  /// Remove `observer` by identity. Returns whether anything was removed.
  fn remove_observer(&self, observer: &Arc<dyn ListObserver<T>>) -> bool;

  /// Whether this list reports in-place element changes through
  /// [`ListObserver::element_property_changed`].
  fn supports_element_property_changed(&self) -> bool;
}

/// Full contract of an observable set.
///
/// `insert` and `remove` fire only when membership actually changes.
pub trait ObservableSet<T>: Send + Sync {
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool { self.len() == 0 }

  fn contains(&self, value: &T) -> bool;

  fn to_vec(&self) -> Vec<T>;

  /// Returns whether `value` was not yet a member.
  fn insert(&self, value: T) -> bool;

  /// Returns whether `value` was a member.
  fn remove(&self, value: &T) -> bool;

  /// Insert each value in turn, one change per new member.
  fn insert_all(&self, values: Vec<T>) -> bool {
    values
      .into_iter()
      .fold(false, |modified, value| self.insert(value) | modified)
  }

  /// Remove each value in turn, one change per removed member.
  fn remove_all(&self, values: &[T]) -> bool {
    values
      .iter()
      .fold(false, |modified, value| self.remove(value) | modified)
  }

  /// Remove every member, one change per member.
  fn clear(&self);

  fn add_observer(&self, observer: Arc<dyn SetObserver<T>>);

  fn remove_observer(&self, observer: &Arc<dyn SetObserver<T>>) -> bool;
}

/// Full contract of an observable map.
pub trait ObservableMap<K, V>: Send + Sync {
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool { self.len() == 0 }

  fn get(&self, key: &K) -> Option<V>;

  fn contains_key(&self, key: &K) -> bool;

  fn contains_value(&self, value: &V) -> bool
  where
    V: PartialEq,
  {
    self.entries().iter().any(|(_, v)| v == value)
  }

  fn keys(&self) -> Vec<K>;

  fn entries(&self) -> Vec<(K, V)>;

  /// Map `key` to `value`, returning the previous value if there was one.
  fn put(&self, key: K, value: V) -> Option<V>;

  /// Put each entry in turn, one change per entry.
  fn put_all(&self, entries: Vec<(K, V)>) {
    for (key, value) in entries {
      self.put(key, value);
    }
  }

  /// Remove `key`, returning its value; `None` and no change if absent.
  fn remove(&self, key: &K) -> Option<V>;

  /// Remove every key, one change per key.
  fn clear(&self);

  fn add_observer(&self, observer: Arc<dyn MapObserver<K, V>>);

  fn remove_observer(&self, observer: &Arc<dyn MapObserver<K, V>>) -> bool;
}
