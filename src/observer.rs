//! Observer traits and change events
//!
//! Every container kind has its own observer trait with one callback per
//! change variant. Each callback receives the container that fired it and the
//! payload of the change. All callbacks default to doing nothing, so an
//! observer only overrides what it cares about.
//!
//! The change enums ([`ListChange`], [`SetChange`], [`MapChange`]) are the
//! tagged form of the same events. They borrow their payload from the firing
//! container for the duration of one dispatch pass and can route themselves to
//! the matching callback with `notify`.
//!
//! Closures can be used as observers through [`list_observer`],
//! [`set_observer`] and [`map_observer`].

use std::{fmt, slice, sync::Arc};

use crate::observable::{ObservableList, ObservableMap, ObservableSet};

// ============================================================================
// Observer Traits
// ============================================================================

/// Receives structural and value changes of an [`ObservableList`].
pub trait ListObserver<T>: Send + Sync {
  /// `count` elements were inserted starting at `index`.
  fn elements_added(&self, _list: &dyn ObservableList<T>, _index: usize, _count: usize) {}

  /// `removed` elements were taken out, the first of them was at `index`.
  fn elements_removed(&self, _list: &dyn ObservableList<T>, _index: usize, _removed: &[T]) {}

  /// The element at `index` was replaced; `old` is the previous value.
  fn element_replaced(&self, _list: &dyn ObservableList<T>, _index: usize, _old: &T) {}

  /// A property of the element at `index` changed in place.
  fn element_property_changed(&self, _list: &dyn ObservableList<T>, _index: usize) {}
}

/// Receives membership changes of an [`ObservableSet`].
pub trait SetObserver<T>: Send + Sync {
  fn element_added(&self, _set: &dyn ObservableSet<T>, _element: &T) {}

  fn element_removed(&self, _set: &dyn ObservableSet<T>, _element: &T) {}
}

/// Receives key and value changes of an [`ObservableMap`].
pub trait MapObserver<K, V>: Send + Sync {
  /// `key` was not present before and now is.
  fn key_added(&self, _map: &dyn ObservableMap<K, V>, _key: &K) {}

  /// `key` was removed; `old_value` is what it mapped to.
  fn key_removed(&self, _map: &dyn ObservableMap<K, V>, _key: &K, _old_value: &V) {}

  /// `key` was already present and now maps to a new value.
  fn key_value_changed(&self, _map: &dyn ObservableMap<K, V>, _key: &K, _old_value: &V) {}
}

// ============================================================================
// Change Events
// ============================================================================

/// One change of a list, borrowing its payload from the firing list.
#[derive(Debug, PartialEq, Eq)]
pub enum ListChange<'a, T> {
  ElementsAdded { index: usize, count: usize },
  ElementsRemoved { index: usize, removed: &'a [T] },
  ElementReplaced { index: usize, old: &'a T },
  ElementPropertyChanged { index: usize },
}

impl<T> Clone for ListChange<'_, T> {
  fn clone(&self) -> Self { *self }
}

impl<T> Copy for ListChange<'_, T> {}

impl<'a, T> ListChange<'a, T> {
  /// Single element removal at `index`.
  pub fn removed_one(index: usize, removed: &'a T) -> Self {
    ListChange::ElementsRemoved { index, removed: slice::from_ref(removed) }
  }

  /// Position the change starts at.
  pub fn index(&self) -> usize {
    match *self {
      ListChange::ElementsAdded { index, .. }
      | ListChange::ElementsRemoved { index, .. }
      | ListChange::ElementReplaced { index, .. }
      | ListChange::ElementPropertyChanged { index } => index,
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      ListChange::ElementsAdded { .. } => "elements_added",
      ListChange::ElementsRemoved { .. } => "elements_removed",
      ListChange::ElementReplaced { .. } => "element_replaced",
      ListChange::ElementPropertyChanged { .. } => "element_property_changed",
    }
  }

  /// Invoke the callback of `observer` that matches this change.
  pub fn notify<O>(&self, observer: &O, list: &dyn ObservableList<T>)
  where
    O: ListObserver<T> + ?Sized,
  {
    match *self {
      ListChange::ElementsAdded { index, count } => observer.elements_added(list, index, count),
      ListChange::ElementsRemoved { index, removed } => {
        observer.elements_removed(list, index, removed)
      }
      ListChange::ElementReplaced { index, old } => observer.element_replaced(list, index, old),
      ListChange::ElementPropertyChanged { index } => {
        observer.element_property_changed(list, index)
      }
    }
  }
}

/// One change of a set.
#[derive(Debug, PartialEq, Eq)]
pub enum SetChange<'a, T> {
  ElementAdded { element: &'a T },
  ElementRemoved { element: &'a T },
}

impl<T> Clone for SetChange<'_, T> {
  fn clone(&self) -> Self { *self }
}

impl<T> Copy for SetChange<'_, T> {}

impl<T> SetChange<'_, T> {
  pub fn kind(&self) -> &'static str {
    match self {
      SetChange::ElementAdded { .. } => "element_added",
      SetChange::ElementRemoved { .. } => "element_removed",
    }
  }

  pub fn notify<O>(&self, observer: &O, set: &dyn ObservableSet<T>)
  where
    O: SetObserver<T> + ?Sized,
  {
    match *self {
      SetChange::ElementAdded { element } => observer.element_added(set, element),
      SetChange::ElementRemoved { element } => observer.element_removed(set, element),
    }
  }
}

/// One change of a map.
#[derive(Debug, PartialEq, Eq)]
pub enum MapChange<'a, K, V> {
  KeyAdded { key: &'a K },
  KeyRemoved { key: &'a K, old_value: &'a V },
  KeyValueChanged { key: &'a K, old_value: &'a V },
}

impl<K, V> Clone for MapChange<'_, K, V> {
  fn clone(&self) -> Self { *self }
}

impl<K, V> Copy for MapChange<'_, K, V> {}

impl<K, V> MapChange<'_, K, V> {
  pub fn kind(&self) -> &'static str {
    match self {
      MapChange::KeyAdded { .. } => "key_added",
      MapChange::KeyRemoved { .. } => "key_removed",
      MapChange::KeyValueChanged { .. } => "key_value_changed",
    }
  }

  pub fn notify<O>(&self, observer: &O, map: &dyn ObservableMap<K, V>)
  where
    O: MapObserver<K, V> + ?Sized,
  {
    match *self {
      MapChange::KeyAdded { key } => observer.key_added(map, key),
      MapChange::KeyRemoved { key, old_value } => observer.key_removed(map, key, old_value),
      MapChange::KeyValueChanged { key, old_value } => {
        observer.key_value_changed(map, key, old_value)
      }
    }
  }
}

// ============================================================================
// Closure Observers
// ============================================================================

/// Adapter turning a closure over change events into an observer.
pub struct FnObserver<F>(F);

impl<F> fmt::Debug for FnObserver<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("FnObserver") }
}

impl<T, F> ListObserver<T> for FnObserver<F>
where
  F: Fn(&dyn ObservableList<T>, ListChange<'_, T>) + Send + Sync,
{
  fn elements_added(&self, list: &dyn ObservableList<T>, index: usize, count: usize) {
    (self.0)(list, ListChange::ElementsAdded { index, count })
  }

  fn elements_removed(&self, list: &dyn ObservableList<T>, index: usize, removed: &[T]) {
    (self.0)(list, ListChange::ElementsRemoved { index, removed })
  }

  fn element_replaced(&self, list: &dyn ObservableList<T>, index: usize, old: &T) {
    (self.0)(list, ListChange::ElementReplaced { index, old })
  }

  fn element_property_changed(&self, list: &dyn ObservableList<T>, index: usize) {
    (self.0)(list, ListChange::ElementPropertyChanged { index })
  }
}

impl<T, F> SetObserver<T> for FnObserver<F>
where
  F: Fn(&dyn ObservableSet<T>, SetChange<'_, T>) + Send + Sync,
{
  fn element_added(&self, set: &dyn ObservableSet<T>, element: &T) {
    (self.0)(set, SetChange::ElementAdded { element })
  }

  fn element_removed(&self, set: &dyn ObservableSet<T>, element: &T) {
    (self.0)(set, SetChange::ElementRemoved { element })
  }
}

impl<K, V, F> MapObserver<K, V> for FnObserver<F>
where
  F: Fn(&dyn ObservableMap<K, V>, MapChange<'_, K, V>) + Send + Sync,
{
  fn key_added(&self, map: &dyn ObservableMap<K, V>, key: &K) {
    (self.0)(map, MapChange::KeyAdded { key })
  }

  fn key_removed(&self, map: &dyn ObservableMap<K, V>, key: &K, old_value: &V) {
    (self.0)(map, MapChange::KeyRemoved { key, old_value })
  }

  fn key_value_changed(&self, map: &dyn ObservableMap<K, V>, key: &K, old_value: &V) {
    (self.0)(map, MapChange::KeyValueChanged { key, old_value })
  }
}

/// Wrap a closure as a list observer.
///
/// The returned `Arc` is the observer's identity: keep it to remove the
/// observer later, and keep it alive when registering on an unmodifiable
/// view, which only holds observers weakly.
pub fn list_observer<T, F>(f: F) -> Arc<dyn ListObserver<T>>
where
  T: 'static,
  F: Fn(&dyn ObservableList<T>, ListChange<'_, T>) + Send + Sync + 'static,
{
  Arc::new(FnObserver(f))
}

/// Wrap a closure as a set observer.
pub fn set_observer<T, F>(f: F) -> Arc<dyn SetObserver<T>>
where
  T: 'static,
  F: Fn(&dyn ObservableSet<T>, SetChange<'_, T>) + Send + Sync + 'static,
{
  Arc::new(FnObserver(f))
}

/// Wrap a closure as a map observer.
pub fn map_observer<K, V, F>(f: F) -> Arc<dyn MapObserver<K, V>>
where
  K: 'static,
  V: 'static,
  F: Fn(&dyn ObservableMap<K, V>, MapChange<'_, K, V>) + Send + Sync + 'static,
{
  Arc::new(FnObserver(f))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn list_change_index_and_kind() {
    let old = 7;
    let removed = [1, 2];
    let changes = [
      ListChange::ElementsAdded { index: 1, count: 3 },
      ListChange::ElementsRemoved { index: 2, removed: &removed },
      ListChange::ElementReplaced { index: 3, old: &old },
      ListChange::ElementPropertyChanged { index: 4 },
    ];
    let indexes: Vec<_> = changes.iter().map(ListChange::index).collect();
    assert_eq!(indexes, vec![1, 2, 3, 4]);
    assert_eq!(changes[1].kind(), "elements_removed");
  }

  #[test]
  fn removed_one_borrows_a_single_element() {
    let value = "x";
    assert_eq!(
      ListChange::removed_one(5, &value),
      ListChange::ElementsRemoved { index: 5, removed: &["x"] }
    );
  }

  #[test]
  fn map_and_set_change_kinds() {
    let key = 1;
    let value = "a";
    let added: MapChange<'_, i32, &str> = MapChange::KeyAdded { key: &key };
    assert_eq!(added.kind(), "key_added");
    assert_eq!(MapChange::KeyRemoved { key: &key, old_value: &value }.kind(), "key_removed");
    assert_eq!(SetChange::ElementRemoved { element: &key }.kind(), "element_removed");
  }
}
