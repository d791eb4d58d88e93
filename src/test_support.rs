//! Recording observers shared by the unit tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
  observable::{ObservableList, ObservableMap, ObservableSet},
  observer::{ListChange, ListObserver, MapObserver, SetObserver},
};

/// Owned copy of a [`ListChange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListEvent<T> {
  Added { index: usize, count: usize },
  Removed { index: usize, removed: Vec<T> },
  Replaced { index: usize, old: T },
  PropertyChanged { index: usize },
}

impl<T: Clone> From<ListChange<'_, T>> for ListEvent<T> {
  fn from(change: ListChange<'_, T>) -> Self {
    match change {
      ListChange::ElementsAdded { index, count } => ListEvent::Added { index, count },
      ListChange::ElementsRemoved { index, removed } => {
        ListEvent::Removed { index, removed: removed.to_vec() }
      }
      ListChange::ElementReplaced { index, old } => ListEvent::Replaced { index, old: old.clone() },
      ListChange::ElementPropertyChanged { index } => ListEvent::PropertyChanged { index },
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SetEvent<T> {
  Added(T),
  Removed(T),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MapEvent<K, V> {
  Added(K),
  Removed(K, V),
  Changed(K, V),
}

/// Observer that stores every change it receives.
pub(crate) struct Recorder<E> {
  events: Mutex<Vec<E>>,
}

impl<E> Recorder<E> {
  pub(crate) fn new() -> Arc<Self> { Arc::new(Self { events: Mutex::new(vec![]) }) }

  /// Drain the recorded events.
  pub(crate) fn take(&self) -> Vec<E> { std::mem::take(&mut *self.events.lock()) }

  fn push(&self, event: E) { self.events.lock().push(event); }
}

impl<T: Clone + Send + Sync> ListObserver<T> for Recorder<ListEvent<T>> {
  fn elements_added(&self, _: &dyn ObservableList<T>, index: usize, count: usize) {
    self.push(ListChange::ElementsAdded { index, count }.into());
  }

  fn elements_removed(&self, _: &dyn ObservableList<T>, index: usize, removed: &[T]) {
    self.push(ListChange::ElementsRemoved { index, removed }.into());
  }

  fn element_replaced(&self, _: &dyn ObservableList<T>, index: usize, old: &T) {
    self.push(ListChange::ElementReplaced { index, old }.into());
  }

  fn element_property_changed(&self, _: &dyn ObservableList<T>, index: usize) {
    self.push(ListChange::ElementPropertyChanged { index }.into());
  }
}

impl<T: Clone + Send + Sync> SetObserver<T> for Recorder<SetEvent<T>> {
  fn element_added(&self, _: &dyn ObservableSet<T>, element: &T) {
    self.push(SetEvent::Added(element.clone()));
  }

  fn element_removed(&self, _: &dyn ObservableSet<T>, element: &T) {
    self.push(SetEvent::Removed(element.clone()));
  }
}

impl<K, V> MapObserver<K, V> for Recorder<MapEvent<K, V>>
where
  K: Clone + Send + Sync,
  V: Clone + Send + Sync,
{
  fn key_added(&self, _: &dyn ObservableMap<K, V>, key: &K) {
    self.push(MapEvent::Added(key.clone()));
  }

  fn key_removed(&self, _: &dyn ObservableMap<K, V>, key: &K, old_value: &V) {
    self.push(MapEvent::Removed(key.clone(), old_value.clone()));
  }

  fn key_value_changed(&self, _: &dyn ObservableMap<K, V>, key: &K, old_value: &V) {
    self.push(MapEvent::Changed(key.clone(), old_value.clone()));
  }
}
