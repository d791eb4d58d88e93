//! Read-only view of an observable list
//!
//! An [`UnmodifiableList`] reads through to the list it wraps and rejects
//! every write with [`CollectionError::Unsupported`]. It relays the wrapped
//! list's changes to its own observers, which it holds weakly: keep the
//! `Arc` of an observer alive for as long as it should receive changes.
//!
//! The view installs one relay on the wrapped list when it is created. The
//! wrapped list only holds that relay weakly, so dropping the view detaches
//! the relay on the next change of the wrapped list.
//!
//! ```rust
//! use rxcollections::prelude::*;
//!
//! let list = ListHandle::wrap(vec![1, 2]);
//! let view = unmodifiable_list(list.clone());
//! assert_eq!(view.push(3), Err(CollectionError::Unsupported { operation: "push" }));
//!
//! list.push(3).unwrap();
//! assert_eq!(view.to_vec(), vec![1, 2, 3]);
//! ```

use std::{
  fmt,
  sync::{Arc, Weak},
};

use tracing::debug;

use crate::{
  error::{CollectionError, Result},
  observable::ObservableList,
  observer::{ListChange, ListObserver},
  registry::ObserverRegistry,
  subscription::{is_proxy_for, WeakObserver},
};

/// Read-only view relaying the changes of another list.
pub struct UnmodifiableList<T> {
  inner: Arc<dyn ObservableList<T>>,
  observers: ObserverRegistry<WeakObserver<dyn ListObserver<T>>>,
  relay: Arc<dyn ListObserver<T>>,
}

/// Observer installed on the wrapped list.
struct Relay<T> {
  view: Weak<UnmodifiableList<T>>,
}

impl<T> Relay<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn forward(&self, change: ListChange<'_, T>) {
    if let Some(view) = self.view.upgrade() {
      view.dispatch(change);
    }
  }
}

impl<T> ListObserver<T> for Relay<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn elements_added(&self, _: &dyn ObservableList<T>, index: usize, count: usize) {
    self.forward(ListChange::ElementsAdded { index, count });
  }

  fn elements_removed(&self, _: &dyn ObservableList<T>, index: usize, removed: &[T]) {
    self.forward(ListChange::ElementsRemoved { index, removed });
  }

  fn element_replaced(&self, _: &dyn ObservableList<T>, index: usize, old: &T) {
    self.forward(ListChange::ElementReplaced { index, old });
  }

  fn element_property_changed(&self, _: &dyn ObservableList<T>, index: usize) {
    self.forward(ListChange::ElementPropertyChanged { index });
  }
}

impl<T> UnmodifiableList<T>
where
  T: Clone + Send + Sync + 'static,
{
  pub fn new(inner: impl ObservableList<T> + 'static) -> Arc<Self> {
    Self::from_arc(Arc::new(inner))
  }

  /// View over a list that is already shared.
  pub fn from_arc(inner: Arc<dyn ObservableList<T>>) -> Arc<Self> {
    let view = Arc::new_cyclic(|view: &Weak<Self>| {
      let relay: Arc<dyn ListObserver<T>> = Arc::new(Relay { view: view.clone() });
      Self { inner, observers: ObserverRegistry::new(), relay }
    });
    debug!("unmodifiable view installs its relay");
    view.inner.add_observer(WeakObserver::new(&view.relay));
    view
  }

  #[inline]
  pub fn observer_count(&self) -> usize { self.observers.len() }

  fn dispatch(&self, change: ListChange<'_, T>) {
    self
      .observers
      .broadcast(|observer| change.notify(observer, self));
  }
}

impl<T> ObservableList<T> for UnmodifiableList<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn len(&self) -> usize { self.inner.len() }

  fn get(&self, index: usize) -> Result<T> { self.inner.get(index) }

  fn to_vec(&self) -> Vec<T> { self.inner.to_vec() }

  fn set(&self, _: usize, _: T) -> Result<T> { Err(CollectionError::unsupported("set")) }

  fn insert(&self, _: usize, _: T) -> Result<()> { Err(CollectionError::unsupported("insert")) }

  fn push(&self, _: T) -> Result<()> { Err(CollectionError::unsupported("push")) }

  fn insert_all(&self, _: usize, _: Vec<T>) -> Result<bool> {
    Err(CollectionError::unsupported("insert_all"))
  }

  fn push_all(&self, _: Vec<T>) -> Result<bool> { Err(CollectionError::unsupported("push_all")) }

  fn remove(&self, _: usize) -> Result<T> { Err(CollectionError::unsupported("remove")) }

  fn remove_range(&self, _: usize, _: usize) -> Result<Vec<T>> {
    Err(CollectionError::unsupported("remove_range"))
  }

  fn clear(&self) -> Result<()> { Err(CollectionError::unsupported("clear")) }

  /// Unmodifiable view over the wrapped list's window.
  fn sub_list(&self, from: usize, to: usize) -> Result<Arc<dyn ObservableList<T>>> {
    let window = self.inner.sub_list(from, to)?;
    Ok(UnmodifiableList::from_arc(window))
  }

  /// Registers a fresh weak proxy for `observer`.
  fn add_observer(&self, observer: Arc<dyn ListObserver<T>>) {
    self.observers.register(WeakObserver::new(&observer));
  }

  /// Removes every proxy standing for `observer`.
  fn remove_observer(&self, observer: &Arc<dyn ListObserver<T>>) -> bool {
    self
      .observers
      .deregister_where(|proxy| is_proxy_for(proxy, observer))
      > 0
  }

  fn supports_element_property_changed(&self) -> bool {
    self.inner.supports_element_property_changed()
  }
}

impl<T> fmt::Debug for UnmodifiableList<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("UnmodifiableList")
      .field("observers", &self.observers)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    list::ListHandle,
    test_support::{ListEvent, Recorder},
  };

  #[test]
  fn every_write_is_rejected() {
    let list = ListHandle::wrap(vec![1, 2, 3]);
    let events = Recorder::new();
    list.add_observer(events.clone());
    let view = UnmodifiableList::new(list.clone());
    let observers_before = list.observer_count();

    fn unsupported<R>(operation: &'static str) -> Result<R> {
      Err(CollectionError::Unsupported { operation })
    }
    assert_eq!(view.set(0, 9), unsupported("set"));
    assert_eq!(view.insert(0, 9), unsupported("insert"));
    assert_eq!(view.push(9), unsupported("push"));
    assert_eq!(view.insert_all(0, vec![9]), unsupported("insert_all"));
    assert_eq!(view.push_all(vec![9]), unsupported("push_all"));
    assert_eq!(view.remove(0), unsupported("remove"));
    assert_eq!(view.remove_range(0, 1), unsupported("remove_range"));
    assert_eq!(view.clear(), unsupported("clear"));

    assert_eq!(list.to_vec(), vec![1, 2, 3]);
    assert_eq!(view.to_vec(), vec![1, 2, 3]);
    assert_eq!(list.observer_count(), observers_before);
    assert!(events.take().is_empty());
  }

  #[test]
  fn relays_changes_to_live_observers() {
    let list = ListHandle::wrap(vec![1]);
    let view = UnmodifiableList::new(list.clone());
    let events = Recorder::new();
    view.add_observer(events.clone());

    list.push(2).unwrap();
    list.set(0, 10).unwrap();
    assert_eq!(
      events.take(),
      vec![ListEvent::Added { index: 1, count: 1 }, ListEvent::Replaced { index: 0, old: 1 }]
    );
  }

  #[test]
  fn dropped_observer_is_detached() {
    let list = ListHandle::wrap(vec![1]);
    let view = UnmodifiableList::new(list.clone());
    let observer: Arc<dyn ListObserver<i32>> = Recorder::<ListEvent<i32>>::new();
    view.add_observer(observer.clone());
    assert_eq!(view.observer_count(), 1);

    drop(observer);
    list.push(2).unwrap();
    assert_eq!(view.observer_count(), 0);
  }

  #[test]
  fn remove_observer_removes_all_matching_proxies() {
    let list = ListHandle::<i32>::new();
    let view = UnmodifiableList::new(list.clone());
    let a: Arc<dyn ListObserver<i32>> = Recorder::<ListEvent<i32>>::new();
    let b: Arc<dyn ListObserver<i32>> = Recorder::<ListEvent<i32>>::new();
    view.add_observer(a.clone());
    view.add_observer(a.clone());
    view.add_observer(b.clone());
    view.add_observer(a.clone());
    assert_eq!(view.observer_count(), 4);

    assert!(view.remove_observer(&a));
    assert_eq!(view.observer_count(), 1);
    assert!(!view.remove_observer(&a));
    assert!(view.remove_observer(&b));
  }

  #[test]
  fn dropping_the_view_detaches_its_relay() {
    let list = ListHandle::wrap(vec![1]);
    let view = UnmodifiableList::new(list.clone());
    assert_eq!(list.observer_count(), 1);
    drop(view);
    list.push(2).unwrap();
    assert_eq!(list.observer_count(), 0);
  }

  #[test]
  fn sub_list_is_unmodifiable() {
    let list = ListHandle::wrap(vec![1, 2, 3]);
    let view = UnmodifiableList::new(list.clone());
    let window = view.sub_list(1, 3).unwrap();
    assert_eq!(window.to_vec(), vec![2, 3]);
    assert_eq!(window.push(4), Err(CollectionError::Unsupported { operation: "push" }));
    assert_eq!(list.len(), 3);
  }
}
