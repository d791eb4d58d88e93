//! Weak subscriptions
//!
//! A [`WeakObserver`] stands in a registry for an observer it does not own.
//! On every delivery it resolves its referent: a live observer gets the change
//! forwarded, a reclaimed one causes the proxy to remove itself from the
//! container that is dispatching and the change is dropped.
//!
//! ```rust
//! use std::sync::{
//!   atomic::{AtomicUsize, Ordering},
//!   Arc,
//! };
//!
//! use rxcollections::prelude::*;
//!
//! let list = ListHandle::<i32>::new();
//! let hits = Arc::new(AtomicUsize::new(0));
//! let c_hits = hits.clone();
//! let observer = list_observer::<i32, _>(move |_, _| {
//!   c_hits.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! list.add_observer(WeakObserver::new(&observer));
//! list.push(1).unwrap();
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//!
//! drop(observer);
//! list.push(2).unwrap();
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//! assert_eq!(list.observer_count(), 0);
//! ```

use std::{
  fmt,
  sync::{Arc, Weak},
};

use parking_lot::Mutex;
use tracing::debug;

use crate::{
  observable::{ObservableList, ObservableMap, ObservableSet},
  observer::{ListChange, ListObserver, MapChange, MapObserver, SetChange, SetObserver},
  registry::same_observer,
};

/// Resolution state of a [`WeakObserver`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubscriptionState {
  /// The referent is alive and receives changes.
  Live,
  /// The subscription was severed with [`WeakObserver::clear`].
  Severed,
  /// The referent has been dropped.
  Reclaimed,
}

/// Non-owning proxy for an observer.
///
/// `O` is the observer trait object, e.g. `dyn ListObserver<T>`. The proxy
/// implements the same observer trait, so it can be registered wherever the
/// observer itself could be.
pub struct WeakObserver<O: ?Sized> {
  referent: Mutex<Option<Weak<O>>>,
  this: Weak<WeakObserver<O>>,
}

impl<O: ?Sized> WeakObserver<O> {
  /// Create a proxy for `observer` without taking ownership of it.
  pub fn new(observer: &Arc<O>) -> Arc<Self> {
    let referent = Arc::downgrade(observer);
    Arc::new_cyclic(|this| Self { referent: Mutex::new(Some(referent)), this: this.clone() })
  }

  /// The observer, if it is still alive and the proxy was not severed.
  pub fn resolve(&self) -> Option<Arc<O>> {
    self
      .referent
      .lock()
      .as_ref()
      .and_then(Weak::upgrade)
  }

  /// Sever the proxy now, independently of the referent's lifetime.
  pub fn clear(&self) { *self.referent.lock() = None; }

  pub fn state(&self) -> SubscriptionState {
    match &*self.referent.lock() {
      None => SubscriptionState::Severed,
      Some(weak) if weak.strong_count() == 0 => SubscriptionState::Reclaimed,
      Some(_) => SubscriptionState::Live,
    }
  }

  /// Whether resolution fails, either because the referent was dropped or
  /// because the proxy was severed.
  pub fn was_reclaimed(&self) -> bool { self.state() != SubscriptionState::Live }

  /// Whether this proxy stands for `observer`.
  pub fn refers_to(&self, observer: &Arc<O>) -> bool {
    self
      .referent
      .lock()
      .as_ref()
      .is_some_and(|weak| {
        weak.strong_count() > 0 && std::ptr::addr_eq(weak.as_ptr(), Arc::as_ptr(observer))
      })
  }

  /// Forward to the referent, or detach from the dispatching container.
  fn live_or_detach(&self, detach: impl FnOnce(Arc<Self>)) -> Option<Arc<O>> {
    let observer = self.resolve();
    if observer.is_none() {
      debug!(state = ?self.state(), "weak observer no longer resolves, detaching");
      if let Some(this) = self.this.upgrade() {
        detach(this);
      }
    }
    observer
  }
}

impl<O: ?Sized> fmt::Debug for WeakObserver<O> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WeakObserver")
      .field("state", &self.state())
      .finish()
  }
}

impl<T: 'static> WeakObserver<dyn ListObserver<T>> {
  fn relay_list(&self, list: &dyn ObservableList<T>, change: ListChange<'_, T>) {
    let detach = |this: Arc<Self>| {
      let this: Arc<dyn ListObserver<T>> = this;
      list.remove_observer(&this);
    };
    if let Some(observer) = self.live_or_detach(detach) {
      change.notify(&*observer, list);
    }
  }
}

impl<T: 'static> ListObserver<T> for WeakObserver<dyn ListObserver<T>> {
  fn elements_added(&self, list: &dyn ObservableList<T>, index: usize, count: usize) {
    self.relay_list(list, ListChange::ElementsAdded { index, count });
  }

  fn elements_removed(&self, list: &dyn ObservableList<T>, index: usize, removed: &[T]) {
    self.relay_list(list, ListChange::ElementsRemoved { index, removed });
  }

  fn element_replaced(&self, list: &dyn ObservableList<T>, index: usize, old: &T) {
    self.relay_list(list, ListChange::ElementReplaced { index, old });
  }

  fn element_property_changed(&self, list: &dyn ObservableList<T>, index: usize) {
    self.relay_list(list, ListChange::ElementPropertyChanged { index });
  }
}

impl<T: 'static> WeakObserver<dyn SetObserver<T>> {
  fn relay_set(&self, set: &dyn ObservableSet<T>, change: SetChange<'_, T>) {
    let detach = |this: Arc<Self>| {
      let this: Arc<dyn SetObserver<T>> = this;
      set.remove_observer(&this);
    };
    if let Some(observer) = self.live_or_detach(detach) {
      change.notify(&*observer, set);
    }
  }
}

impl<T: 'static> SetObserver<T> for WeakObserver<dyn SetObserver<T>> {
  fn element_added(&self, set: &dyn ObservableSet<T>, element: &T) {
    self.relay_set(set, SetChange::ElementAdded { element });
  }

  fn element_removed(&self, set: &dyn ObservableSet<T>, element: &T) {
    self.relay_set(set, SetChange::ElementRemoved { element });
  }
}

impl<K: 'static, V: 'static> WeakObserver<dyn MapObserver<K, V>> {
  fn relay_map(&self, map: &dyn ObservableMap<K, V>, change: MapChange<'_, K, V>) {
    let detach = |this: Arc<Self>| {
      let this: Arc<dyn MapObserver<K, V>> = this;
      map.remove_observer(&this);
    };
    if let Some(observer) = self.live_or_detach(detach) {
      change.notify(&*observer, map);
    }
  }
}

impl<K: 'static, V: 'static> MapObserver<K, V> for WeakObserver<dyn MapObserver<K, V>> {
  fn key_added(&self, map: &dyn ObservableMap<K, V>, key: &K) {
    self.relay_map(map, MapChange::KeyAdded { key });
  }

  fn key_removed(&self, map: &dyn ObservableMap<K, V>, key: &K, old_value: &V) {
    self.relay_map(map, MapChange::KeyRemoved { key, old_value });
  }

  fn key_value_changed(&self, map: &dyn ObservableMap<K, V>, key: &K, old_value: &V) {
    self.relay_map(map, MapChange::KeyValueChanged { key, old_value });
  }
}

/// Identity check between a proxy and an observer handle of the same kind.
pub(crate) fn is_proxy_for<O: ?Sized>(proxy: &Arc<WeakObserver<O>>, observer: &Arc<O>) -> bool {
  same_observer(proxy, observer) || proxy.refers_to(observer)
}
