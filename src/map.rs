//! Observable map
//!
//! [`MapHandle`] fires `KeyAdded` when `put` introduces a key,
//! `KeyValueChanged` when it overwrites one and `KeyRemoved` when `remove`
//! finds the key. `put_all` and `clear` work key by key.

use std::{
  collections::HashMap,
  fmt,
  hash::Hash,
  sync::Arc,
};

use parking_lot::Mutex;
use tracing::trace;

use crate::{
  cursor::{Cursor, MapCursor},
  observable::ObservableMap,
  observer::{MapChange, MapObserver},
  registry::ObserverRegistry,
  storage::MapStorage,
};

/// Shared handle to an observable map.
pub struct MapHandle<K, V>(Arc<MapShared<K, V>>);

struct MapShared<K, V> {
  storage: Mutex<Box<dyn MapStorage<K, V>>>,
  observers: ObserverRegistry<dyn MapObserver<K, V>>,
}

impl<K, V> Clone for MapHandle<K, V> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<K, V> MapHandle<K, V>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  /// Empty map backed by a `HashMap`.
  pub fn new() -> Self { Self::wrap(HashMap::new()) }
}

impl<K, V> MapHandle<K, V>
where
  K: Clone + Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  /// Observable map over `storage`, which it owns from now on.
  pub fn wrap(storage: impl MapStorage<K, V> + 'static) -> Self {
    Self(Arc::new(MapShared {
      storage: Mutex::new(Box::new(storage)),
      observers: ObserverRegistry::new(),
    }))
  }

  #[inline]
  pub fn observer_count(&self) -> usize { self.0.observers.len() }

  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.0, &other.0) }

  /// Cursor over a snapshot of the entries that can remove them one by one.
  pub fn cursor(&self) -> MapCursor<'_, K, V> {
    let source: &dyn ObservableMap<K, V> = self;
    Cursor::new(source, self.entries())
  }

  fn dispatch(&self, change: MapChange<'_, K, V>) {
    trace!(kind = change.kind(), "map change");
    self
      .0
      .observers
      .broadcast(|observer| change.notify(observer, self));
  }
}

impl<K, V> Default for MapHandle<K, V>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  fn default() -> Self { Self::new() }
}

impl<K, V> ObservableMap<K, V> for MapHandle<K, V>
where
  K: Clone + Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  fn len(&self) -> usize { self.0.storage.lock().len() }

  fn get(&self, key: &K) -> Option<V> { self.0.storage.lock().get(key) }

  fn contains_key(&self, key: &K) -> bool { self.0.storage.lock().contains_key(key) }

  fn keys(&self) -> Vec<K> { self.0.storage.lock().keys() }

  fn entries(&self) -> Vec<(K, V)> { self.0.storage.lock().entries() }

  fn put(&self, key: K, value: V) -> Option<V> {
    let old = self.0.storage.lock().insert(key.clone(), value);
    match &old {
      Some(old_value) => self.dispatch(MapChange::KeyValueChanged { key: &key, old_value }),
      None => self.dispatch(MapChange::KeyAdded { key: &key }),
    }
    old
  }

  fn remove(&self, key: &K) -> Option<V> {
    let old = self.0.storage.lock().remove(key);
    if let Some(old_value) = &old {
      self.dispatch(MapChange::KeyRemoved { key, old_value });
    }
    old
  }

  fn clear(&self) {
    for key in self.keys() {
      self.remove(&key);
    }
  }

  fn add_observer(&self, observer: Arc<dyn MapObserver<K, V>>) {
    self.0.observers.register(observer);
  }

  fn remove_observer(&self, observer: &Arc<dyn MapObserver<K, V>>) -> bool {
    self.0.observers.deregister(observer)
  }
}

impl<K, V> FromIterator<(K, V)> for MapHandle<K, V>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self::wrap(iter.into_iter().collect::<HashMap<_, _>>())
  }
}

impl<K, V> fmt::Debug for MapHandle<K, V>
where
  K: Clone + Send + Sync + fmt::Debug + 'static,
  V: Clone + Send + Sync + fmt::Debug + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MapHandle")
      .field("entries", &self.entries())
      .field("observers", &self.observer_count())
      .finish()
  }
}
