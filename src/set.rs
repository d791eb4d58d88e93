//! Observable set
//!
//! [`SetHandle`] fires `ElementAdded` and `ElementRemoved` only when
//! membership actually changes. Bulk calls and `clear` work member by member
//! and fire one change per affected member.

use std::{
  collections::HashSet,
  fmt,
  hash::Hash,
  sync::Arc,
};

use parking_lot::Mutex;
use tracing::trace;

use crate::{
  cursor::{Cursor, SetCursor},
  observable::ObservableSet,
  observer::{SetChange, SetObserver},
  registry::ObserverRegistry,
  storage::SetStorage,
};

/// Shared handle to an observable set.
pub struct SetHandle<T>(Arc<SetShared<T>>);

struct SetShared<T> {
  storage: Mutex<Box<dyn SetStorage<T>>>,
  observers: ObserverRegistry<dyn SetObserver<T>>,
}

impl<T> Clone for SetHandle<T> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> SetHandle<T>
where
  T: Eq + Hash + Clone + Send + Sync + 'static,
{
  /// Empty set backed by a `HashSet`.
  pub fn new() -> Self { Self::wrap(HashSet::new()) }
}

impl<T> SetHandle<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// Observable set over `storage`, which it owns from now on.
  pub fn wrap(storage: impl SetStorage<T> + 'static) -> Self {
    Self(Arc::new(SetShared {
      storage: Mutex::new(Box::new(storage)),
      observers: ObserverRegistry::new(),
    }))
  }

  #[inline]
  pub fn observer_count(&self) -> usize { self.0.observers.len() }

  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.0, &other.0) }

  pub fn iter(&self) -> std::vec::IntoIter<T> { self.to_vec().into_iter() }

  /// Cursor over a snapshot of the members that can remove them one by one.
  pub fn cursor(&self) -> SetCursor<'_, T> {
    let source: &dyn ObservableSet<T> = self;
    Cursor::new(source, self.to_vec())
  }

  fn dispatch(&self, change: SetChange<'_, T>) {
    trace!(kind = change.kind(), "set change");
    self
      .0
      .observers
      .broadcast(|observer| change.notify(observer, self));
  }
}

impl<T> Default for SetHandle<T>
where
  T: Eq + Hash + Clone + Send + Sync + 'static,
{
  fn default() -> Self { Self::new() }
}

impl<T> ObservableSet<T> for SetHandle<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn len(&self) -> usize { self.0.storage.lock().len() }

  fn contains(&self, value: &T) -> bool { self.0.storage.lock().contains(value) }

  fn to_vec(&self) -> Vec<T> { self.0.storage.lock().to_vec() }

  fn insert(&self, value: T) -> bool {
    let added = self.0.storage.lock().insert(value.clone());
    if added {
      self.dispatch(SetChange::ElementAdded { element: &value });
    }
    added
  }

  fn remove(&self, value: &T) -> bool {
    let removed = self.0.storage.lock().take(value);
    match removed {
      Some(element) => {
        self.dispatch(SetChange::ElementRemoved { element: &element });
        true
      }
      None => false,
    }
  }

  fn clear(&self) {
    for member in self.to_vec() {
      self.remove(&member);
    }
  }

  fn add_observer(&self, observer: Arc<dyn SetObserver<T>>) { self.0.observers.register(observer); }

  fn remove_observer(&self, observer: &Arc<dyn SetObserver<T>>) -> bool {
    self.0.observers.deregister(observer)
  }
}

impl<T> FromIterator<T> for SetHandle<T>
where
  T: Eq + Hash + Clone + Send + Sync + 'static,
{
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Self::wrap(iter.into_iter().collect::<HashSet<_>>())
  }
}

impl<T> fmt::Debug for SetHandle<T>
where
  T: Clone + Send + Sync + fmt::Debug + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SetHandle")
      .field("elements", &self.to_vec())
      .field("observers", &self.observer_count())
      .finish()
  }
}
