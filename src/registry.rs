//! Copy-on-write observer registry.
//!
//! An [`ObserverRegistry`] keeps an ordered set of observer handles, unique by
//! identity. Every dispatch pass works on an immutable snapshot taken at the
//! start of the pass, so observers registered or removed by a callback (or by
//! another thread) only affect later passes. Writers swap in a fresh copy of
//! the list; readers never block.

use std::{fmt, sync::Arc};

use arc_swap::ArcSwap;
use smallvec::SmallVec;
use tracing::trace;

/// Inline capacity of a snapshot; most containers have one or two observers.
type Snapshot<O> = SmallVec<[Arc<O>; 2]>;

/// Whether `a` and `b` point at the same observer, ignoring vtables.
#[inline]
pub fn same_observer<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
  std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Ordered set of observers with snapshot dispatch.
pub struct ObserverRegistry<O: ?Sized> {
  observers: ArcSwap<Snapshot<O>>,
}

impl<O: ?Sized> Default for ObserverRegistry<O> {
  fn default() -> Self { Self { observers: ArcSwap::from_pointee(SmallVec::new()) } }
}

impl<O: ?Sized> fmt::Debug for ObserverRegistry<O> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ObserverRegistry")
      .field("len", &self.len())
      .finish()
  }
}

impl<O: ?Sized> ObserverRegistry<O> {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Append `observer` unless it is already registered. Returns whether it
  /// was added.
  pub fn register(&self, observer: Arc<O>) -> bool {
    let mut added = false;
    self.observers.rcu(|current| {
      added = !current.iter().any(|o| same_observer(o, &observer));
      if added {
        let mut next: Snapshot<O> = (**current).clone();
        next.push(observer.clone());
        Arc::new(next)
      } else {
        Arc::clone(current)
      }
    });
    added
  }

  /// Remove `observer` by identity. Returns whether it was registered.
  pub fn deregister(&self, observer: &Arc<O>) -> bool {
    self.deregister_where(|o| same_observer(o, observer)) > 0
  }

  /// Remove every observer matching `matches`, returning how many went.
  ///
  /// All matches are collected against one snapshot and removed in a single
  /// swap, so adjacent matches cannot be skipped.
  pub fn deregister_where(&self, mut matches: impl FnMut(&Arc<O>) -> bool) -> usize {
    let mut removed = 0;
    self.observers.rcu(|current| {
      let next: Snapshot<O> = current.iter().filter(|o| !matches(o)).cloned().collect();
      removed = current.len() - next.len();
      if removed == 0 {
        Arc::clone(current)
      } else {
        Arc::new(next)
      }
    });
    removed
  }

  pub fn contains(&self, observer: &Arc<O>) -> bool {
    self
      .observers
      .load()
      .iter()
      .any(|o| same_observer(o, observer))
  }

  #[inline]
  pub fn len(&self) -> usize { self.observers.load().len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.observers.load().is_empty() }

  /// Immutable copy of the current observers in registration order.
  #[inline]
  pub fn snapshot(&self) -> Arc<Snapshot<O>> { self.observers.load_full() }

  /// Invoke `deliver` for every observer of the current snapshot, in
  /// registration order.
  ///
  /// Callbacks may register, deregister or mutate the container that is
  /// dispatching. Nested mutations dispatch nested passes; nothing is
  /// suppressed.
  pub fn broadcast(&self, mut deliver: impl FnMut(&O)) {
    let snapshot = self.snapshot();
    trace!(observers = snapshot.len(), "broadcast");
    for observer in snapshot.iter() {
      deliver(observer);
    }
  }
}
