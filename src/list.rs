//! Observable list
//!
//! [`ListHandle`] owns a [`Sequence`] delegate and fires one
//! [`ListChange`] per mutating call:
//!
//! | call | change |
//! |------|--------|
//! | `set` | `ElementReplaced { index, old }` |
//! | `insert` / `push` | `ElementsAdded { index, count: 1 }` |
//! | `insert_all` / `push_all` | `ElementsAdded { index, count }`, none if empty |
//! | `remove` | `ElementsRemoved { index, removed: [value] }` |
//! | `remove_range` | `ElementsRemoved { from, removed }`, none if empty |
//! | `clear` | `ElementsRemoved { 0, previous contents }`, none if empty |
//!
//! Invalid indices fail with [`CollectionError::OutOfRange`] before anything
//! changes.
//!
//! # Re-entrancy
//!
//! The delegate is locked only while it is mutated; observers run after the
//! lock is released. An observer may therefore read the list or write to it
//! again, which dispatches a nested pass before the outer pass continues.
//!
//! A list wrapping another `ListHandle` holds no lock of its own. It writes
//! through the inner list, which notifies its observers first; those may
//! read or write the outer list as well.

mod sub_list;

use std::{
  fmt,
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  },
};

use parking_lot::Mutex;
pub use sub_list::SubList;
use tracing::trace;

use crate::{
  error::{CollectionError, Result},
  observable::ObservableList,
  observer::{ListChange, ListObserver},
  registry::ObserverRegistry,
  storage::Sequence,
};

/// Shared handle to an observable list.
///
/// Cloning the handle shares the list; it does not copy elements.
pub struct ListHandle<T>(Arc<ListShared<T>>);

struct ListShared<T> {
  delegate: Delegate<T>,
  observers: ObserverRegistry<dyn ListObserver<T>>,
  supports_element_property_changed: bool,
  structural_changes: AtomicUsize,
}

enum Delegate<T> {
  Owned(Mutex<Box<dyn Sequence<T>>>),
  List(ListHandle<T>),
}

impl<T> Clone for ListHandle<T> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> ListHandle<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// Empty list backed by a `Vec`.
  pub fn new() -> Self { Self::wrap(Vec::new()) }

  /// Observable list over `storage`, which it owns from now on.
  pub fn wrap(storage: impl Sequence<T> + 'static) -> Self {
    Self::with_storage(Box::new(storage), false)
  }

  pub(crate) fn with_storage(
    storage: Box<dyn Sequence<T>>, supports_element_property_changed: bool,
  ) -> Self {
    let delegate = match storage.as_list_handle() {
      Some(inner) => Delegate::List(inner),
      None => Delegate::Owned(Mutex::new(storage)),
    };
    Self(Arc::new(ListShared {
      delegate,
      observers: ObserverRegistry::new(),
      supports_element_property_changed,
      structural_changes: AtomicUsize::new(0),
    }))
  }

  #[inline]
  pub fn observer_count(&self) -> usize { self.0.observers.len() }

  /// Whether both handles share the same list.
  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.0, &other.0) }

  /// Iterator over a snapshot of the current elements.
  pub fn iter(&self) -> std::vec::IntoIter<T> { self.to_vec().into_iter() }

  /// Number of insertions and removals applied so far. Replacements do not
  /// count.
  pub(crate) fn structural_changes(&self) -> usize {
    self.0.structural_changes.load(Ordering::Acquire)
  }

  pub(crate) fn fire_element_changed(&self, index: usize) -> Result<()> {
    CollectionError::check_index(index, self.len())?;
    self.dispatch(ListChange::ElementPropertyChanged { index });
    Ok(())
  }

  /// Run `f` on the delegate. An inner list is called without any lock held.
  fn with_delegate<R>(&self, f: impl FnOnce(&mut dyn Sequence<T>) -> R) -> R {
    match &self.0.delegate {
      Delegate::Owned(storage) => f(&mut **storage.lock()),
      Delegate::List(inner) => f(&mut inner.clone()),
    }
  }

  fn append(&self, values: Vec<T>) -> Result<usize> {
    let count = values.len();
    let index = self.with_delegate(|seq| seq.append_all(values))?;
    self.structurally_changed();
    self.dispatch(ListChange::ElementsAdded { index, count });
    Ok(index)
  }

  fn take_all(&self) -> Vec<T> {
    let removed = self.with_delegate(|seq| seq.take_all());
    if !removed.is_empty() {
      self.structurally_changed();
      self.dispatch(ListChange::ElementsRemoved { index: 0, removed: &removed });
    }
    removed
  }

  fn structurally_changed(&self) { self.0.structural_changes.fetch_add(1, Ordering::AcqRel); }

  fn dispatch(&self, change: ListChange<'_, T>) {
    trace!(kind = change.kind(), index = change.index(), "list change");
    self
      .0
      .observers
      .broadcast(|observer| change.notify(observer, self));
  }
}

impl<T> Default for ListHandle<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn default() -> Self { Self::new() }
}

impl<T> ObservableList<T> for ListHandle<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn len(&self) -> usize { self.with_delegate(|seq| seq.size()) }

  fn get(&self, index: usize) -> Result<T> {
    self.with_delegate(|seq| {
      let len = seq.size();
      seq
        .element(index)
        .ok_or(CollectionError::OutOfRange { index, len })
    })
  }

  fn to_vec(&self) -> Vec<T> { self.with_delegate(|seq| seq.snapshot()) }

  fn set(&self, index: usize, value: T) -> Result<T> {
    let old = self.with_delegate(|seq| seq.replace(index, value))?;
    self.dispatch(ListChange::ElementReplaced { index, old: &old });
    Ok(old)
  }

  fn insert(&self, index: usize, value: T) -> Result<()> {
    self.with_delegate(|seq| seq.insert_at(index, value))?;
    self.structurally_changed();
    self.dispatch(ListChange::ElementsAdded { index, count: 1 });
    Ok(())
  }

  fn push(&self, value: T) -> Result<()> { self.append(vec![value]).map(drop) }

  fn insert_all(&self, index: usize, values: Vec<T>) -> Result<bool> {
    if values.is_empty() {
      CollectionError::check_position(index, self.len())?;
      return Ok(false);
    }
    let count = values.len();
    self.with_delegate(|seq| seq.insert_many(index, values))?;
    self.structurally_changed();
    self.dispatch(ListChange::ElementsAdded { index, count });
    Ok(true)
  }

  fn push_all(&self, values: Vec<T>) -> Result<bool> {
    if values.is_empty() {
      return Ok(false);
    }
    self.append(values).map(|_| true)
  }

  fn remove(&self, index: usize) -> Result<T> {
    let removed = self.with_delegate(|seq| seq.remove_at(index))?;
    self.structurally_changed();
    self.dispatch(ListChange::removed_one(index, &removed));
    Ok(removed)
  }

  fn remove_range(&self, from: usize, to: usize) -> Result<Vec<T>> {
    let removed = self.with_delegate(|seq| seq.drain_range(from, to))?;
    if !removed.is_empty() {
      self.structurally_changed();
      self.dispatch(ListChange::ElementsRemoved { index: from, removed: &removed });
    }
    Ok(removed)
  }

  fn clear(&self) -> Result<()> {
    self.take_all();
    Ok(())
  }

  fn sub_list(&self, from: usize, to: usize) -> Result<Arc<dyn ObservableList<T>>> {
    CollectionError::check_range(from, to, self.len())?;
    Ok(Arc::new(SubList::new(self.clone(), from, to)))
  }

  fn add_observer(&self, observer: Arc<dyn ListObserver<T>>) {
    self.0.observers.register(observer);
  }

  fn remove_observer(&self, observer: &Arc<dyn ListObserver<T>>) -> bool {
    self.0.observers.deregister(observer)
  }

  fn supports_element_property_changed(&self) -> bool { self.0.supports_element_property_changed }
}

/// A list handle can be the delegate of another observable list. Writes go
/// through its observable surface, so its own observers are notified too,
/// and the wrapping list never locks it.
impl<T> Sequence<T> for ListHandle<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn size(&self) -> usize { self.len() }

  fn element(&self, index: usize) -> Option<T> { self.get(index).ok() }

  fn replace(&mut self, index: usize, value: T) -> Result<T> { self.set(index, value) }

  fn insert_at(&mut self, index: usize, value: T) -> Result<()> { self.insert(index, value) }

  fn insert_many(&mut self, index: usize, values: Vec<T>) -> Result<()> {
    self.insert_all(index, values).map(drop)
  }

  fn remove_at(&mut self, index: usize) -> Result<T> { self.remove(index) }

  fn drain_range(&mut self, from: usize, to: usize) -> Result<Vec<T>> {
    self.remove_range(from, to)
  }

  fn append_all(&mut self, values: Vec<T>) -> Result<usize> { ListHandle::append(self, values) }

  fn take_all(&mut self) -> Vec<T> { ListHandle::take_all(self) }

  fn snapshot(&self) -> Vec<T> { self.to_vec() }

  fn as_list_handle(&self) -> Option<ListHandle<T>> { Some(self.clone()) }
}

impl<T> FromIterator<T> for ListHandle<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Self::wrap(iter.into_iter().collect::<Vec<_>>())
  }
}

impl<T> fmt::Debug for ListHandle<T>
where
  T: Clone + Send + Sync + fmt::Debug + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ListHandle")
      .field("elements", &self.to_vec())
      .field("observers", &self.observer_count())
      .finish()
  }
}

/// Privileged handle of a list that reports in-place element changes.
///
/// Only the creator of the list holds this handle, so only it can announce
/// that an element was mutated without being replaced.
pub struct ListHelper<T> {
  list: ListHandle<T>,
}

impl<T> ListHelper<T>
where
  T: Clone + Send + Sync + 'static,
{
  pub(crate) fn new(storage: Box<dyn Sequence<T>>) -> Self {
    Self { list: ListHandle::with_storage(storage, true) }
  }

  /// The list this helper reports for. Hand out clones of it freely.
  #[inline]
  pub fn list(&self) -> &ListHandle<T> { &self.list }

  /// Fire `ElementPropertyChanged` for the element at `index`.
  pub fn report_element_changed(&self, index: usize) -> Result<()> {
    self.list.fire_element_changed(index)
  }
}

impl<T> fmt::Debug for ListHelper<T>
where
  T: Clone + Send + Sync + fmt::Debug + 'static,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ListHelper")
      .field("list", &self.list)
      .finish()
  }
}
