use std::{fmt, sync::Arc};

use parking_lot::Mutex;
use tracing::debug;

use super::ListHandle;
use crate::{
  error::{CollectionError, Result},
  observable::ObservableList,
  observer::{ListChange, ListObserver},
  registry::ObserverRegistry,
};

/// Live window over a contiguous range of a [`ListHandle`].
///
/// Every write is performed through the parent's observable surface, so the
/// parent's observers see it with parent indices. Observers registered on the
/// window itself are notified with window indices, and only for writes made
/// through this window.
///
/// The window remembers how many structural changes its parent had when it
/// last touched it. Once the parent gains or loses elements by any other
/// route, every further access fails with [`CollectionError::StaleSubList`].
/// Replacing a parent element with `set` keeps the window valid.
///
/// A window never reports element property changes, even over a list built
/// with [`observable_list_helper`](crate::factory::observable_list_helper):
/// its `supports_element_property_changed` is `false` and property changes
/// reported on the parent are not forwarded to the window's observers.
pub struct SubList<T> {
  parent: ListHandle<T>,
  offset: usize,
  window: Mutex<Window>,
  observers: ObserverRegistry<dyn ListObserver<T>>,
}

#[derive(Clone, Copy, Debug)]
struct Window {
  len: usize,
  expected_changes: usize,
}

impl<T> SubList<T>
where
  T: Clone + Send + Sync + 'static,
{
  pub(crate) fn new(parent: ListHandle<T>, from: usize, to: usize) -> Self {
    let expected_changes = parent.structural_changes();
    Self {
      parent,
      offset: from,
      window: Mutex::new(Window { len: to - from, expected_changes }),
      observers: ObserverRegistry::new(),
    }
  }

  /// Whether the parent changed structurally behind this window's back.
  pub fn is_stale(&self) -> bool {
    self.parent.structural_changes() != self.window.lock().expected_changes
  }

  fn window(&self) -> Result<Window> {
    let window = *self.window.lock();
    if self.parent.structural_changes() != window.expected_changes {
      debug!(offset = self.offset, len = window.len, "sub-list used after parent changed");
      return Err(CollectionError::StaleSubList);
    }
    Ok(window)
  }

  /// Record one structural write of our own.
  fn resized(&self, added: usize, removed: usize) {
    let mut window = self.window.lock();
    window.len = window.len + added - removed;
    window.expected_changes += 1;
  }

  fn dispatch(&self, change: ListChange<'_, T>) {
    self
      .observers
      .broadcast(|observer| change.notify(observer, self));
  }
}

impl<T> ObservableList<T> for SubList<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// The last known length; a stale window keeps reporting it.
  fn len(&self) -> usize { self.window.lock().len }

  fn get(&self, index: usize) -> Result<T> {
    let window = self.window()?;
    CollectionError::check_index(index, window.len)?;
    self.parent.get(self.offset + index)
  }

  /// Elements of the parent under the window, clamped to the parent's
  /// current length.
  fn to_vec(&self) -> Vec<T> {
    let len = self.len();
    let mut elements = self.parent.to_vec();
    elements.truncate(self.offset + len);
    elements.drain(..self.offset.min(elements.len()));
    elements
  }

  fn set(&self, index: usize, value: T) -> Result<T> {
    let window = self.window()?;
    CollectionError::check_index(index, window.len)?;
    let old = self.parent.set(self.offset + index, value)?;
    self.dispatch(ListChange::ElementReplaced { index, old: &old });
    Ok(old)
  }

  fn insert(&self, index: usize, value: T) -> Result<()> {
    let window = self.window()?;
    CollectionError::check_position(index, window.len)?;
    self.parent.insert(self.offset + index, value)?;
    self.resized(1, 0);
    self.dispatch(ListChange::ElementsAdded { index, count: 1 });
    Ok(())
  }

  fn push(&self, value: T) -> Result<()> {
    let window = self.window()?;
    self.insert(window.len, value)
  }

  fn insert_all(&self, index: usize, values: Vec<T>) -> Result<bool> {
    let window = self.window()?;
    CollectionError::check_position(index, window.len)?;
    let count = values.len();
    if !self.parent.insert_all(self.offset + index, values)? {
      return Ok(false);
    }
    self.resized(count, 0);
    self.dispatch(ListChange::ElementsAdded { index, count });
    Ok(true)
  }

  fn push_all(&self, values: Vec<T>) -> Result<bool> {
    let window = self.window()?;
    self.insert_all(window.len, values)
  }

  fn remove(&self, index: usize) -> Result<T> {
    let window = self.window()?;
    CollectionError::check_index(index, window.len)?;
    let removed = self.parent.remove(self.offset + index)?;
    self.resized(0, 1);
    self.dispatch(ListChange::removed_one(index, &removed));
    Ok(removed)
  }

  fn remove_range(&self, from: usize, to: usize) -> Result<Vec<T>> {
    let window = self.window()?;
    CollectionError::check_range(from, to, window.len)?;
    let removed = self
      .parent
      .remove_range(self.offset + from, self.offset + to)?;
    if !removed.is_empty() {
      self.resized(0, removed.len());
      self.dispatch(ListChange::ElementsRemoved { index: from, removed: &removed });
    }
    Ok(removed)
  }

  fn clear(&self) -> Result<()> {
    let window = self.window()?;
    self.remove_range(0, window.len).map(drop)
  }

  /// A nested window addresses the same parent directly. Writes through it
  /// make this window stale.
  fn sub_list(&self, from: usize, to: usize) -> Result<Arc<dyn ObservableList<T>>> {
    let window = self.window()?;
    CollectionError::check_range(from, to, window.len)?;
    Ok(Arc::new(SubList::new(self.parent.clone(), self.offset + from, self.offset + to)))
  }

  fn add_observer(&self, observer: Arc<dyn ListObserver<T>>) { self.observers.register(observer); }

  fn remove_observer(&self, observer: &Arc<dyn ListObserver<T>>) -> bool {
    self.observers.deregister(observer)
  }

  fn supports_element_property_changed(&self) -> bool { false }
}

impl<T> fmt::Debug for SubList<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SubList")
      .field("offset", &self.offset)
      .field("window", &*self.window.lock())
      .field("observers", &self.observers)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    list::ListHelper,
    test_support::{ListEvent, Recorder},
  };

  fn fixture() -> (ListHandle<i32>, Arc<dyn ObservableList<i32>>) {
    let parent = ListHandle::wrap(vec![0, 1, 2, 3, 4, 5]);
    let window = parent.sub_list(2, 5).unwrap();
    (parent, window)
  }

  #[test]
  fn reads_through_to_parent() {
    let (_parent, window) = fixture();
    assert_eq!(window.len(), 3);
    assert_eq!(window.to_vec(), vec![2, 3, 4]);
    assert_eq!(window.get(0), Ok(2));
    assert_eq!(window.get(3), Err(CollectionError::OutOfRange { index: 3, len: 3 }));
  }

  #[test]
  fn writes_notify_parent_with_absolute_indices() {
    let (parent, window) = fixture();
    let parent_events = Recorder::new();
    let window_events = Recorder::new();
    parent.add_observer(parent_events.clone());
    window.add_observer(window_events.clone());

    window.insert(1, 10).unwrap();
    window.set(0, 20).unwrap();
    window.remove(3).unwrap();
    assert_eq!(window.to_vec(), vec![20, 10, 3]);
    assert_eq!(parent.to_vec(), vec![0, 1, 20, 10, 3, 5]);

    assert_eq!(
      parent_events.take(),
      vec![
        ListEvent::Added { index: 3, count: 1 },
        ListEvent::Replaced { index: 2, old: 2 },
        ListEvent::Removed { index: 5, removed: vec![4] },
      ]
    );
    assert_eq!(
      window_events.take(),
      vec![
        ListEvent::Added { index: 1, count: 1 },
        ListEvent::Replaced { index: 0, old: 2 },
        ListEvent::Removed { index: 3, removed: vec![4] },
      ]
    );
  }

  #[test]
  fn clear_removes_only_the_window() {
    let (parent, window) = fixture();
    let parent_events = Recorder::new();
    parent.add_observer(parent_events.clone());

    window.clear().unwrap();
    assert!(window.is_empty());
    assert_eq!(parent.to_vec(), vec![0, 1, 5]);
    assert_eq!(parent_events.take(), vec![ListEvent::Removed { index: 2, removed: vec![2, 3, 4] }]);

    window.push(7).unwrap();
    assert_eq!(parent.to_vec(), vec![0, 1, 7, 5]);
  }

  #[test]
  fn parent_structural_change_makes_window_stale() {
    let (parent, window) = fixture();
    parent.push(6).unwrap();
    assert_eq!(window.get(0), Err(CollectionError::StaleSubList));
    assert_eq!(window.push(1), Err(CollectionError::StaleSubList));
    assert_eq!(window.clear(), Err(CollectionError::StaleSubList));
    assert_eq!(parent.to_vec(), vec![0, 1, 2, 3, 4, 5, 6]);
  }

  #[test]
  fn parent_replacement_keeps_window_valid() {
    let (parent, window) = fixture();
    parent.set(3, 30).unwrap();
    assert_eq!(window.to_vec(), vec![2, 30, 4]);
    assert_eq!(window.set(1, 31), Ok(30));
  }

  #[test]
  fn nested_window_shares_the_parent() {
    let (parent, window) = fixture();
    let nested = window.sub_list(1, 3).unwrap();
    assert_eq!(nested.to_vec(), vec![3, 4]);
    nested.remove(0).unwrap();
    assert_eq!(parent.to_vec(), vec![0, 1, 2, 4, 5]);
    assert_eq!(window.get(0), Err(CollectionError::StaleSubList));
  }

  #[test]
  fn window_rejects_bad_ranges() {
    let parent = ListHandle::wrap(vec![1, 2]);
    assert!(parent.sub_list(0, 3).is_err());
    assert!(parent.sub_list(2, 1).is_err());
    let empty = parent.sub_list(2, 2).unwrap();
    assert_eq!(empty.insert_all(0, vec![]), Ok(false));
    assert!(!empty.supports_element_property_changed());
  }

  #[test]
  fn property_changes_stay_on_the_parent() {
    let helper = ListHelper::new(Box::new(vec![1, 2, 3]));
    let parent = helper.list().clone();
    let window = parent.sub_list(0, 2).unwrap();
    let parent_events = Recorder::new();
    let window_events = Recorder::<ListEvent<i32>>::new();
    parent.add_observer(parent_events.clone());
    window.add_observer(window_events.clone());

    assert!(parent.supports_element_property_changed());
    assert!(!window.supports_element_property_changed());
    helper.report_element_changed(1).unwrap();
    assert_eq!(parent_events.take(), vec![ListEvent::PropertyChanged { index: 1 }]);
    assert!(window_events.take().is_empty());
    assert_eq!(window.to_vec(), vec![1, 2]);
  }
}
