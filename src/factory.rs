//! Constructors for observable containers
//!
//! Each factory takes ownership of a delegate and returns the observable
//! container around it. The delegate is reachable only through the container
//! from then on, so every mutation is observed.
//!
//! | Function | Returns |
//! |----------|---------|
//! | [`observable_list`] | [`ListHandle`] over any [`Sequence`] |
//! | [`observable_array_list`] | empty [`ListHandle`] over a `Vec` |
//! | [`observable_list_helper`] | [`ListHelper`], a list that reports element changes |
//! | [`observable_set`] | [`SetHandle`] over any [`SetStorage`] |
//! | [`observable_map`] | [`MapHandle`] over any [`MapStorage`] |
//! | [`unmodifiable_list`] | read-only [`UnmodifiableList`] over a list |
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use rxcollections::prelude::*;
//!
//! let helper = observable_list_helper(vec!["a", "b"]);
//! let list = helper.list().clone();
//! assert!(list.supports_element_property_changed());
//! helper.report_element_changed(1).unwrap();
//!
//! let map = observable_map(BTreeMap::new());
//! assert_eq!(map.put("k", 1), None);
//! ```

use std::sync::Arc;

use crate::{
  list::{ListHandle, ListHelper},
  map::MapHandle,
  observable::ObservableList,
  set::SetHandle,
  storage::{MapStorage, SetStorage, Sequence},
  unmodifiable::UnmodifiableList,
};

pub fn observable_list<T>(storage: impl Sequence<T> + 'static) -> ListHandle<T>
where
  T: Clone + Send + Sync + 'static,
{
  ListHandle::wrap(storage)
}

pub fn observable_array_list<T>() -> ListHandle<T>
where
  T: Clone + Send + Sync + 'static,
{
  ListHandle::new()
}

/// List whose owner can report in-place element changes through the
/// returned [`ListHelper`]. Share [`ListHelper::list`] with observers and
/// keep the helper itself private.
pub fn observable_list_helper<T>(storage: impl Sequence<T> + 'static) -> ListHelper<T>
where
  T: Clone + Send + Sync + 'static,
{
  ListHelper::new(Box::new(storage))
}

pub fn observable_set<T>(storage: impl SetStorage<T> + 'static) -> SetHandle<T>
where
  T: Clone + Send + Sync + 'static,
{
  SetHandle::wrap(storage)
}

pub fn observable_map<K, V>(storage: impl MapStorage<K, V> + 'static) -> MapHandle<K, V>
where
  K: Clone + Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  MapHandle::wrap(storage)
}

pub fn unmodifiable_list<T>(list: impl ObservableList<T> + 'static) -> Arc<UnmodifiableList<T>>
where
  T: Clone + Send + Sync + 'static,
{
  UnmodifiableList::new(list)
}
