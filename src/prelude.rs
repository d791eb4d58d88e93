//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Containers
pub use crate::list::{ListHandle, ListHelper, SubList};
pub use crate::map::MapHandle;
pub use crate::set::SetHandle;
pub use crate::unmodifiable::UnmodifiableList;
// Contracts and delegates
pub use crate::observable::{ObservableList, ObservableMap, ObservableSet};
pub use crate::storage::{MapStorage, Sequence, SetStorage};
// Observers
pub use crate::observer::{
  list_observer, map_observer, set_observer, FnObserver, ListChange, ListObserver, MapChange,
  MapObserver, SetChange, SetObserver,
};
pub use crate::subscription::{SubscriptionState, WeakObserver};
// Algorithms
pub use crate::ops::{self, ListOps, RandomSource};
pub use crate::{
  cursor::{Cursor, CursorState, MapCursor, SetCursor},
  error::{CollectionError, Result},
  factory::*,
  registry::ObserverRegistry,
};
