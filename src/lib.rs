//! # rxcollections: observable collections for Rust
//!
//! Lists, sets and maps that notify registered observers synchronously on
//! every change, with weak subscriptions, read-only views and bulk algorithms
//! that control how many changes they announce.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxcollections::prelude::*;
//!
//! let list = observable_array_list();
//! let observer = list_observer(|list: &dyn ObservableList<i32>, change| {
//!   println!("{} -> {:?}", change.kind(), list.to_vec());
//! });
//! list.add_observer(observer.clone());
//!
//! list.push_all(vec![3, 1, 2]).unwrap();
//! list.sort().unwrap();
//! assert_eq!(list.to_vec(), vec![1, 2, 3]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ListHandle`] / [`SetHandle`] / [`MapHandle`] | Observable containers over a delegate |
//! | [`ListObserver`] / [`SetObserver`] / [`MapObserver`] | Receive one callback per change |
//! | [`WeakObserver`] | Registers an observer without keeping it alive |
//! | [`UnmodifiableList`] | Read-only view relaying another list's changes |
//! | [`ops`] | Bulk algorithms: rotate, shuffle, sort, dedup, fill, copy, ... |
//!
//! ## Notification model
//!
//! Observers run on the thread performing the write, before the write
//! returns, in registration order. Each pass works on a snapshot of the
//! observers, so registering or removing observers from a callback affects
//! later passes only. Callbacks may write to the container that notified
//! them; the nested write is announced before the outer pass resumes.
//!
//! ## Feature Flags
//!
//! - **`rand`** (default): any [`rand::Rng`] can drive [`ops::shuffle`]
//!
//! [`ListHandle`]: list::ListHandle
//! [`SetHandle`]: set::SetHandle
//! [`MapHandle`]: map::MapHandle
//! [`ListObserver`]: observer::ListObserver
//! [`SetObserver`]: observer::SetObserver
//! [`MapObserver`]: observer::MapObserver
//! [`WeakObserver`]: subscription::WeakObserver
//! [`UnmodifiableList`]: unmodifiable::UnmodifiableList

pub mod cursor;
pub mod error;
pub mod factory;
pub mod list;
pub mod map;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod registry;
pub mod set;
pub mod storage;
pub mod subscription;
pub mod unmodifiable;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the prelude module
pub use prelude::*;
