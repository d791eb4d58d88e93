//! Delegate containers
//!
//! An observable container owns exactly one delegate and is its only
//! mutator. The traits here are the capability each container kind needs
//! from its delegate. Implementations are provided for the standard
//! collections; [`Sequence`] is also implemented for
//! [`ListHandle`](crate::list::ListHandle), so an observable list can wrap
//! another one. Method names differ from the container contracts so both can
//! be in scope at once.
//!
//! A list whose delegate is another [`ListHandle`](crate::list::ListHandle)
//! does not lock it: it calls the inner list directly, so observers of the
//! inner list may use the outer one while they are notified.
//!
//! Mutating methods validate their arguments and fail with
//! [`CollectionError::OutOfRange`] before changing anything.

use std::{
  collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
  hash::{BuildHasher, Hash},
};

use crate::{
  error::{CollectionError, Result},
  list::ListHandle,
};

/// Indexed, growable sequence.
pub trait Sequence<T>: Send {
  fn size(&self) -> usize;

  fn element(&self, index: usize) -> Option<T>;

  /// Store `value` at `index`, returning the previous element.
  fn replace(&mut self, index: usize, value: T) -> Result<T>;

  fn insert_at(&mut self, index: usize, value: T) -> Result<()>;

  /// Insert all `values` at `index`, keeping their order.
  fn insert_many(&mut self, index: usize, values: Vec<T>) -> Result<()>;

  fn remove_at(&mut self, index: usize) -> Result<T>;

  /// Remove and return the elements in `from..to`.
  fn drain_range(&mut self, from: usize, to: usize) -> Result<Vec<T>>;

  /// Append `values`, returning the index of the first one.
  fn append_all(&mut self, values: Vec<T>) -> Result<usize> {
    let index = self.size();
    self.insert_many(index, values)?;
    Ok(index)
  }

  /// Remove and return every element.
  fn take_all(&mut self) -> Vec<T> {
    let len = self.size();
    self.drain_range(0, len).unwrap_or_default()
  }

  fn snapshot(&self) -> Vec<T>;

  /// The observable list this sequence is, if any. A list wrapping it
  /// writes through the returned handle instead of locking the sequence.
  fn as_list_handle(&self) -> Option<ListHandle<T>> { None }
}

impl<T: Clone + Send> Sequence<T> for Vec<T> {
  #[inline]
  fn size(&self) -> usize { Vec::len(self) }

  #[inline]
  fn element(&self, index: usize) -> Option<T> { self.as_slice().get(index).cloned() }

  fn replace(&mut self, index: usize, value: T) -> Result<T> {
    let len = Vec::len(self);
    self
      .get_mut(index)
      .map(|slot| std::mem::replace(slot, value))
      .ok_or(CollectionError::OutOfRange { index, len })
  }

  fn insert_at(&mut self, index: usize, value: T) -> Result<()> {
    CollectionError::check_position(index, Vec::len(self))?;
    Vec::insert(self, index, value);
    Ok(())
  }

  fn insert_many(&mut self, index: usize, values: Vec<T>) -> Result<()> {
    CollectionError::check_position(index, Vec::len(self))?;
    self.splice(index..index, values);
    Ok(())
  }

  fn remove_at(&mut self, index: usize) -> Result<T> {
    CollectionError::check_index(index, Vec::len(self))?;
    Ok(Vec::remove(self, index))
  }

  fn drain_range(&mut self, from: usize, to: usize) -> Result<Vec<T>> {
    CollectionError::check_range(from, to, Vec::len(self))?;
    Ok(self.drain(from..to).collect())
  }

  fn take_all(&mut self) -> Vec<T> { std::mem::take(self) }

  fn snapshot(&self) -> Vec<T> { self.clone() }
}

impl<T: Clone + Send> Sequence<T> for VecDeque<T> {
  #[inline]
  fn size(&self) -> usize { VecDeque::len(self) }

  #[inline]
  fn element(&self, index: usize) -> Option<T> { VecDeque::get(self, index).cloned() }

  fn replace(&mut self, index: usize, value: T) -> Result<T> {
    let len = VecDeque::len(self);
    self
      .get_mut(index)
      .map(|slot| std::mem::replace(slot, value))
      .ok_or(CollectionError::OutOfRange { index, len })
  }

  fn insert_at(&mut self, index: usize, value: T) -> Result<()> {
    CollectionError::check_position(index, VecDeque::len(self))?;
    VecDeque::insert(self, index, value);
    Ok(())
  }

  fn insert_many(&mut self, index: usize, values: Vec<T>) -> Result<()> {
    CollectionError::check_position(index, VecDeque::len(self))?;
    let mut tail = self.split_off(index);
    self.extend(values);
    self.append(&mut tail);
    Ok(())
  }

  fn remove_at(&mut self, index: usize) -> Result<T> {
    let len = VecDeque::len(self);
    VecDeque::remove(self, index).ok_or(CollectionError::OutOfRange { index, len })
  }

  fn drain_range(&mut self, from: usize, to: usize) -> Result<Vec<T>> {
    CollectionError::check_range(from, to, VecDeque::len(self))?;
    Ok(self.drain(from..to).collect())
  }

  fn snapshot(&self) -> Vec<T> { self.iter().cloned().collect() }
}

/// Unordered or ordered collection of unique members.
pub trait SetStorage<T>: Send {
  fn len(&self) -> usize;

  fn contains(&self, value: &T) -> bool;

  /// Returns whether `value` was not yet a member.
  fn insert(&mut self, value: T) -> bool;

  /// Remove and return the stored member equal to `value`.
  fn take(&mut self, value: &T) -> Option<T>;

  fn to_vec(&self) -> Vec<T>;
}

impl<T, S> SetStorage<T> for HashSet<T, S>
where
  T: Eq + Hash + Clone + Send,
  S: BuildHasher + Send,
{
  #[inline]
  fn len(&self) -> usize { HashSet::len(self) }

  #[inline]
  fn contains(&self, value: &T) -> bool { HashSet::contains(self, value) }

  #[inline]
  fn insert(&mut self, value: T) -> bool { HashSet::insert(self, value) }

  #[inline]
  fn take(&mut self, value: &T) -> Option<T> { HashSet::take(self, value) }

  fn to_vec(&self) -> Vec<T> { self.iter().cloned().collect() }
}

impl<T: Ord + Clone + Send> SetStorage<T> for BTreeSet<T> {
  #[inline]
  fn len(&self) -> usize { BTreeSet::len(self) }

  #[inline]
  fn contains(&self, value: &T) -> bool { BTreeSet::contains(self, value) }

  #[inline]
  fn insert(&mut self, value: T) -> bool { BTreeSet::insert(self, value) }

  #[inline]
  fn take(&mut self, value: &T) -> Option<T> { BTreeSet::take(self, value) }

  fn to_vec(&self) -> Vec<T> { self.iter().cloned().collect() }
}

/// Key to value mapping.
pub trait MapStorage<K, V>: Send {
  fn len(&self) -> usize;

  fn get(&self, key: &K) -> Option<V>;

  fn contains_key(&self, key: &K) -> bool;

  /// Map `key` to `value`, returning the previous value.
  fn insert(&mut self, key: K, value: V) -> Option<V>;

  fn remove(&mut self, key: &K) -> Option<V>;

  fn keys(&self) -> Vec<K>;

  fn entries(&self) -> Vec<(K, V)>;
}

impl<K, V, S> MapStorage<K, V> for HashMap<K, V, S>
where
  K: Eq + Hash + Clone + Send,
  V: Clone + Send,
  S: BuildHasher + Send,
{
  #[inline]
  fn len(&self) -> usize { HashMap::len(self) }

  #[inline]
  fn get(&self, key: &K) -> Option<V> { HashMap::get(self, key).cloned() }

  #[inline]
  fn contains_key(&self, key: &K) -> bool { HashMap::contains_key(self, key) }

  #[inline]
  fn insert(&mut self, key: K, value: V) -> Option<V> { HashMap::insert(self, key, value) }

  #[inline]
  fn remove(&mut self, key: &K) -> Option<V> { HashMap::remove(self, key) }

  fn keys(&self) -> Vec<K> { HashMap::keys(self).cloned().collect() }

  fn entries(&self) -> Vec<(K, V)> {
    self
      .iter()
      .map(|(k, v)| (k.clone(), v.clone()))
      .collect()
  }
}

impl<K, V> MapStorage<K, V> for BTreeMap<K, V>
where
  K: Ord + Clone + Send,
  V: Clone + Send,
{
  #[inline]
  fn len(&self) -> usize { BTreeMap::len(self) }

  #[inline]
  fn get(&self, key: &K) -> Option<V> { BTreeMap::get(self, key).cloned() }

  #[inline]
  fn contains_key(&self, key: &K) -> bool { BTreeMap::contains_key(self, key) }

  #[inline]
  fn insert(&mut self, key: K, value: V) -> Option<V> { BTreeMap::insert(self, key, value) }

  #[inline]
  fn remove(&mut self, key: &K) -> Option<V> { BTreeMap::remove(self, key) }

  fn keys(&self) -> Vec<K> { BTreeMap::keys(self).cloned().collect() }

  fn entries(&self) -> Vec<(K, V)> {
    self
      .iter()
      .map(|(k, v)| (k.clone(), v.clone()))
      .collect()
  }
}
