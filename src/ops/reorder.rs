//! Algorithms that permute a list.
//!
//! `rotate`, `reverse` and `sort` compute the new order from a snapshot and
//! swap it in with one `clear` and one `push_all`, so observers see at most one
//! removal and one addition. A call that leaves the order as it was fires
//! nothing. `shuffle` swaps in place with `set` instead, and every swap fires
//! two replacements.

use std::cmp::Ordering;

use super::replace_contents;
use crate::{error::Result, observable::ObservableList};

/// Source of uniform random indices for [`shuffle`].
pub trait RandomSource {
  /// Uniform index in `0..bound`. `bound` is never zero.
  fn next_index(&mut self, bound: usize) -> usize;
}

#[cfg(feature = "rand")]
impl<R: rand::Rng + ?Sized> RandomSource for R {
  #[inline]
  fn next_index(&mut self, bound: usize) -> usize { self.gen_range(0..bound) }
}

/// Rotate the elements `distance` places towards the end, wrapping around.
/// Negative distances rotate towards the front.
///
/// ```rust
/// use rxcollections::prelude::*;
///
/// let list = ListHandle::wrap(vec![1, 2, 3, 4, 5]);
/// ops::rotate(&list, 2).unwrap();
/// assert_eq!(list.to_vec(), vec![4, 5, 1, 2, 3]);
/// ```
pub fn rotate<T, L>(list: &L, distance: isize) -> Result<()>
where
  T: Clone,
  L: ObservableList<T> + ?Sized,
{
  let mut contents = list.to_vec();
  let size = contents.len();
  if size == 0 {
    return Ok(());
  }
  let distance = distance.rem_euclid(size as isize) as usize;
  if distance == 0 {
    return Ok(());
  }

  // Follow each displacement cycle, parking the displaced element at the
  // cycle start until the cycle closes.
  let mut moved = 0;
  let mut cycle_start = 0;
  while moved != size {
    let mut i = cycle_start;
    loop {
      i = (i + distance) % size;
      contents.swap(cycle_start, i);
      moved += 1;
      if i == cycle_start {
        break;
      }
    }
    cycle_start += 1;
  }
  replace_contents(list, contents)
}

pub fn reverse<T, L>(list: &L) -> Result<()>
where
  T: Clone,
  L: ObservableList<T> + ?Sized,
{
  let mut contents = list.to_vec();
  if contents.len() < 2 {
    return Ok(());
  }
  contents.reverse();
  replace_contents(list, contents)
}

/// Stable sort by `compare`.
pub fn sort_by<T, L, F>(list: &L, mut compare: F) -> Result<()>
where
  T: Clone,
  L: ObservableList<T> + ?Sized,
  F: FnMut(&T, &T) -> Ordering,
{
  let contents = list.to_vec();
  let mut order: Vec<usize> = (0..contents.len()).collect();
  order.sort_by(|&a, &b| compare(&contents[a], &contents[b]));
  if order.iter().enumerate().all(|(at, &from)| at == from) {
    return Ok(());
  }

  let mut slots: Vec<Option<T>> = contents.into_iter().map(Some).collect();
  let sorted = order
    .into_iter()
    .filter_map(|from| slots[from].take())
    .collect();
  replace_contents(list, sorted)
}

/// Stable sort by the natural order of `T`.
pub fn sort<T, L>(list: &L) -> Result<()>
where
  T: Clone + Ord,
  L: ObservableList<T> + ?Sized,
{
  sort_by(list, T::cmp)
}

/// Fisher-Yates shuffle performed with `set`, one swap per position.
pub fn shuffle<T, L, R>(list: &L, rng: &mut R) -> Result<()>
where
  L: ObservableList<T> + ?Sized,
  R: RandomSource + ?Sized,
{
  for bound in (2..=list.len()).rev() {
    let from = bound - 1;
    let to = rng.next_index(bound);
    let displaced = list.get(from)?;
    let incoming = list.get(to)?;
    list.set(from, incoming)?;
    list.set(to, displaced)?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::{collections::VecDeque, sync::Arc};

  use super::*;
  use crate::{
    list::ListHandle,
    test_support::{ListEvent, Recorder},
  };

  /// Replays a fixed sequence of indices.
  struct Scripted(VecDeque<usize>);

  impl RandomSource for Scripted {
    fn next_index(&mut self, bound: usize) -> usize {
      let index = self.0.pop_front().unwrap_or(0);
      assert!(index < bound);
      index
    }
  }

  fn recorded(values: Vec<i32>) -> (ListHandle<i32>, Arc<Recorder<ListEvent<i32>>>) {
    let list = ListHandle::wrap(values);
    let recorder = Recorder::new();
    list.add_observer(recorder.clone());
    (list, recorder)
  }

  #[test]
  fn rotate_replaces_contents_once() {
    let (list, recorder) = recorded(vec![1, 2, 3, 4, 5]);
    rotate(&list, 2).unwrap();
    assert_eq!(list.to_vec(), vec![4, 5, 1, 2, 3]);
    assert_eq!(
      recorder.take(),
      vec![
        ListEvent::Removed { index: 0, removed: vec![1, 2, 3, 4, 5] },
        ListEvent::Added { index: 0, count: 5 },
      ]
    );
  }

  #[test]
  fn rotate_normalizes_distance() {
    let list = ListHandle::wrap(vec![1, 2, 3, 4, 5, 6]);
    rotate(&list, -1).unwrap();
    assert_eq!(list.to_vec(), vec![2, 3, 4, 5, 6, 1]);
    rotate(&list, 13).unwrap();
    assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5, 6]);
    // gcd(6, 4) = 2 cycles
    rotate(&list, 4).unwrap();
    assert_eq!(list.to_vec(), vec![3, 4, 5, 6, 1, 2]);
  }

  #[test]
  fn rotate_by_zero_or_empty_is_silent() {
    let (list, recorder) = recorded(vec![1, 2, 3]);
    rotate(&list, 0).unwrap();
    rotate(&list, 3).unwrap();
    rotate(&list, -3).unwrap();
    rotate(&ListHandle::<i32>::new(), 5).unwrap();
    assert!(recorder.take().is_empty());
  }

  #[test]
  fn reverse_replaces_contents() {
    let (list, recorder) = recorded(vec![1, 2, 3]);
    reverse(&list).unwrap();
    assert_eq!(list.to_vec(), vec![3, 2, 1]);
    assert_eq!(recorder.take().len(), 2);

    let (single, recorder) = recorded(vec![1]);
    reverse(&single).unwrap();
    assert!(recorder.take().is_empty());
  }

  #[test]
  fn sort_fires_only_when_order_changes() {
    let (list, recorder) = recorded(vec![3, 1, 2]);
    sort(&list).unwrap();
    assert_eq!(list.to_vec(), vec![1, 2, 3]);
    assert_eq!(recorder.take().len(), 2);

    sort(&list).unwrap();
    assert!(recorder.take().is_empty());
  }

  #[test]
  fn sort_by_is_stable() {
    let list = ListHandle::wrap(vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')]);
    sort_by(&list, |a, b| a.0.cmp(&b.0)).unwrap();
    assert_eq!(list.to_vec(), vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
  }

  #[test]
  fn sort_with_equal_keys_in_place_is_silent() {
    let (list, recorder) = recorded(vec![2, 1, 1]);
    sort_by(&list, |_, _| Ordering::Equal).unwrap();
    assert_eq!(list.to_vec(), vec![2, 1, 1]);
    assert!(recorder.take().is_empty());
  }

  #[test]
  fn shuffle_swaps_with_replacements() {
    let (list, recorder) = recorded(vec![1, 2, 3]);
    // bound 3 picks 0, bound 2 picks 1
    shuffle(&list, &mut Scripted(VecDeque::from([0, 1]))).unwrap();
    assert_eq!(list.to_vec(), vec![3, 2, 1]);
    assert_eq!(
      recorder.take(),
      vec![
        ListEvent::Replaced { index: 2, old: 3 },
        ListEvent::Replaced { index: 0, old: 1 },
        ListEvent::Replaced { index: 1, old: 2 },
        ListEvent::Replaced { index: 1, old: 2 },
      ]
    );
  }

  #[test]
  fn shuffle_of_short_lists_is_silent() {
    let (list, recorder) = recorded(vec![1]);
    shuffle(&list, &mut Scripted(VecDeque::new())).unwrap();
    assert!(recorder.take().is_empty());
  }

  #[cfg(feature = "rand")]
  #[test]
  fn shuffle_with_rand_keeps_elements() {
    use rand::{rngs::StdRng, SeedableRng};

    let list: ListHandle<i32> = (0..32).collect();
    shuffle(&list, &mut StdRng::seed_from_u64(7)).unwrap();
    let mut elements = list.to_vec();
    elements.sort();
    assert_eq!(elements, (0..32).collect::<Vec<_>>());
  }
}
