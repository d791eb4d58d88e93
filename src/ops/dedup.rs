//! Removal of consecutive duplicates.
//!
//! Unlike the other algorithms this one removes element by element: the list
//! is scanned from the back and every duplicate is taken out with `remove`,
//! so observers see one removal per duplicate, highest index first.

use crate::{error::Result, observable::ObservableList};

/// Remove every element for which `same(element, predecessor)` holds.
/// Returns how many elements were removed.
pub fn dedup_by<T, L, F>(list: &L, mut same: F) -> Result<usize>
where
  L: ObservableList<T> + ?Sized,
  F: FnMut(&T, &T) -> bool,
{
  let mut removed = 0;
  for current in (1..list.len()).rev() {
    let later = list.get(current)?;
    let earlier = list.get(current - 1)?;
    if same(&later, &earlier) {
      list.remove(current)?;
      removed += 1;
    }
  }
  Ok(removed)
}

/// Remove consecutive equal elements.
///
/// ```rust
/// use rxcollections::prelude::*;
///
/// let list = ListHandle::wrap(vec![1, 1, 2, 2, 3]);
/// assert_eq!(ops::dedup(&list), Ok(2));
/// assert_eq!(list.to_vec(), vec![1, 2, 3]);
/// ```
pub fn dedup<T, L>(list: &L) -> Result<usize>
where
  T: PartialEq,
  L: ObservableList<T> + ?Sized,
{
  dedup_by(list, |a, b| a == b)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    list::ListHandle,
    test_support::{ListEvent, Recorder},
  };

  #[test]
  fn removes_duplicates_from_the_back() {
    let list = ListHandle::wrap(vec![1, 1, 2, 2, 3]);
    let recorder = Recorder::new();
    list.add_observer(recorder.clone());

    assert_eq!(dedup(&list), Ok(2));
    assert_eq!(list.to_vec(), vec![1, 2, 3]);
    assert_eq!(
      recorder.take(),
      vec![
        ListEvent::Removed { index: 3, removed: vec![2] },
        ListEvent::Removed { index: 1, removed: vec![1] },
      ]
    );
  }

  #[test]
  fn runs_collapse_to_their_first_element() {
    let list = ListHandle::wrap(vec!["a", "A", "a", "b"]);
    let removed = dedup_by(&list, |a: &&str, b: &&str| a.eq_ignore_ascii_case(b)).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(list.to_vec(), vec!["a", "b"]);
  }

  #[test]
  fn never_matching_predicate_is_silent() {
    let list = ListHandle::wrap(vec![1, 1, 1]);
    let recorder = Recorder::new();
    list.add_observer(recorder.clone());
    assert_eq!(dedup_by(&list, |_, _| false), Ok(0));
    assert_eq!(list.to_vec(), vec![1, 1, 1]);
    assert!(recorder.take().is_empty());
  }

  #[test]
  fn short_lists_are_untouched() {
    assert_eq!(dedup(&ListHandle::<i32>::new()), Ok(0));
    assert_eq!(dedup(&ListHandle::wrap(vec![1])), Ok(0));
  }
}
