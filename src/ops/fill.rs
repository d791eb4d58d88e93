//! Algorithms that overwrite elements.
//!
//! Each computes the new contents from a snapshot and swaps them in with one
//! `clear` and one `push_all`. Preconditions are checked first, so a failed
//! call leaves the list untouched.

use super::replace_contents;
use crate::{
  error::{CollectionError, Result},
  observable::ObservableList,
};

/// Replace every element with a clone of `value`.
pub fn fill<T, L>(list: &L, value: T) -> Result<()>
where
  T: Clone,
  L: ObservableList<T> + ?Sized,
{
  let len = list.len();
  if len == 0 {
    return Ok(());
  }
  replace_contents(list, vec![value; len])
}

/// Overwrite the first `src.len()` elements of `dest` with `src`.
///
/// Fails with [`CollectionError::SizeMismatch`] when `src` is longer than
/// `dest`.
pub fn copy<T, L>(dest: &L, src: &[T]) -> Result<()>
where
  T: Clone,
  L: ObservableList<T> + ?Sized,
{
  let mut contents = dest.to_vec();
  if src.len() > contents.len() {
    return Err(CollectionError::SizeMismatch { source_len: src.len(), dest_len: contents.len() });
  }
  if src.is_empty() {
    return Ok(());
  }
  contents[..src.len()].clone_from_slice(src);
  replace_contents(dest, contents)
}

/// Replace every element equal to `old` with a clone of `new`. Returns
/// whether anything was replaced; nothing fires otherwise.
pub fn replace_all<T, L>(list: &L, old: &T, new: T) -> Result<bool>
where
  T: Clone + PartialEq,
  L: ObservableList<T> + ?Sized,
{
  let mut contents = list.to_vec();
  let mut modified = false;
  for slot in contents.iter_mut().filter(|slot| *slot == old) {
    *slot = new.clone();
    modified = true;
  }
  if modified {
    replace_contents(list, contents)?;
  }
  Ok(modified)
}
