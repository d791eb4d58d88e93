use crate::list::ListHandle;

/// Concatenate lists.
///
/// No input yields a new empty list. A single input is wrapped, not copied:
/// the result writes through to it. Two or more inputs are copied, in order,
/// into a fresh list that is not linked to any of them.
///
/// ```rust
/// use rxcollections::prelude::*;
///
/// let a = ListHandle::wrap(vec![1, 2]);
/// let b = ListHandle::wrap(vec![3]);
/// assert_eq!(ops::concat(&[a.clone(), b]).to_vec(), vec![1, 2, 3]);
///
/// let wrapped = ops::concat(&[a.clone()]);
/// wrapped.push(9).unwrap();
/// assert_eq!(a.to_vec(), vec![1, 2, 9]);
/// ```
pub fn concat<T>(lists: &[ListHandle<T>]) -> ListHandle<T>
where
  T: Clone + Send + Sync + 'static,
{
  match lists {
    [] => ListHandle::new(),
    [only] => ListHandle::wrap(only.clone()),
    _ => lists.iter().flat_map(ListHandle::iter).collect(),
  }
}
