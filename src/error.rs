//! Error kinds reported by observable containers and the bulk algorithms.
//!
//! Every failure is reported synchronously to the caller of the operation
//! that detected it, before any mutation or notification takes place.

use thiserror::Error;

/// Errors raised by observable containers, their views and the algorithms in
/// [`ops`](crate::ops).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
  /// An index-based read, write or change report fell outside the valid
  /// range of the container.
  #[error("index {index} out of range for length {len}")]
  OutOfRange { index: usize, len: usize },

  /// A write was attempted on an unmodifiable view.
  #[error("`{operation}` is not supported by an unmodifiable view")]
  Unsupported { operation: &'static str },

  /// `copy` was asked to write a source that does not fit the destination.
  #[error("source of length {source_len} does not fit destination of length {dest_len}")]
  SizeMismatch { source_len: usize, dest_len: usize },

  /// `remove` was called on a cursor that is not positioned on an element.
  #[error("cursor is not positioned on an element")]
  InvalidIteratorState,

  /// A sub-list was used after its parent was structurally modified by
  /// someone other than the sub-list itself.
  #[error("sub-list is stale: its parent was structurally modified")]
  StaleSubList,
}

/// Result alias used throughout the crate.
pub type Result<T, E = CollectionError> = std::result::Result<T, E>;

impl CollectionError {
  /// Ensure `index` addresses an existing element (`index < len`).
  #[inline]
  pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
      Ok(())
    } else {
      Err(Self::OutOfRange { index, len })
    }
  }

  /// Ensure `index` is a valid insertion point (`index <= len`).
  #[inline]
  pub(crate) fn check_position(index: usize, len: usize) -> Result<()> {
    if index <= len {
      Ok(())
    } else {
      Err(Self::OutOfRange { index, len })
    }
  }

  /// Ensure `from..to` is a well formed range inside `0..=len`.
  pub(crate) fn check_range(from: usize, to: usize, len: usize) -> Result<()> {
    if to > len {
      Err(Self::OutOfRange { index: to, len })
    } else if from > to {
      Err(Self::OutOfRange { index: from, len: to })
    } else {
      Ok(())
    }
  }

  pub(crate) fn unsupported(operation: &'static str) -> Self { Self::Unsupported { operation } }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn index_checks() {
    assert!(CollectionError::check_index(0, 1).is_ok());
    assert_eq!(
      CollectionError::check_index(1, 1),
      Err(CollectionError::OutOfRange { index: 1, len: 1 })
    );
    assert!(CollectionError::check_position(1, 1).is_ok());
    assert!(CollectionError::check_position(2, 1).is_err());
  }

  #[test]
  fn range_checks() {
    assert!(CollectionError::check_range(0, 0, 0).is_ok());
    assert!(CollectionError::check_range(1, 3, 3).is_ok());
    assert_eq!(
      CollectionError::check_range(0, 4, 3),
      Err(CollectionError::OutOfRange { index: 4, len: 3 })
    );
    assert!(CollectionError::check_range(2, 1, 3).is_err());
  }

  #[test]
  fn messages() {
    assert_eq!(
      CollectionError::unsupported("push").to_string(),
      "`push` is not supported by an unmodifiable view"
    );
    assert_eq!(
      CollectionError::SizeMismatch { source_len: 3, dest_len: 2 }.to_string(),
      "source of length 3 does not fit destination of length 2"
    );
  }
}
