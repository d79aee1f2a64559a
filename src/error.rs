use std::io;
use thiserror::Error;
use super::entry::Handle;

/// Errors reported by tree operations.
///
/// A failed operation leaves the tree exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The key does not compare equal to itself under the tree's comparator, so it has no
    /// place in the tree's order.
    #[error("key is not comparable under the tree's ordering")]
    InvalidKey,
    /// The handle does not refer to an entry currently stored in this tree.
    #[error("entry {0:?} does not belong to this tree")]
    InvalidEntry(Handle),
}

/// Result type for tree operations.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Errors reported while building a word index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The input could not be read.
    #[error("failed to read input")]
    Io(#[from] io::Error),
    /// The index tree rejected an operation.
    #[error(transparent)]
    Tree(#[from] Error),
}
