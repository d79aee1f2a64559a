use super::entry::{Entry, Handle};
use super::error::Result;

/// An ordered collection of key-value entries.
///
/// Implemented by [`AvlTree`](struct.AvlTree.html); callers that only need to store, look up and
/// walk entries can be written against this trait.
pub trait Dictionary<K, V> {
    /// The in-order iterator returned by [`entries`](#tymethod.entries).
    type Entries<'a>: Iterator<Item = &'a Entry<K, V>> where Self: 'a, K: 'a, V: 'a;

    /// Inserts an entry, returning a reference to it.
    fn insert(&mut self, key: K, value: V) -> Result<&Entry<K, V>>;

    /// Returns an entry whose key is equal to the given key, if any.
    fn find(&self, key: &K) -> Result<Option<&Entry<K, V>>>;

    /// Removes the entry the handle refers to and returns it.
    fn remove(&mut self, handle: Handle) -> Result<Entry<K, V>>;

    /// Returns the number of entries.
    fn size(&self) -> usize;

    /// Returns an iterator over the entries in ascending key order.
    fn entries(&self) -> Self::Entries<'_>;

    /// Checks if the dictionary has no entries.
    fn is_empty(&self) -> bool { self.size() == 0 }
}
