//! Entries stored in a tree and the handles that refer to them.

use std::sync::atomic::{AtomicU64, Ordering};
use super::node::NodeId;

/// Identity of a tree instance.
///
/// Every tree (including a clone, and a tree after `clear`) draws a fresh identity so that
/// handles issued by one instance are never accepted by another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TreeId(u64);

impl TreeId {
    pub(crate) fn next() -> TreeId {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        TreeId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A stable reference to an entry in a tree.
///
/// A handle stays valid across every rebalancing of the tree and is invalidated only when its
/// entry is removed or the tree is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) tree: TreeId,
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl Handle {
    /// Returns the identity of the tree that issued the handle.
    pub fn tree(&self) -> TreeId { self.tree }
}

/// A key-value pair stored in a tree.
///
/// The key is immutable for as long as the entry lives in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<K, V> {
    key: K,
    value: V,
    handle: Handle,
    // back-reference to the node currently holding this entry
    node: NodeId,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V, handle: Handle, node: NodeId) -> Self {
        Entry { key: key, value: value, handle: handle, node: node }
    }

    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K { &self.key }

    /// Returns a reference to the entry's value.
    pub fn value(&self) -> &V { &self.value }

    /// Returns the handle through which the entry can be looked up or removed.
    pub fn handle(&self) -> Handle { self.handle }

    /// Consumes the entry, returning its key and value.
    pub fn into_key_value(self) -> (K, V) { (self.key, self.value) }

    pub(crate) fn value_mut(&mut self) -> &mut V { &mut self.value }

    pub(crate) fn node(&self) -> NodeId { self.node }

    pub(crate) fn set_node(&mut self, node: NodeId) { self.node = node; }

    pub(crate) fn set_tree(&mut self, tree: TreeId) { self.handle.tree = tree; }
}
