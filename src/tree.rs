//! An ordered dictionary based on an AVL tree.

use compare::{Compare, Natural};
use std::fmt::{self, Debug, Display};
use std::iter;
use super::dictionary::Dictionary;
use super::entry::{Entry, Handle, TreeId};
use super::error::{Error, Result};
use super::node::{self, Side};

pub use super::node::{Entries, Iter};

/// An ordered dictionary based on an AVL tree.
///
/// For every node the heights of its two subtrees differ by at most one, so finding, inserting
/// and removing an entry take `O(log n)` comparisons.
///
/// Keys equal under the comparator may be inserted more than once; equal keys are kept in
/// insertion order.
///
/// The behavior of this tree is undefined if a key's ordering relative to any other key changes
/// while the key is in the tree. This is normally only possible through `Cell`, `RefCell`, or
/// unsafe code.
pub struct AvlTree<K, V, C = Natural<K>> where C: Compare<K> {
    tree: node::Tree<K, V>,
    cmp: C,
}

impl<K, V> AvlTree<K, V> where K: Ord {
    /// Creates an empty tree ordered according to the natural order of its keys.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = avl_index::AvlTree::new();
    ///
    /// tree.insert(2, "b").unwrap();
    /// tree.insert(1, "a").unwrap();
    /// tree.insert(3, "c").unwrap();
    ///
    /// let mut it = tree.iter();
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { AvlTree::with_cmp(compare::natural()) }
}

impl<K, V, C> AvlTree<K, V, C> where C: Compare<K> {
    /// Creates an empty tree ordered according to the given comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::{Compare, natural};
    ///
    /// let mut tree = avl_index::AvlTree::with_cmp(natural().rev());
    ///
    /// tree.insert(2, "b").unwrap();
    /// tree.insert(1, "a").unwrap();
    /// tree.insert(3, "c").unwrap();
    ///
    /// let mut it = tree.iter();
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        AvlTree { tree: node::Tree::new(), cmp: cmp }
    }

    /// Returns the identity of this tree instance.
    pub fn id(&self) -> TreeId { self.tree.id() }

    /// Checks if the tree is empty.
    pub fn is_empty(&self) -> bool { self.tree.root().is_none() }

    /// Returns the number of entries in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = avl_index::AvlTree::new();
    /// assert_eq!(tree.len(), 0);
    ///
    /// tree.insert(2, "b").unwrap();
    /// tree.insert(2, "bb").unwrap();
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn len(&self) -> usize { self.tree.len() }

    /// Returns a reference to the tree's comparator.
    pub fn cmp(&self) -> &C { &self.cmp }

    /// Returns the height of the tree: -1 when empty, 0 for a single entry.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = avl_index::AvlTree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// for i in 1..8 { tree.insert(i, ()).unwrap(); }
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> i32 { self.tree.height(self.tree.root()) }

    /// Returns the entry stored at the root of the tree, if any.
    pub fn root(&self) -> Option<&Entry<K, V>> {
        self.tree.root().map(|root| self.tree.entry(root))
    }

    /// Removes all entries from the tree.
    ///
    /// Handles to the removed entries are no longer accepted.
    pub fn clear(&mut self) { self.tree.clear(); }

    fn check_key(&self, key: &K) -> Result<()> {
        if self.cmp.compares_eq(key, key) { Ok(()) } else { Err(Error::InvalidKey) }
    }

    /// Inserts an entry into the tree and returns a reference to it.
    ///
    /// If the tree already contains keys equal to `key`, the new entry is placed after them.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidKey` if the key does not compare equal to itself.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = avl_index::AvlTree::new();
    ///
    /// let handle = tree.insert(1, "a").unwrap().handle();
    /// assert_eq!(tree.lookup(handle).map(|e| *e.value()), Some("a"));
    ///
    /// let mut floats = avl_index::AvlTree::with_cmp(|l: &f64, r: &f64| {
    ///     l.partial_cmp(r).unwrap_or(std::cmp::Ordering::Less)
    /// });
    /// assert_eq!(floats.insert(f64::NAN, ()).err(), Some(avl_index::Error::InvalidKey));
    /// assert!(floats.is_empty());
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<&Entry<K, V>> {
        self.check_key(&key)?;
        let node = self.tree.insert(&self.cmp, key, value);
        self.tree.rebalance(Some(node));
        Ok(self.tree.entry(node))
    }

    /// Returns the earliest-inserted entry whose key is equal to the given key, or `None` if the
    /// tree does not contain the key.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidKey` if the key does not compare equal to itself.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = avl_index::AvlTree::new();
    /// tree.insert("b", 1).unwrap();
    /// tree.insert("a", 2).unwrap();
    /// tree.insert("b", 3).unwrap();
    ///
    /// assert_eq!(tree.find(&"b").unwrap().map(|e| *e.value()), Some(1));
    /// assert!(tree.find(&"c").unwrap().is_none());
    /// ```
    pub fn find(&self, key: &K) -> Result<Option<&Entry<K, V>>> {
        self.check_key(key)?;
        Ok(self.tree.find(&self.cmp, key).map(|node| self.tree.entry(node)))
    }

    /// Returns an iterator over every entry whose key is equal to the given key, in insertion
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = avl_index::AvlTree::new();
    /// for (i, key) in ["x", "y", "x", "z", "x"].iter().enumerate() {
    ///     tree.insert(*key, i).unwrap();
    /// }
    ///
    /// let found: Vec<_> = tree.find_all(&"x").unwrap().map(|e| *e.value()).collect();
    /// assert_eq!(found, [0, 2, 4]);
    /// ```
    pub fn find_all<'a>(&'a self, key: &'a K)
        -> Result<impl Iterator<Item = &'a Entry<K, V>> + 'a> {

        self.check_key(key)?;

        let tree = &self.tree;
        let cmp = &self.cmp;
        let start = tree.find(cmp, key);

        Ok(iter::successors(start, move |&node| tree.neighbor(node, Side::Right))
            .map(move |node| tree.entry(node))
            .take_while(move |entry| cmp.compares_eq(entry.key(), key)))
    }

    /// Returns the entry the handle refers to, or `None` if it is no longer in this tree.
    pub fn lookup(&self, handle: Handle) -> Option<&Entry<K, V>> { self.tree.lookup(handle) }

    /// Checks if the tree contains the given key.
    pub fn contains_key(&self, key: &K) -> bool { self.get(key).is_some() }

    /// Returns a reference to the value of the entry `find` would return.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).ok().flatten().map(Entry::value)
    }

    /// Returns a mutable reference to the value of the entry `find` would return.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = avl_index::AvlTree::new();
    /// tree.insert("a", vec![1]).unwrap();
    ///
    /// tree.get_mut(&"a").unwrap().push(2);
    /// assert_eq!(tree.get(&"a"), Some(&vec![1, 2]));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if self.check_key(key).is_err() { return None; }
        let node = self.tree.find(&self.cmp, key)?;
        Some(self.tree.value_mut(node))
    }

    /// Removes the entry the handle refers to and returns it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEntry` if the handle was issued by another tree or its entry has
    /// already been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut tree = avl_index::AvlTree::new();
    /// let handle = tree.insert(1, "a").unwrap().handle();
    ///
    /// assert_eq!(tree.remove(handle).unwrap().into_key_value(), (1, "a"));
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.remove(handle).err(), Some(avl_index::Error::InvalidEntry(handle)));
    /// ```
    pub fn remove(&mut self, handle: Handle) -> Result<Entry<K, V>> {
        let node = self.tree.lookup(handle).ok_or(Error::InvalidEntry(handle))?.node();
        let (entry, changed) = self.tree.remove(node);
        self.tree.rebalance(changed);
        Ok(entry)
    }

    /// Removes the entry `find` would return, if any.
    pub fn remove_key(&mut self, key: &K) -> Result<Option<Entry<K, V>>> {
        match self.find(key)?.map(Entry::handle) {
            None => Ok(None),
            Some(handle) => self.remove(handle).map(Some),
        }
    }

    /// Returns the entry with the smallest key, or `None` if the tree is empty.
    pub fn first(&self) -> Option<&Entry<K, V>> {
        self.tree.first().map(|node| self.tree.entry(node))
    }

    /// Returns the entry with the largest key, or `None` if the tree is empty.
    pub fn last(&self) -> Option<&Entry<K, V>> {
        self.tree.last().map(|node| self.tree.entry(node))
    }

    /// Returns an iterator over the tree's entries.
    ///
    /// The iterator yields the entries in ascending order according to the tree's comparator.
    /// Each call starts a fresh traversal.
    pub fn entries(&self) -> Entries<K, V> { self.tree.entries() }

    /// Returns an iterator over the tree's keys and values.
    ///
    /// The iterator yields the entries in ascending order according to the tree's comparator.
    pub fn iter(&self) -> Iter<K, V> { self.tree.iter() }

    #[cfg(test)]
    pub(crate) fn raw(&self) -> &node::Tree<K, V> { &self.tree }
}

impl<K, V, C> Dictionary<K, V> for AvlTree<K, V, C> where C: Compare<K> {
    type Entries<'a> = Entries<'a, K, V> where Self: 'a, K: 'a, V: 'a;

    fn insert(&mut self, key: K, value: V) -> Result<&Entry<K, V>> {
        AvlTree::insert(self, key, value)
    }

    fn find(&self, key: &K) -> Result<Option<&Entry<K, V>>> { AvlTree::find(self, key) }

    fn remove(&mut self, handle: Handle) -> Result<Entry<K, V>> { AvlTree::remove(self, handle) }

    fn size(&self) -> usize { self.len() }

    fn entries(&self) -> Entries<K, V> { AvlTree::entries(self) }
}

impl<K, V, C> Clone for AvlTree<K, V, C> where K: Clone, V: Clone, C: Compare<K> + Clone {
    fn clone(&self) -> Self {
        AvlTree { tree: self.tree.fork(), cmp: self.cmp.clone() }
    }
}

impl<K, V, C> Debug for AvlTree<K, V, C> where K: Debug, V: Debug, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> Display for AvlTree<K, V, C> where K: Display, V: Display, C: Compare<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (key, value) in self.iter() { writeln!(f, "{}\t{}", key, value)?; }
        writeln!(f)
    }
}

impl<K, V, C> Default for AvlTree<K, V, C> where C: Compare<K> + Default {
    fn default() -> Self { AvlTree::with_cmp(Default::default()) }
}

impl<'a, K, V, C> IntoIterator for &'a AvlTree<K, V, C> where C: Compare<K> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}
