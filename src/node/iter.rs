use std::iter::FusedIterator;
use super::{Link, Side, Tree};
use super::super::entry::Entry;

/// In-order traversal that walks parent links, so it needs no stack.
pub struct Entries<'a, K: 'a, V: 'a> {
    tree: &'a Tree<K, V>,
    front: Link,
    back: Link,
    size: usize,
}

impl<'a, K, V> Entries<'a, K, V> {
    pub fn new(tree: &'a Tree<K, V>) -> Entries<'a, K, V> {
        Entries { tree: tree, front: tree.first(), back: tree.last(), size: tree.len() }
    }

    fn step(&mut self, side: Side) -> Option<&'a Entry<K, V>> {
        if self.size == 0 { return None; }

        let tree = self.tree;
        let cursor = match side {
            Side::Right => &mut self.front,
            Side::Left => &mut self.back,
        };

        let node = (*cursor)?;
        *cursor = tree.neighbor(node, side);
        self.size -= 1;
        Some(tree.entry(node))
    }
}

impl<'a, K, V> Clone for Entries<'a, K, V> {
    fn clone(&self) -> Entries<'a, K, V> {
        Entries { tree: self.tree, front: self.front, back: self.back, size: self.size }
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = &'a Entry<K, V>;
    fn next(&mut self) -> Option<&'a Entry<K, V>> { self.step(Side::Right) }
    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<'a, K, V> DoubleEndedIterator for Entries<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a Entry<K, V>> { self.step(Side::Left) }
}

impl<'a, K, V> ExactSizeIterator for Entries<'a, K, V> {}

impl<'a, K, V> FusedIterator for Entries<'a, K, V> {}

/// In-order traversal yielding key-value pairs.
pub struct Iter<'a, K: 'a, V: 'a>(Entries<'a, K, V>);

impl<'a, K, V> Iter<'a, K, V> {
    pub fn new(tree: &'a Tree<K, V>) -> Iter<'a, K, V> { Iter(Entries::new(tree)) }
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> { Iter(self.0.clone()) }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.0.next().map(|entry| (entry.key(), entry.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.0.next_back().map(|entry| (entry.key(), entry.value()))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}
