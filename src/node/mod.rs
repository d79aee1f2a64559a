//! The unbalanced ordered binary search tree the balance engine builds on.
//!
//! Nodes and entries live in two arenas addressed by index. A node refers to the entry it holds
//! and every entry refers back to its node, so parent, child and back-reference links are plain
//! indices and never form ownership cycles.

mod iter;


use compare::Compare;
use std::cmp::Ordering::*;
use std::mem;
use super::entry::{Entry, Handle, TreeId};

pub use self::iter::{Entries, Iter};

/// Index of a node in a tree's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A possibly absent node.
pub type Link = Option<NodeId>;

/// The child slot a node occupies in its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    entry: usize,
    parent: Link,
    left: Link,
    right: Link,
    height: i32,
}

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Occupied(Entry<K, V>),
    Vacant { generation: u32, next: Option<usize> },
}

#[derive(Clone)]
pub struct Tree<K, V> {
    id: TreeId,
    root: Link,
    nodes: Vec<Option<Node>>,
    free_nodes: Vec<usize>,
    entries: Vec<Slot<K, V>>,
    next_vacant: Option<usize>,
    len: usize,
}

impl<K, V> Tree<K, V> {
    pub fn new() -> Self {
        Tree {
            id: TreeId::next(),
            root: None,
            nodes: vec![],
            free_nodes: vec![],
            entries: vec![],
            next_vacant: None,
            len: 0,
        }
    }

    /// Returns a copy of the tree under a fresh identity.
    pub fn fork(&self) -> Self where K: Clone, V: Clone {
        let mut tree = self.clone();
        tree.id = TreeId::next();

        for slot in &mut tree.entries {
            if let Slot::Occupied(ref mut entry) = *slot { entry.set_tree(tree.id); }
        }

        tree
    }

    pub fn id(&self) -> TreeId { self.id }

    pub fn len(&self) -> usize { self.len }

    pub fn root(&self) -> Link { self.root }

    /// Drops every node and entry, invalidating all outstanding handles.
    pub fn clear(&mut self) { *self = Tree::new(); }

    pub fn entries(&self) -> Entries<K, V> { Entries::new(self) }

    pub fn iter(&self) -> Iter<K, V> { Iter::new(self) }

    fn node(&self, node: NodeId) -> &Node {
        self.nodes[node.0].as_ref().expect("link to a freed node")
    }

    fn node_mut(&mut self, node: NodeId) -> &mut Node {
        self.nodes[node.0].as_mut().expect("link to a freed node")
    }

    pub fn parent(&self, node: NodeId) -> Link { self.node(node).parent }

    pub fn left(&self, node: NodeId) -> Link { self.node(node).left }

    pub fn right(&self, node: NodeId) -> Link { self.node(node).right }

    pub fn child(&self, node: NodeId, side: Side) -> Link {
        match side {
            Side::Left => self.left(node),
            Side::Right => self.right(node),
        }
    }

    pub fn is_root(&self, node: NodeId) -> bool { self.parent(node).is_none() }

    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.left(node).is_none() && self.right(node).is_none()
    }

    /// Returns the slot the node occupies in its parent, or `None` for the root.
    pub fn side(&self, node: NodeId) -> Option<Side> {
        self.parent(node).map(|parent| {
            if self.left(parent) == Some(node) { Side::Left } else { Side::Right }
        })
    }

    /// Returns the cached height of the subtree at `link`; an empty subtree has height -1.
    pub fn height(&self, link: Link) -> i32 {
        link.map_or(-1, |node| self.node(node).height)
    }

    pub fn set_height(&mut self, node: NodeId, height: i32) {
        self.node_mut(node).height = height;
    }

    pub fn entry(&self, node: NodeId) -> &Entry<K, V> {
        match self.entries[self.node(node).entry] {
            Slot::Occupied(ref entry) => entry,
            Slot::Vacant { .. } => panic!("node holds a vacant entry slot"),
        }
    }

    fn entry_at_mut(&mut self, index: usize) -> &mut Entry<K, V> {
        match self.entries[index] {
            Slot::Occupied(ref mut entry) => entry,
            Slot::Vacant { .. } => panic!("node holds a vacant entry slot"),
        }
    }

    pub fn key(&self, node: NodeId) -> &K { self.entry(node).key() }

    pub fn value_mut(&mut self, node: NodeId) -> &mut V {
        let index = self.node(node).entry;
        self.entry_at_mut(index).value_mut()
    }

    /// Resolves a handle to the entry it refers to, if the entry is still in this tree.
    pub fn lookup(&self, handle: Handle) -> Option<&Entry<K, V>> {
        if handle.tree != self.id { return None; }

        match self.entries.get(handle.index) {
            Some(&Slot::Occupied(ref entry)) if entry.handle() == handle => Some(entry),
            _ => None,
        }
    }

    /// Follows `side` links from `node` as far as possible.
    pub fn extremum(&self, mut node: NodeId, side: Side) -> NodeId {
        while let Some(child) = self.child(node, side) { node = child; }
        node
    }

    pub fn first(&self) -> Link { self.root.map(|root| self.extremum(root, Side::Left)) }

    pub fn last(&self) -> Link { self.root.map(|root| self.extremum(root, Side::Right)) }

    /// Returns the in-order neighbor of `node` in direction `side`: its successor for
    /// `Side::Right`, its predecessor for `Side::Left`.
    pub fn neighbor(&self, node: NodeId, side: Side) -> Link {
        if let Some(child) = self.child(node, side) {
            return Some(self.extremum(child, side.opposite()));
        }

        let mut node = node;
        while self.side(node) == Some(side) {
            node = self.parent(node).expect("non-root node has a parent");
        }
        self.parent(node)
    }

    /// Puts `child` into `parent`'s `side` slot, updating the child's parent link.
    pub fn set_child(&mut self, parent: NodeId, side: Side, child: Link) {
        match side {
            Side::Left => self.node_mut(parent).left = child,
            Side::Right => self.node_mut(parent).right = child,
        }
        if let Some(child) = child { self.node_mut(child).parent = Some(parent); }
    }

    /// Puts `new` in the position `old` occupies, either under `old`'s parent or at the root.
    ///
    /// `old` keeps its own links; the caller is expected to relink or free it.
    pub fn replace(&mut self, old: NodeId, new: Link) {
        if self.is_root(old) {
            self.root = new;
            if let Some(new) = new { self.node_mut(new).parent = None; }
        } else {
            let parent = self.parent(old).expect("non-root node has a parent");
            let side = if self.left(parent) == Some(old) { Side::Left } else { Side::Right };
            self.set_child(parent, side, new);
        }
    }

    /// Places a new leaf holding the given key and value, returning its node.
    ///
    /// A key equal to existing keys is placed after all of them, so equal keys keep their
    /// insertion order.
    pub fn insert<C>(&mut self, cmp: &C, key: K, value: V) -> NodeId where C: Compare<K> {
        let mut parent = None;
        let mut link = self.root;

        while let Some(node) = link {
            let side = match cmp.compare(&key, self.key(node)) {
                Less => Side::Left,
                Equal | Greater => Side::Right,
            };

            parent = Some((node, side));
            link = self.child(node, side);
        }

        let node = self.alloc_node(Node {
            entry: usize::MAX,
            parent: None,
            left: None,
            right: None,
            height: 0,
        });

        let entry = self.alloc_entry(key, value, node);
        self.node_mut(node).entry = entry;

        match parent {
            None => self.root = Some(node),
            Some((parent, side)) => self.set_child(parent, side, Some(node)),
        }

        self.len += 1;
        node
    }

    /// Returns the first node, in order, whose key is equal to the given key.
    pub fn find<C, Q: ?Sized>(&self, cmp: &C, key: &Q) -> Link where C: Compare<Q, K> {
        let mut found = None;
        let mut link = self.root;

        while let Some(node) = link {
            link = match cmp.compare(key, self.key(node)) {
                Less => self.left(node),
                Greater => self.right(node),
                Equal => { found = Some(node); self.left(node) }
            };
        }

        found
    }

    /// Structurally removes the entry held by `node`.
    ///
    /// Returns the removed entry and the position where the structure changed: the node that
    /// took the removed node's place, or the removed node's former parent if nothing did.
    pub fn remove(&mut self, node: NodeId) -> (Entry<K, V>, Link) {
        let target = match (self.left(node), self.right(node)) {
            (Some(_), Some(right)) => {
                // promote the successor's entry, then unlink the successor's node
                let successor = self.extremum(right, Side::Left);
                self.swap_entries(node, successor);
                successor
            }
            _ => node,
        };

        let child = self.left(target).or(self.right(target));
        let parent = self.parent(target);
        self.replace(target, child);

        let entry = self.free_node(target).entry;
        self.len -= 1;
        (self.free_entry(entry), child.or(parent))
    }

    fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        let entry_a = self.node(a).entry;
        let entry_b = self.node(b).entry;

        self.node_mut(a).entry = entry_b;
        self.node_mut(b).entry = entry_a;
        self.entry_at_mut(entry_a).set_node(b);
        self.entry_at_mut(entry_b).set_node(a);
    }

    fn alloc_node(&mut self, node: Node) -> NodeId {
        match self.free_nodes.pop() {
            Some(index) => { self.nodes[index] = Some(node); NodeId(index) }
            None => { self.nodes.push(Some(node)); NodeId(self.nodes.len() - 1) }
        }
    }

    fn free_node(&mut self, node: NodeId) -> Node {
        let freed = self.nodes[node.0].take().expect("node freed twice");
        self.free_nodes.push(node.0);
        freed
    }

    fn alloc_entry(&mut self, key: K, value: V, node: NodeId) -> usize {
        let (index, generation) = match self.next_vacant {
            Some(index) => match self.entries[index] {
                Slot::Vacant { generation, next } => {
                    self.next_vacant = next;
                    (index, generation)
                }
                Slot::Occupied(_) => panic!("free list points at an occupied entry slot"),
            },
            None => {
                self.entries.push(Slot::Vacant { generation: 0, next: None });
                (self.entries.len() - 1, 0)
            }
        };

        let handle = Handle { tree: self.id, index: index, generation: generation };
        self.entries[index] = Slot::Occupied(Entry::new(key, value, handle, node));
        index
    }

    fn free_entry(&mut self, index: usize) -> Entry<K, V> {
        let generation = match self.entries[index] {
            Slot::Occupied(ref entry) => entry.handle().generation.wrapping_add(1),
            Slot::Vacant { .. } => panic!("entry freed twice"),
        };

        let vacant = Slot::Vacant { generation: generation, next: self.next_vacant };
        self.next_vacant = Some(index);

        match mem::replace(&mut self.entries[index], vacant) {
            Slot::Occupied(entry) => entry,
            Slot::Vacant { .. } => unreachable!(),
        }
    }
}
