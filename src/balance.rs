//! AVL rebalancing over the ordered tree.
//!
//! Every node caches the height of its subtree (a leaf has height 0, an absent subtree -1). After
//! each structural change the rebalance walk climbs from the change to the root, refreshing
//! heights and restructuring any node whose children's heights differ by more than one.
#![forbid(missing_docs)]

use std::cmp::{self, Ordering};
use tracing::trace;
use super::node::{Link, NodeId, Side, Tree};

/// The arrangement of an unbalanced node `z`, its taller child `y` and `y`'s taller child `x`.
///
/// The first side is `y`'s slot under `z`, the second is `x`'s slot under `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Single rotation to the right.
    LeftLeft,
    /// Double rotation: left at `y`, then right at `z`.
    LeftRight,
    /// Single rotation to the left.
    RightRight,
    /// Double rotation: right at `y`, then left at `z`.
    RightLeft,
}

impl Shape {
    fn of(y: Side, x: Side) -> Shape {
        match (y, x) {
            (Side::Left, Side::Left) => Shape::LeftLeft,
            (Side::Left, Side::Right) => Shape::LeftRight,
            (Side::Right, Side::Right) => Shape::RightRight,
            (Side::Right, Side::Left) => Shape::RightLeft,
        }
    }
}

impl<K, V> Tree<K, V> {
    /// Sets the node's cached height from its children's cached heights.
    ///
    /// Both children's heights must already be valid.
    pub fn recompute_height(&mut self, node: NodeId) {
        let height = if self.is_leaf(node) {
            0
        } else {
            1 + cmp::max(self.height(self.left(node)), self.height(self.right(node)))
        };
        self.set_height(node, height);
    }

    /// Returns `height(left) - height(right)` for the node.
    pub fn balance_factor(&self, node: NodeId) -> i32 {
        self.height(self.left(node)) - self.height(self.right(node))
    }

    /// Checks whether the node's children's heights differ by at most one.
    pub fn is_balanced(&self, node: NodeId) -> bool {
        (-1..=1).contains(&self.balance_factor(node))
    }

    /// Returns the node's strictly taller child.
    ///
    /// On a tie the child on the same side as the node itself is preferred (the left child for
    /// the root), so that a single rotation is chosen whenever one suffices.
    pub fn taller_child(&self, node: NodeId) -> Link {
        let left = self.left(node);
        let right = self.right(node);

        match self.height(left).cmp(&self.height(right)) {
            Ordering::Greater => left,
            Ordering::Less => right,
            Ordering::Equal => match self.side(node) {
                Some(Side::Right) => right,
                Some(Side::Left) | None => left,
            },
        }
    }

    /// Restores heights and the balance property on the path from `link` to the root.
    ///
    /// `link` is the position where the structure changed; heights below it must be valid.
    /// Returns the number of restructurings performed.
    pub fn rebalance(&mut self, mut link: Link) -> usize {
        let mut restructures = 0;

        while let Some(mut node) = link {
            self.recompute_height(node);

            if !self.is_balanced(node) {
                let y = self.taller_child(node).expect("unbalanced node has a taller child");
                let x = self.taller_child(y).expect("taller child of an unbalanced node is inner");

                node = self.restructure(x);
                restructures += 1;

                for child in [self.left(node), self.right(node)].into_iter().flatten() {
                    self.recompute_height(child);
                }
                self.recompute_height(node);
            }

            link = self.parent(node);
        }

        if restructures > 0 {
            trace!(target: "avl_index::balance", restructures, height = self.height(self.root()),
                   "rebalanced");
        }

        restructures
    }

    /// Performs the trinode restructuring of `x`, its parent `y` and its grandparent `z`.
    ///
    /// The three nodes are relinked in place: the one whose key falls between the other two
    /// becomes the root of the subtree `z` used to root, with the other two as its children and
    /// the four subtrees hanging below them in their original in-order sequence. No entry moves
    /// to another node. Returns the new subtree root; heights are left for the caller to fix,
    /// bottom-up over the three nodes.
    pub fn restructure(&mut self, x: NodeId) -> NodeId {
        let y = self.parent(x).expect("restructured node has a parent");
        let z = self.parent(y).expect("restructured node has a grandparent");

        let shape = Shape::of(
            self.side(y).expect("grandparent links to parent"),
            self.side(x).expect("parent links to node"),
        );

        // a < b < c in order; t1..t4 are the subtrees around them, left to right
        let (a, b, c, t1, t2, t3, t4) = match shape {
            Shape::LeftLeft =>
                (x, y, z, self.left(x), self.right(x), self.right(y), self.right(z)),
            Shape::LeftRight =>
                (y, x, z, self.left(y), self.left(x), self.right(x), self.right(z)),
            Shape::RightRight =>
                (z, y, x, self.left(z), self.left(y), self.left(x), self.right(x)),
            Shape::RightLeft =>
                (z, x, y, self.left(z), self.left(x), self.right(x), self.right(y)),
        };

        self.replace(z, Some(b));

        self.set_child(a, Side::Left, t1);
        self.set_child(a, Side::Right, t2);
        self.set_child(c, Side::Left, t3);
        self.set_child(c, Side::Right, t4);
        self.set_child(b, Side::Left, Some(a));
        self.set_child(b, Side::Right, Some(c));

        debug_assert!([a, b, c].iter().all(|&node| self.entry(node).node() == node));
        trace!(target: "avl_index::balance", ?shape, root = ?b, "restructured");
        b
    }
}
