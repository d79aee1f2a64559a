//! An ordered dictionary based on an AVL tree, and a word-position index built on it.
//!
//! [`AvlTree`](struct.AvlTree.html) keeps its entries in a binary search tree whose subtree
//! heights are kept balanced after every insertion and removal. Entries are referred to by
//! [`Handle`](struct.Handle.html)s that stay valid while the tree rebalances around them.
//!
//! The [`index`](index/index.html) module uses the tree to map the words of a text to the
//! positions where they occur.

mod balance;
mod dictionary;
mod entry;
mod error;
pub mod index;
mod node;
pub mod tree;

#[cfg(feature = "ordered_iter")]
mod ordered_iter;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use dictionary::Dictionary;
pub use entry::{Entry, Handle, TreeId};
pub use error::{Error, IndexError, Result};
pub use tree::AvlTree;
