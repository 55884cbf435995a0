//! This crate exposes two interchangeable representations of an unbalanced
//! Binary Search Tree (BST), mostly for comparing pointer-based and implicit
//! array-based tree design.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! ## Representations
//!
//! - [`linked::LinkedTree`] keeps every node in its own allocation and each node
//!   owns its children.
//! - [`array::ArrayTree`] keeps every key in one flat buffer laid out as a
//!   complete binary tree. The children of index `i` live at `2i + 1` and
//!   `2i + 2`, so there are no child pointers at all.
//!
//! Both implement [`SearchTree`] so callers can be agnostic to the
//! representation:
//!
//! ```
//! use twin_bst::{array::ArrayTree, linked::LinkedTree, Order, SearchTree};
//!
//! let keys = [8, 3, 1, 6, 4, 7, 10, 14, 13];
//! let linked: LinkedTree<_> = keys.iter().copied().collect();
//! let array: ArrayTree<_> = keys.iter().copied().collect();
//!
//! for order in Order::ALL {
//!     assert_eq!(linked.traverse(order), array.traverse(order));
//! }
//! assert_eq!(linked.stats(), array.stats());
//! ```
//!
//! Neither tree stores a key twice. Inserting a key that is already present
//! leaves the shape of the tree untouched.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod array;
mod error;
pub mod linked;
mod order;
mod stats;

pub use error::{Error, Result};
pub use order::Order;
pub use stats::Stats;


/// The operations shared by every tree representation in this crate.
pub trait SearchTree<T: Ord> {
    /// Inserts `key` into the tree. Inserting a key that is already present does not change the
    /// shape of the tree.
    fn insert(&mut self, key: T);

    /// Inserts every key in `keys`, one at a time, in iteration order.
    fn insert_all<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        for key in keys {
            self.insert(key);
        }
    }

    /// Removes `key` from the tree. Removing a key that isn't present does nothing.
    fn remove(&mut self, key: &T);

    /// Whether `key` is stored in the tree.
    fn contains(&self, key: &T) -> bool;

    /// Keys in node, left, right order.
    fn pre_order(&self) -> Vec<T>
    where
        T: Clone;

    /// Keys in left, node, right order. For a BST this is ascending order.
    fn in_order(&self) -> Vec<T>
    where
        T: Clone;

    /// Keys in left, right, node order.
    fn post_order(&self) -> Vec<T>
    where
        T: Clone;

    /// Keys level by level, left to right.
    fn bfs(&self) -> Vec<T>
    where
        T: Clone;

    /// Dispatches to the traversal named by `order`.
    fn traverse(&self, order: Order) -> Vec<T>
    where
        T: Clone,
    {
        match order {
            Order::PreOrder => self.pre_order(),
            Order::InOrder => self.in_order(),
            Order::PostOrder => self.post_order(),
            Order::BreadthFirst => self.bfs(),
        }
    }

    /// How many nodes are in the tree.
    fn num_nodes(&self) -> usize;

    /// How many nodes have no children.
    fn num_leaves(&self) -> usize;

    /// How many nodes have both a left and a right child.
    fn num_two_children(&self) -> usize;

    /// How many levels the tree has. An empty tree has 0 levels and a lone root has 1.
    fn num_levels(&self) -> usize;

    /// Collects all of the shape statistics at once.
    fn stats(&self) -> Stats {
        Stats {
            nodes: self.num_nodes(),
            leaves: self.num_leaves(),
            two_children: self.num_two_children(),
            levels: self.num_levels(),
        }
    }

    /// Whether the tree holds no keys.
    fn is_empty(&self) -> bool {
        self.num_nodes() == 0
    }
}
