//! A node-linked BST. Every node lives in its own allocation and exclusively owns its children,
//! so the shape of the tree is exactly its ownership graph.
//!
//! # Examples
//!
//! ```
//! use twin_bst::{linked::LinkedTree, SearchTree};
//!
//! let mut tree = LinkedTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! tree.insert_all([10, 8, 9, 6, 7]);
//! assert_eq!(tree.in_order(), vec![6, 7, 8, 9, 10]);
//!
//! // `8` has two children so its in-order predecessor, `7`, takes its place.
//! tree.remove(&8);
//! assert_eq!(tree.pre_order(), vec![10, 7, 6, 9]);
//!
//! // Removing something that isn't there does nothing.
//! tree.remove(&42);
//! assert_eq!(tree.num_nodes(), 4);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::SearchTree;

type Link<T> = Option<Box<Node<T>>>;

/// An unbalanced Binary Search Tree made of owned, heap allocated nodes.
#[derive(Debug, Clone)]
pub struct LinkedTree<T> {
    root: Link<T>,
}

impl<T> Default for LinkedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Searching, inserting, removing and dropping walk the tree iteratively, so a degenerate (list
// shaped) tree can't overflow the stack through them. Traversals, statistics, `Clone` and `Debug`
// still recurse once per level.
impl<T> Drop for LinkedTree<T> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<T> LinkedTree<T> {
    /// Generates a new, empty `LinkedTree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// How many times `key` has been inserted since the node holding it was created. Repeated
    /// inserts are absorbed by the existing node, so this is `0` for absent keys and at least `1`
    /// otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_bst::{linked::LinkedTree, SearchTree};
    ///
    /// let mut tree = LinkedTree::new();
    /// tree.insert_all([13, 14, 13]);
    ///
    /// assert_eq!(tree.insertions(&13), 2);
    /// assert_eq!(tree.insertions(&14), 1);
    /// assert_eq!(tree.insertions(&15), 0);
    /// assert_eq!(tree.num_nodes(), 2);
    /// ```
    pub fn insertions(&self, key: &T) -> usize
    where
        T: Ord,
    {
        self.find(key).map_or(0, |node| node.count as usize + 1)
    }

    fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    fn find(&self, key: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.data) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Walks down to the empty slot where `key` belongs and fills it. A key that is already
    /// present bumps its node's insert count instead.
    fn insert_into(mut link: &mut Link<T>, key: T)
    where
        T: Ord,
    {
        while let Some(node) = link {
            if cfg!(debug_assertions) {
                if let Some(left) = node.left() {
                    assert!(node.data > left.data);
                }
                if let Some(right) = node.right() {
                    assert!(node.data < right.data);
                }
            }

            match key.cmp(&node.data) {
                Ordering::Less => link = &mut node.left,
                Ordering::Equal => {
                    node.count = node.count.saturating_add(1);
                    return;
                }
                Ordering::Greater => link = &mut node.right,
            }
        }
        *link = Some(Node::new_boxed(key));
    }

    /// Finds the slot owning `key` (the root slot or one of a parent's child slots) and replaces
    /// it with whatever should take the removed node's place.
    fn remove_from(mut link: &mut Link<T>, key: &T)
    where
        T: Ord,
    {
        loop {
            let ordering = match link.as_deref() {
                Some(node) => key.cmp(&node.data),
                None => return,
            };
            if ordering == Ordering::Equal {
                break;
            }
            let Some(node) = link else {
                return;
            };
            link = match ordering {
                Ordering::Less => &mut node.left,
                _ => &mut node.right,
            };
        }

        if let Some(removed) = link.take() {
            *link = removed.splice();
        }
    }
}

impl<T: Ord> SearchTree<T> for LinkedTree<T> {
    fn insert(&mut self, key: T) {
        Self::insert_into(&mut self.root, key);
    }

    fn remove(&mut self, key: &T) {
        Self::remove_from(&mut self.root, key);
    }

    fn contains(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    fn pre_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::new();
        if let Some(root) = self.root() {
            root.pre_order(&mut keys);
        }
        keys
    }

    fn in_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::new();
        if let Some(root) = self.root() {
            root.in_order(&mut keys);
        }
        keys
    }

    fn post_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::new();
        if let Some(root) = self.root() {
            root.post_order(&mut keys);
        }
        keys
    }

    fn bfs(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::new();
        let mut queue: VecDeque<&Node<T>> = self.root().into_iter().collect();
        while let Some(node) = queue.pop_front() {
            keys.push(node.data.clone());
            queue.extend(node.left());
            queue.extend(node.right());
        }
        keys
    }

    fn num_nodes(&self) -> usize {
        Node::num_nodes(self.root())
    }

    fn num_leaves(&self) -> usize {
        Node::num_leaves(self.root())
    }

    fn num_two_children(&self) -> usize {
        Node::num_two_children(self.root())
    }

    fn num_levels(&self) -> usize {
        Node::num_levels(self.root())
    }

    fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl<T: Ord> FromIterator<T> for LinkedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.insert_all(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for LinkedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    data: T,
    /// Inserts of `data` absorbed by this node after it was created.
    count: u32,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(data: T) -> Box<Self> {
        Box::new(Node {
            data,
            count: 0,
            left: None,
            right: None,
        })
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Consumes a node that is being removed and returns the subtree that should take its place.
    /// With two children the in-order predecessor is promoted.
    fn splice(mut self: Box<Self>) -> Link<T> {
        match (self.left.take(), self.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(mut left), right) => match Self::detach_rightmost(&mut left.right) {
                Some(mut predecessor) => {
                    predecessor.left = Some(left);
                    predecessor.right = right;
                    Some(predecessor)
                }
                // The left child is the predecessor itself.
                None => {
                    left.right = right;
                    Some(left)
                }
            },
        }
    }

    /// Unhooks the last node down the right spine starting at `link`, handing its left subtree
    /// to its parent. Returns `None` when `link` is empty.
    fn detach_rightmost(mut link: &mut Link<T>) -> Link<T> {
        while link.as_ref().map_or(false, |node| node.right.is_some()) {
            let Some(node) = link else {
                break;
            };
            link = &mut node.right;
        }

        let mut rightmost = link.take()?;
        *link = rightmost.left.take();
        Some(rightmost)
    }

    fn pre_order(&self, keys: &mut Vec<T>)
    where
        T: Clone,
    {
        keys.push(self.data.clone());
        if let Some(left) = self.left() {
            left.pre_order(keys);
        }
        if let Some(right) = self.right() {
            right.pre_order(keys);
        }
    }

    fn in_order(&self, keys: &mut Vec<T>)
    where
        T: Clone,
    {
        if let Some(left) = self.left() {
            left.in_order(keys);
        }
        keys.push(self.data.clone());
        if let Some(right) = self.right() {
            right.in_order(keys);
        }
    }

    fn post_order(&self, keys: &mut Vec<T>)
    where
        T: Clone,
    {
        if let Some(left) = self.left() {
            left.post_order(keys);
        }
        if let Some(right) = self.right() {
            right.post_order(keys);
        }
        keys.push(self.data.clone());
    }

    fn num_nodes(node: Option<&Self>) -> usize {
        node.map_or(0, |n| {
            1 + Self::num_nodes(n.left()) + Self::num_nodes(n.right())
        })
    }

    fn num_leaves(node: Option<&Self>) -> usize {
        match node {
            None => 0,
            Some(n) => match (n.left(), n.right()) {
                (None, None) => 1,
                (left, right) => Self::num_leaves(left) + Self::num_leaves(right),
            },
        }
    }

    fn num_two_children(node: Option<&Self>) -> usize {
        node.map_or(0, |n| {
            let full = usize::from(n.left.is_some() && n.right.is_some());
            full + Self::num_two_children(n.left()) + Self::num_two_children(n.right())
        })
    }

    /// Levels, not edges: a lone node has 1.
    fn num_levels(node: Option<&Self>) -> usize {
        node.map_or(0, |n| {
            1 + Self::num_levels(n.left()).max(Self::num_levels(n.right()))
        })
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a set.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same keys in both.
    fn do_ops<K>(ops: &[Op<K>], bst: &mut LinkedTree<K>, set: &mut BTreeSet<K>)
    where
        K: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    bst.insert(k.clone());
                    set.insert(k.clone());
                }
                Op::Remove(k) => {
                    bst.remove(k);
                    set.remove(k);
                }
                Op::Iter => {
                    assert_eq!(bst.in_order(), set.iter().cloned().collect::<Vec<_>>());
                }
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = LinkedTree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            set.iter().all(|key| tree.contains(key))
                && tree.in_order() == set.iter().copied().collect::<Vec<_>>()
        }
    }

    /// Walks every node and buckets it by child count: `[leaves, one child, two children]`.
    fn count_by_children<K>(tree: &LinkedTree<K>) -> [usize; 3] {
        let mut counts = [0; 3];
        let mut pending: Vec<&Node<K>> = tree.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            let children: Vec<&Node<K>> = node.left().into_iter().chain(node.right()).collect();
            counts[children.len()] += 1;
            pending.extend(children);
        }
        counts
    }

    #[test]
    fn node_walk_counts_the_sample() {
        let tree: LinkedTree<_> = [8, 3, 1, 6, 4, 7, 10, 14, 13].into_iter().collect();

        assert_eq!(count_by_children(&tree), [4, 2, 3]);
        assert_eq!(tree.stats().one_child(), 2);
    }

    quickcheck::quickcheck! {
        fn statistics_match_a_node_walk(xs: Vec<i8>) -> bool {
            let tree: LinkedTree<_> = xs.iter().copied().collect();
            let stats = tree.stats();
            let [leaves, one_child, two_children] = count_by_children(&tree);

            stats.leaves == leaves
                && stats.one_child() == one_child
                && stats.two_children == two_children
                && stats.nodes == leaves + one_child + two_children
                && (stats.nodes == 0 || stats.leaves == stats.two_children + 1)
                && (stats.nodes == 0) == (stats.levels == 0)
        }
    }

    quickcheck::quickcheck! {
        fn insert_then_remove_restores_shape(xs: Vec<i8>, x: i8) -> bool {
            let mut tree: LinkedTree<_> = xs.iter().copied().collect();
            if tree.contains(&x) {
                return true;
            }
            let before = tree.pre_order();
            tree.insert(x);
            tree.remove(&x);

            tree.pre_order() == before
        }
    }
}
