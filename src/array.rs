//! An implicit, array-backed BST. Keys live in one flat buffer laid out as a complete binary tree
//! of some height: the root sits at index `0` and the children of index `i` sit at `2i + 1` (left)
//! and `2i + 2` (right). There are no child or parent pointers; every bit of navigation is index
//! arithmetic.
//!
//! The buffer always holds exactly `2^(height + 1) - 1` slots. Inserting past the last slot grows
//! the tree by one full level. Removing keys never shrinks it, use
//! [`fit_size`](ArrayTree::fit_size) to compact a tree after many removals.
//!
//! # Examples
//!
//! ```
//! use twin_bst::{array::ArrayTree, SearchTree};
//!
//! let mut tree = ArrayTree::new();
//! assert_eq!(tree.capacity(), 1);
//!
//! tree.insert_all([8, 3, 10, 1]);
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.capacity(), 7);
//! assert_eq!(tree.position(&1), Some(3));
//!
//! // Removing keys leaves the buffer as big as it was...
//! tree.remove(&1);
//! tree.remove(&10);
//! assert_eq!(tree.capacity(), 7);
//!
//! // ...until it is compacted.
//! tree.fit_size();
//! assert_eq!(tree.capacity(), 3);
//! assert_eq!(tree.in_order(), vec![3, 8]);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::{Error, Order, Result, SearchTree};

/// An unbalanced Binary Search Tree stored in a single growable buffer of optional keys.
///
/// # Panics
///
/// Inserting panics when the tree would need more levels than a `usize` has bits, since the
/// buffer length could no longer be represented. Allocation fails long before that in practice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayTree<T> {
    elements: Vec<Option<T>>,
    /// Depth of the deepest allocated level. The root is at depth 0.
    height: usize,
}

fn left_child(index: usize) -> usize {
    2 * index + 1
}

fn right_child(index: usize) -> usize {
    2 * index + 2
}

fn parent(index: usize) -> usize {
    (index - 1) / 2
}

/// Slots in a perfect binary tree whose deepest level is at depth `height`, if that many fit in
/// a `usize`.
fn capacity_for(height: usize) -> Option<usize> {
    let spare_bits = (usize::BITS as usize - 1).checked_sub(height)?;
    Some(usize::MAX >> spare_bits)
}

fn checked_capacity(height: usize) -> usize {
    capacity_for(height).unwrap_or_else(|| {
        panic!(
            "an array tree can't be {} levels deep",
            height.saturating_add(1)
        )
    })
}

impl<T> Default for ArrayTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ArrayTree<T> {
    /// Generates a new, empty `ArrayTree` with room for just the root.
    pub fn new() -> Self {
        Self::with_height(0)
    }

    /// Generates a new, empty `ArrayTree` with every level down to depth `height` already
    /// allocated, so inserts that stay within those levels never reallocate.
    ///
    /// # Panics
    ///
    /// When `2^(height + 1) - 1` doesn't fit in a `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_bst::{array::ArrayTree, SearchTree};
    ///
    /// let mut tree = ArrayTree::with_height(2);
    /// assert_eq!(tree.capacity(), 7);
    ///
    /// tree.insert_all([2, 1, 3]);
    /// assert_eq!(tree.capacity(), 7);
    /// ```
    pub fn with_height(height: usize) -> Self {
        let mut elements = Vec::new();
        elements.resize_with(checked_capacity(height), || None);
        Self { elements, height }
    }

    /// Depth of the deepest allocated level.
    pub fn height(&self) -> usize {
        self.height
    }

    /// How many slots are allocated, occupied or not.
    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    /// The raw slots, in index order.
    pub fn as_slice(&self) -> &[Option<T>] {
        &self.elements
    }

    /// The index of the slot holding `key`, if it is in the tree.
    pub fn position(&self, key: &T) -> Option<usize>
    where
        T: Ord,
    {
        let mut index = 0;
        while let Some(existing) = self.slot(index) {
            index = match key.cmp(existing) {
                Ordering::Less => left_child(index),
                Ordering::Equal => return Some(index),
                Ordering::Greater => right_child(index),
            };
        }
        None
    }

    /// Rebuilds the tree into a fresh buffer holding only the levels its keys need.
    ///
    /// Keys are re-inserted in level order, which reproduces the current shape exactly, so
    /// traversals are unaffected.
    pub fn fit_size(&mut self)
    where
        T: Ord,
    {
        let before = self.capacity();
        let keys = self.take_subtree(0);

        let mut compacted = Self::new();
        compacted.insert_all(keys);
        *self = compacted;

        tracing::debug!(before, after = self.capacity(), "compacted array tree");
    }

    /// Pre-order traversal of the subtree rooted at slot `index`.
    ///
    /// An empty slot yields no keys; a slot past the capacity is an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use twin_bst::{array::ArrayTree, Error, SearchTree};
    ///
    /// let tree: ArrayTree<_> = [8, 3, 1, 6, 4, 7, 10, 14, 13].into_iter().collect();
    ///
    /// assert_eq!(tree.pre_order_from(1), Ok(vec![3, 1, 6, 4, 7]));
    /// assert_eq!(tree.pre_order_from(5), Ok(vec![]));
    /// assert_eq!(
    ///     tree.pre_order_from(15),
    ///     Err(Error::IndexOutOfRange { index: 15, capacity: 15 })
    /// );
    /// ```
    pub fn pre_order_from(&self, index: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.check_index(index)?;
        Ok(self.collect_pre_order(index))
    }

    /// In-order traversal of the subtree rooted at slot `index`. See
    /// [`pre_order_from`](Self::pre_order_from) for the error cases.
    pub fn in_order_from(&self, index: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.check_index(index)?;
        Ok(self.collect_in_order(index))
    }

    /// Post-order traversal of the subtree rooted at slot `index`. See
    /// [`pre_order_from`](Self::pre_order_from) for the error cases.
    pub fn post_order_from(&self, index: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.check_index(index)?;
        Ok(self.collect_post_order(index))
    }

    /// Level order traversal of the subtree rooted at slot `index`. See
    /// [`pre_order_from`](Self::pre_order_from) for the error cases.
    pub fn bfs_from(&self, index: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        self.check_index(index)?;
        Ok(self.collect_bfs(index))
    }

    /// Dispatches to the index-rooted traversal named by `order`.
    pub fn traverse_from(&self, order: Order, index: usize) -> Result<Vec<T>>
    where
        T: Clone,
    {
        match order {
            Order::PreOrder => self.pre_order_from(index),
            Order::InOrder => self.in_order_from(index),
            Order::PostOrder => self.post_order_from(index),
            Order::BreadthFirst => self.bfs_from(index),
        }
    }

    /// The key in slot `index`. Slots past the capacity are treated as empty.
    fn slot(&self, index: usize) -> Option<&T> {
        self.elements.get(index).and_then(Option::as_ref)
    }

    fn is_occupied(&self, index: usize) -> bool {
        self.slot(index).is_some()
    }

    /// A slot on the deepest allocated level: its children would be past the capacity.
    fn is_frontier(&self, index: usize) -> bool {
        right_child(index) >= self.capacity()
    }

    fn occupied_children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        [left_child(index), right_child(index)]
            .into_iter()
            .filter(move |&child| self.is_occupied(child))
    }

    /// `start` if there is a subtree rooted there, nothing otherwise. Seeds the traversal
    /// stacks and queues.
    fn root_of(&self, start: usize) -> impl Iterator<Item = usize> {
        self.is_occupied(start).then_some(start).into_iter()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.capacity() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                capacity: self.capacity(),
            })
        }
    }

    /// Reallocates the buffer to hold one more full level.
    fn grow(&mut self) {
        self.height += 1;
        let capacity = checked_capacity(self.height);
        tracing::trace!(height = self.height, capacity, "growing array tree");

        self.elements.reserve_exact(capacity - self.elements.len());
        self.elements.resize_with(capacity, || None);
    }

    /// Inserts `key` into the subtree rooted at slot `start`.
    fn insert_at(&mut self, start: usize, key: T)
    where
        T: Ord,
    {
        let mut index = start;
        loop {
            while index >= self.capacity() {
                self.grow();
            }

            match self.elements[index].as_ref() {
                None => {
                    self.elements[index] = Some(key);
                    break;
                }
                Some(existing) => {
                    index = match key.cmp(existing) {
                        Ordering::Less => left_child(index),
                        Ordering::Greater => right_child(index),
                        Ordering::Equal => return,
                    }
                }
            }
        }

        debug_assert!(
            index == 0 || self.is_occupied(parent(index)),
            "slot {} was filled below an empty parent",
            index
        );
    }

    fn insert_all_at(&mut self, start: usize, keys: Vec<T>)
    where
        T: Ord,
    {
        for key in keys {
            self.insert_at(start, key);
        }
    }

    /// Moves every key out of the subtree rooted at slot `start`, in level order, leaving all of
    /// its slots empty.
    fn take_subtree(&mut self, start: usize) -> Vec<T> {
        let mut taken = Vec::new();
        let mut queue: VecDeque<usize> = self.root_of(start).collect();

        while let Some(index) = queue.pop_front() {
            queue.extend(self.occupied_children(index));
            if let Some(key) = self.elements[index].take() {
                taken.push(key);
            }
        }

        taken
    }

    /// Occupied, reachable slots of the subtree rooted at `start`, in level order.
    fn level_order(&self, start: usize) -> Vec<usize> {
        let mut indices = Vec::new();
        let mut queue: VecDeque<usize> = self.root_of(start).collect();

        while let Some(index) = queue.pop_front() {
            indices.push(index);
            queue.extend(self.occupied_children(index));
        }

        indices
    }

    fn collect_bfs(&self, start: usize) -> Vec<T>
    where
        T: Clone,
    {
        self.level_order(start)
            .into_iter()
            .filter_map(|index| self.slot(index).cloned())
            .collect()
    }

    fn collect_pre_order(&self, start: usize) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::new();
        let mut stack: Vec<usize> = self.root_of(start).collect();

        while let Some(index) = stack.pop() {
            if let Some(key) = self.slot(index) {
                keys.push(key.clone());
            }
            // Right goes on first so the left subtree comes off first.
            for child in [right_child(index), left_child(index)] {
                if self.is_occupied(child) {
                    stack.push(child);
                }
            }
        }

        keys
    }

    // A stack of indices alone can't tell "no left child" apart from "left child already
    // emitted" when a slot is revisited, hence the visited markers.
    fn collect_in_order(&self, start: usize) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::new();
        let mut visited = vec![false; self.capacity()];
        let mut stack: Vec<usize> = self.root_of(start).collect();

        while let Some(&index) = stack.last() {
            let left = left_child(index);
            if self.is_occupied(left) && !visited[left] {
                stack.push(left);
                continue;
            }

            stack.pop();
            visited[index] = true;
            if let Some(key) = self.slot(index) {
                keys.push(key.clone());
            }

            let right = right_child(index);
            if self.is_occupied(right) {
                stack.push(right);
            }
        }

        keys
    }

    fn collect_post_order(&self, start: usize) -> Vec<T>
    where
        T: Clone,
    {
        let mut keys = Vec::new();
        let mut visited = vec![false; self.capacity()];
        let mut stack: Vec<usize> = self.root_of(start).collect();

        while let Some(&index) = stack.last() {
            let pending = [left_child(index), right_child(index)]
                .into_iter()
                .find(|&child| self.is_occupied(child) && !visited[child]);

            match pending {
                Some(child) => stack.push(child),
                None => {
                    stack.pop();
                    visited[index] = true;
                    if let Some(key) = self.slot(index) {
                        keys.push(key.clone());
                    }
                }
            }
        }

        keys
    }
}

impl<T: Ord> SearchTree<T> for ArrayTree<T> {
    fn insert(&mut self, key: T) {
        self.insert_at(0, key);
    }

    fn remove(&mut self, key: &T) {
        let Some(index) = self.position(key) else {
            return;
        };

        if self.is_frontier(index) {
            tracing::trace!(index, "removing frontier leaf");
            self.elements[index] = None;
            return;
        }

        let (left, right) = (left_child(index), right_child(index));
        match (self.is_occupied(left), self.is_occupied(right)) {
            (false, false) => {
                tracing::trace!(index, "removing leaf");
                self.elements[index] = None;
            }
            (true, false) | (false, true) => {
                tracing::trace!(index, "removing node with one child");
                let child = if self.is_occupied(left) { left } else { right };
                let subtree = self.take_subtree(child);
                self.elements[index] = None;
                self.insert_all_at(index, subtree);
            }
            (true, true) => {
                // The predecessor is the rightmost slot of the left subtree. It has no right
                // child, but its left subtree has to be rebuilt in its place once it moves up.
                let mut predecessor = left;
                while self.is_occupied(right_child(predecessor)) {
                    predecessor = right_child(predecessor);
                }
                tracing::trace!(index, predecessor, "removing node with two children");

                let orphans = self.take_subtree(left_child(predecessor));
                self.elements[index] = self.elements[predecessor].take();
                self.insert_all_at(predecessor, orphans);
            }
        }
    }

    fn contains(&self, key: &T) -> bool {
        self.position(key).is_some()
    }

    fn pre_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.collect_pre_order(0)
    }

    fn in_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.collect_in_order(0)
    }

    fn post_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.collect_post_order(0)
    }

    fn bfs(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.collect_bfs(0)
    }

    fn num_nodes(&self) -> usize {
        self.level_order(0).len()
    }

    fn num_leaves(&self) -> usize {
        self.level_order(0)
            .into_iter()
            .filter(|&index| self.occupied_children(index).next().is_none())
            .count()
    }

    fn num_two_children(&self) -> usize {
        self.level_order(0)
            .into_iter()
            .filter(|&index| self.occupied_children(index).count() == 2)
            .count()
    }

    /// Expands the tree one level at a time from the root and counts the non-empty levels.
    fn num_levels(&self) -> usize {
        let mut levels = 0;
        let mut level: Vec<usize> = self.root_of(0).collect();

        while !level.is_empty() {
            levels += 1;
            level = level
                .into_iter()
                .flat_map(|index| self.occupied_children(index))
                .collect();
        }

        levels
    }

    fn is_empty(&self) -> bool {
        !self.is_occupied(0)
    }
}

impl<T: Ord> FromIterator<T> for ArrayTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.insert_all(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for ArrayTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}
