//! Binary Search Tree with Caller-Supplied Ordering
//!
//! The tree never stores its comparator. Every call that places or locates an
//! element takes an `Fn(&T, &T) -> Ordering`, and callers are expected to pass
//! the same ordering for the lifetime of a tree.
//!
//! ## Invariants
//!
//! - Everything in a node's left subtree compares `Less` than the node, and
//!   everything in its right subtree compares `Greater`
//! - No two elements compare `Equal`
//! - `len` always equals the number of nodes
//!
//! ## Removal
//!
//! A node with two children takes the value of its in-order successor (the
//! minimum of its right subtree), and the successor's node is unlinked.
//!
//! ## Depth
//!
//! The tree is not rebalanced, so sorted input degrades it to a chain as
//! deep as it is long. No operation recurses along a path: descents loop over
//! links, and traversals and teardown use explicit stacks.

use core::cmp::Ordering;
use core::fmt;
use core::mem;
use std::collections::VecDeque;

use refrain_types::CollectionError;
use smallvec::SmallVec;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    data: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    #[inline(always)]
    fn leaf(data: T) -> Self {
        Self {
            data,
            left: None,
            right: None,
        }
    }
}

/// Unbalanced binary search tree.
pub struct OrderedTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedTree<T> {
    /// Creates an empty tree.
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Builds a minimal-height tree from ascending input.
    ///
    /// Runs of equal elements are collapsed to their first element. The root
    /// of every subtree is the lower midpoint of its range.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if `sorted` is not
    /// non-decreasing under `cmp`.
    pub fn from_sorted<F>(mut sorted: Vec<T>, cmp: F) -> Result<Self, CollectionError>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        if sorted
            .windows(2)
            .any(|pair| cmp(&pair[0], &pair[1]) == Ordering::Greater)
        {
            return Err(CollectionError::InvalidArgument(
                "input must be sorted in ascending order",
            ));
        }
        sorted.dedup_by(|later, earlier| cmp(&*earlier, &*later) == Ordering::Equal);

        let len = sorted.len();
        let mut slots: Vec<Option<T>> = sorted.into_iter().map(Some).collect();
        Ok(Self {
            root: build_balanced(&mut slots),
            len,
        })
    }

    /// Returns the number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Inserts `value`. Returns `false`, leaving the tree untouched, if an
    /// equal element is already present.
    pub fn insert<F>(&mut self, value: T, cmp: F) -> bool
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match cmp(&value, &node.data) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *link = Some(Box::new(Node::leaf(value)));
        self.len += 1;
        true
    }

    /// Removes and returns the element equal to `key`.
    pub fn remove<F>(&mut self, key: &T, cmp: F) -> Option<T>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let mut link = &mut self.root;
        loop {
            let node = link.as_deref()?;
            match cmp(key, &node.data) {
                Ordering::Less => link = &mut link.as_mut()?.left,
                Ordering::Greater => link = &mut link.as_mut()?.right,
                Ordering::Equal => break,
            }
        }

        let node = link.as_mut()?;
        let removed = if node.left.is_some() && node.right.is_some() {
            let successor = take_min(&mut node.right)?;
            mem::replace(&mut node.data, successor)
        } else {
            let Node { data, left, right } = *link.take()?;
            *link = left.or(right);
            data
        };
        self.len -= 1;
        Some(removed)
    }

    /// Returns the stored element equal to `key`.
    pub fn search<F>(&self, key: &T, cmp: F) -> Option<&T>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match cmp(key, &node.data) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.data),
            };
        }
        None
    }

    /// Returns the root element.
    pub fn root(&self) -> Result<&T, CollectionError> {
        self.root
            .as_deref()
            .map(|node| &node.data)
            .ok_or(CollectionError::EmptyCollection)
    }

    /// Returns the smallest element.
    pub fn min(&self) -> Result<&T, CollectionError> {
        let mut node = self.root.as_deref().ok_or(CollectionError::EmptyCollection)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.data)
    }

    /// Returns the largest element.
    pub fn max(&self) -> Result<&T, CollectionError> {
        let mut node = self.root.as_deref().ok_or(CollectionError::EmptyCollection)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.data)
    }

    /// Returns the number of edges on the longest root-to-leaf path.
    ///
    /// An empty tree has height `-1`; a single node has height `0`.
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut stack: SmallVec<[(&Node<T>, isize); 32]> = SmallVec::new();
        stack.extend(self.root.as_deref().map(|node| (node, 0)));
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|child| (child, depth + 1)));
            stack.extend(node.right.as_deref().map(|child| (child, depth + 1)));
        }
        height
    }

    /// Left subtree, node, right subtree.
    pub fn in_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: SmallVec<[&Node<T>; 32]> = SmallVec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            out.push(&node.data);
            current = node.right.as_deref();
        }
        out
    }

    /// Node, left subtree, right subtree.
    pub fn pre_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: SmallVec<[&Node<T>; 32]> = SmallVec::new();
        stack.extend(self.root.as_deref());
        while let Some(node) = stack.pop() {
            out.push(&node.data);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        out
    }

    /// Left subtree, right subtree, node.
    pub fn post_order(&self) -> Vec<&T> {
        self.post_order_nodes()
            .into_iter()
            .map(|node| &node.data)
            .collect()
    }

    /// Nodes in post-order, gathered as node-right-left and reversed.
    fn post_order_nodes(&self) -> Vec<&Node<T>> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: SmallVec<[&Node<T>; 32]> = SmallVec::new();
        stack.extend(self.root.as_deref());
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        out.reverse();
        out
    }

    /// Breadth-first, left to right within a level.
    pub fn level_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut queue: VecDeque<&Node<T>> = VecDeque::new();
        queue.extend(self.root.as_deref());
        while let Some(node) = queue.pop_front() {
            out.push(&node.data);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        out
    }

    /// Returns the deepest element that has both `a` and `b` in its subtree.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` unless both `a` and `b` are
    /// present.
    pub fn lowest_common_ancestor<F>(&self, a: &T, b: &T, cmp: F) -> Result<&T, CollectionError>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        if self.search(a, &cmp).is_none() || self.search(b, &cmp).is_none() {
            return Err(CollectionError::InvalidArgument(
                "both elements must be present in the tree",
            ));
        }

        let mut node = self.root.as_deref().ok_or(CollectionError::EmptyCollection)?;
        loop {
            let next = match (cmp(a, &node.data), cmp(b, &node.data)) {
                (Ordering::Less, Ordering::Less) => node.left.as_deref(),
                (Ordering::Greater, Ordering::Greater) => node.right.as_deref(),
                _ => return Ok(&node.data),
            };
            // Both targets were found below this node, so the child exists.
            node = next.ok_or(CollectionError::EmptyCollection)?;
        }
    }

    /// Consumes the tree and returns its elements in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<Box<Node<T>>> = Vec::new();
        let mut current = self.root.take();
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            let Node { data, right, .. } = *node;
            out.push(data);
            current = right;
        }
        out
    }
}

impl<T: Clone> OrderedTree<T> {
    /// Builds a new tree holding clones of `other`'s elements.
    ///
    /// Elements are reinserted in `other`'s pre-order, so the copy holds the
    /// same values. Its shape matches only when `cmp` is the ordering `other`
    /// was built with.
    pub fn copy_with<F>(other: &Self, cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let mut copy = Self::new();
        for value in other.pre_order() {
            copy.insert(value.clone(), &cmp);
        }
        copy
    }
}

impl<T: Clone> Clone for OrderedTree<T> {
    /// Copies the exact shape. Subtrees are assembled bottom-up from a
    /// post-order walk, so a right child is always on top of its left sibling.
    fn clone(&self) -> Self {
        let mut built: Vec<Link<T>> = Vec::new();
        for node in self.post_order_nodes() {
            let right = if node.right.is_some() { built.pop().flatten() } else { None };
            let left = if node.left.is_some() { built.pop().flatten() } else { None };
            built.push(Some(Box::new(Node {
                data: node.data.clone(),
                left,
                right,
            })));
        }
        Self {
            root: built.pop().flatten(),
            len: self.len,
        }
    }
}

impl<T> Drop for OrderedTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.in_order()).finish()
    }
}

/// Unlinks the leftmost node under `link` and returns its value.
fn take_min<T>(mut link: &mut Link<T>) -> Option<T> {
    while link.as_ref()?.left.is_some() {
        link = &mut link.as_mut()?.left;
    }
    let Node { data, right, .. } = *link.take()?;
    *link = right;
    Some(data)
}

fn build_balanced<T>(slots: &mut [Option<T>]) -> Link<T> {
    if slots.is_empty() {
        return None;
    }
    let mid = (slots.len() - 1) / 2;
    let (left, rest) = slots.split_at_mut(mid);
    let (middle, right) = rest.split_first_mut()?;
    Some(Box::new(Node {
        data: middle.take()?,
        left: build_balanced(left),
        right: build_balanced(right),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asc(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    fn build(values: &[i32]) -> OrderedTree<i32> {
        let mut tree = OrderedTree::new();
        for &v in values {
            tree.insert(v, asc);
        }
        tree
    }

    fn owned(refs: Vec<&i32>) -> Vec<i32> {
        refs.into_iter().copied().collect()
    }

    #[test]
    fn empty_tree() {
        let tree: OrderedTree<i32> = OrderedTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
        assert_eq!(tree.min(), Err(CollectionError::EmptyCollection));
        assert_eq!(tree.max(), Err(CollectionError::EmptyCollection));
        assert_eq!(tree.root(), Err(CollectionError::EmptyCollection));
        assert!(tree.in_order().is_empty());
    }

    #[test]
    fn insert_and_traverse() {
        let tree = build(&[5, 3, 8, 1, 4, 9]);

        assert_eq!(tree.len(), 6);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.root(), Ok(&5));
        assert_eq!(owned(tree.in_order()), vec![1, 3, 4, 5, 8, 9]);
        assert_eq!(owned(tree.pre_order()), vec![5, 3, 1, 4, 8, 9]);
        assert_eq!(owned(tree.post_order()), vec![1, 4, 3, 9, 8, 5]);
        assert_eq!(owned(tree.level_order()), vec![5, 3, 8, 1, 4, 9]);
        assert_eq!(tree.min(), Ok(&1));
        assert_eq!(tree.max(), Ok(&9));
    }

    #[test]
    fn equal_insert_is_noop() {
        let mut tree = build(&[2, 1, 3]);
        assert!(!tree.insert(2, asc));
        assert_eq!(tree.len(), 3);
        assert_eq!(owned(tree.in_order()), vec![1, 2, 3]);
    }

    #[test]
    fn search_hits_and_misses() {
        let tree = build(&[10, 5, 15]);
        assert_eq!(tree.search(&15, asc), Some(&15));
        assert_eq!(tree.search(&7, asc), None);
    }

    #[test]
    fn single_node_height_is_zero() {
        let tree = build(&[42]);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn remove_leaf_and_single_child() {
        let mut tree = build(&[5, 3, 8, 9]);

        assert_eq!(tree.remove(&3, asc), Some(3));
        assert_eq!(owned(tree.pre_order()), vec![5, 8, 9]);

        // 8 has only a right child; 9 is spliced into its place.
        assert_eq!(tree.remove(&8, asc), Some(8));
        assert_eq!(owned(tree.pre_order()), vec![5, 9]);
        assert_eq!(tree.len(), 2);

        assert_eq!(tree.remove(&100, asc), None);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn remove_two_children_takes_successor() {
        let mut tree = build(&[50, 30, 70, 60, 80, 65]);

        assert_eq!(tree.remove(&50, asc), Some(50));

        // 60 is the minimum of the right subtree and becomes the root; its
        // right child 65 moves up under 70.
        assert_eq!(tree.root(), Ok(&60));
        assert_eq!(owned(tree.pre_order()), vec![60, 30, 70, 65, 80]);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn remove_root_until_empty() {
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        while let Ok(&root) = tree.root() {
            assert_eq!(tree.remove(&root, asc), Some(root));
            let in_order = owned(tree.in_order());
            assert!(in_order.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(in_order.len(), tree.len());
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), -1);
    }

    #[test]
    fn from_sorted_is_balanced() {
        let tree = OrderedTree::from_sorted(vec![1, 3, 5, 7, 9], asc).unwrap();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.root(), Ok(&5));
        assert_eq!(owned(tree.in_order()), vec![1, 3, 5, 7, 9]);
        assert_eq!(owned(tree.pre_order()), vec![5, 1, 3, 7, 9]);
    }

    #[test]
    fn from_sorted_empty_and_duplicates() {
        let empty = OrderedTree::from_sorted(Vec::new(), asc).unwrap();
        assert!(empty.is_empty());

        let tree = OrderedTree::from_sorted(vec![1, 1, 2, 3, 3], asc).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(owned(tree.in_order()), vec![1, 2, 3]);
    }

    #[test]
    fn from_sorted_rejects_unsorted() {
        assert!(matches!(
            OrderedTree::from_sorted(vec![1, 5, 3], asc),
            Err(CollectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn lowest_common_ancestor_cases() {
        let tree = build(&[20, 10, 30, 5, 15, 25, 35, 12]);

        assert_eq!(tree.lowest_common_ancestor(&5, &15, asc), Ok(&10));
        assert_eq!(tree.lowest_common_ancestor(&12, &35, asc), Ok(&20));
        assert_eq!(tree.lowest_common_ancestor(&15, &12, asc), Ok(&15));
        assert_eq!(tree.lowest_common_ancestor(&25, &25, asc), Ok(&25));
        assert!(matches!(
            tree.lowest_common_ancestor(&5, &99, asc),
            Err(CollectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn copy_with_preserves_values() {
        let source = build(&[8, 4, 12, 2, 6]);
        let copy = OrderedTree::copy_with(&source, asc);
        assert_eq!(copy.in_order(), source.in_order());
        assert_eq!(copy.pre_order(), source.pre_order());

        let reversed = OrderedTree::copy_with(&source, |a: &i32, b: &i32| b.cmp(a));
        assert_eq!(owned(reversed.in_order()), vec![12, 8, 6, 4, 2]);
    }

    #[test]
    fn custom_ordering_by_field() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        let mut tree = OrderedTree::new();
        assert!(tree.insert("ccc", by_len));
        assert!(tree.insert("a", by_len));
        assert!(!tree.insert("b", by_len));
        assert_eq!(tree.search(&"z", by_len), Some(&"a"));
    }

    #[test]
    fn clone_keeps_shape() {
        let source = build(&[50, 30, 70, 20, 40, 60, 80, 65]);
        let copy = source.clone();
        assert_eq!(copy.pre_order(), source.pre_order());
        assert_eq!(copy.post_order(), source.post_order());
        assert_eq!(copy.height(), source.height());
        assert_eq!(copy.len(), source.len());
    }

    #[test]
    fn sorted_chain_does_not_overflow_stack() {
        const N: i32 = 30_000;
        let mut tree = OrderedTree::new();
        for v in 0..N {
            assert!(tree.insert(v, asc));
        }
        assert_eq!(tree.len(), N as usize);
        assert_eq!(tree.height(), (N - 1) as isize);
        assert_eq!(tree.search(&(N - 1), asc), Some(&(N - 1)));
        assert_eq!(tree.in_order().len(), N as usize);
        assert_eq!(tree.post_order()[0], &(N - 1));
        assert_eq!(tree.max(), Ok(&(N - 1)));

        assert_eq!(tree.remove(&(N - 1), asc), Some(N - 1));
        assert_eq!(tree.remove(&0, asc), Some(0));
        assert_eq!(tree.len(), N as usize - 2);

        let copy = tree.clone();
        assert_eq!(copy.height(), tree.height());
        let sorted = copy.into_sorted_vec();
        assert_eq!(sorted.len(), N as usize - 2);
        assert!(sorted.windows(2).all(|w| w[0] < w[1]));

        let mut descending = OrderedTree::new();
        for v in (0..N).rev() {
            descending.insert(v, asc);
        }
        assert_eq!(descending.min(), Ok(&0));
        assert_eq!(descending.remove(&(N / 2), asc), Some(N / 2));
        descending.clear();
        assert!(descending.is_empty());
    }

    #[test]
    fn into_sorted_vec_and_clear() {
        let tree = build(&[3, 1, 2]);
        assert_eq!(tree.clone().into_sorted_vec(), vec![1, 2, 3]);

        let mut tree = tree;
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }
}
