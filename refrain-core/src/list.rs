//! Doubly linked list with a movable cursor.
//!
//! [`OrderedList`] is the bucket type of [`ChainedTable`](crate::table::ChainedTable).
//! Nodes live in an [`Arena`] and link to their neighbours by slot id, so the
//! list owns every node outright and no node holds a reference to another.
//!
//! The cursor is a single external position used for O(1) mutation in the
//! middle of the list: position it with [`position_at_first`], walk it with
//! [`advance`] / [`retreat`], then insert after it or unlink its element.
//! Once it walks past either end it is "off end" and every cursor operation
//! fails with [`CollectionError::CursorInvalid`] until it is repositioned.
//!
//! [`position_at_first`]: OrderedList::position_at_first
//! [`advance`]: OrderedList::advance
//! [`retreat`]: OrderedList::retreat

use core::fmt;

use refrain_types::CollectionError;

use crate::arena::{Arena, SlotId};

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Unbounded doubly linked sequence with one cursor.
pub struct OrderedList<T> {
    nodes: Arena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    cursor: Option<SlotId>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedList<T> {
    /// Creates an empty list with the cursor off end.
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            head: None,
            tail: None,
            cursor: None,
        }
    }

    /// Returns the number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns `true` if the cursor is not positioned on an element.
    #[inline(always)]
    pub fn is_at_end(&self) -> bool {
        self.cursor.is_none()
    }

    /// Returns the first element.
    pub fn first(&self) -> Result<&T, CollectionError> {
        let id = self.head.ok_or(CollectionError::EmptyCollection)?;
        Ok(&self.nodes[id].value)
    }

    /// Returns the last element.
    pub fn last(&self) -> Result<&T, CollectionError> {
        let id = self.tail.ok_or(CollectionError::EmptyCollection)?;
        Ok(&self.nodes[id].value)
    }

    /// Returns the element under the cursor.
    pub fn cursor_value(&self) -> Result<&T, CollectionError> {
        let id = self.cursor.ok_or(CollectionError::CursorInvalid)?;
        Ok(&self.nodes[id].value)
    }

    /// Returns the element under the cursor, mutably.
    pub fn cursor_value_mut(&mut self) -> Result<&mut T, CollectionError> {
        let id = self.cursor.ok_or(CollectionError::CursorInvalid)?;
        Ok(&mut self.nodes[id].value)
    }

    /// Inserts at the front. The cursor is not moved.
    pub fn add_first(&mut self, value: T) {
        let id = self.nodes.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old) => self.nodes[old].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Inserts at the back. The cursor is not moved.
    pub fn add_last(&mut self, value: T) {
        let id = self.nodes.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old) => self.nodes[old].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    /// Inserts directly after the cursor's element. The cursor is not moved.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::CursorInvalid` if the cursor is off end.
    pub fn add_after_cursor(&mut self, value: T) -> Result<(), CollectionError> {
        let at = self.cursor.ok_or(CollectionError::CursorInvalid)?;
        if self.tail == Some(at) {
            self.add_last(value);
            return Ok(());
        }

        let next = self.nodes[at].next;
        let id = self.nodes.insert(Node {
            value,
            prev: Some(at),
            next,
        });
        self.nodes[at].next = Some(id);
        if let Some(next) = next {
            self.nodes[next].prev = Some(id);
        }
        Ok(())
    }

    /// Removes and returns the first element.
    ///
    /// If the cursor was on that element it moves off end.
    pub fn remove_first(&mut self) -> Result<T, CollectionError> {
        let id = self.head.ok_or(CollectionError::EmptyCollection)?;
        Ok(self.unlink(id))
    }

    /// Removes and returns the last element.
    ///
    /// If the cursor was on that element it moves off end.
    pub fn remove_last(&mut self) -> Result<T, CollectionError> {
        let id = self.tail.ok_or(CollectionError::EmptyCollection)?;
        Ok(self.unlink(id))
    }

    /// Removes and returns the cursor's element, leaving the cursor off end.
    pub fn remove_at_cursor(&mut self) -> Result<T, CollectionError> {
        let id = self.cursor.ok_or(CollectionError::CursorInvalid)?;
        Ok(self.unlink(id))
    }

    /// Moves the cursor to the first element (off end if the list is empty).
    #[inline]
    pub fn position_at_first(&mut self) {
        self.cursor = self.head;
    }

    /// Moves the cursor one element towards the back.
    pub fn advance(&mut self) -> Result<(), CollectionError> {
        let id = self.cursor.ok_or(CollectionError::CursorInvalid)?;
        self.cursor = self.nodes[id].next;
        Ok(())
    }

    /// Moves the cursor one element towards the front.
    pub fn retreat(&mut self) -> Result<(), CollectionError> {
        let id = self.cursor.ok_or(CollectionError::CursorInvalid)?;
        self.cursor = self.nodes[id].prev;
        Ok(())
    }

    /// Positions the cursor on the element at `index`.
    pub fn advance_to_index(&mut self, index: usize) -> Result<(), CollectionError> {
        if index >= self.len() {
            return Err(CollectionError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        self.position_at_first();
        for _ in 0..index {
            self.advance()?;
        }
        Ok(())
    }

    /// Removes every element and moves the cursor off end.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.cursor = None;
    }

    /// Rotates the list right by `num_moves`: each move takes the last
    /// element to the front.
    ///
    /// The cursor keeps pointing at the same element.
    pub fn spin(&mut self, num_moves: usize) {
        let len = self.len();
        if len < 2 {
            return;
        }
        for _ in 0..num_moves % len {
            let (Some(tail), Some(head)) = (self.tail, self.head) else {
                return;
            };
            let new_tail = self.nodes[tail].prev;
            if let Some(new_tail) = new_tail {
                self.nodes[new_tail].next = None;
            }
            self.tail = new_tail;
            self.nodes[tail].prev = None;
            self.nodes[tail].next = Some(head);
            self.nodes[head].prev = Some(tail);
            self.head = Some(tail);
        }
    }

    /// Iterates front to back. Does not touch the cursor.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.len(),
        }
    }

    fn unlink(&mut self, id: SlotId) -> T {
        let (prev, next) = {
            let node = &self.nodes[id];
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        if self.cursor == Some(id) {
            self.cursor = None;
        }

        match self.nodes.remove(id) {
            Some(node) => node.value,
            None => unreachable!("list: linked slot {id} was vacant"),
        }
    }
}

impl<T: PartialEq> OrderedList<T> {
    /// Returns the zero-based position of the first element equal to `value`.
    pub fn find_index(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| v == value)
    }
}

impl<T: Clone> OrderedList<T> {
    /// Builds a new list alternating elements of `self` and `other`,
    /// starting with `self`. Leftovers of the longer list are appended.
    ///
    /// `[1, 2, 3, 4]` and `[5, 6]` give `[1, 5, 2, 6, 3, 4]`.
    pub fn interleave(&self, other: &Self) -> Self {
        let mut out = Self::new();
        let mut a = self.iter();
        let mut b = other.iter();
        loop {
            match (a.next(), b.next()) {
                (None, None) => break,
                (x, y) => {
                    out.extend(x.cloned());
                    out.extend(y.cloned());
                }
            }
        }
        out
    }
}

impl<T: fmt::Display> OrderedList<T> {
    /// Renders `"1. a\n2. b\n"` followed by a blank line.
    pub fn numbered(&self) -> String {
        let mut out = String::new();
        for (i, value) in self.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, value));
        }
        out.push('\n');
        out
    }
}

/// Space-separated elements followed by a newline.
impl<T: fmt::Display> fmt::Display for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{} ", value)?;
        }
        writeln!(f)
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Structural equality: same length, pairwise-equal elements in order.
impl<T: PartialEq> PartialEq for OrderedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for OrderedList<T> {}

/// Copies elements in order. The copy's cursor starts off end.
impl<T: Clone> Clone for OrderedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> Extend<T> for OrderedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add_last(value);
        }
    }
}

impl<T> FromIterator<T> for OrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back iterator over an [`OrderedList`].
pub struct Iter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    next: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
