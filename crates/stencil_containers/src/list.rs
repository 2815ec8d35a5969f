//! Singly linked list.

use std::fmt;

use crate::range::{ForwardRange, InputRange, Iterable};
use crate::sequential::SequentialOps;

struct Node<T> {
    element: T,
    next: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

/// A singly linked list with constant-time front operations.
pub struct List<T> {
    head: Link<T>,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Prepends `element`.
    pub fn push_front(&mut self, element: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { element, next }));
        self.len += 1;
    }

    /// Removes and returns the front element.
    ///
    /// # Panics
    /// Panics if the list is empty.
    pub fn pull_front(&mut self) -> T {
        match self.head.take() {
            Some(node) => {
                self.head = node.next;
                self.len -= 1;
                node.element
            }
            None => panic!("pull_front on an empty list"),
        }
    }

    /// Drops the front element.
    ///
    /// # Panics
    /// Panics if the list is empty.
    pub fn pop_front(&mut self) {
        drop(self.pull_front());
    }

    /// Borrows the front element.
    ///
    /// # Panics
    /// Panics if the list is empty.
    #[must_use]
    pub fn view_front(&self) -> &T {
        match &self.head {
            Some(node) => &node.element,
            None => panic!("view_front on an empty list"),
        }
    }

    /// Copies the front element.
    ///
    /// # Panics
    /// Panics if the list is empty.
    #[must_use]
    pub fn take_front(&self) -> T
    where
        T: Clone,
    {
        self.view_front().clone()
    }

    /// Removes the first element equal to `value`. Returns true if found.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut cursor = &mut self.head;
        loop {
            match cursor {
                None => return false,
                Some(node) if node.element == *value => {
                    *cursor = node.next.take();
                    self.len -= 1;
                    return true;
                }
                Some(node) => cursor = &mut node.next,
            }
        }
    }

    /// Drops every element.
    pub fn purge(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }

    /// Forward range from the front.
    #[must_use]
    pub fn range(&self) -> ListRange<'_, T> {
        ListRange {
            node: self.head.as_deref(),
        }
    }

    /// Iterates front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.range().elements()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.purge();
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let mut elements: Vec<&T> = self.iter().collect();
        let mut copy = Self::new();
        while let Some(element) = elements.pop() {
            copy.push_front(element.clone());
        }
        copy
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T> FromIterator<T> for List<T> {
    /// Builds a list holding the items in iteration order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut items: Vec<T> = iter.into_iter().collect();
        let mut list = Self::new();
        while let Some(item) = items.pop() {
            list.push_front(item);
        }
        list
    }
}

impl<T> Iterable for List<T> {
    type Element = T;
    type Range<'a>
        = ListRange<'a, T>
    where
        Self: 'a;

    fn range(&self) -> ListRange<'_, T> {
        List::range(self)
    }

    fn size(&self) -> usize {
        self.len
    }
}

impl<T> SequentialOps for List<T> {}

/// Forward range over a [`List`].
pub struct ListRange<'a, T> {
    node: Option<&'a Node<T>>,
}

impl<T> Clone for ListRange<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListRange<'_, T> {}

impl<'a, T> InputRange<'a> for ListRange<'a, T> {
    type Item = T;

    fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    fn pop_front(&mut self) {
        match self.node {
            Some(node) => self.node = node.next.as_deref(),
            None => panic!("pop_front on an empty range"),
        }
    }

    fn view_front(&self) -> &'a T {
        match self.node {
            Some(node) => &node.element,
            None => panic!("view_front on an empty range"),
        }
    }
}

impl<'a, T> ForwardRange<'a> for ListRange<'a, T> {}
