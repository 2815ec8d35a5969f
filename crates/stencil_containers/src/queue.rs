//! Doubly linked queue.
//!
//! Nodes live in an index arena with a free list, so links are plain
//! indices and the queue owns all of its storage in one allocation.

use std::fmt;

use crate::range::{BidirectionalRange, ForwardRange, InputRange, Iterable};
use crate::sequential::SequentialOps;

#[derive(Clone, Debug)]
struct Node<T> {
    element: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A doubly linked queue with constant-time operations at both ends.
#[derive(Clone)]
pub struct Queue<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the queue holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node(&self, index: usize) -> &Node<T> {
        match &self.nodes[index] {
            Some(node) => node,
            None => panic!("queue link to a free node"),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        match &mut self.nodes[index] {
            Some(node) => node,
            None => panic!("queue link to a free node"),
        }
    }

    fn allocate(&mut self, node: Node<T>) -> usize {
        if let Some(index) = self.free.pop() {
            self.nodes[index] = Some(node);
            index
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    fn unlink(&mut self, index: usize) -> T {
        let node = match self.nodes[index].take() {
            Some(node) => node,
            None => panic!("queue link to a free node"),
        };
        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }
        self.free.push(index);
        self.len -= 1;
        node.element
    }

    /// Prepends `element`.
    pub fn push_front(&mut self, element: T) {
        let index = self.allocate(Node {
            element,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => self.node_mut(head).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.len += 1;
    }

    /// Appends `element`.
    pub fn push_back(&mut self, element: T) {
        let index = self.allocate(Node {
            element,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
    }

    /// Removes and returns the front element.
    ///
    /// # Panics
    /// Panics if the queue is empty.
    pub fn pull_front(&mut self) -> T {
        match self.head {
            Some(head) => self.unlink(head),
            None => panic!("pull_front on an empty queue"),
        }
    }

    /// Removes and returns the back element.
    ///
    /// # Panics
    /// Panics if the queue is empty.
    pub fn pull_back(&mut self) -> T {
        match self.tail {
            Some(tail) => self.unlink(tail),
            None => panic!("pull_back on an empty queue"),
        }
    }

    /// Drops the front element.
    ///
    /// # Panics
    /// Panics if the queue is empty.
    pub fn pop_front(&mut self) {
        drop(self.pull_front());
    }

    /// Drops the back element.
    ///
    /// # Panics
    /// Panics if the queue is empty.
    pub fn pop_back(&mut self) {
        drop(self.pull_back());
    }

    /// Borrows the front element.
    ///
    /// # Panics
    /// Panics if the queue is empty.
    #[must_use]
    pub fn view_front(&self) -> &T {
        match self.head {
            Some(head) => &self.node(head).element,
            None => panic!("view_front on an empty queue"),
        }
    }

    /// Borrows the back element.
    ///
    /// # Panics
    /// Panics if the queue is empty.
    #[must_use]
    pub fn view_back(&self) -> &T {
        match self.tail {
            Some(tail) => &self.node(tail).element,
            None => panic!("view_back on an empty queue"),
        }
    }

    /// Copies the front element.
    ///
    /// # Panics
    /// Panics if the queue is empty.
    #[must_use]
    pub fn take_front(&self) -> T
    where
        T: Clone,
    {
        self.view_front().clone()
    }

    /// Copies the back element.
    ///
    /// # Panics
    /// Panics if the queue is empty.
    #[must_use]
    pub fn take_back(&self) -> T
    where
        T: Clone,
    {
        self.view_back().clone()
    }

    /// Removes the first element equal to `value`. Returns true if found.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = self.node(index);
            if node.element == *value {
                self.unlink(index);
                return true;
            }
            cursor = node.next;
        }
        false
    }

    /// Drops every element and releases the arena.
    pub fn purge(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Bidirectional range over the whole queue.
    #[must_use]
    pub fn range(&self) -> QueueRange<'_, T> {
        QueueRange {
            queue: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Iterates front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.range().elements()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Queue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        for item in iter {
            queue.push_back(item);
        }
        queue
    }
}

impl<T> Iterable for Queue<T> {
    type Element = T;
    type Range<'a>
        = QueueRange<'a, T>
    where
        Self: 'a;

    fn range(&self) -> QueueRange<'_, T> {
        Queue::range(self)
    }

    fn size(&self) -> usize {
        self.len
    }
}

impl<T> SequentialOps for Queue<T> {}

/// Bidirectional range over a [`Queue`].
pub struct QueueRange<'a, T> {
    queue: &'a Queue<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<T> Clone for QueueRange<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for QueueRange<'_, T> {}

impl<'a, T> QueueRange<'a, T> {
    fn at(&self, end: Option<usize>, operation: &str) -> &'a Node<T> {
        match end {
            Some(index) if self.remaining > 0 => self.queue.node(index),
            _ => panic!("{operation} on an empty range"),
        }
    }
}

impl<'a, T> InputRange<'a> for QueueRange<'a, T> {
    type Item = T;

    fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    fn pop_front(&mut self) {
        self.front = self.at(self.front, "pop_front").next;
        self.remaining -= 1;
    }

    fn view_front(&self) -> &'a T {
        &self.at(self.front, "view_front").element
    }
}

impl<'a, T> ForwardRange<'a> for QueueRange<'a, T> {}

impl<'a, T> BidirectionalRange<'a> for QueueRange<'a, T> {
    fn pop_back(&mut self) {
        self.back = self.at(self.back, "pop_back").prev;
        self.remaining -= 1;
    }

    fn view_back(&self) -> &'a T {
        &self.at(self.back, "view_back").element
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    #[derive(Clone, Debug)]
    enum Op {
        PushFront(i32),
        PushBack(i32),
        PullFront,
        PullBack,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<i32>().prop_map(Op::PushFront),
            any::<i32>().prop_map(Op::PushBack),
            Just(Op::PullFront),
            Just(Op::PullBack),
        ]
    }

    proptest! {
        #[test]
        fn matches_vecdeque(ops in prop::collection::vec(op(), 0..128)) {
            let mut q = Queue::new();
            let mut model = VecDeque::new();
            for op in ops {
                match op {
                    Op::PushFront(v) => { q.push_front(v); model.push_front(v); }
                    Op::PushBack(v) => { q.push_back(v); model.push_back(v); }
                    Op::PullFront => if let Some(v) = model.pop_front() {
                        prop_assert_eq!(q.pull_front(), v);
                    },
                    Op::PullBack => if let Some(v) = model.pop_back() {
                        prop_assert_eq!(q.pull_back(), v);
                    },
                }
            }
            prop_assert_eq!(q.len(), model.len());
            prop_assert!(q.iter().eq(model.iter()));
        }
    }
}
