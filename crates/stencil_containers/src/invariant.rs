//! Structural invariant violations reported by the ordered containers.
//!
//! Node positions are arena indices for red-black trees and in-order
//! positions for treaps.

use thiserror::Error;

/// A broken tree invariant.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root of a red-black tree is red.
    #[error("root node is red")]
    RedRoot,
    /// A red node has a red child.
    #[error("red node {node} has a red child")]
    RedChildOfRed {
        /// Position of the parent.
        node: usize,
    },
    /// Two subtrees of one node disagree on black height.
    #[error("node {node} has black heights {left} (left) and {right} (right)")]
    BlackHeightMismatch {
        /// Position of the node.
        node: usize,
        /// Black height of the left subtree.
        left: usize,
        /// Black height of the right subtree.
        right: usize,
    },
    /// A key is out of order relative to an ancestor.
    #[error("node {node} is out of key order")]
    OrderViolation {
        /// Position of the node.
        node: usize,
    },
    /// A treap child outranks its parent in priority.
    #[error("node {node} has a higher priority than its parent")]
    HeapViolation {
        /// Position of the child.
        node: usize,
    },
    /// A child does not point back at its parent.
    #[error("node {node} has an inconsistent parent link")]
    BrokenParentLink {
        /// Position of the node.
        node: usize,
    },
    /// The number of reachable nodes disagrees with the recorded size.
    #[error("{reachable} nodes reachable but {recorded} recorded")]
    SizeMismatch {
        /// Nodes reachable from the root.
        reachable: usize,
        /// Recorded size.
        recorded: usize,
    },
}
