//! A generic ordered container built on an unbalanced Binary Search
//! Tree (BST).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored elements. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one element
//! and will sometimes have child `Node`s. The most important invariants
//! of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have
//!    an element less than its own element.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have
//!    an element greater than its own element.
//!
//! Elements equal under the total order are never stored twice: inserting
//! a duplicate is a silent no-op, so the container behaves as a set.
//!
//! This tree is deliberately *unbalanced*: nothing rebalances it behind
//! your back, so inserting already-sorted input degenerates it into a
//! linked list and every walk becomes `O(n)`. The single-node
//! [`rotate_left`][tree::Tree::rotate_left] and
//! [`rotate_right`][tree::Tree::rotate_right] primitives are exposed for
//! callers that want to restructure explicitly.
//!
//! Beyond the usual insert/remove/search, the tree supports structural
//! queries (height, node count, the aggregate "full" check), structural
//! comparison and value equality against another tree, deep copy,
//! full-structural mirroring, and level-order enumeration.
//!
//! Operations defined only on non-empty trees (`find_min`, `find_max`,
//! `equal`, `copy`, `mirror`, `is_mirror`) signal
//! [`UnderflowError`][error::UnderflowError] when that precondition is
//! violated.
//!
//! All recursive operations consume stack proportional to the tree's
//! height; for a degenerate tree that is proportional to the number of
//! elements.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod tree;

pub use error::{RotationError, UnderflowError};
pub use tree::Tree;

#[cfg(test)]
mod test;
