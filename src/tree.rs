//! The tree engine: node ownership model and every operation on it.
//!
//! Structural changes propagate by owned take-and-return recursion: each
//! recursive call consumes the subtree link and hands back the (possibly
//! new) subtree root for the caller to reattach. There are no parent
//! pointers anywhere in the node graph.

use std::cmp::Ordering;
use std::fmt;

use tracing::warn;

use crate::error::{RotationError, UnderflowError};

/// An optional, exclusively owned subtree.
type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug)]
struct Node<T> {
    element: T,
    left: Link<T>,
    right: Link<T>,
}

/// An ordered container backed by an unbalanced Binary Search Tree.
///
/// The tree is the sole owner of its node graph. Operations that build a
/// related tree ([`copy`][Tree::copy], [`mirror`][Tree::mirror]) produce
/// entirely disjoint graphs, never shared nodes.
///
/// No operation rebalances the tree, so worst-case costs are linear in
/// the number of elements.
///
/// # Examples
///
/// ```
/// use bstree::Tree;
///
/// let mut tree = Tree::new();
///
/// // Nothing in here yet.
/// assert!(tree.is_empty());
/// assert!(!tree.contains(&1));
///
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
///
/// // Inserting a duplicate is a silent no-op.
/// tree.insert(2);
///
/// assert_eq!(tree.count(), 3);
/// assert_eq!(tree.sorted(), [&1, &2, &3]);
/// ```
#[derive(Debug)]
pub struct Tree<T> {
    root: Link<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Returns `true` if the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Releases the entire node graph, leaving the tree empty.
    pub fn make_empty(&mut self) {
        self.root = None;
    }

    /// Returns `true` if the tree holds an element equal to `x`.
    ///
    /// Searching for an absent value is not an error; it simply returns
    /// `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: Ord,
    {
        Node::contains_in(&self.root, x)
    }

    /// Inserts `x` into the tree. If an equal element is already present
    /// the call is a no-op and the existing element is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.count(), 1);
    /// ```
    pub fn insert(&mut self, x: T)
    where
        T: Ord,
    {
        self.root = Some(Node::insert_at(self.root.take(), x));
    }

    /// Removes the element equal to `x` from the tree. Nothing is done
    /// if no such element is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// tree.remove(&1);
    ///
    /// assert!(!tree.contains(&1));
    ///
    /// // Removing an absent value is a no-op, not an error.
    /// tree.remove(&42);
    /// ```
    pub fn remove(&mut self, x: &T)
    where
        T: Ord,
    {
        self.root = Node::remove_at(self.root.take(), x);
    }

    /// Returns a reference to the smallest element in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`UnderflowError`] if the tree is empty.
    pub fn find_min(&self) -> Result<&T, UnderflowError> {
        let root = self.root.as_deref().ok_or(UnderflowError)?;
        Ok(&Node::min_node(root).element)
    }

    /// Returns a reference to the largest element in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`UnderflowError`] if the tree is empty.
    pub fn find_max(&self) -> Result<&T, UnderflowError> {
        let mut node = self.root.as_deref().ok_or(UnderflowError)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.element)
    }

    /// Returns the height of the tree: the number of links on the
    /// longest root-to-leaf path. An empty tree has height `-1` and a
    /// single node has height `0`.
    ///
    /// Heights are recomputed on every call; nothing is cached.
    pub fn height(&self) -> isize {
        Node::height_of(&self.root)
    }

    /// Returns the total number of elements in the tree.
    pub fn count(&self) -> usize {
        Node::count_in(&self.root)
    }

    /// Returns `true` iff `count() == 2 * height() + 1`, the number of
    /// nodes a perfect binary tree of this height would have.
    ///
    /// This is an aggregate count check only: it does not verify
    /// per-node shape, so it is necessary but not sufficient for the
    /// tree actually being perfect. The weak semantic is intentional and
    /// callers must not read more into a `true` result.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut full = Tree::new();
    /// for x in [2, 1, 3] {
    ///     full.insert(x);
    /// }
    /// assert!(full.is_full());
    ///
    /// let mut chain = Tree::new();
    /// for x in [1, 2, 3] {
    ///     chain.insert(x);
    /// }
    /// assert!(!chain.is_full());
    /// ```
    pub fn is_full(&self) -> bool {
        self.count() as isize == 2 * self.height() + 1
    }

    /// Returns `true` iff both node graphs have identical shape: the
    /// same presence and absence of left and right children at every
    /// position. Element values are ignored entirely.
    pub fn compare_structure(&self, other: &Self) -> bool {
        Node::same_shape(&self.root, &other.root)
    }

    /// Returns `true` iff both trees have identical shape and every
    /// corresponding pair of elements compares equal. Elements are
    /// compared by value, never by reference identity.
    ///
    /// # Errors
    ///
    /// Returns [`UnderflowError`] if `other` is empty.
    pub fn equal(&self, other: &Self) -> Result<bool, UnderflowError>
    where
        T: PartialEq,
    {
        if other.is_empty() {
            return Err(UnderflowError);
        }
        Ok(Node::equal_nodes(&self.root, &other.root))
    }

    /// Builds a brand-new tree, structurally and value-identical to this
    /// one, sharing no nodes with it.
    ///
    /// # Errors
    ///
    /// Returns [`UnderflowError`] if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    ///
    /// let copied = tree.copy().unwrap();
    /// assert!(tree.equal(&copied).unwrap());
    /// ```
    pub fn copy(&self) -> Result<Self, UnderflowError>
    where
        T: Clone,
    {
        let root = self.root.as_deref().ok_or(UnderflowError)?;
        Ok(Self {
            root: Some(Node::duplicate(root)),
        })
    }

    /// Builds a new tree with left and right flipped at every position,
    /// not merely at the root. The result's in-order sequence is the
    /// reverse of this tree's.
    ///
    /// A mirrored tree generally violates the BST ordering invariant, so
    /// calling `insert`/`remove`/`contains` on it gives meaningless
    /// results unless the caller re-validates order first.
    ///
    /// # Errors
    ///
    /// Returns [`UnderflowError`] if the tree is empty.
    pub fn mirror(&self) -> Result<Self, UnderflowError>
    where
        T: Clone,
    {
        let root = self.root.as_deref().ok_or(UnderflowError)?;
        Ok(Self {
            root: Some(Node::reflect(root)),
        })
    }

    /// Returns `true` iff mirroring `other` yields a tree [`equal`] to
    /// this one.
    ///
    /// # Errors
    ///
    /// Returns [`UnderflowError`] under the same emptiness conditions as
    /// [`mirror`][Tree::mirror] and [`equal`][Tree::equal].
    ///
    /// [`equal`]: Tree::equal
    pub fn is_mirror(&self, other: &Self) -> Result<bool, UnderflowError>
    where
        T: Clone + PartialEq,
    {
        let mirrored = other.mirror()?;
        self.equal(&mirrored)
    }

    /// Rotates the subtree rooted at the node holding `value` to the
    /// right: the node's left child is promoted into its place, the node
    /// becomes the promoted child's right child, and the promoted
    /// child's former right subtree is reattached as the node's new left
    /// subtree. The BST ordering invariant is preserved and the rest of
    /// the tree is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::ValueNotPresent`] if no node holds
    /// `value`, and [`RotationError::MissingChild`] if the node has no
    /// left child to promote. The tree is left unmodified in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in [50, 40, 65, 35, 45] {
    ///     tree.insert(x);
    /// }
    /// tree.rotate_right(&50).unwrap();
    ///
    /// // The in-order sequence is unchanged but 40 is now the root,
    /// // with 50 as its right child.
    /// assert_eq!(tree.sorted(), [&35, &40, &45, &50, &65]);
    /// assert_eq!(tree.level_order()[0], [&40]);
    /// assert_eq!(tree.level_order()[1], [&35, &50]);
    /// ```
    pub fn rotate_right(&mut self, value: &T) -> Result<(), RotationError>
    where
        T: Ord,
    {
        let Some(target) = Node::find_in(&self.root, value) else {
            warn!("rotate_right: value is not present in the tree; no rotation applied");
            return Err(RotationError::ValueNotPresent);
        };
        if target.left.is_none() {
            warn!("rotate_right: target node has no left child to promote; no rotation applied");
            return Err(RotationError::MissingChild);
        }
        self.root = self.root.take().map(|root| Node::rotate_right_at(root, value));
        Ok(())
    }

    /// Rotates the subtree rooted at the node holding `value` to the
    /// left: the symmetric counterpart of
    /// [`rotate_right`][Tree::rotate_right], promoting the right child.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::ValueNotPresent`] if no node holds
    /// `value`, and [`RotationError::MissingChild`] if the node has no
    /// right child to promote. The tree is left unmodified in both
    /// cases.
    pub fn rotate_left(&mut self, value: &T) -> Result<(), RotationError>
    where
        T: Ord,
    {
        let Some(target) = Node::find_in(&self.root, value) else {
            warn!("rotate_left: value is not present in the tree; no rotation applied");
            return Err(RotationError::ValueNotPresent);
        };
        if target.right.is_none() {
            warn!("rotate_left: target node has no right child to promote; no rotation applied");
            return Err(RotationError::MissingChild);
        }
        self.root = self.root.take().map(|root| Node::rotate_left_at(root, value));
        Ok(())
    }

    /// Returns the elements in sorted (in-order) order.
    pub fn sorted(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.count());
        Node::in_order(&self.root, &mut out);
        out
    }

    /// Returns the elements grouped by depth: depth 0 (the root) first,
    /// each depth's elements left-to-right. An empty tree yields an
    /// empty vector.
    ///
    /// Each level is gathered by its own depth-limited descent from the
    /// root rather than a queue-based breadth-first walk.
    pub fn level_order(&self) -> Vec<Vec<&T>> {
        let mut levels = Vec::new();
        for depth in 0..=self.height() {
            let mut level = Vec::new();
            Node::collect_level(&self.root, depth, &mut level);
            levels.push(level);
        }
        levels
    }

    /// Renders the elements in sorted order, one per line, to `out`.
    /// An empty tree renders as the single line `Empty tree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let mut rendered = String::new();
    /// tree.print_tree(&mut rendered).unwrap();
    /// assert_eq!(rendered, "Empty tree\n");
    ///
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// rendered.clear();
    /// tree.print_tree(&mut rendered).unwrap();
    /// assert_eq!(rendered, "1\n2\n3\n");
    /// ```
    pub fn print_tree<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        T: fmt::Display,
    {
        if self.is_empty() {
            return writeln!(out, "Empty tree");
        }
        Node::write_in_order(&self.root, out)
    }

    /// Renders the elements grouped by depth, one line per depth with
    /// elements space-separated, to `out`. An empty tree renders as the
    /// single line `Empty tree`.
    pub fn print_level_order<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        T: fmt::Display,
    {
        if self.is_empty() {
            return writeln!(out, "Empty tree");
        }
        for level in self.level_order() {
            let mut first = true;
            for element in level {
                if first {
                    first = false;
                } else {
                    write!(out, " ")?;
                }
                write!(out, "{element}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl<T> Node<T> {
    fn new(element: T) -> Box<Self> {
        Box::new(Self {
            element,
            left: None,
            right: None,
        })
    }

    fn contains_in(link: &Link<T>, x: &T) -> bool
    where
        T: Ord,
    {
        match link.as_deref() {
            None => false,
            Some(node) => match x.cmp(&node.element) {
                Ordering::Less => Self::contains_in(&node.left, x),
                Ordering::Greater => Self::contains_in(&node.right, x),
                Ordering::Equal => true,
            },
        }
    }

    fn find_in<'a>(link: &'a Link<T>, x: &T) -> Option<&'a Self>
    where
        T: Ord,
    {
        let node = link.as_deref()?;
        match x.cmp(&node.element) {
            Ordering::Less => Self::find_in(&node.left, x),
            Ordering::Greater => Self::find_in(&node.right, x),
            Ordering::Equal => Some(node),
        }
    }

    /// Consumes the subtree link and returns its new root with `x`
    /// attached at the first absent link on the descent, or the
    /// unchanged subtree when an equal element is found en route.
    fn insert_at(link: Link<T>, x: T) -> Box<Self>
    where
        T: Ord,
    {
        match link {
            None => Self::new(x),
            Some(mut node) => {
                match x.cmp(&node.element) {
                    Ordering::Less => node.left = Some(Self::insert_at(node.left.take(), x)),
                    Ordering::Greater => node.right = Some(Self::insert_at(node.right.take(), x)),
                    // Duplicate; do nothing.
                    Ordering::Equal => {}
                }
                node
            }
        }
    }

    /// Consumes the subtree link and returns its new root with the node
    /// holding `x` removed, if any.
    fn remove_at(link: Link<T>, x: &T) -> Link<T>
    where
        T: Ord,
    {
        let mut node = link?;
        match x.cmp(&node.element) {
            Ordering::Less => node.left = Self::remove_at(node.left.take(), x),
            Ordering::Greater => node.right = Self::remove_at(node.right.take(), x),
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                // Two children: the successor (minimum of the right
                // subtree) takes over this node's element. Detaching it
                // always terminates because the successor has no left
                // child.
                (Some(left), Some(right)) => {
                    let (rest, successor) = Self::detach_min(right);
                    node.element = successor;
                    node.left = Some(left);
                    node.right = rest;
                }
                // One child or none: the child (or the absent link)
                // takes this node's place.
                (only, None) | (None, only) => return only,
            },
        }
        Some(node)
    }

    /// Detaches the minimum node of the subtree, returning the remaining
    /// subtree and the detached element.
    fn detach_min(mut node: Box<Self>) -> (Link<T>, T) {
        match node.left.take() {
            None => (node.right.take(), node.element),
            Some(left) => {
                let (rest, min) = Self::detach_min(left);
                node.left = rest;
                (Some(node), min)
            }
        }
    }

    fn min_node(node: &Self) -> &Self {
        match node.left.as_deref() {
            None => node,
            Some(left) => Self::min_node(left),
        }
    }

    fn height_of(link: &Link<T>) -> isize {
        match link.as_deref() {
            None => -1,
            Some(node) => 1 + Self::height_of(&node.left).max(Self::height_of(&node.right)),
        }
    }

    fn count_in(link: &Link<T>) -> usize {
        match link.as_deref() {
            None => 0,
            Some(node) => 1 + Self::count_in(&node.left) + Self::count_in(&node.right),
        }
    }

    fn same_shape(a: &Link<T>, b: &Link<T>) -> bool {
        match (a.as_deref(), b.as_deref()) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                Self::same_shape(&a.left, &b.left) && Self::same_shape(&a.right, &b.right)
            }
            _ => false,
        }
    }

    fn equal_nodes(a: &Link<T>, b: &Link<T>) -> bool
    where
        T: PartialEq,
    {
        match (a.as_deref(), b.as_deref()) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.element == b.element
                    && Self::equal_nodes(&a.left, &b.left)
                    && Self::equal_nodes(&a.right, &b.right)
            }
            _ => false,
        }
    }

    /// Pre-order duplication: a fresh node for the current element, then
    /// fresh subtrees for both children.
    fn duplicate(node: &Self) -> Box<Self>
    where
        T: Clone,
    {
        Box::new(Self {
            element: node.element.clone(),
            left: node.left.as_deref().map(Self::duplicate),
            right: node.right.as_deref().map(Self::duplicate),
        })
    }

    /// Pre-order mirrored duplication: the new left subtree is built
    /// from the source's right subtree and vice versa, at every
    /// position.
    fn reflect(node: &Self) -> Box<Self>
    where
        T: Clone,
    {
        Box::new(Self {
            element: node.element.clone(),
            left: node.right.as_deref().map(Self::reflect),
            right: node.left.as_deref().map(Self::reflect),
        })
    }

    /// Descends to the node holding `x` and rotates it to the right.
    /// The caller has already verified that the node exists and has a
    /// left child, so this pass cannot fail.
    ///
    /// ```text
    ///       k2            k1
    ///      /  \          /  \
    ///     k1   z   ->   x    k2
    ///    /  \               /  \
    ///   x    y             y    z
    /// ```
    fn rotate_right_at(mut node: Box<Self>, x: &T) -> Box<Self>
    where
        T: Ord,
    {
        match x.cmp(&node.element) {
            Ordering::Less => {
                node.left = node.left.take().map(|left| Self::rotate_right_at(left, x));
                node
            }
            Ordering::Greater => {
                node.right = node.right.take().map(|right| Self::rotate_right_at(right, x));
                node
            }
            Ordering::Equal => match node.left.take() {
                Some(mut promoted) => {
                    node.left = promoted.right.take();
                    promoted.right = Some(node);
                    promoted
                }
                // Ruled out by the caller's probe.
                None => node,
            },
        }
    }

    /// The symmetric counterpart of [`Node::rotate_right_at`].
    fn rotate_left_at(mut node: Box<Self>, x: &T) -> Box<Self>
    where
        T: Ord,
    {
        match x.cmp(&node.element) {
            Ordering::Less => {
                node.left = node.left.take().map(|left| Self::rotate_left_at(left, x));
                node
            }
            Ordering::Greater => {
                node.right = node.right.take().map(|right| Self::rotate_left_at(right, x));
                node
            }
            Ordering::Equal => match node.right.take() {
                Some(mut promoted) => {
                    node.right = promoted.left.take();
                    promoted.left = Some(node);
                    promoted
                }
                None => node,
            },
        }
    }

    fn in_order<'a>(link: &'a Link<T>, out: &mut Vec<&'a T>) {
        if let Some(node) = link.as_deref() {
            Self::in_order(&node.left, out);
            out.push(&node.element);
            Self::in_order(&node.right, out);
        }
    }

    fn collect_level<'a>(link: &'a Link<T>, depth: isize, out: &mut Vec<&'a T>) {
        let Some(node) = link.as_deref() else {
            return;
        };
        if depth == 0 {
            out.push(&node.element);
        } else {
            Self::collect_level(&node.left, depth - 1, out);
            Self::collect_level(&node.right, depth - 1, out);
        }
    }

    fn write_in_order<W: fmt::Write>(link: &Link<T>, out: &mut W) -> fmt::Result
    where
        T: fmt::Display,
    {
        if let Some(node) = link.as_deref() {
            Self::write_in_order(&node.left, out)?;
            writeln!(out, "{}", node.element)?;
            Self::write_in_order(&node.right, out)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a script of operations to a tree and a `BTreeSet`, the
    /// standard library's duplicate-free ordered container, asserting
    /// membership parity along the way.
    fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, set: &mut BTreeSet<T>)
    where
        T: Ord + Clone,
    {
        for op in ops {
            match op {
                Op::Insert(x) => {
                    tree.insert(x.clone());
                    set.insert(x.clone());
                }
                Op::Remove(x) => {
                    tree.remove(x);
                    set.remove(x);
                }
                Op::Contains(x) => assert_eq!(tree.contains(x), set.contains(x)),
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_matches_btreeset_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            tree.count() == set.len() && tree.sorted() == set.iter().collect::<Vec<_>>()
        }
    }

    quickcheck::quickcheck! {
        fn sorted_is_strictly_ascending(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            tree.sorted().windows(2).all(|pair| pair[0] < pair[1])
        }
    }

    quickcheck::quickcheck! {
        fn mirror_involution(xs: Vec<i8>) -> quickcheck::TestResult {
            let mut tree = Tree::new();
            for x in xs {
                tree.insert(x);
            }
            if tree.is_empty() {
                return quickcheck::TestResult::discard();
            }

            let back = tree.mirror().unwrap().mirror().unwrap();
            quickcheck::TestResult::from_bool(tree.equal(&back).unwrap())
        }
    }
}
