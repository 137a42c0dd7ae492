//! Error signals raised by tree operations.

/// The error signaled when an operation that is only defined on a
/// non-empty tree is invoked on an empty one.
///
/// Raised by [`find_min`][crate::Tree::find_min],
/// [`find_max`][crate::Tree::find_max], [`equal`][crate::Tree::equal]
/// (empty argument), [`copy`][crate::Tree::copy],
/// [`mirror`][crate::Tree::mirror], and
/// [`is_mirror`][crate::Tree::is_mirror]. It carries no payload beyond
/// its identity and is always surfaced to the immediate caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("underflow: operation requires a non-empty tree")]
pub struct UnderflowError;

/// A non-fatal status returned when a requested rotation cannot be
/// applied. The tree is left unmodified in every case.
///
/// This is deliberately distinct from [`UnderflowError`]: the operation
/// is not applicable at the requested position, rather than undefined on
/// the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RotationError {
    /// The requested value is not present in the tree.
    #[error("value is not present in the tree")]
    ValueNotPresent,
    /// The target node has no child on the side that would be promoted:
    /// a right rotation needs a left child and a left rotation needs a
    /// right child.
    #[error("cannot rotate: target node has no child to promote")]
    MissingChild,
}
