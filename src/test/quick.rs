use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// the tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the element into the tree.
    Insert(T),
    /// Remove the element from the tree.
    Remove(T),
    /// Check membership of the element.
    Contains(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            2 => Op::Contains(T::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
