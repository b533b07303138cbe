use core::marker::PhantomData;

use crate::traits::{Scalar, VectorRef};

/// One-hot vector: length `len`, a single one at `axis`, zero elsewhere.
///
/// Rows and columns of a [`PermutationMatrix`](super::PermutationMatrix)
/// are axis vectors. Nothing is stored besides the two indices, and
/// [`dot`](VectorRef::dot) is a single lookup into the other operand.
///
/// ```
/// use matview::{AxisVector, DynVector, VectorRef};
///
/// let e1 = AxisVector::<f64>::new(1, 3);
/// let v = DynVector::from_slice(&[4.0, 5.0, 6.0]);
/// assert_eq!(e1.dot(&v), 5.0);
/// assert_eq!(e1.at(0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisVector<T> {
    axis: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> AxisVector<T> {
    /// Panics if `axis >= len`.
    pub fn new(axis: usize, len: usize) -> Self {
        assert!(axis < len, "axis {} out of range for length {}", axis, len);
        Self {
            axis,
            len,
            _marker: PhantomData,
        }
    }

    /// Position of the single one.
    #[inline]
    pub fn axis(&self) -> usize {
        self.axis
    }
}

impl<T: Scalar> VectorRef<T> for AxisVector<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn at(&self, i: usize) -> T {
        if i == self.axis {
            T::one()
        } else {
            T::zero()
        }
    }

    fn dot<V: VectorRef<T> + ?Sized>(&self, other: &V) -> T {
        assert_eq!(self.len, other.len(), "vector length mismatch");
        other.at(self.axis)
    }

    fn is_zero(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynmatrix::DynVector;

    #[test]
    fn elements() {
        let e = AxisVector::<f64>::new(2, 4);
        assert_eq!(e.len(), 4);
        assert_eq!(e.axis(), 2);
        let dense = e.to_dyn_vector();
        assert_eq!(dense.as_slice(), &[0.0, 0.0, 1.0, 0.0]);
        assert!(!e.is_zero());
        assert!(!e.is_fully_mutable());
        assert!(e.get(4).is_err());
    }

    #[test]
    fn dot_is_a_lookup() {
        let e = AxisVector::<f64>::new(0, 3);
        let v = DynVector::from_slice(&[7.0, 8.0, 9.0]);
        assert_eq!(e.dot(&v), 7.0);
        // same answer from the dense side
        assert_eq!(v.dot(&e), 7.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn axis_out_of_range() {
        let _ = AxisVector::<f64>::new(3, 3);
    }
}
