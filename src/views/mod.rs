//! Structured matrix and vector views.
//!
//! Each view stores only the data its structure needs and synthesizes the
//! rest on access. All of them implement [`MatrixRef`](crate::MatrixRef)
//! (or [`VectorRef`](crate::VectorRef)) so they can be passed wherever a
//! dense matrix is accepted.

mod axis;
mod banded;
mod permutation;

pub use axis::AxisVector;
pub use banded::{
    band_length, Banded, BandedMatrix, BandedRow, BandedRowMut, BidiagonalMatrix,
    TridiagonalMatrix,
};
pub use permutation::PermutationMatrix;
