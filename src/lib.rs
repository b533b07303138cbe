//! # matview
//!
//! Structured matrix views and QR-first bidiagonalization, no-std compatible
//! (with `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use matview::{DynMatrix, PermutationMatrix};
//! use matview::linalg::{prefers_tall, BidiagonalDecomposition};
//!
//! // A permutation is stored as indices and applied by gathering rows
//! let p = PermutationMatrix::<f64>::new(&[2, 0, 1]);
//! let a = DynMatrix::from_rows(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! let pa = p.inner_product(&a);
//! assert_eq!(pa.row_slice(0), &[5.0, 6.0]);
//!
//! // Tall matrices are bidiagonalized through a pivoted QR
//! let tall = DynMatrix::from_fn(10, 3, |i, j| ((i * (j + 1)) as f64).sin());
//! assert!(prefers_tall(tall.nrows(), tall.ncols()));
//! let bd = tall.bidiagonal_tall().unwrap();
//! assert_eq!(bd.b(true).shape(), (3, 3));
//! ```
//!
//! ## Modules
//!
//! - [`dynmatrix`]: Heap-allocated row-major `DynMatrix<T>` and its
//!   single-index sibling [`DynVector<T>`]. The dense type every view
//!   materializes into.
//!
//! - [`views`]: Storage-light structured matrices and vectors:
//!   [`AxisVector`] (a standard basis vector), [`PermutationMatrix`],
//!   and the [`Banded`] family ([`BandedMatrix`], [`TridiagonalMatrix`],
//!   [`BidiagonalMatrix`]) with per-row views over their band storage.
//!
//! - [`linalg`]: Householder QR with column pivoting, Householder
//!   bidiagonalization, and [`linalg::TallBidiagonal`] which composes them.
//!   Decompositions are reusable service objects behind the
//!   [`linalg::PivotedQr`] and [`linalg::BidiagonalDecomposition`] traits.
//!
//! - [`traits`]: Element and access traits:
//!   - [`Scalar`] / [`FloatScalar`]: element types
//!   - [`MatrixRef`] / [`MatrixMut`]: element access with bounds checks and
//!     an optional dense row fast path
//!   - [`VectorRef`] / [`VectorMut`]: the same for vectors
//!
//! Structured views reject writes that would break their structure with a
//! [`MatrixError`] rather than silently densifying.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via system libm, `std::error::Error` impls |
//!
//! Without `std`, floating-point math falls back to the pure-Rust `libm`
//! that `num-traits` is always built with.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dynmatrix;
mod error;
pub mod linalg;
pub mod traits;
pub mod views;

pub use dynmatrix::{DynMatrix, DynVector};
pub use error::MatrixError;
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar, VectorMut, VectorRef};
pub use views::{
    AxisVector, Banded, BandedMatrix, BidiagonalMatrix, PermutationMatrix, TridiagonalMatrix,
};
