//! Approximate numerical predicates over `ndarray` arrays.
//!
//! Every predicate returns `true` when it holds. When it does not hold, a
//! [`Diagnostic`] describing the first violation is passed to a
//! [`DiagnosticSink`]. Pass `()` to discard diagnostics:
//!
//! ```
//! use ndarray::arr2;
//! use ndtest::{matrix_is_symmetric, Diagnostic};
//!
//! let a = arr2(&[[1., 2.], [2.01, 1.]]);
//! assert!(matrix_is_symmetric(a.view(), 1e-1, ()));
//!
//! let mut message = None;
//! assert!(!matrix_is_symmetric(a.view(), 1e-4, |d: &Diagnostic| {
//!     message = Some(d.to_string())
//! }));
//! assert!(message.unwrap().starts_with("matrix_is_symmetric: a[1, 0]"));
//! ```
//!
//! Each predicate also has a `check_*` counterpart that returns the
//! diagnostic as an error.

pub mod deprecated;

mod diagnostic;
pub use crate::diagnostic::{Diagnostic, DiagnosticSink, Predicate, Reason, SubCheck};

mod equal;
pub use crate::equal::{approximately_equal, check_approximately_equal, equal};

pub mod kernel;

mod matrix;
pub use crate::matrix::{
    check_matrix_cols_are_normalized, check_matrix_cols_are_orthogonal,
    check_matrix_is_lower_triangular, check_matrix_is_orthogonal, check_matrix_is_symmetric,
    check_matrix_is_upper_triangular, matrix_cols_are_normalized, matrix_cols_are_orthogonal,
    matrix_is_lower_triangular, matrix_is_orthogonal, matrix_is_symmetric,
    matrix_is_upper_triangular,
};

pub mod suite;

mod util;
pub use crate::util::VersionInfo;

mod vector;
pub use crate::vector::{
    check_vector_is_normalized, check_vectors_are_orthogonal, check_vectors_are_orthonormal,
    vector_is_normalized, vectors_are_orthogonal, vectors_are_orthonormal,
};

/// Tolerance used when none is given.
pub const DEFAULT_TOLERANCE: f64 = 0.0;
