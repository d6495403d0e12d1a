//! Deprecated predicate names.
//!
//! Every function forwards to its replacement and returns the same result.
//! Each call logs a deprecation notice at the `warn` level.

#![allow(deprecated)]

use log::warn;
use ndarray::{ArrayView, Dimension};

use crate::diagnostic::DiagnosticSink;
use crate::matrix::{
    matrix_cols_are_normalized, matrix_cols_are_orthogonal, matrix_is_lower_triangular,
    matrix_is_orthogonal, matrix_is_symmetric, matrix_is_upper_triangular,
};

fn notice(name: &str, replacement: &str) {
    warn!(
        "{}() is deprecated. Please use {}() instead",
        name, replacement
    );
}

#[deprecated(since = "0.1.0", note = "use `matrix_is_symmetric`")]
pub fn symmetric<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    notice("symmetric", "matrix_is_symmetric");
    matrix_is_symmetric(a, tol, sink)
}

#[deprecated(since = "0.1.0", note = "use `matrix_is_orthogonal`")]
pub fn orthogonal<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    notice("orthogonal", "matrix_is_orthogonal");
    matrix_is_orthogonal(a, tol, sink)
}

#[deprecated(since = "0.1.0", note = "use `matrix_is_orthogonal`")]
pub fn matrix_orthogonal<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    notice("matrix_orthogonal", "matrix_is_orthogonal");
    matrix_is_orthogonal(a, tol, sink)
}

#[deprecated(since = "0.1.0", note = "use `matrix_cols_are_orthogonal`")]
pub fn columns_orthogonal<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    notice("columns_orthogonal", "matrix_cols_are_orthogonal");
    matrix_cols_are_orthogonal(a, tol, sink)
}

#[deprecated(since = "0.1.0", note = "use `matrix_cols_are_normalized`")]
pub fn matrix_cols_normalized<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    notice("matrix_cols_normalized", "matrix_cols_are_normalized");
    matrix_cols_are_normalized(a, tol, sink)
}

#[deprecated(since = "0.1.0", note = "use `matrix_is_upper_triangular`")]
pub fn upper_triangular<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    notice("upper_triangular", "matrix_is_upper_triangular");
    matrix_is_upper_triangular(a, tol, sink)
}

#[deprecated(since = "0.1.0", note = "use `matrix_is_lower_triangular`")]
pub fn lower_triangular<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    notice("lower_triangular", "matrix_is_lower_triangular");
    matrix_is_lower_triangular(a, tol, sink)
}
