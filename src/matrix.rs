//! Predicates over matrices.
//!
//! All predicates accept arrays of any dimensionality and fail with
//! [`Reason::WrongRank`](crate::Reason::WrongRank) for arrays that are not
//! two-dimensional.
//!
//! The tolerance is compared against the raw value of `tol`; it is not
//! clamped to zero as in [`approximately_equal`](crate::approximately_equal).
//! A negative tolerance therefore rejects every matrix that reaches the
//! comparison, and a NaN tolerance accepts every such matrix.

use ndarray::{ArrayView, Dimension};

use crate::diagnostic::{
    as_matrix, report, sub_check, Diagnostic, DiagnosticSink, Predicate, Reason, SubCheck,
};
use crate::kernel::{dot, norm2};

/// Check that `a` is a symmetric matrix.
///
/// `a` must be square, and `|a[i, j] - a[j, i]| <= tol` must hold for every
/// element below the diagonal.
pub fn check_matrix_is_symmetric<D>(a: ArrayView<f64, D>, tol: f64) -> Result<(), Diagnostic>
where
    D: Dimension,
{
    let predicate = Predicate::MatrixIsSymmetric;
    let a = as_matrix(a, predicate)?;

    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(Diagnostic::new(predicate, Reason::NonSquare { rows, cols }));
    }

    for i in 0..rows {
        for j in 0..i {
            let lower = a[[i, j]];
            let upper = a[[j, i]];
            if (lower - upper).abs() > tol {
                return Err(Diagnostic::new(
                    predicate,
                    Reason::NotSymmetric {
                        i,
                        j,
                        lower,
                        upper,
                        tolerance: tol,
                    },
                ));
            }
        }
    }

    Ok(())
}

/// Returns `true` if `a` is a symmetric matrix.
pub fn matrix_is_symmetric<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    report(check_matrix_is_symmetric(a, tol), sink)
}

/// Check that the columns of `a` are pairwise orthogonal.
///
/// For every pair of distinct columns, the inner product may not exceed
/// `tol`. Note that the inner product is not taken in absolute value, so
/// negative inner products always pass.
pub fn check_matrix_cols_are_orthogonal<D>(
    a: ArrayView<f64, D>,
    tol: f64,
) -> Result<(), Diagnostic>
where
    D: Dimension,
{
    let predicate = Predicate::MatrixColsAreOrthogonal;
    let a = as_matrix(a, predicate)?;

    let cols = a.ncols();
    for i in 0..cols {
        for j in i + 1..cols {
            let dot = dot(a.column(i), a.column(j));
            if dot > tol {
                return Err(Diagnostic::new(
                    predicate,
                    Reason::ColumnsNotOrthogonal {
                        i,
                        j,
                        dot,
                        tolerance: tol,
                    },
                ));
            }
        }
    }

    Ok(())
}

/// Returns `true` if the columns of `a` are pairwise orthogonal.
pub fn matrix_cols_are_orthogonal<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    report(check_matrix_cols_are_orthogonal(a, tol), sink)
}

/// Check that every column of `a` has an L2 norm within `tol` of one.
pub fn check_matrix_cols_are_normalized<D>(
    a: ArrayView<f64, D>,
    tol: f64,
) -> Result<(), Diagnostic>
where
    D: Dimension,
{
    let predicate = Predicate::MatrixColsAreNormalized;
    let a = as_matrix(a, predicate)?;

    for column in 0..a.ncols() {
        let norm = norm2(a.column(column));
        if (norm - 1.).abs() > tol {
            return Err(Diagnostic::new(
                predicate,
                Reason::ColumnNotNormalized {
                    column,
                    norm,
                    tolerance: tol,
                },
            ));
        }
    }

    Ok(())
}

/// Returns `true` if every column of `a` is normalized.
pub fn matrix_cols_are_normalized<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    report(check_matrix_cols_are_normalized(a, tol), sink)
}

/// Check that `a` is an orthogonal matrix.
///
/// Requires, in this order: orthogonal columns, normalized columns,
/// orthogonal rows, normalized rows. The first failing sub-check is
/// reported, with its own diagnostic as the cause.
pub fn check_matrix_is_orthogonal<D>(a: ArrayView<f64, D>, tol: f64) -> Result<(), Diagnostic>
where
    D: Dimension,
{
    let predicate = Predicate::MatrixIsOrthogonal;
    let a = as_matrix(a, predicate)?;

    sub_check(
        predicate,
        SubCheck::ColumnsOrthogonal,
        check_matrix_cols_are_orthogonal(a, tol),
    )?;
    sub_check(
        predicate,
        SubCheck::ColumnsNormalized,
        check_matrix_cols_are_normalized(a, tol),
    )?;
    sub_check(
        predicate,
        SubCheck::RowsOrthogonal,
        check_matrix_cols_are_orthogonal(a.t(), tol),
    )?;
    sub_check(
        predicate,
        SubCheck::RowsNormalized,
        check_matrix_cols_are_normalized(a.t(), tol),
    )
}

/// Returns `true` if `a` is an orthogonal matrix.
pub fn matrix_is_orthogonal<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    report(check_matrix_is_orthogonal(a, tol), sink)
}

/// Check that `a` is upper triangular.
///
/// Every element strictly below the diagonal must satisfy `|a[i, j]| <= tol`.
/// `a` does not have to be square.
pub fn check_matrix_is_upper_triangular<D>(
    a: ArrayView<f64, D>,
    tol: f64,
) -> Result<(), Diagnostic>
where
    D: Dimension,
{
    let predicate = Predicate::MatrixIsUpperTriangular;
    let a = as_matrix(a, predicate)?;

    let (rows, cols) = a.dim();
    for i in 1..rows {
        for j in 0..i.min(cols) {
            check_zero(predicate, i, j, a[[i, j]], tol)?;
        }
    }

    Ok(())
}

/// Returns `true` if `a` is upper triangular.
pub fn matrix_is_upper_triangular<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    report(check_matrix_is_upper_triangular(a, tol), sink)
}

/// Check that `a` is lower triangular.
///
/// Every element strictly above the diagonal must satisfy `|a[i, j]| <= tol`.
/// `a` does not have to be square.
pub fn check_matrix_is_lower_triangular<D>(
    a: ArrayView<f64, D>,
    tol: f64,
) -> Result<(), Diagnostic>
where
    D: Dimension,
{
    let predicate = Predicate::MatrixIsLowerTriangular;
    let a = as_matrix(a, predicate)?;

    let (rows, cols) = a.dim();
    for i in 0..rows {
        for j in i + 1..cols {
            check_zero(predicate, i, j, a[[i, j]], tol)?;
        }
    }

    Ok(())
}

/// Returns `true` if `a` is lower triangular.
pub fn matrix_is_lower_triangular<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    report(check_matrix_is_lower_triangular(a, tol), sink)
}

fn check_zero(
    predicate: Predicate,
    i: usize,
    j: usize,
    value: f64,
    tol: f64,
) -> Result<(), Diagnostic> {
    if value.abs() > tol {
        return Err(Diagnostic::new(
            predicate,
            Reason::NotTriangular {
                i,
                j,
                value,
                tolerance: tol,
            },
        ));
    }

    Ok(())
}
