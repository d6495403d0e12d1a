//! Predicates over vectors.
//!
//! Unlike the matrix predicates, the tolerance of the vector predicates is
//! clamped to `max(0, tol)`. A NaN tolerance is clamped to zero as well.

use ndarray::{ArrayView, Dimension};

use crate::diagnostic::{
    as_vector, report, sub_check, Diagnostic, DiagnosticSink, Predicate, Reason, SubCheck,
};
use crate::kernel::{dot, norm2};

/// Check that the vectors `a` and `b` are orthogonal.
///
/// Both arrays must be one-dimensional and of the same length. The inner
/// product may not exceed `max(0, tol)`; it is not taken in absolute value.
pub fn check_vectors_are_orthogonal<D1, D2>(
    a: ArrayView<f64, D1>,
    b: ArrayView<f64, D2>,
    tol: f64,
) -> Result<(), Diagnostic>
where
    D1: Dimension,
    D2: Dimension,
{
    let predicate = Predicate::VectorsAreOrthogonal;
    let a = as_vector(a, predicate)?;
    let b = as_vector(b, predicate)?;

    if a.len() != b.len() {
        return Err(Diagnostic::new(
            predicate,
            Reason::LengthMismatch {
                left: a.len(),
                right: b.len(),
            },
        ));
    }

    let dot = dot(a, b);
    if dot > tol.max(0.) {
        return Err(Diagnostic::new(
            predicate,
            Reason::VectorsNotOrthogonal {
                dot,
                tolerance: tol,
            },
        ));
    }

    Ok(())
}

/// Returns `true` if the vectors `a` and `b` are orthogonal.
pub fn vectors_are_orthogonal<D1, D2, S>(
    a: ArrayView<f64, D1>,
    b: ArrayView<f64, D2>,
    tol: f64,
    sink: S,
) -> bool
where
    D1: Dimension,
    D2: Dimension,
    S: DiagnosticSink,
{
    report(check_vectors_are_orthogonal(a, b, tol), sink)
}

/// Check that the L2 norm of the vector `a` is within `max(0, tol)` of one.
pub fn check_vector_is_normalized<D>(a: ArrayView<f64, D>, tol: f64) -> Result<(), Diagnostic>
where
    D: Dimension,
{
    let predicate = Predicate::VectorIsNormalized;
    let a = as_vector(a, predicate)?;

    let norm = norm2(a);
    if (norm - 1.).abs() > tol.max(0.) {
        return Err(Diagnostic::new(
            predicate,
            Reason::VectorNotNormalized {
                norm,
                tolerance: tol,
            },
        ));
    }

    Ok(())
}

/// Returns `true` if the vector `a` is normalized.
pub fn vector_is_normalized<D, S>(a: ArrayView<f64, D>, tol: f64, sink: S) -> bool
where
    D: Dimension,
    S: DiagnosticSink,
{
    report(check_vector_is_normalized(a, tol), sink)
}

/// Check that `a` and `b` are orthonormal.
///
/// Requires, in this order: `a` normalized, `b` normalized, `a` and `b`
/// orthogonal.
pub fn check_vectors_are_orthonormal<D1, D2>(
    a: ArrayView<f64, D1>,
    b: ArrayView<f64, D2>,
    tol: f64,
) -> Result<(), Diagnostic>
where
    D1: Dimension,
    D2: Dimension,
{
    let predicate = Predicate::VectorsAreOrthonormal;

    sub_check(
        predicate,
        SubCheck::FirstNormalized,
        check_vector_is_normalized(a.view(), tol),
    )?;
    sub_check(
        predicate,
        SubCheck::SecondNormalized,
        check_vector_is_normalized(b.view(), tol),
    )?;
    sub_check(
        predicate,
        SubCheck::VectorsOrthogonal,
        check_vectors_are_orthogonal(a, b, tol),
    )
}

/// Returns `true` if `a` and `b` are orthonormal.
pub fn vectors_are_orthonormal<D1, D2, S>(
    a: ArrayView<f64, D1>,
    b: ArrayView<f64, D2>,
    tol: f64,
    sink: S,
) -> bool
where
    D1: Dimension,
    D2: Dimension,
    S: DiagnosticSink,
{
    report(check_vectors_are_orthonormal(a, b, tol), sink)
}
