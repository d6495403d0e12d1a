//! Approximate equality of arrays.
//!
//! The tolerance is clamped to `max(0, tol)`. A NaN tolerance is clamped to
//! zero, so it demands exact equality.

use ndarray::{ArrayView, Dimension};

use crate::diagnostic::{report, Diagnostic, DiagnosticSink, Predicate, Reason};
use crate::kernel::{abs_diff, sum, supremum};

/// Check that `a` and `b` are approximately equal.
///
/// The arrays must have the same dimensionality and shape. The largest
/// absolute elementwise difference may not exceed `max(0, tol)`. Arrays
/// that contain NaN are never equal, not even to themselves.
pub fn check_approximately_equal<D1, D2>(
    a: ArrayView<f64, D1>,
    b: ArrayView<f64, D2>,
    tol: f64,
) -> Result<(), Diagnostic>
where
    D1: Dimension,
    D2: Dimension,
{
    let fail = |reason| Err(Diagnostic::new(Predicate::ApproximatelyEqual, reason));

    if a.ndim() != b.ndim() {
        return fail(Reason::DimensionMismatch {
            left: a.ndim(),
            right: b.ndim(),
        });
    }

    if a.shape() != b.shape() {
        return fail(Reason::ShapeMismatch {
            left: a.shape().to_vec(),
            right: b.shape().to_vec(),
        });
    }

    let diff = abs_diff(a.into_dyn(), b.into_dyn());

    let max_abs_diff = supremum(diff.view());
    if max_abs_diff > tol.max(0.) {
        return fail(Reason::ToleranceExceeded {
            max_abs_diff,
            tolerance: tol,
        });
    }

    // The supremum skips NaN differences, the sum does not.
    if sum(diff.view()).is_nan() {
        return fail(Reason::ContainsNaN);
    }

    Ok(())
}

/// Returns `true` if `a` and `b` are approximately equal.
///
/// See [`check_approximately_equal`] for the exact comparison. On failure,
/// the diagnostic is passed to `sink`.
pub fn approximately_equal<D1, D2, S>(
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
    report(check_approximately_equal(a, b, tol), sink)
}

/// Alias of [`approximately_equal`].
pub fn equal<D1, D2, S>(a: ArrayView<f64, D1>, b: ArrayView<f64, D2>, tol: f64, sink: S) -> bool
where
    D1: Dimension,
    D2: Dimension,
    S: DiagnosticSink,
{
    approximately_equal(a, b, tol, sink)
}
