//! Diagnostics reported by failing predicates.

use std::error::Error;
use std::fmt;

use ndarray::{ArrayView, ArrayView1, ArrayView2, Dimension, Ix1, Ix2};

/// The predicate that produced a diagnostic.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    ApproximatelyEqual,
    MatrixIsSymmetric,
    MatrixColsAreOrthogonal,
    MatrixColsAreNormalized,
    MatrixIsOrthogonal,
    MatrixIsUpperTriangular,
    MatrixIsLowerTriangular,
    VectorsAreOrthogonal,
    VectorIsNormalized,
    VectorsAreOrthonormal,
}

impl Predicate {
    /// Name of the function implementing the predicate.
    pub fn name(self) -> &'static str {
        use Predicate::*;
        match self {
            ApproximatelyEqual => "approximately_equal",
            MatrixIsSymmetric => "matrix_is_symmetric",
            MatrixColsAreOrthogonal => "matrix_cols_are_orthogonal",
            MatrixColsAreNormalized => "matrix_cols_are_normalized",
            MatrixIsOrthogonal => "matrix_is_orthogonal",
            MatrixIsUpperTriangular => "matrix_is_upper_triangular",
            MatrixIsLowerTriangular => "matrix_is_lower_triangular",
            VectorsAreOrthogonal => "vectors_are_orthogonal",
            VectorIsNormalized => "vector_is_normalized",
            VectorsAreOrthonormal => "vectors_are_orthonormal",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sub-checks of composite predicates.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SubCheck {
    ColumnsOrthogonal,
    ColumnsNormalized,
    RowsOrthogonal,
    RowsNormalized,
    FirstNormalized,
    SecondNormalized,
    VectorsOrthogonal,
}

impl fmt::Display for SubCheck {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use SubCheck::*;
        let desc = match self {
            ColumnsOrthogonal => "columns not orthogonal",
            ColumnsNormalized => "columns not normalized",
            RowsOrthogonal => "rows not orthogonal",
            RowsNormalized => "rows not normalized",
            FirstNormalized => "first vector is not normalized",
            SecondNormalized => "second vector is not normalized",
            VectorsOrthogonal => "vectors not orthogonal",
        };
        f.write_str(desc)
    }
}

/// Reason why a predicate does not hold.
#[derive(Clone, Debug, PartialEq)]
pub enum Reason {
    /// The arrays have a different number of dimensions.
    DimensionMismatch { left: usize, right: usize },

    /// The arrays have the same number of dimensions, but differ in shape.
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },

    /// The predicate is not defined for arrays of this rank.
    WrongRank { expected: usize, actual: usize },

    /// Symmetry is only defined for square matrices.
    NonSquare { rows: usize, cols: usize },

    /// The vectors have different lengths.
    LengthMismatch { left: usize, right: usize },

    /// The largest absolute elementwise difference exceeds the tolerance.
    ToleranceExceeded { max_abs_diff: f64, tolerance: f64 },

    /// One of the compared arrays contains NaN.
    ContainsNaN,

    /// `a[i, j]` and `a[j, i]` differ by more than the tolerance.
    NotSymmetric {
        i: usize,
        j: usize,
        lower: f64,
        upper: f64,
        tolerance: f64,
    },

    /// The inner product of columns `i` and `j` exceeds the tolerance.
    ColumnsNotOrthogonal {
        i: usize,
        j: usize,
        dot: f64,
        tolerance: f64,
    },

    /// The norm of a column is not within the tolerance of one.
    ColumnNotNormalized {
        column: usize,
        norm: f64,
        tolerance: f64,
    },

    /// The inner product of two vectors exceeds the tolerance.
    VectorsNotOrthogonal { dot: f64, tolerance: f64 },

    /// The norm of a vector is not within the tolerance of one.
    VectorNotNormalized { norm: f64, tolerance: f64 },

    /// An element on the wrong side of the diagonal exceeds the tolerance.
    NotTriangular {
        i: usize,
        j: usize,
        value: f64,
        tolerance: f64,
    },

    /// A sub-check of a composite predicate failed.
    SubCheckFailed {
        check: SubCheck,
        cause: Box<Diagnostic>,
    },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Reason::*;
        match self {
            DimensionMismatch { left, right } => {
                write!(f, "a.ndim() (= {}) != b.ndim() (= {})", left, right)
            }
            ShapeMismatch { left, right } => {
                write!(f, "a.shape() (= {:?}) != b.shape() (= {:?})", left, right)
            }
            WrongRank { expected, actual } => write!(
                f,
                "can only be applied to {}-dimensional arrays, got {} dimension(s)",
                expected, actual
            ),
            NonSquare { rows, cols } => write!(f, "matrix is non-square ({}x{})", rows, cols),
            LengthMismatch { left, right } => {
                write!(f, "a.len() (= {}) != b.len() (= {})", left, right)
            }
            ToleranceExceeded {
                max_abs_diff,
                tolerance,
            } => write!(
                f,
                "max element of |a - b| (= {}) > {}",
                max_abs_diff, tolerance
            ),
            ContainsNaN => f.write_str("array contains NaN"),
            NotSymmetric {
                i,
                j,
                lower,
                upper,
                tolerance,
            } => write!(
                f,
                "a[{}, {}] (= {}) not within {} of a[{}, {}] (= {})",
                i, j, lower, tolerance, j, i, upper
            ),
            ColumnsNotOrthogonal { i, j, dot, tolerance } => write!(
                f,
                "dot(a[:, {}], a[:, {}]) (= {}) > {}",
                i, j, dot, tolerance
            ),
            ColumnNotNormalized {
                column,
                norm,
                tolerance,
            } => write!(
                f,
                "norm2(a[:, {}]) (= {}) not within {} of 1",
                column, norm, tolerance
            ),
            VectorsNotOrthogonal { dot, tolerance } => {
                write!(f, "inner product of a, b (= {}) > {}", dot, tolerance)
            }
            VectorNotNormalized { norm, tolerance } => {
                write!(f, "L2 norm of a (= {}) not within {} of 1", norm, tolerance)
            }
            NotTriangular {
                i,
                j,
                value,
                tolerance,
            } => write!(f, "|a[{}, {}]| (= {}) > {}", i, j, value.abs(), tolerance),
            SubCheckFailed { check, .. } => fmt::Display::fmt(check, f),
        }
    }
}

/// Diagnostic for a predicate that does not hold.
///
/// The `Display` implementation gives the human-readable message. For
/// composite predicates, the failing sub-check's own diagnostic is
/// available through `Error::source`.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    predicate: Predicate,
    reason: Reason,
}

impl Diagnostic {
    pub fn new(predicate: Predicate, reason: Reason) -> Self {
        Diagnostic { predicate, reason }
    }

    /// The predicate that failed.
    pub fn predicate(&self) -> Predicate {
        self.predicate
    }

    /// Why the predicate failed.
    pub fn reason(&self) -> &Reason {
        &self.reason
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.predicate, self.reason)
    }
}

impl Error for Diagnostic {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.reason {
            Reason::SubCheckFailed { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

/// Receiver of diagnostics.
///
/// A sink is invoked at most once per predicate call: only when the
/// predicate does not hold, before `false` is returned.
///
/// Implementations are provided for:
///
/// * `()`: discards diagnostics.
/// * `Option<S>`: forwards to the inner sink, if any.
/// * Closures `FnMut(&Diagnostic)`, including `&mut` references to them.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl DiagnosticSink for () {
    fn report(&mut self, _: &Diagnostic) {}
}

impl<S> DiagnosticSink for Option<S>
where
    S: DiagnosticSink,
{
    fn report(&mut self, diagnostic: &Diagnostic) {
        if let Some(sink) = self {
            sink.report(diagnostic);
        }
    }
}

impl<F> DiagnosticSink for F
where
    F: FnMut(&Diagnostic),
{
    fn report(&mut self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Convert the result of a check into a boolean, reporting the failure.
pub(crate) fn report<S>(result: Result<(), Diagnostic>, mut sink: S) -> bool
where
    S: DiagnosticSink,
{
    match result {
        Ok(()) => true,
        Err(diagnostic) => {
            sink.report(&diagnostic);
            false
        }
    }
}

/// Wrap the failure of a sub-check in a diagnostic of the composite.
pub(crate) fn sub_check(
    predicate: Predicate,
    check: SubCheck,
    result: Result<(), Diagnostic>,
) -> Result<(), Diagnostic> {
    result.map_err(|cause| {
        Diagnostic::new(
            predicate,
            Reason::SubCheckFailed {
                check,
                cause: Box::new(cause),
            },
        )
    })
}

fn wrong_rank(predicate: Predicate, expected: usize, actual: usize) -> Diagnostic {
    Diagnostic::new(predicate, Reason::WrongRank { expected, actual })
}

/// View `a` as a matrix, failing if it is not two-dimensional.
pub(crate) fn as_matrix<D>(
    a: ArrayView<f64, D>,
    predicate: Predicate,
) -> Result<ArrayView2<f64>, Diagnostic>
where
    D: Dimension,
{
    let ndim = a.ndim();
    a.into_dimensionality::<Ix2>()
        .map_err(|_| wrong_rank(predicate, 2, ndim))
}

/// View `a` as a vector, failing if it is not one-dimensional.
pub(crate) fn as_vector<D>(
    a: ArrayView<f64, D>,
    predicate: Predicate,
) -> Result<ArrayView1<f64>, Diagnostic>
where
    D: Dimension,
{
    let ndim = a.ndim();
    a.into_dimensionality::<Ix1>()
        .map_err(|_| wrong_rank(predicate, 1, ndim))
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use ndarray::{array, Array3};

    use super::{
        as_matrix, as_vector, report, sub_check, Diagnostic, DiagnosticSink, Predicate, Reason,
        SubCheck,
    };

    fn failure() -> Result<(), Diagnostic> {
        Err(Diagnostic::new(
            Predicate::VectorIsNormalized,
            Reason::VectorNotNormalized {
                norm: 2.,
                tolerance: 0.,
            },
        ))
    }

    #[test]
    fn report_invokes_sink_once_on_failure() {
        let mut calls = 0;
        assert!(!report(failure(), |_: &Diagnostic| calls += 1));
        assert_eq!(calls, 1);
    }

    #[test]
    fn report_does_not_invoke_sink_on_success() {
        let mut calls = 0;
        assert!(report(Ok(()), |_: &Diagnostic| calls += 1));
        assert_eq!(calls, 0);
    }

    #[test]
    fn absent_sinks() {
        assert!(!report(failure(), ()));

        let none: Option<fn(&Diagnostic)> = None;
        assert!(!report(failure(), none));
    }

    #[test]
    fn optional_sink() {
        let mut messages = Vec::new();
        {
            let mut collect = |d: &Diagnostic| messages.push(d.to_string());
            let sink: Option<&mut dyn FnMut(&Diagnostic)> = Some(&mut collect);
            assert!(!report(failure(), sink));
        }
        assert_eq!(
            messages,
            vec!["vector_is_normalized: L2 norm of a (= 2) not within 0 of 1".to_string()]
        );
    }

    #[test]
    fn sink_by_mutable_reference() {
        let mut seen = Vec::new();
        let mut sink = |d: &Diagnostic| seen.push(d.predicate());
        sink.report(&failure().unwrap_err());
        report(failure(), &mut sink);
        assert_eq!(seen, vec![Predicate::VectorIsNormalized; 2]);
    }

    #[test]
    fn sub_check_keeps_cause() {
        let diagnostic = sub_check(
            Predicate::VectorsAreOrthonormal,
            SubCheck::FirstNormalized,
            failure(),
        )
        .unwrap_err();

        assert_eq!(
            diagnostic.to_string(),
            "vectors_are_orthonormal: first vector is not normalized"
        );
        let cause = diagnostic.source().unwrap().to_string();
        assert!(cause.starts_with("vector_is_normalized: "));
    }

    #[test]
    fn rank_conversion() {
        let m = array![[1., 2.], [3., 4.]];
        assert!(as_matrix(m.view().into_dyn(), Predicate::MatrixIsSymmetric).is_ok());

        let v = array![1., 2.];
        assert_eq!(
            as_matrix(v.view(), Predicate::MatrixIsSymmetric)
                .unwrap_err()
                .reason(),
            &Reason::WrongRank {
                expected: 2,
                actual: 1
            }
        );
        assert!(as_vector(v.view().into_dyn(), Predicate::VectorIsNormalized).is_ok());

        let t = Array3::<f64>::zeros((2, 2, 2));
        assert_eq!(
            as_vector(t.view(), Predicate::VectorIsNormalized)
                .unwrap_err()
                .reason(),
            &Reason::WrongRank {
                expected: 1,
                actual: 3
            }
        );
    }
}
