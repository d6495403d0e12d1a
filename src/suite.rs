//! Check suites read from TOML files.
//!
//! A suite is a list of named checks, each applying one predicate to one
//! or two arrays:
//!
//! ```toml
//! [[check]]
//! name = "rotation is orthogonal"
//! predicate = "matrix_is_orthogonal"
//! tolerance = 1e-8
//! a = { shape = [2, 2], data = [0.0, -1.0, 1.0, 0.0] }
//! ```

#![allow(deprecated)]

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Error, Result};
use log::debug;
use ndarray::{ArrayD, ArrayViewD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::deprecated;
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::equal::{approximately_equal, equal};
use crate::matrix::{
    matrix_cols_are_normalized, matrix_cols_are_orthogonal, matrix_is_lower_triangular,
    matrix_is_orthogonal, matrix_is_symmetric, matrix_is_upper_triangular,
};
use crate::vector::{vector_is_normalized, vectors_are_orthogonal, vectors_are_orthonormal};
use crate::DEFAULT_TOLERANCE;

/// Dense array in row-major order.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArraySpec {
    pub shape: Vec<usize>,
    pub data: Vec<f64>,
}

impl ArraySpec {
    /// Construct the array.
    ///
    /// Fails if the number of elements does not match the shape.
    pub fn to_array(&self) -> Result<ArrayD<f64>> {
        ArrayD::from_shape_vec(IxDyn(&self.shape), self.data.clone()).with_context(|| {
            format!(
                "Cannot construct array of shape {:?} from {} elements",
                self.shape,
                self.data.len()
            )
        })
    }
}

/// Predicate names accepted in suites, including deprecated aliases.
#[derive(Copy, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateName {
    ApproximatelyEqual,
    Equal,
    MatrixIsSymmetric,
    MatrixColsAreOrthogonal,
    MatrixColsAreNormalized,
    MatrixIsOrthogonal,
    MatrixIsUpperTriangular,
    MatrixIsLowerTriangular,
    VectorsAreOrthogonal,
    VectorIsNormalized,
    VectorsAreOrthonormal,
    Symmetric,
    Orthogonal,
    MatrixOrthogonal,
    ColumnsOrthogonal,
    MatrixColsNormalized,
    UpperTriangular,
    LowerTriangular,
}

impl PredicateName {
    pub fn as_str(self) -> &'static str {
        use PredicateName::*;
        match self {
            ApproximatelyEqual => "approximately_equal",
            Equal => "equal",
            MatrixIsSymmetric => "matrix_is_symmetric",
            MatrixColsAreOrthogonal => "matrix_cols_are_orthogonal",
            MatrixColsAreNormalized => "matrix_cols_are_normalized",
            MatrixIsOrthogonal => "matrix_is_orthogonal",
            MatrixIsUpperTriangular => "matrix_is_upper_triangular",
            MatrixIsLowerTriangular => "matrix_is_lower_triangular",
            VectorsAreOrthogonal => "vectors_are_orthogonal",
            VectorIsNormalized => "vector_is_normalized",
            VectorsAreOrthonormal => "vectors_are_orthonormal",
            Symmetric => "symmetric",
            Orthogonal => "orthogonal",
            MatrixOrthogonal => "matrix_orthogonal",
            ColumnsOrthogonal => "columns_orthogonal",
            MatrixColsNormalized => "matrix_cols_normalized",
            UpperTriangular => "upper_triangular",
            LowerTriangular => "lower_triangular",
        }
    }

    /// Evaluate the predicate.
    ///
    /// Fails if the number of arrays does not match the predicate.
    pub fn evaluate<S>(
        self,
        a: ArrayViewD<f64>,
        b: Option<ArrayViewD<f64>>,
        tol: f64,
        sink: S,
    ) -> Result<bool>
    where
        S: DiagnosticSink,
    {
        use PredicateName::*;
        let holds = match (self, b) {
            (ApproximatelyEqual, Some(b)) => approximately_equal(a, b, tol, sink),
            (Equal, Some(b)) => equal(a, b, tol, sink),
            (VectorsAreOrthogonal, Some(b)) => vectors_are_orthogonal(a, b, tol, sink),
            (VectorsAreOrthonormal, Some(b)) => vectors_are_orthonormal(a, b, tol, sink),
            (MatrixIsSymmetric, None) => matrix_is_symmetric(a, tol, sink),
            (MatrixColsAreOrthogonal, None) => matrix_cols_are_orthogonal(a, tol, sink),
            (MatrixColsAreNormalized, None) => matrix_cols_are_normalized(a, tol, sink),
            (MatrixIsOrthogonal, None) => matrix_is_orthogonal(a, tol, sink),
            (MatrixIsUpperTriangular, None) => matrix_is_upper_triangular(a, tol, sink),
            (MatrixIsLowerTriangular, None) => matrix_is_lower_triangular(a, tol, sink),
            (VectorIsNormalized, None) => vector_is_normalized(a, tol, sink),
            (Symmetric, None) => deprecated::symmetric(a, tol, sink),
            (Orthogonal, None) => deprecated::orthogonal(a, tol, sink),
            (MatrixOrthogonal, None) => deprecated::matrix_orthogonal(a, tol, sink),
            (ColumnsOrthogonal, None) => deprecated::columns_orthogonal(a, tol, sink),
            (MatrixColsNormalized, None) => deprecated::matrix_cols_normalized(a, tol, sink),
            (UpperTriangular, None) => deprecated::upper_triangular(a, tol, sink),
            (LowerTriangular, None) => deprecated::lower_triangular(a, tol, sink),
            (predicate, Some(_)) => bail!(
                "Predicate '{}' takes a single array, but 'b' was given",
                predicate
            ),
            (predicate, None) => bail!(
                "Predicate '{}' compares two arrays, but 'b' is missing",
                predicate
            ),
        };

        Ok(holds)
    }
}

impl fmt::Display for PredicateName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single check in a suite.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Check {
    /// Name used in reports.
    ///
    /// Defaults to the position of the check in the suite.
    pub name: Option<String>,

    pub predicate: PredicateName,

    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    pub a: ArraySpec,

    /// Second array, for predicates that compare two arrays.
    pub b: Option<ArraySpec>,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

/// A suite of checks.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Suite {
    #[serde(rename = "check", default)]
    checks: Vec<Check>,
}

impl Suite {
    /// Read a suite from a TOML file.
    pub fn read<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Cannot read suite {}", path.display()))?;
        contents
            .parse()
            .with_context(|| format!("Cannot parse suite {}", path.display()))
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Run all checks.
    ///
    /// A check that does not hold is recorded in the report with its
    /// diagnostic. Malformed checks (bad shapes, wrong number of arrays)
    /// abort the run with an error.
    pub fn run(&self) -> Result<SuiteReport> {
        let mut report = SuiteReport::default();

        for (idx, check) in self.checks.iter().enumerate() {
            let name = check
                .name
                .clone()
                .unwrap_or_else(|| format!("check {}", idx + 1));

            let a = check
                .a
                .to_array()
                .with_context(|| format!("Invalid array 'a' in '{}'", name))?;
            let b = check
                .b
                .as_ref()
                .map(ArraySpec::to_array)
                .transpose()
                .with_context(|| format!("Invalid array 'b' in '{}'", name))?;

            let mut message = None;
            let passed = check
                .predicate
                .evaluate(
                    a.view(),
                    b.as_ref().map(|b| b.view()),
                    check.tolerance,
                    |d: &Diagnostic| message = Some(d.to_string()),
                )
                .with_context(|| format!("Cannot evaluate '{}'", name))?;

            debug!(
                "{}: {}({}) = {}",
                name, check.predicate, check.tolerance, passed
            );

            report.push(Outcome {
                name,
                predicate: check.predicate,
                tolerance: check.tolerance,
                passed,
                message,
            });
        }

        Ok(report)
    }
}

impl FromStr for Suite {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(Into::into)
    }
}

/// Outcome of a single check.
#[derive(Clone, Debug, Serialize)]
pub struct Outcome {
    pub name: String,
    pub predicate: PredicateName,
    pub tolerance: f64,
    pub passed: bool,

    /// Diagnostic message of a failing check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Outcomes of one or more suite runs.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SuiteReport {
    passed: usize,
    failed: usize,
    outcomes: Vec<Outcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Append the outcomes of another report.
    pub fn merge(&mut self, other: SuiteReport) {
        for outcome in other.outcomes {
            self.push(outcome);
        }
    }

    fn push(&mut self, outcome: Outcome) {
        if outcome.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }

        self.outcomes.push(outcome);
    }
}
