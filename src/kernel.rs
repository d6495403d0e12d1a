//! Numeric kernel used by the predicates.
//!
//! Elementwise differences, reductions and inner products over `f64`
//! arrays. Caller-supplied arrays are only ever read; temporaries are
//! freshly allocated.

use ndarray::{ArrayD, ArrayView, ArrayView1, ArrayViewD, Dimension, Zip};

/// Absolute difference: *|a - b|*
///
/// The difference is written to zero-initialized scratch storage with the
/// shape of `a`. Panics if the shapes of `a` and `b` differ.
pub fn abs_diff(a: ArrayViewD<f64>, b: ArrayViewD<f64>) -> ArrayD<f64> {
    let mut diff = ArrayD::zeros(a.raw_dim());
    Zip::from(&mut diff)
        .and(&a)
        .and(&b)
        .apply(|d, &x, &y| *d = (x - y).abs());
    diff
}

/// Supremum: the largest element of `a`.
///
/// NaN elements never compare greater than the running maximum, so they
/// are skipped. The supremum of an empty array is negative infinity.
pub fn supremum<D>(a: ArrayView<f64, D>) -> f64
where
    D: Dimension,
{
    a.iter()
        .fold(f64::NEG_INFINITY, |max, &v| if v > max { v } else { max })
}

/// Sum of all elements. NaN propagates.
pub fn sum<D>(a: ArrayView<f64, D>) -> f64
where
    D: Dimension,
{
    a.sum()
}

/// Dot product: u · v
///
/// Products are accumulated one element at a time, in index order. The
/// result therefore only depends on the values, not on the memory layout of
/// the views or on the instruction sets of the CPU.
pub fn dot(u: ArrayView1<f64>, v: ArrayView1<f64>) -> f64 {
    assert_eq!(u.len(), v.len(), "Vectors must have the same length");
    u.iter().zip(v.iter()).fold(0., |acc, (&a, &b)| acc + a * b)
}

/// Euclidean norm: *sqrt(v · v)*
#[inline]
pub fn norm2(v: ArrayView1<f64>) -> f64 {
    dot(v, v).sqrt()
}

// Vectorized dot products. These accumulate in lanes, so their results can
// differ from `dot` in the last bits. The predicates do not use them.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod sse2 {
    #[cfg(target_arch = "x86")]
    use std::arch::x86::*;

    #[cfg(target_arch = "x86_64")]
    use std::arch::x86_64::*;

    use super::dot_unvectorized;

    #[target_feature(enable = "sse2")]
    pub unsafe fn dot(mut u: &[f64], mut v: &[f64]) -> f64 {
        assert_eq!(u.len(), v.len());

        let mut sums = _mm_setzero_pd();

        while u.len() >= 2 {
            let ux2 = _mm_loadu_pd(&u[0] as *const f64);
            let vx2 = _mm_loadu_pd(&v[0] as *const f64);

            sums = _mm_add_pd(_mm_mul_pd(ux2, vx2), sums);

            u = &u[2..];
            v = &v[2..];
        }

        let mut lanes = [0f64; 2];
        _mm_storeu_pd(lanes.as_mut_ptr(), sums);

        lanes[0] + lanes[1] + dot_unvectorized(u, v)
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx {
    #[cfg(target_arch = "x86")]
    use std::arch::x86::*;

    #[cfg(target_arch = "x86_64")]
    use std::arch::x86_64::*;

    use super::dot_unvectorized;

    #[target_feature(enable = "avx")]
    pub unsafe fn dot(mut u: &[f64], mut v: &[f64]) -> f64 {
        assert_eq!(u.len(), v.len());

        let mut sums = _mm256_setzero_pd();

        while u.len() >= 4 {
            let ux4 = _mm256_loadu_pd(&u[0] as *const f64);
            let vx4 = _mm256_loadu_pd(&v[0] as *const f64);

            sums = _mm256_add_pd(_mm256_mul_pd(ux4, vx4), sums);

            u = &u[4..];
            v = &v[4..];
        }

        let mut lanes = [0f64; 4];
        _mm256_storeu_pd(lanes.as_mut_ptr(), sums);

        lanes.iter().sum::<f64>() + dot_unvectorized(u, v)
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx_fma {
    #[cfg(target_arch = "x86")]
    use std::arch::x86::*;

    #[cfg(target_arch = "x86_64")]
    use std::arch::x86_64::*;

    use super::dot_unvectorized;

    #[target_feature(enable = "avx", enable = "fma")]
    pub unsafe fn dot(mut u: &[f64], mut v: &[f64]) -> f64 {
        assert_eq!(u.len(), v.len());

        let mut sums = _mm256_setzero_pd();

        while u.len() >= 4 {
            let ux4 = _mm256_loadu_pd(&u[0] as *const f64);
            let vx4 = _mm256_loadu_pd(&v[0] as *const f64);

            sums = _mm256_fmadd_pd(ux4, vx4, sums);

            u = &u[4..];
            v = &v[4..];
        }

        let mut lanes = [0f64; 4];
        _mm256_storeu_pd(lanes.as_mut_ptr(), sums);

        lanes.iter().sum::<f64>() + dot_unvectorized(u, v)
    }
}

pub fn dot_unvectorized(u: &[f64], v: &[f64]) -> f64 {
    assert_eq!(u.len(), v.len());
    u.iter().zip(v).fold(0., |acc, (&a, &b)| acc + a * b)
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array1, Array2};
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    use crate::util::{all_close, close};

    use super::{abs_diff, dot, dot_unvectorized, norm2, sum, supremum};

    #[cfg(target_feature = "sse2")]
    use super::sse2;

    #[cfg(target_feature = "avx")]
    use super::avx;

    #[cfg(all(target_feature = "avx", target_feature = "fma"))]
    use super::avx_fma;

    #[test]
    fn abs_diff_test() {
        let a = array![[1., 2.], [3., 4.]].into_dyn();
        let b = array![[2., 2.], [1., 6.]].into_dyn();
        let diff = abs_diff(a.view(), b.view());
        assert_eq!(diff.shape(), &[2, 2]);
        assert!(all_close(
            diff.as_slice().unwrap(),
            &[1.0, 0.0, 2.0, 2.0],
            1e-12
        ));

        // Inputs are left untouched.
        assert_eq!(a, array![[1., 2.], [3., 4.]].into_dyn());
    }

    #[test]
    fn supremum_skips_nan() {
        let a = array![1., f64::NAN, 3., 2.];
        assert_eq!(supremum(a.view()), 3.);

        let nan = array![f64::NAN, f64::NAN];
        assert_eq!(supremum(nan.view()), f64::NEG_INFINITY);
    }

    #[test]
    fn sum_propagates_nan() {
        let a = array![1., 2., 3.];
        assert!(close(sum(a.view()), 6., 1e-12));

        let b = array![1., f64::NAN, 3.];
        assert!(sum(b.view()).is_nan());
    }

    #[test]
    fn dot_unvectorized_test() {
        let u = [1f64, -2f64, -3f64];
        let v = [2f64, 4f64, -2f64];
        let w = [-1f64, 3f64, 2.5f64];

        assert!(close(dot_unvectorized(&u, &v), 0f64, 1e-12));
        assert!(close(dot_unvectorized(&u, &w), -14.5f64, 1e-12));
        assert!(close(dot_unvectorized(&v, &w), 5f64, 1e-12));
    }

    #[test]
    fn dot_strided_columns() {
        let m = Array2::from_shape_vec((3, 2), vec![1., -1., 2., 0.5, 3., 2.]).unwrap();
        assert!(close(dot(m.column(0), m.column(1)), 6., 1e-12));
        assert!(close(dot(m.row(1), m.row(2)), 7., 1e-12));
    }

    #[test]
    fn dot_matches_unvectorized() {
        let u = Array1::random((102,), Uniform::new_inclusive(-1.0, 1.0));
        let v = Array1::random((102,), Uniform::new_inclusive(-1.0, 1.0));
        assert_eq!(
            dot(u.view(), v.view()),
            dot_unvectorized(u.as_slice().unwrap(), v.as_slice().unwrap())
        );
    }

    #[test]
    fn dot_is_independent_of_layout() {
        // Sequential accumulation cancels the ones against the large
        // values; lane-wise accumulation does not.
        let u = array![1e16, 1., 1., 1., -1e16, 0., 0., 0.];
        let v = Array1::<f64>::ones(8);

        let mut m = Array2::zeros((8, 2));
        m.column_mut(0).assign(&u);
        m.column_mut(1).assign(&v);
        assert!(m.column(0).as_slice().is_none());

        let contiguous = dot(u.view(), v.view());
        let strided = dot(m.column(0), m.column(1));
        assert_eq!(contiguous, strided);
        assert_eq!(contiguous, 0.);
    }

    #[test]
    #[cfg(target_feature = "sse2")]
    fn dot_sse2_test() {
        let u = Array1::random((102,), Uniform::new_inclusive(-1.0, 1.0));
        let v = Array1::random((102,), Uniform::new_inclusive(-1.0, 1.0));
        assert!(close(
            unsafe { sse2::dot(u.as_slice().unwrap(), v.as_slice().unwrap()) },
            dot_unvectorized(u.as_slice().unwrap(), v.as_slice().unwrap()),
            1e-10
        ));
    }

    #[test]
    #[cfg(target_feature = "avx")]
    fn dot_avx_test() {
        let u = Array1::random((102,), Uniform::new_inclusive(-1.0, 1.0));
        let v = Array1::random((102,), Uniform::new_inclusive(-1.0, 1.0));
        assert!(close(
            unsafe { avx::dot(u.as_slice().unwrap(), v.as_slice().unwrap()) },
            dot_unvectorized(u.as_slice().unwrap(), v.as_slice().unwrap()),
            1e-10
        ));
    }

    #[test]
    #[cfg(all(target_feature = "avx", target_feature = "fma"))]
    fn dot_avx_fma_test() {
        let u = Array1::random((102,), Uniform::new_inclusive(-1.0, 1.0));
        let v = Array1::random((102,), Uniform::new_inclusive(-1.0, 1.0));
        assert!(close(
            unsafe { avx_fma::dot(u.as_slice().unwrap(), v.as_slice().unwrap()) },
            dot_unvectorized(u.as_slice().unwrap(), v.as_slice().unwrap()),
            1e-10
        ));
    }

    #[test]
    fn norm2_test() {
        let u = array![3., 4.];
        assert!(close(norm2(u.view()), 5., 1e-12));

        let m = array![[1., 0.], [-2., 0.], [2., 1.]];
        assert!(close(norm2(m.column(0)), 3., 1e-12));
    }
}
