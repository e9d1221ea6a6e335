use ndarray::{Array1, ArrayView1, ArrayView2};

use super::observation::check_batch;
use crate::error::LuxResult;

/// A single category/hypothesis of a [`Model`](super::Model).
///
/// Implementations supply an observation-independent `prior` and a
/// likelihood `pdf`. The owning model multiplies the two into an
/// unnormalized joint score.
///
/// An observation whose length is not [`Self::FEATURES`] is a
/// [`ShapeMismatch`](crate::LuxError::ShapeMismatch), and one holding a
/// non-finite value is an
/// [`InvalidParameter`](crate::LuxError::InvalidParameter).
pub trait Component: Send + Sync {
    /// Number of features in one observation.
    const FEATURES: usize;

    fn name(&self) -> &str;

    /// Prior weight, independent of the observation.
    fn prior(&self) -> f64;

    /// Likelihood of one observation of length [`Self::FEATURES`].
    fn pdf(&self, x: ArrayView1<'_, f64>) -> LuxResult<f64>;

    /// Likelihood of every row of an `(n, FEATURES)` batch.
    fn pdf_batch(&self, xs: ArrayView2<'_, f64>) -> LuxResult<Array1<f64>> {
        check_batch(&xs, Self::FEATURES, "pdf_batch")?;
        xs.outer_iter().map(|row| self.pdf(row)).collect()
    }

    /// Unnormalized joint score `pdf(x) * prior`.
    fn score(&self, x: ArrayView1<'_, f64>) -> LuxResult<f64> {
        Ok(self.pdf(x)? * self.prior())
    }

    fn score_batch(&self, xs: ArrayView2<'_, f64>) -> LuxResult<Array1<f64>> {
        Ok(self.pdf_batch(xs)? * self.prior())
    }

    /// Told its position when a [`Model`](super::Model) takes ownership.
    fn set_index(&mut self, _index: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LuxError;
    use crate::model::observation::check_view;
    use ndarray::array;

    struct Halfway;

    impl Component for Halfway {
        const FEATURES: usize = 2;

        fn name(&self) -> &str {
            "halfway"
        }

        fn prior(&self) -> f64 {
            0.5
        }

        fn pdf(&self, x: ArrayView1<'_, f64>) -> LuxResult<f64> {
            check_view(&x, Self::FEATURES, "pdf")?;
            Ok(x[0] * x[1])
        }
    }

    #[test]
    fn test_score_is_pdf_times_prior() {
        let x = array![2.0, 3.0];
        assert_eq!(Halfway.score(x.view()).unwrap(), 3.0);
    }

    #[test]
    fn test_default_batch_rows() {
        let xs = array![[1.0, 1.0], [2.0, 3.0], [0.0, 5.0]];
        assert_eq!(Halfway.pdf_batch(xs.view()).unwrap(), array![1.0, 6.0, 0.0]);
        assert_eq!(Halfway.score_batch(xs.view()).unwrap(), array![0.5, 3.0, 0.0]);
    }

    #[test]
    fn test_default_batch_checks_width() {
        let xs = array![[1.0, 1.0, 1.0]];
        assert!(matches!(
            Halfway.pdf_batch(xs.view()),
            Err(LuxError::ShapeMismatch { .. })
        ));
    }
}
