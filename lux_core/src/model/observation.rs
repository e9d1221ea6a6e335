//! Shape dispatch for single and batched observations.

use ndarray::{ArrayView1, ArrayView2, ArrayViewD, Ix1, Ix2};

use crate::error::{LuxError, LuxResult};

/// A shape-checked observation: one feature vector or an `(n, features)` batch.
#[derive(Debug, Clone)]
pub enum Observation<'a> {
    Single(ArrayView1<'a, f64>),
    Batch(ArrayView2<'a, f64>),
}

impl<'a> Observation<'a> {
    /// Inspect rank and trailing dimension and pick the matching form.
    pub fn from_dyn(view: ArrayViewD<'a, f64>, features: usize) -> LuxResult<Self> {
        let got = format!("{:?}", view.shape());
        let mismatch = || LuxError::ShapeMismatch {
            expected: format!("[{features}] or [n, {features}]"),
            got: got.clone(),
            context: "observation".to_string(),
        };

        let observation = match view.ndim() {
            1 if view.len() == features => view
                .into_dimensionality::<Ix1>()
                .map(Observation::Single)
                .map_err(|_| mismatch())?,
            2 if view.shape()[1] == features => view
                .into_dimensionality::<Ix2>()
                .map(Observation::Batch)
                .map_err(|_| mismatch())?,
            _ => return Err(mismatch()),
        };
        observation.check(features, "observation")?;
        Ok(observation)
    }

    pub fn single(x: &'a [f64], features: usize) -> LuxResult<Self> {
        check_single(x, features, "observation")?;
        Ok(Observation::Single(ArrayView1::from(x)))
    }

    pub fn batch(xs: ArrayView2<'a, f64>, features: usize) -> LuxResult<Self> {
        check_batch(&xs, features, "observation")?;
        Ok(Observation::Batch(xs))
    }

    /// Number of observation rows (1 for a single vector).
    pub fn rows(&self) -> usize {
        match self {
            Observation::Single(_) => 1,
            Observation::Batch(xs) => xs.nrows(),
        }
    }

    /// Shape and finiteness check; the variants are public, so values built
    /// directly are checked again before use.
    pub(crate) fn check(&self, features: usize, context: &str) -> LuxResult<()> {
        match self {
            Observation::Single(x) => check_view(x, features, context),
            Observation::Batch(xs) => check_batch(xs, features, context),
        }
    }
}

pub(crate) fn check_single(x: &[f64], features: usize, context: &str) -> LuxResult<()> {
    check_view(&ArrayView1::from(x), features, context)
}

/// A feature vector of length `features` with only finite entries.
pub(crate) fn check_view(
    x: &ArrayView1<'_, f64>,
    features: usize,
    context: &str,
) -> LuxResult<()> {
    if x.len() != features {
        return Err(LuxError::ShapeMismatch {
            expected: format!("[{features}]"),
            got: format!("[{}]", x.len()),
            context: context.to_string(),
        });
    }
    check_finite(x.iter(), context)
}

/// An `(n, features)` batch with only finite entries.
pub(crate) fn check_batch(
    xs: &ArrayView2<'_, f64>,
    features: usize,
    context: &str,
) -> LuxResult<()> {
    if xs.ncols() != features {
        return Err(LuxError::ShapeMismatch {
            expected: format!("[n, {features}]"),
            got: format!("{:?}", xs.shape()),
            context: context.to_string(),
        });
    }
    check_finite(xs.iter(), context)
}

fn check_finite<'v>(mut values: impl Iterator<Item = &'v f64>, context: &str) -> LuxResult<()> {
    match values.find(|v| !v.is_finite()) {
        Some(v) => Err(LuxError::invalid_parameter(context, v, "finite feature values")),
        None => Ok(()),
    }
}
