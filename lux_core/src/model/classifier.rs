//! The classifier over a fixed set of components.
//!
//! Lifecycle is load then read-only inference. Every inference call is pure
//! computation over immutable components, so a model can be shared across
//! threads without locking.

use std::collections::HashMap;
use std::fmt;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::observation::{check_batch, check_single};
use super::{argmax, normalize_name, Component, Distribution, Observation};
use crate::error::{LuxError, LuxResult};

/// What to do with an observation row whose scores sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroMassPolicy {
    /// Spread the mass evenly over every component.
    #[default]
    Uniform,
    /// Fail with [`LuxError::DegenerateNormalization`].
    Error,
}

/// Inference options fixed at model construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelOptions {
    /// Unknown names resolve to `None` with a warning instead of an error.
    pub graceful_failure: bool,
    pub zero_mass: ZeroMassPolicy,
    /// Batches with at least this many rows score components in parallel.
    pub parallel_threshold: usize,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            graceful_failure: false,
            zero_mass: ZeroMassPolicy::Uniform,
            parallel_threshold: 1024,
        }
    }
}

/// Posterior for a dispatched [`Observation`].
#[derive(Debug, Clone, PartialEq)]
pub enum Posterior {
    Single(Distribution),
    Batch(Vec<Distribution>),
}

/// Prediction for a dispatched [`Observation`].
#[derive(Debug)]
pub enum Prediction<'m, C> {
    Single(&'m C),
    Batch(Vec<&'m C>),
}

/// Named collection of components computing `P(component | x)`.
#[derive(Debug, Clone)]
pub struct Model<C: Component> {
    name: String,
    components: Vec<C>,
    lookup: HashMap<String, usize>,
    options: ModelOptions,
}

impl<C: Component> Model<C> {
    /// Build a model; component names must stay distinct after normalization.
    ///
    /// Every component is told its position through
    /// [`Component::set_index`].
    pub fn new(
        name: impl Into<String>,
        mut components: Vec<C>,
        options: ModelOptions,
    ) -> LuxResult<Self> {
        let name = name.into();
        if components.is_empty() {
            return Err(LuxError::invalid_parameter(
                "components",
                0,
                "at least one component",
            ));
        }

        let mut lookup = HashMap::with_capacity(components.len());
        for (i, component) in components.iter().enumerate() {
            if let Some(&existing) = lookup.get(&normalize_name(component.name())) {
                let existing: &C = &components[existing];
                return Err(LuxError::DuplicateComponent {
                    name: component.name().to_string(),
                    existing: existing.name().to_string(),
                });
            }
            lookup.insert(normalize_name(component.name()), i);
        }
        for (i, component) in components.iter_mut().enumerate() {
            component.set_index(i);
        }

        tracing::debug!("loaded model {} with {} components", name, components.len());

        Ok(Self {
            name,
            components,
            lookup,
            options,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    pub fn with_options(mut self, options: ModelOptions) -> Self {
        self.options = options;
        self
    }

    pub fn components(&self) -> &[C] {
        &self.components
    }

    pub fn component(&self, index: usize) -> Option<&C> {
        self.components.get(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(&normalize_name(name))
    }

    /// Position of `name` without any out-of-vocabulary handling.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.lookup.get(&normalize_name(name)).copied()
    }

    /// Position of `name`, honoring `graceful_failure`.
    pub fn index_of(&self, name: &str) -> LuxResult<Option<usize>> {
        match self.position(name) {
            Some(i) => Ok(Some(i)),
            None if self.options.graceful_failure => {
                tracing::warn!("[-][OOV][{} not in {}]", name, self.name);
                Ok(None)
            }
            None => Err(LuxError::OutOfVocabulary {
                name: name.to_string(),
                model: self.name.clone(),
            }),
        }
    }

    /// Component called `name`, honoring `graceful_failure`.
    pub fn get(&self, name: &str) -> LuxResult<Option<&C>> {
        Ok(self.index_of(name)?.map(|i| &self.components[i]))
    }

    /// Unnormalized joint score of every component for one observation.
    pub fn scores(&self, x: &[f64]) -> LuxResult<Array1<f64>> {
        check_single(x, C::FEATURES, "scores")?;
        self.scores_view(ArrayView1::from(x))
    }

    /// `(n, components)` matrix of unnormalized joint scores.
    pub fn scores_batch(&self, xs: ArrayView2<'_, f64>) -> LuxResult<Array2<f64>> {
        check_batch(&xs, C::FEATURES, "scores_batch")?;
        self.scores_batch_view(xs)
    }

    pub fn predict(&self, x: &[f64]) -> LuxResult<&C> {
        let scores = self.scores(x)?;
        Ok(&self.components[argmax(scores.view())])
    }

    /// One predicted component per row.
    pub fn predict_batch(&self, xs: ArrayView2<'_, f64>) -> LuxResult<Vec<&C>> {
        let scores = self.scores_batch(xs)?;
        Ok(scores
            .outer_iter()
            .map(|row| &self.components[argmax(row)])
            .collect())
    }

    pub fn posterior(&self, x: &[f64]) -> LuxResult<Distribution> {
        let mut scores = self.scores(x)?;
        self.normalize(scores.view_mut(), 0)?;
        self.distribution(scores.to_vec())
    }

    /// One distribution per row.
    pub fn posterior_batch(&self, xs: ArrayView2<'_, f64>) -> LuxResult<Vec<Distribution>> {
        let scores = self.normalized_batch(xs)?;
        scores
            .outer_iter()
            .map(|row| self.distribution(row.to_vec()))
            .collect()
    }

    /// `P(name | x)`; `None` for an unknown name under graceful failure.
    pub fn likelihood(&self, x: &[f64], name: &str) -> LuxResult<Option<f64>> {
        let Some(index) = self.index_of(name)? else {
            return Ok(None);
        };
        let mut scores = self.scores(x)?;
        self.normalize(scores.view_mut(), 0)?;
        Ok(Some(scores[index]))
    }

    /// `P(name | x)` for every row.
    pub fn likelihood_batch(
        &self,
        xs: ArrayView2<'_, f64>,
        name: &str,
    ) -> LuxResult<Option<Array1<f64>>> {
        let Some(index) = self.index_of(name)? else {
            return Ok(None);
        };
        let scores = self.normalized_batch(xs)?;
        Ok(Some(scores.column(index).to_owned()))
    }

    pub fn posterior_of(&self, observation: &Observation<'_>) -> LuxResult<Posterior> {
        match observation {
            Observation::Single(x) => {
                observation.check(C::FEATURES, "posterior_of")?;
                let mut scores = self.scores_view(x.view())?;
                self.normalize(scores.view_mut(), 0)?;
                Ok(Posterior::Single(self.distribution(scores.to_vec())?))
            }
            Observation::Batch(xs) => Ok(Posterior::Batch(self.posterior_batch(xs.view())?)),
        }
    }

    pub fn predict_of(&self, observation: &Observation<'_>) -> LuxResult<Prediction<'_, C>> {
        match observation {
            Observation::Single(x) => {
                observation.check(C::FEATURES, "predict_of")?;
                let scores = self.scores_view(x.view())?;
                Ok(Prediction::Single(&self.components[argmax(scores.view())]))
            }
            Observation::Batch(xs) => Ok(Prediction::Batch(self.predict_batch(xs.view())?)),
        }
    }

    fn scores_view(&self, x: ArrayView1<'_, f64>) -> LuxResult<Array1<f64>> {
        self.components.iter().map(|c| c.score(x)).collect()
    }

    fn scores_batch_view(&self, xs: ArrayView2<'_, f64>) -> LuxResult<Array2<f64>> {
        let columns: Vec<Array1<f64>> = if xs.nrows() >= self.options.parallel_threshold {
            self.components
                .par_iter()
                .map(|c| c.score_batch(xs))
                .collect::<LuxResult<_>>()?
        } else {
            self.components
                .iter()
                .map(|c| c.score_batch(xs))
                .collect::<LuxResult<_>>()?
        };

        let mut scores = Array2::zeros((xs.nrows(), self.components.len()));
        for (j, column) in columns.iter().enumerate() {
            scores.column_mut(j).assign(column);
        }
        Ok(scores)
    }

    fn normalized_batch(&self, xs: ArrayView2<'_, f64>) -> LuxResult<Array2<f64>> {
        let mut scores = self.scores_batch(xs)?;
        for (row_index, row) in scores.axis_iter_mut(Axis(0)).enumerate() {
            self.normalize(row, row_index)?;
        }
        Ok(scores)
    }

    fn normalize(&self, mut row: ArrayViewMut1<'_, f64>, row_index: usize) -> LuxResult<()> {
        let total = row.sum();
        if total > 0.0 && total.is_finite() {
            row.mapv_inplace(|v| v / total);
            return Ok(());
        }
        match self.options.zero_mass {
            ZeroMassPolicy::Uniform => {
                row.fill(1.0 / row.len() as f64);
                Ok(())
            }
            ZeroMassPolicy::Error => {
                tracing::error!(
                    "degenerate normalization in {} at row {} (total {})",
                    self.name,
                    row_index,
                    total
                );
                Err(LuxError::DegenerateNormalization { row: row_index })
            }
        }
    }

    fn distribution(&self, numbers: Vec<f64>) -> LuxResult<Distribution> {
        Distribution::new(self.names().map(str::to_string).collect(), numbers)
    }
}

impl<C: Component> fmt::Display for Model<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Model>{}; {} components", self.name, self.len())
    }
}
