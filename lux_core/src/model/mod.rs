//! Generic Bayesian classifier over named components.
//!
//! A [`Model`] scores each [`Component`] as `pdf(x) * prior`, normalizes the
//! scores into a [`Distribution`] and picks the argmax for prediction.

pub mod classifier;
pub mod component;
pub mod distribution;
pub mod observation;

pub use classifier::{Model, ModelOptions, Posterior, Prediction, ZeroMassPolicy};
pub use component::Component;
pub use distribution::Distribution;
pub use observation::Observation;

/// Lookup key for a component name: lowercase, spaces and hyphens folded to `_`.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Index of the first maximum.
pub(crate) fn argmax(values: ndarray::ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    for (i, &value) in values.iter().enumerate() {
        if value > values[best] {
            best = i;
        }
    }
    best
}
