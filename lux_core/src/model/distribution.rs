//! Normalized posterior over component names.

use std::collections::HashMap;

use ndarray::ArrayView1;
use serde::Serialize;

use super::{argmax, normalize_name};
use crate::error::{LuxError, LuxResult};

/// Probability mass per component, in component order.
///
/// Built fresh by every posterior call and never mutated afterwards. Names
/// are looked up through [`normalize_name`], so `"light blue"` and
/// `"light_blue"` address the same entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    names: Vec<String>,
    numbers: Vec<f64>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Distribution {
    pub fn new(names: Vec<String>, numbers: Vec<f64>) -> LuxResult<Self> {
        if names.len() != numbers.len() {
            return Err(LuxError::ShapeMismatch {
                expected: format!("{} masses", names.len()),
                got: format!("{} masses", numbers.len()),
                context: "distribution".to_string(),
            });
        }
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (normalize_name(name), i))
            .collect();
        Ok(Self {
            names,
            numbers,
            index,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Masses aligned with [`Self::names`].
    pub fn numbers(&self) -> &[f64] {
        &self.numbers
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.index
            .get(&normalize_name(name))
            .map(|&i| self.numbers[i])
    }

    /// Mass for `name`, failing with [`LuxError::KeyNotFound`] if absent.
    pub fn mass(&self, name: &str) -> LuxResult<f64> {
        self.get(name).ok_or_else(|| LuxError::KeyNotFound {
            name: name.to_string(),
        })
    }

    /// Name to mass mapping.
    pub fn lookup(&self) -> HashMap<&str, f64> {
        self.iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.numbers.iter().copied())
    }

    /// The `k` highest masses, descending; ties keep component order.
    pub fn top(&self, k: usize) -> Vec<(&str, f64)> {
        let mut order: Vec<usize> = (0..self.numbers.len()).collect();
        order.sort_by(|&a, &b| self.numbers[b].total_cmp(&self.numbers[a]));
        order
            .into_iter()
            .take(k)
            .map(|i| (self.names[i].as_str(), self.numbers[i]))
            .collect()
    }

    /// Name with the highest mass (first one on ties).
    pub fn argmax(&self) -> Option<&str> {
        if self.numbers.is_empty() {
            return None;
        }
        let best = argmax(ArrayView1::from(self.numbers.as_slice()));
        Some(self.names[best].as_str())
    }

    pub fn total(&self) -> f64 {
        self.numbers.iter().sum()
    }
}
