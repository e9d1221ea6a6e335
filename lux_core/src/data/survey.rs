//! Labeled `(h, s, v)` responses from a color-naming survey.
//!
//! Reading survey files from disk is left to callers; this module only
//! defines the interface evaluation draws from and an in-memory
//! implementation of it.

use std::collections::HashMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::boundary::wrap_hue_degrees;
use crate::error::{LuxError, LuxResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveySplit {
    Train,
    Dev,
    Test,
}

impl SurveySplit {
    pub fn all() -> [SurveySplit; 3] {
        [SurveySplit::Train, SurveySplit::Dev, SurveySplit::Test]
    }
}

impl fmt::Display for SurveySplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SurveySplit::Train => "train",
            SurveySplit::Dev => "dev",
            SurveySplit::Test => "test",
        };
        f.write_str(name)
    }
}

/// One survey response: an `(h, s, v)` observation and its color-name index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledObservation {
    pub features: [f64; 3],
    pub label: usize,
}

/// Source of labeled observations, split into train/dev/test.
pub trait SurveyDataset {
    fn name(&self) -> &str;

    fn name2index(&self, name: &str) -> Option<usize>;

    fn index2name(&self, index: usize) -> Option<&str>;

    /// Size of the color-name vocabulary.
    fn number_words(&self) -> usize;

    fn split_size(&self, split: SurveySplit) -> usize;

    /// Restart the shuffling stream from `seed`.
    fn reseed(&mut self, seed: u64);

    /// Every row of `split` once, in random order without replacement.
    fn generate_once(
        &mut self,
        split: SurveySplit,
    ) -> Box<dyn Iterator<Item = LabeledObservation> + '_>;

    /// Endless passes over `split`, reshuffled on every pass. Empty splits
    /// yield nothing.
    fn generate_forever(
        &mut self,
        split: SurveySplit,
    ) -> Box<dyn Iterator<Item = LabeledObservation> + '_>;

    fn description(&self) -> String {
        format!(
            "[Dataset][{}][{} color names][{} train; {} dev; {} test]",
            self.name(),
            self.number_words(),
            self.split_size(SurveySplit::Train),
            self.split_size(SurveySplit::Dev),
            self.split_size(SurveySplit::Test),
        )
    }
}

/// Survey held entirely in memory.
///
/// Names are indexed in the order they are first seen, so `name2index` and
/// `index2name` stay a bijection.
#[derive(Debug, Clone)]
pub struct InMemorySurvey {
    name: String,
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
    splits: HashMap<SurveySplit, Vec<LabeledObservation>>,
    rng: StdRng,
}

impl InMemorySurvey {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            vocabulary: Vec::new(),
            index: HashMap::new(),
            splits: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Add one response, registering `label` in the vocabulary if it is new.
    pub fn push(&mut self, split: SurveySplit, features: [f64; 3], label: &str) -> LuxResult<()> {
        if features.iter().any(|v| !v.is_finite()) {
            return Err(LuxError::invalid_parameter(
                "features",
                format!("{:?}", features),
                "finite values",
            ));
        }
        let label = match self.index.get(label) {
            Some(&i) => i,
            None => {
                let i = self.vocabulary.len();
                self.vocabulary.push(label.to_string());
                self.index.insert(label.to_string(), i);
                i
            }
        };
        self.splits
            .entry(split)
            .or_default()
            .push(LabeledObservation { features, label });
        Ok(())
    }

    /// Fold every hue into `(-180, 180]`.
    pub fn wrap_hues(&mut self) {
        for rows in self.splits.values_mut() {
            for row in rows.iter_mut() {
                row.features[0] = wrap_hue_degrees(row.features[0]);
            }
        }
    }

    pub fn rows(&self, split: SurveySplit) -> &[LabeledObservation] {
        self.splits.get(&split).map(Vec::as_slice).unwrap_or(&[])
    }

    fn shuffled_order(&mut self, split: SurveySplit) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.split_size(split)).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

impl SurveyDataset for InMemorySurvey {
    fn name(&self) -> &str {
        &self.name
    }

    fn name2index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    fn index2name(&self, index: usize) -> Option<&str> {
        self.vocabulary.get(index).map(String::as_str)
    }

    fn number_words(&self) -> usize {
        self.vocabulary.len()
    }

    fn split_size(&self, split: SurveySplit) -> usize {
        self.rows(split).len()
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn generate_once(
        &mut self,
        split: SurveySplit,
    ) -> Box<dyn Iterator<Item = LabeledObservation> + '_> {
        let order = self.shuffled_order(split);
        let rows = self.rows(split);
        Box::new(order.into_iter().map(move |i| rows[i]))
    }

    fn generate_forever(
        &mut self,
        split: SurveySplit,
    ) -> Box<dyn Iterator<Item = LabeledObservation> + '_> {
        let rng = StdRng::seed_from_u64(self.rng.gen());
        Box::new(Forever {
            rows: self.rows(split),
            order: Vec::new(),
            position: 0,
            rng,
        })
    }
}

struct Forever<'a> {
    rows: &'a [LabeledObservation],
    order: Vec<usize>,
    position: usize,
    rng: StdRng,
}

impl Iterator for Forever<'_> {
    type Item = LabeledObservation;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rows.is_empty() {
            return None;
        }
        if self.position == self.order.len() {
            self.order = (0..self.rows.len()).collect();
            self.order.shuffle(&mut self.rng);
            self.position = 0;
        }
        let row = self.rows[self.order[self.position]];
        self.position += 1;
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey() -> InMemorySurvey {
        let mut survey = InMemorySurvey::new("xkcd", 42);
        for i in 0..10 {
            let h = 200.0 + i as f64;
            survey.push(SurveySplit::Train, [h, 80.0, 80.0], "blue").unwrap();
            survey.push(SurveySplit::Train, [i as f64, 80.0, 80.0], "red").unwrap();
        }
        survey.push(SurveySplit::Dev, [100.0, 80.0, 60.0], "green").unwrap();
        survey.push(SurveySplit::Test, [5.0, 90.0, 70.0], "red").unwrap();
        survey
    }

    #[test]
    fn test_vocabulary_bijection() {
        let survey = survey();
        assert_eq!(survey.number_words(), 3);
        for name in ["blue", "red", "green"] {
            let index = survey.name2index(name).unwrap();
            assert_eq!(survey.index2name(index), Some(name));
        }
        assert_eq!(survey.name2index("octarine"), None);
        assert_eq!(survey.index2name(3), None);
    }

    #[test]
    fn test_generate_once_without_replacement() {
        let mut survey = survey();
        let mut seen: Vec<LabeledObservation> = survey.generate_once(SurveySplit::Train).collect();
        assert_eq!(seen.len(), 20);

        let mut expected = survey.rows(SurveySplit::Train).to_vec();
        let key = |row: &LabeledObservation| (row.label, row.features[0] as i64);
        seen.sort_by_key(key);
        expected.sort_by_key(key);
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_generate_once_is_shuffled() {
        let mut survey = survey();
        let first: Vec<_> = survey.generate_once(SurveySplit::Train).collect();
        assert_ne!(first.as_slice(), survey.rows(SurveySplit::Train));
    }

    #[test]
    fn test_seeded_order_is_reproducible() {
        let a: Vec<_> = survey().generate_once(SurveySplit::Train).collect();
        let b: Vec<_> = survey().generate_once(SurveySplit::Train).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reseed_restarts_stream() {
        let mut reseeded = InMemorySurvey::new("xkcd", 1);
        for row in survey().rows(SurveySplit::Train) {
            let name = survey().index2name(row.label).unwrap().to_string();
            reseeded.push(SurveySplit::Train, row.features, &name).unwrap();
        }
        reseeded.reseed(42);
        let a: Vec<_> = survey().generate_once(SurveySplit::Train).collect();
        let b: Vec<_> = reseeded.generate_once(SurveySplit::Train).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_forever_cycles() {
        let mut survey = survey();
        let drawn: Vec<_> = survey.generate_forever(SurveySplit::Dev).take(5).collect();
        assert_eq!(drawn.len(), 5);
        assert!(drawn.iter().all(|row| row.features == [100.0, 80.0, 60.0]));

        let train: Vec<_> = survey.generate_forever(SurveySplit::Train).take(40).collect();
        for pass in train.chunks(20) {
            assert_eq!(pass.iter().filter(|row| row.label == 0).count(), 10);
        }
    }

    #[test]
    fn test_generate_forever_empty_split() {
        let mut survey = InMemorySurvey::new("empty", 1);
        assert_eq!(survey.generate_forever(SurveySplit::Test).next(), None);
    }

    #[test]
    fn test_description() {
        assert_eq!(
            survey().description(),
            "[Dataset][xkcd][3 color names][20 train; 1 dev; 1 test]"
        );
    }

    #[test]
    fn test_rejects_non_finite_features() {
        let mut survey = InMemorySurvey::new("bad", 1);
        assert!(survey
            .push(SurveySplit::Train, [f64::NAN, 1.0, 1.0], "red")
            .is_err());
        assert_eq!(survey.number_words(), 0);
    }

    #[test]
    fn test_wrap_hues() {
        let mut survey = survey();
        survey.wrap_hues();
        assert!(survey
            .rows(SurveySplit::Train)
            .iter()
            .all(|row| row.features[0] > -180.0 && row.features[0] <= 180.0));
        assert_eq!(survey.rows(SurveySplit::Train)[0].features[0], -160.0);
    }
}
