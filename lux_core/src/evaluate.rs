//! Scoring a color-term model against survey responses.
//!
//! Each response is classified with the model's posterior. Accuracy counts
//! argmax hits, and the mean log posterior of the true name gives the
//! perplexity. Responses whose name the model does not know are counted
//! separately and excluded from both.

use std::path::Path;
use std::time::Instant;

use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::EvaluationConfig;
use crate::data::{SurveyDataset, SurveySplit};
use crate::error::LuxResult;
use crate::logging;
use crate::lux::Lux;
use crate::model::argmax;

const CHUNK_ROWS: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub model: String,
    pub dataset: String,
    pub split: SurveySplit,
    /// Responses with an in-vocabulary name
    pub samples: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub mean_log_likelihood: f64,
    pub perplexity: f64,
    pub out_of_vocabulary: usize,
    pub elapsed_ms: u128,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    samples: usize,
    correct: usize,
    log_likelihood: f64,
}

impl Tally {
    fn merge(self, other: Tally) -> Tally {
        Tally {
            samples: self.samples + other.samples,
            correct: self.correct + other.correct,
            log_likelihood: self.log_likelihood + other.log_likelihood,
        }
    }
}

/// Evaluate `model` on one pass over `split`.
pub fn evaluate<D: SurveyDataset + ?Sized>(
    model: &Lux,
    dataset: &mut D,
    split: SurveySplit,
) -> LuxResult<EvaluationReport> {
    let start = Instant::now();
    let dataset_name = dataset.name().to_string();

    let rows: Vec<_> = dataset.generate_once(split).collect();
    let mut known = Vec::with_capacity(rows.len());
    let mut out_of_vocabulary = 0;
    for row in rows {
        match dataset
            .index2name(row.label)
            .and_then(|name| model.position(name))
        {
            Some(target) => known.push((row.features, target)),
            None => out_of_vocabulary += 1,
        }
    }

    let tally = known
        .par_chunks(CHUNK_ROWS)
        .map(|chunk| score_chunk(model, chunk))
        .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?;

    let (accuracy, mean_log_likelihood) = if tally.samples == 0 {
        (0.0, 0.0)
    } else {
        (
            tally.correct as f64 / tally.samples as f64,
            tally.log_likelihood / tally.samples as f64,
        )
    };

    let report = EvaluationReport {
        model: model.name().to_string(),
        dataset: dataset_name,
        split,
        samples: tally.samples,
        correct: tally.correct,
        accuracy,
        mean_log_likelihood,
        perplexity: (-mean_log_likelihood).exp(),
        out_of_vocabulary,
        elapsed_ms: start.elapsed().as_millis(),
    };

    tracing::info!(
        "evaluated {} on {}/{}: accuracy {:.4}, perplexity {:.4}, {} oov",
        report.model,
        report.dataset,
        report.split,
        report.accuracy,
        report.perplexity,
        report.out_of_vocabulary
    );

    Ok(report)
}

/// Reseed `dataset` from the config, evaluate, and append the report to the
/// configured journal, if any.
pub fn evaluate_with_config<D: SurveyDataset + ?Sized>(
    model: &Lux,
    dataset: &mut D,
    split: SurveySplit,
    config: &EvaluationConfig,
) -> LuxResult<EvaluationReport> {
    dataset.reseed(config.seed);
    let report = evaluate(model, dataset, split)?;
    if let Some(journal) = &config.journal {
        journal_report(journal, &report);
    }
    Ok(report)
}

fn journal_report(path: &Path, report: &EvaluationReport) {
    if let Err(err) = logging::log_evaluation(path, report) {
        tracing::warn!("failed to journal evaluation to {}: {}", path.display(), err);
    }
}

fn score_chunk(model: &Lux, chunk: &[([f64; 3], usize)]) -> LuxResult<Tally> {
    let xs = Array2::from_shape_fn((chunk.len(), 3), |(i, j)| chunk[i].0[j]);
    let posteriors = model.posterior_batch(xs.view())?;

    let mut tally = Tally::default();
    for (dist, &(_, target)) in posteriors.iter().zip(chunk) {
        let numbers = dist.numbers();
        tally.samples += 1;
        if argmax(ArrayView1::from(numbers)) == target {
            tally.correct += 1;
        }
        tally.log_likelihood += numbers[target].max(f64::MIN_POSITIVE).ln();
    }
    Ok(tally)
}
