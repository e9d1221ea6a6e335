//! Name a handful of colors with the bundled basic-term model.
//!
//! Run with: cargo run --example predict_colors [config.toml]

use anyhow::{Context, Result};
use lux_semantics_core::{
    evaluate_with_config, Component, InMemorySurvey, Lux, LuxConfig, SurveySplit,
};
use ndarray::array;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => LuxConfig::load_from_file(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => LuxConfig::default(),
    };
    let lux = Lux::from_config(&config).context("building the color model")?;
    println!("{lux}");
    println!();

    let colors = array![
        [200.0, 100.0, 100.0],
        [0.0, 85.0, 90.0],
        [55.0, 90.0, 95.0],
        [120.0, 60.0, 50.0],
        [25.0, 70.0, 35.0],
        [0.0, 3.0, 50.0],
    ];

    let posteriors = lux.posterior_batch(colors.view())?;
    for (row, posterior) in colors.outer_iter().zip(&posteriors) {
        let best = lux.predict(row.as_slice().context("rows are contiguous")?)?;
        println!("(h={:>5.1}, s={:>5.1}, v={:>5.1}) -> {}", row[0], row[1], row[2], best.name());
        for (name, mass) in posterior.top(3) {
            println!("    {:<8} {:.4}", name, mass);
        }
    }
    println!();

    let mut survey = InMemorySurvey::new("demo", config.evaluation.seed);
    for (row, posterior) in colors.outer_iter().zip(&posteriors) {
        let label = posterior.argmax().unwrap_or("gray");
        survey.push(SurveySplit::Test, [row[0], row[1], row[2]], label)?;
    }
    let report = evaluate_with_config(&lux, &mut survey, SurveySplit::Test, &config.evaluation)?;
    println!(
        "self-consistency on {} rows: accuracy {:.3}, perplexity {:.3}",
        report.samples, report.accuracy, report.perplexity
    );

    Ok(())
}
