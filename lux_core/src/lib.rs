//! # LUX Semantics Core
//!
//! A probabilistic model of color-term semantics. Each color name is a fuzzy
//! region of hue/saturation/value space weighted by how available the name
//! is to speakers. Given an `(h, s, v)` observation the model returns a
//! posterior distribution over names.
//!
//! ## Quick Start
//!
//! ```rust
//! use lux_semantics_core::{Component, Lux};
//!
//! let lux = Lux::basic_terms().unwrap();
//! let color = [200.0, 100.0, 100.0];
//!
//! let best = lux.predict(&color).unwrap();
//! let p_blue = lux.likelihood(&color, "blue").unwrap();
//! let posterior = lux.posterior(&color).unwrap();
//!
//! println!("{} ({:?}); top 3: {:?}", best.name(), p_blue, posterior.top(3));
//! ```
//!
//! ## Core Modules
//!
//! - [`boundary`] - One-sided, dual and circular fuzzy boundaries
//! - [`model`] - Generic component model, posterior and distributions
//! - [`lux`] - Color labels and model definitions
//! - [`data`] - Survey dataset interface
//! - [`evaluate`] - Accuracy and perplexity over a survey split
//! - [`config`] - Configuration via TOML
//! - [`logging`] - JSON line-delimited journals

pub mod boundary;
pub mod config;
pub mod data;
pub mod error;
pub mod evaluate;
pub mod logging;
pub mod lux;
pub mod model;

pub use boundary::{
    wrap_hue_degrees, Boundary, BoundaryParameters, CircularBoundaries, DualBoundaries, LeftBound,
    RightBound,
};
pub use config::{ConfigError, EvaluationConfig, LuxConfig, ModelConfig};
pub use data::{InMemorySurvey, LabeledObservation, SurveyDataset, SurveySplit};
pub use error::{LuxError, LuxResult};
pub use evaluate::{evaluate, evaluate_with_config, EvaluationReport};
pub use lux::{ColorLabel, Lux, ModelDefinition};
pub use model::{
    Component, Distribution, Model, ModelOptions, Observation, Posterior, Prediction,
    ZeroMassPolicy,
};
