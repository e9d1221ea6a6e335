//! Inference configuration via TOML files.
//!
//! ```toml
//! [model]
//! definition = "assets/lux.json"
//! graceful_failure = true
//! zero_mass = "uniform"
//! hue_period = 360.0
//! parallel_threshold = 1024
//!
//! [evaluation]
//! seed = 42
//! journal = "logs/evaluation.jsonl"
//! ```
//!
//! Every key is optional; missing sections fall back to [`LuxConfig::default`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::boundary::DEFAULT_PERIOD;
use crate::model::{ModelOptions, ZeroMassPolicy};

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use lux_semantics_core::LuxConfig;
///
/// let config = LuxConfig::load_from_file("config/lux.toml")
///     .unwrap_or_else(|_| LuxConfig::default());
///
/// println!("hue period: {}", config.model.hue_period);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct LuxConfig {
    pub model: ModelConfig,
    pub evaluation: EvaluationConfig,
}

/// Which definition to load and how to run inference over it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    /// JSON model definition; the bundled basic terms when unset
    pub definition: Option<PathBuf>,
    pub graceful_failure: bool,
    pub zero_mass: ZeroMassPolicy,
    /// Period of the hue dimension in degrees
    pub hue_period: f64,
    pub parallel_threshold: usize,
}

impl ModelConfig {
    pub fn options(&self) -> ModelOptions {
        ModelOptions {
            graceful_failure: self.graceful_failure,
            zero_mass: self.zero_mass,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        let options = ModelOptions::default();
        Self {
            definition: None,
            graceful_failure: options.graceful_failure,
            zero_mass: options.zero_mass,
            hue_period: DEFAULT_PERIOD,
            parallel_threshold: options.parallel_threshold,
        }
    }
}

/// Dataset evaluation settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationConfig {
    /// Shuffling seed applied to the dataset by `evaluate_with_config`
    pub seed: u64,
    /// JSONL journal receiving one record per evaluation
    pub journal: Option<PathBuf>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            journal: None,
        }
    }
}

impl LuxConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawLuxConfig =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;

        let model = ModelConfig::try_from(raw.model)?;
        let evaluation = EvaluationConfig {
            seed: raw.evaluation.seed,
            journal: raw.evaluation.journal,
        };

        Ok(Self { model, evaluation })
    }
}

impl ModelConfig {
    fn try_from(raw: RawModel) -> Result<Self, ConfigError> {
        if !raw.hue_period.is_finite() || raw.hue_period <= 0.0 {
            return Err(ConfigError::Parse("model.hue_period must be positive".into()));
        }
        let zero_mass = match raw.zero_mass.to_ascii_lowercase().as_str() {
            "uniform" => ZeroMassPolicy::Uniform,
            "error" => ZeroMassPolicy::Error,
            other => {
                return Err(ConfigError::Parse(format!(
                    "model.zero_mass must be \"uniform\" or \"error\", got \"{}\"",
                    other
                )))
            }
        };

        Ok(Self {
            definition: raw.definition,
            graceful_failure: raw.graceful_failure,
            zero_mass,
            hue_period: raw.hue_period,
            parallel_threshold: raw.parallel_threshold,
        })
    }
}

#[derive(Debug, Deserialize, Default)]
struct RawLuxConfig {
    #[serde(default)]
    model: RawModel,
    #[serde(default)]
    evaluation: RawEvaluation,
}

#[derive(Debug, Deserialize)]
struct RawModel {
    #[serde(default)]
    definition: Option<PathBuf>,
    #[serde(default)]
    graceful_failure: bool,
    #[serde(default = "default_zero_mass")]
    zero_mass: String,
    #[serde(default = "default_hue_period")]
    hue_period: f64,
    #[serde(default = "default_parallel_threshold")]
    parallel_threshold: usize,
}

impl Default for RawModel {
    fn default() -> Self {
        Self {
            definition: None,
            graceful_failure: false,
            zero_mass: default_zero_mass(),
            hue_period: default_hue_period(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEvaluation {
    #[serde(default = "default_seed")]
    seed: u64,
    #[serde(default)]
    journal: Option<PathBuf>,
}

impl Default for RawEvaluation {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            journal: None,
        }
    }
}

fn default_zero_mass() -> String {
    "uniform".to_string()
}

fn default_hue_period() -> f64 {
    DEFAULT_PERIOD
}

fn default_parallel_threshold() -> usize {
    ModelOptions::default().parallel_threshold
}

fn default_seed() -> u64 {
    42
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}
