//! LUX, the lexicon of uncertain color standards.
//!
//! `lux.predict(&[h, s, v])` with `h` in degrees on `(-180, 180]` or
//! `(0, 360]`, and `s`, `v` on `(0, 100)`.

pub mod definition;
pub mod label;

pub use definition::{ComponentDefinition, DimensionParameters, LabelParameters, ModelDefinition};
pub use label::ColorLabel;

use std::fs;
use std::path::Path;

use crate::boundary::DEFAULT_PERIOD;
use crate::config::LuxConfig;
use crate::error::{LuxError, LuxResult};
use crate::model::{Model, ModelOptions};

/// Color-term model over [`ColorLabel`] components.
pub type Lux = Model<ColorLabel>;

const BASIC_TERMS: &str = include_str!("../../assets/basic_terms.json");

impl Model<ColorLabel> {
    pub fn from_definition(
        definition: &ModelDefinition,
        options: ModelOptions,
    ) -> LuxResult<Self> {
        Self::from_definition_with_period(definition, options, DEFAULT_PERIOD)
    }

    /// Build with a non-default hue period; labels are indexed in definition order.
    pub fn from_definition_with_period(
        definition: &ModelDefinition,
        options: ModelOptions,
        hue_period: f64,
    ) -> LuxResult<Self> {
        let components = definition
            .components
            .iter()
            .enumerate()
            .map(|(index, component)| ColorLabel::from_definition(component, index, hue_period))
            .collect::<LuxResult<Vec<_>>>()?;
        Model::new(definition.name.clone(), components, options)
    }

    pub fn from_json_str(json: &str, options: ModelOptions) -> LuxResult<Self> {
        Self::from_definition(&ModelDefinition::from_json_str(json)?, options)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P, options: ModelOptions) -> LuxResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| LuxError::Io {
            path: path.display().to_string(),
            details: err.to_string(),
        })?;
        Self::from_json_str(&contents, options)
    }

    /// Small bundled vocabulary of basic color terms with hand-set parameters.
    pub fn basic_terms() -> LuxResult<Self> {
        Self::from_json_str(BASIC_TERMS, ModelOptions::default())
    }

    /// Load the configured definition, or the bundled basic terms when none is set.
    pub fn from_config(config: &LuxConfig) -> LuxResult<Self> {
        let definition = match &config.model.definition {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|err| LuxError::Io {
                    path: path.display().to_string(),
                    details: err.to_string(),
                })?;
                ModelDefinition::from_json_str(&contents)?
            }
            None => ModelDefinition::from_json_str(BASIC_TERMS)?,
        };
        Self::from_definition_with_period(
            &definition,
            config.model.options(),
            config.model.hue_period,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;

    #[test]
    fn test_basic_terms_load() {
        let lux = Lux::basic_terms().unwrap();
        assert_eq!(lux.name(), "basic_terms");
        assert!(lux.contains("blue"));
        assert!(lux.contains("Gray"));
        for (i, label) in lux.components().iter().enumerate() {
            assert_eq!(label.index(), i);
        }
    }

    #[test]
    fn test_basic_terms_blue() {
        let lux = Lux::basic_terms().unwrap();
        let x = [200.0, 100.0, 100.0];
        assert_eq!(lux.predict(&x).unwrap().name(), "blue");
        let p = lux.likelihood(&x, "blue").unwrap().unwrap();
        assert!(p > 0.5 && p <= 1.0);
    }

    #[test]
    fn test_reordered_labels_take_new_positions() {
        let basic = Lux::basic_terms().unwrap();
        let reversed: Vec<ColorLabel> = basic.components().iter().rev().cloned().collect();
        let lux = Lux::new("reversed", reversed, ModelOptions::default()).unwrap();
        for (i, label) in lux.components().iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_eq!(lux.position(label.name()), Some(i));
        }
        assert_eq!(lux.components()[0].name(), "white");
    }

    #[test]
    fn test_hue_period_override() {
        let definition = ModelDefinition::from_json_str(BASIC_TERMS).unwrap();
        let lux =
            Lux::from_definition_with_period(&definition, ModelOptions::default(), 720.0).unwrap();
        assert_eq!(lux.components()[0].hue_model().period(), 720.0);
        assert!(
            Lux::from_definition_with_period(&definition, ModelOptions::default(), -1.0).is_err()
        );
    }

    #[test]
    fn test_missing_file() {
        let err =
            Lux::from_json_file("/nonexistent/lux.json", ModelOptions::default()).unwrap_err();
        assert!(matches!(err, LuxError::Io { .. }));
    }

    #[test]
    fn test_from_default_config() {
        let lux = Lux::from_config(&LuxConfig::default()).unwrap();
        assert_eq!(lux.len(), Lux::basic_terms().unwrap().len());
    }
}
