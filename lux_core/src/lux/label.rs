//! A color name as a product of per-dimension fuzzy intervals.

use ndarray::{Array1, ArrayView1, ArrayView2};

use super::definition::ComponentDefinition;
use crate::boundary::{Boundary, CircularBoundaries, DualBoundaries};
use crate::error::{LuxError, LuxResult};
use crate::model::observation::{check_batch, check_view};
use crate::model::Component;

/// One color name: hue, saturation and value memberships multiplied
/// together, weighted by the name's availability.
///
/// Observations are `(h, s, v)` with hue in degrees and saturation/value on
/// a `0..100` scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLabel {
    name: String,
    index: usize,
    hue_model: CircularBoundaries,
    sat_model: DualBoundaries,
    val_model: DualBoundaries,
    availability: f64,
}

impl ColorLabel {
    pub fn new(
        name: impl Into<String>,
        index: usize,
        (hue_model, sat_model, val_model): (CircularBoundaries, DualBoundaries, DualBoundaries),
        availability: f64,
    ) -> LuxResult<Self> {
        if !(0.0..=1.0).contains(&availability) {
            return Err(LuxError::invalid_parameter(
                "availability",
                availability,
                "0 <= availability <= 1",
            ));
        }
        Ok(Self {
            name: name.into(),
            index,
            hue_model,
            sat_model,
            val_model,
            availability,
        })
    }

    /// Build the label at position `index` of its model.
    pub fn from_definition(
        definition: &ComponentDefinition,
        index: usize,
        hue_period: f64,
    ) -> LuxResult<Self> {
        let info = &definition.parameters;
        let [hue, sat, val] = &info.parameters;
        let dims = (
            hue.circular(info.hue_adjust, hue_period)?,
            sat.dual()?,
            val.dual()?,
        );
        Self::new(definition.name.clone(), index, dims, info.availability)
    }

    /// Position in the owning model's component list, reassigned when a
    /// [`Model`](crate::Model) is built from the label.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn availability(&self) -> f64 {
        self.availability
    }

    pub fn hue_model(&self) -> &CircularBoundaries {
        &self.hue_model
    }

    pub fn sat_model(&self) -> &DualBoundaries {
        &self.sat_model
    }

    pub fn val_model(&self) -> &DualBoundaries {
        &self.val_model
    }
}

impl Component for ColorLabel {
    const FEATURES: usize = 3;

    fn name(&self) -> &str {
        &self.name
    }

    fn prior(&self) -> f64 {
        self.availability
    }

    fn pdf(&self, x: ArrayView1<'_, f64>) -> LuxResult<f64> {
        check_view(&x, Self::FEATURES, "pdf")?;
        Ok(self.hue_model.eval(x[0]) * self.sat_model.eval(x[1]) * self.val_model.eval(x[2]))
    }

    fn pdf_batch(&self, xs: ArrayView2<'_, f64>) -> LuxResult<Array1<f64>> {
        check_batch(&xs, Self::FEATURES, "pdf_batch")?;
        Ok(self.hue_model.eval_array(xs.column(0))
            * self.sat_model.eval_array(xs.column(1))
            * self.val_model.eval_array(xs.column(2)))
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn blue() -> ColorLabel {
        ColorLabel::new(
            "blue",
            0,
            (
                CircularBoundaries::from_parameters(8.0, 3.0, 190.0, 8.0, 3.0, 250.0, true)
                    .unwrap(),
                DualBoundaries::from_parameters(8.0, 3.0, 40.0, 8.0, 3.0, 100.0).unwrap(),
                DualBoundaries::from_parameters(8.0, 3.0, 30.0, 8.0, 3.0, 100.0).unwrap(),
            ),
            0.9,
        )
        .unwrap()
    }

    #[test]
    fn test_core_of_every_dimension() {
        let label = blue();
        assert_eq!(label.pdf(array![200.0, 100.0, 100.0].view()).unwrap(), 1.0);
        let score = label.score(array![200.0, 100.0, 100.0].view()).unwrap();
        assert!((score - 0.9).abs() < 1e-12);
        // same hue written as a signed angle
        assert_eq!(label.pdf(array![-160.0, 100.0, 100.0].view()).unwrap(), 1.0);
    }

    #[test]
    fn test_product_of_dimensions() {
        let label = blue();
        let x = array![180.0, 30.0, 20.0];
        let expected = label.hue_model().eval(180.0)
            * label.sat_model().eval(30.0)
            * label.val_model().eval(20.0);
        assert_eq!(label.pdf(x.view()).unwrap(), expected);
        assert!(expected < 1.0 && expected > 0.0);
    }

    #[test]
    fn test_batch_matches_rows() {
        let label = blue();
        let xs = array![
            [200.0, 100.0, 100.0],
            [10.0, 50.0, 50.0],
            [240.0, 45.0, 90.0]
        ];
        let batch = label.pdf_batch(xs.view()).unwrap();
        for (i, row) in xs.outer_iter().enumerate() {
            assert_eq!(batch[i], label.pdf(row).unwrap());
        }
    }

    #[test]
    fn test_malformed_observation_is_an_error() {
        let label = blue();
        assert!(matches!(
            label.pdf(array![1.0, 2.0].view()),
            Err(LuxError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            label.score(array![1.0, 2.0, 3.0, 4.0].view()),
            Err(LuxError::ShapeMismatch { .. })
        ));
        let narrow = array![[1.0, 2.0], [3.0, 4.0]];
        assert!(matches!(
            label.pdf_batch(narrow.view()),
            Err(LuxError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            label.pdf(array![f64::NAN, 50.0, 50.0].view()),
            Err(LuxError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_availability_range() {
        let dims = (
            *blue().hue_model(),
            *blue().sat_model(),
            *blue().val_model(),
        );
        assert!(ColorLabel::new("x", 0, dims, 1.5).is_err());
        assert!(ColorLabel::new("x", 0, dims, -0.1).is_err());
        assert!(ColorLabel::new("x", 0, dims, f64::NAN).is_err());
        assert!(ColorLabel::new("x", 0, dims, 0.0).is_ok());
    }
}
