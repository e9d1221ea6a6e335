//! Fuzzy intervals built from a pair of one-sided bounds.

use super::{Boundary, LeftBound, RightBound};
use crate::error::LuxResult;

/// Fuzzy interval `[mulower, muupper]`: the min of "above the lower
/// threshold" and "below the upper threshold".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualBoundaries {
    lower: RightBound,
    upper: LeftBound,
}

impl DualBoundaries {
    pub fn new(lower: RightBound, upper: LeftBound) -> Self {
        Self { lower, upper }
    }

    /// Build from the six fitted scalars, in definition order.
    pub fn from_parameters(
        scalelower: f64,
        shapelower: f64,
        mulower: f64,
        scaleupper: f64,
        shapeupper: f64,
        muupper: f64,
    ) -> LuxResult<Self> {
        Ok(Self {
            lower: RightBound::from_scale(scalelower, shapelower, mulower)?,
            upper: LeftBound::from_scale(scaleupper, shapeupper, muupper)?,
        })
    }

    pub fn lower(&self) -> &RightBound {
        &self.lower
    }

    pub fn upper(&self) -> &LeftBound {
        &self.upper
    }
}

impl Boundary for DualBoundaries {
    fn eval(&self, x: f64) -> f64 {
        self.lower.eval(x).min(self.upper.eval(x))
    }
}
