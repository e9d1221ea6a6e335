//! One-sided fuzzy thresholds.
//!
//! Both bounds share the generalized-bell falloff
//!
//! ```text
//! f(d) = 1 / (1 + (d / scale)^shape)      for d > 0
//! f(d) = 1                                for d <= 0
//! ```
//!
//! where `d` is how far `x` lies past `location` on the outside side. The
//! falloff is `0.5` at `d == scale`, strictly decreasing in `d`, and never
//! reaches zero for finite input. Larger `shape` sharpens the transition
//! towards a step.

use serde::{Deserialize, Serialize};

use super::Boundary;
use crate::error::{LuxError, LuxResult};

/// Shape/scale/location triple describing one fuzzy threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryParameters {
    pub scale: f64,
    pub shape: f64,
    pub location: f64,
}

impl BoundaryParameters {
    /// Validate and build a parameter triple.
    pub fn new(scale: f64, shape: f64, location: f64) -> LuxResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(LuxError::invalid_parameter("scale", scale, "finite and > 0"));
        }
        if !shape.is_finite() || shape <= 0.0 {
            return Err(LuxError::invalid_parameter("shape", shape, "finite and > 0"));
        }
        if !location.is_finite() {
            return Err(LuxError::invalid_parameter("location", location, "finite"));
        }
        Ok(Self {
            scale,
            shape,
            location,
        })
    }

    fn falloff(&self, distance: f64) -> f64 {
        if distance <= 0.0 {
            1.0
        } else {
            1.0 / (1.0 + (distance / self.scale).powf(self.shape))
        }
    }
}

/// Membership in "x is at or below `location`": `1.0` for `x <= location`,
/// decaying for `x > location`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeftBound {
    params: BoundaryParameters,
}

impl LeftBound {
    pub fn from_scale(scale: f64, shape: f64, location: f64) -> LuxResult<Self> {
        Ok(Self {
            params: BoundaryParameters::new(scale, shape, location)?,
        })
    }

    pub fn params(&self) -> &BoundaryParameters {
        &self.params
    }
}

impl Boundary for LeftBound {
    fn eval(&self, x: f64) -> f64 {
        self.params.falloff(x - self.params.location)
    }
}

/// Membership in "x is at or above `location`": `1.0` for `x >= location`,
/// decaying for `x < location`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RightBound {
    params: BoundaryParameters,
}

impl RightBound {
    pub fn from_scale(scale: f64, shape: f64, location: f64) -> LuxResult<Self> {
        Ok(Self {
            params: BoundaryParameters::new(scale, shape, location)?,
        })
    }

    pub fn params(&self) -> &BoundaryParameters {
        &self.params
    }
}

impl Boundary for RightBound {
    fn eval(&self, x: f64) -> f64 {
        self.params.falloff(self.params.location - x)
    }
}
