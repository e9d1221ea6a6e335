//! Serialized model definitions.
//!
//! ```json
//! { "name": "lux",
//!   "components": [
//!     { "name": "blue",
//!       "parameters": {
//!         "availability": 0.9,
//!         "hue_adjust": true,
//!         "parameters": [ {hue}, {saturation}, {value} ] } } ] }
//! ```
//!
//! Each dimension entry carries `scalelower, shapelower, mulower, scaleupper,
//! shapeupper, muupper`.

use serde::{Deserialize, Serialize};

use crate::boundary::{CircularBoundaries, DualBoundaries};
use crate::error::LuxResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub name: String,
    pub components: Vec<ComponentDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub name: String,
    pub parameters: LabelParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelParameters {
    pub availability: f64,
    pub hue_adjust: bool,
    /// Hue, saturation and value, in that order.
    pub parameters: [DimensionParameters; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionParameters {
    pub scalelower: f64,
    pub shapelower: f64,
    pub mulower: f64,
    pub scaleupper: f64,
    pub shapeupper: f64,
    pub muupper: f64,
}

impl DimensionParameters {
    pub fn dual(&self) -> LuxResult<DualBoundaries> {
        DualBoundaries::from_parameters(
            self.scalelower,
            self.shapelower,
            self.mulower,
            self.scaleupper,
            self.shapeupper,
            self.muupper,
        )
    }

    pub fn circular(&self, adjust: bool, period: f64) -> LuxResult<CircularBoundaries> {
        CircularBoundaries::new(self.dual()?, period, adjust)
    }
}

impl ModelDefinition {
    pub fn from_json_str(json: &str) -> LuxResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
