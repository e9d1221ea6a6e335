//! Fuzzy boundary functions over a single dimension.
//!
//! A boundary maps a real value to a graded membership in `[0, 1]`. One-sided
//! bounds ([`LeftBound`], [`RightBound`]) saturate to `1.0` on their inside
//! half and decay smoothly outside. [`DualBoundaries`] intersects a pair of
//! them into a fuzzy interval, and [`CircularBoundaries`] wraps that interval
//! onto a periodic domain such as hue.

pub mod bound;
pub mod circular;
pub mod dual;

pub use bound::{BoundaryParameters, LeftBound, RightBound};
pub use circular::{wrap_hue_degrees, CircularBoundaries, DEFAULT_PERIOD};
pub use dual::DualBoundaries;

use ndarray::{Array1, ArrayView1};

/// A membership function `f(x) -> [0, 1]` over one dimension.
pub trait Boundary {
    /// Evaluate the membership of a single value.
    fn eval(&self, x: f64) -> f64;

    /// Evaluate every element of `xs`.
    fn eval_array(&self, xs: ArrayView1<'_, f64>) -> Array1<f64> {
        xs.mapv(|x| self.eval(x))
    }
}
