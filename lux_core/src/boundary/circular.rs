//! Fuzzy intervals on a periodic domain.
//!
//! Hue intervals may straddle the wrap seam, e.g. a red whose lower bound sits
//! near `+170` and upper bound near `-170`. The interval is evaluated at the
//! folded input and at one period on either side, and the maximum is kept.
//! Folding first makes the result periodic in the input.

use super::{Boundary, DualBoundaries};
use crate::error::{LuxError, LuxResult};

/// Default period for hue in degrees.
pub const DEFAULT_PERIOD: f64 = 360.0;

/// Fold a hue in degrees into `(-180, 180]`.
pub fn wrap_hue_degrees(hue: f64) -> f64 {
    let wrapped = hue.rem_euclid(DEFAULT_PERIOD);
    if wrapped > DEFAULT_PERIOD / 2.0 {
        wrapped - DEFAULT_PERIOD
    } else {
        wrapped
    }
}

/// [`DualBoundaries`] with wraparound at `period`.
///
/// With `adjust` set, input is folded into `[-period/2, period/2)` before
/// evaluation, matching models fitted on signed hue. Without it, input is
/// folded into `[0, period)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularBoundaries {
    base: DualBoundaries,
    period: f64,
    adjust: bool,
}

impl CircularBoundaries {
    pub fn new(base: DualBoundaries, period: f64, adjust: bool) -> LuxResult<Self> {
        if !period.is_finite() || period <= 0.0 {
            return Err(LuxError::invalid_parameter(
                "period",
                period,
                "finite and > 0",
            ));
        }
        Ok(Self {
            base,
            period,
            adjust,
        })
    }

    /// Build from the six fitted scalars with the default 360 degree period.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parameters(
        scalelower: f64,
        shapelower: f64,
        mulower: f64,
        scaleupper: f64,
        shapeupper: f64,
        muupper: f64,
        adjust: bool,
    ) -> LuxResult<Self> {
        let base = DualBoundaries::from_parameters(
            scalelower, shapelower, mulower, scaleupper, shapeupper, muupper,
        )?;
        Self::new(base, DEFAULT_PERIOD, adjust)
    }

    /// Replace the period, keeping the interval.
    pub fn with_period(self, period: f64) -> LuxResult<Self> {
        Self::new(self.base, period, self.adjust)
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn adjust(&self) -> bool {
        self.adjust
    }

    pub fn base(&self) -> &DualBoundaries {
        &self.base
    }

    /// Bring `x` into the evaluation window, leaving in-window input untouched.
    fn fold(&self, x: f64) -> f64 {
        let low = if self.adjust { -self.period / 2.0 } else { 0.0 };
        let high = low + self.period;
        if (low..high).contains(&x) {
            return x;
        }
        let turns = ((x - low) / self.period).floor();
        let folded = x - turns * self.period;
        // the quotient can round across a window edge
        if folded < low {
            folded + self.period
        } else if folded >= high {
            folded - self.period
        } else {
            folded
        }
    }
}

impl Boundary for CircularBoundaries {
    fn eval(&self, x: f64) -> f64 {
        let x = self.fold(x);
        self.base
            .eval(x)
            .max(self.base.eval(x - self.period))
            .max(self.base.eval(x + self.period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{LeftBound, RightBound};

    fn seam_fixture() -> CircularBoundaries {
        CircularBoundaries::from_parameters(1.0, 1.0, -10.0, 1.0, 1.0, 5.0, true).unwrap()
    }

    fn one_unit_out() -> f64 {
        LeftBound::from_scale(1.0, 1.0, 2.0).unwrap().eval(3.0)
    }

    #[test]
    fn test_matches_dual_inside_one_period() {
        let cb = seam_fixture();
        let rb = RightBound::from_scale(1.0, 1.0, 2.0).unwrap();
        assert!((cb.eval(-11.0) - one_unit_out()).abs() < 1e-12);
        assert!((cb.eval(-11.0) - rb.eval(1.0)).abs() < 1e-12);
        assert!((cb.eval(6.0) - one_unit_out()).abs() < 1e-12);
        assert_eq!(cb.eval(0.0), 1.0);
    }

    #[test]
    fn test_wraps_across_seam() {
        let cb = seam_fixture();
        assert!((cb.eval(349.0) - one_unit_out()).abs() < 1e-12);
        assert!((cb.eval(365.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_periodicity() {
        let cb = seam_fixture();
        for x in [-179.0, -11.0, -3.25, 0.0, 6.0, 90.5, 179.0, 180.0] {
            let here = cb.eval(x);
            assert!((here - cb.eval(x + 360.0)).abs() < 1e-9);
            assert!((here - cb.eval(x - 360.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_periodicity_is_bit_exact_when_the_shift_is() {
        let hue = CircularBoundaries::from_parameters(8.0, 3.0, 190.0, 8.0, 3.0, 250.0, true)
            .unwrap();
        for cb in [seam_fixture(), hue, hue.with_period(360.0).unwrap()] {
            for i in 0..2880 {
                // eighths of a degree: x and x + 360 are both exact
                let x = -180.0 + i as f64 * 0.125;
                assert_eq!(cb.eval(x), cb.eval(x + 360.0), "x = {x}");
                assert_eq!(cb.eval(x), cb.eval(x - 720.0), "x = {x}");
            }
        }
        let cb = seam_fixture();
        assert_eq!(cb.eval(-179.9), cb.eval(-179.9 + 360.0));
    }

    #[test]
    fn test_window_input_is_not_refolded() {
        for adjust in [true, false] {
            let cb = CircularBoundaries::from_parameters(1.0, 1.0, 10.0, 1.0, 1.0, 20.0, adjust)
                .unwrap();
            for x in [-179.9, -0.1, 0.0, 0.1, 13.7, 179.9] {
                if adjust || x >= 0.0 {
                    assert_eq!(cb.fold(x), x);
                }
            }
            let high = if adjust { 180.0 } else { 360.0 };
            assert_eq!(cb.fold(high), high - 360.0);
            assert!(cb.fold(1e9) < high && cb.fold(-1e9) >= high - 360.0);
        }
    }

    #[test]
    fn test_interval_straddling_seam() {
        // 170 .. 190 expressed on a 0..360 domain
        let cb = CircularBoundaries::from_parameters(5.0, 2.0, 170.0, 5.0, 2.0, 190.0, false)
            .unwrap();
        assert_eq!(cb.eval(180.0), 1.0);
        assert_eq!(cb.eval(-180.0), 1.0);
        assert_eq!(cb.eval(540.0), 1.0);
        assert!(cb.eval(0.0) < 0.01);

        // the same red expressed as 170 .. -170 is reached through the seam
        let cb = CircularBoundaries::from_parameters(5.0, 2.0, 170.0, 5.0, 2.0, 190.0, true)
            .unwrap();
        assert_eq!(cb.eval(-175.0), 1.0);
        assert_eq!(cb.eval(175.0), 1.0);
    }

    #[test]
    fn test_custom_period() {
        let cb = seam_fixture().with_period(100.0).unwrap();
        assert_eq!(cb.period(), 100.0);
        assert!((cb.eval(-11.0) - cb.eval(89.0)).abs() < 1e-9);
        assert!(seam_fixture().with_period(0.0).is_err());
    }

    #[test]
    fn test_wrap_hue_degrees() {
        assert_eq!(wrap_hue_degrees(180.0), 180.0);
        assert_eq!(wrap_hue_degrees(-180.0), 180.0);
        assert_eq!(wrap_hue_degrees(350.0), -10.0);
        assert_eq!(wrap_hue_degrees(-370.0), -10.0);
        assert_eq!(wrap_hue_degrees(90.0), 90.0);
    }
}
