//! Exponential smoothing for the cursor point
//!
//! Fixed-factor lerp toward the raw input every frame. Cheap and lag-stable
//! at the landmark model's frame rate; `snap` re-seeds it when control
//! resumes so the cursor never slides in from a stale position.

use crate::gesture::NormPoint;

/// Lerp filter for a single value
#[derive(Clone, Copy, Debug)]
pub struct ExpSmoother {
    /// Fraction of the remaining distance covered per update (0-1)
    factor: f32,
    value: f32,
}

impl ExpSmoother {
    pub fn new(factor: f32, initial: f32) -> Self {
        Self {
            factor: factor.clamp(0.0, 1.0),
            value: initial,
        }
    }

    /// Move toward `target`, returning the new value
    pub fn filter(&mut self, target: f32) -> f32 {
        self.value += (target - self.value) * self.factor;
        self.value
    }

    /// Jump straight to `value`
    pub fn snap(&mut self, value: f32) {
        self.value = value;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_factor(&mut self, factor: f32) {
        self.factor = factor.clamp(0.0, 1.0);
    }
}

/// Pair of smoothers for a 2D point
#[derive(Clone, Copy, Debug)]
pub struct ExpSmoother2D {
    pub x: ExpSmoother,
    pub y: ExpSmoother,
}

impl ExpSmoother2D {
    /// Starts at screen center
    pub fn new(factor: f32) -> Self {
        Self {
            x: ExpSmoother::new(factor, 0.5),
            y: ExpSmoother::new(factor, 0.5),
        }
    }

    pub fn filter(&mut self, target: NormPoint) -> NormPoint {
        NormPoint::new(self.x.filter(target.x), self.y.filter(target.y))
    }

    pub fn snap(&mut self, point: NormPoint) {
        self.x.snap(point.x);
        self.y.snap(point.y);
    }

    pub fn value(&self) -> NormPoint {
        NormPoint::new(self.x.value(), self.y.value())
    }

    pub fn set_factor(&mut self, factor: f32) {
        self.x.set_factor(factor);
        self.y.set_factor(factor);
    }
}

impl Default for ExpSmoother2D {
    fn default() -> Self {
        Self::new(0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reaches_one_percent_within_twenty_one_ticks() {
        let mut s = ExpSmoother::new(0.2, 0.0);
        let mut ticks = 0;
        while (1.0 - s.value()).abs() > 0.01 {
            s.filter(1.0);
            ticks += 1;
        }
        // 0.8^n < 0.01 first holds at n = 21
        assert!(ticks <= 21, "took {ticks} ticks");
    }

    #[test]
    fn snap_skips_the_lerp() {
        let mut s = ExpSmoother2D::new(0.2);
        s.snap(NormPoint::new(0.9, 0.1));
        assert_eq!(s.value(), NormPoint::new(0.9, 0.1));
        assert_eq!(s.filter(NormPoint::new(0.9, 0.1)), NormPoint::new(0.9, 0.1));
    }

    proptest! {
        #[test]
        fn converges_monotonically(start in 0.0f32..1.0, target in 0.0f32..1.0) {
            let mut s = ExpSmoother::new(0.2, start);
            let mut gap = (target - start).abs();
            for _ in 0..40 {
                s.filter(target);
                let next = (target - s.value()).abs();
                prop_assert!(next <= gap);
                gap = next;
            }
        }
    }
}
