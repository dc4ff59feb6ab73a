//! Speed and distance model
//!
//! Baseline speed rises linearly with elapsed run time. Boost is an overlay
//! on top of that baseline: it never changes the baseline itself, so once it
//! lapses speed is back on the exact pre-boost trajectory.

use crate::tuning::Tuning;

/// Speed curve parameters, copied out of [`Tuning`] at run start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedModel {
    /// Speed at t = 0 (units/s)
    pub base_speed: f32,
    /// Baseline acceleration (units/s per second)
    pub growth_per_sec: f32,
    pub boost_increment: f32,
    pub boost_multiplier: f32,
}

impl SpeedModel {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            base_speed: tuning.base_speed.max(0.0),
            growth_per_sec: tuning.speed_growth_per_ms.max(0.0) * 1000.0,
            boost_increment: tuning.boost_increment.max(0.0),
            boost_multiplier: tuning.boost_multiplier.max(1.0),
        }
    }

    /// Baseline speed after `elapsed` seconds of running
    #[inline]
    pub fn base_at(&self, elapsed: f32) -> f32 {
        (self.base_speed + self.growth_per_sec * elapsed).max(0.0)
    }

    /// Reported speed: baseline plus the boost increment while boosting
    #[inline]
    pub fn speed_at(&self, elapsed: f32, boosting: bool) -> f32 {
        if boosting {
            self.base_at(elapsed) + self.boost_increment
        } else {
            self.base_at(elapsed)
        }
    }

    /// Speed obstacles actually scroll at
    #[inline]
    pub fn effective_at(&self, elapsed: f32, boosting: bool) -> f32 {
        if boosting {
            self.speed_at(elapsed, true) * self.boost_multiplier
        } else {
            self.base_at(elapsed)
        }
    }

    /// Integral of the baseline over [t1, t2]
    fn base_integral(&self, t1: f32, t2: f32) -> f32 {
        let span = t2 - t1;
        self.base_speed * span + 0.5 * self.growth_per_sec * span * (t1 + t2)
    }

    /// Exact travel over a frame starting at `elapsed` lasting `dt` seconds,
    /// with `boost_remaining` seconds of boost left at frame start.
    pub fn travel(&self, elapsed: f32, dt: f32, boost_remaining: f32) -> f32 {
        if dt <= 0.0 {
            return 0.0;
        }
        let boosted = boost_remaining.clamp(0.0, dt);
        let split = elapsed + boosted;
        let end = elapsed + dt;

        let boosted_travel = if boosted > 0.0 {
            (self.base_integral(elapsed, split) + self.boost_increment * boosted)
                * self.boost_multiplier
        } else {
            0.0
        };
        boosted_travel + self.base_integral(split, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SpeedModel {
        SpeedModel {
            base_speed: 10.0,
            growth_per_sec: 2.0,
            boost_increment: 5.0,
            boost_multiplier: 2.0,
        }
    }

    #[test]
    fn test_baseline_grows_linearly() {
        let m = model();
        assert_eq!(m.base_at(0.0), 10.0);
        assert!((m.base_at(3.0) - 16.0).abs() < 1e-5);
    }

    #[test]
    fn test_travel_without_boost_is_trapezoid() {
        let m = model();
        // ∫0..2 (10 + 2t) dt = 20 + 4
        assert!((m.travel(0.0, 2.0, 0.0) - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_travel_splits_frame_at_boost_end() {
        let m = model();
        // First 0.5s boosted: (∫0..0.5 (10+2t) + 5*0.5) * 2 = (5.25 + 2.5) * 2
        // Remaining 0.5s plain: ∫0.5..1 (10+2t) = 5.75
        let expected = 15.5 + 5.75;
        assert!((m.travel(0.0, 1.0, 0.5) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_split_frames_match_single_frame() {
        let m = model();
        let whole = m.travel(1.0, 0.4, 0.25);
        let first = m.travel(1.0, 0.1, 0.25);
        let second = m.travel(1.1, 0.3, 0.15);
        assert!((whole - (first + second)).abs() < 1e-4);
    }

    #[test]
    fn test_boost_overlay_leaves_baseline_untouched() {
        let m = model();
        assert_eq!(m.speed_at(4.0, true), m.base_at(4.0) + 5.0);
        assert_eq!(m.effective_at(4.0, true), (m.base_at(4.0) + 5.0) * 2.0);
        assert_eq!(m.speed_at(4.0, false), m.base_at(4.0));
    }
}
