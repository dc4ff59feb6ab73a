//! Data-driven game balance
//!
//! Every number that shapes difficulty lives in [`Tuning`]. The browser build
//! uses the defaults; the headless runner can override any subset from a JSON
//! file, missing fields keep their default.

use serde::{Deserialize, Serialize};

use crate::consts::BOAT_HALF_EXTENTS;
use crate::error::TuningError;
use crate::sim::ObstacleKind;

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Speed ===
    /// Travel speed at the start of a run (units/s)
    pub base_speed: f32,
    /// Baseline speed gained per elapsed millisecond (units/s per ms)
    pub speed_growth_per_ms: f32,
    /// Speed added while boosting (units/s)
    pub boost_increment: f32,
    /// Travel multiplier while boosting
    pub boost_multiplier: f32,
    pub boost_duration_ms: f32,
    /// Display distance per world unit travelled
    pub distance_scale: f32,

    // === Spawning ===
    /// Spawn whenever fewer than this many obstacles are active
    pub max_active: usize,
    /// Spawn whenever the cursor is nearer than this past the boat
    pub lookahead: f32,
    /// Mean cursor advance per placement (in gap units)
    pub spawn_gap_mean: f32,
    /// Uniform jitter applied to the gap (in gap units, ±)
    pub spawn_gap_jitter: f32,
    /// World units per gap unit
    pub spawn_gap_unit: f32,
    /// Z jitter around the cursor (±)
    pub spawn_z_jitter: f32,
    /// Extra random lookahead added on top of the cursor (0..this)
    pub spawn_extra_lookahead: f32,
    /// Obstacles never spawn nearer than this to the boat
    pub min_spawn_ahead: f32,
    /// Lateral jitter around the lane centerline (±)
    pub lateral_jitter: f32,
    /// Cursor position at run start
    pub initial_cursor: f32,
    /// Obstacles seeded when a run starts
    pub initial_obstacles: usize,
    /// Relative weights for wreck, log, islet
    pub kind_weights: [f32; 3],

    // === Retirement ===
    /// Obstacles this far behind the boat are retired
    pub retire_behind: f32,
    /// Safety lifetime for any obstacle (ms)
    pub lifetime_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 18.0,
            speed_growth_per_ms: 0.0003,
            boost_increment: 12.0,
            boost_multiplier: 1.5,
            boost_duration_ms: 500.0,
            distance_scale: 0.5,

            max_active: 18,
            lookahead: 120.0,
            spawn_gap_mean: 2.2,
            spawn_gap_jitter: 0.8,
            spawn_gap_unit: 5.0,
            spawn_z_jitter: 1.5,
            spawn_extra_lookahead: 6.0,
            min_spawn_ahead: 30.0,
            lateral_jitter: 0.35,
            initial_cursor: 40.0,
            initial_obstacles: 6,
            kind_weights: [0.35, 0.35, 0.30],

            retire_behind: 10.0,
            lifetime_ms: 20_000.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        let non_negative = [
            ("base_speed", self.base_speed),
            ("speed_growth_per_ms", self.speed_growth_per_ms),
            ("boost_increment", self.boost_increment),
            ("boost_duration_ms", self.boost_duration_ms),
            ("distance_scale", self.distance_scale),
            ("lookahead", self.lookahead),
            ("retire_behind", self.retire_behind),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(field, "must be finite and non-negative");
            }
        }

        // These feed `random_range`, whose bounds must stay finite
        let spans = [
            ("spawn_gap_jitter", self.spawn_gap_jitter),
            ("spawn_z_jitter", self.spawn_z_jitter),
            ("spawn_extra_lookahead", self.spawn_extra_lookahead),
            ("lateral_jitter", self.lateral_jitter),
        ];
        for (field, value) in spans {
            if !(0.0..=MAX_SPAN).contains(&value) {
                return invalid(field, "must be between 0 and 1e6");
            }
        }

        if !(self.boost_multiplier.is_finite() && self.boost_multiplier >= 1.0) {
            return invalid("boost_multiplier", "must be at least 1");
        }
        if !(self.spawn_gap_mean <= MAX_SPAN && self.spawn_gap_mean > self.spawn_gap_jitter) {
            return invalid("spawn_gap_mean", "must exceed spawn_gap_jitter and stay below 1e6");
        }
        if !(self.spawn_gap_unit > 0.0 && self.spawn_gap_unit <= MAX_SPAN) {
            return invalid("spawn_gap_unit", "must be positive and below 1e6");
        }
        if !(self.min_spawn_ahead > min_spawn_clearance() && self.min_spawn_ahead <= MAX_SPAN) {
            return invalid("min_spawn_ahead", "must clear the boat and the deepest obstacle");
        }
        if !(self.initial_cursor.abs() <= MAX_SPAN) {
            return invalid("initial_cursor", "must be finite and within 1e6 of the boat");
        }
        if self.kind_weights.iter().any(|w| !(w.is_finite() && *w >= 0.0))
            || self.kind_weights.iter().sum::<f32>() <= 0.0
        {
            return invalid("kind_weights", "must be non-negative with a positive sum");
        }
        if !(self.lifetime_ms.is_finite() && self.lifetime_ms > 0.0) {
            return invalid("lifetime_ms", "must be positive");
        }
        Ok(())
    }
}

/// Largest magnitude accepted for spawn distances and jitters (world units)
const MAX_SPAN: f32 = 1.0e6;

/// Nearest spawn distance at which no obstacle can overlap the boat
pub fn min_spawn_clearance() -> f32 {
    let deepest = ObstacleKind::ALL
        .iter()
        .map(|kind| kind.half_extents().z)
        .fold(0.0, f32::max);
    BOAT_HALF_EXTENTS.z + deepest
}
