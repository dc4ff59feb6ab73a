//! Sea Lanes - A three-lane ocean dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, advancement, collisions, run lifecycle)
//! - `renderer`: Retained scene and WebGPU rendering pipeline
//! - `platform`: Input translation and the host-owned frame driver
//! - `tuning`: Data-driven game balance
//! - `ui`: Modal and HUD view model

pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::{LifecycleError, RenderError, SceneError, TuningError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Number of lanes the boat can occupy
    pub const LANE_COUNT: usize = 3;
    /// Lane index the boat starts in (and jumps to on "center")
    pub const CENTER_LANE: usize = 1;
    /// Spacing between lane centerlines (world units)
    pub const LANE_SPACING: f32 = 3.0;

    /// Boat sits at the origin; the ocean scrolls toward -Z
    pub const BOAT_Z: f32 = 0.0;
    pub const BOAT_HALF_EXTENTS: Vec3 = Vec3::new(0.6, 0.5, 1.2);
    /// Per-frame exponential smoothing toward the lane X
    pub const LANE_EASING: f32 = 0.16;

    /// Longest frame delta the loop will integrate (seconds)
    ///
    /// Collision is sampled once per frame, so an obstacle whose overlap
    /// window along Z (boat depth plus obstacle depth, 3.4 units for a log)
    /// is shorter than one frame's travel can pass through unhit. At 0.1 s
    /// that happens above 34 units/s, which a boost at run start reaches.
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// X coordinate of a lane centerline, lane 1 at the origin
#[inline]
pub fn lane_x(lane: usize) -> f32 {
    let lane = lane.min(consts::LANE_COUNT - 1);
    (lane as f32 - consts::CENTER_LANE as f32) * consts::LANE_SPACING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_x_is_symmetric_around_center() {
        assert_eq!(lane_x(1), 0.0);
        assert_eq!(lane_x(0), -consts::LANE_SPACING);
        assert_eq!(lane_x(2), consts::LANE_SPACING);
        // Out-of-range lanes pin to the outermost lane
        assert_eq!(lane_x(7), consts::LANE_SPACING);
    }
}
