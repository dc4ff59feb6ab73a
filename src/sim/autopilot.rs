//! Demo/headless pilot
//!
//! Picks the lane whose nearest obstacle ahead is farthest away, preferring
//! to stay put on ties. Good enough to keep long headless runs alive.

use super::state::GameState;
use crate::consts::*;
use crate::lane_x;

/// Depth behind the boat still counted as "in the lane"
const CLEARANCE_BEHIND: f32 = 2.0;

/// Lane the pilot wants next frame
pub fn choose_lane(state: &GameState) -> usize {
    let current = state.boat.lane;
    let mut best = current;
    let mut best_clearance = lane_clearance(state, current);

    for lane in 0..LANE_COUNT {
        // Only consider neighbours; skipping a lane means crossing the middle
        if lane.abs_diff(current) != 1 {
            continue;
        }
        let clearance = lane_clearance(state, lane);
        if clearance > best_clearance {
            best = lane;
            best_clearance = clearance;
        }
    }
    best
}

/// Distance to the nearest obstacle whose box covers the lane centerline
fn lane_clearance(state: &GameState, lane: usize) -> f32 {
    let x = lane_x(lane);
    let half_width = BOAT_HALF_EXTENTS.x;
    state
        .obstacles
        .iter()
        .filter(|o| o.bounds.min.x < x + half_width && o.bounds.max.x > x - half_width)
        .filter(|o| o.bounds.max.z > BOAT_Z - BOAT_HALF_EXTENTS.z - CLEARANCE_BEHIND)
        .map(|o| o.bounds.min.z - BOAT_Z)
        .fold(f32::INFINITY, f32::min)
}
