//! Obstacle spawn policy
//!
//! Obstacles are placed around a spawn cursor that runs ahead of the boat.
//! Each placement pushes the cursor forward by a jittered gap so rows never
//! fall into an even rhythm.

use glam::Vec3;
use rand::Rng;

use super::sink::SceneSink;
use super::state::{GameState, ObstacleKind};
use crate::consts::*;
use crate::lane_x;

/// Whether this frame should place an obstacle
pub fn should_spawn(state: &GameState) -> bool {
    let tuning = &state.tuning;
    state.obstacles.len() < tuning.max_active || state.spawn_cursor < BOAT_Z + tuning.lookahead
}

/// Place one obstacle around the cursor and advance the cursor.
///
/// Returns the new obstacle's id.
pub fn place_obstacle<S: SceneSink + ?Sized>(state: &mut GameState, sink: &mut S) -> u32 {
    let tuning = &state.tuning;
    let rng = &mut state.rng;

    let kind = ObstacleKind::pick(rng, &tuning.kind_weights);
    let lane = rng.random_range(0..LANE_COUNT);
    let x = lane_x(lane) + jitter(rng, tuning.lateral_jitter);

    let cursor = state.spawn_cursor.max(BOAT_Z + tuning.min_spawn_ahead);
    let extra = if tuning.spawn_extra_lookahead > 0.0 {
        rng.random_range(0.0..tuning.spawn_extra_lookahead)
    } else {
        0.0
    };
    let z = (cursor + jitter(rng, tuning.spawn_z_jitter) + extra).max(BOAT_Z + tuning.min_spawn_ahead);

    let gap = (tuning.spawn_gap_mean + jitter(rng, tuning.spawn_gap_jitter)) * tuning.spawn_gap_unit;
    state.spawn_cursor = cursor + gap;

    let id = state.insert_obstacle(kind, Vec3::new(x, 0.0, z), sink);
    log::trace!("Spawned {:?} #{} in lane {} at z={:.1}", kind, id, lane, z);
    id
}

/// Uniform offset in [-amount, amount]
fn jitter(rng: &mut impl Rng, amount: f32) -> f32 {
    if amount > 0.0 {
        rng.random_range(-amount..=amount)
    } else {
        0.0
    }
}
