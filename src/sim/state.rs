//! Game state and core simulation types
//!
//! All state the frame step touches lives in [`GameState`]: constructed once
//! by the host, passed by reference to `tick` and the lifecycle calls.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::aabb::Aabb;
use super::sink::SceneSink;
use super::spawn;
use super::speed::SpeedModel;
use crate::consts::*;
use crate::error::LifecycleError;
use crate::lane_x;
use crate::tuning::Tuning;

/// Phase of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    /// Not started; welcome prompt showing
    #[default]
    Idle,
    /// Loop active
    Running,
    /// Collision ended the run; restart prompt showing
    GameOver,
}

/// Obstacle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Wreck,
    Log,
    Islet,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Wreck, ObstacleKind::Log, ObstacleKind::Islet];

    /// Collision half-extents for this category
    pub fn half_extents(self) -> Vec3 {
        match self {
            // Tall hull, long along the travel axis
            ObstacleKind::Wreck => Vec3::new(1.1, 1.0, 1.6),
            // Floats low and lies across the lane
            ObstacleKind::Log => Vec3::new(1.3, 0.4, 0.5),
            ObstacleKind::Islet => Vec3::new(1.4, 0.8, 1.4),
        }
    }

    /// Weighted draw; `weights` are wreck, log, islet
    pub fn pick(rng: &mut impl Rng, weights: &[f32; 3]) -> Self {
        let total: f32 = weights.iter().sum();
        let mut roll = rng.random::<f32>() * total;
        for (kind, weight) in Self::ALL.iter().zip(weights) {
            if roll < *weight {
                return *kind;
            }
            roll -= weight;
        }
        // Float rounding can leave roll just past the last bucket
        ObstacleKind::Islet
    }
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub position: Vec3,
    pub bounds: Aabb,
    /// Run clock (ms) at spawn
    pub spawned_at_ms: f32,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, position: Vec3, spawned_at_ms: f32) -> Self {
        Self {
            id,
            kind,
            position,
            bounds: Aabb::from_center(position, kind.half_extents()),
            spawned_at_ms,
        }
    }

    /// Scroll toward the boat; the box follows
    pub fn advance(&mut self, travel: f32) {
        self.position.z -= travel;
        self.bounds = Aabb::from_center(self.position, self.kind.half_extents());
    }

    #[inline]
    pub fn age_ms(&self, now_ms: f32) -> f32 {
        now_ms - self.spawned_at_ms
    }
}

/// The player's boat
#[derive(Debug, Clone, PartialEq)]
pub struct Boat {
    pub position: Vec3,
    /// Current lane, always < LANE_COUNT
    pub lane: usize,
    pub boosting: bool,
}

impl Default for Boat {
    fn default() -> Self {
        Self {
            position: Vec3::new(lane_x(CENTER_LANE), 0.0, BOAT_Z),
            lane: CENTER_LANE,
            boosting: false,
        }
    }
}

impl Boat {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, BOAT_HALF_EXTENTS)
    }

    /// Set the lane (clamped) and ease X one frame toward it
    pub fn steer(&mut self, lane: usize) {
        self.lane = lane.min(LANE_COUNT - 1);
        let target = lane_x(self.lane);
        self.position.x += (target - self.position.x) * LANE_EASING;
    }
}

/// Complete simulation state for one game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub speed_model: SpeedModel,
    pub phase: RunPhase,
    pub boat: Boat,
    /// Active obstacles in spawn order (ascending id)
    pub obstacles: Vec<Obstacle>,
    /// Far edge of scheduled spawns, in the scrolling frame
    pub spawn_cursor: f32,
    /// Run clock (seconds)
    pub elapsed: f32,
    /// Boost time left (seconds)
    pub boost_remaining: f32,
    /// World units scrolled this run
    pub travelled: f32,
    /// Display distance (travelled × distance_scale)
    pub distance: f32,
    /// Frames stepped this run
    pub frames: u64,
    next_id: u32,
}

impl GameState {
    /// Create an idle session; nothing is spawned until [`GameState::start`]
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            speed_model: SpeedModel::from_tuning(&tuning),
            spawn_cursor: tuning.initial_cursor,
            tuning,
            phase: RunPhase::Idle,
            boat: Boat::default(),
            obstacles: Vec::new(),
            elapsed: 0.0,
            boost_remaining: 0.0,
            travelled: 0.0,
            distance: 0.0,
            frames: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Run clock in milliseconds
    #[inline]
    pub fn now_ms(&self) -> f32 {
        self.elapsed * 1000.0
    }

    #[inline]
    pub fn boosting(&self) -> bool {
        self.boost_remaining > 0.0
    }

    /// Reported speed (baseline plus any boost increment)
    pub fn speed(&self) -> f32 {
        self.speed_model.speed_at(self.elapsed, self.boosting())
    }

    /// Speed obstacles currently scroll at
    pub fn effective_speed(&self) -> f32 {
        self.speed_model.effective_at(self.elapsed, self.boosting())
    }

    /// Distance as shown to the player
    pub fn distance_display(&self) -> u64 {
        self.distance.max(0.0) as u64
    }

    /// Idle → Running
    pub fn start<S: SceneSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), LifecycleError> {
        if self.phase != RunPhase::Idle {
            return Err(LifecycleError {
                action: "start",
                phase: self.phase,
            });
        }
        self.reset(self.seed, sink);
        self.phase = RunPhase::Running;
        log::info!("Run started (seed {})", self.seed);
        Ok(())
    }

    /// GameOver → Running with a fresh run seeded from `seed`
    pub fn restart<S: SceneSink + ?Sized>(
        &mut self,
        seed: u64,
        sink: &mut S,
    ) -> Result<(), LifecycleError> {
        if self.phase != RunPhase::GameOver {
            return Err(LifecycleError {
                action: "restart",
                phase: self.phase,
            });
        }
        self.reset(seed, sink);
        self.phase = RunPhase::Running;
        log::info!("Run restarted (seed {})", seed);
        Ok(())
    }

    /// GameOver → Idle
    pub fn decline<S: SceneSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), LifecycleError> {
        if self.phase != RunPhase::GameOver {
            return Err(LifecycleError {
                action: "decline",
                phase: self.phase,
            });
        }
        self.clear_obstacles(sink);
        self.phase = RunPhase::Idle;
        log::info!("Restart declined, back to idle");
        Ok(())
    }

    /// Full reset: obstacles cleared, cursor and counters zeroed, RNG
    /// reseeded, initial obstacles placed.
    fn reset<S: SceneSink + ?Sized>(&mut self, seed: u64, sink: &mut S) {
        self.clear_obstacles(sink);
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.speed_model = SpeedModel::from_tuning(&self.tuning);
        self.boat = Boat::default();
        self.spawn_cursor = self.tuning.initial_cursor;
        self.elapsed = 0.0;
        self.boost_remaining = 0.0;
        self.travelled = 0.0;
        self.distance = 0.0;
        self.frames = 0;
        self.next_id = 1;

        for _ in 0..self.tuning.initial_obstacles {
            spawn::place_obstacle(self, sink);
        }
        sink.set_boat_pose(self.boat.position, false);
    }

    fn clear_obstacles<S: SceneSink + ?Sized>(&mut self, sink: &mut S) {
        for obstacle in self.obstacles.drain(..) {
            if let Err(e) = sink.remove(obstacle.id) {
                log::debug!("Ignoring scene removal failure: {e}");
            }
        }
    }

    /// Add an obstacle at an explicit position and announce it to the scene
    pub fn insert_obstacle<S: SceneSink + ?Sized>(
        &mut self,
        kind: ObstacleKind,
        position: Vec3,
        sink: &mut S,
    ) -> u32 {
        let id = self.next_entity_id();
        let obstacle = Obstacle::new(id, kind, position, self.now_ms());
        sink.add(id, kind, position);
        self.obstacles.push(obstacle);
        id
    }

    /// Remove an obstacle from the active set and the scene.
    ///
    /// Returns `false` (and touches nothing) if `id` is not active. A scene
    /// that no longer holds the object is not an error here.
    pub fn retire_obstacle<S: SceneSink + ?Sized>(&mut self, id: u32, sink: &mut S) -> bool {
        let Some(index) = self.obstacles.iter().position(|o| o.id == id) else {
            return false;
        };
        self.obstacles.remove(index);
        if let Err(e) = sink.remove(id) {
            log::debug!("Ignoring scene removal failure: {e}");
        }
        true
    }
}
