//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (spawn order, ascending id)
//! - No rendering or platform dependencies beyond the [`SceneSink`] seam

pub mod aabb;
pub mod autopilot;
pub mod sink;
pub mod spawn;
pub mod speed;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use sink::SceneSink;
pub use speed::SpeedModel;
pub use state::{Boat, GameState, Obstacle, ObstacleKind, RunPhase};
pub use tick::{FrameReport, TickInput, tick};
