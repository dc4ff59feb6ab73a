//! Rendering collaborator seam
//!
//! The simulation never touches GPU state. It reports object lifetimes and
//! poses through this trait; [`crate::renderer::Scene`] is the implementation
//! the browser host and the headless runner use.

use glam::Vec3;

use super::state::ObstacleKind;
use crate::error::SceneError;

pub trait SceneSink {
    /// A new obstacle entered the world
    fn add(&mut self, id: u32, kind: ObstacleKind, position: Vec3);

    /// An obstacle left the world. Removing an unknown id is an error the
    /// caller may ignore.
    fn remove(&mut self, id: u32) -> Result<(), SceneError>;

    /// Per-frame obstacle pose
    fn set_pose(&mut self, id: u32, position: Vec3) -> Result<(), SceneError>;

    /// Per-frame boat pose
    fn set_boat_pose(&mut self, position: Vec3, boosting: bool);
}
