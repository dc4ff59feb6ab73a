//! Retained scene: what the renderer draws each frame
//!
//! The simulation pushes object lifetimes and poses in through [`SceneSink`];
//! the renderer reads them back out sorted by id.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::consts::BOAT_Z;
use crate::error::SceneError;
use crate::sim::{ObstacleKind, SceneSink};

/// A drawable obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub kind: ObstacleKind,
    pub position: Vec3,
}

#[derive(Debug, Clone)]
pub struct Scene {
    objects: BTreeMap<u32, SceneObject>,
    pub boat: Vec3,
    pub boat_boosting: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            objects: BTreeMap::new(),
            boat: Vec3::new(0.0, 0.0, BOAT_Z),
            boat_boosting: false,
        }
    }
}

impl Scene {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn position(&self, id: u32) -> Option<Vec3> {
        self.objects.get(&id).map(|o| o.position)
    }

    /// Objects in id order
    pub fn objects(&self) -> impl Iterator<Item = (u32, &SceneObject)> {
        self.objects.iter().map(|(id, o)| (*id, o))
    }

    pub fn remove_object(&mut self, id: u32) -> Result<(), SceneError> {
        self.objects
            .remove(&id)
            .map(|_| ())
            .ok_or(SceneError::UnknownObject(id))
    }
}

impl SceneSink for Scene {
    fn add(&mut self, id: u32, kind: ObstacleKind, position: Vec3) {
        if self.objects.insert(id, SceneObject { kind, position }).is_some() {
            log::warn!("Scene object {} replaced on add", id);
        }
    }

    fn remove(&mut self, id: u32) -> Result<(), SceneError> {
        self.remove_object(id)
    }

    fn set_pose(&mut self, id: u32, position: Vec3) -> Result<(), SceneError> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::UnknownObject(id))?;
        object.position = position;
        Ok(())
    }

    fn set_boat_pose(&mut self, position: Vec3, boosting: bool) {
        self.boat = position;
        self.boat_boosting = boosting;
    }
}
