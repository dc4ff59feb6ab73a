//! Shape generation for projected boxes
//!
//! Everything is drawn as flat-shaded boxes seen from a chase camera behind
//! the boat. There is no depth buffer: [`frame_vertices`] emits geometry far
//! to near so nearer boxes paint over farther ones.

use glam::{Vec2, Vec3};

use super::scene::Scene;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::lane_x;
use crate::sim::ObstacleKind;

/// Nearest and farthest water drawn, relative to the boat
const WATER_BEHIND: f32 = 6.0;
const WATER_AHEAD: f32 = 220.0;
/// Lane divider dash length and period
const DASH_LENGTH: f32 = 2.0;
const DASH_PERIOD: f32 = 6.0;

/// Chase camera looking down +Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Focal length in NDC units
    pub focal: f32,
    /// Viewport width / height
    pub aspect: f32,
    pub near: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 4.0, BOAT_Z - 9.0),
            focal: 1.8,
            aspect: 16.0 / 9.0,
            near: 0.5,
        }
    }
}

impl Camera {
    /// Project a world point to NDC; `None` if it is behind the near plane
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        let rel = point - self.position;
        if rel.z < self.near {
            return None;
        }
        let aspect = self.aspect.max(0.01);
        Some(Vec2::new(
            rel.x * self.focal / rel.z / aspect,
            rel.y * self.focal / rel.z,
        ))
    }
}

/// Two triangles for a projected quad (corners in winding order)
fn quad(camera: &Camera, corners: [Vec3; 4], color: [f32; 4]) -> Vec<Vertex> {
    let mut projected = [Vec2::ZERO; 4];
    for (out, corner) in projected.iter_mut().zip(corners) {
        match camera.project(corner) {
            Some(p) => *out = p,
            None => return Vec::new(),
        }
    }
    let [a, b, c, d] = projected;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(a.x, a.y, color),
    ]
}

fn shade(color: [f32; 4], factor: f32) -> [f32; 4] {
    [color[0] * factor, color[1] * factor, color[2] * factor, color[3]]
}

/// The faces of a box visible from the camera: top, the side facing the
/// camera, and the front. `base` is the bottom-center of the box.
pub fn solid_box(camera: &Camera, base: Vec3, half: Vec3, color: [f32; 4]) -> Vec<Vertex> {
    let min = Vec3::new(base.x - half.x, base.y, base.z - half.z);
    let max = Vec3::new(base.x + half.x, base.y + 2.0 * half.y, base.z + half.z);

    let mut vertices = Vec::with_capacity(18);

    // Top
    vertices.extend(quad(
        camera,
        [
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ],
        shade(color, 1.1),
    ));

    // Side facing the camera
    let side_x = if base.x > camera.position.x { min.x } else { max.x };
    if (base.x - camera.position.x).abs() > half.x {
        vertices.extend(quad(
            camera,
            [
                Vec3::new(side_x, min.y, min.z),
                Vec3::new(side_x, min.y, max.z),
                Vec3::new(side_x, max.y, max.z),
                Vec3::new(side_x, max.y, min.z),
            ],
            shade(color, 0.7),
        ));
    }

    // Front
    vertices.extend(quad(
        camera,
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
        ],
        shade(color, 0.85),
    ));

    vertices
}

/// Mesh for one obstacle, dispatched by category
pub fn obstacle_mesh(camera: &Camera, kind: ObstacleKind, position: Vec3) -> Vec<Vertex> {
    match kind {
        ObstacleKind::Wreck => wreck_mesh(camera, position),
        ObstacleKind::Log => log_mesh(camera, position),
        ObstacleKind::Islet => islet_mesh(camera, position),
    }
}

/// Listing hull with a broken mast
fn wreck_mesh(camera: &Camera, position: Vec3) -> Vec<Vertex> {
    let half = ObstacleKind::Wreck.half_extents();
    let base = position - Vec3::Y * half.y;
    let hull = Vec3::new(half.x, half.y * 0.5, half.z);
    let mut vertices = solid_box(camera, base, hull, colors::WRECK_HULL);
    let mast_base = base + Vec3::new(0.3, 2.0 * hull.y, -0.2);
    vertices.extend(solid_box(camera, mast_base, Vec3::new(0.12, half.y * 0.5, 0.12), colors::WRECK_MAST));
    vertices
}

fn log_mesh(camera: &Camera, position: Vec3) -> Vec<Vertex> {
    let half = ObstacleKind::Log.half_extents();
    solid_box(camera, position - Vec3::Y * half.y, half, colors::LOG)
}

/// Sandbank with a grassy crown
fn islet_mesh(camera: &Camera, position: Vec3) -> Vec<Vertex> {
    let half = ObstacleKind::Islet.half_extents();
    let base = position - Vec3::Y * half.y;
    let sand = Vec3::new(half.x, half.y * 0.6, half.z);
    let mut vertices = solid_box(camera, base, sand, colors::ISLET_SAND);
    let crown = Vec3::new(half.x * 0.6, half.y * 0.4, half.z * 0.6);
    vertices.extend(solid_box(camera, base + Vec3::Y * 2.0 * sand.y, crown, colors::ISLET_GRASS));
    vertices
}

pub fn boat_mesh(camera: &Camera, position: Vec3, boosting: bool) -> Vec<Vertex> {
    let half = BOAT_HALF_EXTENTS;
    let base = position - Vec3::Y * half.y;
    let mut vertices = Vec::new();

    if boosting {
        // Wake streaks behind the stern
        for dx in [-0.4, 0.4] {
            vertices.extend(quad(
                camera,
                [
                    Vec3::new(position.x + dx - 0.15, 0.01, position.z - half.z - 3.0),
                    Vec3::new(position.x + dx + 0.15, 0.01, position.z - half.z - 3.0),
                    Vec3::new(position.x + dx + 0.15, 0.01, position.z - half.z),
                    Vec3::new(position.x + dx - 0.15, 0.01, position.z - half.z),
                ],
                colors::BOAT_WAKE,
            ));
        }
    }

    let hull = Vec3::new(half.x, half.y * 0.5, half.z);
    vertices.extend(solid_box(camera, base, hull, colors::BOAT_HULL));
    let cabin = Vec3::new(half.x * 0.6, half.y * 0.5, half.z * 0.4);
    vertices.extend(solid_box(
        camera,
        base + Vec3::new(0.0, 2.0 * hull.y, -0.2),
        cabin,
        colors::BOAT_CABIN,
    ));
    vertices
}

/// Water plane plus scrolling lane dividers
pub fn ocean(camera: &Camera, scroll: f32) -> Vec<Vertex> {
    let near_z = (camera.position.z + camera.near + 0.01).max(BOAT_Z - WATER_BEHIND);
    let far_z = BOAT_Z + WATER_AHEAD;
    let half_width = WATER_AHEAD;

    let mut vertices = Vec::new();
    if let (Some(a), Some(b), Some(c), Some(d)) = (
        camera.project(Vec3::new(-half_width, 0.0, near_z)),
        camera.project(Vec3::new(half_width, 0.0, near_z)),
        camera.project(Vec3::new(half_width, 0.0, far_z)),
        camera.project(Vec3::new(-half_width, 0.0, far_z)),
    ) {
        vertices.extend([
            Vertex::new(a.x, a.y, colors::OCEAN_NEAR),
            Vertex::new(b.x, b.y, colors::OCEAN_NEAR),
            Vertex::new(c.x, c.y, colors::OCEAN_FAR),
            Vertex::new(c.x, c.y, colors::OCEAN_FAR),
            Vertex::new(d.x, d.y, colors::OCEAN_FAR),
            Vertex::new(a.x, a.y, colors::OCEAN_NEAR),
        ]);
    }

    // Dividers sit halfway between lanes
    let offset = scroll.rem_euclid(DASH_PERIOD);
    for lane in 0..LANE_COUNT - 1 {
        let x = (lane_x(lane) + lane_x(lane + 1)) * 0.5;
        let mut z = near_z - offset;
        while z < far_z * 0.5 {
            let start = z.max(near_z);
            let end = z + DASH_LENGTH;
            if end > start {
                vertices.extend(quad(
                    camera,
                    [
                        Vec3::new(x - 0.05, 0.0, start),
                        Vec3::new(x + 0.05, 0.0, start),
                        Vec3::new(x + 0.05, 0.0, end),
                        Vec3::new(x - 0.05, 0.0, end),
                    ],
                    colors::LANE_MARK,
                ));
            }
            z += DASH_PERIOD;
        }
    }

    vertices
}

/// All geometry for one frame, painted far to near
pub fn frame_vertices(scene: &Scene, camera: &Camera, scroll: f32) -> Vec<Vertex> {
    let mut vertices = ocean(camera, scroll);

    let mut objects: Vec<_> = scene.objects().map(|(_, o)| *o).collect();
    objects.sort_by(|a, b| b.position.z.total_cmp(&a.position.z));

    let mut boat_drawn = false;
    for object in objects {
        if !boat_drawn && object.position.z < scene.boat.z {
            vertices.extend(boat_mesh(camera, scene.boat, scene.boat_boosting));
            boat_drawn = true;
        }
        vertices.extend(obstacle_mesh(camera, object.kind, object.position));
    }
    if !boat_drawn {
        vertices.extend(boat_mesh(camera, scene.boat, scene.boat_boosting));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SceneSink;

    #[test]
    fn test_projection_on_axis_hits_center() {
        let camera = Camera::default();
        let p = camera
            .project(camera.position + Vec3::new(0.0, 0.0, 10.0))
            .unwrap();
        assert!(p.length() < 1e-6);
    }

    #[test]
    fn test_farther_points_approach_horizon() {
        let camera = Camera::default();
        let near = camera.project(Vec3::new(3.0, 0.0, 5.0)).unwrap();
        let far = camera.project(Vec3::new(3.0, 0.0, 100.0)).unwrap();
        assert!(far.x.abs() < near.x.abs());
        assert!(far.y.abs() < near.y.abs());
    }

    #[test]
    fn test_behind_camera_is_culled() {
        let camera = Camera::default();
        assert!(camera.project(camera.position - Vec3::Z).is_none());
        assert!(obstacle_mesh(&camera, ObstacleKind::Log, camera.position - Vec3::Z * 5.0).is_empty());
    }

    #[test]
    fn test_every_kind_has_a_mesh() {
        let camera = Camera::default();
        for kind in ObstacleKind::ALL {
            let mesh = obstacle_mesh(&camera, kind, Vec3::new(3.0, 0.0, 40.0));
            assert!(!mesh.is_empty(), "{kind:?} has no geometry");
            assert_eq!(mesh.len() % 3, 0);
        }
    }

    #[test]
    fn test_frame_paints_far_before_near() {
        let camera = Camera::default();
        let mut scene = Scene::default();
        scene.add(1, ObstacleKind::Log, Vec3::new(0.0, 0.0, 20.0));
        scene.add(2, ObstacleKind::Log, Vec3::new(0.0, 0.0, 80.0));

        let base = ocean(&camera, 0.0).len();
        let far = obstacle_mesh(&camera, ObstacleKind::Log, Vec3::new(0.0, 0.0, 80.0));
        let frame = frame_vertices(&scene, &camera, 0.0);
        assert_eq!(&frame[base..base + far.len()], far.as_slice());
    }
}
