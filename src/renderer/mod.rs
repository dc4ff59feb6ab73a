//! Rendering module
//!
//! `scene` is the retained state the simulation writes into; `shapes` turns it
//! into projected vertices; `pipeline` draws them with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Scene, SceneObject};
pub use shapes::{Camera, frame_vertices};
pub use vertex::Vertex;
