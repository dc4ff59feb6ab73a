//! Error types shared across the crate
//!
//! Nothing here is fatal to a run: the simulation logs and swallows scene
//! errors, and the host logs render errors and keeps going.

use thiserror::Error;

use crate::sim::RunPhase;

/// Failure reported by a [`crate::sim::SceneSink`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// Asked to remove or pose an object the scene does not hold
    #[error("scene has no object with id {0}")]
    UnknownObject(u32),
}

/// Failure loading or validating a [`crate::Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// A lifecycle request that does not apply to the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {action} while {phase:?}")]
pub struct LifecycleError {
    pub action: &'static str,
    pub phase: RunPhase,
}

/// Failure bringing up the GPU renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to request GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
