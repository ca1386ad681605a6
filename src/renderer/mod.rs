//! WebGPU rendering module
//!
//! Draws the world as white vector lines, the way the arcade cabinet did.
//! Read-only with respect to the simulation: call after a complete step.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{LineRenderState, world_to_ndc};
pub use shapes::world_lines;
pub use vertex::Vertex;

use thiserror::Error;

/// Failures acquiring the graphics context. All are fatal to the host.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no usable format")]
    UnsupportedSurface,
}
