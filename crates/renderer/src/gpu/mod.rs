//! GPU orchestration for the fractal renderer.
//!
//! The path from animation state to pixels is deliberately short:
//! - `context` owns the wgpu instance/surface/device wiring and rebuilds
//!   swapchain state when the window resizes.
//! - `uniforms` is the POD mirror of the shader's std140 parameter block,
//!   written through the queue once per frame.
//! - `pipeline` turns a resolved [`crate::program::ShaderProgram`] into a
//!   render pipeline with a single uniform bind group.
//! - `state` glues everything together and exposes the `GpuState` API used
//!   by the windowed render loop.

mod context;
mod pipeline;
mod state;
mod uniforms;

pub(crate) use state::GpuState;
