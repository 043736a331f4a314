//! Real-time animated Julia-set renderer.
//!
//! The crate drives a GPU shader pipeline with per-frame uniform updates. The
//! overall flow is:
//!
//! ```text
//!   CLI / juliaview
//!          │ RendererConfig
//!          ▼
//!   run_windowed ──▶ build_program ──▶ winit event loop ──▶ GpuState::render
//!          ▲               │                    │
//!          │               └─ naga reflection   └─▶ AnimationState::advance
//! ```
//!
//! Everything except the draw itself is pure and testable without a GPU:
//! [`AnimationState`] is plain state arithmetic, the quad geometry in
//! [`geometry`] is constant data, and [`build_program`] compiles, links, and
//! interface-resolves the two GLSL stages entirely through naga reflection.
//! The `gpu` module owns the wgpu resources and the single indexed draw.

pub mod animation;
pub mod geometry;
mod gpu;
pub mod program;
mod types;
mod window;

pub use animation::{AnimationState, PHASE_SHIFT};
pub use program::{
    build_program, ProgramError, ShaderProgram, UniformHandle, UniformKind, UniformLocations,
};
pub use types::{RendererConfig, DEFAULT_SURFACE_SIZE, DEFAULT_ZOOM};
pub use window::run_windowed;

/// Bundled vertex stage: passes the static screen quad through.
pub const DEFAULT_VERTEX_SHADER: &str = include_str!("../shaders/fullscreen.vert");

/// Bundled fragment stage: the Julia fractal coloring program.
pub const DEFAULT_FRAGMENT_SHADER: &str = include_str!("../shaders/julia.frag");
