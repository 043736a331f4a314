//! Public configuration surface of the renderer.

/// Logical viewport the reference renderer targets.
pub const DEFAULT_SURFACE_SIZE: (u32, u32) = (1000, 1000);

/// Default view zoom factor.
pub const DEFAULT_ZOOM: f32 = 1.5;

/// `RendererConfig` mirrors CLI flags and tells the renderer which shader
/// sources to compile and how to seed the animation parameters.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Window/surface size in logical pixels.
    pub surface_size: (u32, u32),
    /// GLSL source of the vertex stage.
    pub vertex_source: String,
    /// GLSL source of the fragment stage.
    pub fragment_source: String,
    /// Initial view zoom factor.
    pub zoom: f32,
    /// Initial view pan offset.
    pub offset: [f32; 2],
    /// Start with the animation frozen.
    pub start_paused: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: DEFAULT_SURFACE_SIZE,
            vertex_source: crate::DEFAULT_VERTEX_SHADER.to_owned(),
            fragment_source: crate::DEFAULT_FRAGMENT_SHADER.to_owned(),
            zoom: DEFAULT_ZOOM,
            offset: [0.0, 0.0],
            start_paused: false,
        }
    }
}
