//! Windowed render loop driver.
//!
//! Owns the winit event loop and the renderer context (animation state plus
//! GPU state). Each `RedrawRequested` runs exactly one frame: measure the
//! wall-clock delta, advance the animation (a no-op while paused), draw, and
//! record the timestamp. `AboutToWait` immediately requests the next redraw,
//! so FIFO presentation paces the loop to the display refresh.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use tracing::{error, info, warn};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use crate::animation::AnimationState;
use crate::gpu::GpuState;
use crate::program::build_program;
use crate::types::RendererConfig;

/// Builds the shader program and GPU state, then runs the render loop until
/// the window is closed.
///
/// Any startup failure (shader compile/link, missing adapter or device)
/// returns before a single frame is drawn.
pub fn run_windowed(config: RendererConfig) -> Result<()> {
    let program = build_program(&config.vertex_source, &config.fragment_source)
        .context("failed to build shader program")?;

    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let window_size = PhysicalSize::new(config.surface_size.0, config.surface_size.1);
    let window = WindowBuilder::new()
        .with_title("Julia Set Viewer")
        .with_inner_size(window_size)
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = Arc::new(window);

    let mut gpu = GpuState::new(window.as_ref(), window.inner_size(), &program)
        .context("failed to initialise GPU state")?;

    let mut animation = AnimationState::new(config.zoom, config.offset);
    animation.paused = config.start_paused;
    let mut last_frame = Instant::now();

    info!(
        width = config.surface_size.0,
        height = config.surface_size.1,
        paused = animation.paused,
        "entering render loop"
    );

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    elwt.exit();
                }
                WindowEvent::Resized(new_size) => {
                    gpu.resize(new_size);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.state == ElementState::Pressed && !event.repeat {
                        let is_space = matches!(event.logical_key, Key::Named(NamedKey::Space))
                            || matches!(event.logical_key, Key::Character(ref value) if value.as_str() == " ");
                        if is_space {
                            animation.toggle_paused();
                            info!(paused = animation.paused, "animation pause toggled");
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let delta = now.saturating_duration_since(last_frame).as_secs_f32();
                    animation.advance(delta);

                    match gpu.render(&animation) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu.resize(gpu.size());
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("surface out of memory; exiting");
                            elwt.exit();
                        }
                        Err(other) => {
                            warn!("surface error: {other:?}; retrying next frame");
                        }
                    }

                    last_frame = now;
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))
}
