//! Shader program construction and interface resolution.
//!
//! `build_program` takes the two GLSL source strings directly, compiles each
//! stage independently through naga's GLSL frontend, validates ("links") the
//! modules, and resolves the vertex attribute plus the four fractal uniforms
//! into typed handles. Everything here is pure reflection over naga IR; no
//! GPU context is required, which keeps the whole failure surface unit
//! testable. The wgpu pipeline is built later from the retained sources.
//!
//! Because the stages are compiled and checked independently, no attachment
//! order exists that could affect the result.

use std::fmt;

use thiserror::Error;
use wgpu::naga;
use wgpu::naga::ShaderStage;

/// Name of the per-vertex position attribute the vertex stage must consume.
pub const POSITION_ATTRIBUTE: &str = "a_VertexPosition";

/// Scalar shapes a fractal uniform may take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniformKind {
    Float,
    Vec2,
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformKind::Float => f.write_str("float"),
            UniformKind::Vec2 => f.write_str("vec2"),
        }
    }
}

/// Uniform names, types, and std140 offsets the fragment stage must expose.
///
/// The offsets double as the layout of [`crate::gpu::FractalUniforms`]; the
/// resolver checks the shader's block against them so a mismatched block can
/// never silently read garbage.
const UNIFORM_CONTRACT: [(&str, UniformKind, u32); 4] = [
    ("u_JuliaConstant", UniformKind::Vec2, 0),
    ("u_Offset", UniformKind::Vec2, 8),
    ("u_Zoom", UniformKind::Float, 16),
    ("u_ColorShift", UniformKind::Float, 20),
];

/// Resolved location of one named uniform: its byte offset within the std140
/// parameter block, tagged with the type the shader declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformHandle {
    pub offset: u32,
    pub kind: UniformKind,
}

/// The four uniform handles of the fractal parameter block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformLocations {
    pub julia_constant: UniformHandle,
    pub offset: UniformHandle,
    pub zoom: UniformHandle,
    pub color_shift: UniformHandle,
}

/// A compiled, linked, and interface-resolved shader program.
///
/// Holds the validated sources for later wgpu module creation together with
/// the resolved bindings. Lives for the process lifetime once built.
#[derive(Debug)]
pub struct ShaderProgram {
    pub(crate) vertex_source: String,
    pub(crate) fragment_source: String,
    pub locations: UniformLocations,
    /// Shader location of [`POSITION_ATTRIBUTE`] in the vertex stage.
    pub position_location: u32,
    /// Bind group and binding index of the fractal parameter block.
    pub(crate) params_group: u32,
    pub(crate) params_binding: u32,
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: &'static str, log: String },
    #[error("failed to link {stage} shader stage:\n{log}")]
    Link { stage: &'static str, log: String },
    #[error("vertex shader has no `main` entry point")]
    MissingVertexEntry,
    #[error("vertex shader does not consume the `{POSITION_ATTRIBUTE}` attribute")]
    MissingAttribute,
    #[error("attribute `{POSITION_ATTRIBUTE}` must be a vec3 of floats")]
    AttributeType,
    #[error("fragment shader declares no uniform block containing the fractal parameters")]
    MissingUniformBlock,
    #[error("fractal parameter block carries no set/binding decoration")]
    UnboundUniformBlock,
    #[error("fractal parameter block must live in descriptor set 0, found set {group}")]
    UniformBlockGroup { group: u32 },
    #[error("uniform `{name}` ({kind}) is missing from the fractal parameter block")]
    MissingUniform { name: &'static str, kind: UniformKind },
    #[error("uniform `{name}` must be declared as {expected}")]
    UniformType { name: &'static str, expected: UniformKind },
    #[error(
        "uniform `{name}` sits at byte offset {actual}, expected {expected}; \
         declare the std140 block members in contract order"
    )]
    UniformOffset { name: &'static str, expected: u32, actual: u32 },
}

/// Compiles, links, and resolves a program from two GLSL source strings.
pub fn build_program(vertex_src: &str, fragment_src: &str) -> Result<ShaderProgram, ProgramError> {
    let vertex = compile_stage(vertex_src, ShaderStage::Vertex)?;
    let fragment = compile_stage(fragment_src, ShaderStage::Fragment)?;

    link_stage(&vertex, vertex_src, ShaderStage::Vertex)?;
    link_stage(&fragment, fragment_src, ShaderStage::Fragment)?;

    let position_location = resolve_position_attribute(&vertex)?;
    let (params_group, params_binding, locations) = resolve_uniform_block(&fragment)?;
    // The pipeline layout carries exactly one bind group layout, at slot 0.
    // Rejecting other sets here keeps the failure on the diagnostic startup
    // path instead of a wgpu validation error at pipeline creation.
    if params_group != 0 {
        return Err(ProgramError::UniformBlockGroup {
            group: params_group,
        });
    }

    tracing::debug!(
        position_location,
        params_group,
        params_binding,
        "shader program linked and resolved"
    );

    Ok(ShaderProgram {
        vertex_source: vertex_src.to_owned(),
        fragment_source: fragment_src.to_owned(),
        locations,
        position_location,
        params_group,
        params_binding,
    })
}

fn stage_name(stage: ShaderStage) -> &'static str {
    match stage {
        ShaderStage::Vertex => "vertex",
        ShaderStage::Fragment => "fragment",
        _ => "compute",
    }
}

fn compile_stage(source: &str, stage: ShaderStage) -> Result<naga::Module, ProgramError> {
    let mut frontend = naga::front::glsl::Frontend::default();
    frontend
        .parse(&naga::front::glsl::Options::from(stage), source)
        .map_err(|errors| ProgramError::Compile {
            stage: stage_name(stage),
            log: errors.emit_to_string(source),
        })
}

fn link_stage(
    module: &naga::Module,
    source: &str,
    stage: ShaderStage,
) -> Result<(), ProgramError> {
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(module)
        .map_err(|error| ProgramError::Link {
            stage: stage_name(stage),
            log: error.emit_to_string(source),
        })?;
    Ok(())
}

fn uniform_kind(inner: &naga::TypeInner) -> Option<UniformKind> {
    match inner {
        naga::TypeInner::Scalar(naga::Scalar {
            kind: naga::ScalarKind::Float,
            width: 4,
        }) => Some(UniformKind::Float),
        naga::TypeInner::Vector {
            size: naga::VectorSize::Bi,
            scalar:
                naga::Scalar {
                    kind: naga::ScalarKind::Float,
                    width: 4,
                },
        } => Some(UniformKind::Vec2),
        _ => None,
    }
}

fn is_vec3_f32(inner: &naga::TypeInner) -> bool {
    matches!(
        inner,
        naga::TypeInner::Vector {
            size: naga::VectorSize::Tri,
            scalar: naga::Scalar {
                kind: naga::ScalarKind::Float,
                width: 4,
            },
        }
    )
}

fn resolve_position_attribute(module: &naga::Module) -> Result<u32, ProgramError> {
    let entry = module
        .entry_points
        .iter()
        .find(|entry| entry.stage == ShaderStage::Vertex)
        .ok_or(ProgramError::MissingVertexEntry)?;

    let argument = entry
        .function
        .arguments
        .iter()
        .find(|argument| argument.name.as_deref() == Some(POSITION_ATTRIBUTE))
        .ok_or(ProgramError::MissingAttribute)?;

    if !is_vec3_f32(&module.types[argument.ty].inner) {
        return Err(ProgramError::AttributeType);
    }

    match argument.binding {
        Some(naga::Binding::Location { location, .. }) => Ok(location),
        _ => Err(ProgramError::MissingAttribute),
    }
}

fn resolve_uniform_block(
    module: &naga::Module,
) -> Result<(u32, u32, UniformLocations), ProgramError> {
    let (members, binding) = module
        .global_variables
        .iter()
        .find_map(|(_, var)| {
            if var.space != naga::AddressSpace::Uniform {
                return None;
            }
            match &module.types[var.ty].inner {
                naga::TypeInner::Struct { members, .. } => Some((members, var.binding.as_ref())),
                _ => None,
            }
        })
        .ok_or(ProgramError::MissingUniformBlock)?;

    let binding = binding.ok_or(ProgramError::UnboundUniformBlock)?;

    let mut handles = [UniformHandle {
        offset: 0,
        kind: UniformKind::Float,
    }; 4];
    for (slot, (name, kind, expected_offset)) in handles.iter_mut().zip(UNIFORM_CONTRACT) {
        let member = members
            .iter()
            .find(|member| member.name.as_deref() == Some(name))
            .ok_or(ProgramError::MissingUniform { name, kind })?;

        if uniform_kind(&module.types[member.ty].inner) != Some(kind) {
            return Err(ProgramError::UniformType {
                name,
                expected: kind,
            });
        }
        if member.offset != expected_offset {
            return Err(ProgramError::UniformOffset {
                name,
                expected: expected_offset,
                actual: member.offset,
            });
        }

        *slot = UniformHandle {
            offset: member.offset,
            kind,
        };
    }

    let locations = UniformLocations {
        julia_constant: handles[0],
        offset: handles[1],
        zoom: handles[2],
        color_shift: handles[3],
    };
    Ok((binding.group, binding.binding, locations))
}
