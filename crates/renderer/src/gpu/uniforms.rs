use bytemuck::{Pod, Zeroable};

use crate::animation::AnimationState;

/// CPU mirror of the shader's std140 `FractalParams` block.
///
/// Field order and padding must match the offsets the program builder
/// verifies against the fragment shader (vec2 at 0 and 8, floats at 16 and
/// 20, block padded to 32 bytes).
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug)]
pub(crate) struct FractalUniforms {
    pub julia_constant: [f32; 2],
    pub offset: [f32; 2],
    pub zoom: f32,
    pub color_shift: f32,
    pub _padding: [f32; 2],
}

unsafe impl Zeroable for FractalUniforms {}
unsafe impl Pod for FractalUniforms {}

impl FractalUniforms {
    pub fn from_state(state: &AnimationState) -> Self {
        Self {
            julia_constant: state.julia_constant,
            offset: state.offset,
            zoom: state.zoom,
            color_shift: state.color_shift,
            _padding: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn layout_matches_the_std140_contract() {
        assert_eq!(size_of::<FractalUniforms>(), 32);
        assert_eq!(offset_of!(FractalUniforms, julia_constant), 0);
        assert_eq!(offset_of!(FractalUniforms, offset), 8);
        assert_eq!(offset_of!(FractalUniforms, zoom), 16);
        assert_eq!(offset_of!(FractalUniforms, color_shift), 20);
    }

    #[test]
    fn layout_matches_resolved_shader_offsets() {
        let program =
            crate::build_program(crate::DEFAULT_VERTEX_SHADER, crate::DEFAULT_FRAGMENT_SHADER)
                .expect("default program");
        let locations = program.locations;

        assert_eq!(
            locations.julia_constant.offset as usize,
            offset_of!(FractalUniforms, julia_constant)
        );
        assert_eq!(
            locations.offset.offset as usize,
            offset_of!(FractalUniforms, offset)
        );
        assert_eq!(locations.zoom.offset as usize, offset_of!(FractalUniforms, zoom));
        assert_eq!(
            locations.color_shift.offset as usize,
            offset_of!(FractalUniforms, color_shift)
        );
    }

    #[test]
    fn from_state_copies_every_animated_field() {
        let mut state = AnimationState::new(2.0, [0.1, -0.2]);
        state.advance(0.75);

        let uniforms = FractalUniforms::from_state(&state);
        assert_eq!(uniforms.julia_constant, state.julia_constant);
        assert_eq!(uniforms.offset, state.offset);
        assert_eq!(uniforms.zoom, state.zoom);
        assert_eq!(uniforms.color_shift, state.color_shift);
    }
}
