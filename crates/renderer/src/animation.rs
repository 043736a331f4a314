//! Time-driven parameter animation for the Julia fractal.
//!
//! All of the per-frame math lives here so it can be exercised without a GPU:
//! the render loop measures wall-clock deltas and calls [`AnimationState::advance`],
//! then reads the fields back when uploading uniforms.

/// Fixed phase offset (radians) applied to both julia-constant sinusoids.
pub const PHASE_SHIFT: f32 = 1.0;

/// Rate at which `color_shift` sweeps through its [0, 1] range per second.
const COLOR_SHIFT_RATE: f32 = 0.25;

/// Mutable animation parameters fed to the fragment shader every frame.
///
/// The state is a plain aggregate owned by the renderer context; nothing here
/// touches GPU resources and `advance` is deterministic in the sequence of
/// deltas it is given.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Complex constant `c` of the Julia iteration, recomputed from
    /// `total_time` every unpaused frame.
    pub julia_constant: [f32; 2],
    /// View zoom factor; constant unless changed by the caller.
    pub zoom: f32,
    /// View pan offset; constant unless changed by the caller.
    pub offset: [f32; 2],
    /// Color animation phase, ping-ponging between 0 and 1.
    pub color_shift: f32,
    /// Accumulated unpaused simulation time in seconds.
    pub total_time: f32,
    /// Freezes all time-driven fields while set.
    pub paused: bool,
    color_shift_direction: f32,
}

impl AnimationState {
    pub fn new(zoom: f32, offset: [f32; 2]) -> Self {
        Self {
            julia_constant: [0.0, 0.0],
            zoom,
            offset,
            color_shift: 0.0,
            total_time: 0.0,
            paused: false,
            color_shift_direction: 1.0,
        }
    }

    /// Advances the animation by `delta` seconds of wall-clock time.
    ///
    /// A no-op while paused. The clock outside keeps running during a pause,
    /// so the caller's next delta after resuming covers only real elapsed
    /// time and the animation does not jump.
    ///
    /// The color-shift bounce inspects the value from *before* this frame's
    /// increment, so the direction flip trails the boundary crossing by one
    /// frame and the value may transiently overshoot [0, 1] by up to one
    /// frame's increment. Intentional: this reproduces the reference
    /// behaviour rather than a clamped variant.
    pub fn advance(&mut self, delta: f32) {
        if self.paused {
            return;
        }

        if self.color_shift >= 1.0 {
            self.color_shift_direction = -1.0;
        } else if self.color_shift <= 0.0 {
            self.color_shift_direction = 1.0;
        }

        self.total_time += delta;
        self.color_shift += delta * self.color_shift_direction * COLOR_SHIFT_RATE;

        self.julia_constant[0] = (self.total_time * 0.15 + PHASE_SHIFT).cos() * 0.6;
        self.julia_constant[1] = (self.total_time * 0.1 + PHASE_SHIFT).sin() * 0.75;
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(1.5, [0.0, 0.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn julia_constant_matches_closed_form_after_one_second() {
        let mut state = AnimationState::default();
        state.advance(1.0);

        assert!((state.total_time - 1.0).abs() < f32::EPSILON);
        assert!((state.julia_constant[0] - (1.15f32).cos() * 0.6).abs() < 1e-6);
        assert!((state.julia_constant[1] - (1.1f32).sin() * 0.75).abs() < 1e-6);
        // cos(1.15) * 0.6 = 0.24509..., sin(1.1) * 0.75 = 0.66841...
        assert!((state.julia_constant[0] - 0.2451).abs() < 1e-3);
        assert!((state.julia_constant[1] - 0.6684).abs() < 1e-3);
    }

    #[test]
    fn julia_constant_is_a_pure_function_of_total_time() {
        let mut a = AnimationState::default();
        let mut b = AnimationState::default();

        // Different frame partitions of the same total duration.
        for _ in 0..40 {
            a.advance(0.05);
        }
        b.advance(2.0);

        assert!((a.total_time - b.total_time).abs() < 1e-4);
        let expected_x = (b.total_time * 0.15 + PHASE_SHIFT).cos() * 0.6;
        let expected_y = (b.total_time * 0.1 + PHASE_SHIFT).sin() * 0.75;
        assert!((a.julia_constant[0] - expected_x).abs() < 1e-4);
        assert!((a.julia_constant[1] - expected_y).abs() < 1e-4);
    }

    #[test]
    fn color_shift_flip_lags_one_frame_behind_the_bound() {
        let mut state = AnimationState::default();
        state.color_shift = 0.95;

        // 0.95 + 0.1 * 0.25 = 0.975: below the bound, direction unchanged.
        state.advance(0.1);
        assert!((state.color_shift - 0.975).abs() < 1e-6);

        // Still below 1.0 before the update, so this frame keeps climbing and
        // overshoots the bound.
        state.advance(0.2);
        assert!((state.color_shift - 1.025).abs() < 1e-6);

        // Only now does the pre-update check see >= 1.0 and reverse.
        state.advance(0.1);
        assert!(state.color_shift < 1.025);
    }

    #[test]
    fn color_shift_stays_bounded_up_to_one_frame_overshoot() {
        let mut state = AnimationState::default();
        let delta = 0.05;
        let max_overshoot = delta * 0.25;

        for _ in 0..10_000 {
            state.advance(delta);
            assert!(state.color_shift >= -max_overshoot - 1e-6);
            assert!(state.color_shift <= 1.0 + max_overshoot + 1e-6);
        }
    }

    #[test]
    fn color_shift_ping_pongs_through_both_bounds() {
        let mut state = AnimationState::default();
        let mut seen_above = false;
        let mut seen_below_after_above = false;

        for _ in 0..2_000 {
            state.advance(0.016);
            if state.color_shift >= 0.99 {
                seen_above = true;
            }
            if seen_above && state.color_shift <= 0.01 {
                seen_below_after_above = true;
            }
        }

        assert!(seen_above, "color shift never reached the upper bound");
        assert!(seen_below_after_above, "color shift never bounced back down");
    }

    #[test]
    fn pause_freezes_every_time_driven_field() {
        let mut state = AnimationState::default();
        state.advance(0.5);
        state.paused = true;

        let frozen = state.clone();
        for _ in 0..10 {
            state.advance(0.016);
        }

        assert_eq!(state, frozen);
    }

    #[test]
    fn resuming_does_not_catch_up_paused_time() {
        let mut state = AnimationState::default();
        state.advance(0.5);
        state.toggle_paused();
        state.advance(100.0);
        state.toggle_paused();
        state.advance(0.5);

        assert!((state.total_time - 1.0).abs() < 1e-6);
    }

    #[test]
    fn fixed_step_frames_accumulate_without_drift() {
        let mut state = AnimationState::default();
        for _ in 0..100 {
            state.advance(0.016);
        }
        assert!((state.total_time - 1.6).abs() < 1e-4);
    }

    #[test]
    fn zoom_and_offset_are_not_animated() {
        let mut state = AnimationState::new(2.5, [0.3, -0.4]);
        for _ in 0..50 {
            state.advance(0.02);
        }
        assert_eq!(state.zoom, 2.5);
        assert_eq!(state.offset, [0.3, -0.4]);
    }
}
