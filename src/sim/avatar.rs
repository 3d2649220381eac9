//! Avatar motion model
//!
//! Two control modes share one entity: pose-driven exponential smoothing
//! toward an externally supplied target, and a legacy impulse mode
//! (jump force + gravity) for keyboard fallback. Both end every update
//! with the same bounds clamp and rotation derivation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_to_canvas;
use crate::consts::*;

/// How the avatar's vertical motion is derived each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    /// Smoothed tracking of the pose pipeline's target position
    #[default]
    Pose,
    /// Discrete flap impulses + gravity integration
    Impulse,
}

/// The player-controlled entity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Avatar {
    /// Position of the top-left corner; x stays on a fixed column
    pub pos: Vec2,
    /// Signed vertical velocity, used only for visual rotation in pose mode
    pub velocity: f32,
    /// Bounding-box side length
    pub size: f32,
    /// Visual tilt in degrees, clamped to [-30, 90]
    pub rotation: f32,
}

impl Avatar {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, clamp_to_canvas(y, AVATAR_SIZE)),
            velocity: 0.0,
            size: AVATAR_SIZE,
            rotation: 0.0,
        }
    }

    /// Smoothly move toward a target vertical position.
    ///
    /// The target comes from the pose pipeline and is untrusted: it is
    /// clamped into canvas bounds before use, and a non-finite value is
    /// treated as "no new input this frame" (position holds).
    pub fn set_target_y(&mut self, target_y: f32, smoothing: f32) {
        if !target_y.is_finite() {
            return;
        }
        let smoothing = smoothing.clamp(0.0, 1.0);
        let clamped_target = clamp_to_canvas(target_y, self.size);

        // Velocity here is purely cosmetic feedback for the tilt
        let delta_y = clamped_target - self.pos.y;
        self.velocity = delta_y * VELOCITY_GAIN;

        self.pos.y += delta_y * smoothing;
        self.pos.y = clamp_to_canvas(self.pos.y, self.size);
        self.update_rotation();
    }

    /// Impulse-mode jump
    pub fn flap(&mut self) {
        self.velocity = JUMP_FORCE;
    }

    /// Impulse-mode gravity step: terminal-velocity-capped integration,
    /// then the same bounds clamp and tilt derivation as pose mode
    pub fn integrate(&mut self) {
        self.velocity = (self.velocity + GRAVITY).min(TERMINAL_VELOCITY);
        self.pos.y += self.velocity;
        self.pos.y = clamp_to_canvas(self.pos.y, self.size);
        self.update_rotation();
    }

    /// Reinitialize position and zero all motion state. Safe to call at any
    /// time; the given position is clamped into canvas bounds.
    pub fn reset(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, clamp_to_canvas(y, self.size));
        self.velocity = 0.0;
        self.rotation = 0.0;
    }

    fn update_rotation(&mut self) {
        self.rotation = (self.velocity * ROTATION_GAIN).clamp(ROTATION_MIN, ROTATION_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_set_target_converges() {
        // Worked example: size 40, canvas 600, target 300, smoothing 0.2
        let mut avatar = Avatar::new(120.0, 0.0);
        let expected = [60.0, 108.0, 146.4];
        for want in expected {
            avatar.set_target_y(300.0, 0.2);
            assert!((avatar.pos.y - want).abs() < 0.001, "got {}", avatar.pos.y);
        }
    }

    #[test]
    fn test_convergence_is_monotone() {
        let mut avatar = Avatar::new(120.0, 0.0);
        let mut prev_err = (300.0_f32 - avatar.pos.y).abs();
        for _ in 0..50 {
            avatar.set_target_y(300.0, 0.35);
            let err = (300.0 - avatar.pos.y).abs();
            assert!(err <= prev_err);
            prev_err = err;
        }
        assert!(prev_err < 0.1);
    }

    #[test]
    fn test_target_clamped_to_bounds() {
        let mut avatar = Avatar::new(120.0, 300.0);
        avatar.set_target_y(10_000.0, 1.0);
        assert_eq!(avatar.pos.y, crate::consts::CANVAS_HEIGHT - avatar.size);

        avatar.set_target_y(-10_000.0, 1.0);
        assert_eq!(avatar.pos.y, 0.0);
    }

    #[test]
    fn test_non_finite_target_holds_position() {
        let mut avatar = Avatar::new(120.0, 250.0);
        avatar.set_target_y(f32::NAN, 0.5);
        assert_eq!(avatar.pos.y, 250.0);
        avatar.set_target_y(f32::INFINITY, 0.5);
        assert_eq!(avatar.pos.y, 250.0);
    }

    #[test]
    fn test_reset_zeroes_motion() {
        let mut avatar = Avatar::new(120.0, 100.0);
        avatar.set_target_y(500.0, 0.9);
        assert!(avatar.velocity != 0.0);

        avatar.reset(120.0, 280.0);
        assert_eq!(avatar.velocity, 0.0);
        assert_eq!(avatar.rotation, 0.0);
        assert_eq!(avatar.pos, Vec2::new(120.0, 280.0));
    }

    #[test]
    fn test_reset_clamps_out_of_bounds_position() {
        let mut avatar = Avatar::new(120.0, 100.0);
        avatar.reset(120.0, 9_999.0);
        assert_eq!(avatar.pos.y, crate::consts::CANVAS_HEIGHT - avatar.size);
    }

    #[test]
    fn test_rotation_clamped() {
        let mut avatar = Avatar::new(120.0, 0.0);
        avatar.set_target_y(600.0, 0.1); // large downward error
        assert_eq!(avatar.rotation, ROTATION_MAX);

        let mut avatar = Avatar::new(120.0, 560.0);
        avatar.set_target_y(0.0, 0.1); // large upward error
        assert_eq!(avatar.rotation, ROTATION_MIN);
    }

    #[test]
    fn test_impulse_terminal_velocity() {
        let mut avatar = Avatar::new(120.0, 0.0);
        for _ in 0..200 {
            avatar.integrate();
            assert!(avatar.velocity <= TERMINAL_VELOCITY);
            assert!(avatar.pos.y <= crate::consts::CANVAS_HEIGHT - avatar.size);
        }
        assert_eq!(avatar.velocity, TERMINAL_VELOCITY);
    }

    #[test]
    fn test_flap_sets_jump_velocity() {
        let mut avatar = Avatar::new(120.0, 300.0);
        avatar.flap();
        assert_eq!(avatar.velocity, JUMP_FORCE);
        avatar.integrate();
        assert!(avatar.pos.y < 300.0);
        assert!(avatar.rotation < 0.0);
    }

    proptest! {
        #[test]
        fn prop_position_stays_in_bounds(
            start in 0.0..560.0f32,
            target in -1.0e6..1.0e6f32,
            smoothing in 0.001..1.0f32,
        ) {
            let mut avatar = Avatar::new(120.0, start);
            avatar.set_target_y(target, smoothing);
            prop_assert!(avatar.pos.y >= 0.0);
            prop_assert!(avatar.pos.y <= crate::consts::CANVAS_HEIGHT - avatar.size);
        }

        #[test]
        fn prop_rotation_stays_clamped(
            start in 0.0..560.0f32,
            target in -1.0e6..1.0e6f32,
            smoothing in 0.001..1.0f32,
        ) {
            let mut avatar = Avatar::new(120.0, start);
            avatar.set_target_y(target, smoothing);
            prop_assert!(avatar.rotation >= ROTATION_MIN);
            prop_assert!(avatar.rotation <= ROTATION_MAX);
        }
    }
}
