//! Camera orbit state.
//!
//! [`OrbitState`] drives the camera around the origin on a fixed Z plane. The
//! angle grows by one degree per tick while the radius breathes in and out by
//! `step`, reversing direction every time the angle hits `flip_angle`.
//!
//! The flip happens at 400 degrees but the angle restarts at 40, not 0, so
//! the inward and outward legs do not take the same number of ticks after the
//! first one. Both constants are kept as-is.

use bevy_ecs::prelude::Resource;

pub const DEFAULT_RADIUS: f32 = 0.0;
pub const DEFAULT_ANGLE: f32 = 0.0;
pub const DEFAULT_STEP: f32 = 0.005;
pub const DEFAULT_SIGN: f32 = 1.0;
pub const DEFAULT_CAMERA_Z: f32 = 5.0;
pub const DEFAULT_FLIP_ANGLE: f32 = 400.0;
pub const DEFAULT_RESET_ANGLE: f32 = 40.0;

/// Mutable radius/angle/step/sign tuple for the orbiting camera.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Distance from the origin, changed by `sign * step` every tick.
    pub radius: f32,
    /// Current angle in degrees. Always an integer value.
    pub angle: f32,
    /// Radius increment per tick. Must be positive.
    pub step: f32,
    /// `1.0` or `-1.0`.
    pub sign: f32,
    /// Height of the camera plane.
    pub camera_z: f32,
    /// Angle at which `sign` flips.
    pub flip_angle: f32,
    /// Angle restored after a flip.
    pub reset_angle: f32,
}

impl Default for OrbitState {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitState {
    /// Fresh state: `radius=0, angle=0, step=0.005, sign=+1`.
    pub fn new() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            angle: DEFAULT_ANGLE,
            step: DEFAULT_STEP,
            sign: DEFAULT_SIGN,
            camera_z: DEFAULT_CAMERA_Z,
            flip_angle: DEFAULT_FLIP_ANGLE,
            reset_angle: DEFAULT_RESET_ANGLE,
        }
    }

    /// Check that stepping keeps the radius in a bounded band.
    ///
    /// `advance` compares the angle with `flip_angle` for exact equality, so
    /// every angle must be a whole number and the angle must still be below
    /// `flip_angle`, otherwise the sign never flips again.
    pub fn validate(&self) -> Result<(), String> {
        let whole = |name: &str, v: f32| {
            if v < 0.0 || v.fract() != 0.0 {
                Err(format!("{} must be a non-negative whole number, got {}", name, v))
            } else {
                Ok(())
            }
        };
        whole("angle", self.angle)?;
        whole("flip_angle", self.flip_angle)?;
        whole("reset_angle", self.reset_angle)?;
        if self.step.is_nan() || self.step <= 0.0 {
            return Err(format!("step must be positive, got {}", self.step));
        }
        if self.sign != 1.0 && self.sign != -1.0 {
            return Err(format!("sign must be 1 or -1, got {}", self.sign));
        }
        if self.reset_angle >= self.flip_angle {
            return Err(format!(
                "reset_angle ({}) must be below flip_angle ({})",
                self.reset_angle, self.flip_angle
            ));
        }
        if self.angle >= self.flip_angle {
            return Err(format!(
                "angle ({}) must be below flip_angle ({})",
                self.angle, self.flip_angle
            ));
        }
        Ok(())
    }

    /// Camera position for the current state, without stepping.
    pub fn camera_position(&self) -> (f32, f32, f32) {
        let radians = self.angle.to_radians();
        (
            radians.sin() * self.radius,
            radians.cos() * self.radius,
            self.camera_z,
        )
    }

    /// Returns the camera position for the current state, then steps the
    /// state by one tick.
    pub fn advance(&mut self) -> (f32, f32, f32) {
        let position = self.camera_position();

        self.radius += self.sign * self.step;
        self.angle += 1.0;
        if self.angle == self.flip_angle {
            self.sign = -self.sign;
            self.angle = self.reset_angle;
        }

        position
    }
}

/// Free-function form of [`OrbitState::advance`].
pub fn advance(state: &mut OrbitState) -> (f32, f32, f32) {
    state.advance()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_orbit_default_values() {
        let s = OrbitState::default();
        assert_eq!(s.radius, 0.0);
        assert_eq!(s.angle, 0.0);
        assert_eq!(s.step, 0.005);
        assert_eq!(s.sign, 1.0);
        assert_eq!(s.camera_z, 5.0);
    }

    #[test]
    fn test_default_state_is_valid() {
        assert_eq!(OrbitState::new().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_unreachable_flip() {
        let past_flip = OrbitState {
            angle: 500.0,
            ..OrbitState::new()
        };
        assert!(past_flip.validate().unwrap_err().contains("angle (500)"));

        let fractional_flip = OrbitState {
            flip_angle: 400.5,
            ..OrbitState::new()
        };
        assert!(fractional_flip.validate().is_err());

        let reset_above_flip = OrbitState {
            reset_angle: 450.0,
            ..OrbitState::new()
        };
        assert!(reset_above_flip.validate().is_err());

        let reset_on_flip = OrbitState {
            reset_angle: 400.0,
            ..OrbitState::new()
        };
        assert!(reset_on_flip.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_step_and_sign() {
        let zero_step = OrbitState {
            step: 0.0,
            ..OrbitState::new()
        };
        assert!(zero_step.validate().is_err());
        let half_sign = OrbitState {
            sign: 0.5,
            ..OrbitState::new()
        };
        assert!(half_sign.validate().is_err());
    }

    #[test]
    fn test_valid_state_keeps_radius_bounded() {
        let mut s = OrbitState {
            angle: 399.0,
            flip_angle: 400.0,
            reset_angle: 0.0,
            ..OrbitState::new()
        };
        assert!(s.validate().is_ok());
        for _ in 0..10_000 {
            s.advance();
            assert!(s.radius.abs() < 2.5, "radius escaped: {}", s.radius);
        }
    }

    #[test]
    fn test_first_five_ticks() {
        let mut s = OrbitState::new();
        let expected = [0.005, 0.010, 0.015, 0.020, 0.025];
        for (i, r) in expected.iter().enumerate() {
            advance(&mut s);
            assert!(approx_eq(s.radius, *r, EPSILON), "tick {}: {}", i + 1, s.radius);
            assert_eq!(s.angle, (i + 1) as f32);
        }
    }

    #[test]
    fn test_first_wrap_after_400_ticks() {
        let mut s = OrbitState::new();
        for tick in 1..400 {
            s.advance();
            assert_eq!(s.angle, tick as f32);
            assert_eq!(s.sign, 1.0);
        }
        s.advance();
        assert_eq!(s.angle, 40.0);
        assert_eq!(s.sign, -1.0);
    }

    #[test]
    fn test_flip_only_on_399_to_400() {
        let mut s = OrbitState {
            angle: 398.0,
            ..OrbitState::new()
        };
        s.advance();
        assert_eq!(s.angle, 399.0);
        assert_eq!(s.sign, 1.0);
        s.advance();
        assert_eq!(s.angle, 40.0);
        assert_eq!(s.sign, -1.0);
    }

    #[test]
    fn test_second_leg_is_shorter() {
        let mut s = OrbitState::new();
        for _ in 0..400 {
            s.advance();
        }
        let mut ticks = 0;
        while s.sign < 0.0 {
            s.advance();
            ticks += 1;
        }
        assert_eq!(ticks, 360);
        assert_eq!(s.angle, 40.0);
    }

    #[test]
    fn test_radius_linear_before_flip() {
        let mut s = OrbitState {
            sign: -1.0,
            ..OrbitState::new()
        };
        for _ in 0..100 {
            s.advance();
        }
        assert!(approx_eq(s.radius, -1.0 * 0.005 * 100.0, 1e-4));
    }

    #[test]
    fn test_radius_returns_to_start_after_full_cycle() {
        let mut s = OrbitState::new();
        // 400 ticks out, 360 back in, 360 out again
        for _ in 0..400 {
            s.advance();
        }
        let peak = s.radius;
        assert!(approx_eq(peak, 2.0, 1e-3));
        for _ in 0..360 {
            s.advance();
        }
        assert!(approx_eq(s.radius, 0.2, 1e-3));
        assert_eq!(s.sign, 1.0);
    }

    #[test]
    fn test_camera_on_circle() {
        let mut s = OrbitState::new();
        for _ in 0..1000 {
            let radius = s.radius;
            let (x, y, z) = s.advance();
            assert!(approx_eq(x * x + y * y, radius * radius, 1e-4));
            assert_eq!(z, 5.0);
        }
    }

    #[test]
    fn test_camera_uses_state_before_step() {
        let mut s = OrbitState {
            radius: 2.0,
            angle: 90.0,
            ..OrbitState::new()
        };
        let (x, y, _) = s.advance();
        assert!(approx_eq(x, 2.0, EPSILON));
        assert!(approx_eq(y, 0.0, 1e-5));
        assert!(approx_eq(s.radius, 2.005, EPSILON));
    }
}
