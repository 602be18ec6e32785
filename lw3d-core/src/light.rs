/// Interactive light direction control
use std::f32::consts::PI;

use nalgebra::{Vector3, Vector4};

use crate::transform;

/// Angle applied per control step.
pub const LIGHT_STEP: f32 = PI / 20.0;

/// One discrete nudge of the light direction.
///
/// Controls come in mirror pairs: applying a control and then its mirror
/// returns the light to where it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightControl {
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    RollLeft,
    RollRight,
}

impl LightControl {
    /// The control that undoes this one.
    pub fn mirror(self) -> Self {
        match self {
            LightControl::PitchUp => LightControl::PitchDown,
            LightControl::PitchDown => LightControl::PitchUp,
            LightControl::YawLeft => LightControl::YawRight,
            LightControl::YawRight => LightControl::YawLeft,
            LightControl::RollLeft => LightControl::RollRight,
            LightControl::RollRight => LightControl::RollLeft,
        }
    }
}

/// Rotate the light direction by one control step.
///
/// The vector is lifted to a homogeneous `[x, y, z, 1]`, pushed through
/// the matching axis rotation and dropped back to three components.
/// Directions follow the y-down surface convention: pitching up tilts a
/// forward light toward the top of the surface.
pub fn rotate_light(light: &mut Vector3<f32>, control: LightControl) {
    let matrix = match control {
        LightControl::PitchUp => transform::rotation_x(-LIGHT_STEP),
        LightControl::PitchDown => transform::rotation_x(LIGHT_STEP),
        LightControl::YawLeft => transform::rotation_y(LIGHT_STEP),
        LightControl::YawRight => transform::rotation_y(-LIGHT_STEP),
        LightControl::RollLeft => transform::rotation_z(-LIGHT_STEP),
        LightControl::RollRight => transform::rotation_z(LIGHT_STEP),
    };
    let rotated = matrix * Vector4::new(light.x, light.y, light.z, 1.0);
    *light = rotated.xyz();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL_CONTROLS: [LightControl; 6] = [
        LightControl::PitchUp,
        LightControl::PitchDown,
        LightControl::YawLeft,
        LightControl::YawRight,
        LightControl::RollLeft,
        LightControl::RollRight,
    ];

    #[test]
    fn test_mirror_pairs_cancel() {
        for control in ALL_CONTROLS {
            let mut light = Vector3::new(0.3, -0.5, -0.8);
            rotate_light(&mut light, control);
            rotate_light(&mut light, control.mirror());
            assert_relative_eq!(
                light,
                Vector3::new(0.3, -0.5, -0.8),
                epsilon = 1e-5
            );
        }
    }

    #[test]
    fn test_rotation_preserves_length() {
        for control in ALL_CONTROLS {
            let mut light = Vector3::new(0.0, 0.0, -1.0);
            for _ in 0..7 {
                rotate_light(&mut light, control);
            }
            assert_relative_eq!(light.norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_pitch_up_tilts_forward_light_upward() {
        // y grows down, so tilting up means y goes negative.
        let mut light = Vector3::new(0.0, 0.0, -1.0);
        rotate_light(&mut light, LightControl::PitchUp);
        assert!(light.y < 0.0);
        assert_relative_eq!(light.x, 0.0);
    }

    #[test]
    fn test_yaw_left_swings_forward_light_left() {
        let mut light = Vector3::new(0.0, 0.0, -1.0);
        rotate_light(&mut light, LightControl::YawLeft);
        assert!(light.x < 0.0);
        assert_relative_eq!(light.y, 0.0);
    }

    #[test]
    fn test_forty_steps_complete_a_full_turn() {
        let mut light = Vector3::new(0.2, 0.5, -0.9);
        for _ in 0..40 {
            rotate_light(&mut light, LightControl::RollRight);
        }
        assert_relative_eq!(light, Vector3::new(0.2, 0.5, -0.9), epsilon = 1e-4);
    }
}
