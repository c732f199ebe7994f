//! Booth transform chains.
//!
//! The renderer places every duck and round through a stack of translations and
//! rotations. Hit testing needs the same world points, so the chains live here and
//! both the draw code and [`BoothProbe`] build their matrices from them.

use macroquad::math::{vec3, Mat4, Vec3};

use crate::aimer::AimerPose;
use crate::projectile::ProjectilePose;
use crate::target::{TargetPose, DUCK_DEPTH};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Distance below a duck's origin that it swings around when turning.
pub const DUCK_PIVOT_DROP: f32 = 2.5;
pub const DUCK_SCALE: f32 = 0.5;
/// The bullseye sits just proud of the body, on the side facing the gun.
pub const BULLSEYE_OFFSET: f32 = -1.05 * DUCK_DEPTH;

pub const GUN_BASE: Vec3 = Vec3::new(0.0, -2.0, 15.0);
/// Muzzle position relative to the gun grip, in barrel space.
pub const MUZZLE_OFFSET: Vec3 = Vec3::new(3.0, 1.0, 0.0);
/// Where the laser dot lands along the barrel.
pub const LASER_REACH: f32 = 20.0;

// ============================================================================
// PROBE
// ============================================================================

/// World-space lookups the core needs from whoever draws the scene. Called once per
/// entity per shot tick; `None` means the entity could not be placed this tick.
pub trait WorldProbe {
    fn target_anchor(&self, pose: &TargetPose) -> Option<Vec3>;
    fn projectile_position(&self, pose: &ProjectilePose) -> Option<Vec3>;
}

/// The probe for the booth scene drawn by the game binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoothProbe;

impl WorldProbe for BoothProbe {
    fn target_anchor(&self, pose: &TargetPose) -> Option<Vec3> {
        finite(bullseye_model(pose).transform_point3(Vec3::ZERO))
    }

    fn projectile_position(&self, pose: &ProjectilePose) -> Option<Vec3> {
        finite(round_model(pose).transform_point3(Vec3::ZERO))
    }
}

fn finite(point: Vec3) -> Option<Vec3> {
    point.is_finite().then_some(point)
}

// ============================================================================
// TRANSFORM CHAINS
// ============================================================================

/// Duck body space: the origin is the body centre, +X toward the tail.
pub fn duck_model(pose: &TargetPose) -> Mat4 {
    Mat4::from_translation(pose.position)
        * Mat4::from_translation(vec3(0.0, -DUCK_PIVOT_DROP, 0.0))
        * Mat4::from_rotation_z(pose.spin_degrees.to_radians())
        * Mat4::from_translation(vec3(0.0, DUCK_PIVOT_DROP, 0.0))
        * Mat4::from_rotation_x(pose.flip_angle.to_radians())
        * Mat4::from_rotation_y(180f32.to_radians())
        * Mat4::from_scale(Vec3::splat(DUCK_SCALE))
}

/// Bullseye space: origin at the bullseye centre, which is the hit anchor.
pub fn bullseye_model(pose: &TargetPose) -> Mat4 {
    duck_model(pose) * Mat4::from_translation(vec3(0.0, 0.0, BULLSEYE_OFFSET))
}

/// Barrel space for a given aim: +X runs down the barrel, origin at the grip.
pub fn barrel_model(aim_x: f32, aim_y: f32, swivel_angle: f32) -> Mat4 {
    Mat4::from_translation(GUN_BASE)
        * Mat4::from_translation(vec3(aim_x, aim_y, 0.0))
        * Mat4::from_rotation_y(swivel_angle.to_radians())
        * Mat4::from_rotation_y(90f32.to_radians())
}

pub fn gun_model(pose: &AimerPose) -> Mat4 {
    barrel_model(pose.aim_x, pose.aim_y, pose.swivel_angle)
}

/// The round, `local_offset` units past the muzzle along its frozen aim.
pub fn round_model(pose: &ProjectilePose) -> Mat4 {
    barrel_model(pose.aim.aim_x, pose.aim.aim_y, pose.aim.swivel_angle)
        * Mat4::from_translation(MUZZLE_OFFSET)
        * Mat4::from_translation(vec3(pose.local_offset, 0.0, 0.0))
}

/// Where the laser sight dot sits for the live aim.
pub fn laser_dot(pose: &AimerPose) -> Vec3 {
    gun_model(pose).transform_point3(vec3(LASER_REACH, MUZZLE_OFFSET.y, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectile::AimFrame;
    use crate::target::{Target, LANE_Z, TRACK_BASELINE_Y};

    const EPS: f32 = 1e-4;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn resting_duck_anchor_faces_the_gun() {
        let target = Target::new(3.0, false);
        let anchor = BoothProbe.target_anchor(&target.pose()).expect("anchor");
        let expected = vec3(3.0, TRACK_BASELINE_Y, LANE_Z - BULLSEYE_OFFSET * DUCK_SCALE);
        assert!(close(anchor, expected), "{anchor:?}");
        assert!(anchor.z > LANE_Z);
    }

    #[test]
    fn mirrored_duck_hangs_below_the_track() {
        let target = Target::new(0.0, true);
        let anchor = BoothProbe.target_anchor(&target.pose()).expect("anchor");
        assert!((anchor.y - (TRACK_BASELINE_Y - 2.0 * DUCK_PIVOT_DROP)).abs() < EPS, "{anchor:?}");
    }

    #[test]
    fn straight_round_travels_toward_the_booth() {
        let mut pose = ProjectilePose { aim: AimFrame::default(), local_offset: 0.0, in_flight: true };
        let start = BoothProbe.projectile_position(&pose).expect("position");
        assert!(close(start, vec3(0.0, -1.0, 12.0)), "{start:?}");

        pose.local_offset = 10.0;
        let later = BoothProbe.projectile_position(&pose).expect("position");
        assert!(close(later, vec3(0.0, -1.0, 2.0)), "{later:?}");
    }

    #[test]
    fn swivel_bends_the_path_sideways() {
        let pose = ProjectilePose {
            aim: AimFrame { aim_x: 1.0, aim_y: 0.0, swivel_angle: -10.0 },
            local_offset: 20.0,
            in_flight: true,
        };
        let position = BoothProbe.projectile_position(&pose).expect("position");
        assert!(position.x > 1.0);
    }

    #[test]
    fn laser_dot_is_down_the_barrel() {
        let dot = laser_dot(&AimerPose { aim_x: 0.0, aim_y: 0.0, swivel_angle: 0.0 });
        assert!(close(dot, vec3(0.0, -1.0, 15.0 - LASER_REACH)), "{dot:?}");
    }
}
