//! Duck targets: the patrol/turn cycle along the track and the down/reset tilt.

use std::f32::consts::PI;

use macroquad::math::{vec3, Vec3};

// ============================================================================
// CONSTANTS
// ============================================================================

pub const TRACK_MIN_X: f32 = -8.0;
pub const TRACK_MAX_X: f32 = 8.0;
pub const TRACK_STEP: f32 = 0.05;
pub const TRACK_BASELINE_Y: f32 = -0.5;
pub const LANE_Z: f32 = -8.0;

pub const SPIN_STEP_DEGREES: f32 = 1.0;
pub const FLIP_STEP_DEGREES: f32 = 5.0;
pub const FLIP_DOWN_DEGREES: f32 = -90.0;

const BOB_AMPLITUDE: f32 = 0.1;
/// Half a track step, so f32 drift never delays a turn by a whole tick.
const BOUND_TOLERANCE: f32 = TRACK_STEP * 0.5;

pub const DUCK_WIDTH: f32 = 4.0;
pub const DUCK_LENGTH: f32 = 3.0;
pub const DUCK_DEPTH: f32 = 1.0;

/// Half-depth of the slab in front of the anchor that counts as a hit.
const HIT_DEPTH_TOLERANCE: f32 = 1.0;

// ============================================================================
// MOTION PHASE
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionPhase {
    MovingRight,
    TurningRight,
    MovingLeft,
    TurningLeft,
}

impl MotionPhase {
    pub fn next(self) -> Self {
        match self {
            Self::MovingRight => Self::TurningRight,
            Self::TurningRight => Self::MovingLeft,
            Self::MovingLeft => Self::TurningLeft,
            Self::TurningLeft => Self::MovingRight,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MovingRight => "moving-right",
            Self::TurningRight => "turning-right",
            Self::MovingLeft => "moving-left",
            Self::TurningLeft => "turning-left",
        }
    }
}

// ============================================================================
// TARGET
// ============================================================================

/// What the renderer and the probe need to place a duck for this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetPose {
    pub position: Vec3,
    pub spin_degrees: f32,
    pub flip_angle: f32,
}

#[derive(Clone, Debug)]
pub struct Target {
    position: Vec3,
    origin_x: f32,
    lane_z: f32,
    phase: MotionPhase,
    spin_degrees: f32,
    is_down: bool,
    flip_angle: f32,
    hit_radius: f32,
    /// Set by the probe for the current tick only; cleared on every advance.
    world_anchor: Option<Vec3>,
}

impl Target {
    /// A duck spawned at `x` on the track. Mirrored ducks start hanging under the
    /// track (spun half a turn) and travel right to left.
    pub fn new(x: f32, mirrored: bool) -> Self {
        let (phase, spin_degrees) = if mirrored {
            (MotionPhase::MovingLeft, -180.0)
        } else {
            (MotionPhase::MovingRight, 0.0)
        };
        Self {
            position: vec3(x, TRACK_BASELINE_Y, LANE_Z),
            origin_x: x,
            lane_z: LANE_Z,
            phase,
            spin_degrees,
            is_down: false,
            flip_angle: 0.0,
            hit_radius: 0.2 * DUCK_WIDTH,
            world_anchor: None,
        }
    }

    pub fn with_hit_radius(mut self, hit_radius: f32) -> Self {
        self.hit_radius = hit_radius;
        self
    }

    pub fn position(&self) -> Vec3 { self.position }
    pub fn origin_x(&self) -> f32 { self.origin_x }
    pub fn lane_z(&self) -> f32 { self.lane_z }
    pub fn phase(&self) -> MotionPhase { self.phase }
    pub fn spin_degrees(&self) -> f32 { self.spin_degrees }
    pub fn flip_angle(&self) -> f32 { self.flip_angle }
    pub fn is_down(&self) -> bool { self.is_down }
    pub fn hit_radius(&self) -> f32 { self.hit_radius }
    pub fn world_anchor(&self) -> Option<Vec3> { self.world_anchor }

    pub fn pose(&self) -> TargetPose {
        TargetPose {
            position: self.position,
            spin_degrees: self.spin_degrees,
            flip_angle: self.flip_angle,
        }
    }

    /// Store the anchor the probe computed for this tick's pose. `None` means the
    /// renderer could not place the duck and hit tests skip it.
    pub fn set_anchor(&mut self, anchor: Option<Vec3>) {
        self.world_anchor = anchor;
    }

    /// One animation tick: the motion step, then the down/reset tilt.
    pub fn advance(&mut self, bob: bool) {
        self.world_anchor = None;
        let before = self.phase;

        match self.phase {
            MotionPhase::MovingRight => {
                self.position.x += TRACK_STEP;
                if bob {
                    // Phase keyed to x, not time: one bump per two units of track.
                    self.position.y +=
                        BOB_AMPLITUDE * (PI / 2.0 * (self.position.x - TRACK_MIN_X)).sin();
                }
                if self.position.x >= TRACK_MAX_X - BOUND_TOLERANCE {
                    self.position.x = TRACK_MAX_X;
                    self.position.y = TRACK_BASELINE_Y;
                    self.phase = MotionPhase::TurningRight;
                }
            }
            MotionPhase::TurningRight => {
                self.spin_degrees -= SPIN_STEP_DEGREES;
                if self.spin_degrees <= -180.0 {
                    self.spin_degrees = -180.0;
                    self.position.x = TRACK_MAX_X;
                    self.phase = MotionPhase::MovingLeft;
                }
            }
            MotionPhase::MovingLeft => {
                self.position.x -= TRACK_STEP;
                if self.position.x <= TRACK_MIN_X + BOUND_TOLERANCE {
                    self.position.x = TRACK_MIN_X;
                    self.phase = MotionPhase::TurningLeft;
                }
            }
            MotionPhase::TurningLeft => {
                self.spin_degrees -= SPIN_STEP_DEGREES;
                if self.spin_degrees <= -360.0 {
                    // -360 and 0 are the same orientation
                    self.spin_degrees = 0.0;
                    self.position.x = TRACK_MIN_X;
                    self.phase = MotionPhase::MovingRight;
                }
            }
        }

        if self.phase != before {
            tracing::debug!(
                from = before.name(),
                to = self.phase.name(),
                x = self.position.x,
                "duck changed phase"
            );
        }

        if self.is_down {
            self.advance_tilt();
        }
    }

    /// Tilt only follows the direction of travel at this tick, whatever phase the
    /// duck was in when it was hit.
    fn advance_tilt(&mut self) {
        match self.phase {
            MotionPhase::MovingRight => {
                self.flip_angle = (self.flip_angle - FLIP_STEP_DEGREES).max(FLIP_DOWN_DEGREES);
            }
            MotionPhase::MovingLeft => {
                self.flip_angle += FLIP_STEP_DEGREES;
                if self.flip_angle >= 0.0 {
                    self.flip_angle = 0.0;
                    self.is_down = false;
                }
            }
            MotionPhase::TurningRight | MotionPhase::TurningLeft => {}
        }
    }

    /// Knock the duck down. Repeated hits are filtered by `hit`, not here.
    pub fn flip(&mut self) {
        self.is_down = true;
    }

    /// Whether `point` lands on the bullseye: inside the hit circle in the XY plane
    /// and within the depth slab around the anchor.
    pub fn hit(&self, point: Vec3) -> bool {
        if self.is_down {
            return false;
        }
        let Some(anchor) = self.world_anchor else {
            return false;
        };
        let dx = point.x - anchor.x;
        let dy = point.y - anchor.y;
        dx * dx + dy * dy < self.hit_radius * self.hit_radius
            && point.z >= anchor.z - HIT_DEPTH_TOLERANCE
            && point.z <= anchor.z + HIT_DEPTH_TOLERANCE
    }
}
