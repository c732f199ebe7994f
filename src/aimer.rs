//! The gun: a bounded aim position and the round it owns.

use serde::{Deserialize, Serialize};

use crate::projectile::{AimFrame, Flight, Projectile, ProjectilePose};

pub const AIM_MIN_X: f32 = -2.2;
pub const AIM_MAX_X: f32 = 2.2;
pub const AIM_MIN_Y: f32 = -1.0;
pub const AIM_MAX_Y: f32 = 2.5;
/// Degrees of swivel per unit of horizontal aim, mimicking an arm sweeping across.
pub const SWIVEL_PER_UNIT: f32 = -10.0;

/// What to do with a fire request while the round is still flying.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RefirePolicy {
    /// Let the current shot finish.
    #[default]
    Ignore,
    /// Snap the round back to the muzzle and send it down the current aim.
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimerPose {
    pub aim_x: f32,
    pub aim_y: f32,
    pub swivel_angle: f32,
}

#[derive(Clone, Debug, Default)]
pub struct Aimer {
    aim_x: f32,
    aim_y: f32,
    projectile: Projectile,
}

impl Aimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projectile(projectile: Projectile) -> Self {
        Self { aim_x: 0.0, aim_y: 0.0, projectile }
    }

    pub fn aim_x(&self) -> f32 { self.aim_x }
    pub fn aim_y(&self) -> f32 { self.aim_y }

    pub fn swivel_angle(&self) -> f32 {
        self.aim_x * SWIVEL_PER_UNIT
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn pose(&self) -> AimerPose {
        AimerPose { aim_x: self.aim_x, aim_y: self.aim_y, swivel_angle: self.swivel_angle() }
    }

    pub fn projectile_pose(&self) -> ProjectilePose {
        self.projectile.pose()
    }

    fn frame(&self) -> AimFrame {
        AimFrame { aim_x: self.aim_x, aim_y: self.aim_y, swivel_angle: self.swivel_angle() }
    }

    /// Nudge the aim. Each axis only moves if it stays inside its bounds; a rejected
    /// x delta does not block the y delta and vice versa.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        let x = self.aim_x + dx;
        if (AIM_MIN_X..=AIM_MAX_X).contains(&x) {
            self.aim_x = x;
        }
        let y = self.aim_y + dy;
        if (AIM_MIN_Y..=AIM_MAX_Y).contains(&y) {
            self.aim_y = y;
        }
        let frame = self.frame();
        self.projectile.track(frame);
    }

    /// Returns true when a new flight started.
    pub fn fire(&mut self, policy: RefirePolicy) -> bool {
        if self.projectile.in_flight() && policy == RefirePolicy::Ignore {
            tracing::trace!("fire ignored, round already in flight");
            return false;
        }
        let frame = self.frame();
        self.projectile.launch(frame);
        true
    }

    pub fn advance_projectile(&mut self) -> Flight {
        let frame = self.frame();
        let flight = self.projectile.advance(frame);
        if flight == Flight::Retired {
            tracing::debug!(aim_x = self.aim_x, aim_y = self.aim_y, "round retired");
        }
        flight
    }
}
