//! The gun's single reusable round.

pub const SHOT_STEP: f32 = 0.8;
pub const SHOT_MAX_DISTANCE: f32 = 30.0;

/// The aim the round leaves the muzzle with.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AimFrame {
    pub aim_x: f32,
    pub aim_y: f32,
    pub swivel_angle: f32,
}

/// What the renderer and the probe need to place the round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectilePose {
    pub aim: AimFrame,
    pub local_offset: f32,
    pub in_flight: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flight {
    Idle,
    Moving,
    Retired,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    aim: AimFrame,
    local_offset: f32,
    in_flight: bool,
    step: f32,
    max_distance: f32,
}

impl Default for Projectile {
    fn default() -> Self {
        Self::new(SHOT_STEP, SHOT_MAX_DISTANCE)
    }
}

impl Projectile {
    pub fn new(step: f32, max_distance: f32) -> Self {
        Self { aim: AimFrame::default(), local_offset: 0.0, in_flight: false, step, max_distance }
    }

    pub fn aim(&self) -> AimFrame { self.aim }
    pub fn local_offset(&self) -> f32 { self.local_offset }
    pub fn in_flight(&self) -> bool { self.in_flight }
    pub fn max_distance(&self) -> f32 { self.max_distance }

    pub fn pose(&self) -> ProjectilePose {
        ProjectilePose { aim: self.aim, local_offset: self.local_offset, in_flight: self.in_flight }
    }

    /// Glue the round to the muzzle. Ignored once it is flying.
    pub(crate) fn track(&mut self, aim: AimFrame) {
        if !self.in_flight {
            self.aim = aim;
        }
    }

    pub(crate) fn launch(&mut self, aim: AimFrame) {
        self.aim = aim;
        self.local_offset = 0.0;
        self.in_flight = true;
    }

    /// Move one step along the barrel axis. Past `max_distance` the round drops
    /// back to the muzzle described by `muzzle`.
    pub(crate) fn advance(&mut self, muzzle: AimFrame) -> Flight {
        if !self.in_flight {
            return Flight::Idle;
        }
        self.local_offset += self.step;
        if self.local_offset > self.max_distance {
            self.in_flight = false;
            self.local_offset = 0.0;
            self.aim = muzzle;
            return Flight::Retired;
        }
        Flight::Moving
    }
}
