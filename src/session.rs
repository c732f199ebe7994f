//! The range: a roster of ducks, one gun, and the two tick sources that drive them.

use crate::aimer::{Aimer, RefirePolicy};
use crate::config::RangeConfig;
use crate::projectile::Flight;
use crate::probe::WorldProbe;
use crate::target::Target;

/// Fire-and-forget hit feedback. May be called several times in one tick.
pub trait HitCue {
    fn play_hit_cue(&mut self);
}

/// A cue that does nothing, for muted runs and headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCue;

impl HitCue for SilentCue {
    fn play_hit_cue(&mut self) {}
}

/// Events the input layer feeds into the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Aim { dx: f32, dy: f32 },
    Fire,
    ToggleAnimation,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// A new flight began; the shot tick source should start running.
    ShotFired,
    Quit,
}

/// What one shot tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShotReport {
    /// Roster indices knocked down this tick, in roster order.
    pub hits: Vec<usize>,
    /// The round ran out of range; no more shot ticks for this shot.
    pub retired: bool,
    /// Whether the round was in flight at all.
    pub active: bool,
}

impl ShotReport {
    pub fn hit_anything(&self) -> bool {
        !self.hits.is_empty()
    }
}

pub struct Session {
    targets: Vec<Target>,
    aimer: Aimer,
    refire: RefirePolicy,
    running: bool,
}

impl Session {
    pub fn new(targets: Vec<Target>, aimer: Aimer, refire: RefirePolicy) -> Self {
        Self { targets, aimer, refire, running: true }
    }

    pub fn from_config(config: &RangeConfig) -> Self {
        let targets = config
            .roster
            .iter()
            .map(|spawn| Target::new(spawn.x, spawn.mirrored))
            .collect();
        Self::new(targets, Aimer::new(), config.refire)
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn aimer(&self) -> &Aimer {
        &self.aimer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn shot_in_flight(&self) -> bool {
        self.aimer.projectile().in_flight()
    }

    pub fn handle(&mut self, event: InputEvent) -> Control {
        match event {
            InputEvent::Aim { dx, dy } => {
                self.aimer.move_by(dx, dy);
                Control::Continue
            }
            InputEvent::Fire => {
                if self.aimer.fire(self.refire) {
                    tracing::debug!(aim_x = self.aimer.aim_x(), aim_y = self.aimer.aim_y(), "shot fired");
                    Control::ShotFired
                } else {
                    Control::Continue
                }
            }
            InputEvent::ToggleAnimation => {
                self.running = !self.running;
                tracing::info!(running = self.running, "animation toggled");
                Control::Continue
            }
            InputEvent::Quit => Control::Quit,
        }
    }

    /// Advance every duck one step. Returns false while the range is paused.
    pub fn tick_animation(&mut self, bob: bool) -> bool {
        if !self.running {
            return false;
        }
        for target in &mut self.targets {
            target.advance(bob);
        }
        true
    }

    /// Test the round against every duck, then move it one step.
    ///
    /// The round's position is sampled once and shared by every test. There is no
    /// early exit: a round passing through overlapping ducks downs all of them.
    pub fn tick_shot<P, C>(&mut self, probe: &P, cue: &mut C) -> ShotReport
    where
        P: WorldProbe + ?Sized,
        C: HitCue + ?Sized,
    {
        let mut report = ShotReport::default();
        if !self.aimer.projectile().in_flight() {
            return report;
        }
        report.active = true;

        match probe.projectile_position(&self.aimer.projectile_pose()) {
            Some(point) => {
                for (index, target) in self.targets.iter_mut().enumerate() {
                    let anchor = probe.target_anchor(&target.pose());
                    target.set_anchor(anchor);
                    if anchor.is_none() {
                        tracing::trace!(index, "no anchor this tick, skipping duck");
                        continue;
                    }
                    if target.hit(point) {
                        target.flip();
                        cue.play_hit_cue();
                        tracing::info!(index, x = point.x, y = point.y, z = point.z, "duck hit");
                        report.hits.push(index);
                    }
                }
            }
            None => tracing::trace!("no round position this tick, skipping hit tests"),
        }

        report.retired = self.aimer.advance_projectile() == Flight::Retired;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::BoothProbe;
    use crate::projectile::ProjectilePose;
    use crate::target::TargetPose;
    use macroquad::math::{vec3, Vec3};

    #[derive(Default)]
    struct CountingCue(usize);

    impl HitCue for CountingCue {
        fn play_hit_cue(&mut self) {
            self.0 += 1;
        }
    }

    /// Puts every duck's anchor and the round at fixed points.
    struct FixedProbe {
        anchor: Option<Vec3>,
        round: Option<Vec3>,
    }

    impl WorldProbe for FixedProbe {
        fn target_anchor(&self, _pose: &TargetPose) -> Option<Vec3> {
            self.anchor
        }

        fn projectile_position(&self, _pose: &ProjectilePose) -> Option<Vec3> {
            self.round
        }
    }

    fn session(xs: &[f32]) -> Session {
        let targets = xs.iter().map(|&x| Target::new(x, false)).collect();
        Session::new(targets, Aimer::new(), RefirePolicy::Ignore)
    }

    #[test]
    fn shot_tick_is_noop_without_a_round() {
        let mut range = session(&[0.0]);
        let probe = FixedProbe { anchor: Some(Vec3::ZERO), round: Some(Vec3::ZERO) };
        let mut cue = CountingCue::default();
        let report = range.tick_shot(&probe, &mut cue);
        assert!(!report.active);
        assert!(!report.hit_anything());
        assert_eq!(cue.0, 0);
    }

    #[test]
    fn one_round_downs_every_overlapping_duck() {
        let mut range = session(&[0.0, 1.0, 2.0]);
        assert_eq!(range.handle(InputEvent::Fire), Control::ShotFired);
        let probe = FixedProbe { anchor: Some(Vec3::ZERO), round: Some(vec3(0.1, 0.1, 0.0)) };
        let mut cue = CountingCue::default();

        let report = range.tick_shot(&probe, &mut cue);
        assert_eq!(report.hits, vec![0, 1, 2]);
        assert_eq!(cue.0, 3);
        assert!(range.targets().iter().all(Target::is_down));

        // already down, so the next sample hits nothing
        let report = range.tick_shot(&probe, &mut cue);
        assert!(report.hits.is_empty());
        assert_eq!(cue.0, 3);
    }

    #[test]
    fn missing_anchor_skips_the_duck() {
        let mut range = session(&[0.0]);
        range.handle(InputEvent::Fire);
        let probe = FixedProbe { anchor: None, round: Some(Vec3::ZERO) };
        let mut cue = CountingCue::default();
        let report = range.tick_shot(&probe, &mut cue);
        assert!(report.hits.is_empty());
        assert!(!range.targets()[0].is_down());
    }

    #[test]
    fn missing_round_position_still_advances() {
        let mut range = session(&[0.0]);
        range.handle(InputEvent::Fire);
        let probe = FixedProbe { anchor: Some(Vec3::ZERO), round: None };
        let mut cue = CountingCue::default();
        let report = range.tick_shot(&probe, &mut cue);
        assert!(report.hits.is_empty());
        assert!(range.aimer().projectile().local_offset() > 0.0);
    }

    #[test]
    fn shot_loop_ends_on_retirement() {
        let mut range = session(&[0.0]);
        range.handle(InputEvent::Fire);
        let probe = FixedProbe { anchor: None, round: None };
        let mut ticks = 0;
        loop {
            ticks += 1;
            if range.tick_shot(&probe, &mut SilentCue).retired {
                break;
            }
        }
        assert_eq!(ticks, 38);
        assert!(!range.shot_in_flight());
    }

    #[test]
    fn paused_range_freezes_ducks() {
        let mut range = session(&[0.0]);
        range.handle(InputEvent::ToggleAnimation);
        assert!(!range.tick_animation(true));
        assert_eq!(range.targets()[0].position().x, 0.0);

        range.handle(InputEvent::ToggleAnimation);
        assert!(range.tick_animation(true));
        assert!(range.targets()[0].position().x > 0.0);
    }

    #[test]
    fn aim_and_quit_events() {
        let mut range = session(&[]);
        assert_eq!(range.handle(InputEvent::Aim { dx: 0.5, dy: 0.25 }), Control::Continue);
        assert_eq!(range.aimer().aim_x(), 0.5);
        assert_eq!(range.aimer().aim_y(), 0.25);
        assert_eq!(range.handle(InputEvent::Quit), Control::Quit);
    }

    #[test]
    fn booth_shot_hits_a_duck_dead_ahead() {
        // A duck parked at x = 0 on the track, gun aimed to line up with the bullseye.
        let mut range = session(&[0.0]);
        range.set_running(false);
        range.handle(InputEvent::Aim { dx: 0.0, dy: 0.5 });
        range.handle(InputEvent::Fire);

        let mut cue = CountingCue::default();
        let mut hits = Vec::new();
        while range.shot_in_flight() {
            hits.extend(range.tick_shot(&BoothProbe, &mut cue).hits);
        }
        assert_eq!(hits, vec![0]);
        assert_eq!(cue.0, 1);
        assert!(range.targets()[0].is_down());
    }
}
