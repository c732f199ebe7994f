use duck_gallery::config::DEFAULT_ANIMATION_INTERVAL_MS;
use duck_gallery::{
    BoothProbe, Cadence, Control, HitCue, InputEvent, MotionPhase, RangeConfig, RefirePolicy,
    Session, SilentCue, Target,
};

#[derive(Default)]
struct CountingCue(usize);

impl HitCue for CountingCue {
    fn play_hit_cue(&mut self) {
        self.0 += 1;
    }
}

fn single_duck(x: f32, refire: RefirePolicy) -> Session {
    Session::new(vec![Target::new(x, false)], Default::default(), refire)
}

fn fly_out(range: &mut Session, cue: &mut dyn HitCue) -> Vec<usize> {
    let mut hits = Vec::new();
    while range.shot_in_flight() {
        hits.extend(range.tick_shot(&BoothProbe, cue).hits);
    }
    hits
}

#[test]
fn default_range_matches_the_roster() {
    let range = Session::from_config(&RangeConfig::default());
    assert_eq!(range.targets().len(), 6);

    let riding: Vec<_> = range.targets().iter().filter(|t| t.phase() == MotionPhase::MovingRight).collect();
    let hanging: Vec<_> = range.targets().iter().filter(|t| t.phase() == MotionPhase::MovingLeft).collect();
    assert_eq!(riding.len(), 3);
    assert_eq!(hanging.len(), 3);
    assert!(hanging.iter().all(|t| t.spin_degrees() == -180.0));
    assert!(range.is_running());
    assert!(!range.shot_in_flight());
}

#[test]
fn a_thousand_ticks_bring_every_duck_home() {
    let targets = vec![
        Target::new(-8.0, false),
        Target::new(0.0, false),
        Target::new(8.0, true),
        Target::new(0.0, true),
    ];
    let mut range = Session::new(targets, Default::default(), RefirePolicy::Ignore);
    let start: Vec<_> = range.targets().iter().map(|t| (t.position(), t.phase(), t.spin_degrees())).collect();

    for _ in 0..1000 {
        range.tick_animation(true);
    }

    for (target, (position, phase, spin)) in range.targets().iter().zip(start) {
        assert!((target.position().x - position.x).abs() < 1e-4, "x drifted: {:?}", target.position());
        assert!((target.position().y - position.y).abs() < 1e-4);
        assert_eq!(target.phase(), phase);
        assert!((target.spin_degrees() - spin).abs() < 1e-4);
    }
}

#[test]
fn duck_spawned_at_the_far_end_turns_at_once() {
    let mut range = Session::new(vec![Target::new(8.0, false)], Default::default(), RefirePolicy::Ignore);
    range.tick_animation(true);
    let duck = &range.targets()[0];
    assert_eq!(duck.phase(), MotionPhase::TurningRight);
    assert_eq!(duck.position().x, 8.0);
}

#[test]
fn shot_at_a_parked_duck_knocks_it_down_once() {
    let mut range = single_duck(0.0, RefirePolicy::Ignore);
    range.set_running(false);
    range.handle(InputEvent::Aim { dx: 0.0, dy: 0.5 });
    assert_eq!(range.handle(InputEvent::Fire), Control::ShotFired);

    let mut cue = CountingCue::default();
    assert_eq!(fly_out(&mut range, &mut cue), vec![0]);
    assert_eq!(cue.0, 1);
    assert!(range.targets()[0].is_down());
}

#[test]
fn shot_over_the_duck_misses() {
    let mut range = single_duck(0.0, RefirePolicy::Ignore);
    range.set_running(false);
    range.handle(InputEvent::Aim { dx: 0.0, dy: 2.0 });
    range.handle(InputEvent::Fire);

    let mut cue = CountingCue::default();
    assert!(fly_out(&mut range, &mut cue).is_empty());
    assert_eq!(cue.0, 0);
    assert!(!range.targets()[0].is_down());
}

#[test]
fn downed_duck_stands_back_up_on_the_return_leg() {
    let mut range = single_duck(0.0, RefirePolicy::Ignore);
    range.set_running(false);
    range.handle(InputEvent::Aim { dx: 0.0, dy: 0.5 });
    range.handle(InputEvent::Fire);
    fly_out(&mut range, &mut SilentCue);
    assert!(range.targets()[0].is_down());

    range.set_running(true);
    let mut lowest = 0.0f32;
    let mut stood_up_moving_left = false;
    for _ in 0..1000 {
        range.tick_animation(false);
        let duck = &range.targets()[0];
        lowest = lowest.min(duck.flip_angle());
        if !duck.is_down() {
            stood_up_moving_left = duck.phase() == MotionPhase::MovingLeft;
            break;
        }
    }
    assert_eq!(lowest, -90.0);
    assert!(stood_up_moving_left);
    assert_eq!(range.targets()[0].flip_angle(), 0.0);
}

#[test]
fn ignore_policy_keeps_the_first_flight() {
    let mut range = single_duck(0.0, RefirePolicy::Ignore);
    range.handle(InputEvent::Fire);
    for _ in 0..5 {
        range.tick_shot(&BoothProbe, &mut SilentCue);
    }
    let offset = range.aimer().projectile().local_offset();

    range.handle(InputEvent::Aim { dx: 1.0, dy: 0.0 });
    assert_eq!(range.handle(InputEvent::Fire), Control::Continue);
    assert_eq!(range.aimer().projectile().local_offset(), offset);
    assert_eq!(range.aimer().projectile().aim().aim_x, 0.0);
}

#[test]
fn restart_policy_relaunches_from_the_muzzle() {
    let mut range = single_duck(0.0, RefirePolicy::Restart);
    range.handle(InputEvent::Fire);
    for _ in 0..5 {
        range.tick_shot(&BoothProbe, &mut SilentCue);
    }

    range.handle(InputEvent::Aim { dx: 1.0, dy: 0.0 });
    assert_eq!(range.handle(InputEvent::Fire), Control::ShotFired);
    assert_eq!(range.aimer().projectile().local_offset(), 0.0);
    assert_eq!(range.aimer().projectile().aim().aim_x, 1.0);
    assert!(range.shot_in_flight());
}

#[test]
fn cadences_pace_animation_and_shots_independently() {
    let mut range = single_duck(-8.0, RefirePolicy::Ignore);
    let mut animation = Cadence::from_millis(DEFAULT_ANIMATION_INTERVAL_MS);
    let mut shots = Cadence::from_millis(10);
    range.handle(InputEvent::Fire);
    shots.reset();

    // 60 frames of ~16.7 ms
    let mut shot_ticks = 0;
    for _ in 0..60 {
        let dt = 1.0 / 60.0;
        for _ in 0..animation.due(dt) {
            range.tick_animation(false);
        }
        if range.shot_in_flight() {
            for _ in 0..shots.due(dt) {
                shot_ticks += 1;
                if range.tick_shot(&BoothProbe, &mut SilentCue).retired {
                    break;
                }
            }
        }
    }

    assert_eq!(shot_ticks, 38);
    assert!(!range.shot_in_flight());
    // about 83 animation ticks in one second at 12 ms
    let x = range.targets()[0].position().x;
    assert!(x > -8.0 + 80.0 * 0.05 && x < -8.0 + 86.0 * 0.05, "x = {x}");
}
