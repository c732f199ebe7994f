//! DUCK GALLERY - a carnival shooting gallery
//! Built with macroquad
//!
//! Controls: Mouse to aim, Left Click to shoot, Space to pause the ducks, ESC to quit
//! Gamepad: Left stick aim, A or RT shoot, Start pause, Back quit

mod audio;
mod gamepad;
mod render;

use std::path::PathBuf;

use clap::Parser;
use duck_gallery::{
    BoothProbe, Cadence, Control, InputEvent, RangeConfig, RefirePolicy, Session,
};
use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::audio::HitSound;
use crate::gamepad::{Gamepad, GamepadState};
use crate::render::RunStats;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Aim units per second at full stick deflection.
const STICK_AIM_SPEED: f32 = 2.5;

// ============================================================================
// COMMAND LINE
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "duck-gallery", version, about = "Carnival duck shooting gallery")]
struct Cli {
    /// JSON range configuration; defaults are used when omitted or invalid
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep riding ducks on the baseline instead of bobbing
    #[arg(long)]
    no_bob: bool,

    /// What the trigger does while a round is already in flight
    #[arg(long, value_enum)]
    refire: Option<RefirePolicy>,

    /// Do not play the hit sound
    #[arg(long)]
    mute: bool,

    /// Write the default configuration to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("duck_gallery=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Config file if given and valid, defaults otherwise, then CLI overrides on top.
fn resolve_config(cli: &Cli) -> RangeConfig {
    let mut config = match &cli.config {
        Some(path) => match RangeConfig::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), ducks = config.roster.len(), "config loaded");
                config
            }
            Err(e) => {
                tracing::error!(error = %e, "config rejected, using defaults");
                RangeConfig::default()
            }
        },
        None => RangeConfig::default(),
    };

    if cli.no_bob {
        config.bob = false;
    }
    if let Some(refire) = cli.refire {
        config.refire = refire;
    }
    config
}

// ============================================================================
// INPUT
// ============================================================================

/// Turns this frame's keyboard, mouse and gamepad state into session events.
struct InputMapper {
    last_mouse: Option<Vec2>,
    sensitivity: f32,
}

impl InputMapper {
    fn new(sensitivity: f32) -> Self {
        Self { last_mouse: None, sensitivity }
    }

    fn collect(&mut self, pad: &GamepadState, dt: f32) -> Vec<InputEvent> {
        let mut events = Vec::new();

        // Mouse aim: right moves the gun right, up moves it up
        let (mx, my) = mouse_position();
        let mouse = vec2(mx, my);
        if let Some(last) = self.last_mouse {
            let delta = mouse - last;
            if delta != Vec2::ZERO {
                events.push(InputEvent::Aim {
                    dx: self.sensitivity * delta.x,
                    dy: -self.sensitivity * delta.y,
                });
            }
        }
        self.last_mouse = Some(mouse);

        let (sx, sy) = pad.aim_axis();
        if sx != 0.0 || sy != 0.0 {
            events.push(InputEvent::Aim {
                dx: sx * STICK_AIM_SPEED * dt,
                dy: sy * STICK_AIM_SPEED * dt,
            });
        }

        if is_mouse_button_pressed(MouseButton::Left) || pad.fire_just_pressed() {
            events.push(InputEvent::Fire);
        }
        if is_key_pressed(KeyCode::Space) || pad.start_just_pressed {
            events.push(InputEvent::ToggleAnimation);
        }
        if is_key_pressed(KeyCode::Escape) || pad.select_just_pressed {
            events.push(InputEvent::Quit);
        }

        events
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn window_conf() -> Conf {
    Conf {
        window_title: "DUCK GALLERY".to_owned(),
        window_width: 1280,
        window_height: 720,
        fullscreen: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Some(path) = &cli.write_default_config {
        match RangeConfig::default().save(path) {
            Ok(()) => tracing::info!(path = %path.display(), "default config written"),
            Err(e) => tracing::error!(error = %e, "could not write default config"),
        }
        return;
    }

    let config = resolve_config(&cli);
    let mut session = Session::from_config(&config);
    let mut animation = Cadence::from_millis(config.animation_interval_ms);
    let mut shots = Cadence::from_millis(config.shot_interval_ms);
    let mut cue = if cli.mute {
        HitSound::muted()
    } else {
        HitSound::load(config.hit_sound.as_deref()).await
    };
    let mut gamepad = Gamepad::new();
    let mut input = InputMapper::new(config.mouse_sensitivity);
    let mut stats = RunStats::default();

    show_mouse(false);
    tracing::info!(
        ducks = session.targets().len(),
        bob = config.bob,
        refire = ?config.refire,
        "range open"
    );

    'frames: loop {
        let dt = get_frame_time();
        gamepad.poll();

        for event in input.collect(&gamepad.state, dt) {
            match session.handle(event) {
                Control::Continue => {}
                Control::ShotFired => {
                    shots.reset();
                    stats.shots += 1;
                }
                Control::Quit => break 'frames,
            }
        }

        for _ in 0..animation.due(dt) {
            session.tick_animation(config.bob);
        }

        if session.shot_in_flight() {
            for _ in 0..shots.due(dt) {
                let report = session.tick_shot(&BoothProbe, &mut cue);
                stats.hits += report.hits.len() as u32;
                if report.retired {
                    break;
                }
            }
        }

        render::clear();
        render::render_3d(&session);
        render::render_hud(&session, &stats);

        next_frame().await;
    }

    tracing::info!(shots = stats.shots, hits = stats.hits, "range closed");
}
