//! DUCK GALLERY - the carnival shooting gallery core
//!
//! Ducks ride a track across the booth, the gun swivels and fires a single reusable
//! round, and every shot tick checks that round against each duck's bullseye.
//! Drawing, sound and input live in the binary; this crate owns the game state.

pub mod aimer;
pub mod cadence;
pub mod config;
pub mod probe;
pub mod projectile;
pub mod session;
pub mod target;

pub use aimer::{Aimer, AimerPose, RefirePolicy};
pub use cadence::Cadence;
pub use config::{ConfigError, RangeConfig, TargetSpawn};
pub use probe::{BoothProbe, WorldProbe};
pub use projectile::{AimFrame, Flight, Projectile, ProjectilePose};
pub use session::{Control, HitCue, InputEvent, Session, ShotReport, SilentCue};
pub use target::{MotionPhase, Target, TargetPose};
