use std::f32::consts::PI;
use std::path::Path;

use duck_gallery::HitCue;
use macroquad::audio::{load_sound, load_sound_from_bytes, play_sound_once, Sound};

const SAMPLE_RATE: u32 = 22_050;
const DING_SECONDS: f32 = 0.18;

/// Plays the hit sound. Holds no sound at all when muted or when nothing loads.
pub struct HitSound {
    sound: Option<Sound>,
}

impl HitSound {
    pub fn muted() -> Self {
        Self { sound: None }
    }

    /// Load `path`, falling back to a generated ding when it is missing or unreadable.
    pub async fn load(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match load_sound(&path.to_string_lossy()).await {
                Ok(sound) => {
                    tracing::info!(path = %path.display(), "hit sound loaded");
                    return Self { sound: Some(sound) };
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = ?e, "hit sound unavailable, using generated ding");
                }
            }
        }

        match load_sound_from_bytes(&ding_wav()).await {
            Ok(sound) => Self { sound: Some(sound) },
            Err(e) => {
                tracing::warn!(error = ?e, "could not build generated ding, hits will be silent");
                Self::muted()
            }
        }
    }
}

impl HitCue for HitSound {
    fn play_hit_cue(&mut self) {
        if let Some(sound) = &self.sound {
            play_sound_once(sound);
        }
    }
}

/// A short two-tone ding as a 16-bit mono WAV file.
fn ding_wav() -> Vec<u8> {
    let count = (SAMPLE_RATE as f32 * DING_SECONDS) as u32;
    let samples: Vec<i16> = (0..count)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let envelope = (-t * 22.0).exp();
            let tone = (2.0 * PI * 1320.0 * t).sin() * 0.6 + (2.0 * PI * 1980.0 * t).sin() * 0.4;
            (tone * envelope * i16::MAX as f32 * 0.5) as i16
        })
        .collect();

    let data_len = count * 2;
    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}
