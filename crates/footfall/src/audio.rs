//! Audio emitter owned by a pooled footstep actor

use crate::assets::{AttenuationSettings, ConcurrencySettings, SoundAsset};
use footfall_math::Vec3;
use std::sync::Arc;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Not playing
    #[default]
    Stopped,
    /// Currently playing
    Playing,
}

/// How a configured sound is heard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spatialization {
    /// Non-positional, heard as an interface sound
    TwoD,
    /// Positional, using the given attenuation
    ThreeD,
}

/// A reusable sound emitter
#[derive(Debug, Clone)]
pub struct AudioEmitter {
    sound: Option<Arc<SoundAsset>>,
    volume_multiplier: f32,
    pitch_multiplier: f32,
    allow_spatialization: bool,
    is_ui_sound: bool,
    attenuation: Option<Arc<AttenuationSettings>>,
    concurrency: Vec<Arc<ConcurrencySettings>>,
    state: PlaybackState,
}

impl Default for AudioEmitter {
    fn default() -> Self {
        Self {
            sound: None,
            volume_multiplier: 1.0,
            pitch_multiplier: 1.0,
            allow_spatialization: true,
            is_ui_sound: false,
            attenuation: None,
            concurrency: Vec::new(),
            state: PlaybackState::Stopped,
        }
    }
}

impl AudioEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the emitter for the next playback.
    ///
    /// Switching to 2D turns spatialization off and marks the sound as an
    /// interface sound; switching to 3D turns it back on and applies
    /// `attenuation`. The concurrency set is always replaced.
    pub fn configure(
        &mut self,
        sound: Option<Arc<SoundAsset>>,
        volume: f32,
        pitch: f32,
        spatialization: Spatialization,
        attenuation: Option<Arc<AttenuationSettings>>,
        concurrency: Option<Arc<ConcurrencySettings>>,
    ) {
        self.sound = sound;
        self.volume_multiplier = volume;
        self.pitch_multiplier = pitch;

        match spatialization {
            Spatialization::TwoD => {
                if self.allow_spatialization {
                    self.allow_spatialization = false;
                    self.is_ui_sound = true;
                }
            }
            Spatialization::ThreeD => {
                if !self.allow_spatialization {
                    self.allow_spatialization = true;
                    self.is_ui_sound = false;
                }
                self.attenuation = attenuation;
            }
        }

        self.concurrency.clear();
        self.concurrency.extend(concurrency);
    }

    pub fn play(&mut self) {
        if self.sound.is_some() {
            self.state = PlaybackState::Playing;
        }
    }

    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn sound(&self) -> Option<&Arc<SoundAsset>> {
        self.sound.as_ref()
    }

    pub fn volume_multiplier(&self) -> f32 {
        self.volume_multiplier
    }

    pub fn pitch_multiplier(&self) -> f32 {
        self.pitch_multiplier
    }

    pub fn is_spatialized(&self) -> bool {
        self.allow_spatialization
    }

    pub fn is_ui_sound(&self) -> bool {
        self.is_ui_sound
    }

    pub fn attenuation(&self) -> Option<&Arc<AttenuationSettings>> {
        self.attenuation.as_ref()
    }

    pub fn concurrency(&self) -> &[Arc<ConcurrencySettings>] {
        &self.concurrency
    }

    /// Volume heard by a listener, combining the configured multiplier, the
    /// asset's own multiplier and distance attenuation when spatialized
    pub fn volume_at(&self, emitter_position: Vec3, listener_position: Vec3) -> f32 {
        let Some(sound) = &self.sound else {
            return 0.0;
        };
        let base = self.volume_multiplier * sound.volume_multiplier;
        match (&self.attenuation, self.allow_spatialization) {
            (Some(attenuation), true) => {
                base * attenuation.calculate_volume(emitter_position.distance(listener_position))
            }
            _ => base,
        }
    }
}
