//! Pooled footstep actor
//!
//! A long-lived effect host with one audio emitter and two visual emitters.
//! It alternates between two states:
//!
//! ```text
//!   Inactive ──activate()──▶ Active
//!      ▲                      │
//!      └──deactivate()────────┘   (release timer, forced reuse, teardown)
//! ```
//!
//! Activation only happens when at least one sub-resource was configured
//! (marked in use) since the last deactivation, and marks are cleared on
//! deactivation.

use crate::assets::{
    AttenuationSettings, ConcurrencySettings, SoundAsset, VisualAsset, VisualKind,
};
use crate::audio::{AudioEmitter, Spatialization};
use crate::timer::ReleaseTimer;
use crate::visual::{EffectGraphEmitter, ParticleEmitter};
use footfall_math::{Transform, Vec3};
use std::sync::Arc;

/// Sub-resources configured for the next activation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InUse {
    pub audio: bool,
    pub visual: Option<VisualKind>,
}

impl InUse {
    pub fn any(&self) -> bool {
        self.audio || self.visual.is_some()
    }
}

/// Reusable effect host
#[derive(Debug, Clone, Default)]
pub struct FootstepActor {
    transform: Transform,
    audio: AudioEmitter,
    particle: ParticleEmitter,
    effect_graph: EffectGraphEmitter,
    in_use: InUse,
    active: bool,
    lifespan: f32,
    release_timer: ReleaseTimer,
}

impl FootstepActor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(transform: Transform) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Configure the audio emitter. A missing sound leaves the actor untouched.
    pub fn init_sound(
        &mut self,
        sound: Option<Arc<SoundAsset>>,
        volume: f32,
        pitch: f32,
        play_2d: bool,
        attenuation: Option<Arc<AttenuationSettings>>,
        concurrency: Option<Arc<ConcurrencySettings>>,
    ) {
        let Some(sound) = sound else {
            return;
        };
        let spatialization = if play_2d {
            Spatialization::TwoD
        } else {
            Spatialization::ThreeD
        };
        self.audio
            .configure(Some(sound), volume, pitch, spatialization, attenuation, concurrency);
        self.in_use.audio = true;
    }

    /// Configure the emitter matching the visual's kind. Only one visual
    /// emitter is marked in use at a time.
    pub fn init_visual(&mut self, visual: Option<VisualAsset>, relative_scale: Vec3) {
        let Some(visual) = visual else {
            return;
        };
        match &visual {
            VisualAsset::Particle(asset) => {
                self.particle.set_asset(asset.clone());
                self.particle.set_relative_scale(relative_scale);
            }
            VisualAsset::EffectGraph(asset) => {
                self.effect_graph.set_asset(asset.clone());
                self.effect_graph.set_relative_scale(relative_scale);
            }
        }
        self.in_use.visual = Some(visual.kind());
    }

    /// Record the lifespan and arm the release countdown.
    ///
    /// A lifespan of zero or less releases the actor immediately.
    pub fn set_release_timer(&mut self, lifespan: f32) {
        self.lifespan = lifespan;
        if lifespan > 0.0 {
            self.release_timer.start(lifespan);
        } else {
            self.deactivate();
        }
    }

    /// Start every in-use sub-resource. No-op when nothing is in use.
    ///
    /// With a non-positive lifespan the effect plays for a single frame: a
    /// zero countdown is armed so the next tick releases the actor.
    pub fn activate(&mut self) {
        if !self.in_use.any() {
            return;
        }

        self.active = true;
        if self.in_use.audio {
            self.audio.play();
        }
        match self.in_use.visual {
            Some(VisualKind::Particle) => self.particle.activate(),
            Some(VisualKind::EffectGraph) => self.effect_graph.activate(),
            None => {}
        }

        if self.lifespan <= 0.0 && !self.release_timer.is_pending() {
            self.release_timer.start(0.0);
        }
    }

    /// Stop everything and clear the in-use marks. No-op when inactive.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.audio.stop();
        self.particle.deactivate();
        self.effect_graph.deactivate();
        self.in_use = InUse::default();
        self.release_timer.cancel();
    }

    /// Advance the release countdown; deactivates when it fires.
    /// Returns true if the actor was released by this tick.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        if self.release_timer.tick(delta_time) && self.active {
            self.deactivate();
            return true;
        }
        false
    }

    /// Cancel any pending countdown before the actor is destroyed
    pub fn end_play(&mut self) {
        self.release_timer.cancel();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn in_use(&self) -> InUse {
        self.in_use
    }

    pub fn lifespan(&self) -> f32 {
        self.lifespan
    }

    pub fn release_timer(&self) -> &ReleaseTimer {
        &self.release_timer
    }

    pub fn audio(&self) -> &AudioEmitter {
        &self.audio
    }

    pub fn particle(&self) -> &ParticleEmitter {
        &self.particle
    }

    pub fn effect_graph(&self) -> &EffectGraphEmitter {
        &self.effect_graph
    }
}
