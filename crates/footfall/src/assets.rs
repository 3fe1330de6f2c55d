//! Asset descriptions referenced by footstep data
//!
//! Assets are immutable once loaded and shared behind `Arc`; the footstep
//! system only ever hands them to the pooled actor's emitters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a surface kind (grass, metal, ...) carried by physical materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceType(pub u8);

impl SurfaceType {
    pub const DEFAULT: Self = Self(0);

    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::DEFAULT {
            write!(f, "SurfaceType_Default")
        } else {
            write!(f, "SurfaceType{}", self.0)
        }
    }
}

/// Physical material of a collision surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalMaterial {
    pub name: String,
    pub surface_type: SurfaceType,
    /// Friction coefficient (0 = frictionless, 1 = high friction)
    pub friction: f32,
    /// Restitution/bounciness (0 = no bounce, 1 = perfect bounce)
    pub restitution: f32,
}

impl PhysicalMaterial {
    pub fn new(name: impl Into<String>, surface_type: SurfaceType) -> Self {
        Self {
            name: name.into(),
            surface_type,
            friction: 0.7,
            restitution: 0.3,
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction.clamp(0.0, 1.0);
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }
}

/// A playable sound asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoundAsset {
    pub path: String,
    /// Base volume authored on the asset itself
    #[serde(default = "one")]
    pub volume_multiplier: f32,
    /// Base pitch authored on the asset itself
    #[serde(default = "one")]
    pub pitch_multiplier: f32,
}

fn one() -> f32 {
    1.0
}

impl SoundAsset {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            volume_multiplier: 1.0,
            pitch_multiplier: 1.0,
        }
    }

    pub fn with_volume_multiplier(mut self, volume: f32) -> Self {
        self.volume_multiplier = volume.max(0.0);
        self
    }

    pub fn with_pitch_multiplier(mut self, pitch: f32) -> Self {
        self.pitch_multiplier = pitch.max(0.0);
        self
    }
}

/// Classic particle system template
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleSystemAsset {
    pub path: String,
}

impl ParticleSystemAsset {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Node-graph driven effect system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectGraphAsset {
    pub path: String,
}

impl EffectGraphAsset {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Which visual subsystem renders an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    Particle,
    EffectGraph,
}

/// A visual effect of either kind
#[derive(Debug, Clone, PartialEq)]
pub enum VisualAsset {
    Particle(Arc<ParticleSystemAsset>),
    EffectGraph(Arc<EffectGraphAsset>),
}

impl VisualAsset {
    pub fn kind(&self) -> VisualKind {
        match self {
            Self::Particle(_) => VisualKind::Particle,
            Self::EffectGraph(_) => VisualKind::EffectGraph,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Particle(asset) => &asset.path,
            Self::EffectGraph(asset) => &asset.path,
        }
    }
}

/// Distance attenuation model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttenuationModel {
    /// Linear falloff
    Linear,
    /// Inverse distance falloff (realistic)
    #[default]
    InverseDistance,
    /// Exponential falloff
    ExponentialDistance,
}

/// How a spatialized sound fades with distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttenuationSettings {
    pub name: String,
    /// Full volume inside this distance
    pub min_distance: f32,
    /// Silent beyond this distance
    pub max_distance: f32,
    pub model: AttenuationModel,
    /// Exponent used by the exponential model
    pub rolloff: f32,
}

impl Default for AttenuationSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            min_distance: 1.0,
            max_distance: 100.0,
            model: AttenuationModel::InverseDistance,
            rolloff: 1.0,
        }
    }
}

impl AttenuationSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_distance(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min.max(0.1);
        self.max_distance = max.max(self.min_distance + 0.1);
        self
    }

    pub fn with_model(mut self, model: AttenuationModel) -> Self {
        self.model = model;
        self
    }

    /// Gain in `[0, 1]` at `distance` from the emitter
    pub fn calculate_volume(&self, distance: f32) -> f32 {
        if distance <= self.min_distance {
            return 1.0;
        }
        if distance >= self.max_distance {
            return 0.0;
        }

        let t = (distance - self.min_distance) / (self.max_distance - self.min_distance);
        match self.model {
            AttenuationModel::Linear => 1.0 - t,
            AttenuationModel::InverseDistance => self.min_distance / distance,
            AttenuationModel::ExponentialDistance => {
                (self.min_distance / distance).powf(self.rolloff)
            }
        }
    }
}

/// What happens when too many instances of a sound group play at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcurrencyResolution {
    #[default]
    StopOldest,
    StopQuietest,
    RejectNew,
}

/// Limits simultaneous playback of a group of sounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConcurrencySettings {
    pub name: String,
    pub max_count: u32,
    pub resolution: ConcurrencyResolution,
}

impl Default for ConcurrencySettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            max_count: 16,
            resolution: ConcurrencyResolution::StopOldest,
        }
    }
}

impl ConcurrencySettings {
    pub fn new(name: impl Into<String>, max_count: u32) -> Self {
        Self {
            name: name.into(),
            max_count,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attenuation_models() {
        let linear = AttenuationSettings::new("linear")
            .with_distance(1.0, 11.0)
            .with_model(AttenuationModel::Linear);
        assert_eq!(linear.calculate_volume(0.5), 1.0);
        assert!((linear.calculate_volume(6.0) - 0.5).abs() < 1e-6);
        assert_eq!(linear.calculate_volume(20.0), 0.0);

        let inverse = AttenuationSettings::new("inverse").with_distance(2.0, 100.0);
        assert!((inverse.calculate_volume(4.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_visual_kind() {
        let particle = VisualAsset::Particle(Arc::new(ParticleSystemAsset::new("/Fx/Dust")));
        let graph = VisualAsset::EffectGraph(Arc::new(EffectGraphAsset::new("/Fx/Splash")));
        assert_eq!(particle.kind(), VisualKind::Particle);
        assert_eq!(graph.kind(), VisualKind::EffectGraph);
        assert_eq!(graph.path(), "/Fx/Splash");
    }

    #[test]
    fn test_surface_type_display() {
        assert_eq!(SurfaceType::DEFAULT.to_string(), "SurfaceType_Default");
        assert_eq!(SurfaceType::new(3).to_string(), "SurfaceType3");
    }
}
