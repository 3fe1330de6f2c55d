//! Visual effect emitters owned by a pooled footstep actor

use crate::assets::{EffectGraphAsset, ParticleSystemAsset};
use footfall_math::Vec3;
use std::sync::Arc;

/// A reusable emitter for one kind of visual asset
#[derive(Debug, Clone)]
pub struct VisualEmitter<A> {
    asset: Option<Arc<A>>,
    relative_scale: Vec3,
    active: bool,
}

/// Emitter for classic particle systems
pub type ParticleEmitter = VisualEmitter<ParticleSystemAsset>;
/// Emitter for effect graphs
pub type EffectGraphEmitter = VisualEmitter<EffectGraphAsset>;

impl<A> Default for VisualEmitter<A> {
    fn default() -> Self {
        Self {
            asset: None,
            relative_scale: Vec3::ONE,
            active: false,
        }
    }
}

impl<A> VisualEmitter<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_asset(&mut self, asset: Arc<A>) {
        self.asset = Some(asset);
    }

    pub fn set_relative_scale(&mut self, scale: Vec3) {
        self.relative_scale = scale;
    }

    /// Start (or restart) the effect from its beginning
    pub fn activate(&mut self) {
        if self.asset.is_some() {
            self.active = true;
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn asset(&self) -> Option<&Arc<A>> {
        self.asset.as_ref()
    }

    pub fn relative_scale(&self) -> Vec3 {
        self.relative_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_requires_asset() {
        let mut emitter = ParticleEmitter::new();
        emitter.activate();
        assert!(!emitter.is_active());

        emitter.set_asset(Arc::new(ParticleSystemAsset::new("/Fx/Dust")));
        emitter.set_relative_scale(Vec3::splat(2.0));
        emitter.activate();
        assert!(emitter.is_active());
        assert_eq!(emitter.relative_scale(), Vec3::splat(2.0));

        emitter.deactivate();
        assert!(!emitter.is_active());
        assert!(emitter.asset().is_some());
    }
}
