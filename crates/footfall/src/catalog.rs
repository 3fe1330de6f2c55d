//! Effect catalog: which sounds and visuals play for a surface and category
//!
//! A [`FootstepDataAsset`] describes one surface's effects per footstep
//! category together with randomization ranges. An [`EffectCatalog`] maps
//! surface types to data assets and is owned by a footstep component.

use crate::assets::{
    AttenuationSettings, ConcurrencySettings, EffectGraphAsset, ParticleSystemAsset, SoundAsset,
    SurfaceType, VisualAsset,
};
use crate::diagnostics::MessageLog;
use crate::error::Result;
use crate::settings::{FootstepCategory, FootstepSettings};
use footfall_math::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Inclusive random range, both ends clamped to be non-negative
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const ONE: Self = Self { min: 1.0, max: 1.0 };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample between the two bounds, in whichever order they were
    /// authored. A zero-width range yields its single value.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        let a = self.min.max(0.0);
        let b = self.max.max(0.0);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if high - low <= f32::EPSILON {
            low
        } else {
            rng.gen_range(low..=high)
        }
    }
}

impl Default for FloatRange {
    fn default() -> Self {
        Self::ONE
    }
}

/// Effects authored for one footstep category
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FootstepData {
    pub sounds: Vec<Arc<SoundAsset>>,
    pub particles: Vec<Arc<ParticleSystemAsset>>,
    pub effect_graphs: Vec<Arc<EffectGraphAsset>>,
}

impl FootstepData {
    pub fn with_sound(mut self, sound: SoundAsset) -> Self {
        self.sounds.push(Arc::new(sound));
        self
    }

    pub fn with_particle(mut self, particle: ParticleSystemAsset) -> Self {
        self.particles.push(Arc::new(particle));
        self
    }

    pub fn with_effect_graph(mut self, graph: EffectGraphAsset) -> Self {
        self.effect_graphs.push(Arc::new(graph));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty() && self.particles.is_empty() && self.effect_graphs.is_empty()
    }

    /// Uniform pick among the sounds
    pub fn choose_sound<R: Rng>(&self, rng: &mut R) -> Option<Arc<SoundAsset>> {
        self.sounds.choose(rng).cloned()
    }

    /// Uniform pick over particles and effect graphs taken together
    pub fn choose_visual<R: Rng>(&self, rng: &mut R) -> Option<VisualAsset> {
        let total = self.particles.len() + self.effect_graphs.len();
        if total == 0 {
            return None;
        }
        let index = rng.gen_range(0..total);
        match self.particles.get(index) {
            Some(particle) => Some(VisualAsset::Particle(particle.clone())),
            None => self
                .effect_graphs
                .get(index - self.particles.len())
                .map(|graph| VisualAsset::EffectGraph(graph.clone())),
        }
    }
}

/// Per-surface footstep effect description
#[derive(Debug, Clone, PartialEq)]
pub struct FootstepDataAsset {
    pub name: String,
    pub footstep_data: HashMap<FootstepCategory, FootstepData>,
    pub volume: FloatRange,
    pub pitch: FloatRange,
    pub particle_scale: FloatRange,
    pub attenuation_override: Option<Arc<AttenuationSettings>>,
    pub concurrency_override: Option<Arc<ConcurrencySettings>>,
    /// Seconds an activated actor stays out of the free set
    pub lifespan: f32,
}

impl FootstepDataAsset {
    /// Create an asset with an empty entry for every registered category and
    /// the project defaults for lifespan and sound overrides
    pub fn new(name: impl Into<String>, settings: &FootstepSettings) -> Self {
        let footstep_data = settings
            .categories
            .iter()
            .map(|category| (category.clone(), FootstepData::default()))
            .collect();

        Self {
            name: name.into(),
            footstep_data,
            volume: FloatRange::ONE,
            pitch: FloatRange::ONE,
            particle_scale: FloatRange::ONE,
            attenuation_override: settings
                .default_attenuation
                .as_ref()
                .map(|path| Arc::new(AttenuationSettings::new(path.clone()))),
            concurrency_override: settings
                .default_concurrency
                .as_ref()
                .map(|path| Arc::new(ConcurrencySettings::new(path.clone(), 16))),
            lifespan: settings.actor_lifespan(),
        }
    }

    /// Parse an asset from TOML, filling unspecified fields from the settings
    pub fn from_toml_str(source: &str, settings: &FootstepSettings) -> Result<Self> {
        let def: DataAssetDef = toml::from_str(source)?;
        Ok(def.into_asset(settings))
    }

    pub fn with_category_data(
        mut self,
        category: impl Into<FootstepCategory>,
        data: FootstepData,
    ) -> Self {
        self.footstep_data.insert(category.into(), data);
        self
    }

    pub fn without_category(mut self, category: &FootstepCategory) -> Self {
        self.footstep_data.remove(category);
        self
    }

    pub fn with_volume(mut self, min: f32, max: f32) -> Self {
        self.volume = FloatRange::new(min, max);
        self
    }

    pub fn with_pitch(mut self, min: f32, max: f32) -> Self {
        self.pitch = FloatRange::new(min, max);
        self
    }

    pub fn with_particle_scale(mut self, min: f32, max: f32) -> Self {
        self.particle_scale = FloatRange::new(min, max);
        self
    }

    pub fn with_lifespan(mut self, lifespan: f32) -> Self {
        self.lifespan = lifespan;
        self
    }

    pub fn with_attenuation(mut self, attenuation: AttenuationSettings) -> Self {
        self.attenuation_override = Some(Arc::new(attenuation));
        self
    }

    pub fn with_concurrency(mut self, concurrency: ConcurrencySettings) -> Self {
        self.concurrency_override = Some(Arc::new(concurrency));
        self
    }

    /// Look up a category's data, reporting authoring problems to `messages`
    pub fn category_data(
        &self,
        category: &FootstepCategory,
        settings: &FootstepSettings,
        messages: &mut MessageLog,
    ) -> Option<&FootstepData> {
        if !settings.contains_category(category) {
            messages.error(format!(
                "{} has a footstep category '{}' which is not registered in the footstep settings",
                self.name, category
            ));
            return None;
        }
        let data = self.footstep_data.get(category);
        if data.is_none() {
            messages.warning(format!(
                "{} doesn't have footstep category '{}' registered in the footstep settings",
                self.name, category
            ));
        }
        data
    }

    pub fn sound<R: Rng>(
        &self,
        category: &FootstepCategory,
        settings: &FootstepSettings,
        rng: &mut R,
        messages: &mut MessageLog,
    ) -> Option<Arc<SoundAsset>> {
        self.category_data(category, settings, messages)?
            .choose_sound(rng)
    }

    pub fn visual<R: Rng>(
        &self,
        category: &FootstepCategory,
        settings: &FootstepSettings,
        rng: &mut R,
        messages: &mut MessageLog,
    ) -> Option<VisualAsset> {
        self.category_data(category, settings, messages)?
            .choose_visual(rng)
    }

    pub fn random_volume<R: Rng>(&self, rng: &mut R) -> f32 {
        self.volume.sample(rng)
    }

    pub fn random_pitch<R: Rng>(&self, rng: &mut R) -> f32 {
        self.pitch.sample(rng)
    }

    /// Uniform relative scale for the visual
    pub fn random_relative_scale<R: Rng>(&self, rng: &mut R) -> Vec3 {
        Vec3::splat(self.particle_scale.sample(rng))
    }

    /// Lifespan, never negative
    pub fn lifespan(&self) -> f32 {
        self.lifespan.max(0.0)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DataAssetDef {
    name: String,
    #[serde(default)]
    categories: HashMap<FootstepCategory, FootstepData>,
    volume: Option<FloatRange>,
    pitch: Option<FloatRange>,
    particle_scale: Option<FloatRange>,
    attenuation: Option<AttenuationSettings>,
    concurrency: Option<ConcurrencySettings>,
    lifespan: Option<f32>,
}

impl DataAssetDef {
    fn into_asset(self, settings: &FootstepSettings) -> FootstepDataAsset {
        let mut asset = FootstepDataAsset::new(self.name, settings);
        asset.footstep_data.extend(self.categories);
        if let Some(volume) = self.volume {
            asset.volume = volume;
        }
        if let Some(pitch) = self.pitch {
            asset.pitch = pitch;
        }
        if let Some(scale) = self.particle_scale {
            asset.particle_scale = scale;
        }
        if let Some(attenuation) = self.attenuation {
            asset.attenuation_override = Some(Arc::new(attenuation));
        }
        if let Some(concurrency) = self.concurrency {
            asset.concurrency_override = Some(Arc::new(concurrency));
        }
        if let Some(lifespan) = self.lifespan {
            asset.lifespan = lifespan;
        }
        asset
    }
}

/// Surface type to data asset mapping
#[derive(Debug, Clone, Default)]
pub struct EffectCatalog {
    entries: HashMap<SurfaceType, Arc<FootstepDataAsset>>,
}

impl EffectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from TOML (`[[surface]]` entries with a nested `asset` table)
    pub fn from_toml_str(source: &str, settings: &FootstepSettings) -> Result<Self> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct CatalogDef {
            #[serde(default)]
            surface: Vec<SurfaceDef>,
        }

        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct SurfaceDef {
            surface_type: SurfaceType,
            asset: DataAssetDef,
        }

        let def: CatalogDef = toml::from_str(source)?;
        let mut catalog = Self::new();
        for entry in def.surface {
            catalog.insert(entry.surface_type, entry.asset.into_asset(settings));
        }
        Ok(catalog)
    }

    pub fn with_entry(mut self, surface: SurfaceType, asset: FootstepDataAsset) -> Self {
        self.insert(surface, asset);
        self
    }

    pub fn insert(&mut self, surface: SurfaceType, asset: FootstepDataAsset) {
        self.insert_shared(surface, Arc::new(asset));
    }

    /// Insert an asset that other catalogs may also reference
    pub fn insert_shared(&mut self, surface: SurfaceType, asset: Arc<FootstepDataAsset>) {
        if let Some(previous) = self.entries.insert(surface, asset) {
            log::debug!("Replaced footstep data '{}' for {}", previous.name, surface);
        }
    }

    pub fn remove(&mut self, surface: SurfaceType) -> Option<Arc<FootstepDataAsset>> {
        self.entries.remove(&surface)
    }

    pub fn get(&self, surface: SurfaceType) -> Option<&Arc<FootstepDataAsset>> {
        self.entries.get(&surface)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SurfaceType, &Arc<FootstepDataAsset>)> {
        self.entries.iter().map(|(surface, asset)| (*surface, asset))
    }
}
