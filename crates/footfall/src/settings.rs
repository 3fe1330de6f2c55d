//! Project-wide footstep settings
//!
//! Loaded once (from TOML or built in code) and shared read-only as
//! `Arc<FootstepSettings>`. Getters clamp out-of-range values instead of
//! rejecting them, so a hand-edited file never disables the system.

use crate::error::{FootstepError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default trace length in world units
pub const DEFAULT_TRACE_LENGTH: f32 = 50.0;
/// Default maximum number of pooled footstep actors
pub const DEFAULT_POOL_SIZE: i32 = 20;
/// Default lifespan of an activated footstep actor, in seconds
pub const DEFAULT_ACTOR_LIFESPAN: f32 = 3.0;

/// A kind of step, e.g. `Footstep.Walk` or `Footstep.Run`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FootstepCategory(String);

impl FootstepCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FootstepCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FootstepCategory {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Collision object type a trace may report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    WorldStatic,
    WorldDynamic,
    Pawn,
    PhysicsBody,
    Vehicle,
    Destructible,
}

impl ObjectType {
    pub const ALL: [ObjectType; 6] = [
        ObjectType::WorldStatic,
        ObjectType::WorldDynamic,
        ObjectType::Pawn,
        ObjectType::PhysicsBody,
        ObjectType::Vehicle,
        ObjectType::Destructible,
    ];

    /// Bit of this type inside an [`ObjectTypeMask`]
    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Set of object types, as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectTypeMask(u32);

impl ObjectTypeMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    pub fn from_types(types: &[ObjectType]) -> Self {
        Self(types.iter().fold(0, |acc, t| acc | t.bit()))
    }

    pub fn with(mut self, ty: ObjectType) -> Self {
        self.0 |= ty.bit();
        self
    }

    pub fn contains(&self, ty: ObjectType) -> bool {
        self.0 & ty.bit() != 0
    }

    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl Default for ObjectTypeMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Global footstep configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FootstepSettings {
    /// Registered step categories, in declaration order
    pub categories: Vec<FootstepCategory>,
    /// Object types a footstep trace may hit. Empty means every type.
    pub object_types: Vec<ObjectType>,
    /// Default trace length for new footstep components
    pub default_trace_length: f32,
    /// Trace against complex (per-face) collision
    pub trace_complex: bool,
    /// Maximum number of pooled footstep actors
    pub max_pool_size: i32,
    /// Default lifespan used by new data assets
    pub default_actor_lifespan: f32,
    /// Play footstep sounds non-spatialized for the locally controlled pawn
    pub play_sound_2d_for_local_player: bool,
    /// Default attenuation asset path for new data assets
    pub default_attenuation: Option<String>,
    /// Default concurrency asset path for new data assets
    pub default_concurrency: Option<String>,
}

impl Default for FootstepSettings {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            object_types: vec![ObjectType::WorldStatic, ObjectType::WorldDynamic],
            default_trace_length: DEFAULT_TRACE_LENGTH,
            trace_complex: false,
            max_pool_size: DEFAULT_POOL_SIZE,
            default_actor_lifespan: DEFAULT_ACTOR_LIFESPAN,
            play_sound_2d_for_local_player: true,
            default_attenuation: None,
            default_concurrency: None,
        }
    }
}

impl FootstepSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&source)?;
        log::info!(
            "Loaded footstep settings from {} ({} categories)",
            path.display(),
            settings.categories.len()
        );
        Ok(settings)
    }

    /// Reject values that cannot be clamped into meaning
    pub fn validate(&self) -> Result<()> {
        if let Some(empty) = self.categories.iter().position(FootstepCategory::is_empty) {
            return Err(FootstepError::InvalidSettings(format!(
                "category #{} has an empty name",
                empty
            )));
        }
        for (i, category) in self.categories.iter().enumerate() {
            if self.categories[..i].contains(category) {
                return Err(FootstepError::InvalidSettings(format!(
                    "category '{}' is registered twice",
                    category
                )));
            }
        }
        let numbers = [
            self.default_trace_length,
            self.default_actor_lifespan,
        ];
        if numbers.iter().any(|n| !n.is_finite()) {
            return Err(FootstepError::InvalidSettings(
                "trace length and lifespan must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Register a category (builder pattern)
    pub fn with_category(mut self, category: impl Into<FootstepCategory>) -> Self {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    pub fn with_object_types(mut self, types: Vec<ObjectType>) -> Self {
        self.object_types = types;
        self
    }

    pub fn with_trace_length(mut self, length: f32) -> Self {
        self.default_trace_length = length;
        self
    }

    pub fn with_trace_complex(mut self, complex: bool) -> Self {
        self.trace_complex = complex;
        self
    }

    pub fn with_pool_size(mut self, size: i32) -> Self {
        self.max_pool_size = size;
        self
    }

    pub fn with_actor_lifespan(mut self, lifespan: f32) -> Self {
        self.default_actor_lifespan = lifespan;
        self
    }

    pub fn with_sound_2d_for_local_player(mut self, enabled: bool) -> Self {
        self.play_sound_2d_for_local_player = enabled;
        self
    }

    pub fn with_default_attenuation(mut self, path: impl Into<String>) -> Self {
        self.default_attenuation = Some(path.into());
        self
    }

    pub fn with_default_concurrency(mut self, path: impl Into<String>) -> Self {
        self.default_concurrency = Some(path.into());
        self
    }

    pub fn categories_len(&self) -> usize {
        self.categories.len()
    }

    pub fn category(&self, index: usize) -> Option<&FootstepCategory> {
        self.categories.get(index)
    }

    pub fn contains_category(&self, category: &FootstepCategory) -> bool {
        self.categories.contains(category)
    }

    /// Mask of traceable object types (all types when none are listed)
    pub fn object_type_mask(&self) -> ObjectTypeMask {
        if self.object_types.is_empty() {
            ObjectTypeMask::ALL
        } else {
            ObjectTypeMask::from_types(&self.object_types)
        }
    }

    /// Trace length, never negative
    pub fn trace_length(&self) -> f32 {
        self.default_trace_length.max(0.0)
    }

    /// Pool capacity, at least one
    pub fn pool_size(&self) -> usize {
        self.max_pool_size.max(1) as usize
    }

    /// Actor lifespan in seconds, never negative
    pub fn actor_lifespan(&self) -> f32 {
        self.default_actor_lifespan.max(0.0)
    }

    pub fn play_sound_2d(&self) -> bool {
        self.play_sound_2d_for_local_player
    }
}
