//! Turning a trace hit into an activated footstep actor
//!
//! [`FootstepWorld::spawn_footstep`] runs everything after the trace:
//! surface classification, catalog lookup, random selection, pool
//! acquisition, actor configuration and the generated event. Every
//! expected absence ends the procedure early with a [`SkipReason`].

use crate::assets::{SoundAsset, VisualAsset};
use crate::catalog::FootstepDataAsset;
use crate::component::FootstepComponent;
use crate::diagnostics::MessageLog;
use crate::events::FootstepEvent;
use crate::owner::SceneActor;
use crate::settings::{FootstepCategory, FootstepSettings};
use crate::store::ActorHandle;
use crate::trace::TraceHit;
use crate::world::FootstepWorld;
use footfall_math::{Quat, Transform, Vec3};
use rand::Rng;
use std::sync::Arc;

/// Why a trigger produced no footstep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The mesh has no owning actor
    NoOwner,
    /// The owner does not produce footsteps
    NotFootstepOwner,
    /// Dedicated server worlds never play footsteps
    ServerOnly,
    NoCategories,
    UnknownCategory,
    NoPool,
    NoComponent,
    ComponentInactive,
    /// The trace missed or the hit does not block
    NoHit,
    NoPhysicalMaterial,
    /// The surface has no data asset in the catalog
    NoCatalogEntry,
    /// Neither a sound nor a visual was available
    NothingSelected,
    PoolExhausted,
}

/// Result of one footstep trigger
#[derive(Debug, Clone, PartialEq)]
pub enum FootstepOutcome {
    Spawned {
        actor: ActorHandle,
        event: FootstepEvent,
    },
    Skipped(SkipReason),
}

impl FootstepOutcome {
    pub fn is_spawned(&self) -> bool {
        matches!(self, Self::Spawned { .. })
    }

    pub fn actor(&self) -> Option<ActorHandle> {
        match self {
            Self::Spawned { actor, .. } => Some(*actor),
            Self::Skipped(_) => None,
        }
    }

    pub fn event(&self) -> Option<&FootstepEvent> {
        match self {
            Self::Spawned { event, .. } => Some(event),
            Self::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped(reason) => Some(*reason),
            Self::Spawned { .. } => None,
        }
    }
}

/// The traced step handed to dispatch
#[derive(Clone, Copy)]
pub struct FootstepRequest<'a> {
    pub owner: &'a dyn SceneActor,
    pub category: &'a FootstepCategory,
    pub hit: &'a TraceHit,
    /// Socket the trace started from, for debug output
    pub socket: Option<&'a str>,
}

/// Randomly chosen effects and their parameters
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSelection {
    pub sound: Option<Arc<SoundAsset>>,
    pub visual: Option<VisualAsset>,
    /// Zero when no sound was chosen
    pub volume: f32,
    /// Zero when no sound was chosen
    pub pitch: f32,
    /// Zero when no visual was chosen
    pub relative_scale: Vec3,
}

impl EffectSelection {
    pub fn is_empty(&self) -> bool {
        self.sound.is_none() && self.visual.is_none()
    }

    pub fn sound_volume_multiplier(&self) -> f32 {
        self.sound.as_ref().map_or(0.0, |sound| sound.volume_multiplier)
    }

    pub fn sound_pitch_multiplier(&self) -> f32 {
        self.sound.as_ref().map_or(0.0, |sound| sound.pitch_multiplier)
    }
}

/// Pick a sound and a visual for `category` and randomize their parameters.
///
/// Returns `None` when the category yields neither.
pub fn select_effects<R: Rng>(
    asset: &FootstepDataAsset,
    category: &FootstepCategory,
    settings: &FootstepSettings,
    rng: &mut R,
    messages: &mut MessageLog,
) -> Option<EffectSelection> {
    let data = asset.category_data(category, settings, messages)?;
    let sound = data.choose_sound(rng);
    let visual = data.choose_visual(rng);

    let (volume, pitch) = if sound.is_some() {
        (asset.random_volume(rng), asset.random_pitch(rng))
    } else {
        (0.0, 0.0)
    };
    let relative_scale = if visual.is_some() {
        asset.random_relative_scale(rng)
    } else {
        Vec3::ZERO
    };

    let selection = EffectSelection {
        sound,
        visual,
        volume,
        pitch,
        relative_scale,
    };
    if selection.is_empty() {
        None
    } else {
        Some(selection)
    }
}

/// Placement of the effect: at the impact point, aligned to the surface
/// normal only when a visual plays
fn effect_transform(hit: &TraceHit, has_visual: bool) -> Transform {
    let rotation = if has_visual {
        hit.impact_normal
            .try_normalize()
            .map_or(Quat::IDENTITY, |normal| Quat::from_rotation_arc(Vec3::Y, normal))
    } else {
        Quat::IDENTITY
    };
    Transform::from_position_rotation(hit.impact_point, rotation)
}

impl FootstepWorld {
    /// Spawn the effects for a traced step.
    ///
    /// Classifies the surface, looks it up in the component's catalog,
    /// selects effects, configures a pooled actor and broadcasts
    /// [`FootstepEvent`] to the component's listeners.
    pub fn spawn_footstep(
        &mut self,
        component: &FootstepComponent,
        request: FootstepRequest<'_>,
    ) -> FootstepOutcome {
        let FootstepRequest {
            owner,
            category,
            hit,
            socket,
        } = request;

        let Some(material) = hit.resolve_physical_material() else {
            log::trace!("Footstep hit has no physical material");
            return FootstepOutcome::Skipped(SkipReason::NoPhysicalMaterial);
        };
        let surface_type = material.surface_type;

        let Some(asset) = component.footstep_data(surface_type) else {
            log::trace!("No footstep data for {}", surface_type);
            return FootstepOutcome::Skipped(SkipReason::NoCatalogEntry);
        };

        if component.show_debug() {
            log::info!(
                "PhysMat: {} | DataAsset: {} | Category: {} | Socket: {} | Owner: {} | HitActor: {} | HitComp: {}",
                material.name,
                asset.name,
                category,
                socket.unwrap_or("ROOT"),
                owner.name(),
                hit.actor_name.as_deref().unwrap_or("None"),
                hit.component.as_ref().map_or("None", |c| c.name.as_str()),
            );
        }

        let FootstepWorld {
            settings,
            actors,
            pool,
            messages,
            rng,
            ..
        } = self;

        let Some(selection) = select_effects(asset, category, settings.as_ref(), rng, messages) else {
            log::trace!("Nothing to play for {} on {}", category, surface_type);
            return FootstepOutcome::Skipped(SkipReason::NothingSelected);
        };

        let Some(pool) = pool.as_mut() else {
            return FootstepOutcome::Skipped(SkipReason::NoPool);
        };
        let Some(handle) = pool.acquire_or_grow(actors) else {
            log::debug!("Footstep pool has no live actor to use");
            return FootstepOutcome::Skipped(SkipReason::PoolExhausted);
        };
        let Some(actor) = actors.get_mut(handle) else {
            return FootstepOutcome::Skipped(SkipReason::PoolExhausted);
        };

        let transform = effect_transform(hit, selection.visual.is_some());
        actor.deactivate();
        actor.set_transform(transform);
        actor.init_sound(
            selection.sound.clone(),
            selection.volume,
            selection.pitch,
            component.play_sound_2d(owner),
            asset.attenuation_override.clone(),
            asset.concurrency_override.clone(),
        );
        actor.init_visual(selection.visual.clone(), selection.relative_scale);
        actor.set_release_timer(asset.lifespan());
        actor.activate();

        let event = FootstepEvent {
            surface_type,
            category: category.clone(),
            transform,
            volume: selection.volume,
            pitch: selection.pitch,
            sound_volume_multiplier: selection.sound_volume_multiplier(),
            sound_pitch_multiplier: selection.sound_pitch_multiplier(),
            relative_scale: selection.relative_scale,
        };
        component.on_footstep_generated.broadcast(&event);

        FootstepOutcome::Spawned {
            actor: handle,
            event,
        }
    }
}
