//! Footfall - Surface-Aware Footstep Effects
//!
//! Plays a sound and a visual effect wherever a character's foot lands,
//! chosen by the physical surface under the foot and the kind of step.
//!
//! # Features
//!
//! - Per-surface effect catalog with per-category sounds and visuals
//! - Randomized volume, pitch and visual scale
//! - Bounded pool of reusable effect actors with forced reuse under pressure
//! - Timed release of actors back to the pool
//! - Animation-marker and explicit triggers
//! - Multicast event for every generated footstep
//!
//! # Example
//!
//! ```ignore
//! use footfall::prelude::*;
//! use std::sync::Arc;
//!
//! let settings = Arc::new(FootstepSettings::load("footsteps.toml")?);
//! let mut world = FootstepWorld::new(settings.clone(), NetMode::Standalone);
//!
//! let notify = SurfaceFootstepNotify::new(&settings).with_socket("foot_l");
//! let outcome = notify.notify(&mut world, &mesh, &physics);
//!
//! world.tick(delta_time);
//! ```

pub mod actor;
pub mod assets;
pub mod audio;
pub mod catalog;
pub mod component;
pub mod diagnostics;
pub mod direction;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod owner;
pub mod pool;
pub mod settings;
pub mod store;
pub mod timer;
pub mod trace;
pub mod trigger;
pub mod visual;
pub mod world;

pub use error::{FootstepError, Result};

pub mod prelude {
    pub use crate::actor::{FootstepActor, InUse};
    pub use crate::assets::{
        AttenuationModel, AttenuationSettings, ConcurrencyResolution, ConcurrencySettings,
        EffectGraphAsset, ParticleSystemAsset, PhysicalMaterial, SoundAsset, SurfaceType,
        VisualAsset, VisualKind,
    };
    pub use crate::audio::{AudioEmitter, PlaybackState, Spatialization};
    pub use crate::catalog::{EffectCatalog, FloatRange, FootstepData, FootstepDataAsset};
    pub use crate::component::FootstepComponent;
    pub use crate::diagnostics::{Diagnostic, MessageLog, Severity};
    pub use crate::direction::{resolve_trace_origin, TraceDirection, TraceOrigin};
    pub use crate::dispatch::{
        select_effects, EffectSelection, FootstepOutcome, FootstepRequest, SkipReason,
    };
    pub use crate::error::{FootstepError, Result};
    pub use crate::events::{FootstepCallback, FootstepEvent, FootstepEvents, ListenerId};
    pub use crate::owner::{FootstepMesh, FootstepOwner, SceneActor};
    pub use crate::pool::FootstepPool;
    pub use crate::settings::{FootstepCategory, FootstepSettings, ObjectType, ObjectTypeMask};
    pub use crate::store::{ActorHandle, ActorStore};
    pub use crate::timer::ReleaseTimer;
    pub use crate::trace::{HitComponent, SurfaceTracer, TraceHit, TraceQuery};
    pub use crate::trigger::{FootstepTrigger, SurfaceFootstepNotify};
    pub use crate::visual::{EffectGraphEmitter, ParticleEmitter, VisualEmitter};
    pub use crate::world::{FootstepWorld, NetMode};
}
