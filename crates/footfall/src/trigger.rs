//! Footstep triggers
//!
//! Two ways to request a footstep:
//!
//! - [`SurfaceFootstepNotify`]: an animation marker fired from a skeletal
//!   mesh, tracing from a foot socket or the mesh itself.
//! - [`FootstepTrigger`]: an explicit call on an owner, tracing straight
//!   down from the owner's location.
//!
//! Both go through the same precondition gate before tracing and hand the
//! hit to [`FootstepWorld::spawn_footstep`].

use crate::component::FootstepComponent;
use crate::direction::{resolve_trace_origin, TraceDirection, TraceOrigin};
use crate::dispatch::{FootstepOutcome, FootstepRequest, SkipReason};
use crate::error::FootstepError;
use crate::owner::{FootstepMesh, SceneActor};
use crate::settings::{FootstepCategory, FootstepSettings};
use crate::trace::SurfaceTracer;
use crate::world::FootstepWorld;
use footfall_math::Vec3;
use serde::{Deserialize, Serialize};

const NOTIFY_NAME: &str = "SurfaceFootstep";

/// Default category for new triggers: the first registered one
fn default_category(settings: &FootstepSettings) -> FootstepCategory {
    settings.category(0).cloned().unwrap_or_default()
}

/// Check everything needed before a trace is issued.
///
/// Category problems and a missing pool are authoring errors and leave one
/// diagnostic in the world's message log; everything else skips silently.
fn gate<'a>(
    world: &mut FootstepWorld,
    owner: Option<&'a dyn SceneActor>,
    category: &FootstepCategory,
) -> Result<(&'a dyn SceneActor, &'a FootstepComponent), SkipReason> {
    let owner = owner.ok_or(SkipReason::NoOwner)?;
    let footstep_owner = owner
        .as_footstep_owner()
        .ok_or(SkipReason::NotFootstepOwner)?;

    if world.net_mode().is_server_only() {
        return Err(SkipReason::ServerOnly);
    }

    if world.settings().categories_len() == 0 {
        world.messages_mut().error(FootstepError::NoCategories.to_string());
        return Err(SkipReason::NoCategories);
    }
    if !world.settings().contains_category(category) {
        let message = FootstepError::UnknownCategory(category.clone()).to_string();
        world.messages_mut().error(message);
        return Err(SkipReason::UnknownCategory);
    }

    if world.pool().is_none() {
        world.messages_mut().error(FootstepError::MissingPool.to_string());
        return Err(SkipReason::NoPool);
    }

    let component = footstep_owner
        .footstep_component()
        .ok_or(SkipReason::NoComponent)?;
    if !component.is_active() {
        return Err(SkipReason::ComponentInactive);
    }

    Ok((owner, component))
}

/// Trace from `start` and dispatch whatever was hit
fn trace_and_spawn(
    world: &mut FootstepWorld,
    tracer: &dyn SurfaceTracer,
    owner: &dyn SceneActor,
    component: &FootstepComponent,
    category: &FootstepCategory,
    origin: &TraceOrigin,
) -> FootstepOutcome {
    let hit = match component.create_footstep_trace(
        tracer,
        owner.actor_id(),
        origin.start,
        origin.direction,
    ) {
        Some(hit) if hit.blocking => hit,
        _ => {
            log::trace!("Footstep trace for {} hit nothing", owner.name());
            return FootstepOutcome::Skipped(SkipReason::NoHit);
        }
    };

    world.spawn_footstep(
        component,
        FootstepRequest {
            owner,
            category,
            hit: &hit,
            socket: origin.socket.as_deref(),
        },
    )
}

/// Animation marker that produces a footstep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceFootstepNotify {
    /// Must be one of the categories registered in the settings
    pub category: FootstepCategory,
    pub trace_direction: TraceDirection,
    /// Trace from `socket` instead of the mesh origin
    pub trace_from_socket: bool,
    pub socket: Option<String>,
}

impl Default for SurfaceFootstepNotify {
    fn default() -> Self {
        Self {
            category: FootstepCategory::default(),
            trace_direction: TraceDirection::Down,
            trace_from_socket: false,
            socket: None,
        }
    }
}

impl SurfaceFootstepNotify {
    pub fn new(settings: &FootstepSettings) -> Self {
        Self {
            category: default_category(settings),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<FootstepCategory>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_direction(mut self, direction: TraceDirection) -> Self {
        self.trace_direction = direction;
        self
    }

    pub fn with_socket(mut self, socket: impl Into<String>) -> Self {
        self.trace_from_socket = true;
        self.socket = Some(socket.into());
        self
    }

    fn active_socket(&self) -> Option<&str> {
        if !self.trace_from_socket {
            return None;
        }
        self.socket.as_deref().filter(|name| !name.is_empty())
    }

    /// Display name shown on animation timelines
    pub fn notify_name(&self) -> String {
        match self.active_socket() {
            Some(socket) => format!("{}_{}", NOTIFY_NAME, socket),
            None => NOTIFY_NAME.to_string(),
        }
    }

    /// Fire the marker on `mesh`
    pub fn notify(
        &self,
        world: &mut FootstepWorld,
        mesh: &dyn FootstepMesh,
        tracer: &dyn SurfaceTracer,
    ) -> FootstepOutcome {
        let (owner, component) = match gate(world, mesh.owner(), &self.category) {
            Ok(gated) => gated,
            Err(reason) => return FootstepOutcome::Skipped(reason),
        };

        let origin = resolve_trace_origin(mesh, self.active_socket(), self.trace_direction);
        trace_and_spawn(
            world,
            tracer,
            owner,
            component,
            &self.category,
            &origin,
        )
    }
}

/// Explicitly triggered footstep for an owner, tracing straight down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootstepTrigger {
    pub category: FootstepCategory,
}

impl FootstepTrigger {
    pub fn new(settings: &FootstepSettings) -> Self {
        Self {
            category: default_category(settings),
        }
    }

    pub fn with_category(mut self, category: impl Into<FootstepCategory>) -> Self {
        self.category = category.into();
        self
    }

    pub fn make_footstep(
        &self,
        world: &mut FootstepWorld,
        owner: &dyn SceneActor,
        tracer: &dyn SurfaceTracer,
    ) -> FootstepOutcome {
        let (owner, component) = match gate(world, Some(owner), &self.category) {
            Ok(gated) => gated,
            Err(reason) => return FootstepOutcome::Skipped(reason),
        };

        let origin = TraceOrigin {
            start: owner.location(),
            direction: Vec3::NEG_Y,
            socket: None,
        };
        trace_and_spawn(world, tracer, owner, component, &self.category, &origin)
    }
}
