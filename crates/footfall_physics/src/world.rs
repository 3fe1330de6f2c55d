//! Rapier-backed surface world answering footstep traces

use crate::collider::{from_vector, to_point, to_vector, SurfaceColliderDesc, SurfaceHandle};
use crate::error::{PhysicsError, Result};
use crate::layers;
use footfall::assets::PhysicalMaterial;
use footfall::settings::ObjectType;
use footfall::trace::{SurfaceTracer, TraceHit, TraceQuery};
use footfall_core::ActorId;
use footfall_math::Vec3;
use rapier3d::prelude as rapier;
use std::collections::HashMap;
use std::sync::Arc;

/// What a trace reports about a struck collider
#[derive(Debug, Clone)]
struct SurfaceInfo {
    owner: Option<ActorId>,
    owner_name: String,
    component_name: String,
    object_type: ObjectType,
    simple_material: Option<Arc<PhysicalMaterial>>,
    complex_material: Option<Arc<PhysicalMaterial>>,
}

/// Static collision scene that footstep traces run against
pub struct SurfaceWorld {
    /// Island manager
    islands: rapier::IslandManager,

    /// Query pipeline
    query_pipeline: rapier::QueryPipeline,

    /// Rigid body set
    bodies: rapier::RigidBodySet,

    /// Collider set
    colliders: rapier::ColliderSet,

    /// Per-collider trace metadata
    surfaces: HashMap<rapier::ColliderHandle, SurfaceInfo>,

    /// Colliders changed since the last `update`
    stale: bool,
}

impl SurfaceWorld {
    pub fn new() -> Self {
        Self {
            islands: rapier::IslandManager::new(),
            query_pipeline: rapier::QueryPipeline::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            surfaces: HashMap::new(),
            stale: false,
        }
    }

    /// Insert a surface collider. Call [`update`](Self::update) before tracing.
    pub fn add_collider(&mut self, desc: SurfaceColliderDesc) -> Result<SurfaceHandle> {
        desc.shape.validate()?;

        let handle = self.colliders.insert(desc.to_rapier_builder());
        self.surfaces.insert(
            handle,
            SurfaceInfo {
                owner: desc.owner,
                owner_name: desc.owner_name,
                component_name: desc.component_name,
                object_type: desc.object_type,
                simple_material: desc.simple_material,
                complex_material: desc.complex_material,
            },
        );
        self.stale = true;
        Ok(SurfaceHandle(handle))
    }

    pub fn remove_collider(&mut self, handle: SurfaceHandle) -> Result<()> {
        if self.surfaces.remove(&handle.0).is_none() {
            return Err(PhysicsError::ColliderNotFound(handle));
        }
        self.colliders
            .remove(handle.0, &mut self.islands, &mut self.bodies, true);
        self.stale = true;
        Ok(())
    }

    /// Remove every collider owned by `owner`. Returns how many were removed.
    pub fn remove_actor(&mut self, owner: ActorId) -> usize {
        let handles: Vec<_> = self
            .surfaces
            .iter()
            .filter(|(_, info)| info.owner == Some(owner))
            .map(|(handle, _)| *handle)
            .collect();

        for handle in &handles {
            self.surfaces.remove(handle);
            self.colliders
                .remove(*handle, &mut self.islands, &mut self.bodies, true);
        }
        if !handles.is_empty() {
            self.stale = true;
            log::debug!("Removed {} surface colliders of {}", handles.len(), owner);
        }
        handles.len()
    }

    /// Sync the query pipeline with the current colliders
    pub fn update(&mut self) {
        self.query_pipeline.update(&self.colliders);
        self.stale = false;
    }

    /// Whether colliders changed since the last update
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn contains(&self, handle: SurfaceHandle) -> bool {
        self.surfaces.contains_key(&handle.0)
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn object_type(&self, handle: SurfaceHandle) -> Option<ObjectType> {
        self.surfaces.get(&handle.0).map(|info| info.object_type)
    }
}

impl Default for SurfaceWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceTracer for SurfaceWorld {
    fn line_trace(&self, query: &TraceQuery) -> Option<TraceHit> {
        if self.stale {
            log::warn!("Surface trace against a stale query pipeline; call SurfaceWorld::update");
        }

        let length = query.length();
        let direction = (query.end - query.start).try_normalize()?;
        let ray = rapier::Ray::new(to_point(query.start), to_vector(direction));

        let not_ignored = |handle: rapier::ColliderHandle, _: &rapier::Collider| {
            self.surfaces
                .get(&handle)
                .and_then(|info| info.owner)
                .map_or(true, |owner| !query.is_ignored(owner))
        };
        let filter = rapier::QueryFilter::new()
            .groups(layers::query_groups(query.object_types))
            .exclude_sensors()
            .predicate(&not_ignored);

        let (handle, intersection) = self.query_pipeline.cast_ray_and_get_normal(
            &self.bodies,
            &self.colliders,
            &ray,
            length,
            true,
            filter,
        )?;
        let info = self.surfaces.get(&handle)?;

        let point = ray.point_at(intersection.time_of_impact);
        let mut hit = TraceHit::new(
            Vec3::new(point.x, point.y, point.z),
            from_vector(intersection.normal),
        )
        .with_component(info.component_name.clone(), info.simple_material.clone());
        hit.distance = intersection.time_of_impact;

        if let Some(owner) = info.owner {
            hit = hit.with_actor(owner, info.owner_name.clone());
        }
        if query.return_physical_material && query.trace_complex {
            if let Some(material) = &info.complex_material {
                hit = hit.with_physical_material(material.clone());
            }
        }
        Some(hit)
    }
}
