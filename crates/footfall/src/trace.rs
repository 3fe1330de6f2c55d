//! Raycast contract used to find the surface under a foot
//!
//! The footstep system does not own collision; the host supplies a
//! [`SurfaceTracer`] (see the `footfall_physics` crate for a rapier-backed
//! one).

use crate::assets::PhysicalMaterial;
use crate::settings::ObjectTypeMask;
use footfall_core::ActorId;
use footfall_math::Vec3;
use std::sync::Arc;

/// A single line trace request
#[derive(Debug, Clone, PartialEq)]
pub struct TraceQuery {
    pub start: Vec3,
    pub end: Vec3,
    /// Actors whose collision is ignored
    pub ignored_actors: Vec<ActorId>,
    pub object_types: ObjectTypeMask,
    /// Trace against per-face collision rather than simplified shapes
    pub trace_complex: bool,
    /// Ask the tracer to report the struck physical material
    pub return_physical_material: bool,
}

impl TraceQuery {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            ignored_actors: Vec::new(),
            object_types: ObjectTypeMask::ALL,
            trace_complex: false,
            return_physical_material: true,
        }
    }

    pub fn ignoring(mut self, actor: ActorId) -> Self {
        if !self.ignored_actors.contains(&actor) {
            self.ignored_actors.push(actor);
        }
        self
    }

    pub fn with_object_types(mut self, mask: ObjectTypeMask) -> Self {
        self.object_types = mask;
        self
    }

    pub fn with_trace_complex(mut self, complex: bool) -> Self {
        self.trace_complex = complex;
        self
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    pub fn is_ignored(&self, actor: ActorId) -> bool {
        self.ignored_actors.contains(&actor)
    }
}

/// The collision component struck by a trace
#[derive(Debug, Clone, PartialEq)]
pub struct HitComponent {
    pub name: String,
    /// Material of the component's simplified collision body
    pub simple_material: Option<Arc<PhysicalMaterial>>,
}

/// Result of a trace that struck something
#[derive(Debug, Clone, PartialEq)]
pub struct TraceHit {
    /// Whether the hit blocks the trace
    pub blocking: bool,
    pub impact_point: Vec3,
    pub impact_normal: Vec3,
    pub distance: f32,
    pub actor: Option<ActorId>,
    pub actor_name: Option<String>,
    pub component: Option<HitComponent>,
    /// Material reported for the exact surface struck, if any
    pub physical_material: Option<Arc<PhysicalMaterial>>,
}

impl TraceHit {
    pub fn new(impact_point: Vec3, impact_normal: Vec3) -> Self {
        Self {
            blocking: true,
            impact_point,
            impact_normal,
            distance: 0.0,
            actor: None,
            actor_name: None,
            component: None,
            physical_material: None,
        }
    }

    pub fn with_actor(mut self, actor: ActorId, name: impl Into<String>) -> Self {
        self.actor = Some(actor);
        self.actor_name = Some(name.into());
        self
    }

    pub fn with_component(
        mut self,
        name: impl Into<String>,
        simple_material: Option<Arc<PhysicalMaterial>>,
    ) -> Self {
        self.component = Some(HitComponent {
            name: name.into(),
            simple_material,
        });
        self
    }

    pub fn with_physical_material(mut self, material: Arc<PhysicalMaterial>) -> Self {
        self.physical_material = Some(material);
        self
    }

    /// The surface's material: the one reported by the hit, else the struck
    /// component's simple material
    pub fn resolve_physical_material(&self) -> Option<&Arc<PhysicalMaterial>> {
        self.physical_material.as_ref().or_else(|| {
            self.component
                .as_ref()
                .and_then(|component| component.simple_material.as_ref())
        })
    }
}

/// Something that can answer line traces
pub trait SurfaceTracer {
    /// First hit along the segment, if any
    fn line_trace(&self, query: &TraceQuery) -> Option<TraceHit>;
}

impl<T: SurfaceTracer + ?Sized> SurfaceTracer for &T {
    fn line_trace(&self, query: &TraceQuery) -> Option<TraceHit> {
        (**self).line_trace(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SurfaceType;

    #[test]
    fn test_material_prefers_hit_material() {
        let simple = Arc::new(PhysicalMaterial::new("PM_Simple", SurfaceType::new(1)));
        let exact = Arc::new(PhysicalMaterial::new("PM_Exact", SurfaceType::new(2)));
        let hit = TraceHit::new(Vec3::ZERO, Vec3::Y)
            .with_component("Floor", Some(simple.clone()))
            .with_physical_material(exact.clone());
        assert_eq!(hit.resolve_physical_material(), Some(&exact));

        let fallback = TraceHit::new(Vec3::ZERO, Vec3::Y).with_component("Floor", Some(simple.clone()));
        assert_eq!(fallback.resolve_physical_material(), Some(&simple));

        assert!(TraceHit::new(Vec3::ZERO, Vec3::Y).resolve_physical_material().is_none());
    }

    #[test]
    fn test_query_ignore_list_is_unique() {
        let query = TraceQuery::new(Vec3::ZERO, Vec3::new(0.0, -50.0, 0.0))
            .ignoring(ActorId::new(1))
            .ignoring(ActorId::new(1));
        assert_eq!(query.ignored_actors.len(), 1);
        assert!(query.is_ignored(ActorId::new(1)));
        assert_eq!(query.length(), 50.0);
    }
}
