//! Footstep component attached to footstep owners

use crate::catalog::{EffectCatalog, FootstepDataAsset};
use crate::assets::SurfaceType;
use crate::events::FootstepEvents;
use crate::owner::SceneActor;
use crate::settings::FootstepSettings;
use crate::trace::{SurfaceTracer, TraceHit, TraceQuery};
use footfall_core::ActorId;
use footfall_math::Vec3;
use std::sync::Arc;

/// Per-owner footstep configuration and notification point
#[derive(Debug)]
pub struct FootstepComponent {
    settings: Arc<FootstepSettings>,
    catalog: EffectCatalog,
    trace_length: f32,
    show_debug: bool,
    active: bool,
    actors_to_ignore: Vec<ActorId>,
    /// Fired once per spawned footstep
    pub on_footstep_generated: FootstepEvents,
}

impl FootstepComponent {
    pub fn new(settings: Arc<FootstepSettings>) -> Self {
        let trace_length = settings.trace_length();
        Self {
            settings,
            catalog: EffectCatalog::new(),
            trace_length,
            show_debug: false,
            active: true,
            actors_to_ignore: Vec::new(),
            on_footstep_generated: FootstepEvents::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: EffectCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_trace_length(mut self, length: f32) -> Self {
        self.set_trace_length(length);
        self
    }

    pub fn with_debug(mut self, show_debug: bool) -> Self {
        self.show_debug = show_debug;
        self
    }

    pub fn settings(&self) -> &Arc<FootstepSettings> {
        &self.settings
    }

    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut EffectCatalog {
        &mut self.catalog
    }

    /// Data asset for a surface, if one is configured
    pub fn footstep_data(&self, surface: SurfaceType) -> Option<&Arc<FootstepDataAsset>> {
        self.catalog.get(surface)
    }

    pub fn trace_length(&self) -> f32 {
        self.trace_length
    }

    pub fn set_trace_length(&mut self, length: f32) {
        self.trace_length = length.max(0.0);
    }

    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    pub fn set_show_debug(&mut self, show_debug: bool) {
        self.show_debug = show_debug;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn actors_to_ignore(&self) -> &[ActorId] {
        &self.actors_to_ignore
    }

    /// Replace the ignore list, dropping duplicates
    pub fn set_actors_to_ignore(&mut self, actors: &[ActorId]) {
        self.actors_to_ignore.clear();
        for actor in actors {
            if !self.actors_to_ignore.contains(actor) {
                self.actors_to_ignore.push(*actor);
            }
        }
    }

    /// Whether the owner's footsteps should play non-spatialized
    pub fn play_sound_2d(&self, owner: &dyn SceneActor) -> bool {
        self.settings.play_sound_2d() && owner.is_locally_controlled()
    }

    /// Build the trace for a step starting at `start` heading along `direction`
    pub fn footstep_trace_query(&self, owner: ActorId, start: Vec3, direction: Vec3) -> TraceQuery {
        let end = start + direction * self.trace_length;
        let mut query = TraceQuery::new(start, end)
            .ignoring(owner)
            .with_object_types(self.settings.object_type_mask())
            .with_trace_complex(self.settings.trace_complex);
        for actor in &self.actors_to_ignore {
            query = query.ignoring(*actor);
        }
        query
    }

    /// Trace for the surface under a step
    pub fn create_footstep_trace(
        &self,
        tracer: &dyn SurfaceTracer,
        owner: ActorId,
        start: Vec3,
        direction: Vec3,
    ) -> Option<TraceHit> {
        let query = self.footstep_trace_query(owner, start, direction);
        if self.show_debug {
            log::debug!(
                "Footstep trace from {:?} to {:?} ({} ignored)",
                query.start,
                query.end,
                query.ignored_actors.len()
            );
        }
        tracer.line_trace(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ObjectType;
    use footfall_math::Transform;

    struct Pawn {
        local: bool,
    }

    impl SceneActor for Pawn {
        fn actor_id(&self) -> ActorId {
            ActorId::new(1)
        }

        fn name(&self) -> &str {
            "Pawn"
        }

        fn transform(&self) -> Transform {
            Transform::IDENTITY
        }

        fn is_locally_controlled(&self) -> bool {
            self.local
        }
    }

    #[test]
    fn test_defaults_from_settings() {
        let settings = Arc::new(FootstepSettings::new().with_trace_length(75.0));
        let component = FootstepComponent::new(settings);
        assert_eq!(component.trace_length(), 75.0);
        assert!(component.is_active());
        assert!(!component.show_debug());
        assert!(component.catalog().is_empty());
    }

    #[test]
    fn test_ignore_list_is_deduplicated() {
        let mut component = FootstepComponent::new(Arc::new(FootstepSettings::new()));
        let a = ActorId::new(5);
        let b = ActorId::new(6);
        component.set_actors_to_ignore(&[a, b, a]);
        assert_eq!(component.actors_to_ignore(), &[a, b]);
    }

    #[test]
    fn test_play_sound_2d_needs_local_control_and_setting() {
        let on = FootstepComponent::new(Arc::new(FootstepSettings::new()));
        assert!(on.play_sound_2d(&Pawn { local: true }));
        assert!(!on.play_sound_2d(&Pawn { local: false }));

        let off = FootstepComponent::new(Arc::new(
            FootstepSettings::new().with_sound_2d_for_local_player(false),
        ));
        assert!(!off.play_sound_2d(&Pawn { local: true }));
    }

    #[test]
    fn test_trace_query() {
        let settings = Arc::new(
            FootstepSettings::new()
                .with_object_types(vec![ObjectType::WorldStatic])
                .with_trace_complex(true),
        );
        let mut component = FootstepComponent::new(settings).with_trace_length(10.0);
        component.set_actors_to_ignore(&[ActorId::new(9)]);

        let query = component.footstep_trace_query(ActorId::new(1), Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        assert_eq!(query.end, Vec3::new(0.0, -5.0, 0.0));
        assert!(query.is_ignored(ActorId::new(1)));
        assert!(query.is_ignored(ActorId::new(9)));
        assert!(query.trace_complex);
        assert!(query.return_physical_material);
        assert!(query.object_types.contains(ObjectType::WorldStatic));
        assert!(!query.object_types.contains(ObjectType::WorldDynamic));
    }

    #[test]
    fn test_negative_trace_length_clamps() {
        let component = FootstepComponent::new(Arc::new(FootstepSettings::new())).with_trace_length(-4.0);
        assert_eq!(component.trace_length(), 0.0);
    }
}
