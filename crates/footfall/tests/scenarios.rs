//! End-to-end footstep scenarios against a scripted tracer

use footfall::prelude::*;
use footfall_core::ActorId;
use footfall_math::{Transform, Vec3};
use parking_lot::Mutex;
use std::sync::Arc;

const WALK: &str = "Footstep.Walk";
const CONCRETE: SurfaceType = SurfaceType::new(1);
const GRASS: SurfaceType = SurfaceType::new(2);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Tracer that reports a single flat floor at y = 0
struct Floor {
    material: Option<Arc<PhysicalMaterial>>,
    blocking: bool,
    queries: Mutex<Vec<TraceQuery>>,
}

impl Floor {
    fn of(surface: SurfaceType) -> Self {
        Self {
            material: Some(Arc::new(PhysicalMaterial::new("PM_Floor", surface))),
            blocking: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    fn nothing() -> Self {
        Self {
            material: None,
            blocking: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    fn trace_count(&self) -> usize {
        self.queries.lock().len()
    }

    fn last_query(&self) -> Option<TraceQuery> {
        self.queries.lock().last().cloned()
    }
}

impl SurfaceTracer for Floor {
    fn line_trace(&self, query: &TraceQuery) -> Option<TraceHit> {
        self.queries.lock().push(query.clone());
        if !self.blocking {
            return None;
        }
        let point = Vec3::new(query.start.x, 0.0, query.start.z);
        Some(
            TraceHit::new(point, Vec3::Y)
                .with_actor(ActorId::new(900), "Floor")
                .with_component("FloorMesh", self.material.clone()),
        )
    }
}

struct Character {
    id: ActorId,
    location: Vec3,
    local: bool,
    component: Option<FootstepComponent>,
}

impl SceneActor for Character {
    fn actor_id(&self) -> ActorId {
        self.id
    }

    fn name(&self) -> &str {
        "Character"
    }

    fn transform(&self) -> Transform {
        Transform::from_position(self.location)
    }

    fn is_locally_controlled(&self) -> bool {
        self.local
    }

    fn as_footstep_owner(&self) -> Option<&dyn FootstepOwner> {
        Some(self)
    }
}

impl FootstepOwner for Character {
    fn footstep_component(&self) -> Option<&FootstepComponent> {
        self.component.as_ref()
    }
}

/// Scenery that never produces footsteps
struct Prop;

impl SceneActor for Prop {
    fn actor_id(&self) -> ActorId {
        ActorId::new(77)
    }

    fn name(&self) -> &str {
        "Prop"
    }

    fn transform(&self) -> Transform {
        Transform::IDENTITY
    }
}

struct Mesh<'a> {
    owner: Option<&'a dyn SceneActor>,
    transform: Transform,
    sockets: Vec<(String, Transform)>,
}

impl<'a> Mesh<'a> {
    fn on(owner: &'a dyn SceneActor) -> Self {
        Self {
            owner: Some(owner),
            transform: owner.transform(),
            sockets: Vec::new(),
        }
    }

    fn with_socket(mut self, name: &str, transform: Transform) -> Self {
        self.sockets.push((name.to_string(), transform));
        self
    }
}

impl FootstepMesh for Mesh<'_> {
    fn component_transform(&self) -> Transform {
        self.transform
    }

    fn socket_transform(&self, socket: &str) -> Option<Transform> {
        self.sockets
            .iter()
            .find(|(name, _)| name == socket)
            .map(|(_, transform)| *transform)
    }

    fn owner(&self) -> Option<&dyn SceneActor> {
        self.owner
    }
}

fn settings(pool_size: i32) -> Arc<FootstepSettings> {
    Arc::new(
        FootstepSettings::new()
            .with_category(WALK)
            .with_pool_size(pool_size),
    )
}

fn concrete_asset(settings: &FootstepSettings, lifespan: f32) -> FootstepDataAsset {
    FootstepDataAsset::new("DA_Concrete", settings)
        .with_category_data(
            WALK,
            FootstepData::default()
                .with_sound(SoundAsset::new("/Game/Sounds/Step_Concrete").with_volume_multiplier(0.5))
                .with_particle(ParticleSystemAsset::new("/Game/FX/Dust")),
        )
        .with_volume(0.8, 1.0)
        .with_lifespan(lifespan)
}

fn character(settings: &Arc<FootstepSettings>, lifespan: f32) -> Character {
    let catalog = EffectCatalog::new().with_entry(CONCRETE, concrete_asset(settings, lifespan));
    Character {
        id: ActorId::new(1),
        location: Vec3::new(3.0, 1.0, -2.0),
        local: false,
        component: Some(FootstepComponent::new(settings.clone()).with_catalog(catalog)),
    }
}

fn world(settings: &Arc<FootstepSettings>) -> FootstepWorld {
    FootstepWorld::new(settings.clone(), NetMode::Standalone).with_seed(42)
}

#[test]
fn test_basic_footstep() {
    init_logging();
    let settings = settings(1);
    let mut world = world(&settings);
    let mut pawn = character(&settings, 2.0);

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    if let Some(component) = pawn.component.as_mut() {
        component
            .on_footstep_generated
            .subscribe(move |event| sink.lock().push(event.clone()));
    }

    let floor = Floor::of(CONCRETE);
    let notify = SurfaceFootstepNotify::new(&settings);
    let outcome = notify.notify(&mut world, &Mesh::on(&pawn), &floor);

    let handle = outcome.actor().expect("footstep should spawn");
    let pool = world.pool().unwrap();
    assert_eq!(pool.len(), 1);

    let actor = world.actors().get(handle).unwrap();
    assert!(actor.is_active());
    assert!(actor.audio().is_playing());
    assert!(actor.audio().sound().is_some());
    assert!(actor.particle().is_active());
    assert!(actor.particle().asset().is_some());
    assert!(!actor.effect_graph().is_active());
    let volume = actor.audio().volume_multiplier();
    assert!((0.8..=1.0).contains(&volume));
    assert_eq!(actor.release_timer().remaining(), Some(2.0));
    assert_eq!(actor.transform().position, Vec3::new(3.0, 0.0, -2.0));

    let events = events.lock();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.surface_type, CONCRETE);
    assert_eq!(event.category, FootstepCategory::from(WALK));
    assert_eq!(event.volume, volume);
    assert_eq!(event.sound_volume_multiplier, 0.5);
    assert_eq!(event.sound_pitch_multiplier, 1.0);
    assert_eq!(Some(event), outcome.event());
    assert!(world.messages().is_empty());
}

#[test]
fn test_release_after_lifespan() {
    let settings = settings(1);
    let mut world = world(&settings);
    let pawn = character(&settings, 2.0);
    let floor = Floor::of(CONCRETE);

    let handle = FootstepTrigger::new(&settings)
        .make_footstep(&mut world, &pawn, &floor)
        .actor()
        .unwrap();

    assert_eq!(world.tick(1.0), 0);
    assert!(world.actors().get(handle).unwrap().is_active());
    assert_eq!(world.tick(1.5), 1);

    let actor = world.actors().get(handle).unwrap();
    assert!(!actor.is_active());
    assert!(!actor.audio().is_playing());
    assert!(!actor.in_use().any());
    assert_eq!(world.tick(5.0), 0);
}

#[test]
fn test_missed_trace() {
    let settings = settings(1);
    let mut world = world(&settings);
    let pawn = character(&settings, 2.0);
    let floor = Floor::nothing();

    let outcome = SurfaceFootstepNotify::new(&settings).notify(&mut world, &Mesh::on(&pawn), &floor);

    assert_eq!(outcome.skip_reason(), Some(SkipReason::NoHit));
    assert_eq!(floor.trace_count(), 1);
    assert_eq!(world.pool().unwrap().len(), 0);
    assert!(world.actors().is_empty());
}

#[test]
fn test_unconfigured_category() {
    let settings = settings(1);
    let mut world = world(&settings);
    let pawn = character(&settings, 2.0);
    let floor = Floor::of(CONCRETE);
    let notify = SurfaceFootstepNotify::new(&settings).with_category("Footstep.Crawl");

    let outcome = notify.notify(&mut world, &Mesh::on(&pawn), &floor);
    assert_eq!(outcome.skip_reason(), Some(SkipReason::UnknownCategory));
    assert_eq!(floor.trace_count(), 0);
    assert_eq!(world.messages().count(Severity::Error), 1);

    notify.notify(&mut world, &Mesh::on(&pawn), &floor);
    assert_eq!(world.messages().count(Severity::Error), 2);
    assert_eq!(world.pool().unwrap().len(), 0);
}

#[test]
fn test_no_categories_registered() {
    let settings = Arc::new(FootstepSettings::new());
    let mut world = world(&settings);
    let pawn = character(&settings, 2.0);
    let floor = Floor::of(CONCRETE);

    let outcome = FootstepTrigger::new(&settings).make_footstep(&mut world, &pawn, &floor);
    assert_eq!(outcome.skip_reason(), Some(SkipReason::NoCategories));
    assert_eq!(world.messages().len(), 1);
    assert_eq!(floor.trace_count(), 0);
}

#[test]
fn test_dedicated_server_skips_silently() {
    let settings = settings(4);
    let mut world = FootstepWorld::new(settings.clone(), NetMode::DedicatedServer);
    let pawn = character(&settings, 2.0);
    let floor = Floor::of(CONCRETE);

    let outcome = FootstepTrigger::new(&settings).make_footstep(&mut world, &pawn, &floor);
    assert_eq!(outcome.skip_reason(), Some(SkipReason::ServerOnly));
    assert!(world.pool().is_none());
    assert!(world.messages().is_empty());
    assert_eq!(floor.trace_count(), 0);
}

#[test]
fn test_owner_gates() {
    let settings = settings(1);
    let mut world = world(&settings);
    let floor = Floor::of(CONCRETE);
    let notify = SurfaceFootstepNotify::new(&settings);

    let orphan = Mesh {
        owner: None,
        transform: Transform::IDENTITY,
        sockets: Vec::new(),
    };
    assert_eq!(
        notify.notify(&mut world, &orphan, &floor).skip_reason(),
        Some(SkipReason::NoOwner)
    );

    let prop = Prop;
    assert_eq!(
        notify.notify(&mut world, &Mesh::on(&prop), &floor).skip_reason(),
        Some(SkipReason::NotFootstepOwner)
    );

    let mut pawn = character(&settings, 2.0);
    if let Some(component) = pawn.component.as_mut() {
        component.deactivate();
    }
    assert_eq!(
        notify.notify(&mut world, &Mesh::on(&pawn), &floor).skip_reason(),
        Some(SkipReason::ComponentInactive)
    );

    pawn.component = None;
    assert_eq!(
        notify.notify(&mut world, &Mesh::on(&pawn), &floor).skip_reason(),
        Some(SkipReason::NoComponent)
    );

    assert_eq!(floor.trace_count(), 0);
    assert!(world.messages().is_empty());
}

#[test]
fn test_surface_without_catalog_entry() {
    let settings = settings(1);
    let mut world = world(&settings);
    let pawn = character(&settings, 2.0);
    let floor = Floor::of(GRASS);

    let outcome = FootstepTrigger::new(&settings).make_footstep(&mut world, &pawn, &floor);
    assert_eq!(outcome.skip_reason(), Some(SkipReason::NoCatalogEntry));
    assert_eq!(world.pool().unwrap().len(), 0);
    assert!(world.messages().is_empty());
}

#[test]
fn test_hit_without_material() {
    let settings = settings(1);
    let mut world = world(&settings);
    let pawn = character(&settings, 2.0);
    let floor = Floor {
        material: None,
        blocking: true,
        queries: Mutex::new(Vec::new()),
    };

    let outcome = FootstepTrigger::new(&settings).make_footstep(&mut world, &pawn, &floor);
    assert_eq!(outcome.skip_reason(), Some(SkipReason::NoPhysicalMaterial));
    assert!(world.actors().is_empty());
}

#[test]
fn test_empty_selection_touches_no_actor() {
    let settings = settings(1);
    let mut world = world(&settings);
    let catalog = EffectCatalog::new().with_entry(CONCRETE, FootstepDataAsset::new("DA_Empty", &settings));
    let pawn = Character {
        id: ActorId::new(1),
        location: Vec3::ZERO,
        local: false,
        component: Some(FootstepComponent::new(settings.clone()).with_catalog(catalog)),
    };
    let floor = Floor::of(CONCRETE);

    let outcome = FootstepTrigger::new(&settings).make_footstep(&mut world, &pawn, &floor);
    assert_eq!(outcome.skip_reason(), Some(SkipReason::NothingSelected));
    assert_eq!(world.pool().unwrap().len(), 0);
    assert!(world.actors().is_empty());
}

#[test]
fn test_pool_capacity_and_forced_reuse() {
    let settings = settings(2);
    let mut world = world(&settings);
    let pawn = character(&settings, 10.0);
    let floor = Floor::of(CONCRETE);
    let trigger = FootstepTrigger::new(&settings);

    let first = trigger.make_footstep(&mut world, &pawn, &floor).actor().unwrap();
    let second = trigger.make_footstep(&mut world, &pawn, &floor).actor().unwrap();
    assert_ne!(first, second);
    assert_eq!(world.pool().unwrap().len(), 2);

    let third = trigger.make_footstep(&mut world, &pawn, &floor).actor().unwrap();
    let fourth = trigger.make_footstep(&mut world, &pawn, &floor).actor().unwrap();
    assert_eq!(third, first);
    assert_eq!(fourth, second);
    assert_eq!(world.pool().unwrap().len(), 2);
    assert_eq!(world.actors().len(), 2);

    // Reused actors restart their countdown
    assert_eq!(world.actors().get(first).unwrap().release_timer().remaining(), Some(10.0));
}

#[test]
fn test_idle_actor_preferred() {
    let settings = settings(2);
    let mut world = world(&settings);
    let short = character(&settings, 1.0);
    let long = character(&settings, 10.0);
    let floor = Floor::of(CONCRETE);
    let trigger = FootstepTrigger::new(&settings);

    let a = trigger.make_footstep(&mut world, &short, &floor).actor().unwrap();
    let b = trigger.make_footstep(&mut world, &long, &floor).actor().unwrap();
    world.tick(1.0);
    assert!(!world.actors().get(a).unwrap().is_active());
    assert!(world.actors().get(b).unwrap().is_active());

    let c = trigger.make_footstep(&mut world, &long, &floor).actor().unwrap();
    assert_eq!(c, a);
}

#[test]
fn test_destroyed_actor_is_purged() {
    let settings = settings(1);
    let mut world = world(&settings);
    let pawn = character(&settings, 10.0);
    let floor = Floor::of(CONCRETE);
    let trigger = FootstepTrigger::new(&settings);

    let first = trigger.make_footstep(&mut world, &pawn, &floor).actor().unwrap();
    assert!(world.actors_mut().destroy(first));

    let second = trigger.make_footstep(&mut world, &pawn, &floor).actor().unwrap();
    assert_ne!(first, second);
    assert!(!world.actors().is_alive(first));
    assert_eq!(world.pool().unwrap().handles(), &[second]);
}

#[test]
fn test_zero_lifespan_plays_one_frame() {
    let settings = settings(1);
    let mut world = world(&settings);
    let pawn = character(&settings, 0.0);
    let floor = Floor::of(CONCRETE);

    let handle = FootstepTrigger::new(&settings)
        .make_footstep(&mut world, &pawn, &floor)
        .actor()
        .unwrap();
    assert!(world.actors().get(handle).unwrap().is_active());

    assert_eq!(world.tick(0.016), 1);
    assert!(!world.actors().get(handle).unwrap().is_active());
}

#[test]
fn test_socket_trace_origin() {
    let settings = settings(1);
    let mut world = world(&settings);
    let pawn = character(&settings, 2.0);
    let floor = Floor::of(CONCRETE);
    let foot = Transform::from_position(Vec3::new(0.5, 0.2, 0.0));
    let mesh = Mesh::on(&pawn).with_socket("foot_l", foot);

    SurfaceFootstepNotify::new(&settings)
        .with_socket("foot_l")
        .notify(&mut world, &mesh, &floor);
    let query = floor.last_query().unwrap();
    assert_eq!(query.start, foot.position);
    let expected_end = foot.position + Vec3::NEG_Y * settings.trace_length();
    assert!((query.end - expected_end).length() < 1e-4);
    assert!(query.is_ignored(pawn.id));

    // Unknown socket falls back to the mesh origin
    SurfaceFootstepNotify::new(&settings)
        .with_socket("foot_r")
        .notify(&mut world, &mesh, &floor);
    assert_eq!(floor.last_query().unwrap().start, pawn.location);
}

#[test]
fn test_trigger_traces_down_from_owner() {
    let settings = settings(1);
    let mut world = world(&settings);
    let mut pawn = character(&settings, 2.0);
    let ignored = ActorId::new(55);
    if let Some(component) = pawn.component.as_mut() {
        component.set_trace_length(10.0);
        component.set_actors_to_ignore(&[ignored]);
    }
    let floor = Floor::of(CONCRETE);

    FootstepTrigger::new(&settings).make_footstep(&mut world, &pawn, &floor);
    let query = floor.last_query().unwrap();
    assert_eq!(query.start, pawn.location);
    assert_eq!(query.end, pawn.location + Vec3::new(0.0, -10.0, 0.0));
    assert!(query.is_ignored(pawn.id));
    assert!(query.is_ignored(ignored));
    assert_eq!(query.object_types, settings.object_type_mask());
}

#[test]
fn test_local_player_plays_2d() {
    let settings = settings(2);
    let mut world = world(&settings);
    let mut pawn = character(&settings, 2.0);
    pawn.local = true;
    let floor = Floor::of(CONCRETE);

    let handle = FootstepTrigger::new(&settings)
        .make_footstep(&mut world, &pawn, &floor)
        .actor()
        .unwrap();
    let audio = world.actors().get(handle).unwrap().audio();
    assert!(!audio.is_spatialized());
    assert!(audio.is_ui_sound());
}

#[test]
fn test_debug_output_does_not_change_outcome() {
    init_logging();
    let settings = settings(1);
    let mut world = world(&settings);
    let mut pawn = character(&settings, 2.0);
    if let Some(component) = pawn.component.as_mut() {
        component.set_show_debug(true);
    }
    let floor = Floor::of(CONCRETE);

    let outcome = SurfaceFootstepNotify::new(&settings).notify(&mut world, &Mesh::on(&pawn), &floor);
    assert!(outcome.is_spawned());
}

#[test]
fn test_destroy_pool_tears_down_actors() {
    let settings = settings(3);
    let mut world = world(&settings);
    let pawn = character(&settings, 10.0);
    let floor = Floor::of(CONCRETE);
    let trigger = FootstepTrigger::new(&settings);

    for _ in 0..3 {
        trigger.make_footstep(&mut world, &pawn, &floor);
    }
    assert_eq!(world.actors().active_count(), 3);

    assert_eq!(world.destroy_footstep_pool(), 3);
    assert!(world.actors().is_empty());
    assert_eq!(world.destroy_footstep_pool(), 0);

    // The pool regrows on the next footstep
    assert!(trigger.make_footstep(&mut world, &pawn, &floor).is_spawned());
}
