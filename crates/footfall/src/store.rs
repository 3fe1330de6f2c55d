//! Host-side storage of footstep actors

use crate::actor::FootstepActor;
use footfall_core::{Handle, HandleMap};
use footfall_math::Transform;

/// Weak reference to a footstep actor
pub type ActorHandle = Handle<FootstepActor>;

/// Owns every footstep actor of a world.
///
/// Actors may be destroyed here at any time; handles held elsewhere (the
/// pool in particular) then simply stop resolving.
#[derive(Default)]
pub struct ActorStore {
    actors: HandleMap<FootstepActor>,
}

impl ActorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, transform: Transform) -> ActorHandle {
        let handle = self.actors.insert(FootstepActor::at(transform));
        log::trace!("Spawned footstep actor {:?}", handle);
        handle
    }

    /// Destroy an actor, cancelling its release timer first.
    /// Returns false if the handle was already stale.
    pub fn destroy(&mut self, handle: ActorHandle) -> bool {
        match self.actors.remove(handle) {
            Some(mut actor) => {
                actor.end_play();
                log::trace!("Destroyed footstep actor {:?}", handle);
                true
            }
            None => false,
        }
    }

    pub fn is_alive(&self, handle: ActorHandle) -> bool {
        self.actors.contains(handle)
    }

    pub fn get(&self, handle: ActorHandle) -> Option<&FootstepActor> {
        self.actors.get(handle)
    }

    pub fn get_mut(&mut self, handle: ActorHandle) -> Option<&mut FootstepActor> {
        self.actors.get_mut(handle)
    }

    /// Advance every actor's release countdown. Returns how many were released.
    pub fn tick(&mut self, delta_time: f32) -> usize {
        self.actors
            .iter_mut()
            .filter_map(|(_, actor)| actor.tick(delta_time).then_some(()))
            .count()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.actors.iter().filter(|(_, actor)| actor.is_active()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActorHandle, &FootstepActor)> {
        self.actors.iter()
    }
}
