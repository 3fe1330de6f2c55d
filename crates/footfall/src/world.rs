//! Per-world footstep subsystem
//!
//! One [`FootstepWorld`] exists per world/session. It owns the footstep
//! actors, the pool that recycles them, the diagnostics log and the random
//! source used for effect selection. Worlds running as a dedicated server
//! never render or play effects, so they get no pool at all.

use crate::diagnostics::MessageLog;
use crate::pool::FootstepPool;
use crate::settings::FootstepSettings;
use crate::store::ActorStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Network role of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetMode {
    #[default]
    Standalone,
    ListenServer,
    Client,
    DedicatedServer,
}

impl NetMode {
    /// Whether the world has no local presentation at all
    pub fn is_server_only(self) -> bool {
        self == Self::DedicatedServer
    }
}

/// Footstep state for one world
pub struct FootstepWorld {
    pub(crate) settings: Arc<FootstepSettings>,
    pub(crate) net_mode: NetMode,
    pub(crate) actors: ActorStore,
    pub(crate) pool: Option<FootstepPool>,
    pub(crate) messages: MessageLog,
    pub(crate) rng: StdRng,
}

impl FootstepWorld {
    pub fn new(settings: Arc<FootstepSettings>, net_mode: NetMode) -> Self {
        let pool = if net_mode.is_server_only() {
            log::debug!("Dedicated server world: no footstep pool");
            None
        } else {
            Some(FootstepPool::new(settings.pool_size()))
        };

        Self {
            settings,
            net_mode,
            actors: ActorStore::new(),
            pool,
            messages: MessageLog::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic effect selection (tests, replays)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn settings(&self) -> &Arc<FootstepSettings> {
        &self.settings
    }

    pub fn net_mode(&self) -> NetMode {
        self.net_mode
    }

    pub fn pool(&self) -> Option<&FootstepPool> {
        self.pool.as_ref()
    }

    pub fn actors(&self) -> &ActorStore {
        &self.actors
    }

    /// Host access to the actors, e.g. to destroy one out of band
    pub fn actors_mut(&mut self) -> &mut ActorStore {
        &mut self.actors
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }

    /// Advance release timers. Returns how many actors were released.
    pub fn tick(&mut self, delta_time: f32) -> usize {
        self.actors.tick(delta_time)
    }

    /// Destroy every pooled actor. Safe to call repeatedly and on worlds
    /// without a pool.
    pub fn destroy_footstep_pool(&mut self) -> usize {
        match self.pool.as_mut() {
            Some(pool) => {
                let destroyed = pool.release_all(&mut self.actors);
                if destroyed > 0 {
                    log::debug!("Destroyed {} pooled footstep actors", destroyed);
                }
                destroyed
            }
            None => 0,
        }
    }
}

impl Drop for FootstepWorld {
    fn drop(&mut self) {
        self.destroy_footstep_pool();
    }
}

impl std::fmt::Debug for FootstepWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FootstepWorld")
            .field("net_mode", &self.net_mode)
            .field("actors", &self.actors.len())
            .field("pool", &self.pool.as_ref().map(FootstepPool::len))
            .field("messages", &self.messages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedicated_server_has_no_pool() {
        let world = FootstepWorld::new(Arc::new(FootstepSettings::new()), NetMode::DedicatedServer);
        assert!(world.pool().is_none());
        let client = FootstepWorld::new(Arc::new(FootstepSettings::new()), NetMode::Client);
        assert_eq!(client.pool().map(FootstepPool::capacity), Some(20));
    }

    #[test]
    fn test_pool_capacity_follows_settings() {
        let settings = Arc::new(FootstepSettings::new().with_pool_size(-5));
        let world = FootstepWorld::new(settings, NetMode::Standalone);
        assert_eq!(world.pool().map(FootstepPool::capacity), Some(1));
    }

    #[test]
    fn test_destroy_pool_is_idempotent() {
        let mut world = FootstepWorld::new(Arc::new(FootstepSettings::new()), NetMode::Standalone);
        let FootstepWorld { pool, actors, .. } = &mut world;
        let pool = pool.as_mut().unwrap();
        pool.try_grow(actors);
        pool.try_grow(actors);

        assert_eq!(world.destroy_footstep_pool(), 2);
        assert_eq!(world.destroy_footstep_pool(), 0);
        assert!(world.actors().is_empty());

        let mut server = FootstepWorld::new(Arc::new(FootstepSettings::new()), NetMode::DedicatedServer);
        assert_eq!(server.destroy_footstep_pool(), 0);
    }
}
