//! Footstep generated events

use crate::assets::SurfaceType;
use crate::settings::FootstepCategory;
use footfall_math::{Transform, Vec3};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Emitted after a footstep actor has been activated
#[derive(Debug, Clone, PartialEq)]
pub struct FootstepEvent {
    pub surface_type: SurfaceType,
    pub category: FootstepCategory,
    /// Where the effect was placed
    pub transform: Transform,
    /// Randomized volume (0 when no sound was chosen)
    pub volume: f32,
    /// Randomized pitch (0 when no sound was chosen)
    pub pitch: f32,
    /// The chosen sound's own volume multiplier (0 when no sound)
    pub sound_volume_multiplier: f32,
    /// The chosen sound's own pitch multiplier (0 when no sound)
    pub sound_pitch_multiplier: f32,
    /// Visual scale (zero when no visual was chosen)
    pub relative_scale: Vec3,
}

/// Identifier returned by [`FootstepEvents::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback type for footstep events
pub type FootstepCallback = Box<dyn Fn(&FootstepEvent) + Send + Sync>;

/// Multicast footstep notification
#[derive(Default)]
pub struct FootstepEvents {
    listeners: Vec<(ListenerId, FootstepCallback)>,
    next_id: u64,
}

impl FootstepEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&FootstepEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver to every listener in subscription order. A panicking listener
    /// is logged and does not stop delivery to the rest.
    pub fn broadcast(&self, event: &FootstepEvent) -> usize {
        let mut delivered = 0;
        for (id, listener) in &self.listeners {
            match catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(()) => delivered += 1,
                Err(_) => log::error!("Footstep listener {:?} panicked", id),
            }
        }
        delivered
    }
}

impl std::fmt::Debug for FootstepEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FootstepEvents")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
