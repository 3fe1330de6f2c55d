//! Host scene capabilities the footstep system relies on

use crate::component::FootstepComponent;
use footfall_core::ActorId;
use footfall_math::{Transform, Vec3};

/// An actor in the host scene
pub trait SceneActor {
    fn actor_id(&self) -> ActorId;

    fn name(&self) -> &str;

    fn transform(&self) -> Transform;

    fn location(&self) -> Vec3 {
        self.transform().position
    }

    /// Whether a local player controls this actor as a pawn
    fn is_locally_controlled(&self) -> bool {
        false
    }

    /// Capability query: the footstep owner view of this actor, if it has one
    fn as_footstep_owner(&self) -> Option<&dyn FootstepOwner> {
        None
    }
}

/// An actor that produces footsteps through an attached component
pub trait FootstepOwner {
    fn footstep_component(&self) -> Option<&FootstepComponent>;
}

/// Skeletal mesh context handed to animation-driven triggers
pub trait FootstepMesh {
    /// World transform of the mesh component
    fn component_transform(&self) -> Transform;

    /// World transform of a named socket, if the mesh has it
    fn socket_transform(&self, socket: &str) -> Option<Transform>;

    /// The actor that owns the mesh
    fn owner(&self) -> Option<&dyn SceneActor>;
}
