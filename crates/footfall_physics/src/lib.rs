//! Footfall Physics - Rapier 3D Surface Tracing
//!
//! A [`SurfaceTracer`](footfall::trace::SurfaceTracer) backed by a Rapier
//! query pipeline. Colliders carry the object type, owning actor and
//! physical materials a footstep trace needs to classify the surface.
//!
//! # Example
//!
//! ```ignore
//! use footfall_physics::prelude::*;
//!
//! let mut surfaces = SurfaceWorld::new();
//! surfaces.add_collider(
//!     SurfaceColliderDesc::new(SurfaceShape::cuboid(50.0, 0.5, 50.0))
//!         .at(Vec3::new(0.0, -0.5, 0.0))
//!         .with_material(concrete),
//! )?;
//! surfaces.update();
//!
//! notify.notify(&mut footsteps, &mesh, &surfaces);
//! ```

pub mod collider;
pub mod error;
pub mod layers;
pub mod world;

pub mod prelude {
    //! Common imports for surface tracing
    pub use crate::collider::{SurfaceColliderDesc, SurfaceHandle, SurfaceShape};
    pub use crate::error::{PhysicsError, Result};
    pub use crate::layers::{query_groups, surface_groups};
    pub use crate::world::SurfaceWorld;
}

pub use prelude::*;
