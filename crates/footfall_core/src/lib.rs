//! # footfall_core - Footstep System Core
//!
//! Zero-dependency primitives shared by the footstep crates:
//! - **Handles**: generational references that can be held weakly and
//!   checked for liveness before use
//! - **Actor ids**: stable identities for scene actors (owners, hit actors,
//!   ignore lists)

pub mod handle;
pub mod id;

pub use handle::*;
pub use id::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::handle::{Handle, HandleAllocator, HandleMap};
    pub use crate::id::ActorId;
}
