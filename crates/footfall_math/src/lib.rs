//! # footfall_math - Spatial Math
//!
//! The small set of spatial types the footstep system passes around:
//! positions and directions ([`Vec3`]), orientations ([`Quat`]) and full
//! placements ([`Transform`]).
//!
//! Conventions: right-handed, Y-up. Local forward is -Z, right is +X and
//! up is +Y, so "world down" is [`Vec3::NEG_Y`].

pub mod quaternion;
pub mod transform;
pub mod vector;

pub use quaternion::*;
pub use transform::*;
pub use vector::*;
