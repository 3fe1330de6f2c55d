//! Object types as rapier interaction groups
//!
//! A surface collider is a member of exactly its object type's group and
//! accepts every query. A footstep trace is a member of every group and
//! filters on the object types it wants, so a hit requires the collider's
//! type to be in the trace's mask.

use footfall::settings::{ObjectType, ObjectTypeMask};
use rapier3d::prelude as rapier;

/// Groups for a surface collider of `object_type`
pub fn surface_groups(object_type: ObjectType) -> rapier::InteractionGroups {
    rapier::InteractionGroups::new(
        rapier::Group::from_bits_truncate(object_type.bit()),
        rapier::Group::ALL,
    )
}

/// Groups for a trace that may hit the object types in `mask`
pub fn query_groups(mask: ObjectTypeMask) -> rapier::InteractionGroups {
    rapier::InteractionGroups::new(
        rapier::Group::ALL,
        rapier::Group::from_bits_truncate(mask.bits()),
    )
}
