//! Trace direction and origin resolution for footstep triggers

use crate::owner::FootstepMesh;
use footfall_math::{Quat, Transform, Vec3};
use serde::{Deserialize, Serialize};

/// Direction of the footstep trace relative to its origin's rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TraceDirection {
    #[default]
    Down,
    Up,
    Forward,
    Backward,
    Right,
    Left,
}

impl TraceDirection {
    /// Unit vector for this direction under `rotation`.
    /// Falls back to world down if the rotation is degenerate.
    pub fn resolve(self, rotation: Quat) -> Vec3 {
        let transform = Transform::IDENTITY.with_rotation(rotation);
        let direction = match self {
            Self::Down => -transform.up(),
            Self::Up => transform.up(),
            Self::Forward => transform.forward(),
            Self::Backward => -transform.forward(),
            Self::Right => transform.right(),
            Self::Left => -transform.right(),
        };
        direction.try_normalize().unwrap_or(Vec3::NEG_Y)
    }
}

/// Where a trace starts and which way it goes
#[derive(Debug, Clone, PartialEq)]
pub struct TraceOrigin {
    pub start: Vec3,
    pub direction: Vec3,
    /// The socket actually used, if any
    pub socket: Option<String>,
}

/// Resolve the trace origin on a mesh.
///
/// The socket is used only when one is named and present on the mesh;
/// otherwise the mesh component's own transform is used.
pub fn resolve_trace_origin(
    mesh: &dyn FootstepMesh,
    socket: Option<&str>,
    direction: TraceDirection,
) -> TraceOrigin {
    let socket_transform = socket
        .filter(|name| !name.is_empty())
        .and_then(|name| mesh.socket_transform(name).map(|t| (name, t)));

    match socket_transform {
        Some((name, transform)) => TraceOrigin {
            start: transform.position,
            direction: direction.resolve(transform.rotation),
            socket: Some(name.to_string()),
        },
        None => {
            let transform = mesh.component_transform();
            TraceOrigin {
                start: transform.position,
                direction: direction.resolve(transform.rotation),
                socket: None,
            }
        }
    }
}
