//! Surface colliders: shape, placement and what a footstep trace reports

use crate::error::{PhysicsError, Result};
use crate::layers;
use footfall::assets::PhysicalMaterial;
use footfall::settings::ObjectType;
use footfall_core::ActorId;
use footfall_math::{Quat, Vec3};
use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Friction used when a collider has no simple material
const DEFAULT_FRICTION: f32 = 0.7;

/// Handle to a surface collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub(crate) rapier::ColliderHandle);

impl SurfaceHandle {
    pub fn from_raw(handle: rapier::ColliderHandle) -> Self {
        Self(handle)
    }

    pub fn raw(&self) -> rapier::ColliderHandle {
        self.0
    }
}

/// Collision shape of a surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceShape {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
    /// Capsule aligned along Y
    CapsuleY { half_height: f32, radius: f32 },
    /// Per-face collision, e.g. terrain or level geometry
    TriMesh {
        vertices: Vec<Vec3>,
        indices: Vec<[u32; 3]>,
    },
}

impl SurfaceShape {
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Box {
            half_extents: Vec3::new(hx, hy, hz),
        }
    }

    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    pub fn capsule(half_height: f32, radius: f32) -> Self {
        Self::CapsuleY {
            half_height,
            radius,
        }
    }

    /// Two triangles spanning a horizontal square of `half_size` at y = 0
    pub fn quad(half_size: f32) -> Self {
        Self::TriMesh {
            vertices: vec![
                Vec3::new(-half_size, 0.0, -half_size),
                Vec3::new(half_size, 0.0, -half_size),
                Vec3::new(half_size, 0.0, half_size),
                Vec3::new(-half_size, 0.0, half_size),
            ],
            indices: vec![[0, 2, 1], [0, 3, 2]],
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |value: f32| value.is_finite() && value > 0.0;
        match self {
            Self::Box { half_extents } => {
                if !(positive(half_extents.x) && positive(half_extents.y) && positive(half_extents.z)) {
                    return Err(PhysicsError::InvalidShape(format!(
                        "box half extents must be positive, got {:?}",
                        half_extents
                    )));
                }
            }
            Self::Sphere { radius } => {
                if !positive(*radius) {
                    return Err(PhysicsError::InvalidShape(format!(
                        "sphere radius must be positive, got {}",
                        radius
                    )));
                }
            }
            Self::CapsuleY {
                half_height,
                radius,
            } => {
                if !positive(*radius) || !half_height.is_finite() || *half_height < 0.0 {
                    return Err(PhysicsError::InvalidShape(format!(
                        "capsule needs a positive radius and non-negative half height, got {} / {}",
                        radius, half_height
                    )));
                }
            }
            Self::TriMesh { vertices, indices } => {
                if vertices.is_empty() || indices.is_empty() {
                    return Err(PhysicsError::InvalidShape("empty triangle mesh".to_string()));
                }
                let count = vertices.len() as u32;
                if indices.iter().flatten().any(|index| *index >= count) {
                    return Err(PhysicsError::InvalidShape(format!(
                        "triangle index out of range for {} vertices",
                        count
                    )));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn to_rapier(&self) -> rapier::SharedShape {
        match self {
            Self::Box { half_extents } => {
                rapier::SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            Self::Sphere { radius } => rapier::SharedShape::ball(*radius),
            Self::CapsuleY {
                half_height,
                radius,
            } => rapier::SharedShape::capsule_y(*half_height, *radius),
            Self::TriMesh { vertices, indices } => {
                let points: Vec<_> = vertices.iter().map(|v| to_point(*v)).collect();
                rapier::SharedShape::trimesh(points, indices.clone())
            }
        }
    }
}

/// Description of a surface collider to insert into a [`SurfaceWorld`]
///
/// [`SurfaceWorld`]: crate::world::SurfaceWorld
#[derive(Debug, Clone)]
pub struct SurfaceColliderDesc {
    pub shape: SurfaceShape,
    pub position: Vec3,
    pub rotation: Quat,
    pub object_type: ObjectType,
    /// Actor the collider belongs to, used for trace ignore lists
    pub owner: Option<ActorId>,
    pub owner_name: String,
    /// Name reported as the struck component
    pub component_name: String,
    /// Material of the simplified body
    pub simple_material: Option<Arc<PhysicalMaterial>>,
    /// Material of the exact faces, reported only by complex traces
    pub complex_material: Option<Arc<PhysicalMaterial>>,
    pub is_sensor: bool,
}

impl SurfaceColliderDesc {
    pub fn new(shape: SurfaceShape) -> Self {
        Self {
            shape,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            object_type: ObjectType::WorldStatic,
            owner: None,
            owner_name: String::new(),
            component_name: String::from("Collision"),
            simple_material: None,
            complex_material: None,
            is_sensor: false,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_object_type(mut self, object_type: ObjectType) -> Self {
        self.object_type = object_type;
        self
    }

    pub fn with_owner(mut self, owner: ActorId, name: impl Into<String>) -> Self {
        self.owner = Some(owner);
        self.owner_name = name.into();
        self
    }

    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    pub fn with_material(mut self, material: Arc<PhysicalMaterial>) -> Self {
        self.simple_material = Some(material);
        self
    }

    pub fn with_complex_material(mut self, material: Arc<PhysicalMaterial>) -> Self {
        self.complex_material = Some(material);
        self
    }

    pub fn with_sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    /// Build a Rapier collider builder
    pub(crate) fn to_rapier_builder(&self) -> rapier::ColliderBuilder {
        let (friction, restitution) = self
            .simple_material
            .as_ref()
            .map_or((DEFAULT_FRICTION, 0.0), |m| (m.friction, m.restitution));

        rapier::ColliderBuilder::new(self.shape.to_rapier())
            .position(to_isometry(self.position, self.rotation))
            .sensor(self.is_sensor)
            .friction(friction)
            .restitution(restitution)
            .collision_groups(layers::surface_groups(self.object_type))
            .user_data(self.owner.map_or(0, |owner| owner.raw() as u128))
    }
}

pub(crate) fn to_point(v: Vec3) -> rapier::Point<f32> {
    rapier::Point::new(v.x, v.y, v.z)
}

pub(crate) fn to_vector(v: Vec3) -> rapier::Vector<f32> {
    rapier::Vector::new(v.x, v.y, v.z)
}

pub(crate) fn from_vector(v: rapier::Vector<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub(crate) fn to_isometry(position: Vec3, rotation: Quat) -> rapier::Isometry<f32> {
    rapier::Isometry::from_parts(
        rapier::Translation::new(position.x, position.y, position.z),
        UnitQuaternion::from_quaternion(Quaternion::new(rotation.w, rotation.x, rotation.y, rotation.z)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use footfall::assets::SurfaceType;

    #[test]
    fn test_shape_validation() {
        assert!(SurfaceShape::cuboid(1.0, 0.1, 1.0).validate().is_ok());
        assert!(SurfaceShape::cuboid(1.0, 0.0, 1.0).validate().is_err());
        assert!(SurfaceShape::sphere(-1.0).validate().is_err());
        assert!(SurfaceShape::capsule(0.0, 0.5).validate().is_ok());
        assert!(SurfaceShape::quad(5.0).validate().is_ok());

        let broken = SurfaceShape::TriMesh {
            vertices: vec![Vec3::ZERO, Vec3::X],
            indices: vec![[0, 1, 2]],
        };
        assert!(matches!(broken.validate(), Err(PhysicsError::InvalidShape(_))));
    }

    #[test]
    fn test_builder_uses_material_and_owner() {
        let material = Arc::new(
            PhysicalMaterial::new("PM_Ice", SurfaceType::new(4))
                .with_friction(0.05)
                .with_restitution(0.1),
        );
        let desc = SurfaceColliderDesc::new(SurfaceShape::cuboid(1.0, 1.0, 1.0))
            .with_owner(ActorId::new(12), "Rink")
            .with_material(material);

        let collider = desc.to_rapier_builder().build();
        assert_eq!(collider.friction(), 0.05);
        assert_eq!(collider.restitution(), 0.1);
        assert_eq!(collider.user_data, 12);
    }

    #[test]
    fn test_isometry_keeps_rotation() {
        let rotation = Quat::from_rotation_y(1.0);
        let iso = to_isometry(Vec3::new(1.0, 2.0, 3.0), rotation);
        assert!((iso.rotation.angle() - 1.0).abs() < 1e-5);
        assert_eq!(iso.translation.vector, to_vector(Vec3::new(1.0, 2.0, 3.0)));
    }
}
