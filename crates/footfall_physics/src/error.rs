//! Error types for surface tracing

use crate::collider::SurfaceHandle;
use thiserror::Error;

/// Surface world errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Collider not found
    #[error("Surface collider not found: {0:?}")]
    ColliderNotFound(SurfaceHandle),

    /// Shape creation failed
    #[error("Failed to create collision shape: {0}")]
    InvalidShape(String),
}

/// Result type for surface world operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
