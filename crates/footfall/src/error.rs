//! Error types for the footstep system

use crate::settings::FootstepCategory;
use thiserror::Error;

/// Footstep system errors
#[derive(Debug, Error)]
pub enum FootstepError {
    /// Reading a configuration or catalog file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or catalog document is malformed
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings failed validation
    #[error("Invalid footstep settings: {0}")]
    InvalidSettings(String),

    /// No footstep categories are registered
    #[error("No footstep categories are registered in the footstep settings")]
    NoCategories,

    /// The category is not registered in the settings
    #[error("Footstep category '{0}' is not registered in the footstep settings")]
    UnknownCategory(FootstepCategory),

    /// The world has no footstep pool (dedicated server or torn down)
    #[error("No footstep pool exists in this world")]
    MissingPool,
}

/// Result type for footstep operations
pub type Result<T> = std::result::Result<T, FootstepError>;
