use thiserror::Error;

/// Rejected loader configuration.
///
/// Every constant the loaders consume is checked once at construction; the
/// per-tick pipeline itself never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("shape radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("morph cycle length must be non-zero")]
    ZeroCycleLength,

    #[error("morph cycle needs at least one shape")]
    EmptyShapeSet,

    #[error("point cloud needs at least one point")]
    ZeroPointCount,

    #[error("ellipsoid stretch factors must be positive and finite, got {0:?}")]
    InvalidStretch([f32; 3]),

    #[error("camera distance must be positive and finite, got {0}")]
    InvalidCameraDistance(f32),

    #[error("{name} threshold must be non-negative and finite, got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },

    #[error("tick step and tick interval must be non-zero")]
    ZeroTick,

    #[error("tree depth must be between 1 and {max}, got {depth}")]
    InvalidTreeDepth { depth: u32, max: u32 },

    #[error("tree needs at least one root branch")]
    NoTreeRoots,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
