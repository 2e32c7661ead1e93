use crate::ShapeId;
use glint_math::MathError;
use thiserror::Error;

/// Errors raised while assembling a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("shape {0:?} is not a group")]
    NotAGroup(ShapeId),

    #[error("shape {0:?} already has a parent")]
    AlreadyParented(ShapeId),

    #[error("shape {0:?} does not exist in this arena")]
    UnknownShape(ShapeId),

    #[error("shape {0:?} cannot contain itself")]
    SelfReference(ShapeId),

    #[error("area light needs at least one sample along each edge")]
    EmptyLightGrid,

    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

/// Result type for scene assembly.
pub type SceneResult<T> = Result<T, SceneError>;
