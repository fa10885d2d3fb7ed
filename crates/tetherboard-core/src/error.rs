//! Error types for the diagram core.

use crate::shapes::{LineId, ShapeId};
use thiserror::Error;

/// Lookup failures inside the registries.
///
/// These never escape the [`Diagram`](crate::Diagram) surface: stale ids
/// degrade to no-ops there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),
    #[error("Line not found: {0}")]
    LineNotFound(LineId),
}

/// Result type for registry operations.
pub type DiagramResult<T> = Result<T, DiagramError>;

/// Invalid tunables in a [`DiagramConfig`](crate::DiagramConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Shape size must be positive, got {0}")]
    ShapeSize(f64),
    #[error("Capture radii must satisfy 0 < hit ({hit}) < reattach ({reattach}) < capture ({capture})")]
    RadiusOrder { hit: f64, reattach: f64, capture: f64 },
    #[error("Line hit tolerance must not be negative, got {0}")]
    LineTolerance(f64),
}
