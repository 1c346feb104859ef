/// Error types for solid construction and STL exchange
use thiserror::Error;

use crate::solid::SolidKind;

/// Caller contract violations raised while building solids.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolidError {
    #[error("a box requires a transform with a position")]
    MissingTransform,

    #[error("{kind} expects {expected} vertices, got {actual}")]
    InvalidVertexCount {
        kind: SolidKind,
        expected: usize,
        actual: usize,
    },

    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("surface resolution must be at least 1x1, got {slices}x{stacks}")]
    InvalidResolution { slices: usize, stacks: usize },
}

/// Errors raised while reading STL data.
#[derive(Debug, Error)]
pub enum StlError {
    #[error("STL data ended early: needed {needed} bytes, found {found}")]
    Truncated { needed: usize, found: usize },

    #[error("malformed STL: {0}")]
    Malformed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
