/// Error types shared by the core library
use thiserror::Error;

/// Result type alias for core geometry operations.
pub type GeomResult<T> = Result<T, GeomError>;

/// Errors that can occur while building or parsing meshes.
#[derive(Debug, Error)]
pub enum GeomError {
    /// Requested side count is outside the supported range.
    #[error("side count must be between 3 and 36, got {0}")]
    InvalidSideCount(u32),

    /// A face produced a zero-length normal during normalization.
    #[error("degenerate face: zero-length normal")]
    DegenerateFace,

    /// OBJ text did not match the expected layout.
    #[error("invalid OBJ data: {0}")]
    InvalidObj(String),
}
