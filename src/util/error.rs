//! Error types for voxfilt.

use crate::image::Extents;
use thiserror::Error;

/// Result alias for voxfilt operations.
pub type Result<T> = std::result::Result<T, VoxFiltError>;

/// Errors that can occur when filtering or comparing volumes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VoxFiltError {
    /// Two volumes have extents that cannot be combined by the operation.
    #[error("dimension mismatch ({reason}): {left} vs {right}")]
    DimensionMismatch {
        reason: &'static str,
        left: Extents,
        right: Extents,
    },
    /// An argument is outside the set of values the operation supports.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
    /// A required image was not supplied.
    #[error("image access: no {which} image supplied")]
    ImageAccess { which: &'static str },
    /// A required buffer was absent or empty.
    #[error("null pointer: {what}")]
    NullPointer { what: &'static str },
    /// A volume was requested with a zero extent.
    #[error("invalid extents: {nx}x{ny}x{nz}")]
    InvalidExtents { nx: usize, ny: usize, nz: usize },
    /// A sample buffer does not match the requested extents.
    #[error("buffer size mismatch: needed {needed}, got {got}")]
    BufferSize { needed: usize, got: usize },
    /// No comparator is registered under the requested name.
    #[error("unknown comparator: {name}")]
    UnknownComparator { name: String },
    /// Image decoding or encoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}

impl VoxFiltError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
