//! Error handling for GlueKit
//!
//! Provides the error types used by the trajectory preview:
//! - Trajectory errors (trail manager and view setter API)
//! - Render errors (compositing a frame or a single trail segment)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Trajectory error type
///
/// Represents errors raised while feeding the trail or preparing the
/// background frame it is drawn over.
#[derive(Error, Debug, Clone)]
pub enum TrajectoryError {
    /// Trail capacity must hold at least one sample
    #[error("Trail capacity must be > 0")]
    ZeroCapacity,

    /// Frame has no pixels
    #[error("Invalid frame size {width}x{height}")]
    InvalidFrameSize {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
    },

    /// An image asset (placeholder, marker icon) could not be loaded
    #[error("Failed to load image asset {path}: {reason}")]
    AssetLoad {
        /// Path of the asset that failed to load.
        path: String,
        /// The reason the load failed.
        reason: String,
    },
}

/// Render error type
///
/// Raised while compositing a single display tick. Segment-level render
/// errors are logged and skipped by the renderer; they never abort a tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Drawing surface could not be allocated
    #[error("Cannot allocate {width}x{height} drawing surface")]
    SurfaceAllocation {
        /// Surface width in pixels.
        width: u32,
        /// Surface height in pixels.
        height: u32,
    },

    /// A point lies outside the frame
    #[error("Point ({x}, {y}) outside {width}x{height} frame")]
    OutOfBounds {
        /// X coordinate of the point.
        x: i32,
        /// Y coordinate of the point.
        y: i32,
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
    },

    /// The stroke path for a segment could not be built
    #[error("Degenerate stroke path in segment {segment}")]
    DegeneratePath {
        /// Index of the segment within the snapshot.
        segment: usize,
    },
}

/// Main error type for GlueKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Trajectory error
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),

    /// Render error
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl Error {
    /// Check if this is a render error
    pub fn is_render_error(&self) -> bool {
        matches!(self, Error::Render(_))
    }

    /// Check if this is a trajectory error
    pub fn is_trajectory_error(&self) -> bool {
        matches!(self, Error::Trajectory(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trajectory_error_display() {
        let err = TrajectoryError::InvalidFrameSize {
            width: 0,
            height: 450,
        };
        assert_eq!(err.to_string(), "Invalid frame size 0x450");

        let err = TrajectoryError::AssetLoad {
            path: "logo.png".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load image asset logo.png: not found"
        );
    }

    #[test]
    fn test_render_error_display() {
        let err = RenderError::OutOfBounds {
            x: -3,
            y: 12,
            width: 800,
            height: 450,
        };
        assert_eq!(err.to_string(), "Point (-3, 12) outside 800x450 frame");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = RenderError::DegeneratePath { segment: 2 }.into();
        assert!(err.is_render_error());
        assert!(!err.is_trajectory_error());

        let err: Error = TrajectoryError::ZeroCapacity.into();
        assert!(err.is_trajectory_error());
        assert_eq!(err.to_string(), "Trail capacity must be > 0");
    }
}
