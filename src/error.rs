use thiserror::Error;

/// Errors caused by building or mutating a path with invalid data.
///
/// The panicking entry points (`new`, `set_path`, `move_points`, ...) report these
/// through their panic message. The `try_` variants return them instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    /// Not enough waypoints to form a segment.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    /// The waypoint at `index` coincides with the waypoint after it.
    #[error("points {index} and {} are coincident", .index + 1)]
    CoincidentPoints { index: usize },

    /// A point or segment index is outside the path.
    #[error("index {index} is out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A range of points or radii does not fit in the path.
    #[error("range {start}..{} exceeds the limit {limit}", .start + .count)]
    RangeOutOfBounds {
        start: usize,
        count: usize,
        limit: usize,
    },

    /// A radius is negative or NaN.
    #[error("invalid radius {radius} at segment {index} (must be >= 0)")]
    NegativeRadius { index: usize, radius: f64 },

    /// The number of radii does not match the number of segments.
    #[error("radius count mismatch: expected {expected}, got {actual}")]
    RadiusCountMismatch { expected: usize, actual: usize },
}

impl PathError {
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub fn range_out_of_bounds(start: usize, count: usize, limit: usize) -> Self {
        Self::RangeOutOfBounds {
            start,
            count,
            limit,
        }
    }

    /// Check if the error comes from a waypoint list rather than a radius.
    pub fn is_point_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPoints { .. } | Self::CoincidentPoints { .. }
        )
    }

    /// Check if the error comes from a radius value or radius list.
    pub fn is_radius_error(&self) -> bool {
        matches!(
            self,
            Self::NegativeRadius { .. } | Self::RadiusCountMismatch { .. }
        )
    }
}

/// Result type for path construction and mutation.
pub type Result<T> = std::result::Result<T, PathError>;

/// Check that a radius is usable as a tube radius.
pub(crate) fn check_radius(index: usize, radius: f64) -> Result<()> {
    // NaN fails the comparison as well.
    if radius >= 0.0 {
        Ok(())
    } else {
        Err(PathError::NegativeRadius { index, radius })
    }
}
