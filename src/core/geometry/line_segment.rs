use rstar::{PointDistance, RTreeObject, AABB};

use super::vector::{Vector3, VectorExt};

/// Calculate the nearest point on the line segment from `start` to `end`.
///
/// A zero-length segment returns `start`.
pub fn nearest_point_on_segment(point: Vector3, start: Vector3, end: Vector3) -> Vector3 {
    let segment = end - start;
    let length_2 = segment.length_squared();
    if length_2 == 0.0 {
        return start;
    }
    let t = ((point - start).dot(segment) / length_2).clamp(0.0, 1.0);
    start + segment * t
}

/// Calculate the distance from the point to the line segment.
pub fn point_to_segment_distance(point: Vector3, start: Vector3, end: Vector3) -> f64 {
    point.distance(nearest_point_on_segment(point, start, end))
}

/// Representation of a 3D line segment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineSegment {
    pub start: Vector3,
    pub end: Vector3,
}

impl LineSegment {
    /// Create a line segment from two points.
    pub fn new(start: Vector3, end: Vector3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Get the unit direction from start to end, or zero for a degenerate segment.
    pub fn direction(&self) -> Vector3 {
        (self.end - self.start).normalized()
    }

    /// Calculate the perpendicular projection of the point on the segment, clamped to its ends.
    pub fn get_projection(&self, point: Vector3) -> Vector3 {
        nearest_point_on_segment(point, self.start, self.end)
    }

    /// Calculate the distance from the point to the segment.
    pub fn get_distance(&self, point: Vector3) -> f64 {
        point_to_segment_distance(point, self.start, self.end)
    }
}

impl RTreeObject for LineSegment {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.start.to_array(), self.end.to_array())
    }
}

impl PointDistance for LineSegment {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let point = Vector3::from_array(*point);
        point.distance_squared(self.get_projection(point))
    }
}
