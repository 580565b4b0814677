//! Generic queries over any [`PathQueryable`] path.
//!
//! The queries visit the segments in order and read every per segment value
//! through the path's [`PathQueryable`] implementation, so the same code serves
//! plain paths and pathways with a single radius or a radius per segment.

use crate::core::geometry::{
    scalar::{clamp, modulo},
    vector::{Vector3, VectorExt},
};

use super::{PathQueryable, SegmentProjection};

/// Result of mapping a point to the nearest point on a path.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointToPathMapping {
    pub point_on_centerline: Vector3,
    /// Centerline point moved towards the query point by the radius.
    pub point_on_boundary: Vector3,
    pub radius: f64,
    pub tangent: Vector3,
    pub segment_index: usize,
    /// Signed distance to the tube boundary, negative inside the tube.
    pub distance_point_to_path: f64,
    pub distance_point_to_centerline: f64,
    /// Distance along the path from its start to `point_on_centerline`.
    pub distance_on_path: f64,
    pub distance_on_segment: f64,
}

impl Default for PointToPathMapping {
    fn default() -> Self {
        Self {
            point_on_centerline: Vector3::ZERO,
            point_on_boundary: Vector3::ZERO,
            radius: 0.0,
            tangent: Vector3::ZERO,
            segment_index: 0,
            distance_point_to_path: f64::INFINITY,
            distance_point_to_centerline: f64::INFINITY,
            distance_on_path: 0.0,
            distance_on_segment: 0.0,
        }
    }
}

impl PointToPathMapping {
    /// Overwrite every field with the projection onto a segment.
    pub(crate) fn update(
        &mut self,
        point: Vector3,
        segment_index: usize,
        distance_before_segment: f64,
        projection: &SegmentProjection,
    ) {
        let towards_point = (point - projection.point_on_centerline).normalized();
        self.point_on_centerline = projection.point_on_centerline;
        self.point_on_boundary = projection.point_on_centerline + towards_point * projection.radius;
        self.radius = projection.radius;
        self.tangent = projection.tangent;
        self.segment_index = segment_index;
        self.distance_point_to_path = projection.distance_point_to_path;
        self.distance_point_to_centerline = projection.distance_point_to_path + projection.radius;
        self.distance_on_path = distance_before_segment + projection.distance_on_segment;
        self.distance_on_segment = projection.distance_on_segment;
    }
}

/// Result of mapping a distance along a path to a point on it.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceToPathMapping {
    pub point_on_centerline: Vector3,
    pub tangent: Vector3,
    pub radius: f64,
    pub segment_index: usize,
    /// The query distance after wrapping or clamping.
    pub distance_on_path: f64,
    pub distance_on_segment: f64,
}

/// Map the point to the nearest point on the path.
///
/// "Nearest" is measured to the tube boundary, so on a pathway with varying radii a
/// wide segment can win over a closer narrow one. When several segments are equally
/// near the first one wins.
///
/// # Panics
///
/// Panics if the path has no segment.
pub fn map_point_to_path_alike<P>(path: &P, point: Vector3) -> PointToPathMapping
where
    P: PathQueryable + ?Sized,
{
    assert!(path.is_valid(), "cannot query a path without segments");

    let mut mapping = PointToPathMapping::default();
    let mut distance_before_segment = 0.0;
    let mut min_distance = f64::INFINITY;

    for segment_index in 0..path.segment_count() {
        let projection = path.project_onto_segment(segment_index, point);
        if projection.distance_point_to_path < min_distance {
            min_distance = projection.distance_point_to_path;
            mapping.update(point, segment_index, distance_before_segment, &projection);
        }
        distance_before_segment += path.segment_length(segment_index);
    }

    mapping
}

/// Map the distance along the path to a point on it.
///
/// The distance wraps around on cyclic paths and is clamped to [0, length] on open ones.
///
/// # Panics
///
/// Panics if the path has no segment.
pub fn map_distance_to_path_alike<P>(path: &P, distance: f64) -> DistanceToPathMapping
where
    P: PathQueryable + ?Sized,
{
    assert!(path.is_valid(), "cannot query a path without segments");

    let distance_on_path = normalize_path_distance(path, distance);

    let last_segment = path.segment_count() - 1;
    let mut segment_index = 0;
    let mut remaining = distance_on_path;
    while segment_index < last_segment {
        let segment_length = path.segment_length(segment_index);
        if remaining <= segment_length {
            break;
        }
        remaining -= segment_length;
        segment_index += 1;
    }

    let sample = path.sample_segment(segment_index, remaining);
    DistanceToPathMapping {
        point_on_centerline: sample.point,
        tangent: sample.tangent,
        radius: sample.radius,
        segment_index,
        distance_on_path,
        distance_on_segment: remaining,
    }
}

/// Wrap the distance on cyclic paths, clamp it on open ones.
fn normalize_path_distance<P>(path: &P, distance: f64) -> f64
where
    P: PathQueryable + ?Sized,
{
    let length = path.length();
    if path.is_cyclic() {
        modulo(distance, length)
    } else {
        clamp(distance, 0.0, length)
    }
}
