use super::geometry::vector::Vector3;

pub mod index;
pub mod polyline;
pub mod query;
pub mod segment_radii;
pub mod single_radius;

#[cfg(feature = "serde")]
pub mod description;

use query::{
    map_distance_to_path_alike, map_point_to_path_alike, DistanceToPathMapping,
    PointToPathMapping,
};

/// Trait for paths made of straight segments.
///
/// Segment indices must be smaller than [`SegmentedPath::segment_count`].
/// Every method taking a segment index panics otherwise.
pub trait SegmentedPath {
    /// Check if the path has at least one segment.
    fn is_valid(&self) -> bool;

    /// Check if the last point connects back to the first one.
    fn is_cyclic(&self) -> bool;

    /// Get the total length of the path.
    fn length(&self) -> f64;

    fn segment_count(&self) -> usize;

    fn segment_length(&self, segment_index: usize) -> f64;

    fn segment_start(&self, segment_index: usize) -> Vector3;

    fn segment_end(&self, segment_index: usize) -> Vector3;

    /// Calculate the distance along the segment to the nearest point on it,
    /// in the range of [0, segment length].
    fn map_point_to_segment_distance(&self, segment_index: usize, point: Vector3) -> f64;

    /// Calculate the point at the distance along the segment.
    ///
    /// The distance is clamped to [0, segment length].
    fn map_segment_distance_to_point(&self, segment_index: usize, distance: f64) -> Vector3;

    /// Get the unit tangent of the segment.
    ///
    /// The tangent is constant along a segment, the distance is ignored.
    fn map_segment_distance_to_tangent(&self, segment_index: usize, distance: f64) -> Vector3;

    /// Calculate the point and the tangent at the distance along the segment.
    fn map_distance_to_segment_point_and_tangent(
        &self,
        segment_index: usize,
        distance: f64,
    ) -> (Vector3, Vector3) {
        (
            self.map_segment_distance_to_point(segment_index, distance),
            self.map_segment_distance_to_tangent(segment_index, distance),
        )
    }

    /// Calculate the distance along the segment, the nearest point and the tangent in one pass.
    fn map_point_to_segment_distance_and_point_and_tangent(
        &self,
        segment_index: usize,
        point: Vector3,
    ) -> (f64, Vector3, Vector3);
}

/// Trait for segmented paths with a tube radius around the centerline.
pub trait SegmentedPathway: SegmentedPath {
    /// Get the radius at the distance along the segment.
    fn map_segment_distance_to_radius(&self, segment_index: usize, distance: f64) -> f64;

    /// Calculate the point, the tangent and the radius at the distance along the segment.
    fn map_distance_to_segment_point_and_tangent_and_radius(
        &self,
        segment_index: usize,
        distance: f64,
    ) -> (Vector3, Vector3, f64) {
        let (point, tangent) = self.map_distance_to_segment_point_and_tangent(segment_index, distance);
        (
            point,
            tangent,
            self.map_segment_distance_to_radius(segment_index, distance),
        )
    }
}

/// Projection of a point onto one segment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegmentProjection {
    /// Distance along the segment to the nearest centerline point.
    pub distance_on_segment: f64,
    /// Tube radius at the nearest point, 0 for paths without a radius.
    pub radius: f64,
    /// Signed distance from the point to the tube boundary.
    pub distance_point_to_path: f64,
    pub point_on_centerline: Vector3,
    pub tangent: Vector3,
}

/// Sample of a segment at a distance along it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegmentSample {
    pub point: Vector3,
    pub tangent: Vector3,
    pub radius: f64,
}

/// Per path type data extraction used by the generic queries in [`query`].
pub trait PathQueryable: SegmentedPath {
    /// Project the point onto the segment.
    fn project_onto_segment(&self, segment_index: usize, point: Vector3) -> SegmentProjection;

    /// Sample the segment at the distance along it.
    fn sample_segment(&self, segment_index: usize, distance: f64) -> SegmentSample;
}

/// Result of mapping a point to a whole path.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathProjection {
    /// Nearest point on the centerline.
    pub point: Vector3,
    /// Tangent of the segment containing `point`.
    pub tangent: Vector3,
    /// Signed distance to the tube boundary (negative inside).
    /// For a path without a radius this is the distance to the centerline.
    pub outside: f64,
}

/// Whole-path queries.
///
/// Implemented for every [`PathQueryable`] type.
pub trait Pathway {
    /// Map the point to the nearest point on the path.
    fn map_point_to_path(&self, point: Vector3) -> PathProjection;

    /// Map the distance along the path to a point.
    ///
    /// The distance wraps around on cyclic paths and is clamped to [0, length] otherwise.
    fn map_path_distance_to_point(&self, distance: f64) -> Vector3;

    /// Map the point to the distance along the path of its nearest point.
    fn map_point_to_path_distance(&self, point: Vector3) -> f64;

    /// Get the tangent at the distance along the path.
    fn map_path_distance_to_tangent(&self, distance: f64) -> Vector3;

    /// Get the tube radius at the distance along the path.
    fn map_path_distance_to_radius(&self, distance: f64) -> f64;

    /// Check if the point is strictly inside the tube around the path.
    fn is_inside_pathway(&self, point: Vector3) -> bool {
        self.map_point_to_path(point).outside < 0.0
    }
}

impl<P> Pathway for P
where
    P: PathQueryable + ?Sized,
{
    fn map_point_to_path(&self, point: Vector3) -> PathProjection {
        let mapping: PointToPathMapping = map_point_to_path_alike(self, point);
        PathProjection {
            point: mapping.point_on_centerline,
            tangent: mapping.tangent,
            outside: mapping.distance_point_to_path,
        }
    }

    fn map_path_distance_to_point(&self, distance: f64) -> Vector3 {
        map_distance_to_path_alike(self, distance).point_on_centerline
    }

    fn map_point_to_path_distance(&self, point: Vector3) -> f64 {
        map_point_to_path_alike(self, point).distance_on_path
    }

    fn map_path_distance_to_tangent(&self, distance: f64) -> Vector3 {
        map_distance_to_path_alike(self, distance).tangent
    }

    fn map_path_distance_to_radius(&self, distance: f64) -> f64 {
        let mapping: DistanceToPathMapping = map_distance_to_path_alike(self, distance);
        mapping.radius
    }
}

/// Build the extraction policy of a pathway from its segment queries.
pub(crate) fn project_onto_pathway_segment<P>(
    pathway: &P,
    segment_index: usize,
    point: Vector3,
) -> SegmentProjection
where
    P: SegmentedPathway + ?Sized,
{
    let (distance_on_segment, point_on_centerline, tangent) =
        pathway.map_point_to_segment_distance_and_point_and_tangent(segment_index, point);
    let radius = pathway.map_segment_distance_to_radius(segment_index, distance_on_segment);
    SegmentProjection {
        distance_on_segment,
        radius,
        distance_point_to_path: point.distance(point_on_centerline) - radius,
        point_on_centerline,
        tangent,
    }
}

pub(crate) fn sample_pathway_segment<P>(
    pathway: &P,
    segment_index: usize,
    distance: f64,
) -> SegmentSample
where
    P: SegmentedPathway + ?Sized,
{
    let (point, tangent, radius) =
        pathway.map_distance_to_segment_point_and_tangent_and_radius(segment_index, distance);
    SegmentSample {
        point,
        tangent,
        radius,
    }
}
