use tracing::debug;

use crate::core::geometry::vector::Vector3;
use crate::error::{check_radius, Result};

use super::{
    polyline::PolylineSegmentedPath, project_onto_pathway_segment, sample_pathway_segment,
    PathQueryable, SegmentProjection, SegmentSample, SegmentedPath, SegmentedPathway,
};

/// A pathway with the same radius around every segment.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "super::description::SingleRadiusDescription",
        into = "super::description::SingleRadiusDescription"
    )
)]
pub struct PolylineSegmentedPathwaySingleRadius {
    path: PolylineSegmentedPath,
    radius: f64,
}

impl PolylineSegmentedPathwaySingleRadius {
    /// Create a pathway through the points with the radius.
    ///
    /// # Panics
    ///
    /// Panics if the points don't form a valid path or the radius is negative.
    pub fn new(points: &[Vector3], radius: f64, closed_cycle: bool) -> Self {
        match Self::try_new(points, radius, closed_cycle) {
            Ok(pathway) => pathway,
            Err(err) => panic!("invalid pathway: {err}"),
        }
    }

    pub fn try_new(points: &[Vector3], radius: f64, closed_cycle: bool) -> Result<Self> {
        check_radius(0, radius)?;
        let path = PolylineSegmentedPath::try_new(points, closed_cycle)?;
        Ok(Self { path, radius })
    }

    /// Create a pathway around an existing path.
    pub fn from_path(path: PolylineSegmentedPath, radius: f64) -> Result<Self> {
        check_radius(0, radius)?;
        Ok(Self { path, radius })
    }

    /// Replace the points and the radius.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`PolylineSegmentedPathwaySingleRadius::new`].
    pub fn set_pathway(&mut self, points: &[Vector3], radius: f64, closed_cycle: bool) {
        if let Err(err) = self.try_set_pathway(points, radius, closed_cycle) {
            panic!("invalid pathway: {err}");
        }
    }

    pub fn try_set_pathway(
        &mut self,
        points: &[Vector3],
        radius: f64,
        closed_cycle: bool,
    ) -> Result<()> {
        check_radius(0, radius)?;
        self.path.try_set_path(points, closed_cycle)?;
        self.radius = radius;
        Ok(())
    }

    /// Replace the points and keep the radius.
    pub fn set_path(&mut self, points: &[Vector3], closed_cycle: bool) {
        self.path.set_path(points, closed_cycle);
    }

    pub fn try_set_path(&mut self, points: &[Vector3], closed_cycle: bool) -> Result<()> {
        self.path.try_set_path(points, closed_cycle)
    }

    /// See [`PolylineSegmentedPath::move_points`].
    pub fn move_points(&mut self, start_index: usize, new_points: &[Vector3]) {
        self.path.move_points(start_index, new_points);
    }

    pub fn try_move_points(&mut self, start_index: usize, new_points: &[Vector3]) -> Result<()> {
        self.path.try_move_points(start_index, new_points)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Set the radius.
    ///
    /// # Panics
    ///
    /// Panics if the radius is negative.
    pub fn set_radius(&mut self, radius: f64) {
        if let Err(err) = self.try_set_radius(radius) {
            panic!("invalid pathway radius: {err}");
        }
    }

    pub fn try_set_radius(&mut self, radius: f64) -> Result<()> {
        check_radius(0, radius)?;
        self.radius = radius;
        debug!(radius, "Set pathway radius");
        Ok(())
    }

    /// Get the centerline path.
    pub fn path(&self) -> &PolylineSegmentedPath {
        &self.path
    }

    pub fn point_count(&self) -> usize {
        self.path.point_count()
    }

    pub fn point(&self, index: usize) -> Vector3 {
        self.path.point(index)
    }
}

impl SegmentedPath for PolylineSegmentedPathwaySingleRadius {
    fn is_valid(&self) -> bool {
        self.path.is_valid()
    }

    fn is_cyclic(&self) -> bool {
        self.path.is_cyclic()
    }

    fn length(&self) -> f64 {
        self.path.length()
    }

    fn segment_count(&self) -> usize {
        self.path.segment_count()
    }

    fn segment_length(&self, segment_index: usize) -> f64 {
        self.path.segment_length(segment_index)
    }

    fn segment_start(&self, segment_index: usize) -> Vector3 {
        self.path.segment_start(segment_index)
    }

    fn segment_end(&self, segment_index: usize) -> Vector3 {
        self.path.segment_end(segment_index)
    }

    fn map_point_to_segment_distance(&self, segment_index: usize, point: Vector3) -> f64 {
        self.path.map_point_to_segment_distance(segment_index, point)
    }

    fn map_segment_distance_to_point(&self, segment_index: usize, distance: f64) -> Vector3 {
        self.path.map_segment_distance_to_point(segment_index, distance)
    }

    fn map_segment_distance_to_tangent(&self, segment_index: usize, distance: f64) -> Vector3 {
        self.path.map_segment_distance_to_tangent(segment_index, distance)
    }

    fn map_point_to_segment_distance_and_point_and_tangent(
        &self,
        segment_index: usize,
        point: Vector3,
    ) -> (f64, Vector3, Vector3) {
        self.path
            .map_point_to_segment_distance_and_point_and_tangent(segment_index, point)
    }
}

impl SegmentedPathway for PolylineSegmentedPathwaySingleRadius {
    fn map_segment_distance_to_radius(&self, _segment_index: usize, _distance: f64) -> f64 {
        self.radius
    }
}

impl PathQueryable for PolylineSegmentedPathwaySingleRadius {
    fn project_onto_segment(&self, segment_index: usize, point: Vector3) -> SegmentProjection {
        project_onto_pathway_segment(self, segment_index, point)
    }

    fn sample_segment(&self, segment_index: usize, distance: f64) -> SegmentSample {
        sample_pathway_segment(self, segment_index, distance)
    }
}
