use tracing::{debug, trace};

use crate::core::geometry::{scalar::clamp, vector::Vector3};
use crate::error::{PathError, Result};

use super::{PathQueryable, SegmentProjection, SegmentSample, SegmentedPath};

/// A path of straight segments through a sequence of waypoints.
///
/// A cyclic path stores a copy of its first waypoint as the last point, so it has
/// one more point and one more segment than the waypoints it was built from.
///
/// The tangent and the length of every segment are cached and updated whenever the
/// points change.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "super::description::PathDescription",
        into = "super::description::PathDescription"
    )
)]
pub struct PolylineSegmentedPath {
    points: Vec<Vector3>,
    segment_tangents: Vec<Vector3>,
    segment_lengths: Vec<f64>,
    closed_cycle: bool,
}

impl PolylineSegmentedPath {
    /// Create a path through the points.
    ///
    /// # Panics
    ///
    /// Panics if fewer than 2 points are given or two adjacent points coincide
    /// (including the last and the first point of a cyclic path).
    pub fn new(points: &[Vector3], closed_cycle: bool) -> Self {
        match Self::try_new(points, closed_cycle) {
            Ok(path) => path,
            Err(err) => panic!("invalid path: {err}"),
        }
    }

    /// Create a path through the points, or return an error if the points are invalid.
    pub fn try_new(points: &[Vector3], closed_cycle: bool) -> Result<Self> {
        let mut path = Self::default();
        path.try_set_path(points, closed_cycle)?;
        Ok(path)
    }

    /// Replace all the points of the path.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`PolylineSegmentedPath::new`].
    pub fn set_path(&mut self, points: &[Vector3], closed_cycle: bool) {
        if let Err(err) = self.try_set_path(points, closed_cycle) {
            panic!("invalid path: {err}");
        }
    }

    /// Replace all the points of the path, or return an error and keep the path unchanged.
    pub fn try_set_path(&mut self, points: &[Vector3], closed_cycle: bool) -> Result<()> {
        if points.len() < 2 {
            return Err(PathError::insufficient_points(2, points.len()));
        }

        let mut stored = Vec::with_capacity(points.len() + usize::from(closed_cycle));
        stored.extend_from_slice(points);
        if closed_cycle {
            stored.push(points[0]);
        }

        if let Some(index) = stored.windows(2).position(|pair| pair[0] == pair[1]) {
            return Err(PathError::CoincidentPoints { index });
        }

        let (segment_tangents, segment_lengths): (Vec<Vector3>, Vec<f64>) = stored
            .windows(2)
            .map(|pair| segment_tangent_and_length(pair[0], pair[1]))
            .unzip();

        self.points = stored;
        self.segment_tangents = segment_tangents;
        self.segment_lengths = segment_lengths;
        self.closed_cycle = closed_cycle;

        debug!(
            point_count = self.points.len(),
            closed_cycle, "Set path points"
        );
        Ok(())
    }

    /// Replace the points starting at `start_index` with `new_points`.
    ///
    /// The closing point of a cyclic path follows the first point automatically,
    /// so it can't be moved on its own.
    ///
    /// # Panics
    ///
    /// Panics if the range doesn't fit in the path or the move makes two adjacent
    /// points coincide.
    pub fn move_points(&mut self, start_index: usize, new_points: &[Vector3]) {
        if let Err(err) = self.try_move_points(start_index, new_points) {
            panic!("invalid point move: {err}");
        }
    }

    /// Replace the points starting at `start_index`, or return an error and keep
    /// the path unchanged.
    pub fn try_move_points(&mut self, start_index: usize, new_points: &[Vector3]) -> Result<()> {
        let count = new_points.len();
        let limit = self.movable_point_count();
        if start_index >= limit || start_index + count > limit {
            return Err(PathError::range_out_of_bounds(start_index, count, limit));
        }
        if count == 0 {
            return Ok(());
        }

        let end_index = start_index + count;
        let mirrors_first = self.closed_cycle && start_index == 0;
        let last_point = self.points.len() - 1;
        let point_after_move = |index: usize| {
            if (start_index..end_index).contains(&index) {
                new_points[index - start_index]
            } else if mirrors_first && index == last_point {
                new_points[0]
            } else {
                self.points[index]
            }
        };

        let segments = self.segments_touching(start_index, end_index);
        if let Some(index) = segments
            .clone()
            .find(|&index| point_after_move(index) == point_after_move(index + 1))
        {
            return Err(PathError::CoincidentPoints { index });
        }

        self.points[start_index..end_index].copy_from_slice(new_points);
        if mirrors_first {
            self.points[last_point] = new_points[0];
        }

        for index in segments {
            let (tangent, length) =
                segment_tangent_and_length(self.points[index], self.points[index + 1]);
            self.segment_tangents[index] = tangent;
            self.segment_lengths[index] = length;
            trace!(segment = index, length, "Updated segment");
        }

        debug!(start_index, count, "Moved path points");
        Ok(())
    }

    /// Number of points which can be moved directly.
    fn movable_point_count(&self) -> usize {
        self.points.len() - usize::from(self.closed_cycle && !self.points.is_empty())
    }

    /// Indices of the segments touching the points in [start_index, end_index).
    ///
    /// On a cyclic path the closing segment is included when the first point is touched.
    fn segments_touching(
        &self,
        start_index: usize,
        end_index: usize,
    ) -> impl Iterator<Item = usize> + Clone {
        let segment_count = self.segment_count();
        let first = start_index.saturating_sub(1);
        let last = end_index.min(segment_count);
        let closing = (self.closed_cycle && start_index == 0 && last < segment_count)
            .then(|| segment_count - 1);
        (first..last).chain(closing)
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Get the point at the index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    pub fn point(&self, index: usize) -> Vector3 {
        assert!(
            index < self.points.len(),
            "{}",
            PathError::index_out_of_range(index, self.points.len())
        );
        self.points[index]
    }

    /// Get all the stored points, including the closing point of a cyclic path.
    pub fn points(&self) -> &[Vector3] {
        &self.points
    }

    /// Get the cached unit tangent of the segment.
    pub fn segment_tangent(&self, segment_index: usize) -> Vector3 {
        self.check_segment_index(segment_index);
        self.segment_tangents[segment_index]
    }

    fn check_segment_index(&self, segment_index: usize) {
        assert!(
            segment_index < self.segment_count(),
            "{}",
            PathError::index_out_of_range(segment_index, self.segment_count())
        );
    }
}

/// Calculate the unit tangent and the length of the segment between two points.
fn segment_tangent_and_length(start: Vector3, end: Vector3) -> (Vector3, f64) {
    let offset = end - start;
    let length = offset.length();
    (offset / length, length)
}

impl SegmentedPath for PolylineSegmentedPath {
    fn is_valid(&self) -> bool {
        self.points.len() >= 2
    }

    fn is_cyclic(&self) -> bool {
        self.closed_cycle
    }

    fn length(&self) -> f64 {
        self.segment_lengths.iter().sum()
    }

    fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    fn segment_length(&self, segment_index: usize) -> f64 {
        self.check_segment_index(segment_index);
        self.segment_lengths[segment_index]
    }

    fn segment_start(&self, segment_index: usize) -> Vector3 {
        self.check_segment_index(segment_index);
        self.points[segment_index]
    }

    fn segment_end(&self, segment_index: usize) -> Vector3 {
        self.check_segment_index(segment_index);
        self.points[segment_index + 1]
    }

    fn map_point_to_segment_distance(&self, segment_index: usize, point: Vector3) -> f64 {
        let offset = point - self.segment_start(segment_index);
        let projection = offset.dot(self.segment_tangents[segment_index]);
        clamp(projection, 0.0, self.segment_lengths[segment_index])
    }

    fn map_segment_distance_to_point(&self, segment_index: usize, distance: f64) -> Vector3 {
        let distance = clamp(distance, 0.0, self.segment_length(segment_index));
        self.points[segment_index] + self.segment_tangents[segment_index] * distance
    }

    fn map_segment_distance_to_tangent(&self, segment_index: usize, _distance: f64) -> Vector3 {
        self.segment_tangent(segment_index)
    }

    fn map_point_to_segment_distance_and_point_and_tangent(
        &self,
        segment_index: usize,
        point: Vector3,
    ) -> (f64, Vector3, Vector3) {
        let distance = self.map_point_to_segment_distance(segment_index, point);
        let tangent = self.segment_tangents[segment_index];
        (
            distance,
            self.points[segment_index] + tangent * distance,
            tangent,
        )
    }
}

impl PathQueryable for PolylineSegmentedPath {
    fn project_onto_segment(&self, segment_index: usize, point: Vector3) -> SegmentProjection {
        let (distance_on_segment, point_on_centerline, tangent) =
            self.map_point_to_segment_distance_and_point_and_tangent(segment_index, point);
        SegmentProjection {
            distance_on_segment,
            radius: 0.0,
            distance_point_to_path: point.distance(point_on_centerline),
            point_on_centerline,
            tangent,
        }
    }

    fn sample_segment(&self, segment_index: usize, distance: f64) -> SegmentSample {
        let (point, tangent) = self.map_distance_to_segment_point_and_tangent(segment_index, distance);
        SegmentSample {
            point,
            tangent,
            radius: 0.0,
        }
    }
}
