use tracing::debug;

use crate::core::geometry::vector::Vector3;
use crate::error::{check_radius, PathError, Result};

use super::{
    polyline::PolylineSegmentedPath, project_onto_pathway_segment, sample_pathway_segment,
    PathQueryable, SegmentProjection, SegmentSample, SegmentedPath, SegmentedPathway,
};

/// A pathway with its own radius around each segment.
///
/// The radius is constant along a segment and changes from one segment to the next.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "super::description::SegmentRadiiDescription",
        into = "super::description::SegmentRadiiDescription"
    )
)]
pub struct PolylineSegmentedPathwaySegmentRadii {
    path: PolylineSegmentedPath,
    segment_radii: Vec<f64>,
}

impl PolylineSegmentedPathwaySegmentRadii {
    /// Create a pathway through the points with one radius per segment.
    ///
    /// A cyclic pathway through `n` points has `n` segments, an open one `n - 1`.
    ///
    /// # Panics
    ///
    /// Panics if the points don't form a valid path, the number of radii doesn't
    /// match the number of segments or a radius is negative.
    pub fn new(points: &[Vector3], radii: &[f64], closed_cycle: bool) -> Self {
        match Self::try_new(points, radii, closed_cycle) {
            Ok(pathway) => pathway,
            Err(err) => panic!("invalid pathway: {err}"),
        }
    }

    pub fn try_new(points: &[Vector3], radii: &[f64], closed_cycle: bool) -> Result<Self> {
        let mut pathway = Self::default();
        pathway.try_set_pathway(points, radii, closed_cycle)?;
        Ok(pathway)
    }

    /// Create a pathway around an existing path.
    pub fn from_path(path: PolylineSegmentedPath, radii: &[f64]) -> Result<Self> {
        check_radii(path.segment_count(), radii)?;
        Ok(Self {
            path,
            segment_radii: radii.to_vec(),
        })
    }

    /// Replace the points and the radii.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`PolylineSegmentedPathwaySegmentRadii::new`].
    pub fn set_pathway(&mut self, points: &[Vector3], radii: &[f64], closed_cycle: bool) {
        if let Err(err) = self.try_set_pathway(points, radii, closed_cycle) {
            panic!("invalid pathway: {err}");
        }
    }

    pub fn try_set_pathway(
        &mut self,
        points: &[Vector3],
        radii: &[f64],
        closed_cycle: bool,
    ) -> Result<()> {
        check_radii(segment_count_for(points, closed_cycle), radii)?;
        self.path.try_set_path(points, closed_cycle)?;
        self.segment_radii = radii.to_vec();
        Ok(())
    }

    /// Replace the points and keep the radii.
    ///
    /// The new path must have as many segments as the current one. Use
    /// [`PolylineSegmentedPathwaySegmentRadii::set_pathway`] to change the number
    /// of segments.
    ///
    /// # Panics
    ///
    /// Panics if the points don't form a valid path or the number of segments changes.
    pub fn set_path(&mut self, points: &[Vector3], closed_cycle: bool) {
        if let Err(err) = self.try_set_path(points, closed_cycle) {
            panic!("invalid pathway: {err}");
        }
    }

    pub fn try_set_path(&mut self, points: &[Vector3], closed_cycle: bool) -> Result<()> {
        let segment_count = segment_count_for(points, closed_cycle);
        if segment_count != self.segment_radii.len() {
            return Err(PathError::RadiusCountMismatch {
                expected: segment_count,
                actual: self.segment_radii.len(),
            });
        }
        self.path.try_set_path(points, closed_cycle)
    }

    /// See [`PolylineSegmentedPath::move_points`]. The radii are not changed.
    pub fn move_points(&mut self, start_index: usize, new_points: &[Vector3]) {
        self.path.move_points(start_index, new_points);
    }

    pub fn try_move_points(&mut self, start_index: usize, new_points: &[Vector3]) -> Result<()> {
        self.path.try_move_points(start_index, new_points)
    }

    pub fn segment_radius(&self, segment_index: usize) -> f64 {
        assert!(
            segment_index < self.segment_radii.len(),
            "{}",
            PathError::index_out_of_range(segment_index, self.segment_radii.len())
        );
        self.segment_radii[segment_index]
    }

    pub fn segment_radii(&self) -> &[f64] {
        &self.segment_radii
    }

    /// Set the radius of one segment.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range or the radius is negative.
    pub fn set_segment_radius(&mut self, segment_index: usize, radius: f64) {
        if let Err(err) = self.try_set_segment_radius(segment_index, radius) {
            panic!("invalid segment radius: {err}");
        }
    }

    pub fn try_set_segment_radius(&mut self, segment_index: usize, radius: f64) -> Result<()> {
        self.try_set_segment_radii(segment_index, &[radius])
    }

    /// Set the radii of the segments starting at `start_index`.
    ///
    /// # Panics
    ///
    /// Panics if the range doesn't fit in the pathway or a radius is negative.
    pub fn set_segment_radii(&mut self, start_index: usize, radii: &[f64]) {
        if let Err(err) = self.try_set_segment_radii(start_index, radii) {
            panic!("invalid segment radius: {err}");
        }
    }

    pub fn try_set_segment_radii(&mut self, start_index: usize, radii: &[f64]) -> Result<()> {
        let limit = self.segment_radii.len();
        if start_index >= limit || start_index + radii.len() > limit {
            return Err(PathError::range_out_of_bounds(
                start_index,
                radii.len(),
                limit,
            ));
        }
        for (offset, &radius) in radii.iter().enumerate() {
            check_radius(start_index + offset, radius)?;
        }

        self.segment_radii[start_index..start_index + radii.len()].copy_from_slice(radii);
        debug!(start_index, count = radii.len(), "Set segment radii");
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

/// Check that there is one non-negative radius per segment.
/// Number of segments of a path through the points.
fn segment_count_for(points: &[Vector3], closed_cycle: bool) -> usize {
    if closed_cycle {
        points.len()
    } else {
        points.len().saturating_sub(1)
    }
}

fn check_radii(segment_count: usize, radii: &[f64]) -> Result<()> {
    if radii.len() != segment_count {
        return Err(PathError::RadiusCountMismatch {
            expected: segment_count,
            actual: radii.len(),
        });
    }
    radii
        .iter()
        .enumerate()
        .try_for_each(|(index, &radius)| check_radius(index, radius))
}

impl SegmentedPath for PolylineSegmentedPathwaySegmentRadii {
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

impl SegmentedPathway for PolylineSegmentedPathwaySegmentRadii {
    fn map_segment_distance_to_radius(&self, segment_index: usize, _distance: f64) -> f64 {
        self.segment_radius(segment_index)
    }
}

impl PathQueryable for PolylineSegmentedPathwaySegmentRadii {
    fn project_onto_segment(&self, segment_index: usize, point: Vector3) -> SegmentProjection {
        project_onto_pathway_segment(self, segment_index, point)
    }

    fn sample_segment(&self, segment_index: usize, distance: f64) -> SegmentSample {
        sample_pathway_segment(self, segment_index, distance)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::path::Pathway;

    fn square_points() -> Vec<Vector3> {
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(4.0, 0.0, 0.0),
            Vector3::new(4.0, 0.0, 4.0),
            Vector3::new(0.0, 0.0, 4.0),
        ]
    }

    #[test]
    fn test_radius_count_follows_closure() {
        let open = PolylineSegmentedPathwaySegmentRadii::new(&square_points(), &[1.0, 2.0, 3.0], false);
        assert_eq!(open.segment_count(), 3);

        let cyclic =
            PolylineSegmentedPathwaySegmentRadii::new(&square_points(), &[1.0, 2.0, 3.0, 4.0], true);
        assert_eq!(cyclic.segment_count(), 4);
        assert_eq!(cyclic.segment_radius(3), 4.0);

        assert_eq!(
            PolylineSegmentedPathwaySegmentRadii::try_new(&square_points(), &[1.0, 2.0, 3.0], true),
            Err(PathError::RadiusCountMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            PolylineSegmentedPathwaySegmentRadii::try_new(&square_points(), &[1.0, -2.0, 3.0], false),
            Err(PathError::NegativeRadius {
                index: 1,
                radius: -2.0
            })
        );
    }

    #[test]
    fn test_radius_by_segment() {
        let pathway =
            PolylineSegmentedPathwaySegmentRadii::new(&square_points(), &[1.0, 2.0, 3.0, 4.0], true);

        assert_eq!(pathway.map_segment_distance_to_radius(1, 0.0), 2.0);
        assert_eq!(pathway.map_segment_distance_to_radius(1, 4.0), 2.0);
        assert_eq!(pathway.map_path_distance_to_radius(1.0), 1.0);
        assert_eq!(pathway.map_path_distance_to_radius(9.0), 3.0);
        assert_eq!(pathway.map_path_distance_to_radius(-1.0), 4.0);

        let (point, tangent, radius) =
            pathway.map_distance_to_segment_point_and_tangent_and_radius(2, 1.0);
        assert_eq!(point, Vector3::new(3.0, 0.0, 4.0));
        assert_eq!(tangent, Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(radius, 3.0);
    }

    #[test]
    fn test_map_point_to_path_uses_segment_radius() {
        let pathway =
            PolylineSegmentedPathwaySegmentRadii::new(&square_points(), &[1.0, 2.0, 3.0, 4.0], true);

        // inside the square, nearer to segment 0 but inside the wide tube of segment 3
        let projection = pathway.map_point_to_path(Vector3::new(1.5, 0.0, 1.0));
        assert_eq!(projection.point, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(projection.tangent, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(projection.outside, -2.5);

        let projection = pathway.map_point_to_path(Vector3::new(5.0, 0.0, 2.0));
        assert_eq!(projection.point, Vector3::new(4.0, 0.0, 2.0));
        assert_eq!(projection.tangent, Vector3::Z);
        assert_eq!(projection.outside, -1.0);
    }

    #[test]
    fn test_set_segment_radii() {
        let mut pathway =
            PolylineSegmentedPathwaySegmentRadii::new(&square_points(), &[1.0, 1.0, 1.0], false);

        pathway.set_segment_radius(1, 5.0);
        assert_eq!(pathway.segment_radii(), &[1.0, 5.0, 1.0]);

        pathway.set_segment_radii(1, &[2.0, 3.0]);
        assert_eq!(pathway.segment_radii(), &[1.0, 2.0, 3.0]);

        let before = pathway.clone();
        assert_eq!(
            pathway.try_set_segment_radii(2, &[1.0, 1.0]),
            Err(PathError::range_out_of_bounds(2, 2, 3))
        );
        assert!(matches!(
            pathway.try_set_segment_radii(0, &[1.0, f64::NAN]),
            Err(PathError::NegativeRadius { index: 1, .. })
        ));
        assert_eq!(pathway, before);
    }

    #[test]
    fn test_set_path_keeps_radii() {
        let mut pathway =
            PolylineSegmentedPathwaySegmentRadii::new(&square_points(), &[1.0, 2.0, 3.0], false);

        let moved = square_points()
            .iter()
            .map(|point| *point + Vector3::Y)
            .collect::<Vec<_>>();
        pathway.set_path(&moved, false);
        assert_eq!(pathway.point(0), Vector3::Y);
        assert_eq!(pathway.segment_radii(), &[1.0, 2.0, 3.0]);

        // closing the path adds a segment with no radius
        let before = pathway.clone();
        assert_eq!(
            pathway.try_set_path(&square_points(), true),
            Err(PathError::RadiusCountMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            pathway.try_set_path(&square_points()[..2], false),
            Err(PathError::RadiusCountMismatch {
                expected: 1,
                actual: 3
            })
        );
        assert_eq!(pathway, before);

        pathway.set_pathway(&square_points(), &[1.0, 2.0, 3.0, 4.0], true);
        assert_eq!(pathway.map_segment_distance_to_radius(3, 0.0), 4.0);
    }

    #[test]
    #[should_panic(expected = "radius count mismatch")]
    fn test_set_path_with_other_segment_count_panics() {
        let mut pathway =
            PolylineSegmentedPathwaySegmentRadii::new(&square_points(), &[3.0, 3.0, 3.0], false);
        pathway.set_path(&square_points(), true);
    }

    #[test]
    fn test_move_points_keeps_radii() {
        let mut pathway =
            PolylineSegmentedPathwaySegmentRadii::new(&square_points(), &[1.0, 2.0, 3.0], false);
        pathway.move_points(3, &[Vector3::new(0.0, 0.0, 8.0)]);

        assert_eq!(pathway.point(3), Vector3::new(0.0, 0.0, 8.0));
        assert_eq!(pathway.segment_radii(), &[1.0, 2.0, 3.0]);
        assert_relative_eq!(
            pathway.path().segment_length(2),
            4.0 * 2.0_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    #[should_panic(expected = "invalid segment radius")]
    fn test_set_segment_radius_out_of_range() {
        let mut pathway =
            PolylineSegmentedPathwaySegmentRadii::new(&square_points(), &[1.0, 1.0, 1.0], false);
        pathway.set_segment_radius(3, 1.0);
    }
}
