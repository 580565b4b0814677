use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::debug;

use crate::core::geometry::{line_segment::LineSegment, vector::Vector3};

use super::{query::PointToPathMapping, PathQueryable, SegmentProjection};

/// Slack for pruning by the centerline distance, which the tree computes
/// slightly differently from the paths.
const PRUNE_SLACK: f64 = 1e-9;

/// A segment of a path stored in the tree.
#[derive(Debug, Copy, Clone, PartialEq)]
struct IndexedSegment {
    segment: LineSegment,
    index: usize,
}

impl RTreeObject for IndexedSegment {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        self.segment.envelope()
    }
}

impl PointDistance for IndexedSegment {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        self.segment.distance_2(point)
    }
}

/// Spatial index over the segments of a path.
///
/// The index answers the same queries as [`super::query::map_point_to_path_alike`]
/// without visiting every segment. It is a snapshot of the path at the time it was
/// built: after moving points or changing radii, build a new one.
///
/// The radius of each segment is assumed to be constant along the segment, which
/// holds for every pathway type of this crate.
#[derive(Debug, Clone)]
pub struct SegmentIndex {
    tree: RTree<IndexedSegment>,
    segment_offsets: Vec<f64>,
    length: f64,
    max_radius: f64,
}

impl SegmentIndex {
    /// Build the index over the segments of the path.
    pub fn new<P>(path: &P) -> Self
    where
        P: PathQueryable + ?Sized,
    {
        let segment_count = path.segment_count();
        let mut segments = Vec::with_capacity(segment_count);
        let mut segment_offsets = Vec::with_capacity(segment_count);
        let mut length = 0.0;
        let mut max_radius: f64 = 0.0;

        for index in 0..segment_count {
            segments.push(IndexedSegment {
                segment: LineSegment::new(path.segment_start(index), path.segment_end(index)),
                index,
            });
            segment_offsets.push(length);
            length += path.segment_length(index);
            max_radius = max_radius.max(path.sample_segment(index, 0.0).radius);
        }

        debug!(segment_count, length, max_radius, "Built segment index");

        Self {
            tree: RTree::bulk_load(segments),
            segment_offsets,
            length,
            max_radius,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segment_offsets.len()
    }

    /// Check if the path no longer matches the snapshot.
    ///
    /// Only the number of segments and the total length are compared, so a move
    /// which keeps both is not detected.
    pub fn is_stale_for<P>(&self, path: &P) -> bool
    where
        P: PathQueryable + ?Sized,
    {
        path.segment_count() != self.segment_count() || path.length() != self.length
    }

    /// Find the segment whose centerline is nearest to the point.
    ///
    /// Among equally near segments the one with the lowest index is returned.
    pub fn nearest_segment(&self, point: Vector3) -> Option<usize> {
        let mut candidates = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&point.to_array());
        let (first, min_distance_2) = candidates.next()?;
        let nearest = candidates
            .take_while(|(_, distance_2)| *distance_2 <= min_distance_2)
            .map(|(candidate, _)| candidate.index)
            .fold(first.index, usize::min);
        Some(nearest)
    }

    /// Map the point to the nearest point on the path the index was built from.
    ///
    /// The result is the same as the one of [`super::query::map_point_to_path_alike`].
    ///
    /// # Panics
    ///
    /// Panics if the path has no segment, or if it no longer matches the index
    /// (see [`SegmentIndex::is_stale_for`]).
    pub fn map_point_to_path<P>(&self, path: &P, point: Vector3) -> PointToPathMapping
    where
        P: PathQueryable + ?Sized,
    {
        assert!(path.is_valid(), "cannot query a path without segments");
        assert!(
            !self.is_stale_for(path),
            "stale segment index: built for {} segments, path has {}",
            self.segment_count(),
            path.segment_count()
        );

        let mut best: Option<(usize, SegmentProjection)> = None;
        let mut min_distance = f64::INFINITY;

        for (candidate, distance_2) in self
            .tree
            .nearest_neighbor_iter_with_distance_2(&point.to_array())
        {
            // every remaining segment is at least this far from its tube boundary
            if distance_2.sqrt() - self.max_radius > min_distance + PRUNE_SLACK {
                break;
            }

            let projection = path.project_onto_segment(candidate.index, point);
            let distance = projection.distance_point_to_path;
            let is_better = match best {
                None => true,
                Some((index, _)) => {
                    distance < min_distance || (distance == min_distance && candidate.index < index)
                }
            };
            if is_better {
                min_distance = distance;
                best = Some((candidate.index, projection));
            }
        }

        let mut mapping = PointToPathMapping::default();
        if let Some((index, projection)) = best {
            mapping.update(point, index, self.segment_offsets[index], &projection);
        }
        mapping
    }
}
