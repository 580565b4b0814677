//! Geometry queries on segmented paths and pathways for path-following steering.
//!
//! A [`PolylineSegmentedPath`] is a chain of straight segments through a sequence of
//! waypoints, open or cyclic. The pathway types add a tube around it, either with one
//! [radius for the whole path](PolylineSegmentedPathwaySingleRadius) or with
//! [one radius per segment](PolylineSegmentedPathwaySegmentRadii).
//!
//! All three can be queried both ways:
//!
//! - point to path: the nearest centerline point, its tangent and segment, and the
//!   signed distance to the tube boundary;
//! - distance along the path to point: the point, tangent and radius there.
//!
//! ```
//! use pathway_engine::{Pathway, PolylineSegmentedPathwaySingleRadius, SegmentedPath, Vector3};
//!
//! let pathway = PolylineSegmentedPathwaySingleRadius::new(
//!     &[Vector3::new(0.0, 0.0, 0.0), Vector3::new(10.0, 0.0, 0.0)],
//!     2.0,
//!     false,
//! );
//!
//! let projection = pathway.map_point_to_path(Vector3::new(4.0, 3.0, 0.0));
//! assert_eq!(projection.point, Vector3::new(4.0, 0.0, 0.0));
//! assert_eq!(projection.outside, 1.0);
//!
//! assert_eq!(pathway.length(), 10.0);
//! assert_eq!(pathway.map_path_distance_to_point(12.0), Vector3::new(10.0, 0.0, 0.0));
//! ```

pub mod core;
pub mod error;

pub use crate::core::geometry::vector::{Vector3, VectorExt};
pub use crate::core::path::{
    index::SegmentIndex,
    polyline::PolylineSegmentedPath,
    query::{
        map_distance_to_path_alike, map_point_to_path_alike, DistanceToPathMapping,
        PointToPathMapping,
    },
    segment_radii::PolylineSegmentedPathwaySegmentRadii,
    single_radius::PolylineSegmentedPathwaySingleRadius,
    PathProjection, PathQueryable, Pathway, SegmentProjection, SegmentSample, SegmentedPath,
    SegmentedPathway,
};
pub use error::{PathError, Result};
