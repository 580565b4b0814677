//! Plain descriptions of paths and pathways for configuration files.
//!
//! Paths serialize through these types and deserialize through `TryFrom`, so
//! invalid data is rejected with a [`PathError`] instead of producing a broken path.

use serde::{Deserialize, Serialize};

use crate::core::geometry::vector::Vector3;
use crate::error::PathError;

use super::{
    polyline::PolylineSegmentedPath, segment_radii::PolylineSegmentedPathwaySegmentRadii,
    single_radius::PolylineSegmentedPathwaySingleRadius, SegmentedPath,
};

/// Waypoints of a path, without the closing point of a cyclic path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathDescription {
    pub points: Vec<Vector3>,
    #[serde(default)]
    pub cyclic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleRadiusDescription {
    pub points: Vec<Vector3>,
    pub radius: f64,
    #[serde(default)]
    pub cyclic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRadiiDescription {
    pub points: Vec<Vector3>,
    pub radii: Vec<f64>,
    #[serde(default)]
    pub cyclic: bool,
}

/// Get the waypoints of the path as they were given.
fn waypoints(path: &PolylineSegmentedPath) -> Vec<Vector3> {
    let points = path.points();
    let count = points.len() - usize::from(path.is_cyclic());
    points[..count].to_vec()
}

impl From<PolylineSegmentedPath> for PathDescription {
    fn from(path: PolylineSegmentedPath) -> Self {
        Self {
            points: waypoints(&path),
            cyclic: path.is_cyclic(),
        }
    }
}

impl TryFrom<PathDescription> for PolylineSegmentedPath {
    type Error = PathError;

    fn try_from(description: PathDescription) -> Result<Self, Self::Error> {
        Self::try_new(&description.points, description.cyclic)
    }
}

impl From<PolylineSegmentedPathwaySingleRadius> for SingleRadiusDescription {
    fn from(pathway: PolylineSegmentedPathwaySingleRadius) -> Self {
        Self {
            points: waypoints(pathway.path()),
            radius: pathway.radius(),
            cyclic: pathway.is_cyclic(),
        }
    }
}

impl TryFrom<SingleRadiusDescription> for PolylineSegmentedPathwaySingleRadius {
    type Error = PathError;

    fn try_from(description: SingleRadiusDescription) -> Result<Self, Self::Error> {
        Self::try_new(&description.points, description.radius, description.cyclic)
    }
}

impl From<PolylineSegmentedPathwaySegmentRadii> for SegmentRadiiDescription {
    fn from(pathway: PolylineSegmentedPathwaySegmentRadii) -> Self {
        Self {
            points: waypoints(pathway.path()),
            radii: pathway.segment_radii().to_vec(),
            cyclic: pathway.is_cyclic(),
        }
    }
}

impl TryFrom<SegmentRadiiDescription> for PolylineSegmentedPathwaySegmentRadii {
    type Error = PathError;

    fn try_from(description: SegmentRadiiDescription) -> Result<Self, Self::Error> {
        Self::try_new(&description.points, &description.radii, description.cyclic)
    }
}
