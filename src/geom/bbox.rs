//! Axis-aligned bounding boxes in geographic coordinates.

use super::geometry::{Geometry, Position};

/// Axis-aligned bounding box over longitude/latitude positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl Bbox {
    /// Computes the bounding box of a set of positions.
    ///
    /// Returns `None` for an empty set.
    pub fn of(positions: &[Position]) -> Option<Bbox> {
        let first = positions.first()?;
        let mut bbox = Bbox {
            min_lng: first[0],
            min_lat: first[1],
            max_lng: first[0],
            max_lat: first[1],
        };

        for p in &positions[1..] {
            bbox.min_lng = bbox.min_lng.min(p[0]);
            bbox.min_lat = bbox.min_lat.min(p[1]);
            bbox.max_lng = bbox.max_lng.max(p[0]);
            bbox.max_lat = bbox.max_lat.max(p[1]);
        }

        Some(bbox)
    }

    /// Converts the box into a closed polygon ring, counter-clockwise from
    /// the south-west corner.
    pub fn to_polygon(&self) -> Geometry {
        Geometry::Polygon(vec![vec![
            [self.min_lng, self.min_lat],
            [self.max_lng, self.min_lat],
            [self.max_lng, self.max_lat],
            [self.min_lng, self.max_lat],
            [self.min_lng, self.min_lat],
        ]])
    }
}
