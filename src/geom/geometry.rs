//! Geometry definitions shared by the drawing modes and the host boundary.

use serde::{Deserialize, Serialize};

/// A longitude/latitude coordinate pair in degrees.
pub type Position = [f64; 2];

/// Tagged union over the geometry kinds the toolkit can draw and move.
///
/// The serde encoding matches GeoJSON geometry objects (`type` plus
/// `coordinates`), so values pass directly to host engines that speak
/// GeoJSON without an adapter layer.
///
/// Committed geometry is treated as immutable: mutation happens only through
/// whole-geometry replacement (see [`Geometry::translated`]), never in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// Single coordinate pair
    Point(Position),
    /// Flat list of coordinate pairs
    MultiPoint(Vec<Position>),
    /// Ordered vertex sequence forming an open path
    LineString(Vec<Position>),
    /// Collection of open paths
    MultiLineString(Vec<Vec<Position>>),
    /// Closed rings; the first ring is the exterior
    Polygon(Vec<Vec<Position>>),
    /// Collection of polygons
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// Returns a copy with `delta` added componentwise to every coordinate
    /// pair, at every nesting depth.
    ///
    /// The translation is planar in (lng, lat) degrees, not geodesic. The
    /// receiver is left untouched, which keeps an in-flight move preview
    /// from aliasing the committed copy.
    pub fn translated(&self, delta: Position) -> Geometry {
        match self {
            Geometry::Point(p) => Geometry::Point(shift(*p, delta)),
            Geometry::MultiPoint(ps) => {
                Geometry::MultiPoint(ps.iter().map(|p| shift(*p, delta)).collect())
            }
            Geometry::LineString(ps) => {
                Geometry::LineString(ps.iter().map(|p| shift(*p, delta)).collect())
            }
            Geometry::MultiLineString(lines) => Geometry::MultiLineString(
                lines
                    .iter()
                    .map(|line| line.iter().map(|p| shift(*p, delta)).collect())
                    .collect(),
            ),
            Geometry::Polygon(rings) => Geometry::Polygon(
                rings
                    .iter()
                    .map(|ring| ring.iter().map(|p| shift(*p, delta)).collect())
                    .collect(),
            ),
            Geometry::MultiPolygon(polys) => Geometry::MultiPolygon(
                polys
                    .iter()
                    .map(|rings| {
                        rings
                            .iter()
                            .map(|ring| ring.iter().map(|p| shift(*p, delta)).collect())
                            .collect()
                    })
                    .collect(),
            ),
        }
    }

    /// Visits every coordinate pair in the geometry, at every nesting depth.
    pub fn for_each_position<F: FnMut(&Position)>(&self, mut f: F) {
        match self {
            Geometry::Point(p) => f(p),
            Geometry::MultiPoint(ps) | Geometry::LineString(ps) => ps.iter().for_each(f),
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                lines.iter().flatten().for_each(f)
            }
            Geometry::MultiPolygon(polys) => polys.iter().flatten().flatten().for_each(f),
        }
    }
}

fn shift(p: Position, delta: Position) -> Position {
    [p[0] + delta[0], p[1] + delta[1]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_point_adds_delta_componentwise() {
        let point = Geometry::Point([10.0, 20.0]);
        assert_eq!(point.translated([1.0, -1.0]), Geometry::Point([11.0, 19.0]));
        // original untouched
        assert_eq!(point, Geometry::Point([10.0, 20.0]));
    }

    #[test]
    fn translate_polygon_applies_delta_at_every_depth() {
        let polygon = Geometry::Polygon(vec![
            vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 0.0]],
            vec![[0.5, 0.5], [1.0, 0.5], [0.5, 0.5]],
        ]);

        let moved = polygon.translated([3.0, -2.0]);
        let mut count = 0;
        moved.for_each_position(|_| count += 1);
        assert_eq!(count, 7);

        assert_eq!(
            moved,
            Geometry::Polygon(vec![
                vec![[3.0, -2.0], [5.0, -2.0], [5.0, 0.0], [3.0, -2.0]],
                vec![[3.5, -1.5], [4.0, -1.5], [3.5, -1.5]],
            ])
        );
    }

    #[test]
    fn translate_multi_polygon_reaches_innermost_pairs() {
        let multi = Geometry::MultiPolygon(vec![vec![vec![[1.0, 1.0], [2.0, 1.0], [1.0, 1.0]]]]);
        assert_eq!(
            multi.translated([0.5, 0.5]),
            Geometry::MultiPolygon(vec![vec![vec![[1.5, 1.5], [2.5, 1.5], [1.5, 1.5]]]])
        );
    }

    #[test]
    fn serde_encoding_matches_geojson() {
        let line = Geometry::LineString(vec![[0.0, 0.0], [1.0, 1.0]]);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] })
        );

        let back: Geometry = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }
}
