//! Geometry primitives and utilities.
//!
//! This module defines the core geometry types used by the drawing tool:
//! - [`Geometry`]: tagged union over the GeoJSON geometry kinds
//! - [`Bbox`]: axis-aligned bounding boxes for the rectangle mode
//! - geodesic circle approximation for the circle mode

pub mod bbox;
pub mod circle;
pub mod geometry;

// Re-export commonly used types at module level
pub use bbox::Bbox;
pub use circle::{EARTH_RADIUS_KM, circle_polygon, destination, haversine_distance_km};
pub use geometry::{Geometry, Position};
