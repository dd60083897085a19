//! The boundary to the external map-rendering engine.
//!
//! The host engine owns the viewport and all rendering. This module defines
//! the [`MapHost`] trait the session drives (sources, layers, hit testing,
//! cursor) together with the pointer event types the embedding glue delivers
//! to the session's entry points.

use serde::{Deserialize, Serialize};

use crate::draw::store::Feature;
use crate::geom::Position;

/// Screen-space pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn to_position(self) -> Position {
        [self.lng, self.lat]
    }
}

/// A pointer event delivered by the host engine.
///
/// Carries both the screen position (for gesture classification) and the
/// geographic position (for geometry construction). `timestamp_ms` must be
/// monotonic; gesture windows are computed from it rather than from wall
/// clocks or timers.
#[derive(Debug, Clone)]
pub struct PointerEvent {
    pub timestamp_ms: u64,
    pub point: ScreenPoint,
    pub lng_lat: LngLat,
    default_prevented: bool,
}

impl PointerEvent {
    pub fn new(timestamp_ms: u64, point: ScreenPoint, lng_lat: LngLat) -> Self {
        Self {
            timestamp_ms,
            point,
            lng_lat,
            default_prevented: false,
        }
    }

    /// Asks the host to suppress its native reaction to this event, e.g. the
    /// double-click zoom while a drawing mode is active.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler asked to suppress the host's native reaction.
    /// The embedding glue reads this after dispatch.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The top-most rendered feature under a screen coordinate, as reported by
/// the host engine's hit-test query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitFeature {
    /// Feature identifier, promoted from the feature's `id` property
    pub id: String,
    /// Source the feature was rendered from
    pub source_id: String,
    /// Layer the feature was hit on
    pub layer_id: String,
}

/// Cursor affordances the modes can request on the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIcon {
    Crosshair,
    Pointer,
    Move,
}

/// Render layer kind, mirroring the host engine's vector layer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Circle,
    Line,
    Fill,
}

/// Geometry class filter for a render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryClass {
    Point,
    Line,
    Polygon,
}

/// A paint layer bound to the draw source.
///
/// Paint properties are host-interpreted style JSON; this crate never reads
/// them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub id: String,
    pub kind: LayerKind,
    pub paint: serde_json::Value,
    pub filter: Option<GeometryClass>,
}

/// Primitives the session consumes from the host map engine.
///
/// Implementations are expected to be cheap and synchronous; the session
/// calls them in direct reaction to pointer and lifecycle events.
pub trait MapHost {
    /// Whether the host has finished loading its rendering style. Source and
    /// layer creation is deferred until this reports `true`.
    fn style_ready(&self) -> bool;

    /// Creates a geometry source with initial data.
    fn add_source(&mut self, source_id: &str, features: &[Feature]);

    /// Replaces the data of an existing geometry source.
    fn set_source_data(&mut self, source_id: &str, features: &[Feature]);

    /// Removes a geometry source.
    fn remove_source(&mut self, source_id: &str);

    /// Adds a paint layer bound to a source.
    fn add_layer(&mut self, source_id: &str, layer: &LayerSpec);

    /// Removes a paint layer.
    fn remove_layer(&mut self, layer_id: &str);

    /// Returns the top-most rendered feature under a screen coordinate.
    fn query_hit(&self, point: ScreenPoint) -> Option<HitFeature>;

    /// Applies or clears a cursor affordance on the map surface.
    fn set_cursor(&mut self, icon: Option<CursorIcon>);
}
