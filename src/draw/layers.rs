//! Default render layers for the draw source.

use serde_json::json;

use crate::host::{GeometryClass, LayerKind, LayerSpec};

/// The built-in layer table: vertex circles, line strokes, and polygon fill,
/// each filtered to its geometry class. Embedders can replace the whole set
/// via [`DrawConfig::layers`](crate::config::DrawConfig).
pub fn default_layers() -> Vec<LayerSpec> {
    vec![
        LayerSpec {
            id: "mapdraw-tool-point".to_string(),
            kind: LayerKind::Circle,
            paint: json!({
                "circle-color": "#fff",
                "circle-stroke-color": "#f00",
                "circle-radius": 5,
                "circle-stroke-width": 3,
            }),
            filter: Some(GeometryClass::Point),
        },
        LayerSpec {
            id: "mapdraw-tool-line".to_string(),
            kind: LayerKind::Line,
            paint: json!({
                "line-color": "#0f0",
                "line-width": 2,
            }),
            filter: Some(GeometryClass::Line),
        },
        LayerSpec {
            id: "mapdraw-tool-fill".to_string(),
            kind: LayerKind::Fill,
            paint: json!({
                "fill-color": "#f00",
                "fill-opacity": 0.2,
            }),
            filter: Some(GeometryClass::Polygon),
        },
    ]
}
