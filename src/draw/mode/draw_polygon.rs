//! Incremental polygon drawing.

use crate::draw::event::ModeEvent;
use crate::draw::mode::{Mode, ModeCx, ModeKind};
use crate::geom::{Geometry, Position};
use crate::host::{CursorIcon, HitFeature, PointerEvent};

/// Same accumulation strategy as the line mode, but the preview closes the
/// ring through the cursor: an outline line from two full points on, a
/// filled polygon from three. Finalization requires at least three committed
/// vertices and repeats the first to close the ring.
pub struct DrawPolygonMode {
    vertices: Vec<Position>,
    cursor_vertex: Option<Position>,
}

impl DrawPolygonMode {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            cursor_vertex: None,
        }
    }

    fn render(&self, cx: &mut ModeCx<'_>) {
        let mut features: Vec<Geometry> =
            self.vertices.iter().map(|v| Geometry::Point(*v)).collect();

        let mut full = self.vertices.clone();
        if let Some(cursor) = self.cursor_vertex {
            full.push(cursor);
        }
        if full.len() >= 3 {
            let mut ring = full.clone();
            ring.push(full[0]);
            features.push(Geometry::Polygon(vec![ring]));
        }
        if full.len() >= 2 {
            let mut outline = full.clone();
            outline.push(full[0]);
            features.push(Geometry::LineString(outline));
        }

        cx.emit(ModeEvent::Render { features });
    }
}

impl Default for DrawPolygonMode {
    fn default() -> Self {
        Self::new()
    }
}

impl Mode for DrawPolygonMode {
    fn kind(&self) -> ModeKind {
        ModeKind::DrawPolygon
    }

    fn cursor(&self) -> Option<CursorIcon> {
        Some(CursorIcon::Crosshair)
    }

    fn on_click(&mut self, ev: &mut PointerEvent, _hit: Option<&HitFeature>, cx: &mut ModeCx<'_>) {
        self.vertices.push(ev.lng_lat.to_position());
        self.cursor_vertex = None;
        self.render(cx);
    }

    fn on_mousemove(
        &mut self,
        ev: &mut PointerEvent,
        _hit: Option<&HitFeature>,
        cx: &mut ModeCx<'_>,
    ) {
        self.cursor_vertex = Some(ev.lng_lat.to_position());
        self.render(cx);
    }

    fn on_dblclick(
        &mut self,
        _ev: &mut PointerEvent,
        _hit: Option<&HitFeature>,
        cx: &mut ModeCx<'_>,
    ) {
        if self.vertices.len() < 3 {
            return;
        }
        let mut ring = std::mem::take(&mut self.vertices);
        ring.push(ring[0]);
        self.cursor_vertex = None;
        cx.emit(ModeEvent::Add {
            geometry: Geometry::Polygon(vec![ring]),
        });
        self.render(cx);
    }

    fn on_origin_dblclick(&mut self, ev: &mut PointerEvent) {
        ev.prevent_default();
    }

    fn destroy(&mut self, cx: &mut ModeCx<'_>) {
        self.vertices.clear();
        self.cursor_vertex = None;
        self.render(cx);
    }
}
