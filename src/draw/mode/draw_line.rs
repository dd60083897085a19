//! Incremental line drawing.

use crate::draw::event::ModeEvent;
use crate::draw::mode::{Mode, ModeCx, ModeKind};
use crate::geom::{Geometry, Position};
use crate::host::{CursorIcon, HitFeature, PointerEvent};

/// Accumulates clicked vertices and previews the line through them plus the
/// current pointer position. A double-click finalizes once at least two
/// vertices exist; the double-click's own point is not appended.
pub struct DrawLineMode {
    vertices: Vec<Position>,
    cursor_vertex: Option<Position>,
}

impl DrawLineMode {
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
        if full.len() >= 2 {
            features.push(Geometry::LineString(full));
        }

        cx.emit(ModeEvent::Render { features });
    }
}

impl Default for DrawLineMode {
    fn default() -> Self {
        Self::new()
    }
}

impl Mode for DrawLineMode {
    fn kind(&self) -> ModeKind {
        ModeKind::DrawLine
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
        // ignored below two vertices; drawing continues
        if self.vertices.len() < 2 {
            return;
        }
        let vertices = std::mem::take(&mut self.vertices);
        self.cursor_vertex = None;
        cx.emit(ModeEvent::Add {
            geometry: Geometry::LineString(vertices),
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
