//! Two-control-point rectangle drawing.

use crate::draw::event::ModeEvent;
use crate::draw::mode::{Mode, ModeCx, ModeKind};
use crate::geom::{Bbox, Geometry, Position};
use crate::host::{CursorIcon, HitFeature, PointerEvent};

/// The first click pins corner A; mouse movement floats corner B and
/// previews the axis-aligned bounding box of the two. The next click (once
/// movement has set B) commits the bbox polygon and resets both controls.
pub struct DrawRectMode {
    corner_a: Option<Position>,
    corner_b: Option<Position>,
}

impl DrawRectMode {
    pub fn new() -> Self {
        Self {
            corner_a: None,
            corner_b: None,
        }
    }

    fn bbox_polygon(a: Position, b: Position) -> Geometry {
        // two positions always yield a bbox
        Bbox::of(&[a, b]).map(|bbox| bbox.to_polygon()).unwrap_or(
            Geometry::Polygon(vec![vec![a, a, a, a, a]]),
        )
    }

    fn render(&self, cx: &mut ModeCx<'_>) {
        let mut features = Vec::new();
        if let Some(a) = self.corner_a {
            features.push(Geometry::Point(a));
        }
        if let Some(b) = self.corner_b {
            features.push(Geometry::Point(b));
        }
        if let (Some(a), Some(b)) = (self.corner_a, self.corner_b) {
            features.push(Self::bbox_polygon(a, b));
        }
        cx.emit(ModeEvent::Render { features });
    }
}

impl Default for DrawRectMode {
    fn default() -> Self {
        Self::new()
    }
}

impl Mode for DrawRectMode {
    fn kind(&self) -> ModeKind {
        ModeKind::DrawRect
    }

    fn cursor(&self) -> Option<CursorIcon> {
        Some(CursorIcon::Crosshair)
    }

    fn on_click(&mut self, ev: &mut PointerEvent, _hit: Option<&HitFeature>, cx: &mut ModeCx<'_>) {
        if self.corner_a.is_none() {
            self.corner_a = Some(ev.lng_lat.to_position());
            self.render(cx);
        } else if let Some(a) = self.corner_a
            && self.corner_b.is_some()
        {
            let b = ev.lng_lat.to_position();
            cx.emit(ModeEvent::Add {
                geometry: Self::bbox_polygon(a, b),
            });
            self.corner_a = None;
            self.corner_b = None;
            self.render(cx);
        }
    }

    fn on_mousemove(
        &mut self,
        ev: &mut PointerEvent,
        _hit: Option<&HitFeature>,
        cx: &mut ModeCx<'_>,
    ) {
        if self.corner_a.is_some() {
            self.corner_b = Some(ev.lng_lat.to_position());
            self.render(cx);
        }
    }

    fn on_origin_dblclick(&mut self, ev: &mut PointerEvent) {
        ev.prevent_default();
    }

    fn destroy(&mut self, cx: &mut ModeCx<'_>) {
        self.corner_a = None;
        self.corner_b = None;
        self.render(cx);
    }
}
