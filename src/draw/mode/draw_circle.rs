//! Two-control-point circle drawing.

use crate::draw::event::ModeEvent;
use crate::draw::mode::{Mode, ModeCx, ModeKind};
use crate::geom::{Geometry, Position, circle_polygon, haversine_distance_km};
use crate::host::{CursorIcon, HitFeature, PointerEvent};

/// The first click pins the center; mouse movement floats a control point
/// whose geodesic distance from the center defines the radius. The preview
/// shows center, control point, and the discretized circle polygon; the next
/// click commits the polygon and resets.
pub struct DrawCircleMode {
    center: Option<Position>,
    control: Option<Position>,
    steps: u32,
}

impl DrawCircleMode {
    pub fn new(steps: u32) -> Self {
        Self {
            center: None,
            control: None,
            steps,
        }
    }

    fn circle(&self, center: Position, control: Position) -> Geometry {
        circle_polygon(center, haversine_distance_km(center, control), self.steps)
    }

    fn render(&self, cx: &mut ModeCx<'_>) {
        let mut features = Vec::new();
        if let Some(center) = self.center {
            features.push(Geometry::Point(center));
        }
        if let Some(control) = self.control {
            features.push(Geometry::Point(control));
        }
        if let (Some(center), Some(control)) = (self.center, self.control) {
            features.push(self.circle(center, control));
        }
        cx.emit(ModeEvent::Render { features });
    }
}

impl Mode for DrawCircleMode {
    fn kind(&self) -> ModeKind {
        ModeKind::DrawCircle
    }

    fn cursor(&self) -> Option<CursorIcon> {
        Some(CursorIcon::Crosshair)
    }

    fn on_click(&mut self, ev: &mut PointerEvent, _hit: Option<&HitFeature>, cx: &mut ModeCx<'_>) {
        if self.center.is_none() {
            self.center = Some(ev.lng_lat.to_position());
            self.render(cx);
        } else if let Some(center) = self.center
            && self.control.is_some()
        {
            let control = ev.lng_lat.to_position();
            cx.emit(ModeEvent::Add {
                geometry: self.circle(center, control),
            });
            self.center = None;
            self.control = None;
            self.render(cx);
        }
    }

    fn on_mousemove(
        &mut self,
        ev: &mut PointerEvent,
        _hit: Option<&HitFeature>,
        cx: &mut ModeCx<'_>,
    ) {
        if self.center.is_some() {
            self.control = Some(ev.lng_lat.to_position());
            self.render(cx);
        }
    }

    fn on_origin_dblclick(&mut self, ev: &mut PointerEvent) {
        ev.prevent_default();
    }

    fn destroy(&mut self, cx: &mut ModeCx<'_>) {
        self.center = None;
        self.control = None;
        self.render(cx);
    }
}
