//! Point drawing: every click commits immediately.

use crate::draw::event::ModeEvent;
use crate::draw::mode::{Mode, ModeCx, ModeKind};
use crate::geom::Geometry;
use crate::host::{CursorIcon, HitFeature, PointerEvent};

/// Commits a point geometry at each clicked coordinate. Carries no preview
/// state, so there is nothing to flush on destroy.
pub struct DrawPointMode;

impl DrawPointMode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DrawPointMode {
    fn default() -> Self {
        Self::new()
    }
}

impl Mode for DrawPointMode {
    fn kind(&self) -> ModeKind {
        ModeKind::DrawPoint
    }

    fn cursor(&self) -> Option<CursorIcon> {
        Some(CursorIcon::Crosshair)
    }

    fn on_click(&mut self, ev: &mut PointerEvent, _hit: Option<&HitFeature>, cx: &mut ModeCx<'_>) {
        ev.prevent_default();
        cx.emit(ModeEvent::Add {
            geometry: Geometry::Point(ev.lng_lat.to_position()),
        });
    }

    fn on_origin_dblclick(&mut self, ev: &mut PointerEvent) {
        ev.prevent_default();
    }
}
