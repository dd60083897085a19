//! Dragging committed features.

use log::warn;

use crate::draw::event::ModeEvent;
use crate::draw::mode::{Mode, ModeCx, ModeKind};
use crate::draw::store::FeatureId;
use crate::geom::{Geometry, Position};
use crate::host::{CursorIcon, HitFeature, PointerEvent};

/// In-flight move gesture: the captured feature, a snapshot of its committed
/// geometry, and the pointer coordinate the drag started at.
struct MoveCapture {
    id: FeatureId,
    snapshot: Geometry,
    start: Position,
}

impl MoveCapture {
    /// Snapshot translated by the delta from the start coordinate to `to`.
    /// Planar componentwise addition in (lng, lat) degrees.
    fn translated_to(&self, to: Position) -> Geometry {
        self.snapshot
            .translated([to[0] - self.start[0], to[1] - self.start[1]])
    }
}

/// Pointer-down over a hit feature snapshots its geometry and starts a drag;
/// movement emits translated copies; pointer-up emits the authoritative
/// `MoveEnd`. The snapshot is a clone, so the committed copy is never touched
/// while the drag is in flight.
pub struct MoveMode {
    capture: Option<MoveCapture>,
    hovering: bool,
}

impl MoveMode {
    pub fn new() -> Self {
        Self {
            capture: None,
            hovering: false,
        }
    }

    fn finish(&mut self, ev: &PointerEvent, cx: &mut ModeCx<'_>) {
        if let Some(capture) = self.capture.take() {
            let geometry = capture.translated_to(ev.lng_lat.to_position());
            cx.emit(ModeEvent::MoveEnd {
                id: capture.id,
                geometry,
            });
        }
    }
}

impl Default for MoveMode {
    fn default() -> Self {
        Self::new()
    }
}

impl Mode for MoveMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Move
    }

    fn on_mousedown(
        &mut self,
        ev: &mut PointerEvent,
        hit: Option<&HitFeature>,
        cx: &mut ModeCx<'_>,
    ) {
        let Some(hit) = hit else { return };
        let Some(geometry) = cx.store.get(&hit.id) else {
            warn!("move aborted: feature {} is not in the store", hit.id);
            return;
        };

        self.capture = Some(MoveCapture {
            id: hit.id.clone(),
            snapshot: geometry.clone(),
            start: ev.lng_lat.to_position(),
        });
        cx.emit(ModeEvent::MoveStart {
            id: hit.id.clone(),
        });
        // keep the host from panning the map while dragging the feature
        ev.prevent_default();
    }

    fn on_mousemove(
        &mut self,
        ev: &mut PointerEvent,
        hit: Option<&HitFeature>,
        cx: &mut ModeCx<'_>,
    ) {
        if let Some(capture) = &self.capture {
            cx.emit(ModeEvent::Move {
                id: capture.id.clone(),
                geometry: capture.translated_to(ev.lng_lat.to_position()),
            });
        }

        let over = hit.is_some();
        if over != self.hovering {
            self.hovering = over;
            cx.emit(ModeEvent::Cursor {
                icon: over.then_some(CursorIcon::Move),
            });
        }
    }

    fn on_mouseup(&mut self, ev: &mut PointerEvent, _hit: Option<&HitFeature>, cx: &mut ModeCx<'_>) {
        self.finish(ev, cx);
    }

    fn on_click(&mut self, ev: &mut PointerEvent, _hit: Option<&HitFeature>, cx: &mut ModeCx<'_>) {
        // a motionless press classifies as a click; finish with a zero delta
        // so no live capture survives the gesture
        self.finish(ev, cx);
    }

    fn on_origin_dblclick(&mut self, ev: &mut PointerEvent) {
        ev.prevent_default();
    }

    fn destroy(&mut self, cx: &mut ModeCx<'_>) {
        self.capture = None;
        if self.hovering {
            self.hovering = false;
            cx.emit(ModeEvent::Cursor { icon: None });
        }
    }
}
