//! Editing modes.
//!
//! Each mode is a flat specialization of the same seven-operation vocabulary:
//! it accumulates transient input (vertices, control points, a selection set,
//! a move snapshot) and emits preview and commit events toward the session.
//! All handlers default to no-ops so concrete modes override only what they
//! need, and the orchestrator never branches on the mode kind.

pub mod draw_circle;
pub mod draw_line;
pub mod draw_point;
pub mod draw_polygon;
pub mod draw_rect;
pub mod move_feature;
pub mod select;


use crate::config::DrawConfig;
use crate::draw::event::ModeEvent;
use crate::draw::store::FeatureStore;
use crate::host::{CursorIcon, HitFeature, PointerEvent};

pub use draw_circle::DrawCircleMode;
pub use draw_line::DrawLineMode;
pub use draw_point::DrawPointMode;
pub use draw_polygon::DrawPolygonMode;
pub use draw_rect::DrawRectMode;
pub use move_feature::MoveMode;
pub use select::SelectMode;

/// Enumerated mode kinds, the key of the mode registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    /// No-op mode active when no editing behavior is engaged
    Idle,
    /// Commit a point per click
    DrawPoint,
    /// Accumulate vertices, finalize a line on double-click
    DrawLine,
    /// Accumulate vertices, finalize a closed polygon on double-click
    DrawPolygon,
    /// Two-control-point axis-aligned rectangle
    DrawRect,
    /// Center plus radius control point circle
    DrawCircle,
    /// Toggle feature membership in a selection set
    Select,
    /// Drag committed features by a geographic delta
    Move,
}

/// Per-dispatch context handed to mode handlers: a read-only view of the
/// committed store and the sink for outgoing events.
pub struct ModeCx<'a> {
    pub store: &'a FeatureStore,
    pub events: &'a mut Vec<ModeEvent>,
}

impl ModeCx<'_> {
    pub fn emit(&mut self, event: ModeEvent) {
        self.events.push(event);
    }
}

/// The gesture-handling contract shared by every editing mode.
///
/// Handlers receive the pointer event, the hit feature resolved by the host
/// engine (where applicable), and the dispatch context. `destroy` must emit
/// a final empty `Render` if the mode had an in-progress preview so the host
/// never retains stale preview geometry across a mode switch.
pub trait Mode {
    fn kind(&self) -> ModeKind;

    /// Resting cursor applied by the session when the mode becomes active.
    fn cursor(&self) -> Option<CursorIcon> {
        None
    }

    fn on_mousedown(
        &mut self,
        _ev: &mut PointerEvent,
        _hit: Option<&HitFeature>,
        _cx: &mut ModeCx<'_>,
    ) {
    }

    fn on_mouseup(
        &mut self,
        _ev: &mut PointerEvent,
        _hit: Option<&HitFeature>,
        _cx: &mut ModeCx<'_>,
    ) {
    }

    fn on_mousemove(
        &mut self,
        _ev: &mut PointerEvent,
        _hit: Option<&HitFeature>,
        _cx: &mut ModeCx<'_>,
    ) {
    }

    fn on_click(
        &mut self,
        _ev: &mut PointerEvent,
        _hit: Option<&HitFeature>,
        _cx: &mut ModeCx<'_>,
    ) {
    }

    fn on_dblclick(
        &mut self,
        _ev: &mut PointerEvent,
        _hit: Option<&HitFeature>,
        _cx: &mut ModeCx<'_>,
    ) {
    }

    fn on_drag(&mut self, _ev: &mut PointerEvent, _hit: Option<&HitFeature>, _cx: &mut ModeCx<'_>) {
    }

    /// The host's native double-click, delivered separately so a mode can
    /// suppress the default zoom behavior while editing.
    fn on_origin_dblclick(&mut self, _ev: &mut PointerEvent) {}

    fn destroy(&mut self, _cx: &mut ModeCx<'_>) {}
}

/// No-op mode active when no editing behavior is engaged.
pub(crate) struct IdleMode;

impl Mode for IdleMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Idle
    }
}

/// The mode registry: constructs the mode instance for a kind.
pub(crate) fn create_mode(kind: ModeKind, config: &DrawConfig) -> Box<dyn Mode> {
    match kind {
        ModeKind::Idle => Box::new(IdleMode),
        ModeKind::DrawPoint => Box::new(DrawPointMode::new()),
        ModeKind::DrawLine => Box::new(DrawLineMode::new()),
        ModeKind::DrawPolygon => Box::new(DrawPolygonMode::new()),
        ModeKind::DrawRect => Box::new(DrawRectMode::new()),
        ModeKind::DrawCircle => Box::new(DrawCircleMode::new(config.circle_steps)),
        ModeKind::Select => Box::new(SelectMode::new()),
        ModeKind::Move => Box::new(MoveMode::new()),
    }
}
