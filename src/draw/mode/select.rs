//! Feature selection.

use std::collections::HashSet;

use log::debug;

use crate::draw::event::ModeEvent;
use crate::draw::mode::{Mode, ModeCx, ModeKind};
use crate::draw::store::FeatureId;
use crate::host::{CursorIcon, HitFeature, PointerEvent};

/// Toggles the hit feature's identifier in an internal selection set on each
/// click, announcing the change to the session. Hovering a feature raises a
/// pointer cursor. Destroy clears the selection wholesale.
pub struct SelectMode {
    selected: HashSet<FeatureId>,
    hovering: bool,
}

impl SelectMode {
    pub fn new() -> Self {
        Self {
            selected: HashSet::new(),
            hovering: false,
        }
    }
}

impl Default for SelectMode {
    fn default() -> Self {
        Self::new()
    }
}

impl Mode for SelectMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Select
    }

    fn on_click(&mut self, _ev: &mut PointerEvent, hit: Option<&HitFeature>, cx: &mut ModeCx<'_>) {
        let Some(hit) = hit else { return };
        // ids from foreign sources, or removed mid-gesture, are abandoned
        if !cx.store.contains(&hit.id) {
            debug!("select ignored unknown feature id {}", hit.id);
            return;
        }

        if self.selected.remove(&hit.id) {
            cx.emit(ModeEvent::Unselect {
                id: hit.id.clone(),
            });
        } else {
            self.selected.insert(hit.id.clone());
            cx.emit(ModeEvent::Select {
                id: hit.id.clone(),
            });
        }
    }

    fn on_mousemove(
        &mut self,
        _ev: &mut PointerEvent,
        hit: Option<&HitFeature>,
        cx: &mut ModeCx<'_>,
    ) {
        let over = hit.is_some();
        if over != self.hovering {
            self.hovering = over;
            cx.emit(ModeEvent::Cursor {
                icon: over.then_some(CursorIcon::Pointer),
            });
        }
    }

    fn destroy(&mut self, cx: &mut ModeCx<'_>) {
        cx.emit(ModeEvent::ClearSelect);
        if self.hovering {
            self.hovering = false;
            cx.emit(ModeEvent::Cursor { icon: None });
        }
        self.selected.clear();
    }
}
