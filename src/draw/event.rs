//! Typed event envelopes between modes, the session, and the embedding app.

use crate::draw::store::FeatureId;
use crate::geom::Geometry;
use crate::host::CursorIcon;

/// Events emitted by the active mode toward the session.
///
/// Modes push these into the event sink passed to their handlers; the
/// session drains the sink after each dispatch, strictly in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeEvent {
    /// Replace the preview layer contents. Emitted on every shape-affecting
    /// change; an empty list clears the preview.
    Render { features: Vec<Geometry> },
    /// Commit a new feature; the session assigns the identifier.
    Add { geometry: Geometry },
    /// A move gesture captured a feature.
    MoveStart { id: FeatureId },
    /// In-flight translated copy; may fire many times during a drag.
    Move { id: FeatureId, geometry: Geometry },
    /// Authoritative final geometry of a move gesture.
    MoveEnd { id: FeatureId, geometry: Geometry },
    /// A feature entered the selection set.
    Select { id: FeatureId },
    /// A feature left the selection set.
    Unselect { id: FeatureId },
    /// The selection set was dropped wholesale.
    ClearSelect,
    /// Cursor affordance change for the host surface.
    Cursor { icon: Option<CursorIcon> },
}

/// Events re-published by the session to its registered listener.
///
/// Selection events are purely advisory to the embedding UI; commit events
/// report what was materialized into the feature store.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Added { id: FeatureId, geometry: Geometry },
    MoveStarted { id: FeatureId },
    Moved { id: FeatureId, geometry: Geometry },
    MoveEnded { id: FeatureId, geometry: Geometry },
    Selected { id: FeatureId },
    Unselected { id: FeatureId },
    SelectionCleared,
}
