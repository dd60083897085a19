//! Pointer gesture classification.
//!
//! Pure predicates that decide whether a pointer-down/pointer-up pair was a
//! click (as opposed to a drag) and whether two accepted clicks form a
//! double-click. Classification runs on screen-space pixel distances and
//! elapsed milliseconds, so it is independent of map zoom and projection.
//!
//! The click/double-click split is a timer-less heuristic: a genuine double
//! click and two rapid independent clicks are told apart only by the interval
//! threshold. The thresholds are tunable via [`ClickOptions`], not a
//! guaranteed-correct gesture parser.

use serde::{Deserialize, Serialize};

use crate::host::ScreenPoint;

/// A single pointer sample: where and when a button changed state.
///
/// Produced at pointer-down and pointer-up and discarded right after
/// classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Monotonic timestamp in milliseconds, as delivered by the host
    pub timestamp_ms: u64,
    /// Screen-space pixel position
    pub point: ScreenPoint,
}

/// Distance and interval thresholds for click classification.
///
/// Both tolerances must pass; keeping two thresholds is a deliberate
/// conjunction retained for tunability, not redundancy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickOptions {
    /// Fine movement tolerance in pixels
    pub fine_tolerance: f64,
    /// Gross movement tolerance in pixels
    pub gross_tolerance: f64,
    /// Maximum elapsed time in milliseconds
    pub interval_ms: u64,
}

impl ClickOptions {
    /// Defaults for single-click classification (4 px / 12 px / 500 ms).
    pub fn click() -> Self {
        Self {
            fine_tolerance: 4.0,
            gross_tolerance: 12.0,
            interval_ms: 500,
        }
    }

    /// Defaults for double-click classification; same distances with a
    /// shorter 300 ms window.
    pub fn double_click() -> Self {
        Self {
            interval_ms: 300,
            ..Self::click()
        }
    }
}

impl Default for ClickOptions {
    fn default() -> Self {
        Self::click()
    }
}

/// Straight-line pixel distance between two screen points.
pub fn euclidean_distance(a: ScreenPoint, b: ScreenPoint) -> f64 {
    let x = a.x - b.x;
    let y = a.y - b.y;
    (x * x + y * y).sqrt()
}

/// Whether a pointer-down/pointer-up pair classifies as a click.
///
/// True iff the pixel distance between the samples is strictly below both
/// tolerances and the elapsed time is strictly below the interval.
pub fn is_click(start: &GestureSample, end: &GestureSample, options: &ClickOptions) -> bool {
    let distance = euclidean_distance(start.point, end.point);
    let elapsed = end.timestamp_ms.saturating_sub(start.timestamp_ms);
    distance < options.fine_tolerance
        && distance < options.gross_tolerance
        && elapsed < options.interval_ms
}

/// Whether an accepted click forms a double-click with the previous one.
///
/// Always false when no previous click exists.
pub fn is_double_click(
    end: &GestureSample,
    previous: Option<&GestureSample>,
    options: &ClickOptions,
) -> bool {
    match previous {
        Some(previous) => is_click(previous, end, options),
        None => false,
    }
}
