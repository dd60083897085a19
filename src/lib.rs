//! Interactive vector-geometry editing toolkit for map engines.
//!
//! `mapdraw` layers a drawing tool with pluggable editing modes (point,
//! line, polygon, rectangle, circle, select, move) on top of an external
//! map renderer. The host engine is abstracted behind the
//! [`MapHost`](host::MapHost) trait; this crate owns gesture
//! classification, per-mode geometry construction, and the committed
//! feature collection.

pub mod config;
pub mod draw;
pub mod geom;
pub mod gesture;
pub mod host;

pub use config::DrawConfig;
pub use draw::{EditSession, Feature, FeatureStore, ModeEvent, ModeKind, SessionEvent};
pub use geom::{Geometry, Position};
pub use gesture::{ClickOptions, GestureSample};
pub use host::{CursorIcon, HitFeature, LayerSpec, LngLat, MapHost, PointerEvent, ScreenPoint};
