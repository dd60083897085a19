//! The draw tool: modes, events, feature store, and session orchestration.
//!
//! Control flow: host pointer events → [`EditSession`] → gesture
//! classification → active [`Mode`] handler → [`ModeEvent`]s → store update
//! and render-source resync.

pub mod event;
pub mod layers;
pub mod mode;
pub mod session;
pub mod store;

// Re-export commonly used types at module level
pub use event::{ModeEvent, SessionEvent};
pub use mode::{Mode, ModeCx, ModeKind};
pub use session::EditSession;
pub use store::{DataError, Feature, FeatureId, FeatureStore, feature_collection};

pub use layers::default_layers;
