//! Elastic refresh engine: runs the core state machine on a tokio task and
//! executes its effects (refresh action, haptics, animation, dwell timer).
mod action;
mod controller;
mod sinks;
mod types;
mod wrap;

pub use action::{refresh_fn, try_refresh_fn, FnRefreshAction, RefreshAction, TryFnRefreshAction};
pub use controller::{RefreshController, RefreshHandle};
pub use sinks::{Animator, HapticSink, NoAnimation, NoHaptics};
pub use types::{EngineError, ScrollEvent};
pub use wrap::{refreshable, Refreshable, RefreshableBuilder};
