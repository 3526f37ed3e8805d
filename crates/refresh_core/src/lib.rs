//! Elastic refresh core: resistance curve, gesture tracking and the pure
//! refresh state machine.
mod config;
mod effect;
mod msg;
mod resistance;
mod state;
mod tracker;
mod transition;
mod update;
mod view_model;

pub use config::{ConfigError, RefreshConfig, SpringProfile};
pub use effect::{AnimationCurve, AnimationPlan, AnimationStep, Effect, HapticFeedback};
pub use msg::Msg;
pub use resistance::ResistanceModel;
pub use state::{RefreshMachine, RefreshOutcome, RefreshPhase, RefreshState, SessionId};
pub use tracker::{GestureTracker, ScrollSample};
pub use transition::{animation_for, feedback_for, Transition, TransitionCause};
pub use update::update;
pub use view_model::IndicatorView;
