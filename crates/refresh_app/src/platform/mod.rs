//! Headless host for the refresh controller: replays scripted gestures and
//! renders the indicator as text.
mod app;
mod args;
mod effects;
mod logging;
mod script;
mod settings;
mod trace;
mod ui;

pub use app::run_app;
