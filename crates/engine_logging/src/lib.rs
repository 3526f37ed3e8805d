#![deny(missing_docs)]
//! Shared logging utilities for the elastic refresh workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a frame tick used to correlate scroll samples in log output, and a minimal
//! test initializer for the global logger.
//!
//! The tick lives in a thread-local. Whoever owns the count (the refresh
//! controller) stamps it with [`set_frame_tick`] right before synchronous work,
//! so it is only meaningful until the next `.await`.

use std::cell::Cell;

thread_local! {
    /// Frame tick stamped by the last [`set_frame_tick`] on this thread.
    static FRAME_TICK: Cell<u64> = const { Cell::new(0) };
}

/// Sets the frame tick that `engine_trace!`/`engine_debug!` report on the
/// current thread.
pub fn set_frame_tick(tick: u64) {
    FRAME_TICK.with(|v| v.set(tick));
}

/// Retrieves the host frame tick for the current thread.
/// Returns 0 if the tick has not been set.
pub fn frame_tick() -> u64 {
    FRAME_TICK.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current frame tick.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!("[frame {}] {}", $crate::frame_tick(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message tagged with the current frame tick.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("[frame {}] {}", $crate::frame_tick(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Trace in debug builds so every sample shows up; info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
