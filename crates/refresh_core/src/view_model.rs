use serde::Serialize;

use crate::RefreshState;

/// Everything an indicator needs to draw itself. Pure function of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorView {
    pub state: RefreshState,
    pub progress: f64,
    /// Resting offset of the indicator in points. While the finger is down
    /// this is the clamped elastic offset; otherwise it is the target the
    /// current animation settles on.
    pub offset: f64,
    pub opacity: f64,
    pub rotation_degrees: f64,
    pub spinner_visible: bool,
    pub checkmark_visible: bool,
}

impl IndicatorView {
    pub fn from_state(state: RefreshState, offset: f64) -> Self {
        let progress = state.progress();
        let opacity = match state {
            RefreshState::Idle => 0.0,
            RefreshState::Pulling { progress } => progress,
            RefreshState::Armed | RefreshState::Refreshing | RefreshState::Completed => 1.0,
        };
        Self {
            state,
            progress,
            offset,
            opacity,
            rotation_degrees: progress * 360.0,
            spinner_visible: state == RefreshState::Refreshing,
            checkmark_visible: state == RefreshState::Completed,
        }
    }
}

impl Default for IndicatorView {
    fn default() -> Self {
        Self::from_state(RefreshState::Idle, 0.0)
    }
}
