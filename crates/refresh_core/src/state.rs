use std::fmt;

use serde::Serialize;

use crate::view_model::IndicatorView;
use crate::{GestureTracker, RefreshConfig, ResistanceModel};

/// Identifies one armed-to-idle refresh cycle. Completion messages carry it so
/// stale reports from an earlier cycle can be told apart.
pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RefreshState {
    #[default]
    Idle,
    Pulling {
        progress: f64,
    },
    Armed,
    Refreshing,
    Completed,
}

impl RefreshState {
    pub fn phase(&self) -> RefreshPhase {
        match self {
            RefreshState::Idle => RefreshPhase::Idle,
            RefreshState::Pulling { .. } => RefreshPhase::Pulling,
            RefreshState::Armed => RefreshPhase::Armed,
            RefreshState::Refreshing => RefreshPhase::Refreshing,
            RefreshState::Completed => RefreshPhase::Completed,
        }
    }

    pub fn progress(&self) -> f64 {
        match self {
            RefreshState::Idle => 0.0,
            RefreshState::Pulling { progress } => *progress,
            RefreshState::Armed | RefreshState::Refreshing | RefreshState::Completed => 1.0,
        }
    }

    /// Whether gesture input may move the machine. False while a refresh is
    /// in flight or its completion is being shown.
    pub fn accepts_gestures(&self) -> bool {
        !matches!(self, RefreshState::Refreshing | RefreshState::Completed)
    }
}

/// Fieldless view of [`RefreshState`], used for transition events and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPhase {
    Idle,
    Pulling,
    Armed,
    Refreshing,
    Completed,
}

impl fmt::Display for RefreshPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RefreshPhase::Idle => "idle",
            RefreshPhase::Pulling => "pulling",
            RefreshPhase::Armed => "armed",
            RefreshPhase::Refreshing => "refreshing",
            RefreshPhase::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// How the external refresh action settled. Only logged; both outcomes
/// finish in `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    Succeeded,
    Failed,
}

/// The single live refresh state plus everything needed to advance it.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshMachine {
    config: RefreshConfig,
    model: ResistanceModel,
    state: RefreshState,
    tracker: GestureTracker,
    offset: f64,
    active_session: Option<SessionId>,
    sessions_started: SessionId,
    dirty: bool,
}

impl Default for RefreshMachine {
    fn default() -> Self {
        Self::new(RefreshConfig::default())
    }
}

impl RefreshMachine {
    /// Builds a machine at rest. The config is expected to have passed
    /// [`RefreshConfig::validate`].
    pub fn new(config: RefreshConfig) -> Self {
        Self {
            model: ResistanceModel::new(&config),
            config,
            state: RefreshState::Idle,
            tracker: GestureTracker::new(),
            offset: 0.0,
            active_session: None,
            sessions_started: 0,
            dirty: false,
        }
    }

    pub fn view(&self) -> IndicatorView {
        IndicatorView::from_state(self.state, self.offset)
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    pub fn model(&self) -> &ResistanceModel {
        &self.model
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.active_session
    }

    /// True exactly while the external refresh action is outstanding.
    pub fn is_refresh_in_flight(&self) -> bool {
        self.state == RefreshState::Refreshing
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn tracker_mut(&mut self) -> &mut GestureTracker {
        &mut self.tracker
    }

    /// Replaces the live state. Returns the previous state when the phase
    /// actually changed.
    pub(crate) fn set_state(&mut self, next: RefreshState) -> Option<RefreshState> {
        if self.state == next {
            return None;
        }
        let previous = std::mem::replace(&mut self.state, next);
        self.dirty = true;
        (previous.phase() != next.phase()).then_some(previous)
    }

    pub(crate) fn set_offset(&mut self, offset: f64) {
        if self.offset != offset {
            self.offset = offset;
            self.dirty = true;
        }
    }

    pub(crate) fn start_session(&mut self) -> SessionId {
        self.sessions_started += 1;
        self.active_session = Some(self.sessions_started);
        self.sessions_started
    }

    /// Returns the machine to rest at the end of a session.
    pub(crate) fn finish_session(&mut self) {
        self.active_session = None;
        self.tracker.reset();
    }
}
