use crate::{AnimationPlan, HapticFeedback, RefreshConfig, RefreshPhase};

/// What moved the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCause {
    Drag,
    Release,
    RefreshSettled,
    DwellElapsed,
}

/// A phase change. Haptics and animations are derived from these events, never
/// from state values, so repeated identical samples cannot re-fire them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: RefreshPhase,
    pub to: RefreshPhase,
    pub cause: TransitionCause,
}

impl Transition {
    pub fn new(from: RefreshPhase, to: RefreshPhase, cause: TransitionCause) -> Self {
        Self { from, to, cause }
    }
}

pub fn feedback_for(transition: &Transition, config: &RefreshConfig) -> Option<HapticFeedback> {
    use RefreshPhase::{Armed, Completed, Pulling, Refreshing};

    match (transition.from, transition.to) {
        (Pulling, Armed) => Some(HapticFeedback::LightImpact {
            intensity: config.arm_haptic_intensity,
        }),
        (Armed, Pulling) => Some(HapticFeedback::LightImpact {
            intensity: config.disarm_haptic_intensity,
        }),
        (Refreshing, Completed) => Some(HapticFeedback::Success),
        _ => None,
    }
}

pub fn animation_for(transition: &Transition, config: &RefreshConfig) -> Option<AnimationPlan> {
    use RefreshPhase::{Armed, Completed, Idle, Pulling, Refreshing};

    match (transition.from, transition.to, transition.cause) {
        (Pulling | Armed, Idle, TransitionCause::Release) => Some(AnimationPlan::snap_back(config)),
        (Armed, Refreshing, _) => Some(AnimationPlan::overshoot_then_settle(config)),
        (Completed, Idle, _) => Some(AnimationPlan::snap_back(config)),
        _ => None,
    }
}
