use refresh_core::{AnimationPlan, HapticFeedback};

/// Fire-and-forget haptic output.
pub trait HapticSink: Send + Sync {
    fn emit(&self, feedback: HapticFeedback);
}

/// Runs indicator offset animations. Must not block; the plan's steps are
/// expected to run back to back on the host's animation clock.
pub trait Animator: Send + Sync {
    fn run(&self, plan: AnimationPlan);
}

/// Haptic sink for hosts without a haptic engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl HapticSink for NoHaptics {
    fn emit(&self, _feedback: HapticFeedback) {}
}

/// Animator for hosts that read the offset straight from the view.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnimation;

impl Animator for NoAnimation {
    fn run(&self, _plan: AnimationPlan) {}
}
