use std::time::Duration;

use crate::{RefreshConfig, SessionId, SpringProfile, Transition};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A phase change happened; observers may react to it.
    Transitioned(Transition),
    Haptic(HapticFeedback),
    Animate(AnimationPlan),
    /// Start the external refresh action. Emitted once per session.
    InvokeRefresh { session: SessionId },
    /// Report `DwellElapsed { session }` after the given delay.
    ScheduleDwell { session: SessionId, after: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HapticFeedback {
    /// Light impact with intensity in `[0, 1]`.
    LightImpact { intensity: f64 },
    /// Distinct success notification.
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationCurve {
    EaseOut,
    Spring(SpringProfile),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep {
    pub target: f64,
    pub curve: AnimationCurve,
    pub duration: Duration,
}

/// Steps the animator runs back to back on the indicator offset.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPlan {
    pub steps: Vec<AnimationStep>,
}

impl AnimationPlan {
    pub fn snap_back(config: &RefreshConfig) -> Self {
        Self {
            steps: vec![spring_to(0.0, config.snap_back)],
        }
    }

    /// Travel past the locked position by `overshoot_distance`, then spring
    /// back to rest at `trigger_threshold`.
    pub fn overshoot_then_settle(config: &RefreshConfig) -> Self {
        Self {
            steps: vec![
                AnimationStep {
                    target: config.trigger_threshold + config.overshoot_distance,
                    curve: AnimationCurve::EaseOut,
                    duration: config.overshoot_duration,
                },
                spring_to(config.trigger_threshold, config.settle),
            ],
        }
    }

    /// Offset the indicator rests at once every step has run.
    pub fn final_target(&self) -> Option<f64> {
        self.steps.last().map(|step| step.target)
    }
}

impl SpringProfile {
    /// Time the spring is given to come to rest.
    pub fn settling_time(&self) -> Duration {
        Duration::from_secs_f64(self.response * (2.0 - self.damping))
    }
}

fn spring_to(target: f64, spring: SpringProfile) -> AnimationStep {
    AnimationStep {
        target,
        curve: AnimationCurve::Spring(spring),
        duration: spring.settling_time(),
    }
}
