use engine_logging::engine_info;
use refresh_core::{AnimationCurve, AnimationPlan, HapticFeedback};
use refresh_engine::{Animator, HapticSink};

/// Stands in for a device haptic engine by logging each pulse.
pub struct LoggingHaptics;

impl HapticSink for LoggingHaptics {
    fn emit(&self, feedback: HapticFeedback) {
        match feedback {
            HapticFeedback::LightImpact { intensity } => {
                engine_info!("haptic: light impact intensity={:.2}", intensity);
            }
            HapticFeedback::Success => engine_info!("haptic: success"),
        }
    }
}

/// Logs animation plans instead of driving a render loop.
pub struct LoggingAnimator;

impl Animator for LoggingAnimator {
    fn run(&self, plan: AnimationPlan) {
        for (index, step) in plan.steps.iter().enumerate() {
            let curve = match step.curve {
                AnimationCurve::EaseOut => "ease-out".to_string(),
                AnimationCurve::Spring(spring) => format!(
                    "spring(response={:.2}, damping={:.2})",
                    spring.response, spring.damping
                ),
            };
            engine_info!(
                "animate step {} -> offset {:.1} via {} over {:?}",
                index,
                step.target,
                curve,
                step.duration
            );
        }
    }
}
