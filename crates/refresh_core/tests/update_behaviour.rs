use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use refresh_core::{
    update, AnimationPlan, Effect, HapticFeedback, Msg, RefreshConfig, RefreshMachine,
    RefreshOutcome, RefreshPhase, RefreshState, ScrollSample, Transition, TransitionCause,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// Drives a machine and keeps every effect it produced.
struct Harness {
    machine: Option<RefreshMachine>,
    clock: u64,
    effects: Vec<Effect>,
}

impl Harness {
    fn new() -> Self {
        init_logging();
        Self {
            machine: Some(RefreshMachine::default()),
            clock: 0,
            effects: Vec::new(),
        }
    }

    fn send(&mut self, msg: Msg) -> Vec<Effect> {
        let machine = self.machine.take().unwrap();
        let (machine, effects) = update(machine, msg);
        self.machine = Some(machine);
        self.effects.extend(effects.iter().cloned());
        effects
    }

    fn tick(&mut self) -> Duration {
        self.clock += 16;
        Duration::from_millis(self.clock)
    }

    fn begin(&mut self) -> Vec<Effect> {
        let timestamp = self.tick();
        self.send(Msg::DragBegan {
            offset_y: 0.0,
            top_inset: 0.0,
            timestamp,
        })
    }

    fn pull_to(&mut self, distance: f64) -> Vec<Effect> {
        let timestamp = self.tick();
        self.send(Msg::Scrolled(ScrollSample::new(-distance, timestamp)))
    }

    fn release(&mut self) -> Vec<Effect> {
        let timestamp = self.tick();
        self.send(Msg::DragEnded { timestamp })
    }

    fn machine(&self) -> &RefreshMachine {
        self.machine.as_ref().unwrap()
    }

    fn state(&self) -> RefreshState {
        self.machine().state()
    }

    fn refresh_invocations(&self) -> usize {
        self.effects
            .iter()
            .filter(|effect| matches!(effect, Effect::InvokeRefresh { .. }))
            .count()
    }

    fn visited(&self) -> Vec<RefreshPhase> {
        self.effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Transitioned(transition) => Some(transition.to),
                _ => None,
            })
            .collect()
    }
}

fn pulling_progress(state: RefreshState) -> f64 {
    match state {
        RefreshState::Pulling { progress } => progress,
        other => panic!("expected pulling, got {other:?}"),
    }
}

#[test]
fn short_pull_enters_pulling_with_linear_progress() {
    let mut h = Harness::new();
    assert!(h.begin().is_empty());

    let effects = h.pull_to(50.0);

    assert!((pulling_progress(h.state()) - 0.556).abs() < 1e-3);
    assert_eq!(
        effects,
        vec![Effect::Transitioned(Transition::new(
            RefreshPhase::Idle,
            RefreshPhase::Pulling,
            TransitionCause::Drag,
        ))]
    );
    assert_eq!(h.machine().offset(), 50.0);
    assert_eq!(h.machine().view().opacity, pulling_progress(h.state()));
}

#[test]
fn damped_pull_just_below_threshold_stays_pulling() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(50.0);
    let effects = h.pull_to(90.0);

    assert!((pulling_progress(h.state()) - 0.963).abs() < 1e-3);
    assert!(effects.is_empty(), "progress change is not a phase change");
}

#[test]
fn deep_pull_arms_with_one_light_pulse() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(50.0);
    let effects = h.pull_to(130.0);

    assert_eq!(h.state(), RefreshState::Armed);
    assert_eq!(
        effects,
        vec![
            Effect::Transitioned(Transition::new(
                RefreshPhase::Pulling,
                RefreshPhase::Armed,
                TransitionCause::Drag,
            )),
            Effect::Haptic(HapticFeedback::LightImpact { intensity: 0.7 }),
        ]
    );

    // Pulling further while armed is silent.
    assert!(h.pull_to(140.0).is_empty());
    assert!(h.pull_to(140.0).is_empty());
}

#[test]
fn first_sample_past_threshold_still_passes_through_pulling() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(130.0);

    assert_eq!(h.state(), RefreshState::Armed);
    assert_eq!(h.visited(), vec![RefreshPhase::Pulling, RefreshPhase::Armed]);
}

#[test]
fn repeated_identical_samples_produce_one_transition() {
    let mut h = Harness::new();
    h.begin();
    for _ in 0..5 {
        h.pull_to(40.0);
    }
    assert_eq!(h.visited(), vec![RefreshPhase::Pulling]);
}

#[test]
fn release_while_armed_runs_full_cycle() {
    let mut h = Harness::new();
    let config = RefreshConfig::default();
    h.begin();
    h.pull_to(130.0);

    let effects = h.release();
    assert_eq!(h.state(), RefreshState::Refreshing);
    assert!(h.machine().is_refresh_in_flight());
    assert_eq!(h.machine().offset(), config.trigger_threshold);
    assert_eq!(
        effects,
        vec![
            Effect::Transitioned(Transition::new(
                RefreshPhase::Armed,
                RefreshPhase::Refreshing,
                TransitionCause::Release,
            )),
            Effect::Animate(AnimationPlan::overshoot_then_settle(&config)),
            Effect::InvokeRefresh { session: 1 },
        ]
    );

    let effects = h.send(Msg::RefreshSettled {
        session: 1,
        outcome: RefreshOutcome::Succeeded,
    });
    assert_eq!(h.state(), RefreshState::Completed);
    assert_eq!(
        effects,
        vec![
            Effect::Transitioned(Transition::new(
                RefreshPhase::Refreshing,
                RefreshPhase::Completed,
                TransitionCause::RefreshSettled,
            )),
            Effect::Haptic(HapticFeedback::Success),
            Effect::ScheduleDwell {
                session: 1,
                after: Duration::from_millis(500),
            },
        ]
    );

    let effects = h.send(Msg::DwellElapsed { session: 1 });
    assert_eq!(h.state(), RefreshState::Idle);
    assert_eq!(h.machine().offset(), 0.0);
    assert_eq!(h.machine().active_session(), None);
    assert_eq!(
        effects,
        vec![
            Effect::Transitioned(Transition::new(
                RefreshPhase::Completed,
                RefreshPhase::Idle,
                TransitionCause::DwellElapsed,
            )),
            Effect::Animate(AnimationPlan::snap_back(&config)),
        ]
    );

    assert_eq!(
        h.visited(),
        vec![
            RefreshPhase::Pulling,
            RefreshPhase::Armed,
            RefreshPhase::Refreshing,
            RefreshPhase::Completed,
            RefreshPhase::Idle,
        ]
    );
    assert_eq!(h.refresh_invocations(), 1);
}

#[test]
fn failed_refresh_still_completes() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(130.0);
    h.release();

    h.send(Msg::RefreshSettled {
        session: 1,
        outcome: RefreshOutcome::Failed,
    });
    assert_eq!(h.state(), RefreshState::Completed);
    assert!(h.machine().view().checkmark_visible);
}

#[test]
fn release_below_threshold_snaps_back_without_refresh() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(36.0);
    assert!((pulling_progress(h.state()) - 0.4).abs() < 1e-9);

    let effects = h.release();

    assert_eq!(h.state(), RefreshState::Idle);
    assert_eq!(h.machine().offset(), 0.0);
    assert_eq!(
        effects,
        vec![
            Effect::Transitioned(Transition::new(
                RefreshPhase::Pulling,
                RefreshPhase::Idle,
                TransitionCause::Release,
            )),
            Effect::Animate(AnimationPlan::snap_back(&RefreshConfig::default())),
        ]
    );
    assert_eq!(h.refresh_invocations(), 0);
}

#[test]
fn no_sub_threshold_release_ever_refreshes() {
    let model = *RefreshMachine::default().model();
    for step in 1..=95 {
        let distance = f64::from(step);
        if model.progress(distance) >= 1.0 {
            continue;
        }
        let mut h = Harness::new();
        h.begin();
        h.pull_to(distance);
        h.release();
        assert_eq!(h.state(), RefreshState::Idle, "distance {distance}");
        assert_eq!(h.refresh_invocations(), 0, "distance {distance}");
    }
}

#[test]
fn dropping_back_below_threshold_disarms_with_weaker_pulse() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(130.0);

    let effects = h.pull_to(50.0);

    assert!((pulling_progress(h.state()) - 0.556).abs() < 1e-3);
    assert_eq!(
        effects,
        vec![
            Effect::Transitioned(Transition::new(
                RefreshPhase::Armed,
                RefreshPhase::Pulling,
                TransitionCause::Drag,
            )),
            Effect::Haptic(HapticFeedback::LightImpact { intensity: 0.35 }),
        ]
    );

    h.release();
    assert_eq!(h.state(), RefreshState::Idle);
    assert_eq!(h.refresh_invocations(), 0);
}

#[test]
fn dragging_back_to_rest_returns_to_idle_without_animation() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(30.0);
    let effects = h.pull_to(0.0);

    assert_eq!(h.state(), RefreshState::Idle);
    assert_eq!(
        effects,
        vec![Effect::Transitioned(Transition::new(
            RefreshPhase::Pulling,
            RefreshPhase::Idle,
            TransitionCause::Drag,
        ))]
    );
    // Still tracking: pulling again re-enters pulling.
    h.pull_to(20.0);
    assert!(matches!(h.state(), RefreshState::Pulling { .. }));
}

#[test]
fn input_during_refresh_is_discarded() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(130.0);
    h.release();
    let before = h.machine().clone();

    for _ in 0..3 {
        assert!(h.begin().is_empty());
        assert!(h.pull_to(140.0).is_empty());
        assert!(h.release().is_empty());
    }

    assert_eq!(h.state(), RefreshState::Refreshing);
    assert_eq!(h.machine().offset(), before.offset());
    assert!(!h.machine().tracker().is_tracking());
    assert_eq!(h.refresh_invocations(), 1);
}

#[test]
fn input_during_completion_dwell_is_discarded() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(130.0);
    h.release();
    h.send(Msg::RefreshSettled {
        session: 1,
        outcome: RefreshOutcome::Succeeded,
    });

    assert!(h.begin().is_empty());
    assert!(h.pull_to(140.0).is_empty());
    assert!(h.release().is_empty());
    assert_eq!(h.state(), RefreshState::Completed);
}

#[test]
fn stale_completion_messages_are_ignored() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(130.0);
    h.release();

    assert!(h
        .send(Msg::RefreshSettled {
            session: 7,
            outcome: RefreshOutcome::Succeeded,
        })
        .is_empty());
    assert!(h.send(Msg::DwellElapsed { session: 1 }).is_empty());
    assert_eq!(h.state(), RefreshState::Refreshing);

    h.send(Msg::RefreshSettled {
        session: 1,
        outcome: RefreshOutcome::Succeeded,
    });
    assert!(h
        .send(Msg::RefreshSettled {
            session: 1,
            outcome: RefreshOutcome::Succeeded,
        })
        .is_empty());
    assert_eq!(h.state(), RefreshState::Completed);
}

#[test]
fn second_session_gets_a_new_id() {
    let mut h = Harness::new();
    for expected in 1..=2 {
        h.begin();
        h.pull_to(130.0);
        let effects = h.release();
        assert!(effects.contains(&Effect::InvokeRefresh { session: expected }));
        h.send(Msg::RefreshSettled {
            session: expected,
            outcome: RefreshOutcome::Succeeded,
        });
        h.send(Msg::DwellElapsed { session: expected });
        assert_eq!(h.state(), RefreshState::Idle);
    }
    assert_eq!(h.refresh_invocations(), 2);
}

#[test]
fn samples_after_release_are_discarded() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(40.0);
    h.release();

    assert!(h.pull_to(130.0).is_empty());
    assert_eq!(h.state(), RefreshState::Idle);
}

#[test]
fn out_of_order_samples_are_discarded() {
    let mut h = Harness::new();
    h.begin();
    h.pull_to(40.0);
    let effects = h.send(Msg::Scrolled(ScrollSample::new(-130.0, Duration::ZERO)));

    assert!(effects.is_empty());
    assert!(matches!(h.state(), RefreshState::Pulling { .. }));
}

#[test]
fn top_inset_is_subtracted_from_pull() {
    let mut h = Harness::new();
    h.send(Msg::DragBegan {
        offset_y: -44.0,
        top_inset: 44.0,
        timestamp: Duration::ZERO,
    });
    assert_eq!(h.state(), RefreshState::Idle);

    h.send(Msg::Scrolled(ScrollSample::new(-94.0, Duration::from_millis(16))));
    assert_eq!(h.machine().offset(), 50.0);

    h.send(Msg::TopInsetChanged(0.0));
    h.send(Msg::Scrolled(ScrollSample::new(-94.0, Duration::from_millis(32))));
    let expected = h.machine().model().display_offset(94.0);
    assert_eq!(h.machine().offset(), expected);
}

#[test]
fn dirty_flag_tracks_visible_changes() {
    let mut h = Harness::new();
    h.begin();
    let mut machine = h.machine.take().unwrap();
    assert!(!machine.consume_dirty());
    h.machine = Some(machine);

    h.pull_to(20.0);
    let mut machine = h.machine.take().unwrap();
    assert!(machine.consume_dirty());
    assert!(!machine.consume_dirty());
    h.machine = Some(machine);

    h.pull_to(20.0);
    assert!(!h.machine.as_mut().unwrap().consume_dirty());
}
