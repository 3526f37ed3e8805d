use engine_logging::{engine_debug, engine_info, engine_trace, engine_warn};

use crate::transition::{animation_for, feedback_for};
use crate::{
    Effect, Msg, RefreshMachine, RefreshOutcome, RefreshState, Transition, TransitionCause,
};

/// Pure update function: applies a message to the machine and returns any effects.
pub fn update(mut machine: RefreshMachine, msg: Msg) -> (RefreshMachine, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::DragBegan {
            offset_y,
            top_inset,
            timestamp,
        } => {
            if !machine.state().accepts_gestures() {
                engine_debug!("drag began while {}; ignored", machine.state().phase());
                return (machine, effects);
            }
            machine.tracker_mut().begin(offset_y, top_inset, timestamp);
            engine_trace!("drag began at offset {offset_y:.1} inset {top_inset:.1}");
            let pull_distance = machine.tracker().pull_distance();
            apply_pull(&mut machine, pull_distance, &mut effects);
        }
        Msg::Scrolled(sample) => {
            if !machine.state().accepts_gestures() {
                return (machine, effects);
            }
            match machine.tracker_mut().sample(sample) {
                Some(pull_distance) => apply_pull(&mut machine, pull_distance, &mut effects),
                None => engine_trace!("sample at {:?} discarded", sample.timestamp),
            }
        }
        Msg::TopInsetChanged(top_inset) => {
            machine.tracker_mut().set_top_inset(top_inset);
        }
        Msg::DragEnded { timestamp } => {
            if !machine.tracker().is_tracking() {
                engine_trace!("drag ended at {timestamp:?} without an active gesture");
                return (machine, effects);
            }
            engine_debug!(
                "drag ended after {:.1} pt of travel, pull {:.1}",
                machine.tracker().travel(),
                machine.tracker().pull_distance()
            );
            release(&mut machine, &mut effects);
        }
        Msg::RefreshSettled { session, outcome } => {
            if machine.state() != RefreshState::Refreshing
                || machine.active_session() != Some(session)
            {
                engine_debug!("stale refresh completion for session {session}; ignored");
                return (machine, effects);
            }
            if outcome == RefreshOutcome::Failed {
                engine_warn!("refresh action for session {session} failed; showing completion");
            }
            enter(
                &mut machine,
                RefreshState::Completed,
                TransitionCause::RefreshSettled,
                &mut effects,
            );
            let after = machine.config().completion_dwell;
            effects.push(Effect::ScheduleDwell { session, after });
        }
        Msg::DwellElapsed { session } => {
            if machine.state() != RefreshState::Completed
                || machine.active_session() != Some(session)
            {
                engine_debug!("stale dwell for session {session}; ignored");
                return (machine, effects);
            }
            enter(
                &mut machine,
                RefreshState::Idle,
                TransitionCause::DwellElapsed,
                &mut effects,
            );
            machine.set_offset(0.0);
            machine.finish_session();
            engine_info!("refresh session {session} finished");
        }
    }

    (machine, effects)
}

/// Advances the machine for a new pull distance while the finger is down.
fn apply_pull(machine: &mut RefreshMachine, pull_distance: f64, effects: &mut Vec<Effect>) {
    let model = *machine.model();
    let progress = model.progress(pull_distance);
    machine.set_offset(model.display_offset(pull_distance));

    let cause = TransitionCause::Drag;
    match machine.state() {
        RefreshState::Idle => {
            if pull_distance > 0.0 {
                enter(machine, RefreshState::Pulling { progress }, cause, effects);
                if progress >= 1.0 {
                    enter(machine, RefreshState::Armed, cause, effects);
                }
            }
        }
        RefreshState::Pulling { .. } => {
            if pull_distance <= 0.0 {
                enter(machine, RefreshState::Idle, cause, effects);
            } else if progress >= 1.0 {
                enter(machine, RefreshState::Armed, cause, effects);
            } else {
                enter(machine, RefreshState::Pulling { progress }, cause, effects);
            }
        }
        RefreshState::Armed => {
            if progress < 1.0 {
                enter(machine, RefreshState::Pulling { progress }, cause, effects);
                if pull_distance <= 0.0 {
                    enter(machine, RefreshState::Idle, cause, effects);
                }
            }
        }
        RefreshState::Refreshing | RefreshState::Completed => {}
    }
}

fn release(machine: &mut RefreshMachine, effects: &mut Vec<Effect>) {
    let cause = TransitionCause::Release;
    match machine.state() {
        RefreshState::Armed => {
            machine.tracker_mut().end();
            let session = machine.start_session();
            enter(machine, RefreshState::Refreshing, cause, effects);
            let locked_offset = machine.config().trigger_threshold;
            machine.set_offset(locked_offset);
            engine_info!("refresh session {session} triggered");
            effects.push(Effect::InvokeRefresh { session });
        }
        RefreshState::Pulling { progress } => {
            engine_debug!("released below threshold at progress {progress:.3}");
            enter(machine, RefreshState::Idle, cause, effects);
            machine.set_offset(0.0);
            machine.finish_session();
        }
        RefreshState::Idle => {
            machine.set_offset(0.0);
            machine.finish_session();
        }
        RefreshState::Refreshing | RefreshState::Completed => {
            machine.tracker_mut().end();
        }
    }
}

/// Moves to `next`, emitting the transition event and whatever haptics and
/// animations hang off it.
fn enter(
    machine: &mut RefreshMachine,
    next: RefreshState,
    cause: TransitionCause,
    effects: &mut Vec<Effect>,
) {
    let Some(previous) = machine.set_state(next) else {
        return;
    };
    let transition = Transition::new(previous.phase(), next.phase(), cause);
    engine_debug!("{} -> {} ({:?})", transition.from, transition.to, cause);

    effects.push(Effect::Transitioned(transition));
    if let Some(feedback) = feedback_for(&transition, machine.config()) {
        effects.push(Effect::Haptic(feedback));
    }
    if let Some(plan) = animation_for(&transition, machine.config()) {
        effects.push(Effect::Animate(plan));
    }
}
