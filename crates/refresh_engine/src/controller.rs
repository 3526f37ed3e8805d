use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_error, engine_info, engine_warn, set_frame_tick};
use futures_util::stream::{Stream, StreamExt};
use refresh_core::{
    update, Effect, IndicatorView, Msg, RefreshConfig, RefreshMachine, RefreshOutcome,
    ScrollSample, SessionId, Transition,
};
use tokio::sync::{broadcast, mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::{Animator, EngineError, HapticSink, RefreshAction, ScrollEvent};

const TRANSITION_BUFFER: usize = 64;

/// Cloneable front door to a running [`RefreshController`].
#[derive(Clone)]
pub struct RefreshHandle {
    event_tx: mpsc::UnboundedSender<Msg>,
    view_rx: watch::Receiver<IndicatorView>,
    transition_tx: broadcast::Sender<Transition>,
    shutdown: CancellationToken,
}

impl RefreshHandle {
    pub fn drag_began(
        &self,
        offset_y: f64,
        top_inset: f64,
        timestamp: Duration,
    ) -> Result<(), EngineError> {
        self.send(ScrollEvent::DragBegan {
            offset_y,
            top_inset,
            timestamp,
        })
    }

    pub fn scrolled(&self, offset_y: f64, timestamp: Duration) -> Result<(), EngineError> {
        self.send(ScrollEvent::Scrolled(ScrollSample::new(offset_y, timestamp)))
    }

    pub fn top_inset_changed(&self, top_inset: f64) -> Result<(), EngineError> {
        self.send(ScrollEvent::TopInsetChanged(top_inset))
    }

    pub fn drag_ended(&self, timestamp: Duration) -> Result<(), EngineError> {
        self.send(ScrollEvent::DragEnded { timestamp })
    }

    pub fn send(&self, event: ScrollEvent) -> Result<(), EngineError> {
        self.event_tx
            .send(event.into())
            .map_err(|_| EngineError::ControllerClosed)
    }

    /// Forwards every event of a host stream, in order, until it ends.
    pub async fn attach<S>(&self, events: S) -> Result<(), EngineError>
    where
        S: Stream<Item = ScrollEvent>,
    {
        let mut events = std::pin::pin!(events);
        while let Some(event) = events.next().await {
            self.send(event)?;
        }
        Ok(())
    }

    /// Latest published indicator view.
    pub fn view(&self) -> IndicatorView {
        *self.view_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<IndicatorView> {
        self.view_rx.clone()
    }

    /// Every phase change from now on, in order. Unlike [`Self::subscribe`]
    /// this never coalesces intermediate states.
    pub fn transitions(&self) -> broadcast::Receiver<Transition> {
        self.transition_tx.subscribe()
    }

    /// Stops the controller loop. A refresh action already in flight keeps
    /// running to completion; its result is dropped.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.event_tx.is_closed()
    }
}

/// Single owner of the refresh state machine.
///
/// Host events and internal reports (refresh settled, dwell elapsed) are
/// applied one at a time on the controller task, so the single-flight guard in
/// the machine needs no lock.
pub struct RefreshController {
    machine: RefreshMachine,
    action: Arc<dyn RefreshAction>,
    haptics: Arc<dyn HapticSink>,
    animator: Arc<dyn Animator>,
    report_tx: mpsc::UnboundedSender<Msg>,
    view_tx: watch::Sender<IndicatorView>,
    transition_tx: broadcast::Sender<Transition>,
    shutdown: CancellationToken,
    /// Scroll samples dispatched so far; tags this controller's log lines.
    frame: u64,
}

impl RefreshController {
    /// Validates `config` and starts the controller on the current tokio runtime.
    pub fn spawn(
        config: RefreshConfig,
        action: Arc<dyn RefreshAction>,
        haptics: Arc<dyn HapticSink>,
        animator: Arc<dyn Animator>,
    ) -> Result<RefreshHandle, EngineError> {
        let config = config.validate()?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (report_tx, report_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(IndicatorView::default());
        let (transition_tx, _) = broadcast::channel(TRANSITION_BUFFER);
        let shutdown = CancellationToken::new();

        let controller = Self {
            machine: RefreshMachine::new(config),
            action,
            haptics,
            animator,
            report_tx,
            view_tx,
            transition_tx: transition_tx.clone(),
            shutdown: shutdown.clone(),
            frame: 0,
        };
        tokio::spawn(controller.run(event_rx, report_rx));

        Ok(RefreshHandle {
            event_tx,
            view_rx,
            transition_tx,
            shutdown,
        })
    }

    async fn run(
        mut self,
        mut event_rx: mpsc::UnboundedReceiver<Msg>,
        mut report_rx: mpsc::UnboundedReceiver<Msg>,
    ) {
        engine_info!("refresh controller started");
        let shutdown = self.shutdown.clone();
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                event = event_rx.recv() => match event {
                    Some(msg) => self.dispatch(msg),
                    None => break,
                },
                Some(report) = report_rx.recv() => self.dispatch(report),
            }
        }
        if self.machine.is_refresh_in_flight() {
            engine_warn!(
                "refresh controller stopped with session {:?} still refreshing",
                self.machine.active_session()
            );
        }
        engine_info!("refresh controller stopped");
    }

    fn dispatch(&mut self, msg: Msg) {
        if matches!(msg, Msg::Scrolled(_)) {
            self.frame += 1;
        }
        // The task can resume on any worker thread.
        set_frame_tick(self.frame);
        let machine = std::mem::take(&mut self.machine);
        let (mut machine, effects) = update(machine, msg);
        if machine.consume_dirty() {
            self.view_tx.send_replace(machine.view());
        }
        self.machine = machine;

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::Transitioned(transition) => {
                // No receivers is fine; transitions are observational.
                let _ = self.transition_tx.send(transition);
            }
            Effect::Haptic(feedback) => self.haptics.emit(feedback),
            Effect::Animate(plan) => self.animator.run(plan),
            Effect::InvokeRefresh { session } => self.invoke_refresh(session),
            Effect::ScheduleDwell { session, after } => self.schedule_dwell(session, after),
        }
    }

    fn invoke_refresh(&self, session: SessionId) {
        let action = self.action.clone();
        let report_tx = self.report_tx.clone();
        tokio::spawn(async move {
            // Run the action in its own task so a panic surfaces as a JoinError
            // instead of taking the reporter down with it.
            let outcome = match tokio::spawn(async move { action.refresh().await }).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    engine_error!("refresh action for session {session} aborted: {err}");
                    RefreshOutcome::Failed
                }
            };
            engine_info!("refresh session {session} settled: {outcome:?}");
            let _ = report_tx.send(Msg::RefreshSettled { session, outcome });
        });
    }

    fn schedule_dwell(&self, session: SessionId, after: Duration) {
        let report_tx = self.report_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = report_tx.send(Msg::DwellElapsed { session });
        });
    }
}
