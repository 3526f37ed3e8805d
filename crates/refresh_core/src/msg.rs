use std::time::Duration;

use crate::{RefreshOutcome, ScrollSample, SessionId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Host surface reported the start of a drag.
    DragBegan {
        offset_y: f64,
        top_inset: f64,
        timestamp: Duration,
    },
    /// Continuous scroll-offset report while the finger is down.
    Scrolled(ScrollSample),
    /// Safe-area or content inset changed.
    TopInsetChanged(f64),
    /// Host surface reported the finger lifted.
    DragEnded { timestamp: Duration },
    /// The external refresh action for `session` resolved.
    RefreshSettled {
        session: SessionId,
        outcome: RefreshOutcome,
    },
    /// The completion dwell for `session` is over.
    DwellElapsed { session: SessionId },
}
