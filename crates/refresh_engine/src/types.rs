use std::time::Duration;

use refresh_core::{ConfigError, Msg, ScrollSample};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid refresh config: {0}")]
    Config(#[from] ConfigError),
    #[error("refresh controller is no longer running")]
    ControllerClosed,
}

/// Input reported by the host scroll surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    DragBegan {
        offset_y: f64,
        top_inset: f64,
        timestamp: Duration,
    },
    Scrolled(ScrollSample),
    TopInsetChanged(f64),
    DragEnded {
        timestamp: Duration,
    },
}

impl From<ScrollEvent> for Msg {
    fn from(event: ScrollEvent) -> Self {
        match event {
            ScrollEvent::DragBegan {
                offset_y,
                top_inset,
                timestamp,
            } => Msg::DragBegan {
                offset_y,
                top_inset,
                timestamp,
            },
            ScrollEvent::Scrolled(sample) => Msg::Scrolled(sample),
            ScrollEvent::TopInsetChanged(top_inset) => Msg::TopInsetChanged(top_inset),
            ScrollEvent::DragEnded { timestamp } => Msg::DragEnded { timestamp },
        }
    }
}
