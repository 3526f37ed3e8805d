use std::time::Duration;

/// One position report from the host scroll surface.
///
/// `offset_y` follows the usual content-offset convention: negative values
/// mean the content has been dragged down past its top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub offset_y: f64,
    pub timestamp: Duration,
}

impl ScrollSample {
    pub fn new(offset_y: f64, timestamp: Duration) -> Self {
        Self {
            offset_y,
            timestamp,
        }
    }
}

/// Turns raw scroll samples into pull distance for the active gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureTracker {
    is_tracking: bool,
    baseline_offset: f64,
    last_offset: f64,
    top_inset: f64,
    last_timestamp: Option<Duration>,
    pull_distance: f64,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, offset_y: f64, top_inset: f64, timestamp: Duration) {
        self.is_tracking = true;
        self.baseline_offset = offset_y;
        self.last_offset = offset_y;
        self.top_inset = top_inset;
        self.last_timestamp = Some(timestamp);
        self.pull_distance = Self::distance_for(offset_y, top_inset);
    }

    /// Returns the new pull distance, or `None` when the sample is discarded
    /// (not tracking, or older than the last accepted sample).
    pub fn sample(&mut self, sample: ScrollSample) -> Option<f64> {
        if !self.is_tracking {
            return None;
        }
        if self
            .last_timestamp
            .is_some_and(|last| sample.timestamp < last)
        {
            return None;
        }
        self.last_timestamp = Some(sample.timestamp);
        self.last_offset = sample.offset_y;
        self.pull_distance = Self::distance_for(sample.offset_y, self.top_inset);
        Some(self.pull_distance)
    }

    /// Stops accepting samples. The last pull distance stays readable so the
    /// release decision can be made from it.
    pub fn end(&mut self) {
        self.is_tracking = false;
    }

    /// Forgets the gesture entirely; used when a session returns to idle.
    pub fn reset(&mut self) {
        let top_inset = self.top_inset;
        *self = Self {
            top_inset,
            ..Self::default()
        };
    }

    pub fn set_top_inset(&mut self, top_inset: f64) {
        self.top_inset = top_inset;
    }

    pub fn is_tracking(&self) -> bool {
        self.is_tracking
    }

    pub fn pull_distance(&self) -> f64 {
        self.pull_distance
    }

    /// How far the content moved down since drag-begin, inset or not.
    pub fn travel(&self) -> f64 {
        self.baseline_offset - self.last_offset
    }

    pub fn top_inset(&self) -> f64 {
        self.top_inset
    }

    fn distance_for(offset_y: f64, top_inset: f64) -> f64 {
        let distance = -offset_y - top_inset;
        if distance.is_nan() {
            0.0
        } else {
            distance.max(0.0)
        }
    }
}
