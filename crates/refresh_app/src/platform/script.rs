use std::time::Duration;

use refresh_core::ScrollSample;
use refresh_engine::ScrollEvent;

pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A scripted finger movement: pull distances at evenly spaced keyframes,
/// linearly interpolated to one sample per frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Gesture {
    pub name: &'static str,
    pub keyframes: Vec<f64>,
    pub frames_per_keyframe: u32,
}

pub(crate) fn demo_gestures() -> Vec<Gesture> {
    vec![
        Gesture {
            name: "peek",
            keyframes: vec![0.0, 20.0, 36.0, 30.0],
            frames_per_keyframe: 4,
        },
        Gesture {
            name: "full pull",
            keyframes: vec![0.0, 40.0, 80.0, 120.0, 140.0],
            frames_per_keyframe: 5,
        },
        Gesture {
            name: "change of mind",
            keyframes: vec![0.0, 70.0, 130.0, 90.0, 40.0],
            frames_per_keyframe: 5,
        },
    ]
}

impl Gesture {
    /// Host events for this gesture, starting at `start` and spaced one frame
    /// apart. Offsets include `top_inset` the way a scroll view reports them.
    pub(crate) fn events(&self, top_inset: f64, start: Duration) -> Vec<ScrollEvent> {
        let mut events = Vec::new();
        let mut timestamp = start;
        let first = self.keyframes.first().copied().unwrap_or(0.0);
        events.push(ScrollEvent::DragBegan {
            offset_y: -(first + top_inset),
            top_inset,
            timestamp,
        });

        for pair in self.keyframes.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            for frame in 1..=self.frames_per_keyframe {
                timestamp += FRAME_INTERVAL;
                let t = f64::from(frame) / f64::from(self.frames_per_keyframe);
                let distance = from + (to - from) * t;
                events.push(ScrollEvent::Scrolled(ScrollSample::new(
                    -(distance + top_inset),
                    timestamp,
                )));
            }
        }

        timestamp += FRAME_INTERVAL;
        events.push(ScrollEvent::DragEnded { timestamp });
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_bracketed_and_time_ordered() {
        let gesture = Gesture {
            name: "test",
            keyframes: vec![0.0, 10.0],
            frames_per_keyframe: 2,
        };
        let events = gesture.events(20.0, Duration::ZERO);

        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], ScrollEvent::DragBegan { offset_y, .. } if offset_y == -20.0));
        assert_eq!(
            events[2],
            ScrollEvent::Scrolled(ScrollSample::new(-30.0, Duration::from_millis(32)))
        );
        assert_eq!(
            events[3],
            ScrollEvent::DragEnded {
                timestamp: Duration::from_millis(48)
            }
        );
    }
}
