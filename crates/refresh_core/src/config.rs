use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ResistanceModel;

/// Named spring used for snap-back and settle animations.
///
/// `response` is the approximate period in seconds, `damping` the damping
/// fraction where 1.0 is critically damped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringProfile {
    pub response: f64,
    pub damping: f64,
}

impl SpringProfile {
    pub const SNAP_BACK: Self = Self {
        response: 0.35,
        damping: 0.75,
    };

    pub const SETTLE: Self = Self {
        response: 0.3,
        damping: 0.65,
    };
}

/// Immutable tuning for one refresh region. Distances are logical points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub trigger_threshold: f64,
    pub max_stretch: f64,
    pub resistance_start: f64,
    pub overshoot_distance: f64,
    #[serde(with = "duration_millis")]
    pub overshoot_duration: Duration,
    #[serde(with = "duration_millis")]
    pub completion_dwell: Duration,
    pub arm_haptic_intensity: f64,
    pub disarm_haptic_intensity: f64,
    pub snap_back: SpringProfile,
    pub settle: SpringProfile,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            trigger_threshold: 90.0,
            max_stretch: 150.0,
            resistance_start: 60.0,
            overshoot_distance: 12.0,
            overshoot_duration: Duration::from_millis(120),
            completion_dwell: Duration::from_millis(500),
            arm_haptic_intensity: 0.7,
            disarm_haptic_intensity: 0.35,
            snap_back: SpringProfile::SNAP_BACK,
            settle: SpringProfile::SETTLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("resistance_start ({resistance_start}) must be below max_stretch ({max_stretch})")]
    ResistanceBeyondStretch {
        resistance_start: f64,
        max_stretch: f64,
    },
    #[error("trigger_threshold ({trigger_threshold}) must not exceed max_stretch ({max_stretch})")]
    ThresholdBeyondStretch {
        trigger_threshold: f64,
        max_stretch: f64,
    },
    #[error("trigger_threshold ({trigger_threshold}) is above the highest reachable offset ({reachable})")]
    ThresholdUnreachable {
        trigger_threshold: f64,
        reachable: f64,
    },
    #[error("{field} must be within [0, 1], got {value}")]
    IntensityOutOfRange { field: &'static str, value: f64 },
    #[error("{field} spring is invalid: response {response}, damping {damping}")]
    InvalidSpring {
        field: &'static str,
        response: f64,
        damping: f64,
    },
}

impl RefreshConfig {
    /// Checks the cross-field constraints and hands the config back if they hold.
    pub fn validate(self) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("trigger_threshold", self.trigger_threshold),
            ("max_stretch", self.max_stretch),
            ("resistance_start", self.resistance_start),
            ("overshoot_distance", self.overshoot_distance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.resistance_start >= self.max_stretch {
            return Err(ConfigError::ResistanceBeyondStretch {
                resistance_start: self.resistance_start,
                max_stretch: self.max_stretch,
            });
        }
        if self.trigger_threshold > self.max_stretch {
            return Err(ConfigError::ThresholdBeyondStretch {
                trigger_threshold: self.trigger_threshold,
                max_stretch: self.max_stretch,
            });
        }
        let reachable = ResistanceModel::new(&self).peak_offset();
        if self.trigger_threshold > reachable {
            return Err(ConfigError::ThresholdUnreachable {
                trigger_threshold: self.trigger_threshold,
                reachable,
            });
        }
        for (field, value) in [
            ("arm_haptic_intensity", self.arm_haptic_intensity),
            ("disarm_haptic_intensity", self.disarm_haptic_intensity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::IntensityOutOfRange { field, value });
            }
        }
        for (field, spring) in [("snap_back", self.snap_back), ("settle", self.settle)] {
            let damping_ok = spring.damping > 0.0 && spring.damping <= 1.0;
            if !(spring.response.is_finite() && spring.response > 0.0 && damping_ok) {
                return Err(ConfigError::InvalidSpring {
                    field,
                    response: spring.response,
                    damping: spring.damping,
                });
            }
        }
        Ok(self)
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
