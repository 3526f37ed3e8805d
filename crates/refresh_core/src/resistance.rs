use crate::RefreshConfig;

/// Ratio of excess to available stretch where `r * (1 - r^2)` peaks.
/// Past it the damped curve would start shrinking again, so it is held flat.
const PEAK_RATIO: f64 = 0.577_350_269_189_625_8; // 1 / sqrt(3)

/// Maps raw pull distance to the elastic visual offset and to progress.
///
/// Stateless; every call is a pure function of the distance and the config it
/// was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistanceModel {
    trigger_threshold: f64,
    max_stretch: f64,
    resistance_start: f64,
}

impl ResistanceModel {
    pub fn new(config: &RefreshConfig) -> Self {
        Self {
            trigger_threshold: config.trigger_threshold,
            max_stretch: config.max_stretch,
            resistance_start: config.resistance_start,
        }
    }

    /// Linear up to `resistance_start`, then ease-out damped
    /// (`excess * (1 - ratio^2)`) until the curve peaks.
    pub fn elastic_offset(&self, pull_distance: f64) -> f64 {
        if pull_distance.is_nan() || pull_distance <= 0.0 {
            return 0.0;
        }
        if pull_distance <= self.resistance_start {
            return pull_distance;
        }

        let max_excess = self.max_stretch - self.resistance_start;
        let ratio = ((pull_distance - self.resistance_start) / max_excess).min(PEAK_RATIO);
        // With P the peak ratio, r(1 - r^2) = P(1 - P^2) - (P - r)^2 (2P + r). The
        // shortfall below the peak only shrinks as the pull grows.
        let shortfall = PEAK_RATIO - ratio;
        let deficit = max_excess * (shortfall * shortfall * (3.0 * PEAK_RATIO - shortfall));
        (self.peak_offset() - deficit).max(self.resistance_start)
    }

    /// Elastic offset clamped at `max_stretch`; what an indicator should draw.
    pub fn display_offset(&self, pull_distance: f64) -> f64 {
        self.elastic_offset(pull_distance).min(self.max_stretch)
    }

    pub fn progress(&self, pull_distance: f64) -> f64 {
        (self.elastic_offset(pull_distance) / self.trigger_threshold).clamp(0.0, 1.0)
    }

    /// Highest elastic offset any pull can produce.
    pub fn peak_offset(&self) -> f64 {
        let max_excess = self.max_stretch - self.resistance_start;
        self.resistance_start + PEAK_RATIO * max_excess * (1.0 - PEAK_RATIO * PEAK_RATIO)
    }

    pub fn trigger_threshold(&self) -> f64 {
        self.trigger_threshold
    }

    pub fn max_stretch(&self) -> f64 {
        self.max_stretch
    }
}
