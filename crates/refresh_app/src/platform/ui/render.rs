use refresh_core::{IndicatorView, RefreshState};

use super::constants::*;

/// One text line for the indicator. `frame` only animates the spinner.
pub fn render(view: &IndicatorView, frame: u64) -> String {
    let label = match view.state {
        RefreshState::Idle => "idle",
        RefreshState::Pulling { .. } => "pulling",
        RefreshState::Armed => "armed",
        RefreshState::Refreshing => "refreshing",
        RefreshState::Completed => "completed",
    };

    let filled = ((view.progress * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let bar: String = std::iter::repeat(BAR_FILLED)
        .take(filled)
        .chain(std::iter::repeat(BAR_EMPTY).take(BAR_WIDTH - filled))
        .collect();

    let badge = if view.spinner_visible {
        SPINNER_FRAMES[(frame % SPINNER_FRAMES.len() as u64) as usize].to_string()
    } else if view.checkmark_visible {
        CHECKMARK.to_string()
    } else {
        String::new()
    };

    format!(
        "{:<10} [{}] {:>5.1}% offset {:>6.1} opacity {:.2} {}",
        label,
        bar,
        view.progress * 100.0,
        view.offset,
        view.opacity,
        badge
    )
    .trim_end()
    .to_string()
}
