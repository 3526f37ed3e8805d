use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use refresh_core::IndicatorView;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TraceEntry {
    pub at: String,
    pub gesture: &'static str,
    pub view: IndicatorView,
}

impl TraceEntry {
    pub(crate) fn now(gesture: &'static str, view: IndicatorView) -> Self {
        Self {
            at: Utc::now().to_rfc3339(),
            gesture,
            view,
        }
    }
}

pub(crate) fn write_trace(path: &Path, entries: &[TraceEntry]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(entries).context("serialize indicator trace")?;
    fs::write(path, json).with_context(|| format!("write trace to {}", path.display()))
}
