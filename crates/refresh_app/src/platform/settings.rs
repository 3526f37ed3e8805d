use std::fs;
use std::path::Path;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use refresh_core::RefreshConfig;

/// Loads a RON refresh config.
///
/// A missing or unreadable file falls back to defaults with a warning; a file
/// that parses but violates the config constraints is an error.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<RefreshConfig> {
    let Some(path) = path else {
        return Ok(RefreshConfig::default());
    };

    let config = match fs::read_to_string(path) {
        Ok(text) => match ron::from_str::<RefreshConfig>(&text) {
            Ok(config) => {
                engine_info!("Loaded refresh config from {:?}", path);
                config
            }
            Err(err) => {
                engine_warn!("Failed to parse refresh config from {:?}: {}", path, err);
                RefreshConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            engine_warn!("No refresh config at {:?}; using defaults", path);
            RefreshConfig::default()
        }
        Err(err) => {
            engine_warn!("Failed to read refresh config from {:?}: {}", path, err);
            RefreshConfig::default()
        }
    };

    config
        .validate()
        .with_context(|| format!("invalid refresh config in {}", path.display()))
}

pub(crate) fn write_config(path: &Path, config: &RefreshConfig) -> anyhow::Result<()> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(config, pretty).context("serialize refresh config")?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    engine_info!("Wrote refresh config to {:?}", path);
    Ok(())
}
