//! Demo configuration: an optional TOML file overlaid with CLI flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use cw_core::SimulatorConfig;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Timed refreshes to run before stopping.
    pub ticks:      u64,
    /// Where snapshot files go.  `None` disables file output.
    pub output_dir: Option<PathBuf>,
    /// Sites CSV.  `None` uses the built-in temples.
    pub sites:      Option<PathBuf>,
    pub simulator:  SimulatorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ticks:      8,
            output_dir: None,
            sites:      None,
            simulator:  SimulatorConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn shipped_config_parses() {
        let config: AppConfig = toml::from_str(include_str!("../crowdwatch.toml")).unwrap();
        assert_eq!(config.ticks, 12);
        assert_eq!(config.simulator.interval_ms, 500);
        assert_eq!(config.simulator.seed, Some(42));
        assert_eq!(config.simulator.peak_windows.0.len(), 2);
        config.simulator.validate().unwrap();
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config: AppConfig = toml::from_str("[simulator]\nseed = 7\n").unwrap();
        assert_eq!(config.ticks, 8);
        assert_eq!(config.simulator.interval_ms, cw_core::config::DEFAULT_INTERVAL_MS);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn shipped_sites_csv_loads() {
        let specs = cw_store::load_sites_reader(&include_bytes!("../data/sites.csv")[..]).unwrap();
        assert_eq!(specs.len(), 4);
        assert_eq!(specs, crate::sites::gujarat_temples());
    }
}
