use serde::{Deserialize, Serialize};

use crate::LapDeltaError;
use crate::comparison::{ChannelSelection, DEFAULT_RESAMPLE_INTERVAL_M, SyncMode};
use crate::comparison::sectors::DEFAULT_SECTOR_COUNT;

const CONFIG_FILE_NAME: &str = "config.json";

/// Persisted analysis defaults: how to resample, how many sectors to draw,
/// which channels to overlay, and the preferred sync mode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub resample_interval_m: f64,
    pub sector_count: usize,
    pub sync_mode: SyncMode,
    pub channels: ChannelSelection,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            resample_interval_m: DEFAULT_RESAMPLE_INTERVAL_M,
            sector_count: DEFAULT_SECTOR_COUNT,
            sync_mode: SyncMode::AlignStart,
            channels: ChannelSelection::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_local_file() -> Option<Self> {
        let config_path = dirs::config_dir()?.join("lapdelta").join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let file = std::fs::File::open(config_path).ok()?;
            serde_json::from_reader(file).ok()
        } else {
            None
        }
    }

    pub fn save(&self) -> Result<(), LapDeltaError> {
        let config_path = dirs::config_dir()
            .ok_or(LapDeltaError::NoConfigDir)?
            .join("lapdelta")
            .join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            std::fs::create_dir_all(config_path.parent().expect("config path has a parent"))
                .map_err(|e| LapDeltaError::ConfigIOError { source: e })?;
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| LapDeltaError::ConfigIOError { source: e })?;
        serde_json::to_writer(file, self)
            .map_err(|e| LapDeltaError::ConfigSerializeError { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.resample_interval_m, 5.);
        assert_eq!(config.sector_count, 3);
        assert_eq!(config.sync_mode, SyncMode::AlignStart);
        assert!(config.channels.speed);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"sector_count": 5}"#).unwrap();
        assert_eq!(config.sector_count, 5);
        assert_eq!(config.resample_interval_m, 5.);
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = AnalysisConfig {
            resample_interval_m: 10.,
            sector_count: 4,
            sync_mode: SyncMode::AlignEnd,
            channels: ChannelSelection::default(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
