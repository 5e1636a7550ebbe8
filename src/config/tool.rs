use super::params::HogParams;
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct HogToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub hog: HogParams,
    pub output: HogOutputConfig,
}

/// Detection window the input is resized to before descriptor computation.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 128,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HogOutputConfig {
    #[serde(rename = "features_json")]
    pub features_json: PathBuf,
    #[serde(default)]
    pub magnitude_image: Option<PathBuf>,
    #[serde(default)]
    pub orientation_image: Option<PathBuf>,
    /// Directory receiving per-stage JSON dumps.
    #[serde(default)]
    pub debug_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<HogToolConfig> {
    let data = fs::read_to_string(path)?;
    parse_config(&data)
}

pub fn parse_config(data: &str) -> Result<HogToolConfig> {
    let config: HogToolConfig = serde_json::from_str(data)?;
    config.hog.validate()?;
    Ok(config)
}
