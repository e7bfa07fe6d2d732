use anyhow::{Context, Result};
use honeybear_animate::SceneConfig;
use honeybear_assets::{AssetPaths, TEXT_LITERAL};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Launch configuration, read from an optional YAML file. Missing fields
/// take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub assets: AssetPaths,
    /// Nodes of each scattered kind added once the font is ready.
    pub initial_count: usize,
    pub text: String,
    pub scene: SceneConfig,
    /// Fixed populator seed; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets: AssetPaths::default(),
            initial_count: 100,
            text: TEXT_LITERAL.to_owned(),
            scene: SceneConfig::default(),
            seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_yaml(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&source).with_context(|| format!("parsing config {}", path.display()))
    }
}
