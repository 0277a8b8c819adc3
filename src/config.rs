use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::classifier::TrainingPlan;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default = "default_ensemble_size")]
    pub ensemble_size: usize,
    #[serde(default = "default_prediction_draws")]
    pub prediction_draws: usize,
    #[serde(default = "default_sample_replicas")]
    pub sample_replicas: usize,
    #[serde(default = "default_noise_samples")]
    pub noise_samples_per_soil: usize,
    /// Fixes the training randomness; unset means OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_seed: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub training_seed: Option<u64>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/soil-advisor/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(seed) = overrides.training_seed {
            self.engine.training_seed = Some(seed);
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[server]
host = "0.0.0.0"
port = 5000

[engine]
ensemble_size = 100
prediction_draws = 10
sample_replicas = 5
noise_samples_per_soil = 3
# training_seed = 42
"#;
        template.to_string()
    }
}

impl EngineConfig {
    pub fn training_plan(&self) -> TrainingPlan {
        TrainingPlan {
            sample_replicas: self.sample_replicas,
            noise_samples_per_soil: self.noise_samples_per_soil,
            ensemble_size: self.ensemble_size,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ensemble_size: default_ensemble_size(),
            prediction_draws: default_prediction_draws(),
            sample_replicas: default_sample_replicas(),
            noise_samples_per_soil: default_noise_samples(),
            training_seed: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_ensemble_size() -> usize {
    100
}

fn default_prediction_draws() -> usize {
    10
}

fn default_sample_replicas() -> usize {
    5
}

fn default_noise_samples() -> usize {
    3
}
