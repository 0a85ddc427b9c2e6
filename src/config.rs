use crate::error::{CompassError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for gourmet-compass, stored next to the favorites blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompassConfig {
    /// Generative model used for grounded searches.
    #[serde(default = "default_model")]
    pub model: String,

    /// Provider credential. `GEMINI_API_KEY` in the environment wins
    /// over this field.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upper bound on a single provider call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CompassConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CompassError::Io)?;
        let config: CompassConfig =
            serde_json::from_str(&content).map_err(CompassError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CompassError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CompassError::Serialization)?;
        fs::write(config_path, content).map_err(CompassError::Io)?;
        Ok(())
    }

    /// The credential to use: environment first, stored key second.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "model" => Some(self.model.clone()),
            "api-key" => Some(match &self.api_key {
                Some(_) => "(set)".to_string(),
                None => "(unset)".to_string(),
            }),
            "timeout" => Some(self.timeout_secs.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "model" => {
                self.model = value.to_string();
                Ok(())
            }
            "api-key" => {
                self.api_key = Some(value.to_string());
                Ok(())
            }
            "timeout" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| format!("timeout must be a number of seconds: {value}"))?;
                self.timeout_secs = secs;
                Ok(())
            }
            _ => Err(format!("Unknown config key: {key}")),
        }
    }
}
