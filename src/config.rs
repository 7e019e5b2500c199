use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::history::{DEFAULT_CAPACITY, DEFAULT_DATE_FORMAT, DEFAULT_KEY};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub dir: PathBuf,
    pub key: String,
    pub capacity: usize,
    pub date_format: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            key: DEFAULT_KEY.to_string(),
            capacity: DEFAULT_CAPACITY,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub latency_ms: u64,
    pub seed: Option<u64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            latency_ms: 1500,
            seed: None,
        }
    }
}

impl AnalysisConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub interval_ms: u64,
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            width: 640,
            height: 480,
        }
    }
}

impl CaptureConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub web_root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            web_root: "static".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub history: HistoryConfig,
    pub analysis: AnalysisConfig,
    pub capture: CaptureConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                Self::from_toml(&contents)?
            }
            _ => AppConfig::default(),
        };

        config.apply_env_overrides();
        config.normalize();
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        let mut config: AppConfig =
            toml::from_str(contents).map_err(|err| format!("failed to parse config: {}", err))?;
        config.normalize();
        Ok(config)
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn normalize(&mut self) {
        if self.history.capacity == 0 {
            self.history.capacity = DEFAULT_CAPACITY;
        }
        if self.history.key.trim().is_empty() {
            self.history.key = DEFAULT_KEY.to_string();
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("EMOTION_HISTORY_DIR") {
            if !dir.trim().is_empty() {
                self.history.dir = PathBuf::from(dir);
            }
        }
        if let Ok(key) = env::var("EMOTION_HISTORY_KEY") {
            if !key.trim().is_empty() {
                self.history.key = key;
            }
        }
        if let Ok(capacity) = env::var("EMOTION_HISTORY_CAPACITY") {
            if let Ok(value) = capacity.parse::<usize>() {
                self.history.capacity = value;
            }
        }
        if let Ok(latency) = env::var("EMOTION_LATENCY_MS") {
            if let Ok(value) = latency.parse::<u64>() {
                self.analysis.latency_ms = value;
            }
        }
        if let Ok(seed) = env::var("EMOTION_SEED") {
            if let Ok(value) = seed.parse::<u64>() {
                self.analysis.seed = Some(value);
            }
        }
        if let Ok(interval) = env::var("EMOTION_CAPTURE_INTERVAL_MS") {
            if let Ok(value) = interval.parse::<u64>() {
                self.capture.interval_ms = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("EMOTION_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/emotion.toml")))
}
