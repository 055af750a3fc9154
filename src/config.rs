use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::category::Category;
use crate::form::DEFAULT_DURATION;
use crate::runtime::MIN_CLOCK_INTERVAL;

/// UI preferences. Tracker state is never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub default_duration: u32,
    pub default_category: Category,
    pub clock_24h: bool,
    pub clock_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration: DEFAULT_DURATION,
            default_category: Category::Reading,
            clock_24h: true,
            clock_interval_ms: 1000,
        }
    }
}

impl Config {
    /// Header clock period, never below the runtime's floor
    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms).max(MIN_CLOCK_INTERVAL)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "studypunch") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("studypunch_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
