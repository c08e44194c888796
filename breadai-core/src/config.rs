//! Core configuration and data folder resolution

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Default backend base URL (compiled-in; the app ships pointed at its backend)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default timeout for ask/feedback-class calls
pub const DEFAULT_ASK_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for recipe generation (slower backend path)
pub const DEFAULT_RECIPE_TIMEOUT: Duration = Duration::from_secs(60);

/// Core configuration for stats persistence and the remote client
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Backend base URL (no trailing slash)
    pub base_url: String,
    /// Transport timeout for /ask and /feedback
    pub ask_timeout: Duration,
    /// Transport timeout for /recipe
    pub recipe_timeout: Duration,
    /// Folder holding locally persisted state (the stats blob)
    pub data_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ask_timeout: DEFAULT_ASK_TIMEOUT,
            recipe_timeout: DEFAULT_RECIPE_TIMEOUT,
            data_dir: default_data_dir(),
        }
    }
}

/// Optional overrides read from the config file; every field may be absent
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    data_dir: Option<PathBuf>,
    ask_timeout_secs: Option<u64>,
    recipe_timeout_secs: Option<u64>,
}

impl CoreConfig {
    /// Load configuration: compiled-in defaults, then optional TOML overrides
    ///
    /// A missing or malformed config file is not an error; the defaults stand
    /// and the problem is logged.
    pub fn load() -> Self {
        let mut config = Self::default();

        let Some(path) = config_file_path() else {
            return config;
        };
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return config;
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<FileConfig>(&contents) {
                Ok(file) => {
                    if let Some(base_url) = file.base_url {
                        config.base_url = base_url.trim_end_matches('/').to_string();
                    }
                    if let Some(data_dir) = file.data_dir {
                        config.data_dir = data_dir;
                    }
                    if let Some(secs) = file.ask_timeout_secs {
                        config.ask_timeout = Duration::from_secs(secs);
                    }
                    if let Some(secs) = file.recipe_timeout_secs {
                        config.recipe_timeout = Duration::from_secs(secs);
                    }
                    debug!(path = %path.display(), "Loaded config file overrides");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read config file");
            }
        }

        config
    }
}

/// Platform config file location: `<config_dir>/breadai/config.toml`
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("breadai").join("config.toml"))
}

/// Platform default data folder: `<data_local_dir>/breadai`
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("breadai"))
        .unwrap_or_else(|| PathBuf::from("./breadai_data"))
}
