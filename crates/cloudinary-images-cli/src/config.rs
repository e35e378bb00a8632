use std::path::{Path, PathBuf};

use cloudinary_images::ImageSizeSpec;
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Override for the Admin API base, e.g. a local mock.
    pub api_base_url: Option<String>,
    /// Where the option database lives.
    pub database_path: Option<PathBuf>,
    /// Image sizes registered in addition to the built-in ones.
    #[serde(default)]
    pub sizes: Vec<ImageSizeSpec>,
}

/// Config file path: `~/.config/cloudinary-images/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cloudinary-images").join("config.toml"))
}

/// Load config from `path` (or the default location), falling back to
/// defaults if missing or unreadable.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => config_path(),
    };

    if let Some(path) = path
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        match toml::from_str::<AppConfig>(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), sizes = config.sizes.len(), "loaded config");
                return config;
            }
            Err(e) => {
                eprintln!(
                    "warning: failed to parse config at {}, using defaults: {e}",
                    path.display()
                );
            }
        }
    }

    AppConfig::default()
}
