use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub icons: IconsConfig,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct IconsConfig {
    /// Directory scanned for icons (default: "icons")
    #[serde(default = "default_icon_dir")]
    pub dir: PathBuf,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            dir: default_icon_dir(),
        }
    }
}

fn default_icon_dir() -> PathBuf {
    PathBuf::from("icons")
}

impl Config {
    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Icon directory from the config, relative paths taken from `config_path`'s folder.
    pub fn icon_dir(&self, config_path: &Path) -> PathBuf {
        let config_dir = config_path.parent().unwrap_or(Path::new("."));
        config_dir.join(&self.icons.dir)
    }
}

/// Picks the icon directory: explicit argument (or `OPACIFY_DIR`) first, then the config.
pub fn resolve_icon_dir(explicit: Option<&Path>, config: &Config, config_path: &Path) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => config.icon_dir(config_path),
    }
}
