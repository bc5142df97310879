//! ConfigStore - Platform Directories and `config.toml`
//!
//! Platform-specific locations (via `directories::ProjectDirs`):
//! - **Linux**: `~/.config/roster-gui/`, `~/.cache/roster-gui/`, `~/.local/share/roster-gui/`
//! - **macOS**: `~/Library/Application Support/com.roster.roster-gui/`, `~/Library/Caches/...`
//! - **Windows**: `%APPDATA%\roster\roster-gui\config\`, `%LOCALAPPDATA%\roster\roster-gui\cache\`

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::domain::config::AppConfig;
use crate::error::{Error, Result};

const CONFIG_FILE: &str = "config.toml";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "roster", "roster-gui").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.to_path_buf())
}

/// Configuration directory, created on demand
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.config_dir())
}

/// Cache directory (record snapshots), created on demand
pub fn get_or_create_cache_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.cache_dir())
}

/// Data directory (log files), created on demand
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.data_dir())
}

/// Load `config.toml` from the platform config directory
pub fn load_app_config() -> AppConfig {
    match get_or_create_config_dir() {
        Ok(dir) => load_app_config_from(&dir.join(CONFIG_FILE)),
        Err(e) => {
            tracing::warn!("No config directory ({}); using defaults", e);
            AppConfig::default()
        }
    }
}

/// Load a config file; a missing file yields defaults, a malformed one
/// yields defaults plus a warning
pub fn load_app_config_from(path: &Path) -> AppConfig {
    if !path.exists() {
        tracing::debug!("No config at {}; using defaults", path.display());
        return AppConfig::default();
    }
    match read_app_config(path) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
            AppConfig::default()
        }
    }
}

fn read_app_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Write `config` as TOML
pub fn save_app_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Write `config` to the platform config directory
pub fn save_app_config(config: &AppConfig) -> Result<()> {
    save_app_config_to(&get_or_create_config_dir()?.join(CONFIG_FILE), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::SourceKind;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_app_config_from(&dir.path().join("config.toml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[list\npage_size = ").expect("write");
        assert_eq!(load_app_config_from(&path), AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let mut config = AppConfig::default();
        config.list.page_size = 25;
        config.source.kind = SourceKind::Http;
        config.source.endpoint = Some("http://localhost:3000/api/players".to_string());
        save_app_config_to(&path, &config).expect("save");
        assert_eq!(load_app_config_from(&path), config);
    }
}
