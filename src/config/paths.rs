use crate::config::ConfigError;
use std::path::PathBuf;

pub const GLOBAL_STATE_DIR: &str = ".agentnav";
pub const ROUTER_SETTINGS_FILE_NAME: &str = "router.yaml";
pub const ROUTER_CONFIG_ENV: &str = "AGENTNAV_CONFIG";

pub fn default_state_root() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(GLOBAL_STATE_DIR))
}

/// `AGENTNAV_CONFIG` wins over `~/.agentnav/router.yaml`.
pub fn default_router_settings_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os(ROUTER_CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    Ok(default_state_root()?.join(ROUTER_SETTINGS_FILE_NAME))
}
