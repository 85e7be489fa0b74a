use super::{default_router_settings_path, ConfigError, RouterSettings};

/// Loads the router settings file, falling back to the built-in table when
/// no file has been written yet.
pub fn load_router_settings() -> Result<RouterSettings, ConfigError> {
    let path = default_router_settings_path()?;
    let settings = if path.exists() {
        RouterSettings::from_path(&path)?
    } else {
        RouterSettings::builtin()
    };
    settings.validate()?;
    Ok(settings)
}
