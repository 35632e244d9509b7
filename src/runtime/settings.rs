use std::path::Path;

use crate::config;

/// Load the settings, falling back to defaults when the implicit config is
/// missing or broken. A config named with `--config` must load and validate.
pub fn load_settings(explicit: Option<&Path>) -> Result<config::Settings, ::config::ConfigError> {
    let loaded = config::Settings::load(explicit)
        .and_then(|s| s.validate().map(|()| s).map_err(::config::ConfigError::Message));
    match loaded {
        Ok(s) => Ok(s),
        Err(e) if explicit.is_some() => Err(e),
        Err(e) => {
            eprintln!("needle: failed to load config, using defaults: {e}");
            Ok(config::Settings::default())
        }
    }
}
