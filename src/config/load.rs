use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::{PlayerMode, Settings};

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file first, then lets environment
/// variables (prefix `NEEDLE__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from the optional config file and the environment.
    ///
    /// `explicit` (from `--config`) wins over `NEEDLE_CONFIG_PATH` and the XDG default,
    /// and unlike those it must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let required = explicit.is_some();
        let config_path = explicit
            .map(Path::to_path_buf)
            .or_else(resolve_config_path);

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(required));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("NEEDLE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.audio.initial_volume) {
            return Err("audio.initial_volume must be within [0, 1]".to_string());
        }
        if !(self.controls.volume_step > 0.0 && self.controls.volume_step <= 1.0) {
            return Err("controls.volume_step must be within (0, 1]".to_string());
        }
        if self.controls.scrub_seconds == 0 {
            return Err("controls.scrub_seconds must be >= 1".to_string());
        }
        if self.ui.poll_interval_ms == 0 {
            return Err("ui.poll_interval_ms must be >= 1".to_string());
        }
        if self.playback.mode == PlayerMode::Playlist
            && self.library.extensions.iter().all(|e| e.trim().is_empty())
        {
            return Err("library.extensions must list at least one extension".to_string());
        }
        Ok(())
    }

    /// Render the settings as a TOML document.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `NEEDLE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("NEEDLE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/needle/config.toml`
/// or `~/.config/needle/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("needle").join("config.toml"))
}

/// Compute the default log directory under `$XDG_STATE_HOME/needle`
/// or `~/.local/state/needle`, falling back to the system temp dir.
pub fn default_log_dir() -> PathBuf {
    if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("needle");
    }
    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".local").join("state").join("needle");
    }
    env::temp_dir().join("needle")
}
