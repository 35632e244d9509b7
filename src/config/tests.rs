use super::load::{default_config_path, default_log_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_needle_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("NEEDLE_CONFIG_PATH", "/tmp/needle-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/needle-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("needle")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("needle")
            .join("config.toml")
    );
}

#[test]
fn default_log_dir_uses_xdg_state_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
    assert_eq!(
        default_log_dir(),
        std::path::PathBuf::from("/tmp/xdg-state").join("needle")
    );
}

#[test]
fn defaults_match_documented_values() {
    let s = Settings::default();
    assert_eq!(s.playback.mode, PlayerMode::Playlist);
    assert!(s.playback.shuffle_on_load);
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "wav".to_string()]);
    assert!(!s.library.recursive);
    assert_eq!(s.ui.poll_interval_ms, 100);
    assert_eq!(s.controls.scrub_seconds, 5);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_explicit_file_and_parse_mode_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
mode = "file"
shuffle_on_load = false

[audio]
initial_volume = 0.5
quit_fade_out_ms = 0

[controls]
scrub_seconds = 10
volume_step = 0.25

[library]
extensions = ["mp3", "flac"]
recursive = true
include_hidden = true

[ui]
poll_interval_ms = 250
show_labels = false

[logging]
level = "debug"
dir = "/tmp/needle-logs"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::remove("NEEDLE__AUDIO__INITIAL_VOLUME");
    let s = Settings::load(Some(&cfg_path)).unwrap();
    assert_eq!(s.playback.mode, PlayerMode::Single);
    assert!(!s.playback.shuffle_on_load);
    assert_eq!(s.audio.initial_volume, 0.5);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.controls.scrub_seconds, 10);
    assert_eq!(s.controls.volume_step, 0.25);
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "flac".to_string()]);
    assert!(s.library.recursive);
    assert!(s.library.include_hidden);
    assert_eq!(s.ui.poll_interval_ms, 250);
    assert!(!s.ui.show_labels);
    assert_eq!(s.logging.level, "debug");
    assert_eq!(
        s.logging.dir,
        Some(std::path::PathBuf::from("/tmp/needle-logs"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[controls]
scrub_seconds = 15
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("NEEDLE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("NEEDLE__CONTROLS__SCRUB_SECONDS", "3");

    let s = Settings::load(None).unwrap();
    assert_eq!(s.controls.scrub_seconds, 3);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.initial_volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.poll_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions = vec![" ".into()];
    assert!(s.validate().is_err());
}

#[test]
fn to_toml_reloads_to_the_same_settings() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("NEEDLE__CONTROLS__SCRUB_SECONDS");

    let mut s = Settings::default();
    s.playback.mode = PlayerMode::Single;
    s.controls.scrub_seconds = 42;

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, s.to_toml().unwrap()).unwrap();

    let loaded = Settings::load(Some(&cfg_path)).unwrap();
    assert_eq!(loaded.playback.mode, PlayerMode::Single);
    assert_eq!(loaded.controls.scrub_seconds, 42);
}

#[test]
fn explicit_config_path_must_exist() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("confg.toml");
    assert!(Settings::load(Some(&missing)).is_err());
}

#[test]
fn missing_default_config_is_fine() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set("NEEDLE_CONFIG_PATH", dir.path().join("absent.toml").to_str().unwrap());
    let _g2 = EnvGuard::remove("NEEDLE__CONTROLS__SCRUB_SECONDS");
    let s = Settings::load(None).unwrap();
    assert_eq!(s.controls.scrub_seconds, Settings::default().controls.scrub_seconds);
}
