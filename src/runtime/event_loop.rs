use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{info, warn};

use crate::app::{App, UiCommand};
use crate::audio::AudioPlayer;
use crate::bridge::EventBridge;
use crate::config::{self, PlayerMode};
use crate::playlist::load_source;
use crate::ui;

use super::input::{self, Action};

/// Apply `cmd` to `app` and forward the resulting audio commands.
pub fn dispatch(app: &mut App, audio_player: &AudioPlayer, cmd: UiCommand) {
    let cmds = app.apply(cmd);
    if cmds.is_empty() {
        return;
    }
    if let Err(e) = audio_player.send_all(cmds) {
        warn!(error = %e, "audio thread is gone");
        app.fail("The audio thread stopped unexpectedly.");
    }
}

/// Load a folder or file into `app`. Failures end up in a notice.
pub fn open_path(
    app: &mut App,
    audio_player: &AudioPlayer,
    settings: &config::Settings,
    path: PathBuf,
) {
    let tracks = match load_source(&path, app.mode, &settings.library) {
        Ok(tracks) => tracks,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "open failed");
            app.fail(e.to_string());
            return;
        }
    };
    info!(path = %path.display(), count = tracks.len(), "opened");

    let shuffle =
        app.mode == PlayerMode::Playlist && settings.playback.shuffle_on_load && path.is_dir();
    let cmds = if shuffle {
        app.open_shuffled(path, tracks, &mut rand::thread_rng())
    } else {
        app.open(path, tracks)
    };
    if let Err(e) = audio_player.send_all(cmds) {
        warn!(error = %e, "audio thread is gone");
        app.fail("The audio thread stopped unexpectedly.");
    }
}

/// Main terminal event loop: drains audio events, polls playback, draws and
/// handles input. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    bridge: &mut EventBridge,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.ui.poll_interval_ms.max(1));
    let playback = audio_player.playback_handle();
    let mut last_tick = Instant::now();

    loop {
        for cmd in bridge.drain() {
            dispatch(app, audio_player, cmd);
        }

        if last_tick.elapsed() >= tick {
            let snapshot = playback.lock().ok().map(|info| info.clone());
            if let Some(info) = snapshot {
                dispatch(app, audio_player, UiCommand::Tick(info));
            }
            last_tick = Instant::now();
        }

        // Catch size changes that happened before the first Resize event.
        let size = terminal.size()?;
        if app.layout.area != Rect::new(0, 0, size.width, size.height) {
            dispatch(
                app,
                audio_player,
                UiCommand::Resize {
                    width: size.width,
                    height: size.height,
                },
            );
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match input::map_key(key, app) {
                Action::Quit => return Ok(()),
                Action::SubmitPrompt => {
                    if let Some(path) = app.submit_prompt() {
                        open_path(app, audio_player, settings, path);
                    }
                }
                Action::Apply(cmd) => dispatch(app, audio_player, cmd),
                Action::Ignore => {}
            },
            Event::Mouse(mouse) => {
                if let Some(cmd) = input::map_mouse(mouse) {
                    dispatch(app, audio_player, cmd);
                }
            }
            Event::Resize(width, height) => {
                dispatch(app, audio_player, UiCommand::Resize { width, height });
            }
            _ => {}
        }
    }
}
