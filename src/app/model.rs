//! Application model types: `App`, `PlaybackState` and `Drag`.

use std::path::PathBuf;
use std::time::Duration;

use rand::Rng;
use ratatui::layout::Rect;

use crate::audio::{AudioCmd, PlaybackInfo, clamp_position, clamp_volume};
use crate::config::{PlayerMode, Settings};
use crate::playlist::{Track, TrackList};
use crate::ui::layout::{Widget, WidgetLayout, hit_test, slider_value};

use super::command::{Notice, UiCommand};

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Which slider the pointer is holding, if any.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Drag {
    Progress,
    Volume,
}

/// Fraction of the track already played, always within `[0, 1]`.
pub fn progress_fraction(position: Duration, duration: Option<Duration>) -> f32 {
    match duration {
        Some(total) if !total.is_zero() => {
            (position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0) as f32
        }
        _ => 0.0,
    }
}

/// The main application model.
pub struct App {
    pub mode: PlayerMode,
    pub tracks: TrackList,
    pub playback: PlaybackState,

    pub position: Duration,
    pub duration: Option<Duration>,
    /// Progress slider value in `[0, 1]`.
    pub progress: f32,
    /// Volume slider value in `[0, 1]`.
    pub volume: f32,
    pub drag: Option<Drag>,

    pub layout: WidgetLayout,
    pub notice: Option<Notice>,
    /// Path being typed into the open prompt, when it is shown.
    pub prompt: Option<String>,
    /// The folder or file the current list was opened from.
    pub source: Option<PathBuf>,

    scrub: Duration,
    volume_step: f32,
}

impl App {
    /// Create an empty `App` configured from `settings`.
    pub fn new(settings: &Settings, area: Rect) -> Self {
        Self {
            mode: settings.playback.mode,
            tracks: TrackList::default(),
            playback: PlaybackState::Stopped,

            position: Duration::ZERO,
            duration: None,
            progress: 0.0,
            volume: clamp_volume(settings.audio.initial_volume),
            drag: None,

            layout: WidgetLayout::compute(area),
            notice: None,
            prompt: None,
            source: None,

            scrub: Duration::from_secs(settings.controls.scrub_seconds),
            volume_step: settings.controls.volume_step,
        }
    }

    pub fn volume_step(&self) -> f32 {
        self.volume_step
    }

    pub fn scrub_seconds(&self) -> i64 {
        self.scrub.as_secs() as i64
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.current()
    }

    /// Apply `cmd` and return the commands the audio thread must run, in order.
    pub fn apply(&mut self, cmd: UiCommand) -> Vec<AudioCmd> {
        if self.notice.is_some() && cmd.is_user_input() {
            return Vec::new();
        }
        if self.prompt.is_some() && matches!(cmd, UiCommand::PointerDown { .. }) {
            return Vec::new();
        }

        match cmd {
            UiCommand::TogglePlay => self.toggle_play(),
            UiCommand::PrevTrack => self.step_track(false),
            UiCommand::NextTrack => self.step_track(true),
            UiCommand::PlayNext => self.track_ended(),
            UiCommand::SeekBy(secs) => self.seek_by(secs),
            UiCommand::VolumeBy(delta) => self.set_volume(self.volume + delta),
            UiCommand::SetVolume(level) => self.set_volume(level),
            UiCommand::PointerDown { column, row } => self.pointer_down(column, row),
            UiCommand::PointerDrag { column, .. } => self.pointer_drag(column),
            UiCommand::PointerUp => self.pointer_up(),
            UiCommand::OpenPrompt => {
                self.open_prompt();
                Vec::new()
            }
            UiCommand::PromptInput(c) => {
                if let Some(p) = self.prompt.as_mut() {
                    p.push(c);
                }
                Vec::new()
            }
            UiCommand::PromptBackspace => {
                if let Some(p) = self.prompt.as_mut() {
                    p.pop();
                }
                Vec::new()
            }
            UiCommand::PromptCancel => {
                self.prompt = None;
                Vec::new()
            }
            UiCommand::Failure(message) => {
                self.playback = PlaybackState::Stopped;
                self.notify(Notice::error(message));
                Vec::new()
            }
            UiCommand::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
            UiCommand::Resize { width, height } => {
                self.layout = WidgetLayout::compute(Rect::new(0, 0, width, height));
                Vec::new()
            }
            UiCommand::Tick(info) => {
                self.sync(&info);
                Vec::new()
            }
        }
    }

    /// Replace the track list with `tracks` opened from `source` and load the
    /// first one, paused. An empty result leaves the current list alone.
    pub fn open(&mut self, source: PathBuf, tracks: Vec<Track>) -> Vec<AudioCmd> {
        self.open_list(source, TrackList::new(tracks))
    }

    /// Like `open`, with the list shuffled first.
    pub fn open_shuffled<R: Rng + ?Sized>(
        &mut self,
        source: PathBuf,
        tracks: Vec<Track>,
        rng: &mut R,
    ) -> Vec<AudioCmd> {
        let mut list = TrackList::new(tracks);
        list.shuffle(rng);
        self.open_list(source, list)
    }

    fn open_list(&mut self, source: PathBuf, list: TrackList) -> Vec<AudioCmd> {
        if list.is_empty() {
            self.notify(Notice::info(format!(
                "No playable files in {}.",
                source.display()
            )));
            return Vec::new();
        }

        self.tracks = list;
        self.source = Some(source);
        self.playback = PlaybackState::Stopped;
        self.drag = None;
        self.load_current()
    }

    /// Report a failure that happened outside the audio thread (e.g. a scan).
    pub fn fail(&mut self, message: impl Into<String>) {
        self.notify(Notice::error(message));
    }

    /// Show a modal notice. A held slider is let go, since the release that
    /// would end the drag gets swallowed by the notice.
    fn notify(&mut self, notice: Notice) {
        self.drag = None;
        self.notice = Some(notice);
    }

    /// Close the prompt and return the path typed into it, if any.
    pub fn submit_prompt(&mut self) -> Option<PathBuf> {
        let text = self.prompt.take()?;
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(expand_home(text))
    }

    fn empty_notice(&self) -> Notice {
        match self.mode {
            PlayerMode::Playlist => Notice::info("No folder selected."),
            PlayerMode::Single => Notice::info("No file selected."),
        }
    }

    fn toggle_play(&mut self) -> Vec<AudioCmd> {
        if self.tracks.is_empty() {
            self.notify(self.empty_notice());
            return Vec::new();
        }

        match self.playback {
            PlaybackState::Playing => {
                self.playback = PlaybackState::Paused;
                vec![AudioCmd::Pause]
            }
            PlaybackState::Stopped | PlaybackState::Paused => {
                self.playback = PlaybackState::Playing;
                vec![AudioCmd::Play]
            }
        }
    }

    fn step_track(&mut self, forward: bool) -> Vec<AudioCmd> {
        match self.mode {
            PlayerMode::Playlist => {
                let moved = if forward {
                    self.tracks.next().is_some()
                } else {
                    self.tracks.previous().is_some()
                };
                if !moved {
                    return Vec::new();
                }
                let mut cmds = self.load_current();
                cmds.push(AudioCmd::Play);
                self.playback = PlaybackState::Playing;
                cmds
            }
            // A single track has nowhere to skip to; the buttons scrub instead.
            PlayerMode::Single => {
                let secs = self.scrub_seconds();
                self.seek_by(if forward { secs } else { -secs })
            }
        }
    }

    fn track_ended(&mut self) -> Vec<AudioCmd> {
        self.position = Duration::ZERO;
        self.progress = 0.0;
        match self.mode {
            PlayerMode::Playlist if self.has_tracks() => self.step_track(true),
            _ => {
                self.playback = PlaybackState::Stopped;
                vec![AudioCmd::Stop]
            }
        }
    }

    fn load_current(&mut self) -> Vec<AudioCmd> {
        self.position = Duration::ZERO;
        self.progress = 0.0;
        let Some(track) = self.tracks.current() else {
            self.duration = None;
            return Vec::new();
        };
        self.duration = track.duration;
        vec![AudioCmd::Load {
            path: track.path.clone(),
            duration_hint: track.duration,
        }]
    }

    fn seek_by(&mut self, secs: i64) -> Vec<AudioCmd> {
        if self.playback != PlaybackState::Playing || !self.has_tracks() {
            return Vec::new();
        }
        let offset = Duration::from_secs(secs.unsigned_abs());
        let target = if secs < 0 {
            self.position.saturating_sub(offset)
        } else {
            self.position.saturating_add(offset)
        };
        self.seek_absolute(target)
    }

    fn seek_to(&mut self, fraction: f32) -> Vec<AudioCmd> {
        let Some(total) = self.duration else {
            return Vec::new();
        };
        if !self.has_tracks() {
            return Vec::new();
        }
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.seek_absolute(total.mul_f32(fraction))
    }

    fn seek_absolute(&mut self, target: Duration) -> Vec<AudioCmd> {
        let target = clamp_position(target, self.duration);
        self.position = target;
        self.progress = progress_fraction(target, self.duration);
        vec![AudioCmd::Seek(target)]
    }

    fn set_volume(&mut self, level: f32) -> Vec<AudioCmd> {
        self.volume = clamp_volume(level);
        vec![AudioCmd::SetVolume(self.volume)]
    }

    fn open_prompt(&mut self) {
        let prefill = match (&self.source, self.mode) {
            (Some(src), PlayerMode::Single) => src
                .parent()
                .map(|p| format!("{}/", p.display()))
                .unwrap_or_default(),
            (Some(src), PlayerMode::Playlist) => src.display().to_string(),
            (None, _) => String::new(),
        };
        self.prompt = Some(prefill);
    }

    fn pointer_down(&mut self, column: u16, row: u16) -> Vec<AudioCmd> {
        // Below the minimum size only a message is drawn; nothing is clickable.
        if !self.layout.fits() {
            return Vec::new();
        }
        let Some(widget) = hit_test(&self.layout, column, row) else {
            return Vec::new();
        };

        match widget {
            Widget::Play => self.toggle_play(),
            Widget::Prev => self.step_track(false),
            Widget::Next => self.step_track(true),
            Widget::Open => {
                self.open_prompt();
                Vec::new()
            }
            Widget::Progress => {
                // Scrubbing only makes sense while something is playing.
                if self.playback != PlaybackState::Playing {
                    return Vec::new();
                }
                self.drag = Some(Drag::Progress);
                self.progress = slider_value(self.layout.progress, column);
                Vec::new()
            }
            Widget::Volume => {
                self.drag = Some(Drag::Volume);
                self.set_volume(slider_value(self.layout.volume, column))
            }
        }
    }

    fn pointer_drag(&mut self, column: u16) -> Vec<AudioCmd> {
        match self.drag {
            Some(Drag::Progress) => {
                self.progress = slider_value(self.layout.progress, column);
                Vec::new()
            }
            Some(Drag::Volume) => self.set_volume(slider_value(self.layout.volume, column)),
            None => Vec::new(),
        }
    }

    fn pointer_up(&mut self) -> Vec<AudioCmd> {
        match self.drag.take() {
            Some(Drag::Progress) => self.seek_to(self.progress),
            _ => Vec::new(),
        }
    }

    /// Refresh position and progress from the audio thread while playing.
    /// A held progress thumb is never overwritten.
    fn sync(&mut self, info: &PlaybackInfo) {
        if self.playback != PlaybackState::Playing
            || self.drag == Some(Drag::Progress)
            || !info.loaded
        {
            return;
        }
        if info.duration.is_some() {
            self.duration = info.duration;
        }
        self.position = info.position;
        self.progress = progress_fraction(self.position, self.duration);
    }
}

fn expand_home(text: &str) -> PathBuf {
    if let Some(rest) = text.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(text)
}
