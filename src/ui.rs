//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the player using `ratatui`.
//! Geometry and hit-testing live in `ui::layout`.

pub mod layout;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, NoticeKind, PlaybackState};
use crate::config::{PlayerMode, UiSettings};

use layout::{MIN_HEIGHT, MIN_WIDTH, thumb_column};

const BACKGROUND: Color = Color::Rgb(33, 33, 33);
const BUTTON: Color = Color::Gray;
const TRACK: Color = Color::Rgb(211, 211, 211);
const PROGRESS_THUMB: Color = Color::Rgb(30, 144, 255);
const VOLUME_THUMB: Color = Color::Green;

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
    .intersection(r)
}

fn play_color(app: &App) -> Color {
    if app.playback == PlaybackState::Playing {
        Color::Red
    } else {
        Color::Green
    }
}

fn state_text(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Stopped => "Stopped",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    }
}

/// A one-column thumb at `value`, one row taller than the slider on each side.
fn thumb_rect(slider: Rect, value: f32, area: Rect) -> Rect {
    let column = thumb_column(slider, value);
    Rect::new(
        column,
        slider.y.saturating_sub(1),
        1,
        slider.height.saturating_add(2),
    )
    .intersection(area)
}

fn fill(frame: &mut Frame, rect: Rect, color: Color) {
    frame.render_widget(Block::new().style(Style::new().bg(color)), rect);
}

/// Center `text` on the middle row of `rect`.
fn label(frame: &mut Frame, rect: Rect, text: &str, bg: Color) {
    if rect.height == 0 {
        return;
    }
    let row = Rect::new(rect.x, rect.y + rect.height / 2, rect.width, 1);
    let par = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::new().fg(Color::Black).bg(bg).add_modifier(Modifier::BOLD));
    frame.render_widget(par, row);
}

fn panel_lines(app: &App) -> Vec<Line<'static>> {
    let mode = match app.mode {
        PlayerMode::Playlist => "playlist",
        PlayerMode::Single => "single track",
    };
    let mut lines = vec![Line::from(format!("needle • {mode}"))];

    match app.current_track() {
        Some(track) => {
            lines.push(Line::from(format!("Song: {}", track.display)));
            if let Some(album) = &track.album {
                lines.push(Line::from(format!("Album: {album}")));
            }
            let total = app
                .duration
                .map(format_mmss)
                .unwrap_or_else(|| "--:--".to_string());
            lines.push(Line::from(format!(
                "{} • {} / {}",
                state_text(app.playback),
                format_mmss(app.position),
                total
            )));
        }
        None => {
            let hint = match app.mode {
                PlayerMode::Playlist => "No folder selected. Press o to open one.",
                PlayerMode::Single => "No file selected. Press o to open one.",
            };
            lines.push(Line::from(hint));
        }
    }

    let mut status = Vec::new();
    if let (PlayerMode::Playlist, Some(idx)) = (app.mode, app.tracks.current_index()) {
        status.push(format!("Track {}/{}", idx + 1, app.tracks.len()));
    }
    status.push(format!("Volume {:.0}%", app.volume * 100.0));
    if let Some(src) = &app.source {
        status.push(format!("Source: {}", src.display()));
    }
    lines.push(Line::from(status.join(" • ")));

    let skip = match app.mode {
        PlayerMode::Playlist => "[ctrl ←/→] prev/next".to_string(),
        PlayerMode::Single => format!("[prev/next] scrub -/+{}s", app.scrub_seconds()),
    };
    lines.push(Line::from(format!(
        "[space] play/pause | [←/→] seek -/+{}s | [↑/↓] volume | {} | [o] open | [q] quit",
        app.scrub_seconds(),
        skip
    )));
    lines
}

fn draw_notice(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };
    let popup = centered_rect_sized(52, 7, area);
    frame.render_widget(Clear, popup);

    let color = match notice.kind {
        NoticeKind::Info => Color::Cyan,
        NoticeKind::Error => Color::Red,
    };
    let text = format!("{}\n\n(press any key)", notice.message);
    let par = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::new().fg(color))
                .title(format!(" {} ", notice.title())),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(par, popup);
}

fn draw_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let Some(input) = &app.prompt else {
        return;
    };
    let popup = centered_rect_sized(64, 5, area);
    frame.render_widget(Clear, popup);

    let title = match app.mode {
        PlayerMode::Playlist => " open folder ",
        PlayerMode::Single => " open file ",
    };
    let text = format!("{input}_\nenter: open • esc: cancel");
    let par = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(par, popup);
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let area = frame.area();
    fill(frame, area, BACKGROUND);

    let layout = &app.layout;
    if !layout.fits() {
        let msg = format!(
            "Terminal too small: {}x{} (need {}x{})",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let par = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::new().fg(Color::White).bg(BACKGROUND))
            .wrap(Wrap { trim: true });
        frame.render_widget(par, area);
        draw_notice(frame, app, area);
        draw_prompt(frame, app, area);
        return;
    }

    let panel = Paragraph::new(panel_lines(app))
        .style(Style::new().fg(Color::White).bg(BACKGROUND))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, layout.panel);

    fill(frame, layout.prev, BUTTON);
    fill(frame, layout.next, BUTTON);
    fill(frame, layout.open, BUTTON);
    fill(frame, layout.play, play_color(app));

    fill(frame, layout.progress, TRACK);
    fill(frame, thumb_rect(layout.progress, app.progress, area), PROGRESS_THUMB);
    fill(frame, layout.volume, TRACK);
    fill(frame, thumb_rect(layout.volume, app.volume, area), VOLUME_THUMB);

    if ui_settings.show_labels {
        let (prev, next) = match app.mode {
            PlayerMode::Playlist => ("|<<".to_string(), ">>|".to_string()),
            PlayerMode::Single => (
                format!("-{}s", app.scrub_seconds()),
                format!("+{}s", app.scrub_seconds()),
            ),
        };
        let play = if app.playback == PlaybackState::Playing {
            "||"
        } else {
            "▶"
        };
        label(frame, layout.prev, &prev, BUTTON);
        label(frame, layout.play, play, play_color(app));
        label(frame, layout.next, &next, BUTTON);
        label(frame, layout.open, "open", BUTTON);
    }

    draw_notice(frame, app, area);
    draw_prompt(frame, app, area);
}
