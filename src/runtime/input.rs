use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, UiCommand};

/// What the event loop should do with one key press.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    /// Close the open prompt and load what was typed.
    SubmitPrompt,
    Apply(UiCommand),
    Ignore,
}

/// Map a key press to an action, given the modal state of `app`.
pub fn map_key(key: KeyEvent, app: &App) -> Action {
    if app.notice.is_some() {
        return Action::Apply(UiCommand::DismissNotice);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if app.prompt.is_some() {
        return match key.code {
            KeyCode::Enter => Action::SubmitPrompt,
            KeyCode::Esc => Action::Apply(UiCommand::PromptCancel),
            KeyCode::Backspace => Action::Apply(UiCommand::PromptBackspace),
            KeyCode::Char(c) if !ctrl && !c.is_control() => {
                Action::Apply(UiCommand::PromptInput(c))
            }
            _ => Action::Ignore,
        };
    }

    let scrub = app.scrub_seconds();
    let step = app.volume_step();
    let cmd = match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char(' ') => UiCommand::TogglePlay,
        KeyCode::Char('o') | KeyCode::Char('O') => UiCommand::OpenPrompt,
        KeyCode::Left if ctrl => UiCommand::PrevTrack,
        KeyCode::Right if ctrl => UiCommand::NextTrack,
        KeyCode::Left => UiCommand::SeekBy(-scrub),
        KeyCode::Right => UiCommand::SeekBy(scrub),
        KeyCode::Up => UiCommand::VolumeBy(step),
        KeyCode::Down => UiCommand::VolumeBy(-step),
        _ => return Action::Ignore,
    };
    Action::Apply(cmd)
}

/// Left-button presses, drags and releases become pointer commands.
pub fn map_mouse(event: MouseEvent) -> Option<UiCommand> {
    let (column, row) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(UiCommand::PointerDown { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(UiCommand::PointerDrag { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(UiCommand::PointerUp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use ratatui::layout::Rect;

    fn app() -> App {
        App::new(&Settings::default(), Rect::new(0, 0, 80, 24))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn transport_keys() {
        let a = app();
        assert_eq!(
            map_key(key(KeyCode::Char(' ')), &a),
            Action::Apply(UiCommand::TogglePlay)
        );
        assert_eq!(
            map_key(key(KeyCode::Left), &a),
            Action::Apply(UiCommand::SeekBy(-5))
        );
        assert_eq!(
            map_key(key(KeyCode::Right), &a),
            Action::Apply(UiCommand::SeekBy(5))
        );
        assert_eq!(
            map_key(ctrl(KeyCode::Left), &a),
            Action::Apply(UiCommand::PrevTrack)
        );
        assert_eq!(
            map_key(ctrl(KeyCode::Right), &a),
            Action::Apply(UiCommand::NextTrack)
        );
        assert_eq!(
            map_key(key(KeyCode::Up), &a),
            Action::Apply(UiCommand::VolumeBy(0.1))
        );
        assert_eq!(
            map_key(key(KeyCode::Down), &a),
            Action::Apply(UiCommand::VolumeBy(-0.1))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('O')), &a),
            Action::Apply(UiCommand::OpenPrompt)
        );
        assert_eq!(map_key(key(KeyCode::Char('q')), &a), Action::Quit);
        assert_eq!(map_key(key(KeyCode::Char('x')), &a), Action::Ignore);
    }

    #[test]
    fn any_key_dismisses_a_notice() {
        let mut a = app();
        a.apply(UiCommand::TogglePlay);
        assert!(a.notice.is_some());
        assert_eq!(
            map_key(key(KeyCode::Char('q')), &a),
            Action::Apply(UiCommand::DismissNotice)
        );
    }

    #[test]
    fn prompt_captures_typing() {
        let mut a = app();
        a.apply(UiCommand::OpenPrompt);
        assert_eq!(
            map_key(key(KeyCode::Char('q')), &a),
            Action::Apply(UiCommand::PromptInput('q'))
        );
        assert_eq!(
            map_key(key(KeyCode::Char(' ')), &a),
            Action::Apply(UiCommand::PromptInput(' '))
        );
        assert_eq!(
            map_key(key(KeyCode::Backspace), &a),
            Action::Apply(UiCommand::PromptBackspace)
        );
        assert_eq!(map_key(key(KeyCode::Enter), &a), Action::SubmitPrompt);
        assert_eq!(
            map_key(key(KeyCode::Esc), &a),
            Action::Apply(UiCommand::PromptCancel)
        );
        assert_eq!(map_key(ctrl(KeyCode::Char('c')), &a), Action::Ignore);
    }

    #[test]
    fn only_left_button_maps_to_pointer_commands() {
        let ev = |kind| MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            map_mouse(ev(MouseEventKind::Down(MouseButton::Left))),
            Some(UiCommand::PointerDown { column: 7, row: 3 })
        );
        assert_eq!(
            map_mouse(ev(MouseEventKind::Drag(MouseButton::Left))),
            Some(UiCommand::PointerDrag { column: 7, row: 3 })
        );
        assert_eq!(
            map_mouse(ev(MouseEventKind::Up(MouseButton::Left))),
            Some(UiCommand::PointerUp)
        );
        assert_eq!(map_mouse(ev(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(map_mouse(ev(MouseEventKind::Moved)), None);
    }
}
