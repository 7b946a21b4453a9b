// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app task,
// or into local ViewState changes (typing a name, moving the selection,
// toggling the group, quit confirmation).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use santa_core::Screen;

use super::ViewState;
use crate::protocol::UserCommand;

pub const GENERATE_HINT: &str = "Add at least 2 people in one group to generate pairings";

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should go to the app task.
/// Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both press and release; act on press only.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    view_state.status = None;

    match view_state.snapshot.screen {
        Screen::Setup => handle_setup(key_event, view_state),
        Screen::Reveal => handle_reveal(key_event, view_state),
    }
}

/// In quit confirmation mode `y`/`q` quit, `n`/`Esc` cancel, everything else
/// is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Setup screen: printable keys go to the name field.
fn handle_setup(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('g') => try_generate(view_state),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Char(c) => {
            view_state.name_input.push(c);
            None
        }
        KeyCode::Backspace => {
            view_state.name_input.pop();
            None
        }
        KeyCode::Tab | KeyCode::BackTab => {
            view_state.input_group = view_state.input_group.toggled();
            None
        }
        KeyCode::Enter => {
            // The Add action is disabled while the name is blank.
            if view_state.name_input.trim().is_empty() {
                return None;
            }
            let name = std::mem::take(&mut view_state.name_input);
            Some(UserCommand::AddParticipant {
                name,
                group: view_state.input_group,
            })
        }
        KeyCode::Up => {
            select_prev(view_state);
            None
        }
        KeyCode::Down => {
            let len = view_state.snapshot.roster_len();
            select_next(view_state, len);
            None
        }
        KeyCode::Delete => view_state
            .snapshot
            .roster_rows()
            .nth(view_state.selected)
            .map(|p| UserCommand::RemoveParticipant(p.id)),
        KeyCode::F(5) => try_generate(view_state),
        KeyCode::Esc => {
            view_state.confirm_quit = true;
            None
        }
        _ => None,
    }
}

fn try_generate(view_state: &mut ViewState) -> Option<UserCommand> {
    if view_state.snapshot.can_generate {
        view_state.selected = 0;
        Some(UserCommand::Generate)
    } else {
        view_state.status = Some(GENERATE_HINT.to_string());
        None
    }
}

/// Reveal screen. While a match is on screen the only way forward is hiding
/// it, so the next person never sees the previous result.
fn handle_reveal(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    if view_state.snapshot.revealed.is_some() {
        return match key_event.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('h') | KeyCode::Esc => {
                Some(UserCommand::Hide)
            }
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            select_prev(view_state);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let len = view_state.snapshot.reveal_list.len();
            select_next(view_state, len);
            None
        }
        KeyCode::Enter => view_state
            .snapshot
            .reveal_list
            .get(view_state.selected)
            .map(|p| UserCommand::Reveal(p.id)),
        KeyCode::Char('s') => {
            view_state.selected = 0;
            Some(UserCommand::StartOver)
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            view_state.confirm_quit = true;
            None
        }
        _ => None,
    }
}

fn select_prev(view_state: &mut ViewState) {
    view_state.selected = view_state.selected.saturating_sub(1);
}

fn select_next(view_state: &mut ViewState, len: usize) {
    if view_state.selected + 1 < len {
        view_state.selected += 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
