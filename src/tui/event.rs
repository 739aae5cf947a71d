use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{Action, App};
use crate::store::Store;

/// Handle a key press. Pure UI state changes happen here; anything that
/// touches the store comes back as an `Action`.
pub fn handle_key(app: &mut App, store: &Store, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }
    if app.show_help {
        app.toggle_help();
        return Action::Continue;
    }
    if app.prompt.is_some() {
        return handle_prompt(app, key);
    }
    if app.session.is_logged_in() {
        handle_tasks(app, store, key)
    } else {
        handle_login(app, key)
    }
}

fn handle_login(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Enter => Action::SubmitLogin,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.toggle_field();
            Action::Continue
        }
        KeyCode::Left | KeyCode::Right => {
            app.login.toggle_mode();
            app.message = None;
            Action::Continue
        }
        KeyCode::Backspace => {
            app.login.focused_buf_mut().pop();
            Action::Continue
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login.focused_buf_mut().clear();
            Action::Continue
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login.focused_buf_mut().push(c);
            Action::Continue
        }
        _ => Action::Continue,
    }
}

fn handle_tasks(app: &mut App, store: &Store, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down(store);
            Action::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            Action::Continue
        }
        KeyCode::Char('a') => {
            app.open_add_prompt();
            Action::Continue
        }
        KeyCode::Char('r') => {
            app.open_reminder_prompt(store);
            Action::Continue
        }
        KeyCode::Char('d') | KeyCode::Char('x') => Action::MarkDone,
        KeyCode::Char('i') => Action::MarkImportant,
        KeyCode::Char('D') | KeyCode::Delete => Action::Delete,
        KeyCode::Char('L') => Action::Logout,
        KeyCode::Char('?') => {
            app.toggle_help();
            Action::Continue
        }
        _ => Action::Continue,
    }
}

fn handle_prompt(app: &mut App, key: KeyEvent) -> Action {
    let Some(prompt) = app.prompt.as_mut() else {
        return Action::Continue;
    };
    match key.code {
        KeyCode::Esc => {
            app.cancel_prompt();
            Action::Continue
        }
        KeyCode::Enter => Action::SubmitPrompt,
        KeyCode::Backspace => {
            prompt.input.pop();
            Action::Continue
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            prompt.input.clear();
            Action::Continue
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            prompt.input.push(c);
            Action::Continue
        }
        _ => Action::Continue,
    }
}
