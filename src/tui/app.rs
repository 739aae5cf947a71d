use log::{debug, info};

use crate::session::Session;
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focused: LoginField,
    pub mode: AuthMode,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focused: LoginField::Username,
            mode: AuthMode::Login,
        }
    }

    pub fn focused_buf_mut(&mut self) -> &mut String {
        match self.focused {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_field(&mut self) {
        self.focused = match self.focused {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    AddTask,
    /// The target index is captured when the prompt opens.
    Reminder(usize),
}

pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    pub fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::AddTask => "New Task",
            PromptKind::Reminder(_) => "Add Reminder",
        }
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            PromptKind::AddTask => "Enter task description:",
            PromptKind::Reminder(_) => "Enter reminder (e.g., Monday):",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub level: Level,
}

/// Something the event handler could not do without the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SubmitLogin,
    SubmitPrompt,
    MarkDone,
    MarkImportant,
    Delete,
    Logout,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub session: Session,
    pub login: LoginForm,
    pub cursor: usize,
    pub prompt: Option<Prompt>,
    pub show_help: bool,
    pub message: Option<Message>,
}

impl App {
    pub fn new() -> Self {
        Self {
            session: Session::LoggedOut,
            login: LoginForm::new(),
            cursor: 0,
            prompt: None,
            show_help: false,
            message: None,
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            text: text.into(),
            level: Level::Info,
        });
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.message = Some(Message {
            text: text.into(),
            level: Level::Warning,
        });
    }

    fn report(&mut self, err: StoreError) {
        debug!("action failed: {err}");
        self.message = Some(Message {
            text: err.to_string(),
            level: Level::Error,
        });
    }

    /// Display strings for the logged-in user's tasks, in order.
    pub fn task_lines(&self, store: &Store) -> Vec<String> {
        self.session
            .user(store)
            .map(|u| u.list_tasks().collect())
            .unwrap_or_default()
    }

    fn task_count(&self, store: &Store) -> usize {
        self.session
            .user(store)
            .map(|u| u.tasks.len())
            .unwrap_or(0)
    }

    pub fn clamp_cursor(&mut self, store: &Store) {
        let len = self.task_count(store);
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, store: &Store) {
        let len = self.task_count(store);
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
        }
    }

    fn selected(&mut self, store: &Store) -> Option<usize> {
        if self.cursor < self.task_count(store) {
            Some(self.cursor)
        } else {
            self.warn("No task selected.");
            None
        }
    }

    pub fn open_add_prompt(&mut self) {
        self.prompt = Some(Prompt {
            kind: PromptKind::AddTask,
            input: String::new(),
        });
    }

    pub fn open_reminder_prompt(&mut self, store: &Store) {
        if let Some(index) = self.selected(store) {
            self.prompt = Some(Prompt {
                kind: PromptKind::Reminder(index),
                input: String::new(),
            });
        }
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Runs an action against the store. Every mutation is flushed by the
    /// store itself; failures end up in `self.message`.
    pub fn perform(&mut self, store: &mut Store, action: Action) -> Flow {
        match action {
            Action::Quit => return Flow::Quit,
            Action::Continue => {}
            Action::SubmitLogin => self.submit_login(store),
            Action::SubmitPrompt => self.submit_prompt(store),
            Action::MarkDone => self.with_selected(store, |store, user, index| {
                store.complete_task(user, index)
            }),
            Action::MarkImportant => self.with_selected(store, |store, user, index| {
                store.mark_important(user, index)
            }),
            Action::Delete => self.with_selected(store, |store, user, index| {
                store.delete_task(user, index).map(|_| ())
            }),
            Action::Logout => self.logout(),
        }
        Flow::Continue
    }

    fn submit_login(&mut self, store: &mut Store) {
        let username = self.login.username.clone();
        let password = self.login.password.clone();
        match self.login.mode {
            AuthMode::Register => match store.register(&username, &password) {
                Ok(()) => {
                    self.login.mode = AuthMode::Login;
                    self.login.password.clear();
                    self.login.focused = LoginField::Password;
                    self.info("Registration complete.");
                }
                Err(e) => self.report(e),
            },
            AuthMode::Login => match Session::login(store, &username, &password) {
                Ok(session) => {
                    info!("user '{username}' logged in");
                    self.session = session;
                    self.login = LoginForm::new();
                    self.cursor = 0;
                    self.message = None;
                }
                Err(e) => self.report(e),
            },
        }
    }

    fn submit_prompt(&mut self, store: &mut Store) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        // Empty input is treated as a cancelled dialog. Whitespace is passed
        // through: reminders keep it, task descriptions reject it.
        if prompt.input.is_empty() {
            return;
        }
        let username = match self.session.require_username() {
            Ok(u) => u.to_string(),
            Err(e) => return self.report(e),
        };
        let result = match prompt.kind {
            PromptKind::AddTask => store.add_task(&username, &prompt.input),
            PromptKind::Reminder(index) => store.set_reminder(&username, index, &prompt.input),
        };
        match result {
            Ok(()) => {
                self.message = None;
                if prompt.kind == PromptKind::AddTask {
                    self.cursor = self.task_count(store).saturating_sub(1);
                }
            }
            Err(e) => self.report(e),
        }
        self.clamp_cursor(store);
    }

    fn with_selected(
        &mut self,
        store: &mut Store,
        op: impl FnOnce(&mut Store, &str, usize) -> Result<(), StoreError>,
    ) {
        let Some(index) = self.selected(store) else {
            return;
        };
        let username = match self.session.require_username() {
            Ok(u) => u.to_string(),
            Err(e) => return self.report(e),
        };
        match op(store, &username, index) {
            Ok(()) => self.message = None,
            Err(e) => self.report(e),
        }
        self.clamp_cursor(store);
    }

    pub fn logout(&mut self) {
        if let Some(username) = self.session.username() {
            info!("user '{username}' logged out");
        }
        self.session.logout();
        self.cursor = 0;
        self.prompt = None;
        self.show_help = false;
        self.message = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (tempfile::TempDir, Store, App) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("todolist.json")).unwrap();
        (dir, store, App::new())
    }

    fn fill_login(app: &mut App, user: &str, pass: &str) {
        app.login.username = user.into();
        app.login.password = pass.into();
    }

    fn logged_in(tasks: &[&str]) -> (tempfile::TempDir, Store, App) {
        let (dir, mut store, mut app) = setup();
        store.register("alice", "pw1").unwrap();
        for t in tasks {
            store.add_task("alice", t).unwrap();
        }
        fill_login(&mut app, "alice", "pw1");
        app.perform(&mut store, Action::SubmitLogin);
        assert!(app.session.is_logged_in());
        (dir, store, app)
    }

    #[test]
    fn register_then_login() {
        let (_dir, mut store, mut app) = setup();
        app.login.toggle_mode();
        fill_login(&mut app, "alice", "pw1");
        app.perform(&mut store, Action::SubmitLogin);
        assert_eq!(app.login.mode, AuthMode::Login);
        assert_eq!(app.message.as_ref().unwrap().text, "Registration complete.");
        assert!(!app.session.is_logged_in());

        app.login.password = "pw1".into();
        app.perform(&mut store, Action::SubmitLogin);
        assert_eq!(app.session.username(), Some("alice"));
        assert!(app.message.is_none());
    }

    #[test]
    fn duplicate_registration_reports_error() {
        let (_dir, mut store, mut app) = setup();
        store.register("alice", "pw1").unwrap();
        app.login.toggle_mode();
        fill_login(&mut app, "alice", "other");
        app.perform(&mut store, Action::SubmitLogin);
        let msg = app.message.unwrap();
        assert_eq!(msg.level, Level::Error);
        assert!(msg.text.contains("already exists"));
        assert_eq!(store.user("alice").unwrap().password, "pw1");
    }

    #[test]
    fn bad_login_reports_invalid_credentials() {
        let (_dir, mut store, mut app) = setup();
        store.register("alice", "pw1").unwrap();
        fill_login(&mut app, "alice", "wrong");
        app.perform(&mut store, Action::SubmitLogin);
        assert!(!app.session.is_logged_in());
        assert_eq!(app.message.unwrap().text, "invalid credentials");
    }

    #[test]
    fn add_task_via_prompt() {
        let (_dir, mut store, mut app) = logged_in(&[]);
        app.open_add_prompt();
        app.prompt.as_mut().unwrap().input = "buy milk".into();
        app.perform(&mut store, Action::SubmitPrompt);
        assert!(app.prompt.is_none());
        assert_eq!(app.task_lines(&store), vec!["[ ] buy milk"]);
    }

    #[test]
    fn empty_prompt_is_ignored() {
        let (_dir, mut store, mut app) = logged_in(&[]);
        app.open_add_prompt();
        app.perform(&mut store, Action::SubmitPrompt);
        assert!(app.prompt.is_none());
        assert!(app.task_lines(&store).is_empty());
        assert!(app.message.is_none());
    }

    #[test]
    fn whitespace_reminder_is_kept() {
        let (_dir, mut store, mut app) = logged_in(&["a"]);
        app.open_reminder_prompt(&store);
        app.prompt.as_mut().unwrap().input = "  ".into();
        app.perform(&mut store, Action::SubmitPrompt);
        assert!(app.message.is_none());
        assert_eq!(
            store.user("alice").unwrap().tasks[0].reminder.as_deref(),
            Some("  ")
        );
    }

    #[test]
    fn whitespace_description_reports_invalid_input() {
        let (_dir, mut store, mut app) = logged_in(&[]);
        app.open_add_prompt();
        app.prompt.as_mut().unwrap().input = "   ".into();
        app.perform(&mut store, Action::SubmitPrompt);
        assert_eq!(app.message.unwrap().level, Level::Error);
        assert!(store.user("alice").unwrap().tasks.is_empty());
    }

    #[test]
    fn actions_without_selection_warn() {
        let (_dir, mut store, mut app) = logged_in(&[]);
        for action in [Action::MarkDone, Action::MarkImportant, Action::Delete] {
            app.message = None;
            app.perform(&mut store, action);
            let msg = app.message.clone().unwrap();
            assert_eq!(msg.level, Level::Warning);
            assert_eq!(msg.text, "No task selected.");
        }
        app.open_reminder_prompt(&store);
        assert!(app.prompt.is_none());
    }

    #[test]
    fn mark_done_and_important_on_selection() {
        let (_dir, mut store, mut app) = logged_in(&["a", "b"]);
        app.move_down(&store);
        app.perform(&mut store, Action::MarkDone);
        app.perform(&mut store, Action::MarkImportant);
        assert_eq!(app.task_lines(&store), vec!["[ ] a", "[x] b (!)"]);
    }

    #[test]
    fn reminder_on_selection() {
        let (_dir, mut store, mut app) = logged_in(&["a"]);
        app.open_reminder_prompt(&store);
        app.prompt.as_mut().unwrap().input = "Monday".into();
        app.perform(&mut store, Action::SubmitPrompt);
        assert_eq!(app.task_lines(&store), vec!["[ ] a - Reminder: Monday"]);
    }

    #[test]
    fn delete_last_clamps_cursor() {
        let (_dir, mut store, mut app) = logged_in(&["a", "b"]);
        app.move_down(&store);
        assert_eq!(app.cursor, 1);
        app.perform(&mut store, Action::Delete);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.task_lines(&store), vec!["[ ] a"]);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let (_dir, store, mut app) = logged_in(&["a", "b"]);
        app.move_up();
        assert_eq!(app.cursor, 0);
        app.move_down(&store);
        app.move_down(&store);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn logout_clears_session() {
        let (_dir, mut store, mut app) = logged_in(&["a"]);
        app.open_add_prompt();
        app.perform(&mut store, Action::Logout);
        assert!(!app.session.is_logged_in());
        assert!(app.prompt.is_none());
        assert!(app.task_lines(&store).is_empty());
    }

    #[test]
    fn quit_flow() {
        let (_dir, mut store, mut app) = setup();
        assert_eq!(app.perform(&mut store, Action::Quit), Flow::Quit);
        assert_eq!(app.perform(&mut store, Action::Continue), Flow::Continue);
    }

    #[test]
    fn mutations_reach_disk() {
        let (_dir, mut store, mut app) = logged_in(&["a"]);
        app.perform(&mut store, Action::MarkDone);
        let reloaded = Store::open(store.path()).unwrap();
        assert!(reloaded.user("alice").unwrap().tasks[0].completed);
    }
}
