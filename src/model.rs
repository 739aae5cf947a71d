use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// A single to-do item. Identity within a user is its position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub description: String,
    pub completed: bool,
    pub important: bool,
    #[serde(default)]
    pub reminder: Option<String>,
}

impl Task {
    pub fn new(description: &str) -> Result<Self, StoreError> {
        if description.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "task description must not be empty".into(),
            ));
        }
        Ok(Self {
            description: description.to_string(),
            completed: false,
            important: false,
            reminder: None,
        })
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    pub fn mark_important(&mut self) {
        self.important = true;
    }

    /// Replaces any previous reminder. The text is free-form.
    pub fn set_reminder(&mut self, text: &str) {
        self.reminder = Some(text.to_string());
    }

    pub fn status_icon(&self) -> &'static str {
        if self.completed {
            "[x]"
        } else {
            "[ ]"
        }
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_icon(), self.description)?;
        if self.important {
            f.write_str(" (!)")?;
        }
        match self.reminder.as_deref() {
            Some(r) if !r.is_empty() => write!(f, " - Reminder: {r}"),
            _ => Ok(()),
        }
    }
}

/// An account and its ordered task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub tasks: Vec<Task>,
}

impl User {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn add_task(&mut self, description: &str) -> Result<(), StoreError> {
        self.tasks.push(Task::new(description)?);
        Ok(())
    }

    /// Removes the task at `index`. Out-of-range indices are ignored;
    /// the return value says whether anything was removed.
    pub fn delete_task(&mut self, index: usize) -> bool {
        if index < self.tasks.len() {
            self.tasks.remove(index);
            true
        } else {
            false
        }
    }

    pub fn task_mut(&mut self, index: usize) -> Result<&mut Task, StoreError> {
        self.tasks
            .get_mut(index)
            .ok_or(StoreError::TaskNotFound(index))
    }

    pub fn list_tasks(&self) -> impl Iterator<Item = String> + '_ {
        self.tasks.iter().map(Task::describe)
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}
