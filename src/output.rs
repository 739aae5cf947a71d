use serde::Serialize;

use crate::model::{Task, User};

#[derive(Serialize)]
pub struct TaskEntry<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub task: &'a Task,
    pub display: String,
}

pub fn task_entries(user: &User) -> Vec<TaskEntry<'_>> {
    user.tasks
        .iter()
        .enumerate()
        .map(|(index, task)| TaskEntry {
            index,
            task,
            display: task.describe(),
        })
        .collect()
}

pub fn format_task_list(user: &User) -> String {
    let width = user.tasks.len().saturating_sub(1).to_string().len();
    let mut out = String::new();
    for (i, line) in user.list_tasks().enumerate() {
        out.push_str(&format!("{i:>width$}: {line}\n"));
    }
    out
}

pub fn format_task_json(user: &User) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&task_entries(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user(descs: &[&str]) -> User {
        let mut user = User::new("alice", "pw");
        for d in descs {
            user.add_task(d).unwrap();
        }
        user
    }

    #[test]
    fn empty_list() {
        assert_eq!(format_task_list(&make_user(&[])), "");
    }

    #[test]
    fn flat_list() {
        let mut user = make_user(&["buy milk", "walk dog"]);
        user.tasks[1].mark_important();
        let out = format_task_list(&user);
        assert_eq!(out, "0: [ ] buy milk\n1: [ ] walk dog (!)\n");
    }

    #[test]
    fn indices_are_right_aligned() {
        let descs: Vec<String> = (0..11).map(|i| format!("t{i}")).collect();
        let refs: Vec<&str> = descs.iter().map(String::as_str).collect();
        let out = format_task_list(&make_user(&refs));
        assert!(out.starts_with(" 0: [ ] t0\n"));
        assert!(out.ends_with("10: [ ] t10\n"));
    }

    #[test]
    fn json_has_fields_and_display() {
        let mut user = make_user(&["buy milk"]);
        user.tasks[0].set_reminder("Monday");
        let value: serde_json::Value =
            serde_json::from_str(&format_task_json(&user).unwrap()).unwrap();
        assert_eq!(value[0]["index"], 0);
        assert_eq!(value[0]["description"], "buy milk");
        assert_eq!(value[0]["completed"], false);
        assert_eq!(value[0]["reminder"], "Monday");
        assert_eq!(value[0]["display"], "[ ] buy milk - Reminder: Monday");
    }
}
